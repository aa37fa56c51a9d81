use crate::cli::{BuildArgs, PlatformArg};
use crate::config::TriformConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
    value::Uncased,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use triform_build::{Format, OtherFile, OutputDirs};

/// Config file picked up from the current directory.
pub const CONFIG_FILE_NAME: &str = "triform.config.json";

/// Prefix of configuration environment variables.
///
/// `TRIFORM_MINIFY=false`, `TRIFORM_FORMAT=esm,browser` and, for nested
/// keys, `TRIFORM_OUTPUT_DIRS__ESM=lib`.
pub const ENV_PREFIX: &str = "TRIFORM_";

/// Values given on the command line. Unset flags are skipped when
/// serialized so they never replace a value from another source.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<Vec<Format>>,
    output_dirs: OutputDirs,
    index_file: IndexOverride,
    #[serde(skip_serializing_if = "Option::is_none")]
    other_files: Option<Vec<OtherFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    declaration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    declaration_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix_relative_imports: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<PlatformArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cwd: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct IndexOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<usize>,
}

impl From<&BuildArgs> for CliOverrides {
    fn from(args: &BuildArgs) -> Self {
        Self {
            format: args
                .format
                .as_ref()
                .map(|formats| formats.iter().copied().map(Format::from).collect()),
            output_dirs: OutputDirs {
                esm: args.esm_dir.clone(),
                cjs: args.cjs_dir.clone(),
                browser: args.browser_dir.clone(),
            },
            index_file: IndexOverride {
                path: args.index.clone(),
                lines: args.index_lines,
            },
            other_files: (!args.other.is_empty()).then(|| args.other.clone()),
            file_name: args.file_name.clone(),
            declaration: args.declaration.then_some(true),
            declaration_dir: args.declaration_dir.clone(),
            minify: args.no_minify.then_some(false),
            source_map: args.no_sourcemap.then_some(false),
            fix_relative_imports: args.fix_imports.then_some(true),
            platform: args.platform,
            cwd: args.cwd.clone(),
        }
    }
}

impl TriformConfig {
    /// Load configuration from every source and validate it.
    ///
    /// `--config` must point at an existing file. Without it,
    /// `triform.config.json` in the current directory is used when present.
    pub fn load(args: &BuildArgs) -> Result<Self> {
        let config_file = match &args.config {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                default_path.is_file().then(|| default_path.to_path_buf())
            }
        };

        let config = Self::figment(config_file.as_deref(), args)
            .extract::<Self>()
            .map_err(|e| ConfigError::InvalidValue {
                field: e
                    .path
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "configuration".to_string()),
                value: e.to_string(),
                hint: format!("Check {} and {}* variables", CONFIG_FILE_NAME, ENV_PREFIX),
            })?;

        config.validate()?;
        debug!(?config, "loaded configuration");
        Ok(config)
    }

    fn figment(config_file: Option<&Path>, args: &BuildArgs) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        if let Some(path) = config_file {
            debug!(path = %path.display(), "reading config file");
            figment = figment.merge(Json::file(path));
        }

        figment
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split("__")
                    .lowercase(false)
                    .map(|key| Uncased::from_owned(env_key_to_field(key.as_str()))),
            )
            .merge(Serialized::defaults(CliOverrides::from(args)))
    }

    /// Configuration with every default applied.
    pub fn default_config() -> Self {
        use crate::config::defaults::*;

        Self {
            format: default_formats(),
            output_dirs: default_output_dirs(),
            index_file: default_index_file(),
            other_files: Vec::new(),
            file_name: default_file_name(),
            declaration: false,
            declaration_dir: None,
            minify: true,
            source_map: true,
            fix_relative_imports: false,
            external: Vec::new(),
            platform: None,
            cwd: None,
        }
    }
}

/// `OUTPUT_DIRS.ESM` becomes `outputDirs.esm`.
pub(crate) fn env_key_to_field(key: &str) -> String {
    key.split('.')
        .map(|segment| {
            let mut out = String::with_capacity(segment.len());
            for (i, word) in segment.split('_').filter(|w| !w.is_empty()).enumerate() {
                let word = word.to_ascii_lowercase();
                if i == 0 {
                    out.push_str(&word);
                } else {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        out.push(first.to_ascii_uppercase());
                        out.push_str(chars.as_str());
                    }
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(".")
}
