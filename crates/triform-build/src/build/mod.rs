//! Full builds: merge, compile per format, minify, write.
//!
//! All intermediate output lives in a temporary directory created inside the
//! working directory and removed when the build ends, whether it succeeded or
//! not. Output directories that the build itself created are removed again
//! when the build fails.

mod report;

pub use report::{BuildReport, FormatReport};

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::compile::{CompileOptions, CompilerOverrides};
use crate::extension::is_javascript_output;
use crate::format::Format;
use crate::fs::{ensure_clean, ensure_dir, remove_dir_best_effort};
use crate::manifest::PackageType;
use crate::merge::{IndexFile, MergeOptions, OtherFile, merge_files_to};
use crate::minify::{MinifyOptions, minify};
use crate::{Error, Result};

/// Prefix of the per-build temporary directory.
const TEMP_DIR_PREFIX: &str = "_triform";

/// Output directory per format. A format without a directory is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDirs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esm: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cjs: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<PathBuf>,
}

impl OutputDirs {
    pub fn get(&self, format: Format) -> Option<&Path> {
        match format {
            Format::Esm => self.esm.as_deref(),
            Format::Cjs => self.cjs.as_deref(),
            Format::Browser => self.browser.as_deref(),
        }
    }

    pub fn set(&mut self, format: Format, dir: impl Into<PathBuf>) {
        let dir = Some(dir.into());
        match format {
            Format::Esm => self.esm = dir,
            Format::Cjs => self.cjs = dir,
            Format::Browser => self.browser = dir,
        }
    }
}

/// Configuration for a full build.
///
/// # Examples
///
/// ```no_run
/// use triform_build::{BuildOptions, Format, IndexFile};
///
/// # async fn run() -> triform_build::Result<()> {
/// let report = BuildOptions::new(IndexFile::new("src/index.ts"))
///     .formats([Format::Esm, Format::Cjs])
///     .esm_dir("dist")
///     .cjs_dir("dist/cjs")
///     .build()
///     .await?;
/// assert_eq!(report.formats.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Requested formats. Duplicates are ignored.
    pub format: Vec<Format>,
    pub output_dirs: OutputDirs,
    pub index_file: IndexFile,
    pub other_files: Vec<OtherFile>,
    /// Name of the merged file inside the temp dir (default: `index.ts`).
    /// Its stem names the compiled output.
    pub file_name: String,
    /// Emit declarations for `esm` and `cjs` (default: false).
    pub declaration: bool,
    /// Declaration directory. Defaults to each format's output directory.
    pub declaration_dir: Option<PathBuf>,
    /// Minify emitted JavaScript (default: true).
    pub minify: bool,
    /// Write source maps next to minified files (default: true).
    pub source_map: bool,
    /// Append `.js` to relative `./` specifiers (default: false).
    pub fix_relative_imports: bool,
    /// Directory holding `package.json` and the temp dir (default: current dir).
    pub cwd: Option<PathBuf>,
    pub compiler_options: CompilerOverrides,
}

impl BuildOptions {
    pub fn new(index_file: IndexFile) -> Self {
        Self {
            format: Vec::new(),
            output_dirs: OutputDirs::default(),
            index_file,
            other_files: Vec::new(),
            file_name: "index.ts".to_string(),
            declaration: false,
            declaration_dir: None,
            minify: true,
            source_map: true,
            fix_relative_imports: false,
            cwd: None,
            compiler_options: CompilerOverrides::default(),
        }
    }

    pub fn formats(mut self, formats: impl IntoIterator<Item = Format>) -> Self {
        self.format = formats.into_iter().collect();
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format.push(format);
        self
    }

    pub fn other(mut self, file: OtherFile) -> Self {
        self.other_files.push(file);
        self
    }

    pub fn others(mut self, files: impl IntoIterator<Item = OtherFile>) -> Self {
        self.other_files.extend(files);
        self
    }

    pub fn output_dirs(mut self, dirs: OutputDirs) -> Self {
        self.output_dirs = dirs;
        self
    }

    pub fn esm_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dirs.esm = Some(dir.into());
        self
    }

    pub fn cjs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dirs.cjs = Some(dir.into());
        self
    }

    pub fn browser_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dirs.browser = Some(dir.into());
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn declaration(mut self, enabled: bool) -> Self {
        self.declaration = enabled;
        self
    }

    pub fn declaration_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.declaration_dir = Some(dir.into());
        self
    }

    pub fn minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    pub fn source_map(mut self, enabled: bool) -> Self {
        self.source_map = enabled;
        self
    }

    pub fn fix_relative_imports(mut self, enabled: bool) -> Self {
        self.fix_relative_imports = enabled;
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn compiler_options(mut self, overrides: CompilerOverrides) -> Self {
        self.compiler_options = overrides;
        self
    }

    /// Run the build. See [`build`].
    pub async fn build(&self) -> Result<BuildReport> {
        build(self).await
    }

    /// Requested formats in order, without duplicates.
    pub fn distinct_formats(&self) -> Vec<Format> {
        let mut formats = Vec::with_capacity(self.format.len());
        for format in &self.format {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        formats
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            index_file: self.index_file.clone(),
            other_files: self.other_files.clone(),
        }
    }
}

/// Build every requested format.
///
/// Formats are processed one at a time, in the order requested. A format with
/// no output directory is skipped with a warning. Any other failure stops the
/// build, removes the output directories this build created, and returns the
/// error.
pub async fn build(options: &BuildOptions) -> Result<BuildReport> {
    let formats = options.distinct_formats();
    if formats.is_empty() {
        return Err(Error::InvalidConfig(
            "No output formats requested".to_string(),
        ));
    }

    let current_dir = std::env::current_dir()?;
    let cwd = match &options.cwd {
        Some(cwd) => current_dir.join(cwd).clean(),
        None => current_dir,
    };
    let package_type = PackageType::detect(&cwd)?;

    let temp = tempfile::Builder::new()
        .prefix(TEMP_DIR_PREFIX)
        .tempdir_in(&cwd)
        .map_err(|source| Error::Write {
            path: cwd.clone(),
            source,
        })?;
    tracing::debug!("Using temp directory {}", temp.path().display());

    let mut created = Vec::new();
    let mut ctx = BuildContext {
        options,
        package_type,
        temp_dir: temp.path().to_path_buf(),
        created: &mut created,
    };

    match ctx.run(&formats).await {
        Ok(report) => {
            if let Err(e) = temp.close() {
                tracing::warn!("Failed to remove temp directory: {}", e);
            }
            Ok(report)
        }
        Err(e) => {
            tracing::error!("Build failed: {}", e);
            for dir in created.iter().rev() {
                remove_dir_best_effort(dir).await;
            }
            drop(temp);
            Err(e)
        }
    }
}

struct BuildContext<'a> {
    options: &'a BuildOptions,
    package_type: PackageType,
    temp_dir: PathBuf,
    created: &'a mut Vec<PathBuf>,
}

impl BuildContext<'_> {
    async fn run(&mut self, formats: &[Format]) -> Result<BuildReport> {
        let merged = crate::compile::resolve_output_path(&self.temp_dir, &self.options.file_name)?;
        merge_files_to(&self.options.merge_options(), &merged).await?;

        self.prepare_output_dirs(formats).await?;

        let mut report = BuildReport::default();
        for &format in formats {
            let Some(out_dir) = self.options.output_dirs.get(format) else {
                let warning = format!("No output directory for format '{}', skipping", format);
                tracing::warn!("{}", warning);
                report.warnings.push(warning);
                continue;
            };

            let files = self.build_format(format, out_dir, &merged).await?;
            tracing::info!(
                "Built {} into {} ({} file{})",
                format,
                out_dir.display(),
                files.len(),
                if files.len() == 1 { "" } else { "s" }
            );
            report.formats.push(FormatReport {
                format,
                out_dir: out_dir.to_path_buf(),
                files,
            });
        }

        Ok(report)
    }

    /// Clean every output directory once, so formats sharing a directory
    /// do not remove each other's files.
    async fn prepare_output_dirs(&mut self, formats: &[Format]) -> Result<()> {
        let options = self.options;
        let mut cleaned: Vec<PathBuf> = Vec::new();
        for &format in formats {
            let Some(out_dir) = options.output_dirs.get(format) else {
                continue;
            };
            let key = out_dir.clean();
            if cleaned.contains(&key) {
                continue;
            }
            if ensure_clean(out_dir).await? {
                self.created.push(out_dir.to_path_buf());
            }
            cleaned.push(key);
        }
        Ok(())
    }

    async fn build_format(
        &mut self,
        format: Format,
        out_dir: &Path,
        merged: &Path,
    ) -> Result<Vec<PathBuf>> {
        let options = self.options;

        let declaration_dir = options
            .declaration_dir
            .clone()
            .unwrap_or_else(|| out_dir.to_path_buf());
        let declaration = options.declaration && format.allows_declarations();
        if declaration && !declaration_dir.exists() {
            ensure_dir(&declaration_dir).await?;
            self.created.push(declaration_dir.clone());
        }

        let stage = self.temp_dir.join(format.temp_dir_name()).clean();
        let mut overrides = options.compiler_options.clone();
        if overrides.cwd.is_none() {
            overrides.cwd = Some(self.temp_dir.clone());
        }

        let compile = CompileOptions {
            entries: vec![merged.to_path_buf()],
            format,
            out_dir: stage.clone(),
            declaration,
            declaration_dir: Some(declaration_dir),
            source_map: options.source_map && !options.minify,
            package_type: self.package_type,
            extension_replace: None,
            fix_relative_imports: options.fix_relative_imports,
            compiler_options: overrides,
        };
        let emitted = compile.compile().await?;

        let mut written = Vec::new();
        let mut declarations = Vec::new();
        for path in emitted {
            if !path.starts_with(&stage) {
                declarations.push(path);
                continue;
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            let target = out_dir.join(&name);

            if !options.minify || !is_javascript_output(&name) {
                if options.minify && name.ends_with(".map") {
                    continue;
                }
                copy_file(&path, &target).await?;
                written.push(target);
                continue;
            }

            let code = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| Error::Read {
                    path: path.clone(),
                    source,
                })?;
            let minified = minify(
                &code,
                &name,
                format,
                &MinifyOptions::default().source_map(options.source_map),
            )?;
            tracing::debug!(
                "Minified {}: {} -> {} bytes",
                name,
                code.len(),
                minified.code.len()
            );

            write_file(&target, &minified.code).await?;
            written.push(target.clone());
            if let Some(map) = minified.map {
                let map_path = out_dir.join(format!("{}.map", name));
                write_file(&map_path, &map).await?;
                written.push(map_path);
            }
        }

        written.extend(declarations);
        Ok(written)
    }
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
}

async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    tokio::fs::copy(from, to)
        .await
        .map(|_| ())
        .map_err(|source| Error::Write {
            path: to.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BuildOptions::new(IndexFile::new("src/index.ts"));

        assert_eq!(options.file_name, "index.ts");
        assert!(options.minify);
        assert!(options.source_map);
        assert!(!options.declaration);
        assert!(!options.fix_relative_imports);
    }

    #[test]
    fn test_distinct_formats_keeps_order() {
        let options = BuildOptions::new(IndexFile::new("src/index.ts"))
            .formats([Format::Cjs, Format::Esm, Format::Cjs, Format::Browser, Format::Esm]);

        assert_eq!(
            options.distinct_formats(),
            vec![Format::Cjs, Format::Esm, Format::Browser]
        );
    }

    #[test]
    fn test_output_dirs_lookup() {
        let mut dirs = OutputDirs::default();
        dirs.set(Format::Browser, "dist/browser");

        assert_eq!(dirs.get(Format::Browser), Some(Path::new("dist/browser")));
        assert_eq!(dirs.get(Format::Esm), None);
    }

    #[test]
    fn test_merge_options_from_build_options() {
        let options = BuildOptions::new(IndexFile::new("src/index.ts").lines(2))
            .other(OtherFile::new("src/a.ts").remove_export(true));
        let merge = options.merge_options();

        assert_eq!(merge.index_file.lines, Some(2));
        assert_eq!(merge.other_files.len(), 1);
    }

    #[tokio::test]
    async fn test_no_formats_is_config_error() {
        let err = BuildOptions::new(IndexFile::new("src/index.ts"))
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
