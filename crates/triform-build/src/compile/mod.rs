//! Compile entries into one module format.
//!
//! Rolldown runs fully in memory: its output is intercepted, renamed by the
//! extension rewriter and buffered in an [`OutputSink`]. Declarations come
//! from OXC isolated declarations on each TypeScript entry.
//!
//! ```text
//! entries ──► Rolldown (format from ModuleKind) ──► rename ──► OutputSink ──► disk
//!    └──────► isolated declarations (.d.ts) ─────► rename ──┘
//! ```

mod declarations;
mod sink;

pub use sink::{EmittedFile, MemorySink, OutputSink};

use std::path::{Path, PathBuf};

use rolldown::{BundlerBuilder, BundlerOptions, InputItem, IsExternal, Platform, SourceMapType};
use rolldown_common::Output;

use crate::extension::{fix_relative_imports, is_typescript_output, rewrite_extension};
use crate::format::Format;
use crate::manifest::PackageType;
use crate::{Error, Result};

use declarations::{declaration_file_name, generate_declarations, is_typescript_entry};
pub(crate) use sink::resolve_output_path;

/// Pattern matching bare package specifiers, which stay imports.
const BARE_IMPORT_PATTERN: &str = "^[^./]";

/// Compiler settings passed through untouched.
///
/// Module kind, output directory and declaration settings are chosen by
/// [`CompileOptions`] and cannot be set here.
#[derive(Debug, Clone, Default)]
pub struct CompilerOverrides {
    /// Target platform. Defaults to `browser` for the browser format and
    /// `node` otherwise.
    pub platform: Option<Platform>,
    /// Specifiers kept as imports. Defaults to every bare package import.
    pub external: Option<Vec<String>>,
    /// Directory entries are resolved against.
    pub cwd: Option<PathBuf>,
}

impl CompilerOverrides {
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn external(mut self, external: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.external = Some(external.into_iter().map(Into::into).collect());
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Options for a single-format compile.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub entries: Vec<PathBuf>,
    pub format: Format,
    pub out_dir: PathBuf,
    /// Emit declarations. Ignored for [`Format::Browser`].
    pub declaration: bool,
    /// Where declarations go. Defaults to `out_dir`.
    pub declaration_dir: Option<PathBuf>,
    /// Emit compiler source maps (`<file>.map`).
    pub source_map: bool,
    pub package_type: PackageType,
    /// Replaces the default extension rewriting when set.
    pub extension_replace: Option<fn(&str) -> String>,
    /// Append `.js` to relative `./` specifiers in emitted JavaScript.
    pub fix_relative_imports: bool,
    pub compiler_options: CompilerOverrides,
}

impl CompileOptions {
    pub fn new(entry: impl Into<PathBuf>, format: Format, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            entries: vec![entry.into()],
            format,
            out_dir: out_dir.into(),
            declaration: false,
            declaration_dir: None,
            source_map: false,
            package_type: PackageType::default(),
            extension_replace: None,
            fix_relative_imports: false,
            compiler_options: CompilerOverrides::default(),
        }
    }

    /// Add another entry file.
    pub fn entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.entries.push(entry.into());
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

    pub fn source_map(mut self, enabled: bool) -> Self {
        self.source_map = enabled;
        self
    }

    pub fn package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = package_type;
        self
    }

    pub fn extension_replace(mut self, replace: fn(&str) -> String) -> Self {
        self.extension_replace = Some(replace);
        self
    }

    pub fn fix_relative_imports(mut self, enabled: bool) -> Self {
        self.fix_relative_imports = enabled;
        self
    }

    pub fn compiler_options(mut self, overrides: CompilerOverrides) -> Self {
        self.compiler_options = overrides;
        self
    }

    /// Whether declarations will actually be emitted.
    pub fn emits_declarations(&self) -> bool {
        self.declaration && self.format.allows_declarations()
    }

    /// Compile and write the results. See [`compile`].
    pub async fn compile(&self) -> Result<Vec<PathBuf>> {
        compile(self).await
    }

    /// Compile into `sink` without touching the filesystem.
    pub async fn compile_into<S: OutputSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        compile_into(self, sink).await
    }

    fn rename(&self, file_name: &str) -> String {
        match self.extension_replace {
            Some(replace) => replace(file_name),
            None => rewrite_extension(file_name, self.format, self.package_type),
        }
    }

    fn resolve_entry(&self, entry: &Path) -> PathBuf {
        match &self.compiler_options.cwd {
            Some(cwd) if entry.is_relative() => cwd.join(entry),
            _ => entry.to_path_buf(),
        }
    }
}

/// Compile `options.entries` and write every emitted file.
///
/// Nothing is written unless the compiler run succeeds. Returns the written
/// paths in emission order.
///
/// # Errors
///
/// Returns [`Error::Compile`] when Rolldown reports errors, or an I/O error if
/// writing fails.
pub async fn compile(options: &CompileOptions) -> Result<Vec<PathBuf>> {
    let mut sink = MemorySink::new();
    compile_into(options, &mut sink).await?;
    sink.flush().await
}

/// Compile `options.entries` into `sink`.
pub async fn compile_into<S: OutputSink + ?Sized>(
    options: &CompileOptions,
    sink: &mut S,
) -> Result<()> {
    if options.entries.is_empty() {
        return Err(Error::InvalidConfig(
            "At least one entry is required".to_string(),
        ));
    }

    let module_kind = options.format.module_kind();
    tracing::debug!(
        "Compiling {} entr{} as {} ({:?})",
        options.entries.len(),
        if options.entries.len() == 1 { "y" } else { "ies" },
        options.format,
        module_kind
    );

    let bundler_options = configure_rolldown_options(options);
    let mut bundler = BundlerBuilder::default()
        .with_options(bundler_options)
        .build()
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let bundle = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    for output in &bundle.assets {
        let file_name = output.filename();
        let final_name = match file_name.strip_suffix(".map") {
            Some(js_name) => format!("{}.map", options.rename(js_name)),
            None => options.rename(file_name),
        };

        let mut contents = String::from_utf8_lossy(output.content_as_bytes()).into_owned();
        if options.fix_relative_imports
            && matches!(output, Output::Chunk(_))
            && !is_typescript_output(&final_name)
        {
            contents = fix_relative_imports(&contents);
        }

        let path = resolve_output_path(&options.out_dir, &final_name)?;
        tracing::debug!("Emitted {} -> {}", file_name, path.display());
        sink.emit(EmittedFile { path, contents });
    }

    if options.emits_declarations() {
        emit_declarations(options, sink).await?;
    }

    Ok(())
}

async fn emit_declarations<S: OutputSink + ?Sized>(
    options: &CompileOptions,
    sink: &mut S,
) -> Result<()> {
    let dir = options.declaration_dir.as_deref().unwrap_or(&options.out_dir);

    for entry in &options.entries {
        if !is_typescript_entry(entry) {
            continue;
        }
        let path = options.resolve_entry(entry);
        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;

        match generate_declarations(&source, &path.to_string_lossy()) {
            Ok(contents) => {
                let name = options.rename(&declaration_file_name(entry));
                let path = resolve_output_path(dir, &name)?;
                sink.emit(EmittedFile { path, contents });
            }
            Err(e) => {
                tracing::warn!("Skipping declarations for {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(())
}

/// Translate compile options into Rolldown's configuration.
fn configure_rolldown_options(options: &CompileOptions) -> BundlerOptions {
    let overrides = &options.compiler_options;

    let input = options
        .entries
        .iter()
        .map(|entry| InputItem {
            name: entry
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string),
            import: entry.to_string_lossy().into_owned(),
        })
        .collect();

    let platform = overrides.platform.unwrap_or(match options.format {
        Format::Browser => Platform::Browser,
        Format::Esm | Format::Cjs => Platform::Node,
    });

    let external = match &overrides.external {
        Some(packages) => IsExternal::from(packages.clone()),
        None => IsExternal::from(vec![BARE_IMPORT_PATTERN.to_string()]),
    };

    BundlerOptions {
        input: Some(input),
        cwd: overrides.cwd.clone(),
        format: Some(options.format.module_kind().to_rolldown_format()),
        sourcemap: options.source_map.then_some(SourceMapType::Hidden),
        external: Some(external),
        platform: Some(platform),
        ..Default::default()
    }
}
