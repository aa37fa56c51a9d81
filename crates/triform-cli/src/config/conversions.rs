use std::path::{Path, PathBuf};

use triform_build::{BuildOptions, CompilerOverrides, IndexFile, OtherFile, OutputDirs};

use crate::commands::utils::resolve_path as resolve;
use crate::config::TriformConfig;

impl TriformConfig {
    /// Working directory of the build, resolved against `current_dir`.
    pub fn resolved_cwd(&self, current_dir: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) => resolve(cwd, current_dir),
            None => current_dir.to_path_buf(),
        }
    }

    /// Convert into library build options.
    ///
    /// Relative paths are resolved against the configured working directory,
    /// which itself is relative to `current_dir`.
    pub fn to_build_options(&self, current_dir: &Path) -> BuildOptions {
        let base = self.resolved_cwd(current_dir);

        let index_file = IndexFile {
            path: resolve(&self.index_file.path, &base),
            lines: self.index_file.lines,
        };
        let other_files = self.other_files.iter().map(|other| OtherFile {
            path: resolve(&other.path, &base),
            ..other.clone()
        });
        let output_dirs = OutputDirs {
            esm: self.output_dirs.esm.as_deref().map(|d| resolve(d, &base)),
            cjs: self.output_dirs.cjs.as_deref().map(|d| resolve(d, &base)),
            browser: self.output_dirs.browser.as_deref().map(|d| resolve(d, &base)),
        };

        let mut compiler = CompilerOverrides::default();
        if let Some(platform) = self.platform {
            compiler = compiler.platform(platform.into());
        }
        if !self.external.is_empty() {
            compiler = compiler.external(self.external.iter().cloned());
        }

        let mut options = BuildOptions::new(index_file)
            .formats(self.format.iter().copied())
            .others(other_files)
            .output_dirs(output_dirs)
            .file_name(self.file_name.clone())
            .declaration(self.declaration)
            .minify(self.minify)
            .source_map(self.source_map)
            .fix_relative_imports(self.fix_relative_imports)
            .cwd(base.clone())
            .compiler_options(compiler);

        if let Some(dir) = &self.declaration_dir {
            options = options.declaration_dir(resolve(dir, &base));
        }

        options
    }
}
