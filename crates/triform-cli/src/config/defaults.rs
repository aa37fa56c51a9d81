use std::path::PathBuf;
use triform_build::{Format, IndexFile, OutputDirs};

pub fn default_formats() -> Vec<Format> {
    vec![Format::Esm, Format::Cjs]
}

/// `esm` and `cjs` get a directory under `dist/`. `browser` has none, so a
/// browser build needs `outputDirs.browser` or `--browser-dir`.
pub fn default_output_dirs() -> OutputDirs {
    OutputDirs {
        esm: Some(PathBuf::from("dist/esm")),
        cjs: Some(PathBuf::from("dist/cjs")),
        browser: None,
    }
}

pub fn default_index_file() -> IndexFile {
    IndexFile::new("src/index.ts")
}

pub fn default_file_name() -> String {
    "index.ts".to_string()
}

pub fn default_true() -> bool {
    true
}
