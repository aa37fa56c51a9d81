//! Shared test utilities for triform-build integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway package with a `package.json` and a `src/` directory.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// Create a package whose manifest declares `type` (or omits it).
    pub fn new(package_type: Option<&str>) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let manifest = match package_type {
            Some(t) => format!(r#"{{ "name": "fixture", "type": "{}" }}"#, t),
            None => r#"{ "name": "fixture" }"#.to_string(),
        };
        fs::write(dir.path().join("package.json"), manifest).expect("write package.json");
        fs::create_dir(dir.path().join("src")).expect("create src");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write source");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.join(relative))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
    }

    /// File names directly inside `relative`, sorted.
    pub fn list(&self, relative: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.join(relative))
            .expect("read dir")
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Names of leftover temp directories in the project root.
    pub fn temp_dirs(&self) -> Vec<String> {
        fs::read_dir(self.path())
            .expect("read project dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("_triform"))
            .collect()
    }
}

/// A small `greet` module with explicit types, so declarations can be built.
pub const GREET_SOURCE: &str = r#"
export function greet(name: string): string {
    return `Hello, ${name}!`;
}

export const version: string = "1.0.0";
"#;

/// A project with `src/index.ts` holding [`GREET_SOURCE`].
pub fn greet_project(package_type: Option<&str>) -> Project {
    let project = Project::new(package_type);
    project.write("src/index.ts", GREET_SOURCE);
    project
}
