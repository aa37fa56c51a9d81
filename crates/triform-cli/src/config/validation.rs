use std::collections::HashSet;
use std::path::Path;

use crate::config::TriformConfig;
use crate::error::{ConfigError, Result};

/// Largest accepted line count for `lines`.
pub const MAX_SKIPPED_LINES: usize = 10_000;

/// Validate a file name for the merged unit.
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "fileName".to_string(),
            value: name.to_string(),
            hint: "File name cannot be empty".to_string(),
        }
        .into());
    }

    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ConfigError::InvalidValue {
            field: "fileName".to_string(),
            value: name.to_string(),
            hint: "Use a plain file name such as 'index.ts', not a path".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_lines(field: &str, lines: Option<usize>) -> Result<()> {
    match lines {
        Some(n) if n > MAX_SKIPPED_LINES => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: n.to_string(),
            hint: format!(
                "At most {} leading lines can be dropped; this usually means the wrong field was set",
                MAX_SKIPPED_LINES
            ),
        }
        .into()),
        _ => Ok(()),
    }
}

fn validate_path(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingField {
            field: field.to_string(),
            hint: "Provide a file path".to_string(),
        }
        .into());
    }
    Ok(())
}

impl TriformConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.format.is_empty() {
            return Err(ConfigError::MissingField {
                field: "format".to_string(),
                hint: "Request at least one of 'esm', 'cjs' or 'browser'".to_string(),
            }
            .into());
        }

        validate_path("indexFile.path", &self.index_file.path)?;
        validate_lines("indexFile.lines", self.index_file.lines)?;

        let mut seen = HashSet::new();
        seen.insert(self.index_file.path.as_path());
        for (i, other) in self.other_files.iter().enumerate() {
            let field = format!("otherFiles[{}]", i);
            validate_path(&format!("{}.path", field), &other.path)?;
            validate_lines(&format!("{}.lines", field), other.lines)?;
            if !seen.insert(other.path.as_path()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("{}.path", field),
                    value: other.path.display().to_string(),
                    hint: "Each file can be merged only once".to_string(),
                }
                .into());
            }
        }

        validate_file_name(&self.file_name)?;

        Ok(())
    }
}
