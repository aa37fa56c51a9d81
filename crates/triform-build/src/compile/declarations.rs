//! Declaration (`.d.ts`) generation with OXC isolated declarations.
//!
//! Isolated declarations need explicit types on exported symbols. Sources
//! that rely on inference for exports produce errors here, which the caller
//! reports as warnings.

use anyhow::{Context, Result};
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_isolated_declarations::{IsolatedDeclarations, IsolatedDeclarationsOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

/// Whether an entry is a TypeScript source that declarations can be built from.
pub(crate) fn is_typescript_entry(path: &Path) -> bool {
    let name = path.to_string_lossy();
    if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext, "ts" | "tsx" | "mts" | "cts"))
        .unwrap_or(false)
}

/// Name of the declaration file for an entry: `<stem>.d.ts`.
pub(crate) fn declaration_file_name(entry: &Path) -> String {
    let stem = entry
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    format!("{}.d.ts", stem)
}

/// Generate declaration text for a TypeScript source.
pub(crate) fn generate_declarations(source: &str, file_path: &str) -> Result<String> {
    let allocator = Allocator::default();

    let source_type = SourceType::from_path(file_path)
        .with_context(|| format!("Invalid TypeScript file: {}", file_path))?;

    let parse_result = Parser::new(&allocator, source, source_type).parse();
    if !parse_result.errors.is_empty() {
        let messages: Vec<String> = parse_result
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect();
        anyhow::bail!("Failed to parse {}: {}", file_path, messages.join(", "));
    }

    let options = IsolatedDeclarationsOptions {
        strip_internal: false,
    };
    let dts = IsolatedDeclarations::new(&allocator, options).build(&parse_result.program);
    if !dts.errors.is_empty() {
        let messages: Vec<String> = dts.errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!(
            "Errors generating declarations for {}: {}",
            file_path,
            messages.join(", ")
        );
    }

    Ok(Codegen::new().build(&dts.program).code)
}
