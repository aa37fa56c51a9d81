//! File name and source text rewriting applied to emitted files.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::format::Format;
use crate::manifest::PackageType;

static EXPORT_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+").expect("valid export pattern"));

static RELATIVE_SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(["'])(\./[^"'\n]*)(["'])"#).expect("valid specifier pattern"));

/// Rewrite an emitted file name for the given format and host package type.
///
/// - `esm` in a CommonJS package: `.ts → .mts`, `.js → .mjs`
/// - `cjs` in a module package: `.ts → .cts`, `.js → .cjs`
/// - `browser`: the last three characters become `.global.js`
///
/// Browser rewriting assumes a `.js` suffix. Other names come out malformed
/// (`a.mjs` becomes `a..global.js`).
///
/// # Examples
///
/// ```
/// use triform_build::{rewrite_extension, Format, PackageType};
///
/// assert_eq!(rewrite_extension("foo.ts", Format::Esm, PackageType::CommonJs), "foo.mts");
/// assert_eq!(rewrite_extension("foo.ts", Format::Esm, PackageType::Module), "foo.ts");
/// assert_eq!(rewrite_extension("foo.js", Format::Browser, PackageType::Module), "foo.global.js");
/// ```
pub fn rewrite_extension(file_name: &str, format: Format, package_type: PackageType) -> String {
    match format {
        Format::Esm if package_type == PackageType::CommonJs => {
            replace_extension(file_name, ".mts", ".mjs")
        }
        Format::Cjs if package_type == PackageType::Module => {
            replace_extension(file_name, ".cts", ".cjs")
        }
        Format::Browser => {
            let cut = file_name
                .char_indices()
                .rev()
                .nth(2)
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            format!("{}.global.js", &file_name[..cut])
        }
        _ => file_name.to_string(),
    }
}

fn replace_extension(file_name: &str, ts_ext: &str, js_ext: &str) -> String {
    let ext = Path::new(file_name).extension().and_then(|e| e.to_str());
    match ext {
        Some("ts") => format!("{}{}", &file_name[..file_name.len() - 3], ts_ext),
        Some("js") => format!("{}{}", &file_name[..file_name.len() - 3], js_ext),
        _ => file_name.to_string(),
    }
}

/// Remove every `export` keyword (and the whitespace after it).
///
/// This is a plain text substitution with no word boundary: `reexport x`
/// loses its `export ` too.
pub fn strip_export_keywords(code: &str) -> String {
    EXPORT_KEYWORD.replace_all(code, "").into_owned()
}

/// Append `.js` to quoted relative specifiers (`"./foo"` → `"./foo.js"`).
///
/// Only specifiers starting with `./` are touched. Specifiers already ending
/// in `.js` are left alone.
pub fn fix_relative_imports(code: &str) -> String {
    RELATIVE_SPECIFIER
        .replace_all(code, |caps: &regex::Captures<'_>| {
            let open = &caps[1];
            let specifier = &caps[2];
            let close = &caps[3];
            if open != close || specifier.ends_with(".js") {
                caps[0].to_string()
            } else {
                format!("{open}{specifier}.js{close}")
            }
        })
        .into_owned()
}

/// Whether a file name is a TypeScript source or declaration.
pub(crate) fn is_typescript_output(file_name: &str) -> bool {
    file_name.ends_with(".ts") || file_name.ends_with(".mts") || file_name.ends_with(".cts")
}

/// Whether a file name is emitted JavaScript that the minifier should process.
pub(crate) fn is_javascript_output(file_name: &str) -> bool {
    file_name.ends_with(".js") || file_name.ends_with(".mjs") || file_name.ends_with(".cjs")
}
