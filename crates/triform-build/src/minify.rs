//! Minification of emitted JavaScript.
//!
//! Compression and mangling both keep function names, so stack traces and
//! `fn.name` checks in consumers keep working. Class names are not preserved.

use std::path::PathBuf;

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{
    CompressOptions, CompressOptionsKeepNames, MangleOptions, MangleOptionsKeepNames, Minifier,
    MinifierOptions,
};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::extension::strip_export_keywords;
use crate::format::Format;
use crate::{Error, Result};

/// Minifier settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Produce a source map and append a `sourceMappingURL` comment.
    pub source_map: bool,
    /// Preserve function names through compression and mangling.
    pub keep_fnames: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            source_map: true,
            keep_fnames: true,
        }
    }
}

impl MinifyOptions {
    pub fn source_map(mut self, enabled: bool) -> Self {
        self.source_map = enabled;
        self
    }
}

/// Result of minifying one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minified {
    pub code: String,
    /// Source map JSON, present when requested.
    pub map: Option<String>,
}

/// Minify `code`, emitted under `file_name`, for the given format.
///
/// For [`Format::Browser`] every `export` keyword is stripped first. When a
/// source map is requested the code ends with
/// `//# sourceMappingURL=<file_name>.map`, where only the final path component
/// of `file_name` is used.
///
/// # Errors
///
/// Returns [`Error::Minify`] if the code does not parse.
pub fn minify(
    code: &str,
    file_name: &str,
    format: Format,
    options: &MinifyOptions,
) -> Result<Minified> {
    let source = if format == Format::Browser {
        strip_export_keywords(code)
    } else {
        code.to_string()
    };

    let allocator = Allocator::default();
    // Browser output is a classic script once exports are gone.
    let source_type = match format {
        Format::Esm => SourceType::mjs(),
        Format::Cjs | Format::Browser => SourceType::cjs(),
    };

    let parsed = Parser::new(&allocator, &source, source_type).parse();
    if !parsed.errors.is_empty() {
        let messages: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
        return Err(Error::Minify {
            file: file_name.to_string(),
            message: messages.join(", "),
        });
    }
    let mut program = parsed.program;

    let minifier = Minifier::new(MinifierOptions {
        mangle: Some(MangleOptions {
            keep_names: MangleOptionsKeepNames {
                function: options.keep_fnames,
                class: false,
            },
            ..Default::default()
        }),
        compress: Some(CompressOptions {
            keep_names: CompressOptionsKeepNames {
                function: options.keep_fnames,
                class: false,
            },
            ..CompressOptions::smallest()
        }),
    });
    let ret = minifier.minify(&allocator, &mut program);

    let base_name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let codegen_options = CodegenOptions {
        source_map_path: options.source_map.then(|| PathBuf::from(base_name)),
        ..CodegenOptions::minify()
    };
    let generated = Codegen::new()
        .with_options(codegen_options)
        .with_scoping(ret.scoping)
        .build(&program);

    let mut code = generated.code;
    let map = if options.source_map {
        let map = generated.map.map(|m| m.to_json_string());
        code.push_str(&format!("\n//# sourceMappingURL={}.map", base_name));
        map
    } else {
        None
    };

    Ok(Minified { code, map })
}
