//! Output formats and the module kind each one compiles to.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Requested output format.
///
/// Each format is built independently; the order formats are requested in does
/// not imply priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// ECMAScript module output.
    Esm,
    /// CommonJS output (`require` / `module.exports`).
    Cjs,
    /// Script for a browser `<script>` tag, with export statements removed.
    Browser,
}

/// Module kind handed to the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    EsNext,
    CommonJs,
    Es2015,
}

impl Format {
    /// All formats, in canonical order.
    pub const ALL: [Format; 3] = [Format::Esm, Format::Cjs, Format::Browser];

    /// Parse a format from a string.
    ///
    /// # Supported Values
    ///
    /// - `"esm"` - ECMAScript modules
    /// - `"cjs"` / `"commonjs"` - CommonJS
    /// - `"browser"` / `"global"` - browser global script
    ///
    /// Values are case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use triform_build::Format;
    ///
    /// assert_eq!(Format::parse("esm").unwrap(), Format::Esm);
    /// assert_eq!(Format::parse("CJS").unwrap(), Format::Cjs);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error for unrecognized values.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "esm" => Ok(Self::Esm),
            "cjs" | "commonjs" => Ok(Self::Cjs),
            "browser" | "global" => Ok(Self::Browser),
            _ => Err(Error::InvalidConfig(format!(
                "Invalid format: '{}'. Expected: esm, cjs, browser",
                s
            ))),
        }
    }

    /// The module kind this format compiles with.
    ///
    /// The mapping is fixed: the format is its only input.
    pub fn module_kind(self) -> ModuleKind {
        match self {
            Self::Esm => ModuleKind::EsNext,
            Self::Cjs => ModuleKind::CommonJs,
            Self::Browser => ModuleKind::Es2015,
        }
    }

    /// Whether declaration files may be emitted for this format.
    pub fn allows_declarations(self) -> bool {
        !matches!(self, Self::Browser)
    }

    /// Short name used for per-format temp directories.
    pub(crate) fn temp_dir_name(self) -> &'static str {
        match self {
            Self::Esm => "esm",
            Self::Cjs => "cjs",
            Self::Browser => "bw",
        }
    }
}

impl ModuleKind {
    /// Convert to Rolldown's output format.
    pub(crate) fn to_rolldown_format(self) -> rolldown::OutputFormat {
        match self {
            Self::EsNext | Self::Es2015 => rolldown::OutputFormat::Esm,
            Self::CommonJs => rolldown::OutputFormat::Cjs,
        }
    }
}

impl std::str::FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Esm => write!(f, "esm"),
            Self::Cjs => write!(f, "cjs"),
            Self::Browser => write!(f, "browser"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_formats() {
        assert_eq!(Format::parse("esm").unwrap(), Format::Esm);
        assert_eq!(Format::parse("cjs").unwrap(), Format::Cjs);
        assert_eq!(Format::parse("commonjs").unwrap(), Format::Cjs);
        assert_eq!(Format::parse("browser").unwrap(), Format::Browser);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Format::parse("ESM").unwrap(), Format::Esm);
        assert_eq!(Format::parse("Browser").unwrap(), Format::Browser);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Format::parse("iife").is_err());
        assert!(Format::parse("").is_err());
    }

    #[test]
    fn test_module_kind_mapping() {
        assert_eq!(Format::Esm.module_kind(), ModuleKind::EsNext);
        assert_eq!(Format::Cjs.module_kind(), ModuleKind::CommonJs);
        assert_eq!(Format::Browser.module_kind(), ModuleKind::Es2015);
    }

    #[test]
    fn test_browser_never_allows_declarations() {
        assert!(Format::Esm.allows_declarations());
        assert!(Format::Cjs.allows_declarations());
        assert!(!Format::Browser.allows_declarations());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for format in Format::ALL {
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Format::Browser).unwrap();
        assert_eq!(json, "\"browser\"");
        let parsed: Format = serde_json::from_str("\"cjs\"").unwrap();
        assert_eq!(parsed, Format::Cjs);
    }
}
