use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format selectable on the command line
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum FormatArg {
    /// ECMAScript modules (import/export syntax)
    #[value(name = "esm")]
    Esm,

    /// CommonJS modules (require/module.exports)
    #[value(name = "cjs", alias = "commonjs")]
    Cjs,

    /// Plain script for a `<script>` tag, written as `*.global.js`
    #[value(name = "browser")]
    Browser,
}

impl From<FormatArg> for triform_build::Format {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Esm => triform_build::Format::Esm,
            FormatArg::Cjs => triform_build::Format::Cjs,
            FormatArg::Browser => triform_build::Format::Browser,
        }
    }
}

/// Target platform handed to the compiler
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformArg {
    /// Node.js built-ins are resolved as externals
    #[value(name = "node")]
    Node,

    /// Browser globals, no Node.js built-ins
    #[value(name = "browser")]
    Browser,

    /// No platform assumptions
    #[value(name = "neutral")]
    Neutral,
}

impl From<PlatformArg> for triform_build::Platform {
    fn from(platform: PlatformArg) -> Self {
        match platform {
            PlatformArg::Node => triform_build::Platform::Node,
            PlatformArg::Browser => triform_build::Platform::Browser,
            PlatformArg::Neutral => triform_build::Platform::Neutral,
        }
    }
}
