#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_other;
    use crate::cli::{Cli, Command, FormatArg, PlatformArg};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_other_plain_path() {
        let file = parse_other("src/colors.ts").unwrap();
        assert_eq!(file.path, PathBuf::from("src/colors.ts"));
        assert_eq!(file.lines, None);
        assert!(!file.remove_export);
    }

    #[test]
    fn test_parse_other_with_lines_and_noexport() {
        let file = parse_other("src/colors.ts:2:noexport").unwrap();
        assert_eq!(file.path, PathBuf::from("src/colors.ts"));
        assert_eq!(file.lines, Some(2));
        assert!(file.remove_export);

        // Suffix order doesn't matter
        let file = parse_other("src/colors.ts:noexport:2").unwrap();
        assert_eq!(file.lines, Some(2));
        assert!(file.remove_export);
    }

    #[test]
    fn test_parse_other_keeps_drive_letter() {
        let file = parse_other(r"C:\src\colors.ts:1").unwrap();
        assert_eq!(file.path, PathBuf::from(r"C:\src\colors.ts"));
        assert_eq!(file.lines, Some(1));
    }

    #[test]
    fn test_parse_other_invalid() {
        assert!(parse_other("").is_err());
        assert!(parse_other(":3").is_err());
        assert!(parse_other("a.ts:1:2").is_err());
        assert!(parse_other("a.ts:noexport:NOEXPORT").is_err());
    }

    #[test]
    fn test_format_enum_values() {
        use clap::ValueEnum;

        let formats: Vec<_> = FormatArg::value_variants()
            .iter()
            .map(|v| v.to_possible_value().unwrap().get_name().to_string())
            .collect();
        assert_eq!(formats, vec!["esm", "cjs", "browser"]);
    }

    #[test]
    fn test_platform_enum_values() {
        use clap::ValueEnum;

        let platforms: Vec<_> = PlatformArg::value_variants()
            .iter()
            .map(|v| v.to_possible_value().unwrap().get_name().to_string())
            .collect();
        assert_eq!(platforms, vec!["node", "browser", "neutral"]);
    }

    #[test]
    fn test_cli_verbose_quiet_conflict() {
        let result = Cli::try_parse_from(["triform", "--verbose", "--quiet", "build"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_build_args_defaults() {
        let args = Cli::try_parse_from(["triform", "build"]).unwrap();

        if let Command::Build(build) = args.command {
            assert!(build.config.is_none());
            assert!(build.format.is_none());
            assert!(build.index.is_none());
            assert!(build.other.is_empty());
            assert!(!build.declaration);
            assert!(!build.no_minify);
            assert!(!build.no_sourcemap);
            assert!(!build.fix_imports);
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_build_args_comma_separated_formats() {
        let args = Cli::try_parse_from([
            "triform", "build", "--format", "esm,cjs", "--format", "browser",
        ])
        .unwrap();

        if let Command::Build(build) = args.command {
            assert_eq!(
                build.format,
                Some(vec![FormatArg::Esm, FormatArg::Cjs, FormatArg::Browser])
            );
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_build_args_repeated_other() {
        let args = Cli::try_parse_from([
            "triform",
            "build",
            "--other",
            "src/a.ts:1",
            "--other",
            "src/b.ts:noexport",
        ])
        .unwrap();

        if let Command::Build(build) = args.command {
            assert_eq!(build.other.len(), 2);
            assert_eq!(build.other[0].lines, Some(1));
            assert!(build.other[1].remove_export);
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_compile_args_require_format_and_out_dir() {
        assert!(Cli::try_parse_from(["triform", "compile", "src/index.ts"]).is_err());
        assert!(Cli::try_parse_from(["triform", "compile", "--format", "esm", "-d", "out"]).is_err());

        let args = Cli::try_parse_from([
            "triform", "compile", "src/a.ts", "src/b.ts", "--format", "cjs", "--out-dir", "out",
        ])
        .unwrap();
        if let Command::Compile(compile) = args.command {
            assert_eq!(compile.entries.len(), 2);
            assert_eq!(compile.format, FormatArg::Cjs);
            assert_eq!(compile.out_dir, PathBuf::from("out"));
            assert!(!compile.sourcemap);
        } else {
            panic!("Expected Compile command");
        }
    }

    #[test]
    fn test_merge_args() {
        let args = Cli::try_parse_from(["triform", "merge", "--index", "src/index.ts"]).unwrap();

        if let Command::Merge(merge) = args.command {
            assert_eq!(merge.index, PathBuf::from("src/index.ts"));
            assert!(merge.out.is_none());
        } else {
            panic!("Expected Merge command");
        }
    }
}
