mod helpers;

use helpers::{Project, greet_project};
use triform_build::{
    CompileOptions, CompilerOverrides, Error, Format, MemorySink, PackageType,
};

#[tokio::test]
async fn cjs_in_module_package_uses_cjs_extension() {
    let project = greet_project(Some("module"));
    let package_type = PackageType::detect(project.path()).unwrap();
    assert_eq!(package_type, PackageType::Module);

    let written = CompileOptions::new(project.join("src/index.ts"), Format::Cjs, project.join("out"))
        .package_type(package_type)
        .compile()
        .await
        .expect("compile");

    assert_eq!(written, vec![project.join("out/index.cjs")]);
    let code = project.read("out/index.cjs");
    assert!(code.contains("greet"), "unexpected output:\n{}", code);
    assert!(code.contains("exports"), "expected CommonJS exports:\n{}", code);
}

#[tokio::test]
async fn esm_in_commonjs_package_uses_mjs_and_dmts() {
    let project = greet_project(None);

    let written = CompileOptions::new(project.join("src/index.ts"), Format::Esm, project.join("out"))
        .package_type(PackageType::detect(project.path()).unwrap())
        .declaration(true)
        .compile()
        .await
        .expect("compile");

    assert_eq!(project.list("out"), vec!["index.d.mts", "index.mjs"]);
    assert_eq!(written.len(), 2);

    let dts = project.read("out/index.d.mts");
    assert!(dts.contains("greet(name: string): string"), "dts:\n{}", dts);
    let code = project.read("out/index.mjs");
    assert!(code.contains("export"), "expected ESM exports:\n{}", code);
}

#[tokio::test]
async fn browser_never_emits_declarations() {
    let project = greet_project(None);

    CompileOptions::new(project.join("src/index.ts"), Format::Browser, project.join("out"))
        .declaration(true)
        .compile()
        .await
        .expect("compile");

    assert_eq!(project.list("out"), vec!["index.global.js"]);
}

#[tokio::test]
async fn declarations_go_to_declaration_dir() {
    let project = greet_project(Some("module"));

    CompileOptions::new(project.join("src/index.ts"), Format::Esm, project.join("out"))
        .package_type(PackageType::Module)
        .declaration(true)
        .declaration_dir(project.join("types"))
        .compile()
        .await
        .expect("compile");

    assert_eq!(project.list("out"), vec!["index.js"]);
    assert_eq!(project.list("types"), vec!["index.d.ts"]);
}

#[tokio::test]
async fn source_maps_follow_renamed_output() {
    let project = greet_project(None);

    CompileOptions::new(project.join("src/index.ts"), Format::Esm, project.join("out"))
        .package_type(PackageType::CommonJs)
        .source_map(true)
        .compile()
        .await
        .expect("compile");

    assert_eq!(project.list("out"), vec!["index.mjs", "index.mjs.map"]);
}

#[tokio::test]
async fn extension_hook_replaces_default_rewriting() {
    fn suffix(name: &str) -> String {
        format!("{}.txt", name)
    }
    let project = greet_project(None);

    CompileOptions::new(project.join("src/index.ts"), Format::Esm, project.join("out"))
        .extension_replace(suffix)
        .compile()
        .await
        .expect("compile");

    assert_eq!(project.list("out"), vec!["index.js.txt"]);
}

#[tokio::test]
async fn bare_imports_stay_external() {
    let project = Project::new(Some("module"));
    project.write(
        "src/index.ts",
        r#"
import { join } from "node:path";
import lodash from "lodash";

export const joined = (): string => join("a", lodash.identity("b"));
"#,
    );

    let mut sink = MemorySink::new();
    CompileOptions::new(project.join("src/index.ts"), Format::Esm, project.join("out"))
        .package_type(PackageType::Module)
        .compile_into(&mut sink)
        .await
        .expect("compile");

    let code = sink.get(project.join("out/index.js")).expect("index.js emitted");
    assert!(code.contains("lodash"), "lodash should stay an import:\n{}", code);
    assert!(!project.join("out").exists(), "compile_into must not write");
}

#[tokio::test]
async fn relative_imports_gain_js_suffix() {
    let project = Project::new(Some("module"));
    project.write(
        "src/index.ts",
        r#"
import { helper } from "./x";

export const run = (): string => helper();
"#,
    );

    let mut sink = MemorySink::new();
    CompileOptions::new(project.join("src/index.ts"), Format::Esm, project.join("out"))
        .package_type(PackageType::Module)
        .compiler_options(CompilerOverrides::default().external(["./x"]))
        .fix_relative_imports(true)
        .compile_into(&mut sink)
        .await
        .expect("compile");

    let code = sink.get(project.join("out/index.js")).expect("index.js emitted");
    assert!(code.contains("\"./x.js\""), "specifier not rewritten:\n{}", code);
    assert!(!code.contains("\"./x\""), "bare relative specifier left:\n{}", code);
}

#[tokio::test]
async fn compile_error_writes_nothing() {
    let project = Project::new(None);
    project.write("src/index.ts", "export const = ;");

    let err = CompileOptions::new(project.join("src/index.ts"), Format::Cjs, project.join("out"))
        .compile()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Compile(_)), "unexpected error: {err:?}");
    assert!(!project.join("out").exists());
}

#[tokio::test]
async fn relative_entries_resolve_against_cwd_override() {
    let project = greet_project(Some("module"));

    CompileOptions::new("src/index.ts", Format::Esm, project.join("out"))
        .package_type(PackageType::Module)
        .declaration(true)
        .compiler_options(CompilerOverrides::default().cwd(project.path()))
        .compile()
        .await
        .expect("compile");

    assert_eq!(project.list("out"), vec!["index.d.ts", "index.js"]);
}
