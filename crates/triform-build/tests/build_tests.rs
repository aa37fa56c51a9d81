mod helpers;

use helpers::{Project, greet_project};
use triform_build::{BuildOptions, Error, Format, IndexFile, OtherFile};

fn options(project: &Project) -> BuildOptions {
    BuildOptions::new(IndexFile::new(project.join("src/index.ts"))).cwd(project.path())
}

#[tokio::test]
async fn cjs_build_yields_one_file_and_map() {
    let project = greet_project(None);

    let report = options(&project)
        .format(Format::Cjs)
        .cjs_dir(project.join("dist/cjs"))
        .build()
        .await
        .expect("build");

    assert_eq!(project.list("dist/cjs"), vec!["index.js", "index.js.map"]);
    let code = project.read("dist/cjs/index.js");
    assert!(code.contains("greet"));
    assert!(code.ends_with("//# sourceMappingURL=index.js.map"));

    let cjs = report.get(Format::Cjs).expect("cjs report");
    assert_eq!(cjs.files.len(), 2);
    assert!(report.warnings.is_empty());
    assert!(project.temp_dirs().is_empty(), "temp dir left behind");
}

#[tokio::test]
async fn formats_sharing_a_dir_keep_each_others_output() {
    let project = greet_project(None);
    project.write("dist/stale.js", "old");

    let report = options(&project)
        .formats([Format::Esm, Format::Cjs])
        .esm_dir(project.join("dist"))
        .cjs_dir(project.join("dist"))
        .build()
        .await
        .expect("build");

    assert_eq!(report.formats.len(), 2);
    assert_eq!(
        project.list("dist"),
        vec!["index.js", "index.js.map", "index.mjs", "index.mjs.map"]
    );
}

#[tokio::test]
async fn missing_output_dir_skips_format_with_warning() {
    let project = greet_project(None);

    let report = options(&project)
        .formats([Format::Esm, Format::Cjs])
        .esm_dir(project.join("dist"))
        .declaration(true)
        .build()
        .await
        .expect("build");

    assert_eq!(report.formats.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("cjs"));

    let files = project.list("dist");
    let js: Vec<_> = files.iter().filter(|f| !f.contains(".d.") && !f.ends_with(".map")).collect();
    assert_eq!(js, vec!["index.mjs"]);
    assert!(files.contains(&"index.d.mts".to_string()), "files: {:?}", files);
}

#[tokio::test]
async fn browser_build_strips_exports() {
    let project = greet_project(Some("module"));

    options(&project)
        .format(Format::Browser)
        .browser_dir(project.join("dist/browser"))
        .declaration(true)
        .source_map(false)
        .build()
        .await
        .expect("build");

    assert_eq!(project.list("dist/browser"), vec!["index.global.js"]);
    let code = project.read("dist/browser/index.global.js");
    assert!(!code.contains("export"), "browser output kept exports:\n{}", code);
    assert!(code.contains("greet"));
}

#[tokio::test]
async fn merges_other_files_before_index() {
    let project = Project::new(Some("module"));
    project.write(
        "src/colors.ts",
        "export const red = (text: string): string => `\\x1b[31m${text}\\x1b[0m`;\n",
    );
    project.write(
        "src/index.ts",
        "import { red } from \"./colors\";\nexport const warn = (text: string): string => red(text);\n",
    );

    BuildOptions::new(IndexFile::new(project.join("src/index.ts")).lines(1))
        .cwd(project.path())
        .other(OtherFile::new(project.join("src/colors.ts")).remove_export(true))
        .format(Format::Esm)
        .esm_dir(project.join("dist"))
        .minify(false)
        .build()
        .await
        .expect("build");

    let code = project.read("dist/index.js");
    assert!(code.contains("warn"));
    assert!(!code.contains("./colors"), "merged unit should not import siblings:\n{}", code);
}

#[tokio::test]
async fn unminified_build_copies_compiler_output() {
    let project = greet_project(Some("module"));

    options(&project)
        .format(Format::Esm)
        .esm_dir(project.join("dist"))
        .minify(false)
        .source_map(false)
        .build()
        .await
        .expect("build");

    assert_eq!(project.list("dist"), vec!["index.js"]);
    let code = project.read("dist/index.js");
    assert!(!code.contains("sourceMappingURL"));
    assert!(code.contains("Hello, "));
}

#[tokio::test]
async fn rebuild_cleans_stale_files_and_is_deterministic() {
    let project = greet_project(None);
    project.write("dist/stale.js", "old");

    let build = options(&project)
        .format(Format::Esm)
        .esm_dir(project.join("dist"));

    build.build().await.expect("first build");
    assert!(!project.join("dist/stale.js").exists());
    let first = project.read("dist/index.mjs");

    build.build().await.expect("second build");
    let second = project.read("dist/index.mjs");

    assert_eq!(first, second);
}

#[tokio::test]
async fn failed_build_removes_created_dirs() {
    let project = Project::new(None);
    project.write("src/index.ts", "export const = ;");

    let err = options(&project)
        .format(Format::Cjs)
        .cjs_dir(project.join("dist/cjs"))
        .build()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Compile(_)), "unexpected error: {err:?}");
    assert!(!project.join("dist/cjs").exists());
    assert!(project.temp_dirs().is_empty(), "temp dir left behind");
}

#[tokio::test]
async fn failed_build_keeps_existing_dirs() {
    let project = Project::new(None);
    project.write("src/index.ts", "export const = ;");
    project.write("dist/keep/nested/file.txt", "x");

    options(&project)
        .format(Format::Esm)
        .esm_dir(project.join("dist/keep"))
        .build()
        .await
        .unwrap_err();

    assert!(project.join("dist/keep/nested/file.txt").exists());
}

#[tokio::test]
async fn missing_index_file_is_read_error() {
    let project = Project::new(None);

    let err = options(&project)
        .format(Format::Esm)
        .esm_dir(project.join("dist"))
        .build()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Read { .. }));
    assert!(project.temp_dirs().is_empty());
}
