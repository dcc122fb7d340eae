//! End-to-end tests for the configuration pipeline
//!
//! Exercises the complete flow a build command goes through: locate the
//! project -> resolve a target -> build the typed app config -> read the
//! bundle's path index for the rest of the build.

use pack_config::{ConfigValue, LicenseSpec, PlatformRegistry};
use pack_core::{Project, ResolvedProject};
use pack_test_utils::fixtures::{FULL_PATH_INDEX, HELLO_WORLD};
use pack_test_utils::project::TestProject;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// A two-app project with shared metadata and platform-scoped apps.
const SUITE: &str = r#"
[project]
version = "2.1.0"
description = "A suite of tools"
license-files = ["LICENSE*", "COPYING"]
authors = [
    { name = "First Author", email = "first@example.com" },
    { name = "Second Author", email = "second@example.com" },
]
dependencies = ["attrs"]

[tool.pack]
bundle = "org.example"
requires = ["shared"]

[tool.pack.app.editor]
sources = ["src/editor"]
requires = ["editor-core"]

[tool.pack.app.editor.document_type.note]
icon = "icons/note"
description = "Note"
url = "https://example.org/note"
extension = "note"

[tool.pack.app.editor.document_type.picture]
icon = "icons/picture"
description = "Picture"
url = "https://example.org/picture"
extension = "png"
mime_type = "image/png"

[tool.pack.app.viewer.macOS]
sources = ["src/viewer"]
description = "Mac-only viewer"

[tool.pack.app.viewer.macOS.Xcode]
version = "2.1.0.dev1"
"#;

fn suite() -> TestProject {
    let project = TestProject::new();
    project.write_pyproject(SUITE);
    project.write_file("LICENSE.txt", "license");
    project.write_file("LICENSE.md", "license");
    project
}

fn resolve(project: &TestProject, platform: &str, format: &str) -> ResolvedProject {
    Project::load(project.root())
        .unwrap()
        .resolve(platform, format)
        .unwrap()
}

#[test]
fn every_builtin_target_resolves() {
    let fixture = suite();
    let project = Project::load(fixture.root()).unwrap();
    let registry = PlatformRegistry::with_builtins();

    for platform in registry.platforms() {
        for format in registry.formats(platform) {
            let resolved = project.resolve(platform, format).unwrap();
            assert!(resolved.apps.contains_key("editor"), "{platform} {format}");
            assert_eq!(
                resolved.apps.contains_key("viewer"),
                platform == "macOS",
                "{platform} {format}"
            );
        }
    }
}

#[rstest]
#[case("macOS", "app")]
#[case("macOS", "Xcode")]
#[case("linux", "flatpak")]
fn resolution_is_deterministic(#[case] platform: &str, #[case] format: &str) {
    let fixture = suite();
    let first = serde_json::to_string(&resolve(&fixture, platform, format)).unwrap();
    let second = serde_json::to_string(&resolve(&fixture, platform, format)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn shared_metadata_reaches_every_app() {
    let fixture = suite();
    let resolved = resolve(&fixture, "macOS", "Xcode");

    let editor = &resolved.apps["editor"];
    assert_eq!(
        editor.get("requires"),
        Some(&ConfigValue::string_list(["attrs", "editor-core"]))
    );
    assert_eq!(editor.get("author"), Some(&ConfigValue::from("First Author")));
    assert_eq!(
        editor.get("author_email"),
        Some(&ConfigValue::from("first@example.com"))
    );

    // Two files match the first pattern; the lexicographically first wins.
    let license = LicenseSpec::from_value(editor.get("license").unwrap()).unwrap();
    assert_eq!(license, LicenseSpec::File("LICENSE.md".to_string()));

    let viewer = &resolved.apps["viewer"];
    assert_eq!(viewer.get("requires"), Some(&ConfigValue::string_list(["attrs", "shared"])));
    assert_eq!(viewer.get("version"), Some(&ConfigValue::from("2.1.0.dev1")));
    assert_eq!(viewer.get("description"), Some(&ConfigValue::from("Mac-only viewer")));
}

#[test]
fn document_types_on_apple_platforms() {
    let fixture = suite();
    let project = Project::load(fixture.root()).unwrap();
    let editor = project.app_config("editor", "macOS", "app").unwrap();

    let note = editor.document_types["note"]["macOS"].as_table().unwrap();
    assert_eq!(note["is_core_type"], ConfigValue::Boolean(false));
    assert_eq!(note["LSHandlerRank"], ConfigValue::from("Owner"));

    let picture = editor.document_types["picture"]["macOS"].as_table().unwrap();
    assert_eq!(picture["is_core_type"], ConfigValue::Boolean(true));
    assert_eq!(
        picture["LSItemContentTypes"],
        ConfigValue::string_list(["public.png"])
    );
}

#[test]
fn license_fallback_pattern() {
    let fixture = TestProject::new();
    fixture.write_pyproject(SUITE);
    fixture.write_file("COPYING", "license");

    let resolved = resolve(&fixture, "linux", "system");
    let license = LicenseSpec::from_value(resolved.apps["editor"].get("license").unwrap()).unwrap();
    assert_eq!(license, LicenseSpec::File("COPYING".to_string()));
}

#[test]
fn missing_license_files_fail_the_whole_resolution() {
    let fixture = TestProject::new();
    fixture.write_pyproject(SUITE);

    let err = Project::load(fixture.root())
        .unwrap()
        .resolve("linux", "system")
        .unwrap_err();
    assert!(
        matches!(
            err,
            pack_core::Error::Config(pack_config::Error::NoLicenseFiles { .. })
        ),
        "{err:?}"
    );
}

#[test]
fn build_lifecycle_with_cleanup() {
    let fixture = TestProject::new();
    fixture.write_pyproject(HELLO_WORLD);
    let project = Project::discover(fixture.root()).unwrap();

    let (platform, format) = project.target("linux", None).unwrap();
    let app = project.app_config("hello-world", &platform, &format).unwrap();
    assert_eq!(app.requires, vec!["requests", "rich", "toga-gtk"]);

    // The create step writes the index; later steps read it through the cache.
    fixture.write_path_index(&app.name, &platform, &format, FULL_PATH_INDEX);
    let cache = project.path_index_cache(&platform, &format);
    let before = cache.get(&app.name).unwrap();

    // Cleanup removes the whole bundle before the final lookups.
    std::fs::remove_dir_all(fixture.root().join("build")).unwrap();
    let after = cache.get(&app.name).unwrap();

    assert_eq!(before.app_path(), after.app_path());
    assert_eq!(after.support_revision().as_deref(), Some("3"));
    assert_eq!(after.icon_targets().len(), 2);

    // A fresh cache sees the deletion.
    let fresh = project.path_index_cache(&platform, &format);
    assert!(matches!(
        fresh.get(&app.name),
        Err(pack_core::Error::MissingPathIndex { .. })
    ));
}
