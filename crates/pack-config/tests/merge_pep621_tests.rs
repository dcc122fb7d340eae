//! Tests for merging PEP 621 project metadata into app configuration

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use pack_config::value::table_to_map;
use pack_config::{ConfigMap, ConfigValue, Error, ProjectMetadata, merge_pep621_config};
use tempfile::TempDir;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

fn map(content: &str) -> ConfigMap {
    table_to_map(toml::from_str(content).unwrap())
}

fn merge_in(dir: &Path, config: &str, project: &str) -> pack_config::Result<ConfigMap> {
    let mut config = map(config);
    merge_pep621_config(&mut config, &map(project), dir)?;
    Ok(config)
}

fn merge(config: &str, project: &str) -> ConfigMap {
    merge_in(Path::new("."), config, project).unwrap()
}

fn license_file(path: &str) -> ConfigValue {
    ConfigValue::Table(map(&format!("file = {path:?}")))
}

/// A project directory containing the given (empty) files.
fn project_with(files: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for file in files {
        let path = temp.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "license text").unwrap();
    }
    temp
}

/// Collects the level and message of every event emitted while installed.
#[derive(Clone, Default)]
struct EventCollector {
    events: Arc<Mutex<Vec<(tracing::Level, String)>>>,
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for EventCollector {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

impl EventCollector {
    fn warnings(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == tracing::Level::WARN)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

mod scalars {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_project_table_changes_nothing() {
        assert_eq!(merge("name = \"demo\"", ""), map("name = \"demo\""));
    }

    #[test]
    fn missing_values_are_copied() {
        let config = merge(
            "",
            r#"
description = "A demo"
version = "1.2.3"
requires-python = ">=3.10"

[urls]
Homepage = "https://example.com"
Documentation = "https://docs.example.com"
"#,
        );

        assert_eq!(
            config,
            map(r#"
description = "A demo"
version = "1.2.3"
requires_python = ">=3.10"
url = "https://example.com"
"#)
        );
    }

    #[test]
    fn tool_values_win() {
        let config = merge(
            r#"
description = "Tool description"
version = "2.0"
url = "https://tool.example.com"
"#,
            r#"
description = "Project description"
version = "1.0"
urls = { Homepage = "https://project.example.com" }
"#,
        );

        assert_eq!(config["description"], ConfigValue::from("Tool description"));
        assert_eq!(config["version"], ConfigValue::from("2.0"));
        assert_eq!(config["url"], ConfigValue::from("https://tool.example.com"));
    }
}

mod license {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn license_text_table_is_copied_whole() {
        let config = merge("", "license = { text = \"Some license\" }");
        assert_eq!(config["license"], ConfigValue::Table(map("text = \"Some license\"")));
    }

    #[test]
    fn existing_license_is_kept() {
        let config = merge(
            "license = { file = \"MY_LICENSE\" }",
            "license = { text = \"Some license\" }",
        );
        assert_eq!(config["license"], license_file("MY_LICENSE"));
    }

    #[test]
    fn first_pattern_with_a_match_wins() {
        let temp = project_with(&["LICENSE"]);
        let config = merge_in(
            temp.path(),
            "",
            "license-files = [\"LICENSE\", \"NON_EXISTING\"]",
        )
        .unwrap();
        assert_eq!(config["license"], license_file("LICENSE"));
    }

    #[test]
    fn patterns_without_matches_are_skipped() {
        let temp = project_with(&["LICENSE"]);
        let config = merge_in(
            temp.path(),
            "",
            "license-files = [\"NON_EXISTING\", \"LICENSE\"]",
        )
        .unwrap();
        assert_eq!(config["license"], license_file("LICENSE"));
    }

    #[test]
    fn ambiguous_pattern_picks_one_file() {
        let temp = project_with(&["LICENSE", "LICENCE"]);
        let config = merge_in(temp.path(), "", "license-files = [\"LICEN[SC]E\"]").unwrap();
        // Lexicographic order decides between the matches.
        assert_eq!(config["license"], license_file("LICENCE"));
    }

    #[test]
    fn ambiguous_pattern_emits_a_warning() {
        let temp = project_with(&["LICENSE", "LICENCE"]);
        let collector = EventCollector::default();
        let subscriber = tracing_subscriber::registry().with(collector.clone());

        let config = tracing::subscriber::with_default(subscriber, || {
            merge_in(temp.path(), "", "license-files = [\"LICEN[SC]E\"]").unwrap()
        });

        assert_eq!(config["license"], license_file("LICENCE"));
        let warnings = collector.warnings();
        assert_eq!(warnings.len(), 1, "{warnings:?}");
        assert!(warnings[0].contains("matched multiple files"), "{warnings:?}");
    }

    #[test]
    fn unambiguous_pattern_does_not_warn() {
        let temp = project_with(&["LICENSE"]);
        let collector = EventCollector::default();
        let subscriber = tracing_subscriber::registry().with(collector.clone());

        tracing::subscriber::with_default(subscriber, || {
            merge_in(temp.path(), "", "license-files = [\"LICENSE\"]").unwrap()
        });

        assert!(collector.warnings().is_empty());
    }

    #[test]
    fn license_files_are_resolved_once_for_every_app() {
        let temp = project_with(&["LICENSE"]);
        let project = map("license-files = [\"LICENSE\"]");
        let metadata = ProjectMetadata::new(&project, temp.path()).unwrap();

        // Later merges must not go back to the filesystem.
        fs::remove_file(temp.path().join("LICENSE")).unwrap();

        for tool_config in ["", "formal_name = \"Other\""] {
            let mut config = map(tool_config);
            metadata.merge_into(&mut config).unwrap();
            assert_eq!(config["license"], license_file("LICENSE"));
        }
    }

    #[test]
    fn nested_license_file_is_relative() {
        let temp = project_with(&["licenses/LICENSE.md"]);
        let config = merge_in(temp.path(), "", "license-files = [\"licenses/*.md\"]").unwrap();
        assert_eq!(config["license"], license_file("licenses/LICENSE.md"));
    }

    #[test]
    fn no_matching_file_is_an_error() {
        let temp = project_with(&[]);
        let err = merge_in(
            temp.path(),
            "",
            "license-files = [\"LICENSE\", \"COPYING*\"]",
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoLicenseFiles { .. }), "{err:?}");
        assert!(err.to_string().contains("\"COPYING*\""));
    }

    #[test]
    fn license_table_and_license_files_conflict() {
        let temp = project_with(&["LICENSE"]);
        let err = merge_in(
            temp.path(),
            "",
            r#"
license = { file = "x" }
license-files = ["LICENSE"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::LicenseConflict), "{err:?}");
    }

    #[test]
    fn spdx_expression_with_license_files_is_allowed() {
        let temp = project_with(&["LICENSE"]);
        let config = merge_in(
            temp.path(),
            "",
            r#"
license = "MIT"
license-files = ["LICENSE"]
"#,
        )
        .unwrap();
        assert_eq!(config["license"], license_file("LICENSE"));
    }

    #[test]
    fn license_files_do_not_override_tool_license_file() {
        let temp = project_with(&["LICENSE"]);
        let config = merge_in(
            temp.path(),
            "license = { file = \"CUSTOM_LICENSE\" }",
            "license-files = [\"LICENSE\"]",
        )
        .unwrap();
        assert_eq!(config["license"], license_file("CUSTOM_LICENSE"));
    }
}

mod authors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_first_author_is_used() {
        let config = merge(
            "",
            r#"
authors = [
    { name = "A", email = "a@x" },
    { name = "B", email = "b@x" },
]
"#,
        );
        assert_eq!(config, map("author = \"A\"\nauthor_email = \"a@x\""));
    }

    #[test]
    fn name_and_email_are_independent() {
        let config = merge("author = \"Tool Author\"", "authors = [{ email = \"a@x\" }]");
        assert_eq!(config, map("author = \"Tool Author\"\nauthor_email = \"a@x\""));

        let config = merge("author_email = \"tool@x\"", "authors = [{ name = \"A\" }]");
        assert_eq!(config, map("author = \"A\"\nauthor_email = \"tool@x\""));
    }

    #[test]
    fn empty_author_list_is_a_no_op() {
        assert_eq!(merge("", "authors = []"), ConfigMap::new());
    }
}

mod dependencies {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dependencies_are_prepended() {
        let config = merge("requires = [\"r1\"]", "dependencies = [\"d1\"]");
        assert_eq!(config["requires"], ConfigValue::string_list(["d1", "r1"]));
    }

    #[test]
    fn dependencies_without_existing_requires() {
        let config = merge("", "dependencies = [\"d1\", \"d2\"]");
        assert_eq!(config["requires"], ConfigValue::string_list(["d1", "d2"]));
    }

    #[test]
    fn only_test_group_of_optional_dependencies_is_merged() {
        let config = merge(
            "test_requires = [\"pytest-tool\"]",
            r#"
[optional-dependencies]
test = ["pytest"]
docs = ["sphinx"]
"#,
        );
        assert_eq!(
            config["test_requires"],
            ConfigValue::string_list(["pytest", "pytest-tool"])
        );
        assert!(!config.contains_key("requires"));
    }
}
