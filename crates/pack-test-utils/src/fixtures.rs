//! Canned project documents.

/// A single-app project with PEP 621 metadata and per-platform overrides.
pub const HELLO_WORLD: &str = r#"
[project]
name = "hello-world"
version = "0.0.1"
description = "A friendly app"
requires-python = ">=3.10"
authors = [{ name = "Jane Developer", email = "jane@example.com" }]
dependencies = ["requests"]

[project.urls]
Homepage = "https://example.com/hello"

[project.optional-dependencies]
test = ["pytest"]

[tool.pack]
project_name = "Hello World"
bundle = "com.example"

[tool.pack.app.hello-world]
formal_name = "Hello World"
sources = ["src/hello_world"]
requires = ["rich"]

[tool.pack.app.hello-world.macOS]
requires = ["rich", "toga-cocoa"]

[tool.pack.app.hello-world.macOS.Xcode]
universal_build = false

[tool.pack.app.hello-world.linux]
requires = ["rich", "toga-gtk"]

[tool.pack.app.hello-world.document_type.hello]
icon = "icons/hello-doc"
description = "Hello document"
url = "https://example.com/hello"
extension = "hello"
mime_type = "text/plain"
"#;

/// A path index with every role populated.
pub const FULL_PATH_INDEX: &str = r#"
[paths]
app_path = "src/app"
app_packages_path = "src/app_packages"
support_path = "support"
support_revision = 3
cleanup_paths = ["support/**/tests"]
icon = { 16 = "icons/16.png", 512 = "icons/512.png" }
splash = "splash.png"

[paths.document_type_icon]
hello = "hello-doc.png"
"#;

/// A path index with only the app code location.
pub const MINIMAL_PATH_INDEX: &str = r#"
[paths]
app_path = "src/app"
"#;
