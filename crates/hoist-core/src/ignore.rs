//! Default ignore-rules generation.
//!
//! The generated file is the universal OS/editor template plus one section
//! per ecosystem detected from marker files in the working directory. An
//! existing ignore file is never overwritten.

use std::path::Path;

use serde::Serialize;

/// Project ecosystems recognized by marker-file detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ecosystem {
    Node,
    Python,
    Rust,
    Go,
    Java,
    CCpp,
}

impl Ecosystem {
    pub fn label(&self) -> &'static str {
        match self {
            Ecosystem::Node => "node",
            Ecosystem::Python => "python",
            Ecosystem::Rust => "rust",
            Ecosystem::Go => "go",
            Ecosystem::Java => "java",
            Ecosystem::CCpp => "c/c++",
        }
    }

    fn section(&self) -> &'static str {
        match self {
            Ecosystem::Node => NODE_SECTION,
            Ecosystem::Python => PYTHON_SECTION,
            Ecosystem::Rust => RUST_SECTION,
            Ecosystem::Go => GO_SECTION,
            Ecosystem::Java => JAVA_SECTION,
            Ecosystem::CCpp => C_CPP_SECTION,
        }
    }
}

/// Detect ecosystems from top-level marker files.
///
/// Multiple markers compose multiple sections; no marker at all yields only
/// the universal template. Detection looks at the directory's top level —
/// marker manifests live at the project root by convention.
pub fn detect_ecosystems(root: &Path) -> Vec<Ecosystem> {
    let mut found = Vec::new();

    let has = |name: &str| root.join(name).is_file();
    let has_ext = |exts: &[&str]| {
        std::fs::read_dir(root)
            .map(|entries| {
                entries.flatten().any(|e| {
                    e.path()
                        .extension()
                        .and_then(|x| x.to_str())
                        .is_some_and(|x| exts.contains(&x))
                })
            })
            .unwrap_or(false)
    };

    if has("package.json") {
        found.push(Ecosystem::Node);
    }
    if has("requirements.txt") || has("pyproject.toml") || has("setup.py") || has_ext(&["py"]) {
        found.push(Ecosystem::Python);
    }
    if has("Cargo.toml") {
        found.push(Ecosystem::Rust);
    }
    if has("go.mod") {
        found.push(Ecosystem::Go);
    }
    if has("pom.xml") || has("build.gradle") || has("build.gradle.kts") || has_ext(&["java"]) {
        found.push(Ecosystem::Java);
    }
    if has_ext(&["c", "cc", "cpp", "h", "hpp"]) {
        found.push(Ecosystem::CCpp);
    }

    found
}

/// Compose the full ignore-rules file content for a directory.
pub fn compose_ignore_rules(root: &Path) -> String {
    let mut content = String::from(UNIVERSAL_SECTION);
    for eco in detect_ecosystems(root) {
        content.push('\n');
        content.push_str(eco.section());
    }
    content
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

const UNIVERSAL_SECTION: &str = "\
# OS / editor
.DS_Store
Thumbs.db
Desktop.ini
*.swp
*.swo
*~
.idea/
.vscode/
";

const NODE_SECTION: &str = "\
# Node
node_modules/
dist/
npm-debug.log*
yarn-error.log
.env
.env.local
";

const PYTHON_SECTION: &str = "\
# Python
__pycache__/
*.py[cod]
.venv/
venv/
*.egg-info/
.pytest_cache/
build/
";

const RUST_SECTION: &str = "\
# Rust
target/
**/*.rs.bk
";

const GO_SECTION: &str = "\
# Go
*.exe
*.test
*.out
vendor/
";

const JAVA_SECTION: &str = "\
# Java
*.class
target/
build/
.gradle/
*.jar
";

const C_CPP_SECTION: &str = "\
# C / C++
*.o
*.obj
*.a
*.so
*.dylib
*.dll
*.out
build/
";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
