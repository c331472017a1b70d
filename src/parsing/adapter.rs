//! Thin wrapper over the external incremental-parsing library.
//!
//! Each call to `parse` allocates its own `tree_sitter::Parser` — the
//! grammar handle is not thread-safe to share, so every worker gets its
//! own, never stashed in shared state.

use tree_sitter::{Language as TsLanguage, Tree};

/// The three languages the core translators understand (Dockerfile and
/// Compose are routed directly to their own translators, bypassing
/// tree-sitter entirely).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Java,
    Python,
    Go,
}

impl Language {
    fn ts_language(self) -> TsLanguage {
        match self {
            Language::Java => tree_sitter_java::language(),
            Language::Python => tree_sitter_python::language(),
            Language::Go => tree_sitter_go::language(),
        }
    }
}

/// Parses `source_code` with the grammar for `language`. Returns `None`
/// if the parser could not be constructed or produced no tree — callers
/// treat that as a per-file parse error.
pub fn parse(source_code: &str, language: Language) -> Option<Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&language.ts_language()).ok()?;
    parser.parse(source_code, None)
}

/// Extension-only test, case-insensitive.
pub fn is_java_source(filename: &str) -> bool {
    has_extension(filename, "java")
}

/// Extension-only test, case-insensitive.
pub fn is_python_source(filename: &str) -> bool {
    has_extension(filename, "py")
}

fn has_extension(filename: &str, ext: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Every kind of file the ingest pipeline recognizes and routes somewhere.
/// Unsupported extensions classify to `None` at the call site and are
/// silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Java,
    Python,
    Go,
    Dockerfile,
    Compose,
}

/// Classifies a path by basename and extension. Basename checks are
/// case-insensitive; extension checks for Compose require `.yml`/`.yaml`.
pub fn classify(path: &std::path::Path) -> Option<FileKind> {
    let basename = path.file_name()?.to_str()?.to_ascii_lowercase();

    if basename.starts_with("dockerfile") {
        return Some(FileKind::Dockerfile);
    }

    let is_yaml_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yml") || e.eq_ignore_ascii_case("yaml"))
        .unwrap_or(false);
    if basename.contains("docker-compose") && is_yaml_ext {
        return Some(FileKind::Compose);
    }

    let filename = path.file_name()?.to_str()?;
    if is_java_source(filename) {
        return Some(FileKind::Java);
    }
    if is_python_source(filename) {
        return Some(FileKind::Python);
    }
    if path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("go"))
        .unwrap_or(false)
    {
        return Some(FileKind::Go);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn classifies_dockerfile_by_prefix() {
        assert_eq!(
            classify(Path::new("Dockerfile")),
            Some(FileKind::Dockerfile)
        );
        assert_eq!(
            classify(Path::new("dockerfile.dev")),
            Some(FileKind::Dockerfile)
        );
    }

    #[test]
    fn classifies_compose_requires_yaml_extension() {
        assert_eq!(
            classify(Path::new("docker-compose.yml")),
            Some(FileKind::Compose)
        );
        assert_eq!(
            classify(Path::new("docker-compose.prod.yaml")),
            Some(FileKind::Compose)
        );
        assert_eq!(classify(Path::new("docker-compose.json")), None);
    }

    #[test]
    fn classifies_by_extension_case_insensitive() {
        assert_eq!(classify(Path::new("Foo.JAVA")), Some(FileKind::Java));
        assert_eq!(classify(Path::new("foo.py")), Some(FileKind::Python));
        assert_eq!(classify(Path::new("main.go")), Some(FileKind::Go));
    }

    #[test]
    fn unsupported_extension_is_ignored() {
        assert_eq!(classify(Path::new("README.md")), None);
    }

    #[test]
    fn parse_java_smoke_test() {
        let tree = parse("class A {}", Language::Java);
        assert!(tree.is_some());
    }
}
