//! Traversal state shared by the Java/Python/Go translators.
//!
//! The dispatcher passes this by `&mut` down the recursive descent and
//! restores the previous `current_context`/scope on the way back out —
//! there is no shared mutable state outside of one worker's own stack.

use crate::shared::{LanguageFlag, NodeKind, SourceRange};
use std::path::PathBuf;
use tree_sitter::Node as TsNode;

/// The nearest enclosing declaration during traversal — the source of
/// call/invocation edges (GLOSSARY "Current context"). Python's dotted FQN
/// is built directly from `name` (each nested def/class prefixes its own
/// name onto the enclosing one before overwriting `current_context`), so
/// there is no separate scope stack to maintain here.
#[derive(Debug, Clone)]
pub struct ContextFrame {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
}

pub struct TranslationContext<'a> {
    pub source: &'a str,
    pub file: PathBuf,
    pub language_flag: LanguageFlag,
    pub current_context: Option<ContextFrame>,
}

impl<'a> TranslationContext<'a> {
    pub fn new(source: &'a str, file: impl Into<PathBuf>, language_flag: LanguageFlag) -> Self {
        Self {
            source,
            file: file.into(),
            language_flag,
            current_context: None,
        }
    }

    pub fn node_text(&self, node: &TsNode) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    pub fn source_range(&self, node: &TsNode) -> SourceRange {
        SourceRange::new(
            self.file.clone(),
            node.start_byte() as u32,
            node.end_byte() as u32,
        )
    }

    pub fn line_number(&self, node: &TsNode) -> u32 {
        node.start_position().row as u32 + 1
    }

    pub fn file_str(&self) -> String {
        self.file.to_string_lossy().into_owned()
    }
}
