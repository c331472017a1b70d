//! Language parser adapter and shared traversal context.

pub mod adapter;
pub mod context;

pub use adapter::{classify, is_java_source, is_python_source, parse, FileKind, Language};
pub use context::{ContextFrame, TranslationContext};
