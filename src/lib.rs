//! A multi-language static code graph: recursive-descent translators turn
//! Java, Python, Go, Dockerfile, and docker-compose sources into a single
//! content-addressed `Graph` of declarations, statements, expressions, and
//! call edges.

pub mod config;
pub mod parsing;
pub mod pipeline;
pub mod shared;
pub mod translators;

pub use config::IngestConfig;
pub use pipeline::{initialize, ProgressCallback, StartCallback};
pub use shared::{
    CallDetails, ClassDetails, CodegraphError, Edge, FunctionDetails, Graph, Javadoc, JavadocTag,
    LanguageFlag, Modifier, Node, NodeDetails, NodeKind, Result, Scope, SourceRange,
    StatementPayload, VariableDetails,
};
pub use translators::{
    translate_compose, translate_dockerfile, translate_go, translate_java, translate_python,
};
