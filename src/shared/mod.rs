//! Shared domain types: the graph model, the id service, and the unified
//! error type.

pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod node;
pub mod span;

pub use edge::Edge;
pub use error::{CodegraphError, Result};
pub use graph::Graph;
pub use id::{derive_node_id, hash_id, node_id};
pub use node::{
    CallDetails, ClassDetails, FunctionDetails, Javadoc, JavadocTag, LanguageFlag, Modifier, Node,
    NodeDetails, NodeKind, Scope, StatementPayload, VariableDetails,
};
pub use span::SourceRange;
