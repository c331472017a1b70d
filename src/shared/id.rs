//! Content-addressed identifiers.
//!
//! Workers run in parallel and must produce globally unique but
//! deterministic node ids without any cross-worker coordination; content
//! addressing gets both for free.

use super::node::NodeKind;
use sha2::{Digest, Sha256};

const FIELD_SEPARATOR: char = '\u{1f}'; // ASCII unit separator

/// Stable 256-bit cryptographic hash of `text`, hex-encoded to 64 chars.
///
/// Same input, same output, across processes and platforms.
pub fn hash_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Derives a node id from its canonical identifying attributes.
///
/// The line number is folded into the digest so that two same-named
/// constructs in the same file at different lines never collide.
pub fn derive_node_id(name: &str, arguments: &[String], file: &str, line: u32) -> String {
    let joined_args = arguments.join(&FIELD_SEPARATOR.to_string());
    let canonical = format!(
        "{name}{sep}{joined_args}{sep}{file}{sep}{line}",
        sep = FIELD_SEPARATOR
    );
    hash_id(&canonical)
}

/// Convenience wrapper around `derive_node_id` that folds the node `kind`
/// into the name ("name-prefixed-kind") so that two different kinds of
/// construct sharing a name/file/line (e.g. the generic and refined
/// `binary_expression` nodes emitted for one operator) never collide.
pub fn node_id(kind: NodeKind, name: &str, arguments: &[String], file: &str, line: u32) -> String {
    let prefixed = format!("{}:{}", kind.as_str(), name);
    derive_node_id(&prefixed, arguments, file, line)
}
