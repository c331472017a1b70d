//! Edge model. An edge denotes caller→callee containment within a file —
//! there is a single edge kind, not a richer `Defines`/`Calls`/`Inherits`
//! enumeration.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
