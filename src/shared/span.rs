//! Source location types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A byte range into a specific file's source buffer, used for lazy
/// text read-back instead of embedding the matched text directly on
/// every node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    pub file: PathBuf,
    pub start_byte: u32,
    pub end_byte: u32,
}

impl SourceRange {
    pub fn new(file: impl Into<PathBuf>, start_byte: u32, end_byte: u32) -> Self {
        Self {
            file: file.into(),
            start_byte,
            end_byte,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.end_byte > self.start_byte
    }

    /// Reads `file[start_byte..end_byte]`. Never fails — an unreadable
    /// file or an out-of-bounds range both yield `""`.
    pub fn read_text(&self) -> String {
        read_text_impl(&self.file, self.start_byte, self.end_byte)
    }
}

fn read_text_impl(file: &Path, start: u32, end: u32) -> String {
    let Ok(bytes) = std::fs::read(file) else {
        return String::new();
    };
    let (start, end) = (start as usize, end as usize);
    if start >= end || end > bytes.len() {
        return String::new();
    }
    String::from_utf8_lossy(&bytes[start..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_text_out_of_bounds_returns_empty() {
        let range = SourceRange::new("/does/not/exist.py", 0, 10);
        assert_eq!(range.read_text(), "");
    }

    #[test]
    fn well_formed_requires_end_greater_than_start() {
        assert!(SourceRange::new("f", 0, 1).is_well_formed());
        assert!(!SourceRange::new("f", 5, 5).is_well_formed());
        assert!(!SourceRange::new("f", 5, 3).is_well_formed());
    }
}
