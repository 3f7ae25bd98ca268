//! Byte-range rewriter.
//!
//! Applies a batch of edits to a source string. Edits are validated up front
//! (bounds, char boundaries, overlaps) and applied back to front so earlier
//! offsets stay valid.
//!
//! ```
//! use eventscan::fix::{ByteRangeRewriter, Edit};
//!
//! let source = "public virtual event Action E;";
//! let mut rewriter = ByteRangeRewriter::new(source);
//! rewriter.add_edit(Edit::delete(7, 15));
//! assert_eq!(rewriter.apply().unwrap(), "public event Action E;");
//! ```

use text_size::TextRange;
use thiserror::Error;

/// A single edit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive).
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
    /// Replacement content.
    pub replacement: String,
}

impl Edit {
    /// Replaces `start_byte..end_byte` with `replacement`.
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
        }
    }

    /// Replaces the text covered by `range`.
    #[must_use]
    pub fn replace(range: TextRange, replacement: impl Into<String>) -> Self {
        Self::new(range.start().into(), range.end().into(), replacement)
    }

    /// Deletes `start_byte..end_byte`.
    #[must_use]
    pub fn delete(start_byte: usize, end_byte: usize) -> Self {
        Self::new(start_byte, end_byte, "")
    }

    /// Inserts `content` before `position`.
    #[must_use]
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self::new(position, position, content)
    }

    /// Whether the replaced ranges of `self` and `other` intersect.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// Error during rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Two edits replace intersecting ranges.
    #[error("overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of the first edit.
        edit_a: usize,
        /// Index of the second edit.
        edit_b: usize,
    },
    /// An edit ends past the end of the source or starts after it ends.
    #[error("edit {edit_index} out of bounds: {start_byte}..{end_byte} in source of length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit.
        edit_index: usize,
        /// Start byte of the edit.
        start_byte: usize,
        /// End byte of the edit.
        end_byte: usize,
        /// Length of the source.
        source_len: usize,
    },
    /// An edit boundary splits a UTF-8 character.
    #[error("edit {edit_index} does not fall on a char boundary at byte {offset}")]
    NotCharBoundary {
        /// Index of the bad edit.
        edit_index: usize,
        /// Offending offset.
        offset: usize,
    },
}

/// Collects edits against one source and applies them in one go.
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    source: String,
    edits: Vec<Edit>,
}

impl ByteRangeRewriter {
    /// Creates a rewriter for `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Queues an edit.
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Queues several edits.
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Number of queued edits.
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Checks the queued edits without applying them.
    ///
    /// # Errors
    /// Returns an error if an edit is out of bounds, splits a character or
    /// overlaps another edit.
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.start_byte > edit.end_byte || edit.end_byte > self.source.len() {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    start_byte: edit.start_byte,
                    end_byte: edit.end_byte,
                    source_len: self.source.len(),
                });
            }
            for offset in [edit.start_byte, edit.end_byte] {
                if !self.source.is_char_boundary(offset) {
                    return Err(RewriteError::NotCharBoundary {
                        edit_index: i,
                        offset,
                    });
                }
            }
        }

        for i in 0..self.edits.len() {
            for j in (i + 1)..self.edits.len() {
                if self.edits[i].overlaps(&self.edits[j]) {
                    return Err(RewriteError::OverlappingEdits {
                        edit_a: i,
                        edit_b: j,
                    });
                }
            }
        }
        Ok(())
    }

    /// Applies all edits and returns the new source.
    ///
    /// Insertions at the same offset keep the order in which they were queued.
    ///
    /// # Errors
    /// Same as [`ByteRangeRewriter::validate`].
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut sorted = self.edits;
        // Stable sort, then reverse: back to front, and same-offset inserts end up in queue order.
        sorted.sort_by_key(|edit| edit.start_byte);
        for edit in sorted.into_iter().rev() {
            result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_replacement() {
        let mut rewriter = ByteRangeRewriter::new("event Action Changed;");
        rewriter.add_edit(Edit::new(13, 20, "Closed"));
        assert_eq!(rewriter.apply().unwrap(), "event Action Closed;");
    }

    #[test]
    fn test_replace_by_text_range() {
        let source = "public virtual event Action E;";
        let start = source.find("virtual").unwrap();
        let range = TextRange::at(
            u32::try_from(start).unwrap().into(),
            "virtual".len().try_into().unwrap(),
        );
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::replace(range, "sealed"));
        assert_eq!(rewriter.apply().unwrap(), "public sealed event Action E;");
    }

    #[test]
    fn test_multiple_non_overlapping_edits() {
        let mut rewriter = ByteRangeRewriter::new("aaa bbb ccc");
        rewriter.add_edits([Edit::new(8, 11, "CCC"), Edit::new(0, 3, "AAA")]);
        assert_eq!(rewriter.edit_count(), 2);
        assert_eq!(rewriter.apply().unwrap(), "AAA bbb CCC");
    }

    #[test]
    fn test_overlapping_edits_error() {
        let mut rewriter = ByteRangeRewriter::new("hello world");
        rewriter.add_edit(Edit::new(0, 8, "hi"));
        rewriter.add_edit(Edit::new(5, 10, "there"));
        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::OverlappingEdits { edit_a: 0, edit_b: 1 })
        ));
    }

    #[test]
    fn test_out_of_bounds_error() {
        let mut rewriter = ByteRangeRewriter::new("short");
        rewriter.add_edit(Edit::new(0, 100, "long"));
        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_char_boundary_error() {
        let mut rewriter = ByteRangeRewriter::new("// é");
        rewriter.add_edit(Edit::delete(4, 4));
        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::NotCharBoundary { offset: 4, .. })
        ));
    }

    #[test]
    fn test_insert_and_delete_in_one_batch() {
        let source = "    public virtual event EventHandler<EventArgs> E;\n";
        let end = source.find(';').unwrap() + 1;
        let virtual_start = source.find("virtual").unwrap();
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::insert(end, "\n\n    void M() { }"));
        rewriter.add_edit(Edit::delete(virtual_start, virtual_start + "virtual ".len()));
        assert_eq!(
            rewriter.apply().unwrap(),
            "    public event EventHandler<EventArgs> E;\n\n    void M() { }\n"
        );
    }

    #[test]
    fn test_same_offset_inserts_keep_queue_order() {
        let mut rewriter = ByteRangeRewriter::new("ad");
        rewriter.add_edit(Edit::insert(1, "b"));
        rewriter.add_edit(Edit::insert(1, "c"));
        assert_eq!(rewriter.apply().unwrap(), "abcd");
    }

    #[test]
    fn test_preserves_comments() {
        let source = "class C\n{\n    // keep me\n    public virtual event Action E;\n}\n";
        let start = source.find("virtual ").unwrap();
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::delete(start, start + 8));
        let result = rewriter.apply().unwrap();
        assert!(result.contains("// keep me"));
        assert!(result.contains("public event Action E;"));
    }

    #[test]
    fn test_empty_edits() {
        let rewriter = ByteRangeRewriter::new("hello world");
        assert_eq!(rewriter.apply().unwrap(), "hello world");
    }

    #[test]
    fn test_adjacent_non_overlapping_edits() {
        let mut rewriter = ByteRangeRewriter::new("abcdef");
        rewriter.add_edit(Edit::new(0, 3, "XXX"));
        rewriter.add_edit(Edit::new(3, 6, "YYY"));
        assert_eq!(rewriter.apply().unwrap(), "XXXYYY");
    }
}
