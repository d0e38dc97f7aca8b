//! Character-level alignment between two texts.
//!
//! Wraps the `similar` crate's edit-script computation into the four-tag
//! opcode form the projector consumes: an ordered list of opcodes that
//! totally covers both the old text `[0, old_len)` and the new text
//! `[0, new_len)` with no gaps.

use similar::{capture_diff_slices, Algorithm, DiffOp};

/// Kind of one alignment opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    /// The range is identical in both texts.
    Equal,
    /// Old-text range was replaced by the new-text range.
    Replace,
    /// Old-text range was removed; the new range is empty.
    Delete,
    /// New-text range was inserted; the old range is empty.
    Insert,
}

/// One alignment instruction over character offsets.
///
/// Ranges are half-open. `Delete` opcodes have `new_start == new_end`,
/// `Insert` opcodes have `old_start == old_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// Opcode kind
    pub tag: OpTag,
    /// Start of the covered old-text range
    pub old_start: usize,
    /// End of the covered old-text range
    pub old_end: usize,
    /// Start of the covered new-text range
    pub new_start: usize,
    /// End of the covered new-text range
    pub new_end: usize,
}

impl From<DiffOp> for Opcode {
    fn from(op: DiffOp) -> Self {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => Opcode {
                tag: OpTag::Equal,
                old_start: old_index,
                old_end: old_index + len,
                new_start: new_index,
                new_end: new_index + len,
            },
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => Opcode {
                tag: OpTag::Delete,
                old_start: old_index,
                old_end: old_index + old_len,
                new_start: new_index,
                new_end: new_index,
            },
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => Opcode {
                tag: OpTag::Insert,
                old_start: old_index,
                old_end: old_index,
                new_start: new_index,
                new_end: new_index + new_len,
            },
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => Opcode {
                tag: OpTag::Replace,
                old_start: old_index,
                old_end: old_index + old_len,
                new_start: new_index,
                new_end: new_index + new_len,
            },
        }
    }
}

/// Compute the ordered, total-covering opcode list between two texts.
///
/// Operates on characters, so offsets agree with the character offsets used
/// by [`StyleSpan`](super::StyleSpan).
pub fn align(old_text: &str, new_text: &str) -> Vec<Opcode> {
    let old: Vec<char> = old_text.chars().collect();
    let new: Vec<char> = new_text.chars().collect();
    capture_diff_slices(Algorithm::Myers, &old, &new)
        .into_iter()
        .map(Opcode::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_total_coverage(ops: &[Opcode], old_len: usize, new_len: usize) {
        let mut old_pos = 0;
        let mut new_pos = 0;
        for op in ops {
            assert_eq!(op.old_start, old_pos, "gap in old coverage");
            assert_eq!(op.new_start, new_pos, "gap in new coverage");
            assert!(op.old_end >= op.old_start);
            assert!(op.new_end >= op.new_start);
            old_pos = op.old_end;
            new_pos = op.new_end;
        }
        assert_eq!(old_pos, old_len);
        assert_eq!(new_pos, new_len);
    }

    #[test]
    fn test_identical_texts_single_equal() {
        let ops = align("same text", "same text");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].tag, OpTag::Equal);
        assert_total_coverage(&ops, 9, 9);
    }

    #[test]
    fn test_insertion_coverage() {
        let ops = align("Hello world", "Hello there world");
        assert_total_coverage(&ops, 11, 17);
        assert!(ops.iter().any(|op| op.tag == OpTag::Insert));
    }

    #[test]
    fn test_deletion_to_empty() {
        let ops = align("abc", "");
        assert_total_coverage(&ops, 3, 0);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].tag, OpTag::Delete);
    }

    #[test]
    fn test_both_empty() {
        assert!(align("", "").is_empty());
    }

    #[test]
    fn test_multibyte_offsets_are_char_based() {
        // "é" is two bytes; offsets must still count one per character.
        let ops = align("été", "étés");
        assert_total_coverage(&ops, 3, 4);
    }

    #[test]
    fn test_replace_coverage() {
        let ops = align("the red fox", "the blue fox");
        assert_total_coverage(&ops, 11, 12);
    }
}
