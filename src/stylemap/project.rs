//! Span projection from old-text to new-text coordinates.

use super::diff::{align, OpTag};
use super::StyleSpan;

/// Re-locate style spans in the coordinate space of a rewritten text.
///
/// A character-level alignment between `old_text` and `new_text` drives the
/// mapping. Each span endpoint is resolved independently against the first
/// opcode whose old-range contains it (`[old_start, old_end)` containment
/// for the span start, `(old_start, old_end]` for the span end), with this
/// per-tag policy:
///
/// - `Equal`: direct offset translation into the matching new-text range.
/// - `Replace`: snap to the replacement's boundary. Starts snap to the
///   block's `new_start`, ends snap to its `new_end`.
/// - `Delete`: both roles snap to the insertion point where the deleted text
///   used to be.
/// - `Insert`: zero old-text width, so neither containment test can select
///   it; the arms exist for completeness and mirror the boundary snaps.
///
/// A span survives only if both endpoints resolved and, after clamping the
/// end to the new text length, `end > start`. Spans that mapped entirely
/// inside deleted text are dropped; this is a documented data-loss policy,
/// not an error. If no span survives but at least one was given, the whole new text
/// gets a single span carrying the first input span's style, so a non-empty
/// rewrite never loses all formatting.
pub fn project_spans(old_text: &str, new_text: &str, spans: &[StyleSpan]) -> Vec<StyleSpan> {
    if spans.is_empty() {
        return Vec::new();
    }

    let opcodes = align(old_text, new_text);
    let new_len = new_text.chars().count();
    let mut projected = Vec::new();

    for span in spans {
        let mut new_start = None;
        let mut new_end = None;

        for op in &opcodes {
            if new_start.is_none() && op.old_start <= span.start && span.start < op.old_end {
                new_start = Some(match op.tag {
                    OpTag::Equal => op.new_start + (span.start - op.old_start),
                    OpTag::Replace | OpTag::Delete | OpTag::Insert => op.new_start,
                });
            }

            if new_end.is_none() && op.old_start < span.end && span.end <= op.old_end {
                new_end = Some(match op.tag {
                    OpTag::Equal => op.new_start + (span.end - op.old_start),
                    OpTag::Replace | OpTag::Insert => op.new_end,
                    OpTag::Delete => op.new_start,
                });
            }

            if new_start.is_some() && new_end.is_some() {
                break;
            }
        }

        if let (Some(start), Some(end)) = (new_start, new_end) {
            let end = end.min(new_len);
            if end > start {
                projected.push(StyleSpan::new(start, end, span.style.clone()));
            }
        }
    }

    // Nothing mapped: keep at least the first span's formatting over the
    // whole new text rather than reverting to container defaults.
    if projected.is_empty() {
        projected.push(StyleSpan::new(0, new_len, spans[0].style.clone()));
    }

    projected
}
