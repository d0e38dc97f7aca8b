//! Run synthesis: rebuild a unit's run sequence from projected spans.

use super::StyleSpan;
use crate::model::{RunStyle, TextUnit};

/// Replace a unit's content with `new_text`, split into runs along `spans`.
///
/// Destructive: every existing run is emptied first (run-anchored drawings
/// stay in place), then new runs are appended. With no spans the whole text
/// becomes one unstyled run inheriting container defaults, which is the
/// correct result for styleless text, not an error path.
///
/// Otherwise spans are walked in `start` order. Overlaps are clipped against
/// the previous span's end, ends are clipped to the text length, and a span
/// starting at or past the end of the text stops the walk. Uncovered gaps
/// between spans become unstyled runs; text remaining after the final span
/// becomes one run styled like the last span, a deliberate asymmetry with
/// the unstyled leading-gap case. Only attributes a span explicitly sets are
/// applied; unset attributes stay at the container default.
///
/// Rebuilding from scratch makes repeated application with the same
/// arguments reproduce the same run boundaries and styles.
pub fn apply_spans(unit: &mut TextUnit, new_text: &str, spans: &[StyleSpan]) {
    unit.clear_runs();

    if spans.is_empty() {
        unit.append_run(new_text, RunStyle::default());
        return;
    }

    let chars: Vec<char> = new_text.chars().collect();
    let new_len = chars.len();

    let mut sorted: Vec<&StyleSpan> = spans.iter().collect();
    sorted.sort_by_key(|s| s.start);

    let mut last_end = 0;
    for span in &sorted {
        let start = span.start.max(last_end);
        let end = span.end.min(new_len);

        if start >= new_len {
            break;
        }

        if start > last_end {
            let gap: String = chars[last_end..start].iter().collect();
            if !gap.is_empty() {
                unit.append_run(gap, RunStyle::default());
            }
        }

        if end > start {
            let styled: String = chars[start..end].iter().collect();
            unit.append_run(styled, span.style.clone());
            last_end = end;
        }
    }

    if last_end < new_len {
        let remaining: String = chars[last_end..].iter().collect();
        if !remaining.is_empty() {
            let style = sorted
                .last()
                .map(|s| s.style.clone())
                .unwrap_or_default();
            unit.append_run(remaining, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylemap::extract_spans;

    fn bold() -> RunStyle {
        RunStyle {
            bold: Some(true),
            ..Default::default()
        }
    }

    fn italic() -> RunStyle {
        RunStyle {
            italic: Some(true),
            ..Default::default()
        }
    }

    fn non_empty_texts(unit: &TextUnit) -> Vec<(String, RunStyle)> {
        unit.runs
            .iter()
            .filter(|r| !r.text.is_empty())
            .map(|r| (r.text.clone(), r.style.clone()))
            .collect()
    }

    #[test]
    fn test_no_spans_single_unstyled_run() {
        let mut unit = TextUnit::with_text("Report");
        apply_spans(&mut unit, "Summary", &[]);

        assert_eq!(unit.text(), "Summary");
        let runs = non_empty_texts(&unit);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].1.is_plain());
        assert!(extract_spans(&unit).iter().all(|s| s.style.is_plain()));
    }

    #[test]
    fn test_round_trip_reproduces_text() {
        let mut unit = TextUnit::with_text("placeholder");
        let spans = vec![
            StyleSpan::new(0, 5, bold()),
            StyleSpan::new(5, 11, RunStyle::default()),
        ];
        apply_spans(&mut unit, "Hello world", &spans);

        assert_eq!(unit.text(), "Hello world");
        let reextracted = extract_spans(&unit);
        let total: String = unit.runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(total, "Hello world");
        assert_eq!(reextracted[0].style.bold, Some(true));
    }

    #[test]
    fn test_gap_before_span_is_unstyled() {
        let mut unit = TextUnit::new();
        let spans = vec![StyleSpan::new(6, 11, bold())];
        apply_spans(&mut unit, "Hello world", &spans);

        let runs = non_empty_texts(&unit);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "Hello ");
        assert!(runs[0].1.is_plain());
        assert_eq!(runs[1].0, "world");
        assert_eq!(runs[1].1.bold, Some(true));
    }

    #[test]
    fn test_remainder_inherits_last_span_style() {
        let mut unit = TextUnit::new();
        let spans = vec![StyleSpan::new(0, 5, italic())];
        apply_spans(&mut unit, "Hello world", &spans);

        let runs = non_empty_texts(&unit);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].0, " world");
        // Trailing remainder keeps the last span's style, unlike gaps.
        assert_eq!(runs[1].1.italic, Some(true));
    }

    #[test]
    fn test_overlapping_spans_are_clipped() {
        let mut unit = TextUnit::new();
        let spans = vec![
            StyleSpan::new(0, 7, bold()),
            StyleSpan::new(5, 11, italic()),
        ];
        apply_spans(&mut unit, "Hello world", &spans);

        let runs = non_empty_texts(&unit);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "Hello w");
        assert_eq!(runs[1].0, "orld");
        assert_eq!(unit.text(), "Hello world");
    }

    #[test]
    fn test_empty_new_text_with_degenerate_span() {
        let mut unit = TextUnit::with_text("abc");
        let spans = vec![StyleSpan::new(0, 0, italic())];
        apply_spans(&mut unit, "", &spans);

        assert_eq!(unit.text(), "");
        assert!(non_empty_texts(&unit).is_empty());
    }

    #[test]
    fn test_span_past_text_end_stops_walk() {
        let mut unit = TextUnit::new();
        let spans = vec![
            StyleSpan::new(0, 3, bold()),
            StyleSpan::new(10, 14, italic()),
        ];
        apply_spans(&mut unit, "abcdef", &spans);

        assert_eq!(unit.text(), "abcdef");
        let runs = non_empty_texts(&unit);
        // "abc" styled, remainder "def" styled with the last sorted span.
        assert_eq!(runs[0].0, "abc");
        assert_eq!(runs[0].1.bold, Some(true));
        assert_eq!(runs[1].0, "def");
        assert_eq!(runs[1].1.italic, Some(true));
    }

    #[test]
    fn test_idempotent_reapplication() {
        let mut unit = TextUnit::new();
        let spans = vec![
            StyleSpan::new(0, 5, bold()),
            StyleSpan::new(5, 11, RunStyle::default()),
        ];
        apply_spans(&mut unit, "Hello world", &spans);
        let first = non_empty_texts(&unit);

        apply_spans(&mut unit, "Hello world", &spans);
        let second = non_empty_texts(&unit);

        assert_eq!(first, second);
        assert_eq!(unit.text(), "Hello world");
    }

    #[test]
    fn test_multibyte_clipping() {
        let mut unit = TextUnit::new();
        let spans = vec![StyleSpan::new(0, 3, bold())];
        apply_spans(&mut unit, "été chaud", &spans);

        let runs = non_empty_texts(&unit);
        assert_eq!(runs[0].0, "été");
        assert_eq!(runs[1].0, " chaud");
    }
}
