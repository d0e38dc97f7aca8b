//! Style span extraction from a unit's run sequence.

use super::StyleSpan;
use crate::model::TextUnit;

/// Flatten a unit's runs into character-offset style spans.
///
/// Runs are walked in document order with a running character offset; each
/// run with non-empty text emits one span carrying a copy of its style.
/// Attributes left unset on the run stay unset on the span. Empty runs emit
/// nothing and advance nothing. A run-less unit yields an empty list.
///
/// The returned spans exactly tile `[0, unit.char_len())`.
pub fn extract_spans(unit: &TextUnit) -> Vec<StyleSpan> {
    let mut spans = Vec::new();
    let mut offset = 0;

    for run in &unit.runs {
        let len = run.char_len();
        if len > 0 {
            spans.push(StyleSpan::new(offset, offset + len, run.style.clone()));
            offset += len;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Run, RunStyle};

    fn bold() -> RunStyle {
        RunStyle {
            bold: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_spans_tile_the_text() {
        let mut unit = TextUnit::new();
        unit.append_run("Hello", bold());
        unit.append_run(" world", RunStyle::default());

        let spans = extract_spans(&unit);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 5));
        assert_eq!((spans[1].start, spans[1].end), (5, 11));
        assert_eq!(spans[0].style.bold, Some(true));
        assert_eq!(spans[1].style.bold, None);
    }

    #[test]
    fn test_empty_runs_are_skipped() {
        let mut unit = TextUnit::new();
        unit.runs.push(Run::new(""));
        unit.append_run("text", RunStyle::default());
        unit.runs.push(Run::new(""));

        let spans = extract_spans(&unit);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 4));
    }

    #[test]
    fn test_runless_unit_yields_nothing() {
        assert!(extract_spans(&TextUnit::new()).is_empty());
    }

    #[test]
    fn test_offsets_count_characters_not_bytes() {
        let mut unit = TextUnit::new();
        unit.append_run("été", bold());
        unit.append_run(" chaud", RunStyle::default());

        let spans = extract_spans(&unit);
        assert_eq!((spans[0].start, spans[0].end), (0, 3));
        assert_eq!((spans[1].start, spans[1].end), (3, 9));
    }

    #[test]
    fn test_unset_attributes_survive_extraction() {
        let mut unit = TextUnit::new();
        unit.append_run(
            "x",
            RunStyle {
                italic: Some(false),
                ..Default::default()
            },
        );

        let spans = extract_spans(&unit);
        // Explicit false must not be confused with unset.
        assert_eq!(spans[0].style.italic, Some(false));
        assert_eq!(spans[0].style.bold, None);
    }
}
