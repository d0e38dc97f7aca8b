//! Context window over previously seen units.

/// Join the trailing `window` unit texts before `index` into one context
/// string.
///
/// The window counts units by position, blank ones included, so a blank
/// neighbor shrinks the usable context rather than pulling older text in.
/// Texts are trimmed and joined with `separator`; the result is empty for
/// the first unit or a zero window.
pub(crate) fn trailing_context(
    originals: &[String],
    index: usize,
    window: usize,
    separator: &str,
) -> String {
    if window == 0 || index == 0 {
        return String::new();
    }

    let start = index.saturating_sub(window);
    originals[start..index]
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn originals() -> Vec<String> {
        vec![
            "First paragraph.".to_string(),
            "Second paragraph.".to_string(),
            "   ".to_string(),
            "Fourth paragraph.".to_string(),
        ]
    }

    #[test]
    fn test_first_unit_has_no_context() {
        assert_eq!(trailing_context(&originals(), 0, 2, " [...] "), "");
    }

    #[test]
    fn test_window_of_two() {
        assert_eq!(
            trailing_context(&originals(), 2, 2, " [...] "),
            "First paragraph. [...] Second paragraph."
        );
    }

    #[test]
    fn test_blank_neighbors_shrink_context() {
        // The window covers units 1 and 2; unit 2 is blank, so only one
        // text survives. The window does not reach further back.
        assert_eq!(
            trailing_context(&originals(), 3, 2, " [...] "),
            "Second paragraph."
        );
    }

    #[test]
    fn test_zero_window() {
        assert_eq!(trailing_context(&originals(), 3, 0, " [...] "), "");
    }
}
