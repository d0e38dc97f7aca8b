//! Text units, runs, and character-level style attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color, serialized as a six-digit hex string (`"1F4E79"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl RgbColor {
    /// Create a color from components.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a six-digit hex string, with or without a leading `#`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Self::from_hex(&s).ok_or_else(|| format!("invalid RGB hex string: {s:?}"))
    }
}

impl From<RgbColor> for String {
    fn from(c: RgbColor) -> Self {
        c.to_string()
    }
}

/// Character formatting of a run.
///
/// Every attribute is tri-state: `Some(true)` / `Some(false)` are explicit
/// settings, `None` means "inherited/unset". `None` must survive extraction,
/// projection, and synthesis untouched; collapsing it to a concrete default
/// would override container-level formatting on rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Bold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Italic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    /// Underline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    /// Font family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Font color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,
}

impl RunStyle {
    /// A style with every attribute unset.
    pub fn inherit() -> Self {
        Self::default()
    }

    /// True when no attribute is explicitly set.
    pub fn is_plain(&self) -> bool {
        self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.font_name.is_none()
            && self.font_size.is_none()
            && self.color.is_none()
    }
}

/// An embedded drawing or picture anchored inside a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawing {
    /// Identifier of the media resource in the package
    pub resource_id: String,

    /// Alternative text / description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Drawing {
    /// Create a drawing reference.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            description: None,
        }
    }
}

/// A contiguous stretch of text sharing one uniform style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Text content
    pub text: String,

    /// Character formatting
    #[serde(default)]
    pub style: RunStyle,

    /// Drawings anchored in this run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drawings: Vec<Drawing>,
}

impl Run {
    /// Create a run with an unset style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
            drawings: Vec::new(),
        }
    }

    /// Create a run with explicit formatting.
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
            drawings: Vec::new(),
        }
    }

    /// Length of the run text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The atomic rewritable container: a Word paragraph or one paragraph of a
/// PowerPoint shape's text frame.
///
/// A unit owns an ordered run sequence and is mutated in place on rewrite;
/// the container itself is never deleted, only its runs are replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Runs in document order
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl TextUnit {
    /// Create an empty unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a unit holding a single unstyled run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::new(text)],
        }
    }

    /// Full text of the unit (run texts concatenated in order).
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Length of the unit text in characters.
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(Run::char_len).sum()
    }

    /// True when the unit text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Number of drawings embedded anywhere in the unit.
    pub fn media_count(&self) -> usize {
        self.runs.iter().map(|r| r.drawings.len()).sum()
    }

    /// Empty the text of every existing run, keeping the runs themselves.
    ///
    /// Drawings are anchored to runs, not to text, so they survive this.
    pub fn clear_runs(&mut self) {
        for run in &mut self.runs {
            run.text.clear();
        }
    }

    /// Append a new run.
    pub fn append_run(&mut self, text: impl Into<String>, style: RunStyle) {
        self.runs.push(Run::styled(text, style));
    }

    /// Deep-copy the unit's structural state for later restore.
    pub fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            runs: self.runs.clone(),
        }
    }

    /// Restore the unit from a snapshot taken earlier.
    pub fn restore(&mut self, snapshot: UnitSnapshot) {
        self.runs = snapshot.runs;
    }
}

/// Opaque structural backup of a [`TextUnit`].
///
/// Sufficient to fully restore runs and embedded drawings. Held for the
/// duration of one guarded rewrite and discarded afterwards.
#[derive(Debug, Clone)]
pub struct UnitSnapshot {
    runs: Vec<Run>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_round_trip() {
        let c = RgbColor::new(0x1F, 0x4E, 0x79);
        assert_eq!(c.to_string(), "1F4E79");
        assert_eq!(RgbColor::from_hex("1F4E79"), Some(c));
        assert_eq!(RgbColor::from_hex("#1f4e79"), Some(c));
        assert_eq!(RgbColor::from_hex("12345"), None);
        assert_eq!(RgbColor::from_hex("12345G"), None);
    }

    #[test]
    fn test_unit_text_concatenation() {
        let mut unit = TextUnit::new();
        unit.append_run("Hello ", RunStyle::default());
        unit.append_run(
            "world",
            RunStyle {
                bold: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(unit.text(), "Hello world");
        assert_eq!(unit.char_len(), 11);
        assert!(!unit.is_blank());
    }

    #[test]
    fn test_clear_runs_keeps_drawings() {
        let mut unit = TextUnit::with_text("Caption");
        unit.runs[0].drawings.push(Drawing::new("image1.png"));
        unit.clear_runs();

        assert_eq!(unit.text(), "");
        assert_eq!(unit.media_count(), 1);
        assert_eq!(unit.runs.len(), 1);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut unit = TextUnit::with_text("before");
        unit.runs[0].drawings.push(Drawing::new("chart.png"));
        let backup = unit.snapshot();

        unit.runs = vec![Run::new("after")];
        assert_eq!(unit.media_count(), 0);

        unit.restore(backup);
        assert_eq!(unit.text(), "before");
        assert_eq!(unit.media_count(), 1);
    }

    #[test]
    fn test_blank_unit() {
        assert!(TextUnit::new().is_blank());
        assert!(TextUnit::with_text("   ").is_blank());
        assert!(!TextUnit::with_text("x").is_blank());
    }

    #[test]
    fn test_style_is_plain() {
        assert!(RunStyle::inherit().is_plain());
        let style = RunStyle {
            underline: Some(false),
            ..Default::default()
        };
        assert!(!style.is_plain());
    }
}
