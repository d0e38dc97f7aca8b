//! Document-level types.

use super::TextUnit;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A loaded office document: metadata plus a format-specific body.
///
/// This is the mutable object model the revision engine operates on. Loading
/// and saving are plain JSON over these types; the engine itself never touches
/// the filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Format-specific content tree
    pub body: Body,
}

/// Document content, by source format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Body {
    /// A Word document: a flat paragraph sequence.
    Word {
        /// Paragraphs in document order
        paragraphs: Vec<TextUnit>,
    },

    /// A PowerPoint presentation: slides holding shapes with text frames.
    Slides {
        /// Slides in presentation order
        slides: Vec<Slide>,
    },
}

/// One presentation slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slide {
    /// Shapes on the slide, in z-order
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

/// A shape with a text frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shape {
    /// Shape name, when the authoring tool assigned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Paragraphs of the shape's text frame
    #[serde(default)]
    pub frame: Vec<TextUnit>,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Detected or declared language code (e.g. "en", "fr")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Last modification time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Document {
    /// Create an empty Word document.
    pub fn new_word() -> Self {
        Self {
            metadata: Metadata::default(),
            body: Body::Word {
                paragraphs: Vec::new(),
            },
        }
    }

    /// Create an empty presentation.
    pub fn new_slides() -> Self {
        Self {
            metadata: Metadata::default(),
            body: Body::Slides { slides: Vec::new() },
        }
    }

    /// Load a document from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Decode a document from JSON text.
    pub fn from_json(data: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(data)?;
        Ok(doc)
    }

    /// Save the document as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Encode the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    /// Display name of the source format.
    pub fn format_name(&self) -> &'static str {
        match &self.body {
            Body::Word { .. } => "Word",
            Body::Slides { .. } => "PowerPoint",
        }
    }

    /// Number of text units in document order.
    pub fn unit_count(&self) -> usize {
        self.units().len()
    }

    /// All text units in document order.
    pub fn units(&self) -> Vec<&TextUnit> {
        match &self.body {
            Body::Word { paragraphs } => paragraphs.iter().collect(),
            Body::Slides { slides } => slides
                .iter()
                .flat_map(|s| s.shapes.iter())
                .flat_map(|sh| sh.frame.iter())
                .collect(),
        }
    }

    /// All text units in document order, mutably.
    pub fn units_mut(&mut self) -> Vec<&mut TextUnit> {
        match &mut self.body {
            Body::Word { paragraphs } => paragraphs.iter_mut().collect(),
            Body::Slides { slides } => slides
                .iter_mut()
                .flat_map(|s| s.shapes.iter_mut())
                .flat_map(|sh| sh.frame.iter_mut())
                .collect(),
        }
    }

    /// Human-readable label per unit, parallel to [`Document::units`].
    pub fn unit_labels(&self) -> Vec<String> {
        match &self.body {
            Body::Word { paragraphs } => (1..=paragraphs.len())
                .map(|i| format!("paragraph {i}"))
                .collect(),
            Body::Slides { slides } => {
                let mut labels = Vec::new();
                for (si, slide) in slides.iter().enumerate() {
                    for (hi, shape) in slide.shapes.iter().enumerate() {
                        for pi in 1..=shape.frame.len() {
                            labels.push(format!(
                                "slide {}, shape {}, paragraph {}",
                                si + 1,
                                hi + 1,
                                pi
                            ));
                        }
                    }
                }
                labels
            }
        }
    }

    /// Borrow one unit by flattened index.
    pub fn unit(&self, index: usize) -> Result<&TextUnit> {
        let units = self.units();
        let count = units.len();
        units
            .into_iter()
            .nth(index)
            .ok_or(Error::UnitOutOfRange(index, count))
    }

    /// Total number of embedded drawings across all units.
    pub fn media_count(&self) -> usize {
        self.units().iter().map(|u| u.media_count()).sum()
    }

    /// Plain text of the whole document, one line per unit.
    pub fn plain_text(&self) -> String {
        self.units()
            .iter()
            .map(|u| u.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Sample text for language identification: the first `max_units`
    /// non-blank unit texts joined with spaces.
    pub fn sample_text(&self, max_units: usize) -> String {
        self.units()
            .iter()
            .filter(|u| !u.is_blank())
            .take(max_units)
            .map(|u| u.text().trim().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
