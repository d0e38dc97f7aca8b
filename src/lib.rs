//! # redraft
//!
//! AI-assisted revision for Word and PowerPoint documents with rich-text
//! style preservation.
//!
//! The hard problem this library solves is not calling a model. It is
//! reconciling two independently produced strings (the original run-styled
//! text and the model's rewrite) so that bold/italic/underline/font/size/
//! color survive an edit that changed wording, length, and word order, while
//! embedded images are never lost.
//!
//! ## Quick Start
//!
//! ```no_run
//! use redraft::{Document, Passthrough, Redraft};
//!
//! fn main() -> redraft::Result<()> {
//!     let mut doc = Document::open("report.json")?;
//!
//!     // Passthrough keeps the text as-is; plug in a real TextGenerator to
//!     // actually rewrite it.
//!     let summary = Redraft::new().revise_document(&mut doc, "fix the grammar", &Passthrough)?;
//!     println!("{} units modified", summary.modified());
//!
//!     doc.save("report.revised.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## How a rewrite works
//!
//! 1. [`extract_spans`] flattens a unit's runs into character-offset style
//!    spans.
//! 2. [`project_spans`] re-locates those spans in the rewritten text using a
//!    character-level alignment.
//! 3. [`apply_spans`] rebuilds the unit's run sequence from the projected
//!    spans.
//! 4. [`guarded_rewrite`] wraps the destructive step: units carrying
//!    embedded drawings are snapshotted first and restored if the rewrite
//!    would lose them.
//!
//! [`RevisionEngine`] drives this per unit, strictly in document order, and
//! reports every kept or reverted rewrite to a [`ChangeSink`].

pub mod changelog;
pub mod engine;
pub mod error;
pub mod generate;
pub mod guard;
pub mod lang;
pub mod model;
pub mod stylemap;

// Re-export commonly used types
pub use changelog::{ChangeLog, ChangeOutcome, ChangeRecord, ChangeSink, NullSink};
pub use engine::{
    is_correction_instruction, RevisionEngine, RevisionOptions, RevisionSummary, UnitOutcome,
    UnitReport,
};
pub use error::{Error, Result};
pub use generate::{GenerateRequest, Passthrough, TextGenerator};
pub use guard::{guarded_rewrite, has_media, RewriteVerdict};
pub use model::{
    Body, Document, Drawing, Metadata, RgbColor, Run, RunStyle, Shape, Slide, TextUnit,
    UnitSnapshot,
};
pub use stylemap::{apply_spans, extract_spans, project_spans, StyleSpan};

use std::path::Path;

/// Revise a document in place with default options and no change log.
pub fn revise_document(
    document: &mut Document,
    instruction: &str,
    generator: &dyn TextGenerator,
) -> Result<RevisionSummary> {
    Redraft::new().revise_document(document, instruction, generator)
}

/// Load a document, revise it, and save the result.
pub fn revise_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    instruction: &str,
    generator: &dyn TextGenerator,
) -> Result<RevisionSummary> {
    let mut document = Document::open(input)?;
    let summary = revise_document(&mut document, instruction, generator)?;
    document.save(output)?;
    Ok(summary)
}

/// Builder for configured revision passes.
///
/// # Example
///
/// ```no_run
/// use redraft::{ChangeLog, Document, Passthrough, Redraft};
///
/// let mut doc = Document::open("report.json")?;
/// let mut log = ChangeLog::create("LOGS", "report.json", doc.unit_count(), None)?;
///
/// let summary = Redraft::new()
///     .with_context_units(3)
///     .with_language("English")
///     .with_sink(&mut log)
///     .revise_document(&mut doc, "simplify the vocabulary", &Passthrough)?;
/// # Ok::<(), redraft::Error>(())
/// ```
pub struct Redraft<'s> {
    options: RevisionOptions,
    detect_language: bool,
    sink: Option<&'s mut dyn ChangeSink>,
}

impl<'s> Redraft<'s> {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self {
            options: RevisionOptions::default(),
            detect_language: true,
            sink: None,
        }
    }

    /// Set the context window size (trailing units fed to the generator).
    pub fn with_context_units(mut self, units: usize) -> Self {
        self.options = self.options.with_context_units(units);
        self
    }

    /// Set the separator between context fragments.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.options = self.options.with_separator(separator);
        self
    }

    /// Force a language display name instead of detecting one.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.options = self.options.with_language(language);
        self
    }

    /// Disable automatic language detection.
    pub fn without_language_detection(mut self) -> Self {
        self.detect_language = false;
        self
    }

    /// Send kept and reverted rewrites to a change sink.
    pub fn with_sink(mut self, sink: &'s mut dyn ChangeSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Revise a loaded document in place.
    ///
    /// When language detection is enabled and the document metadata carries
    /// no language, the detected code is written back to the metadata.
    pub fn revise_document(
        mut self,
        document: &mut Document,
        instruction: &str,
        generator: &dyn TextGenerator,
    ) -> Result<RevisionSummary> {
        if self.detect_language && document.metadata.language.is_none() {
            if let Some(code) = lang::detect(&document.sample_text(10)) {
                log::info!("detected document language: {}", lang::language_name(code));
                document.metadata.language = Some(code.to_string());
            }
        }

        let engine = RevisionEngine::with_options(generator, self.options.clone());
        let mut null = NullSink;
        let sink: &mut dyn ChangeSink = match &mut self.sink {
            Some(sink) => &mut **sink,
            None => &mut null,
        };
        Ok(engine.revise(document, instruction, sink))
    }

    /// Load, revise, and save a document.
    pub fn revise_file<P: AsRef<Path>, Q: AsRef<Path>>(
        self,
        input: P,
        output: Q,
        instruction: &str,
        generator: &dyn TextGenerator,
    ) -> Result<RevisionSummary> {
        let mut document = Document::open(input)?;
        let summary = self.revise_document(&mut document, instruction, generator)?;
        document.save(output)?;
        Ok(summary)
    }
}

impl Default for Redraft<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let redraft = Redraft::new();
        assert_eq!(redraft.options.context_units, 2);
        assert!(redraft.detect_language);
        assert!(redraft.sink.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let redraft = Redraft::new()
            .with_context_units(5)
            .with_separator(" | ")
            .with_language("French")
            .without_language_detection();

        assert_eq!(redraft.options.context_units, 5);
        assert_eq!(redraft.options.context_separator, " | ");
        assert_eq!(redraft.options.language.as_deref(), Some("French"));
        assert!(!redraft.detect_language);
    }

    #[test]
    fn test_revise_document_detects_language() {
        let mut doc = Document::new_word();
        if let Body::Word { paragraphs } = &mut doc.body {
            paragraphs.push(TextUnit::with_text(
                "The report describes the results of the survey and is ready.",
            ));
        }

        Redraft::new()
            .revise_document(&mut doc, "improve", &Passthrough)
            .unwrap();

        assert_eq!(doc.metadata.language.as_deref(), Some("en"));
    }
}
