//! The revision orchestrator.
//!
//! [`RevisionEngine`] walks a document's text units strictly in document
//! order, asks the [`TextGenerator`] collaborator for replacement text, and,
//! when the text actually changed, reconciles the original run formatting
//! onto it via the `stylemap` pipeline, under the media guard. One failing
//! unit never aborts the batch; every unit ends with exactly one
//! [`UnitOutcome`].

mod context;

use crate::changelog::{ChangeOutcome, ChangeRecord, ChangeSink};
use crate::generate::{GenerateRequest, TextGenerator};
use crate::guard::{self, RewriteVerdict};
use crate::lang;
use crate::model::Document;
use crate::stylemap::{apply_spans, extract_spans, project_spans};
use context::trailing_context;
use unicode_normalization::UnicodeNormalization;

/// Instruction keywords that switch the engine into correction mode.
const CORRECTION_KEYWORDS: &[&str] = &[
    "correct",
    "spelling",
    "grammar",
    "proofread",
    "typo",
    "corrige",
    "orthographe",
    "grammaire",
];

/// True when the instruction asks for a spelling/grammar correction.
///
/// Correction mode pins the generator to the document language and enables
/// the per-change breakdown in the change log.
pub fn is_correction_instruction(instruction: &str) -> bool {
    let lowered = instruction.to_lowercase();
    CORRECTION_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Options for a revision pass.
#[derive(Debug, Clone)]
pub struct RevisionOptions {
    /// How many preceding units feed the generation context
    pub context_units: usize,

    /// Separator between context fragments
    pub context_separator: String,

    /// Language display name override; defaults to the document metadata
    pub language: Option<String>,
}

impl RevisionOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context window size.
    pub fn with_context_units(mut self, units: usize) -> Self {
        self.context_units = units;
        self
    }

    /// Set the context fragment separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.context_separator = separator.into();
        self
    }

    /// Force a language display name instead of the document metadata.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl Default for RevisionOptions {
    fn default() -> Self {
        Self {
            context_units: 2,
            context_separator: " [...] ".to_string(),
            language: None,
        }
    }
}

/// Result of processing one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// The generator changed the text and the rewrite was kept.
    Modified,
    /// The generator returned the same (or empty) text.
    Unchanged,
    /// The rewrite was rolled back to protect embedded media.
    Reverted,
    /// The unit was blank and never sent to the generator.
    Skipped,
    /// Processing failed; the message describes why.
    Failed(String),
}

/// Per-unit processing report.
#[derive(Debug, Clone)]
pub struct UnitReport {
    /// Flattened unit index
    pub index: usize,
    /// Human-readable unit label
    pub label: String,
    /// What happened to the unit
    pub outcome: UnitOutcome,
}

/// Tally of a whole revision pass.
#[derive(Debug, Clone, Default)]
pub struct RevisionSummary {
    /// One report per unit, in document order
    pub reports: Vec<UnitReport>,
}

impl RevisionSummary {
    fn count(&self, matches: impl Fn(&UnitOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| matches(&r.outcome)).count()
    }

    /// Units whose rewrite was kept.
    pub fn modified(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Modified))
    }

    /// Units the generator left unchanged.
    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Unchanged))
    }

    /// Units rolled back by the media guard.
    pub fn reverted(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Reverted))
    }

    /// Blank units that were never processed.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Skipped))
    }

    /// Units that ended in an error.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Failed(_)))
    }
}

/// Sequential document revision driver.
pub struct RevisionEngine<'g> {
    generator: &'g dyn TextGenerator,
    options: RevisionOptions,
}

impl<'g> RevisionEngine<'g> {
    /// Create an engine with default options.
    pub fn new(generator: &'g dyn TextGenerator) -> Self {
        Self {
            generator,
            options: RevisionOptions::default(),
        }
    }

    /// Create an engine with explicit options.
    pub fn with_options(generator: &'g dyn TextGenerator, options: RevisionOptions) -> Self {
        Self { generator, options }
    }

    /// Revise every non-blank unit of the document in place.
    ///
    /// Units are processed one at a time in document order; the context each
    /// unit sees is built from earlier units' pre-rewrite text. Kept and
    /// reverted rewrites are handed to `sink`. Per-unit failures are
    /// captured in the report and processing continues with the next unit.
    pub fn revise(
        &self,
        document: &mut Document,
        instruction: &str,
        sink: &mut dyn ChangeSink,
    ) -> RevisionSummary {
        let labels = document.unit_labels();
        let originals: Vec<String> = document.units().iter().map(|u| u.text()).collect();

        let is_correction = is_correction_instruction(instruction);
        let language = self.options.language.clone().or_else(|| {
            document
                .metadata
                .language
                .as_deref()
                .map(lang::language_name)
        });

        let mut summary = RevisionSummary::default();

        for (index, unit) in document.units_mut().into_iter().enumerate() {
            let label = labels[index].clone();
            let original = originals[index].as_str();

            if original.trim().is_empty() {
                summary.reports.push(UnitReport {
                    index,
                    label,
                    outcome: UnitOutcome::Skipped,
                });
                continue;
            }

            let context = trailing_context(
                &originals,
                index,
                self.options.context_units,
                &self.options.context_separator,
            );

            let request = GenerateRequest {
                instruction,
                text: original,
                context: &context,
                is_correction,
                language: language.as_deref(),
            };
            let generated: String = self.generator.generate(&request).nfc().collect();
            let revised = generated.trim();

            if revised.is_empty() || revised == original.trim() {
                log::debug!("{label}: unchanged");
                summary.reports.push(UnitReport {
                    index,
                    label,
                    outcome: UnitOutcome::Unchanged,
                });
                continue;
            }

            let spans = extract_spans(unit);
            let projected = project_spans(original, revised, &spans);

            let outcome = match guard::guarded_rewrite(unit, |u| {
                apply_spans(u, revised, &projected);
                Ok(())
            }) {
                Ok(verdict) => {
                    let change = ChangeRecord {
                        unit_label: &label,
                        original,
                        revised,
                        instruction,
                        is_correction,
                        outcome: match verdict {
                            RewriteVerdict::Kept => ChangeOutcome::Kept,
                            RewriteVerdict::Reverted => ChangeOutcome::Reverted,
                        },
                    };
                    match sink.record(&change) {
                        Ok(()) => match verdict {
                            RewriteVerdict::Kept => {
                                log::info!("{label}: modified");
                                UnitOutcome::Modified
                            }
                            RewriteVerdict::Reverted => {
                                log::warn!("{label}: rewrite reverted to keep embedded media");
                                UnitOutcome::Reverted
                            }
                        },
                        Err(err) => {
                            log::warn!("{label}: change log failed: {err}");
                            UnitOutcome::Failed(format!("change log: {err}"))
                        }
                    }
                }
                Err(err) => {
                    log::warn!("{label}: rewrite failed: {err}");
                    UnitOutcome::Failed(err.to_string())
                }
            };

            summary.reports.push(UnitReport {
                index,
                label,
                outcome,
            });
        }

        summary
    }
}
