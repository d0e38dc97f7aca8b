//! Change logging for document revisions.
//!
//! The engine reports every kept or reverted rewrite to a [`ChangeSink`].
//! [`ChangeLog`] is the bundled sink: a plain-text, append-only log file with
//! one delimited block per change and, for correction instructions, a
//! character-level difference breakdown so reviewers can see exactly what
//! the model touched.

use crate::error::Result;
use crate::stylemap::diff::{align, OpTag};
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// How a recorded rewrite ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The rewrite was applied and kept.
    Kept,
    /// The rewrite was rolled back to protect embedded media.
    Reverted,
}

impl ChangeOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            ChangeOutcome::Kept => "modified",
            ChangeOutcome::Reverted => "reverted (media protection)",
        }
    }
}

/// One rewrite, as handed to a sink.
#[derive(Debug, Clone, Copy)]
pub struct ChangeRecord<'a> {
    /// Human-readable unit label ("paragraph 4", ...)
    pub unit_label: &'a str,
    /// Unit text before the rewrite
    pub original: &'a str,
    /// Replacement text produced by the generator
    pub revised: &'a str,
    /// Instruction that caused the change
    pub instruction: &'a str,
    /// Whether the instruction was classified as a correction
    pub is_correction: bool,
    /// Kept or reverted
    pub outcome: ChangeOutcome,
}

/// Receiver for per-unit change records.
pub trait ChangeSink {
    /// Record one kept or reverted rewrite.
    fn record(&mut self, change: &ChangeRecord<'_>) -> Result<()>;
}

/// Sink that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ChangeSink for NullSink {
    fn record(&mut self, _change: &ChangeRecord<'_>) -> Result<()> {
        Ok(())
    }
}

/// Append-only plain-text change log.
pub struct ChangeLog {
    file: File,
    path: PathBuf,
}

impl ChangeLog {
    /// Open (or create) the log file for a document inside `dir` and write
    /// the session header.
    ///
    /// The file is named `<document stem>_<YYYYMMDD>.txt`; re-running on the
    /// same day appends a new session to the same file.
    pub fn create(
        dir: impl AsRef<Path>,
        document_name: &str,
        unit_count: usize,
        language: Option<&str>,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let stem = Path::new(document_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| document_name.to_string());
        let path = dir.join(format!("{}_{}.txt", stem, Local::now().format("%Y%m%d")));

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        writeln!(file, "{}", "=".repeat(80))?;
        writeln!(
            file,
            "REVISION LOG - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file, "Document: {document_name}")?;
        writeln!(file, "Units: {unit_count}")?;
        if let Some(language) = language {
            writeln!(file, "Language: {language}")?;
        }
        writeln!(file, "{}\n", "=".repeat(80))?;

        Ok(Self { file, path })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_differences(&mut self, original: &str, revised: &str) -> Result<()> {
        let entries = describe_differences(original, revised);
        if entries.is_empty() {
            return Ok(());
        }

        writeln!(self.file, "CHANGES: {}\n", entries.len())?;
        for (i, entry) in entries.iter().enumerate() {
            writeln!(self.file, "  [{}] {}", i + 1, entry.kind)?;
            writeln!(self.file, "      position: character {}", entry.position)?;
            if let Some(from) = &entry.from {
                writeln!(self.file, "      from: {from:?}")?;
            }
            if let Some(to) = &entry.to {
                writeln!(self.file, "      to:   {to:?}")?;
            }
            writeln!(
                self.file,
                "      context: ...{}[*]{}...",
                entry.before, entry.after
            )?;
        }
        writeln!(self.file)?;
        Ok(())
    }
}

impl ChangeSink for ChangeLog {
    fn record(&mut self, change: &ChangeRecord<'_>) -> Result<()> {
        writeln!(self.file, "{}", "-".repeat(80))?;
        writeln!(self.file, "{}", change.unit_label.to_uppercase())?;
        writeln!(self.file, "Instruction: {}", change.instruction)?;
        writeln!(self.file, "Outcome: {}", change.outcome.as_str())?;
        writeln!(
            self.file,
            "Time: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(self.file, "{}\n", "-".repeat(80))?;

        if change.is_correction && change.original != change.revised {
            self.write_differences(change.original, change.revised)?;
        }

        writeln!(self.file, "BEFORE:\n{}\n", change.original)?;
        writeln!(self.file, "AFTER:\n{}\n", change.revised)?;
        self.file.flush()?;
        Ok(())
    }
}

/// One entry of a correction breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// "replacement", "deletion", or "insertion"
    pub kind: &'static str,
    /// Character position in the original text
    pub position: usize,
    /// Removed fragment, when any
    pub from: Option<String>,
    /// Inserted fragment, when any
    pub to: Option<String>,
    /// Up to 20 characters of original text before the change
    pub before: String,
    /// Up to 20 characters of original text after the change
    pub after: String,
}

/// Character context radius around each reported change.
const CONTEXT_CHARS: usize = 20;

/// Describe the edits between two texts, one entry per changed block.
pub fn describe_differences(original: &str, revised: &str) -> Vec<DiffEntry> {
    let old_chars: Vec<char> = original.chars().collect();
    let new_chars: Vec<char> = revised.chars().collect();
    let mut entries = Vec::new();

    for op in align(original, revised) {
        let kind = match op.tag {
            OpTag::Equal => continue,
            OpTag::Replace => "replacement",
            OpTag::Delete => "deletion",
            OpTag::Insert => "insertion",
        };

        let before: String = old_chars[op.old_start.saturating_sub(CONTEXT_CHARS)..op.old_start]
            .iter()
            .collect();
        let after: String = old_chars
            [op.old_end..(op.old_end + CONTEXT_CHARS).min(old_chars.len())]
            .iter()
            .collect();

        let from = (op.old_end > op.old_start)
            .then(|| old_chars[op.old_start..op.old_end].iter().collect());
        let to = (op.new_end > op.new_start)
            .then(|| new_chars[op.new_start..op.new_end].iter().collect());

        entries.push(DiffEntry {
            kind,
            position: op.old_start,
            from,
            to,
            before,
            after,
        });
    }

    entries
}
