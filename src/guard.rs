//! Media-safety guard around destructive unit rewrites.
//!
//! Run synthesis replaces a unit's run sequence wholesale, which is exactly
//! the kind of edit that can silently drop an embedded drawing. The guard
//! wraps a rewrite in a snapshot/verify/restore cycle: units without media
//! are rewritten directly; units with media are snapshotted first, and if
//! the rewrite leaves the unit without its media the snapshot is restored
//! and the rewrite reported as reverted.

use crate::error::Result;
use crate::model::TextUnit;

/// Outcome of a guarded rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteVerdict {
    /// The rewrite passed verification (or needed none) and was kept.
    Kept,
    /// The rewrite lost embedded media and the unit was restored.
    Reverted,
}

impl RewriteVerdict {
    /// True when the rewrite was kept.
    pub fn is_kept(&self) -> bool {
        matches!(self, RewriteVerdict::Kept)
    }
}

/// True when the unit carries at least one embedded drawing.
pub fn has_media(unit: &TextUnit) -> bool {
    unit.media_count() > 0
}

/// Run `rewrite` against the unit under media protection.
///
/// State machine per invocation:
///
/// ```text
/// CHECK ── no media ──▶ REWRITE ──▶ DONE(kept)
///   └── media ──▶ BACKUP ──▶ REWRITE ──▶ VERIFY ──┬─▶ DONE(kept)
///                                                 └─▶ RESTORE ──▶ DONE(reverted)
/// ```
///
/// If `rewrite` returns an error the snapshot (when one was taken) is
/// restored before the error propagates, so the caller always sees either
/// the completed rewrite or the untouched unit, never a half-applied one.
pub fn guarded_rewrite<F>(unit: &mut TextUnit, rewrite: F) -> Result<RewriteVerdict>
where
    F: FnOnce(&mut TextUnit) -> Result<()>,
{
    if !has_media(unit) {
        rewrite(unit)?;
        return Ok(RewriteVerdict::Kept);
    }

    let backup = unit.snapshot();

    match rewrite(unit) {
        Ok(()) => {
            if has_media(unit) {
                Ok(RewriteVerdict::Kept)
            } else {
                unit.restore(backup);
                Ok(RewriteVerdict::Reverted)
            }
        }
        Err(err) => {
            unit.restore(backup);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Drawing, Run};

    fn unit_with_media(text: &str) -> TextUnit {
        let mut unit = TextUnit::with_text(text);
        unit.runs[0].drawings.push(Drawing::new("image1.png"));
        unit
    }

    #[test]
    fn test_rewrite_without_media_goes_through() {
        let mut unit = TextUnit::with_text("plain");
        let verdict = guarded_rewrite(&mut unit, |u| {
            u.runs = vec![Run::new("rewritten")];
            Ok(())
        })
        .unwrap();

        assert!(verdict.is_kept());
        assert_eq!(unit.text(), "rewritten");
    }

    #[test]
    fn test_media_preserving_rewrite_is_kept() {
        let mut unit = unit_with_media("Caption");
        let verdict = guarded_rewrite(&mut unit, |u| {
            u.clear_runs();
            u.append_run("New Caption", Default::default());
            Ok(())
        })
        .unwrap();

        assert!(verdict.is_kept());
        assert_eq!(unit.text(), "New Caption");
        assert_eq!(unit.media_count(), 1);
    }

    #[test]
    fn test_media_losing_rewrite_is_reverted() {
        let mut unit = unit_with_media("Caption");
        let before = unit.clone();

        let verdict = guarded_rewrite(&mut unit, |u| {
            // A faulty rewrite that replaces the run list wholesale.
            u.runs = vec![Run::new("New Caption")];
            Ok(())
        })
        .unwrap();

        assert_eq!(verdict, RewriteVerdict::Reverted);
        assert_eq!(unit, before);
        assert_eq!(unit.text(), "Caption");
        assert!(has_media(&unit));
    }

    #[test]
    fn test_failing_rewrite_restores_and_propagates() {
        let mut unit = unit_with_media("Caption");
        let before = unit.clone();

        let result = guarded_rewrite(&mut unit, |u| {
            u.runs.clear();
            Err(Error::Other("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(unit, before);
    }

    #[test]
    fn test_failing_rewrite_without_media_propagates() {
        let mut unit = TextUnit::with_text("plain");
        let result = guarded_rewrite(&mut unit, |_| Err(Error::Other("boom".into())));
        assert!(result.is_err());
    }
}
