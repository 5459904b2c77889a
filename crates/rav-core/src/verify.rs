//! Verification pass: compare artifacts on disk against the manifest.
//!
//! Entries are processed strictly in manifest order, one at a time. A failing
//! entry is recorded and the pass moves on, so one bad artifact never hides
//! problems with the others. Report lines go to injected sinks rather than
//! the process streams, which keeps the pass testable.

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::digest;
use crate::manifest::ReleaseManifest;

/// Outcome for a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Artifact present and its digest matches the expected one.
    Verified,
    /// Artifact present but its digest differs from the expected one.
    Mismatch { expected: String, actual: String },
    /// No file at the resolved path.
    Missing,
    /// Artifact present but the manifest records no expected digest.
    /// Informational: does not fail the run.
    NoExpectedDigest,
    /// Artifact could not be hashed (permissions, disappeared mid-read).
    ReadError(String),
}

impl Outcome {
    /// True for outcomes that count against the aggregate verdict.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Outcome::Mismatch { .. } | Outcome::Missing | Outcome::ReadError(_)
        )
    }
}

/// Per-entry result, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryResult {
    pub path: String,
    pub outcome: Outcome,
}

/// Aggregate of one verification pass.
#[derive(Debug, Default)]
pub struct VerifySummary {
    pub entries: Vec<EntryResult>,
    /// Number of manifest entries examined (all of them; the pass never
    /// short-circuits).
    pub total_checked: usize,
    pub total_errors: usize,
}

impl VerifySummary {
    pub fn passed(&self) -> bool {
        self.total_errors == 0
    }
}

/// Verify every manifest entry against `base_dir`.
///
/// Writes one report line per entry to `out` as the entry is processed
/// (hashing diagnostics go to `err`), then a single trailing pass/fail
/// summary line. Only sink write failures abort the pass.
pub fn verify_manifest(
    manifest: &ReleaseManifest,
    base_dir: &Path,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<VerifySummary> {
    let mut summary = VerifySummary::default();

    for entry in &manifest.artifacts {
        let resolved = base_dir.join(&entry.path);
        let outcome = check_entry(&resolved, entry.sha512.as_deref(), &entry.path, out, err)?;
        summary.total_checked += 1;
        if outcome.is_error() {
            summary.total_errors += 1;
        }
        summary.entries.push(EntryResult {
            path: entry.path.clone(),
            outcome,
        });
    }

    if summary.passed() {
        writeln!(out, "Artifact checksum verification passed")?;
    } else {
        writeln!(out, "Verification failed")?;
    }

    Ok(summary)
}

/// Check one artifact and emit its report line.
///
/// Expected digests are compared case-insensitively; packaging tools differ
/// on hex case. When no digest is expected the file is not hashed at all.
fn check_entry(
    resolved: &Path,
    expected: Option<&str>,
    rel_path: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Outcome> {
    if !resolved.exists() {
        writeln!(out, "Missing artifact: {}", resolved.display())?;
        return Ok(Outcome::Missing);
    }

    let expected = match expected {
        Some(hex) => hex,
        None => {
            writeln!(out, "No expected sha512 present for {rel_path}; skipping")?;
            return Ok(Outcome::NoExpectedDigest);
        }
    };

    let actual = match digest::sha512_file(resolved) {
        Ok(actual) => actual,
        Err(e) => {
            writeln!(
                err,
                "Error computing sha512 for {}: {:#}",
                resolved.display(),
                e
            )?;
            return Ok(Outcome::ReadError(format!("{e:#}")));
        }
    };

    if actual.eq_ignore_ascii_case(expected) {
        writeln!(out, "Verified: {rel_path}")?;
        Ok(Outcome::Verified)
    } else {
        writeln!(out, "Checksum mismatch for {rel_path}: expected {expected}, got {actual}")?;
        Ok(Outcome::Mismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}
