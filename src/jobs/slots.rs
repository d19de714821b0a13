//! Slot pool model for scan-job admission.
//!
//! A slot is an integer identity in `[1, N]` naming one scan-job admission
//! position, where `N` is the configured concurrent scan job limit. The
//! slot is encoded in the job name as `scan-vulnerabilityreport-<slot>`;
//! [`scan_job_name`] and [`extract_slot`] are the format/parse pair for
//! that contract, shared with the job-creation side.
//!
//! All functions in this module are pure and side-effect free.

use std::sync::LazyLock;

/// Name prefix for slot-bearing vulnerability-report scan jobs
pub const SCAN_JOB_NAME_PREFIX: &str = "scan-vulnerabilityreport";

static SCAN_JOB_NAME_RE: LazyLock<Option<regex::Regex>> = LazyLock::new(|| {
    let pattern = format!(r"^{}-(\d+)$", regex::escape(SCAN_JOB_NAME_PREFIX));
    regex::Regex::new(&pattern).ok()
});

/// Format the name of the scan job occupying `slot`.
pub fn scan_job_name(slot: usize) -> String {
    format!("{SCAN_JOB_NAME_PREFIX}-{slot}")
}

/// Extract the slot identity from a job name.
///
/// Returns `None` for names outside the slot pattern. Unrelated or
/// manually created jobs sharing the namespace are expected; they carry no
/// slot and must not disturb slot accounting, so a non-match is not an
/// error.
pub fn extract_slot(job_name: &str) -> Option<usize> {
    let re = SCAN_JOB_NAME_RE.as_ref()?;
    let captures = re.captures(job_name)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Enumerate the slot pool `{start, start+1, ..., end}` inclusive,
/// ascending and without duplicates.
///
/// Returns an empty pool when `start > end`; in normal operation
/// `start = 1` and `end` is the configured limit.
pub fn slot_pool(start: usize, end: usize) -> Vec<usize> {
    if start > end {
        return Vec::new();
    }
    (start..=end).collect()
}
