//! Bounded-concurrency admission control for managed jobs.
//!
//! ## Module Structure
//!
//! - [`slots`]: the slot pool model and the job-name format/parse pair
//! - [`limit_checker`]: admission checks against live cluster job state

pub mod limit_checker;
pub mod slots;

// Re-export commonly used types
pub use limit_checker::{JobLister, LimitChecker, NodeCollectorCheck, ScanJobsCheck};
pub use slots::{SCAN_JOB_NAME_PREFIX, extract_slot, scan_job_name, slot_pool};
