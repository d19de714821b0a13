// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Functional tests for scan job admission control.
//!
//! These tests drive the public admission API against an in-memory job set
//! WITHOUT requiring a live Kubernetes cluster. The fake cluster implements
//! the same filtering semantics as a label-selected, optionally namespaced
//! list query.
//!
//! ```bash
//! # Run all functional tests
//! cargo test --test functional
//!
//! # Run specific test
//! cargo test --test functional test_admission_fills_slots_in_order
//! ```

mod fake_cluster;
