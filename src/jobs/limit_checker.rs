//! Admission checks against live cluster job state.
//!
//! The checker is a point-in-time decision function: it lists the jobs of
//! one class, reduces the result to an admission decision, and retains
//! nothing between calls. It never creates, modifies, or deletes jobs, and
//! it holds no locks; serializing an admission decision with the job
//! creation that follows it is the caller's responsibility (typically by
//! running reconciliation single-threaded per resource).

use std::collections::BTreeSet;
use std::future::Future;

use k8s_openapi::api::batch::v1::Job;
use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::config::{ConfigData, OperatorConfig};
use crate::error::Result;
use crate::labels::JobClassSelector;
use crate::scoped_api;

use super::slots::{extract_slot, slot_pool};

/// Read-only query over the live job set of one class.
///
/// A `namespace` of `None` spans all namespaces. Implementations must not
/// deduplicate or reorder beyond what the underlying query returns.
pub trait JobLister {
    /// List the jobs matching `selector`, optionally restricted to one
    /// namespace.
    fn list_jobs(
        &self,
        selector: &JobClassSelector,
        namespace: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Job>>> + Send;
}

impl JobLister for Client {
    async fn list_jobs(
        &self,
        selector: &JobClassSelector,
        namespace: Option<&str>,
    ) -> Result<Vec<Job>> {
        let api: Api<Job> = scoped_api(self.clone(), namespace);
        let params = ListParams::default().labels(&selector.to_label_selector());
        let jobs = api.list(&params).await?;
        Ok(jobs.items)
    }
}

/// Admission decision for vulnerability-report scan jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanJobsCheck {
    /// True when the count of slot-bearing scan jobs meets or exceeds the
    /// configured limit.
    pub limit_exceeded: bool,
    /// Slots in `[1, N]` not occupied by any listed job, ascending.
    pub free_slots: Vec<usize>,
}

/// Admission decision for node-info-collector jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeCollectorCheck {
    /// True when the running count meets or exceeds the configured limit.
    pub limit_exceeded: bool,
    /// Number of labeled node-info-collector jobs currently listed.
    pub running_count: usize,
}

/// Limit checker over an immutable snapshot of the operator configuration.
///
/// Construct one per decision with freshly fetched [`ConfigData`] so the
/// namespace-scope policy reflects the current configuration.
pub struct LimitChecker<L> {
    lister: L,
    config: OperatorConfig,
    config_data: ConfigData,
}

impl<L: JobLister> LimitChecker<L> {
    /// Create a checker from a job lister and configuration snapshots.
    pub fn new(lister: L, config: OperatorConfig, config_data: ConfigData) -> Self {
        Self {
            lister,
            config,
            config_data,
        }
    }

    /// Namespace restriction for job queries. Scan jobs normally run only
    /// in the operator namespace; when configured to run alongside their
    /// workloads the query spans all namespaces.
    fn list_namespace(&self) -> Option<&str> {
        if self.config_data.vulnerability_scan_jobs_in_same_namespace() {
            None
        } else {
            Some(self.config.namespace.as_str())
        }
    }

    /// Check whether a new vulnerability-report scan job may be admitted.
    ///
    /// Lists the scan jobs of this class, derives the occupied slots from
    /// their names, and returns the free slots alongside the limit
    /// decision. Jobs whose names fall outside the slot pattern are
    /// skipped, not errors. A query failure short-circuits with no partial
    /// result.
    pub async fn check_scan_jobs(&self) -> Result<ScanJobsCheck> {
        let selector = JobClassSelector::vulnerability_scan();
        let jobs = self
            .lister
            .list_jobs(&selector, self.list_namespace())
            .await?;

        let used: Vec<usize> = jobs
            .iter()
            .filter_map(|job| job.metadata.name.as_deref().and_then(extract_slot))
            .collect();
        let used_set: BTreeSet<usize> = used.iter().copied().collect();

        let limit = self.config.concurrent_scan_jobs_limit;
        let free_slots: Vec<usize> = slot_pool(1, limit)
            .into_iter()
            .filter(|slot| !used_set.contains(slot))
            .collect();

        // The limit compares the number of slot-bearing jobs, not the
        // number of distinct slots: duplicate slot numbers stay
        // conservative.
        let check = ScanJobsCheck {
            limit_exceeded: used.len() >= limit,
            free_slots,
        };
        debug!(
            used = used.len(),
            limit,
            free = check.free_slots.len(),
            "Checked scan job capacity"
        );
        Ok(check)
    }

    /// Check whether a new node-info-collector job may be admitted.
    ///
    /// Every job bearing the class labels counts; no name pattern applies
    /// to this class. A query failure short-circuits with no partial
    /// result.
    pub async fn check_node_collector_jobs(&self) -> Result<NodeCollectorCheck> {
        let selector = JobClassSelector::node_collector();
        let jobs = self
            .lister
            .list_jobs(&selector, self.list_namespace())
            .await?;

        let running_count = jobs.len();
        let limit = self.config.concurrent_node_collector_limit;
        debug!(
            running = running_count,
            limit, "Checked node collector capacity"
        );
        Ok(NodeCollectorCheck {
            limit_exceeded: running_count >= limit,
            running_count,
        })
    }
}
