//! In-memory cluster state for admission tests.
//!
//! `FakeCluster` holds a mutable set of Jobs and implements [`JobLister`]
//! with the filtering semantics of the real list query: label-selected,
//! optionally restricted to one namespace. Tests mutate the job set
//! between checks to simulate the job-creation side.

use std::collections::BTreeMap;
use std::sync::Mutex;

use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::ErrorResponse;

use scan_operator::jobs::scan_job_name;
use scan_operator::labels::{
    APP_MANAGED_BY, APP_SCAN_OPERATOR, JobClassSelector, LABEL_NODE_INFO_COLLECTOR,
    LABEL_VULNERABILITY_REPORT_SCANNER, SCANNER_NAME,
};
use scan_operator::{Error, JobLister, Result};

/// Simulated live job set.
#[derive(Default)]
pub struct FakeCluster {
    jobs: Mutex<Vec<Job>>,
    fail_lists: bool,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cluster whose list queries always fail with an API error.
    pub fn failing() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            fail_lists: true,
        }
    }

    /// Add a labeled scan job occupying `slot`.
    pub fn add_scan_job(&self, slot: usize, namespace: &str) {
        let mut labels = managed_by_labels();
        labels.insert(
            LABEL_VULNERABILITY_REPORT_SCANNER.to_string(),
            SCANNER_NAME.to_string(),
        );
        self.add_job(&scan_job_name(slot), namespace, Some(labels));
    }

    /// Add a labeled node-info-collector job.
    pub fn add_collector_job(&self, name: &str, namespace: &str) {
        let mut labels = managed_by_labels();
        labels.insert(
            LABEL_NODE_INFO_COLLECTOR.to_string(),
            SCANNER_NAME.to_string(),
        );
        self.add_job(name, namespace, Some(labels));
    }

    /// Add an unmanaged job sharing the namespace.
    pub fn add_unrelated_job(&self, name: &str, namespace: &str) {
        self.add_job(name, namespace, None);
    }

    fn add_job(&self, name: &str, namespace: &str, labels: Option<BTreeMap<String, String>>) {
        let job = Job {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                labels,
                ..Default::default()
            },
            ..Default::default()
        };
        self.jobs.lock().unwrap().push(job);
    }
}

impl JobLister for &FakeCluster {
    async fn list_jobs(
        &self,
        selector: &JobClassSelector,
        namespace: Option<&str>,
    ) -> Result<Vec<Job>> {
        if self.fail_lists {
            return Err(Error::Kube(kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: "injected list failure".to_string(),
                reason: "InternalError".to_string(),
                code: 500,
            })));
        }

        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|job| {
                let labels = job.metadata.labels.clone().unwrap_or_default();
                let in_scope =
                    namespace.map_or(true, |ns| job.metadata.namespace.as_deref() == Some(ns));
                selector.matches(&labels) && in_scope
            })
            .cloned()
            .collect())
    }
}

fn managed_by_labels() -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(APP_MANAGED_BY.to_string(), APP_SCAN_OPERATOR.to_string());
    labels
}
