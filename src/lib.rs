//! scan-operator library crate
//!
//! Admission control for scan workloads managed by the operator: bounded
//! concurrency checks for vulnerability-report scan jobs (slot-based) and
//! node-info-collector jobs (count-based).

pub mod config;
pub mod error;
pub mod jobs;
pub mod labels;

pub use config::{ConfigData, OperatorConfig};
pub use error::{Error, Result};
pub use jobs::{JobLister, LimitChecker, NodeCollectorCheck, ScanJobsCheck};

use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;

/// Create namespaced or cluster-wide API based on scope
pub fn scoped_api<T>(client: Client, namespace: Option<&str>) -> Api<T>
where
    T: Resource<Scope = k8s_openapi::NamespaceResourceScope>,
    <T as Resource>::DynamicType: Default,
    T: Clone + DeserializeOwned + std::fmt::Debug,
{
    match namespace {
        Some(ns) => Api::namespaced(client, ns),
        None => Api::all(client),
    }
}
