//! Operator configuration.
//!
//! `OperatorConfig` carries install-time settings read from the environment
//! at startup. `ConfigData` mirrors the `data` section of the operator's
//! ConfigMap, which can change while the operator runs; checks take a fresh
//! snapshot of it so the namespace-scope policy always reflects the current
//! configuration.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ConfigMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// ConfigMap key controlling whether scan jobs run alongside their
/// workloads instead of in the operator namespace
pub const KEY_VULNERABILITY_SCANS_IN_SAME_NAMESPACE: &str =
    "vulnerabilityReports.scanJobsInSameNamespace";

const ENV_NAMESPACE: &str = "OPERATOR_NAMESPACE";
const ENV_SCAN_JOBS_LIMIT: &str = "OPERATOR_CONCURRENT_SCAN_JOBS_LIMIT";
const ENV_NODE_COLLECTOR_LIMIT: &str = "OPERATOR_CONCURRENT_NODE_COLLECTOR_LIMIT";

/// Install-time operator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Namespace the operator runs in
    pub namespace: String,
    /// Maximum number of concurrently running scan jobs (slot pool size)
    pub concurrent_scan_jobs_limit: usize,
    /// Maximum number of concurrently running node-info-collector jobs
    pub concurrent_node_collector_limit: usize,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            namespace: "scan-operator".to_string(),
            concurrent_scan_jobs_limit: 10,
            concurrent_node_collector_limit: 1,
        }
    }
}

impl OperatorConfig {
    /// Load configuration from the environment.
    ///
    /// Unset variables fall back to defaults; variables that are set but
    /// not parseable are a configuration error rather than a silent
    /// fallback.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            namespace: std::env::var(ENV_NAMESPACE).unwrap_or(defaults.namespace),
            concurrent_scan_jobs_limit: limit_from_env(
                ENV_SCAN_JOBS_LIMIT,
                defaults.concurrent_scan_jobs_limit,
            )?,
            concurrent_node_collector_limit: limit_from_env(
                ENV_NODE_COLLECTOR_LIMIT,
                defaults.concurrent_node_collector_limit,
            )?,
        })
    }
}

fn limit_from_env(var: &str, default: usize) -> Result<usize> {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            Error::Config(format!("{var} must be a non-negative integer, got '{raw}'"))
        }),
        Err(_) => Ok(default),
    }
}

/// Snapshot of the mutable operator configuration.
///
/// Keys and values mirror the operator ConfigMap verbatim; accessors
/// interpret individual keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigData(BTreeMap<String, String>);

impl ConfigData {
    /// Empty configuration; all accessors return their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the `data` section of the operator ConfigMap.
    pub fn from_configmap(configmap: &ConfigMap) -> Self {
        Self(configmap.data.clone().unwrap_or_default())
    }

    /// Set a configuration key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Whether vulnerability scan jobs run in the same namespace as their
    /// workloads. When false (the default), scan jobs run only in the
    /// operator namespace and job queries are restricted accordingly.
    pub fn vulnerability_scan_jobs_in_same_namespace(&self) -> bool {
        self.0
            .get(KEY_VULNERABILITY_SCANS_IN_SAME_NAMESPACE)
            .is_some_and(|v| v == "true")
    }
}
