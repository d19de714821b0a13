//! Well-known labels identifying jobs managed by the operator.
//!
//! The label scheme is a contract between the job-creation side and the
//! admission checks: every managed job carries the managed-by label plus
//! one class label naming the job category it belongs to.

use std::collections::BTreeMap;

/// Standard Kubernetes managed-by label key
pub const APP_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Managed-by label value for all resources owned by this operator
pub const APP_SCAN_OPERATOR: &str = "scan-operator";

/// Class label key marking vulnerability-report scan jobs
pub const LABEL_VULNERABILITY_REPORT_SCANNER: &str = "vulnerability-report.scanner";

/// Class label key marking node-info-collector jobs
pub const LABEL_NODE_INFO_COLLECTOR: &str = "node-info.collector";

/// Class label value naming the scanner backing both job classes
pub const SCANNER_NAME: &str = "trivy";

/// Label filter identifying which managed job class a listed job belongs to.
///
/// The two classes use disjoint class label keys, so their selectors never
/// overlap in practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobClassSelector {
    class_key: &'static str,
    class_value: &'static str,
}

impl JobClassSelector {
    /// Selector for vulnerability-report scan jobs
    pub fn vulnerability_scan() -> Self {
        Self {
            class_key: LABEL_VULNERABILITY_REPORT_SCANNER,
            class_value: SCANNER_NAME,
        }
    }

    /// Selector for node-info-collector jobs
    pub fn node_collector() -> Self {
        Self {
            class_key: LABEL_NODE_INFO_COLLECTOR,
            class_value: SCANNER_NAME,
        }
    }

    /// Render as a label selector string for kube list params.
    pub fn to_label_selector(&self) -> String {
        format!(
            "{APP_MANAGED_BY}={APP_SCAN_OPERATOR},{}={}",
            self.class_key, self.class_value
        )
    }

    /// Client-side label match, for listers that filter in memory.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        labels.get(APP_MANAGED_BY).map(String::as_str) == Some(APP_SCAN_OPERATOR)
            && labels.get(self.class_key).map(String::as_str) == Some(self.class_value)
    }
}
