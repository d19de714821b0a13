//! scan-operator entrypoint.
//!
//! The reconciliation loop that creates scan jobs consumes the admission
//! checks in-process. This binary wires them to observability: it
//! periodically snapshots the operator ConfigMap and logs the capacity
//! decision for both job classes.

use std::time::Duration;

use k8s_openapi::api::core::v1::ConfigMap;
use kube::{Api, Client};
use tokio::signal;
use tracing::{debug, error, info};

use scan_operator::config::{ConfigData, OperatorConfig};
use scan_operator::jobs::LimitChecker;
use scan_operator::{Error, Result};

/// Name of the ConfigMap holding mutable operator settings
const OPERATOR_CONFIGMAP: &str = "scan-operator-config";

/// Interval between capacity reports
const REPORT_INTERVAL_SECS: u64 = 30;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scan_operator=info".parse()?)
                .add_directive("kube=info".parse()?),
        )
        .json()
        .init();

    info!("Starting scan-operator");

    let config = OperatorConfig::from_env()?;

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!(namespace = %config.namespace, "Connected to Kubernetes cluster");

    let configmaps: Api<ConfigMap> = Api::namespaced(client.clone(), &config.namespace);

    let mut interval = tokio::time::interval(Duration::from_secs(REPORT_INTERVAL_SECS));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = report_capacity(&client, &configmaps, &config).await {
                    error!(error = %e, "Capacity check failed");
                }
            }
            _ = &mut shutdown => {
                info!("Received shutdown signal, shutting down");
                break;
            }
        }
    }

    info!("Operator stopped");
    Ok(())
}

/// Run both admission checks against a fresh ConfigMap snapshot and log
/// the decisions.
async fn report_capacity(
    client: &Client,
    configmaps: &Api<ConfigMap>,
    config: &OperatorConfig,
) -> Result<()> {
    // Re-read the mutable configuration on every check so the
    // namespace-scope policy reflects the current ConfigMap.
    let config_data = match configmaps.get(OPERATOR_CONFIGMAP).await {
        Ok(configmap) => ConfigData::from_configmap(&configmap),
        Err(e) => {
            let err = Error::from(e);
            if err.is_not_found() {
                debug!(
                    configmap = OPERATOR_CONFIGMAP,
                    "Operator ConfigMap not found, using defaults"
                );
                ConfigData::new()
            } else {
                return Err(err);
            }
        }
    };

    let checker = LimitChecker::new(client.clone(), config.clone(), config_data);

    let scan = checker.check_scan_jobs().await?;
    info!(
        limit_exceeded = scan.limit_exceeded,
        free_slots = ?scan.free_slots,
        "Scan job capacity"
    );

    let collectors = checker.check_node_collector_jobs().await?;
    info!(
        limit_exceeded = collectors.limit_exceeded,
        running = collectors.running_count,
        "Node collector capacity"
    );

    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
///
/// Note: Signal handler setup failures are fatal - the operator cannot shut
/// down gracefully without them. Using expect() here is intentional.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
