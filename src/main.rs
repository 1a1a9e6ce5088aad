use std::sync::Arc;

use sentinel_config_manager::{
    conf::assemble::DEFAULT_HEADER,
    conf::monitor::MonitorSpec,
    config::Config,
    logging,
    package::CommandInstaller,
    reconcile::{ReconcileOutcome, Reconciler},
    supervisor::SystemdSupervisor,
    SentinelManager,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    info!(
        platform = %config.platform,
        conf_path = %config.conf_path.display(),
        service = %config.service_name,
        "starting reconciliation"
    );

    let declarations = tokio::fs::read_to_string(&config.monitors_file).await?;
    let specs: Vec<MonitorSpec> = serde_json::from_str(&declarations)?;

    let installer = Arc::new(CommandInstaller::new(config.platform));
    let supervisor = Arc::new(SystemdSupervisor::new(config.service_name.clone()));
    let reconciler = Reconciler::new(config.conf_path.clone(), DEFAULT_HEADER, supervisor);
    let manager = SentinelManager::new(config.platform, installer, reconciler);

    match manager.apply(&specs).await? {
        ReconcileOutcome::Applied => info!(monitors = specs.len(), "configuration applied"),
        ReconcileOutcome::Unchanged => info!(monitors = specs.len(), "already converged"),
    }

    Ok(())
}
