use std::sync::Arc;

pub mod conf;
pub mod config;
pub mod errors;
pub mod logging;
pub mod package;
pub mod platform;
pub mod reconcile;
pub mod supervisor;

use errors::ApplyError;
use package::PackageInstaller;
use platform::PlatformFamily;
use reconcile::{ReconcileOutcome, Reconciler};

/// Wires the collaborators together: ensure the sentinel package is present,
/// then run one reconciliation pass over the declared monitors.
pub struct SentinelManager {
    platform: PlatformFamily,
    installer: Arc<dyn PackageInstaller>,
    reconciler: Reconciler,
}

impl SentinelManager {
    pub fn new(
        platform: PlatformFamily,
        installer: Arc<dyn PackageInstaller>,
        reconciler: Reconciler,
    ) -> Self {
        Self {
            platform,
            installer,
            reconciler,
        }
    }

    pub async fn apply(
        &self,
        specs: &[conf::monitor::MonitorSpec],
    ) -> Result<ReconcileOutcome, ApplyError> {
        self.installer
            .ensure_installed(self.platform.package_name())
            .await?;
        let outcome = self.reconciler.run(specs).await?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::conf::assemble::DEFAULT_HEADER;
    use crate::conf::monitor::{CanFailover, MonitorSpec};
    use crate::errors::{ApplyError, InstallError, SignalError};
    use crate::package::PackageInstaller;
    use crate::platform::PlatformFamily;
    use crate::reconcile::{ReconcileOutcome, Reconciler};
    use crate::supervisor::ReloadNotifier;

    use super::SentinelManager;

    #[derive(Default)]
    struct RecordingInstaller {
        requested: std::sync::Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl PackageInstaller for RecordingInstaller {
        async fn ensure_installed(&self, package: &str) -> Result<(), InstallError> {
            if self.fail {
                return Err(InstallError::Failed {
                    package: package.to_string(),
                    command: "apt-get".to_string(),
                    status: 100,
                });
            }
            self.requested
                .lock()
                .expect("lock poisoned")
                .push(package.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReloadNotifier for CountingNotifier {
        async fn notify_changed(&self) -> Result<(), SignalError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn spec(name: &str) -> MonitorSpec {
        MonitorSpec {
            name: name.to_string(),
            host: "10.0.0.5".to_string(),
            port: 6379,
            quorum: 2,
            down_after_milliseconds: 30_000,
            failover_timeout_ms: 180_000,
            can_failover: CanFailover::Flag(true),
            parallel_syncs: 1,
        }
    }

    fn manager(
        dir: &TempDir,
        installer: Arc<RecordingInstaller>,
    ) -> (SentinelManager, Arc<CountingNotifier>) {
        let notifier = Arc::new(CountingNotifier::default());
        let reconciler = Reconciler::new(
            dir.path().join("sentinel.conf"),
            DEFAULT_HEADER,
            notifier.clone(),
        );
        (
            SentinelManager::new(PlatformFamily::Debian, installer, reconciler),
            notifier,
        )
    }

    #[tokio::test]
    async fn installs_the_platform_package_then_reconciles() {
        let dir = TempDir::new().expect("temp dir");
        let installer = Arc::new(RecordingInstaller::default());
        let (manager, notifier) = manager(&dir, installer.clone());

        let outcome = manager.apply(&[spec("mymaster")]).await.expect("apply");

        assert_eq!(outcome, ReconcileOutcome::Applied);
        assert_eq!(
            *installer.requested.lock().expect("lock poisoned"),
            vec!["redis-sentinel".to_string()]
        );
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn install_failure_aborts_before_reconciliation() {
        let dir = TempDir::new().expect("temp dir");
        let installer = Arc::new(RecordingInstaller {
            requested: std::sync::Mutex::new(Vec::new()),
            fail: true,
        });
        let (manager, notifier) = manager(&dir, installer);

        let error = manager
            .apply(&[spec("mymaster")])
            .await
            .expect_err("expected install failure");

        assert!(matches!(error, ApplyError::Install(_)));
        assert!(!dir.path().join("sentinel.conf").exists());
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }
}
