use async_trait::async_trait;
use zbus::{zvariant::OwnedObjectPath, Connection, Proxy};

use crate::errors::SignalError;

/// Service-supervision seam. The reconciler calls this exactly once per pass
/// in which the assembled configuration changed; reload/restart semantics and
/// retries belong to the supervisor, not the core.
#[async_trait]
pub trait ReloadNotifier: Send + Sync {
    async fn notify_changed(&self) -> Result<(), SignalError>;
}

/// Reloads the sentinel unit through systemd's dbus manager interface.
#[derive(Debug)]
pub struct SystemdSupervisor {
    unit: String,
}

impl SystemdSupervisor {
    pub fn new(unit: impl Into<String>) -> Self {
        let mut unit = unit.into();
        if !unit.ends_with(".service") {
            unit.push_str(".service");
        }
        Self { unit }
    }

    fn signal_error(&self, message: impl std::fmt::Display) -> SignalError {
        SignalError {
            unit: self.unit.clone(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl ReloadNotifier for SystemdSupervisor {
    async fn notify_changed(&self) -> Result<(), SignalError> {
        let connection = Connection::system()
            .await
            .map_err(|err| self.signal_error(format!("failed to connect to system dbus: {err}")))?;

        let proxy = Proxy::new(
            &connection,
            "org.freedesktop.systemd1",
            "/org/freedesktop/systemd1",
            "org.freedesktop.systemd1.Manager",
        )
        .await
        .map_err(|err| {
            self.signal_error(format!("failed to create systemd dbus proxy: {err}"))
        })?;

        let _job: OwnedObjectPath = proxy
            .call("ReloadOrRestartUnit", &(self.unit.as_str(), "replace"))
            .await
            .map_err(|err| self.signal_error(format!("reload request rejected: {err}")))?;

        tracing::info!(unit = %self.unit, "requested sentinel reload");
        Ok(())
    }
}
