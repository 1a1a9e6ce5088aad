//! Package installation collaborator
//!
//! Ensures the sentinel package exists before the service is touched. The
//! command-backed implementation queries first and only installs on a miss,
//! keeping the operation idempotent.

use async_trait::async_trait;
use tokio::process::Command;

use crate::errors::InstallError;
use crate::platform::PlatformFamily;

#[async_trait]
pub trait PackageInstaller: Send + Sync {
    async fn ensure_installed(&self, package: &str) -> Result<(), InstallError>;
}

#[derive(Debug)]
pub struct CommandInstaller {
    family: PlatformFamily,
}

impl CommandInstaller {
    pub fn new(family: PlatformFamily) -> Self {
        Self { family }
    }
}

fn query_command(family: PlatformFamily, package: &str) -> (&'static str, Vec<String>) {
    match family {
        PlatformFamily::Debian => ("dpkg", vec!["-s".to_string(), package.to_string()]),
        PlatformFamily::RedHat => ("rpm", vec!["-q".to_string(), package.to_string()]),
    }
}

fn install_command(family: PlatformFamily, package: &str) -> (&'static str, Vec<String>) {
    match family {
        PlatformFamily::Debian => (
            "apt-get",
            vec![
                "install".to_string(),
                "-y".to_string(),
                package.to_string(),
            ],
        ),
        PlatformFamily::RedHat => (
            "yum",
            vec![
                "install".to_string(),
                "-y".to_string(),
                package.to_string(),
            ],
        ),
    }
}

#[async_trait]
impl PackageInstaller for CommandInstaller {
    async fn ensure_installed(&self, package: &str) -> Result<(), InstallError> {
        let (program, args) = query_command(self.family, package);
        let query = Command::new(program)
            .args(&args)
            .output()
            .await
            .map_err(|err| InstallError::Spawn {
                package: package.to_string(),
                command: program.to_string(),
                source: err,
            })?;

        if query.status.success() {
            tracing::debug!(package, "package already installed");
            return Ok(());
        }

        let (program, args) = install_command(self.family, package);
        tracing::info!(package, program, "installing package");
        let install = Command::new(program)
            .args(&args)
            .output()
            .await
            .map_err(|err| InstallError::Spawn {
                package: package.to_string(),
                command: program.to_string(),
                source: err,
            })?;

        if !install.status.success() {
            return Err(InstallError::Failed {
                package: package.to_string(),
                command: program.to_string(),
                status: install.status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{install_command, query_command};
    use crate::platform::PlatformFamily;

    #[test]
    fn debian_uses_dpkg_and_apt_get() {
        let (program, args) = query_command(PlatformFamily::Debian, "redis-sentinel");
        assert_eq!(program, "dpkg");
        assert_eq!(args, vec!["-s", "redis-sentinel"]);

        let (program, args) = install_command(PlatformFamily::Debian, "redis-sentinel");
        assert_eq!(program, "apt-get");
        assert_eq!(args, vec!["install", "-y", "redis-sentinel"]);
    }

    #[test]
    fn redhat_uses_rpm_and_yum() {
        let (program, args) = query_command(PlatformFamily::RedHat, "redis");
        assert_eq!(program, "rpm");
        assert_eq!(args, vec!["-q", "redis"]);

        let (program, args) = install_command(PlatformFamily::RedHat, "redis");
        assert_eq!(program, "yum");
        assert_eq!(args, vec!["install", "-y", "redis"]);
    }
}
