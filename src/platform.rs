//! Platform family capability probe
//!
//! The core pipeline never detects the operating system itself; it receives a
//! `PlatformFamily` chosen at startup. The `/etc/os-release` probe here is the
//! fallback used when no family is injected through configuration.

use std::fmt;

use crate::errors::UnsupportedPlatformError;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Debian,
    RedHat,
}

impl PlatformFamily {
    pub fn from_name(name: &str) -> Result<Self, UnsupportedPlatformError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debian" => Ok(Self::Debian),
            "redhat" | "rhel" => Ok(Self::RedHat),
            _ => Err(UnsupportedPlatformError {
                family: name.trim().to_string(),
            }),
        }
    }

    /// Package providing the sentinel binary. RedHat ships sentinel inside
    /// the main redis package.
    pub fn package_name(self) -> &'static str {
        match self {
            Self::Debian => "redis-sentinel",
            Self::RedHat => "redis",
        }
    }

    pub fn service_name(self) -> &'static str {
        "redis-sentinel"
    }

    pub fn default_conf_path(self) -> &'static str {
        match self {
            Self::Debian => "/etc/redis/sentinel.conf",
            Self::RedHat => "/etc/redis-sentinel.conf",
        }
    }

    /// Probes the running host by reading `/etc/os-release`.
    pub fn probe() -> Result<Self, UnsupportedPlatformError> {
        let content =
            std::fs::read_to_string(OS_RELEASE_PATH).map_err(|_| UnsupportedPlatformError {
                family: "unknown".to_string(),
            })?;
        Self::from_os_release(&content)
    }

    /// Maps os-release `ID` / `ID_LIKE` values to a supported family.
    pub fn from_os_release(content: &str) -> Result<Self, UnsupportedPlatformError> {
        let mut id = None;
        let mut id_like = None;
        for line in content.lines() {
            if let Some(value) = line.strip_prefix("ID=") {
                id = Some(value.trim_matches('"').to_string());
            } else if let Some(value) = line.strip_prefix("ID_LIKE=") {
                id_like = Some(value.trim_matches('"').to_string());
            }
        }

        let candidates = id
            .iter()
            .map(String::as_str)
            .chain(id_like.iter().flat_map(|value| value.split_whitespace()));
        for candidate in candidates {
            match candidate.to_ascii_lowercase().as_str() {
                "debian" | "ubuntu" => return Ok(Self::Debian),
                "rhel" | "fedora" | "centos" => return Ok(Self::RedHat),
                _ => {}
            }
        }

        Err(UnsupportedPlatformError {
            family: id.unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debian => formatter.write_str("Debian"),
            Self::RedHat => formatter.write_str("RedHat"),
        }
    }
}
