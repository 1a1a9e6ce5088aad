//! Monitor declaration parsing and validation

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One raw declaration of a Redis master to watch, as supplied by the caller.
///
/// Numeric fields are deliberately wider than their validated counterparts so
/// out-of-range values (port 65536, for instance) survive deserialization and
/// are rejected with a structured error instead of a serde failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSpec {
    pub name: String,
    pub host: String,
    pub port: u32,
    pub quorum: u64,
    #[serde(alias = "down_after_milliseconds")]
    pub down_after_milliseconds: u64,
    #[serde(alias = "failover_timeout")]
    pub failover_timeout_ms: u64,
    #[serde(alias = "can_failover")]
    pub can_failover: CanFailover,
    #[serde(alias = "parallel_syncs")]
    pub parallel_syncs: u64,
}

/// The can-failover flag as declared: either a native boolean or one of the
/// string forms `yes`, `no`, `true`, `false` (any case).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CanFailover {
    Flag(bool),
    Text(String),
}

impl CanFailover {
    fn normalize(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            Self::Text(value) => match value.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" => Some(true),
                "no" | "false" => Some(false),
                _ => None,
            },
        }
    }
}

/// A declaration with every field checked and normalized. Construction goes
/// through [`validate`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMonitorSpec {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub quorum: u64,
    pub down_after_milliseconds: u64,
    pub failover_timeout_ms: u64,
    pub can_failover: bool,
    pub parallel_syncs: u64,
}

/// Checks one declaration, collecting every failing field rather than
/// stopping at the first.
pub fn validate(spec: &MonitorSpec) -> Result<ValidatedMonitorSpec, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = spec.name.trim().to_string();
    if name.is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    let port = match u16::try_from(spec.port) {
        Ok(port) if port >= 1 => Some(port),
        _ => {
            errors.push(ValidationError::InvalidPort {
                name: name.clone(),
                port: spec.port,
            });
            None
        }
    };

    for (field, value) in [
        ("quorum", spec.quorum),
        ("down-after-milliseconds", spec.down_after_milliseconds),
        ("failover-timeout", spec.failover_timeout_ms),
        ("parallel-syncs", spec.parallel_syncs),
    ] {
        if value == 0 {
            errors.push(ValidationError::InvalidNumeric {
                name: name.clone(),
                field,
            });
        }
    }

    let can_failover = match spec.can_failover.normalize() {
        Some(value) => Some(value),
        None => {
            let value = match &spec.can_failover {
                CanFailover::Text(text) => text.clone(),
                CanFailover::Flag(flag) => flag.to_string(),
            };
            errors.push(ValidationError::InvalidBoolean {
                name: name.clone(),
                value,
            });
            None
        }
    };

    match (port, can_failover) {
        (Some(port), Some(can_failover)) if errors.is_empty() => Ok(ValidatedMonitorSpec {
            name,
            host: spec.host.trim().to_string(),
            port,
            quorum: spec.quorum,
            down_after_milliseconds: spec.down_after_milliseconds,
            failover_timeout_ms: spec.failover_timeout_ms,
            can_failover,
            parallel_syncs: spec.parallel_syncs,
        }),
        _ => Err(errors),
    }
}

/// Validates a whole declaration set. Duplicated names are rejected alongside
/// the per-field errors; any failure rejects the entire set.
pub fn validate_set(
    specs: &[MonitorSpec],
) -> Result<Vec<ValidatedMonitorSpec>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut validated = Vec::with_capacity(specs.len());
    let mut seen = HashSet::new();
    let mut reported_duplicates = HashSet::new();

    for spec in specs {
        let name = spec.name.trim().to_string();
        if !name.is_empty() && !seen.insert(name.clone()) && reported_duplicates.insert(name.clone())
        {
            errors.push(ValidationError::DuplicateName { name });
        }

        match validate(spec) {
            Ok(valid) => validated.push(valid),
            Err(mut spec_errors) => errors.append(&mut spec_errors),
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}
