//! Monitor stanza rendering
//!
//! Turns a validated declaration into the exact five-line block Sentinel
//! expects. Line order matters: the `sentinel monitor` line establishes the
//! master name the remaining directives refer to.

use std::fmt::Write;

use super::monitor::ValidatedMonitorSpec;

/// Rendered text for one monitor, keyed by the master name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: String,
    pub content: String,
}

pub fn render(spec: &ValidatedMonitorSpec) -> Fragment {
    let mut content = String::new();
    let name = &spec.name;

    // infallible: writing to a String cannot fail
    let _ = writeln!(
        content,
        "sentinel monitor {name} {} {} {}",
        spec.host, spec.port, spec.quorum
    );
    let _ = writeln!(
        content,
        "sentinel down-after-milliseconds {name} {}",
        spec.down_after_milliseconds
    );
    let _ = writeln!(
        content,
        "sentinel failover-timeout {name} {}",
        spec.failover_timeout_ms
    );
    let _ = writeln!(
        content,
        "sentinel can-failover {name} {}",
        if spec.can_failover { "yes" } else { "no" }
    );
    let _ = writeln!(content, "sentinel parallel-syncs {name} {}", spec.parallel_syncs);

    Fragment {
        name: spec.name.clone(),
        content,
    }
}
