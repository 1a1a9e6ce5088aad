//! The reconciliation pass
//!
//! validate → render → assemble → diff → write → signal. The first three
//! stages are pure; the file is written whole (temp file renamed into place)
//! and the supervisor is signalled only when the assembled content actually
//! changed, so repeated passes over the same declarations are no-ops.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::conf::assemble::{assemble, content_changed, fragment_set};
use crate::conf::monitor::{validate_set, MonitorSpec};
use crate::conf::render::render;
use crate::errors::{PersistenceError, ReconcileError};
use crate::supervisor::ReloadNotifier;

/// Terminal state of a successful pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Persisted content already matched; nothing written, nothing signalled.
    Unchanged,
    /// New content written and the supervisor notified once.
    Applied,
}

pub struct Reconciler {
    conf_path: PathBuf,
    header: String,
    notifier: Arc<dyn ReloadNotifier>,
}

impl Reconciler {
    pub fn new(
        conf_path: impl Into<PathBuf>,
        header: impl Into<String>,
        notifier: Arc<dyn ReloadNotifier>,
    ) -> Self {
        Self {
            conf_path: conf_path.into(),
            header: header.into(),
            notifier,
        }
    }

    pub async fn run(&self, specs: &[MonitorSpec]) -> Result<ReconcileOutcome, ReconcileError> {
        let validated = validate_set(specs).map_err(ReconcileError::Rejected)?;
        let fragments = fragment_set(validated.iter().map(render));
        let next = assemble(&self.header, &fragments);

        let previous = read_current(&self.conf_path).await?;
        if !content_changed(previous.as_deref(), &next) {
            debug!(
                path = %self.conf_path.display(),
                monitors = fragments.len(),
                "configuration unchanged"
            );
            return Ok(ReconcileOutcome::Unchanged);
        }

        write_atomically(&self.conf_path, &next).await?;
        info!(
            path = %self.conf_path.display(),
            monitors = fragments.len(),
            "configuration updated"
        );

        self.notifier.notify_changed().await?;
        Ok(ReconcileOutcome::Applied)
    }
}

async fn read_current(path: &Path) -> Result<Option<String>, PersistenceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(PersistenceError {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Writes the complete content to a sibling temp file, then renames it over
/// the managed path so an external observer never sees a partial file.
async fn write_atomically(path: &Path, content: &str) -> Result<(), PersistenceError> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let persistence_error = |source: io::Error| PersistenceError {
        path: path.to_path_buf(),
        source,
    };

    tokio::fs::write(&tmp_path, content)
        .await
        .map_err(persistence_error)?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(persistence_error)?;
    Ok(())
}
