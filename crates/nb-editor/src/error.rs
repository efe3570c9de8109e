use nb_core::{CodegenError, ComponentId};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("component {0} is not registered")]
    ComponentNotFound(ComponentId),

    #[error("component {0} is already registered")]
    DuplicateComponent(ComponentId),

    #[error("no source file contains component {0}")]
    OwnerNotFound(ComponentId),

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SyncError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
