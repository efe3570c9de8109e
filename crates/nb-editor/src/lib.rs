pub mod config;
pub mod error;
pub mod fs;
pub mod service;
pub mod sync;

pub use config::SyncConfig;
pub use error::SyncError;
pub use fs::{FileEvent, FileEventKind, FileSystem, LocalFs, MemoryFs, WatchGuard};
pub use service::{CodeGenerationService, GeneratedCode, ParsedFile};
pub use sync::{ProjectState, SyncCoordinator, SyncEvent, SyncStatus};
