//! File system collaborator.
//!
//! The coordinator only talks to the disk through `FileSystem`, so the same
//! sync logic runs against the real file system (`LocalFs`, watched with
//! `notify`) or an in-memory project (`MemoryFs`).

use async_trait::async_trait;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileEventKind {
    Add,
    Change,
    Unlink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub path: PathBuf,
    pub kind: FileEventKind,
}

impl FileEvent {
    pub fn new(path: impl Into<PathBuf>, kind: FileEventKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Keeps a watch subscription alive; dropping it ends the subscription.
pub struct WatchGuard {
    _inner: Box<dyn Send>,
}

impl WatchGuard {
    pub fn new(inner: impl Send + 'static) -> Self {
        Self {
            _inner: Box::new(inner),
        }
    }
}

impl fmt::Debug for WatchGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WatchGuard")
    }
}

#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn read_file(&self, path: &Path) -> io::Result<String>;
    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
    async fn exists(&self, path: &Path) -> bool;
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Deliver change events under `root` to `tx` until the guard drops.
    fn watch(&self, root: &Path, tx: UnboundedSender<FileEvent>) -> io::Result<WatchGuard>;
}

// ─── Local disk ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    async fn read_file(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    fn watch(&self, root: &Path, tx: UnboundedSender<FileEvent>) -> io::Result<WatchGuard> {
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    for file_event in translate(event) {
                        if tx.send(file_event).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => log::warn!("file watcher error: {err}"),
            }
        })
        .map_err(io::Error::other)?;
        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(io::Error::other)?;
        log::info!("watching {}", root.display());
        Ok(WatchGuard::new(watcher))
    }
}

/// Map a notify event onto add/change/unlink, one per affected path.
fn translate(event: Event) -> Vec<FileEvent> {
    let kind = match event.kind {
        EventKind::Create(_) => FileEventKind::Add,
        EventKind::Modify(_) => FileEventKind::Change,
        EventKind::Remove(_) => FileEventKind::Unlink,
        _ => return Vec::new(),
    };
    event
        .paths
        .into_iter()
        .map(|path| FileEvent { path, kind })
        .collect()
}

// ─── In memory ───────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryInner {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    writes: usize,
    watchers: Vec<(PathBuf, UnboundedSender<FileEvent>)>,
}

impl MemoryInner {
    fn notify(&mut self, event: &FileEvent) {
        self.watchers.retain(|(_, tx)| !tx.is_closed());
        for (root, tx) in &self.watchers {
            if event.path.starts_with(root) {
                let _ = tx.send(event.clone());
            }
        }
    }

    fn store(&mut self, path: &Path, contents: &str) -> FileEvent {
        let kind = match self.files.insert(path.to_path_buf(), contents.to_string()) {
            Some(_) => FileEventKind::Change,
            None => FileEventKind::Add,
        };
        FileEvent::new(path, kind)
    }
}

/// In-memory project tree. Writes through the trait count toward
/// `write_count` and notify watchers like a real disk would.
#[derive(Default)]
pub struct MemoryFs {
    inner: Mutex<MemoryInner>,
}

impl fmt::Debug for MemoryFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("MemoryFs")
            .field("files", &inner.files.keys().collect::<Vec<_>>())
            .field("writes", &inner.writes)
            .finish()
    }
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a file without counting a write or notifying watchers.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.lock().files.insert(path.into(), contents.into());
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Simulate another program saving a file.
    pub fn external_write(&self, path: impl AsRef<Path>, contents: &str) {
        let mut inner = self.lock();
        let event = inner.store(path.as_ref(), contents);
        inner.notify(&event);
    }

    /// Simulate another program deleting a file.
    pub fn external_remove(&self, path: impl AsRef<Path>) {
        let mut inner = self.lock();
        if inner.files.remove(path.as_ref()).is_some() {
            inner.notify(&FileEvent::new(path.as_ref(), FileEventKind::Unlink));
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}

#[async_trait]
impl FileSystem for MemoryFs {
    async fn read_file(&self, path: &Path) -> io::Result<String> {
        self.get(path).ok_or_else(|| not_found(path))
    }

    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut inner = self.lock();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !inner.dirs.contains(parent)
            && !inner.files.keys().any(|f| f.starts_with(parent))
        {
            return Err(not_found(parent));
        }
        inner.writes += 1;
        let event = inner.store(path, contents);
        inner.notify(&event);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        let inner = self.lock();
        inner.files.contains_key(path) || inner.dirs.contains(path)
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.lock();
        for dir in path.ancestors().filter(|d| !d.as_os_str().is_empty()) {
            inner.dirs.insert(dir.to_path_buf());
        }
        Ok(())
    }

    fn watch(&self, root: &Path, tx: UnboundedSender<FileEvent>) -> io::Result<WatchGuard> {
        self.lock().watchers.push((root.to_path_buf(), tx));
        Ok(WatchGuard::new(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn memory_writes_notify_watchers() {
        let fs = MemoryFs::new().with_file("/p/src/a.tsx", "a");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _guard = fs.watch(Path::new("/p"), tx).unwrap();

        fs.write_file(Path::new("/p/src/a.tsx"), "b").await.unwrap();
        fs.external_write("/p/src/b.tsx", "new");
        fs.external_remove("/p/src/a.tsx");
        fs.external_write("/elsewhere/c.tsx", "ignored");

        assert_eq!(rx.recv().await, Some(FileEvent::new("/p/src/a.tsx", FileEventKind::Change)));
        assert_eq!(rx.recv().await, Some(FileEvent::new("/p/src/b.tsx", FileEventKind::Add)));
        assert_eq!(rx.recv().await, Some(FileEvent::new("/p/src/a.tsx", FileEventKind::Unlink)));
        assert!(rx.try_recv().is_err());
        assert_eq!(fs.write_count(), 1);
    }

    #[tokio::test]
    async fn memory_write_needs_parent_dir() {
        let fs = MemoryFs::new();
        let path = Path::new("/p/components/Card.tsx");
        assert!(fs.write_file(path, "x").await.is_err());

        fs.create_dir_all(Path::new("/p/components")).await.unwrap();
        fs.write_file(path, "x").await.unwrap();
        assert!(fs.exists(path).await);
        assert!(fs.exists(Path::new("/p")).await);
        assert_eq!(fs.read_file(path).await.unwrap(), "x");
    }

    #[test]
    fn notify_kinds_translate() {
        use notify::event::{CreateKind, ModifyKind, RemoveKind};

        let event = |kind| Event::new(kind).add_path(PathBuf::from("/p/x.tsx"));
        assert_eq!(
            translate(event(EventKind::Create(CreateKind::File)))[0].kind,
            FileEventKind::Add
        );
        assert_eq!(
            translate(event(EventKind::Modify(ModifyKind::Any)))[0].kind,
            FileEventKind::Change
        );
        assert_eq!(
            translate(event(EventKind::Remove(RemoveKind::File)))[0].kind,
            FileEventKind::Unlink
        );
        assert!(translate(event(EventKind::Access(notify::event::AccessKind::Any))).is_empty());
    }
}
