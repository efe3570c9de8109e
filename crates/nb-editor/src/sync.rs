//! Project sync coordinator: canvas ↔ source files.
//!
//! The coordinator owns the authoritative `ProjectState` for one open
//! project and is the only sanctioned path for mutating it:
//!
//! - **Canvas → Source**: `add_component`, `update_component` and
//!   `remove_component` compute new source through `CodeGenerationService`,
//!   write it, and only after the write succeeds record the change in state
//!   and broadcast a `SyncEvent`. A failed step leaves state untouched.
//!
//! - **Source → Canvas**: file-watch events (or `sync_file`) re-read the
//!   file, re-extract its marked components and reconcile them into state,
//!   keeping canvas-only data such as positions.
//!
//! Writes and re-syncs of one file are serialized by a per-path lock, so two
//! overlapping mutations of the same file never lose each other's edits.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::fs::{FileEventKind, FileSystem, WatchGuard};
use crate::service::{CodeGenerationService, GeneratedCode};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use nb_core::{ComponentId, ComponentNode, ComponentUpdate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError, Weak};
use tokio::sync::{Mutex, OwnedMutexGuard, broadcast, mpsc};
use tokio::task::JoinHandle;

// ─── State ───────────────────────────────────────────────────────────────

/// Snapshot of an open project. Readers always get a clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectState {
    pub root: PathBuf,
    /// Top-level components; nested ones live in their parent's `children`.
    pub components: IndexMap<ComponentId, ComponentNode>,
    /// Last known contents of every synced file.
    pub files: BTreeMap<PathBuf, String>,
    /// Which file each component (nested ones included) lives in.
    pub owners: HashMap<ComponentId, PathBuf>,
    pub last_sync: DateTime<Utc>,
}

impl ProjectState {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            components: IndexMap::new(),
            files: BTreeMap::new(),
            owners: HashMap::new(),
            last_sync: Utc::now(),
        }
    }

    pub fn component(&self, id: ComponentId) -> Option<&ComponentNode> {
        self.components.values().find_map(|c| c.find(id))
    }

    fn component_mut(&mut self, id: ComponentId) -> Option<&mut ComponentNode> {
        self.components.values_mut().find_map(|c| c.find_mut(id))
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.component(id).is_some()
    }

    /// Detach a component (top-level or nested) with its subtree.
    fn remove(&mut self, id: ComponentId) -> Option<ComponentNode> {
        if let Some(node) = self.components.shift_remove(&id) {
            return Some(node);
        }
        self.components
            .values_mut()
            .find_map(|c| c.remove_descendant(id))
    }

    /// Owning file: recorded provenance first, then a scan of file
    /// snapshots for the marker. The scan is linear in total source size.
    pub fn owner_of(&self, id: ComponentId, marker_attribute: &str) -> Option<PathBuf> {
        if let Some(path) = self.owners.get(&id) {
            return Some(path.clone());
        }
        let needle = format!("{marker_attribute}=\"{id}\"");
        self.files
            .iter()
            .find(|(_, text)| text.contains(&needle))
            .map(|(path, _)| path.clone())
    }

    fn touch(&mut self) {
        self.last_sync = Utc::now();
    }
}

// ─── Events ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SyncEvent {
    ComponentAdded {
        component: ComponentNode,
        path: PathBuf,
    },
    ComponentUpdated {
        component: ComponentNode,
        /// `None` when the update touched canvas-only fields.
        path: Option<PathBuf>,
    },
    ComponentRemoved {
        id: ComponentId,
        path: PathBuf,
    },
    FileChanged {
        path: PathBuf,
        components: Vec<ComponentNode>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Watching,
}

// ─── Coordinator ─────────────────────────────────────────────────────────

struct ActiveWatch {
    _guard: WatchGuard,
    task: JoinHandle<()>,
}

struct Inner {
    fs: Arc<dyn FileSystem>,
    service: CodeGenerationService,
    config: SyncConfig,
    state: Mutex<ProjectState>,
    file_locks: StdMutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
    /// Ids claimed by adds that have not committed yet.
    pending: StdMutex<HashSet<ComponentId>>,
    events: broadcast::Sender<SyncEvent>,
    watch: StdMutex<Option<ActiveWatch>>,
}

/// Cheap to clone; clones share one project.
#[derive(Clone)]
pub struct SyncCoordinator {
    inner: Arc<Inner>,
}

fn lock_std<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Claim on ids for one in-flight add; released on drop, after the add
/// has committed to state or failed.
struct Reservation<'a> {
    pending: &'a StdMutex<HashSet<ComponentId>>,
    ids: Vec<ComponentId>,
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        let mut pending = lock_std(self.pending);
        for id in &self.ids {
            pending.remove(id);
        }
    }
}

impl SyncCoordinator {
    pub fn new(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>, config: SyncConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let service = CodeGenerationService::new(fs.clone(), config.jsx_style());
        Self {
            inner: Arc::new(Inner {
                fs,
                service,
                state: Mutex::new(ProjectState::new(root)),
                config,
                file_locks: StdMutex::new(HashMap::new()),
                pending: StdMutex::new(HashSet::new()),
                events,
                watch: StdMutex::new(None),
            }),
        }
    }

    /// Load the project's config and import the default target if present.
    pub async fn open(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Result<Self, SyncError> {
        let root = root.into();
        let config = SyncConfig::load(fs.as_ref(), &root).await?;
        let coordinator = Self::new(root, fs, config);
        let target = coordinator.default_target().await;
        if coordinator.inner.fs.exists(&target).await {
            coordinator.sync_file(&target).await?;
        }
        Ok(coordinator)
    }

    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    pub fn service(&self) -> &CodeGenerationService {
        &self.inner.service
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.inner.events.subscribe()
    }

    /// Top-level components, cloned.
    pub async fn get_components(&self) -> Vec<ComponentNode> {
        self.inner.state.lock().await.components.values().cloned().collect()
    }

    pub async fn get_component(&self, id: ComponentId) -> Option<ComponentNode> {
        self.inner.state.lock().await.component(id).cloned()
    }

    pub async fn get_project_state(&self) -> ProjectState {
        self.inner.state.lock().await.clone()
    }

    async fn default_target(&self) -> PathBuf {
        let root = self.inner.state.lock().await.root.clone();
        root.join(&self.inner.config.default_target)
    }

    async fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.inner.state.lock().await.root.join(path)
        }
    }

    /// Fail if any id in `node` is registered, claimed by another add in
    /// flight, or repeated within `node` itself.
    async fn reserve(&self, node: &ComponentNode) -> Result<Reservation<'_>, SyncError> {
        let ids = node.ids();
        let state = self.inner.state.lock().await;
        let mut pending = lock_std(&self.inner.pending);
        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(dup) = ids
            .iter()
            .copied()
            .find(|id| state.contains(*id) || pending.contains(id) || !seen.insert(*id))
        {
            return Err(SyncError::DuplicateComponent(dup));
        }
        pending.extend(ids.iter().copied());
        Ok(Reservation {
            pending: &self.inner.pending,
            ids,
        })
    }

    async fn lock_file(&self, path: &Path) -> OwnedMutexGuard<()> {
        let lock = lock_std(&self.inner.file_locks)
            .entry(path.to_path_buf())
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    async fn write(&self, generated: &GeneratedCode) -> Result<(), SyncError> {
        self.inner
            .fs
            .write_file(&generated.path, &generated.code)
            .await
            .map_err(|e| SyncError::io("write", &generated.path, e))
    }

    fn emit(&self, event: SyncEvent) {
        if self.inner.events.send(event).is_err() {
            log::trace!("no sync event subscribers");
        }
    }

    // ─── Canvas → Source ─────────────────────────────────────────────────

    /// Insert `node` into `target_file` (default: the configured target,
    /// `src/app/page.tsx`) and register it.
    pub async fn add_component(
        &self,
        node: ComponentNode,
        target_file: Option<&Path>,
    ) -> Result<(), SyncError> {
        self.add_component_at(node, target_file, None).await
    }

    /// Like `add_component`, with an element-child path from the root JSX
    /// element selecting the parent.
    pub async fn add_component_at(
        &self,
        node: ComponentNode,
        target_file: Option<&Path>,
        target_path: Option<&[usize]>,
    ) -> Result<(), SyncError> {
        let file = match target_file {
            Some(path) => self.resolve(path).await,
            None => self.default_target().await,
        };

        let _reservation = self.reserve(&node).await?;

        let _file_lock = self.lock_file(&file).await;
        let generated = self
            .inner
            .service
            .insert_component(&file, &node, target_path)
            .await
            .inspect_err(|e| log::warn!("add {}: {e}", node.id))?;
        self.write(&generated).await?;

        let mut state = self.inner.state.lock().await;
        for id in node.ids() {
            state.owners.insert(id, file.clone());
        }
        state.files.insert(file.clone(), generated.code);
        state.components.insert(node.id, node.clone());
        state.touch();
        drop(state);

        log::info!("added {} to {}", node.id, file.display());
        self.emit(SyncEvent::ComponentAdded {
            component: node,
            path: file,
        });
        Ok(())
    }

    /// Merge `update` into a registered component. Prop changes are written
    /// to its owning file first; name/position-only updates stay in state.
    pub async fn update_component(
        &self,
        id: ComponentId,
        update: ComponentUpdate,
    ) -> Result<(), SyncError> {
        let owner = {
            let state = self.inner.state.lock().await;
            if !state.contains(id) {
                return Err(SyncError::ComponentNotFound(id));
            }
            if update.touches_source() {
                let marker = &self.inner.config.marker_attribute;
                Some(state.owner_of(id, marker).ok_or(SyncError::OwnerNotFound(id))?)
            } else {
                None
            }
        };

        let mut written = None;
        let _file_lock = match &owner {
            Some(file) => Some(self.lock_file(file).await),
            None => None,
        };
        if let (Some(file), Some(props)) = (&owner, &update.props) {
            let generated = self
                .inner
                .service
                .update_component_props(file, id, props)
                .await
                .inspect_err(|e| log::warn!("update {id}: {e}"))?;
            self.write(&generated).await?;
            written = Some(generated);
        }

        let mut state = self.inner.state.lock().await;
        let Some(node) = state.component_mut(id) else {
            return Err(SyncError::ComponentNotFound(id));
        };
        update.apply_to(node);
        let component = node.clone();
        if let Some(generated) = written {
            state.owners.insert(id, generated.path.clone());
            state.files.insert(generated.path, generated.code);
        }
        state.touch();
        drop(state);

        self.emit(SyncEvent::ComponentUpdated {
            component,
            path: owner,
        });
        Ok(())
    }

    /// Delete a component and its subtree from its owning file and state.
    pub async fn remove_component(&self, id: ComponentId) -> Result<(), SyncError> {
        let file = {
            let state = self.inner.state.lock().await;
            if !state.contains(id) {
                return Err(SyncError::ComponentNotFound(id));
            }
            state
                .owner_of(id, &self.inner.config.marker_attribute)
                .ok_or(SyncError::OwnerNotFound(id))?
        };

        let _file_lock = self.lock_file(&file).await;
        let generated = self
            .inner
            .service
            .remove_component(&file, id)
            .await
            .inspect_err(|e| log::warn!("remove {id}: {e}"))?;
        self.write(&generated).await?;

        let mut state = self.inner.state.lock().await;
        if let Some(removed) = state.remove(id) {
            for gone in removed.ids() {
                state.owners.remove(&gone);
            }
        }
        state.files.insert(file.clone(), generated.code);
        state.touch();
        drop(state);

        log::info!("removed {id} from {}", file.display());
        self.emit(SyncEvent::ComponentRemoved { id, path: file });
        Ok(())
    }

    // ─── Source → Canvas ─────────────────────────────────────────────────

    /// Import (or re-import) one file's components.
    pub async fn sync_file(&self, path: &Path) -> Result<(), SyncError> {
        self.handle_file_change(path, FileEventKind::Change).await
    }

    /// React to an external change of `path`.
    ///
    /// `Add`/`Change` re-extract the file's marked components: ones that
    /// disappeared are dropped, the rest are upserted keeping their stored
    /// name and position. `Unlink` forgets the file and its components. On a
    /// parse error the previous state is kept.
    pub async fn handle_file_change(
        &self,
        path: &Path,
        kind: FileEventKind,
    ) -> Result<(), SyncError> {
        let path = self.resolve(path).await;
        let _file_lock = self.lock_file(&path).await;

        let extracted = match kind {
            FileEventKind::Unlink => {
                let mut state = self.inner.state.lock().await;
                state.files.remove(&path);
                drop_owned_by(&mut state, &path, &[]);
                state.touch();
                Vec::new()
            }
            FileEventKind::Add | FileEventKind::Change => {
                let source = self.inner.service.read(&path).await?;
                let mut extracted =
                    nb_core::extract_components(&source, self.inner.service.style())
                        .inspect_err(|e| log::warn!("keeping last state of {}: {e}", path.display()))?;

                let mut state = self.inner.state.lock().await;
                for node in &mut extracted {
                    carry_over(node, &state);
                }
                let present: Vec<ComponentId> = extracted.iter().flat_map(|n| n.ids()).collect();
                drop_owned_by(&mut state, &path, &present);
                for node in &extracted {
                    state.remove(node.id);
                    for id in node.ids() {
                        state.owners.insert(id, path.clone());
                    }
                    state.components.insert(node.id, node.clone());
                }
                state.files.insert(path.clone(), source);
                state.touch();
                extracted
            }
        };

        log::debug!(
            "{} {:?}: {} component(s)",
            path.display(),
            kind,
            extracted.len()
        );
        self.emit(SyncEvent::FileChanged {
            path,
            components: extracted,
        });
        Ok(())
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    pub fn status(&self) -> SyncStatus {
        if lock_std(&self.inner.watch).is_some() {
            SyncStatus::Watching
        } else {
            SyncStatus::Idle
        }
    }

    /// Subscribe to file events under the project root. Idempotent. Must be
    /// called from within a Tokio runtime.
    pub async fn start_watching(&self) -> Result<(), SyncError> {
        let root = self.inner.state.lock().await.root.clone();
        let mut watch = lock_std(&self.inner.watch);
        if watch.is_some() {
            log::debug!("already watching {}", root.display());
            return Ok(());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let guard = self
            .inner
            .fs
            .watch(&root, tx)
            .map_err(|e| SyncError::io("watch", &root, e))?;
        let task = tokio::spawn(watch_loop(Arc::downgrade(&self.inner), rx));
        *watch = Some(ActiveWatch {
            _guard: guard,
            task,
        });
        log::info!("sync watching {}", root.display());
        Ok(())
    }

    pub fn stop_watching(&self) {
        if let Some(active) = lock_std(&self.inner.watch).take() {
            active.task.abort();
            log::info!("sync stopped watching");
        }
    }

    /// Stop watching and reset the project to an empty state.
    pub async fn close(&self) {
        self.stop_watching();
        let mut state = self.inner.state.lock().await;
        *state = ProjectState::new(state.root.clone());
    }
}

async fn watch_loop(inner: Weak<Inner>, mut rx: mpsc::UnboundedReceiver<crate::fs::FileEvent>) {
    while let Some(event) = rx.recv().await {
        let Some(inner) = inner.upgrade() else {
            break;
        };
        if !inner.config.watches(&event.path) {
            continue;
        }
        let coordinator = SyncCoordinator { inner };
        if let Err(err) = coordinator.handle_file_change(&event.path, event.kind).await {
            log::warn!("sync {}: {err}", event.path.display());
        }
    }
}

/// Copy canvas-only fields from components already in state.
fn carry_over(node: &mut ComponentNode, state: &ProjectState) {
    if let Some(prev) = state.component(node.id) {
        node.name.clone_from(&prev.name);
        node.position = prev.position;
    }
    for child in &mut node.children {
        carry_over(child, state);
    }
}

/// Remove components owned by `path` except those in `keep`.
fn drop_owned_by(state: &mut ProjectState, path: &Path, keep: &[ComponentId]) {
    let stale: Vec<ComponentId> = state
        .owners
        .iter()
        .filter(|(id, owner)| owner.as_path() == path && !keep.contains(id))
        .map(|(id, _)| *id)
        .collect();
    for id in stale {
        state.owners.remove(&id);
        if state.remove(id).is_some() {
            log::debug!("{id} no longer in {}", path.display());
        }
    }
}
