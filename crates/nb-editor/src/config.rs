//! Project-level sync settings, read from an optional `nextbuilder.json`.

use crate::error::SyncError;
use crate::fs::FileSystem;
use nb_core::codegen::{JsxStyle, MARKER_ATTRIBUTE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "nextbuilder.json";

/// Directories never watched, at any depth.
const IGNORED_DIRS: [&str; 4] = ["node_modules", ".next", ".git", "dist"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// Where `add_component` inserts when no file is given, relative to the
    /// project root.
    pub default_target: PathBuf,
    pub marker_attribute: String,
    pub indent: String,
    pub watch_extensions: Vec<String>,
    /// Broadcast buffer; slow subscribers past this lag and skip events.
    pub event_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_target: PathBuf::from("src/app/page.tsx"),
            marker_attribute: MARKER_ATTRIBUTE.to_string(),
            indent: "  ".to_string(),
            watch_extensions: ["tsx", "jsx", "ts", "js"].map(String::from).to_vec(),
            event_capacity: 256,
        }
    }
}

impl SyncConfig {
    /// Read `<root>/nextbuilder.json`, or defaults when it does not exist.
    pub async fn load(fs: &dyn FileSystem, root: &Path) -> Result<Self, SyncError> {
        let path = root.join(CONFIG_FILE);
        if !fs.exists(&path).await {
            log::debug!("no {CONFIG_FILE} in {}; using defaults", root.display());
            return Ok(Self::default());
        }
        let text = fs
            .read_file(&path)
            .await
            .map_err(|e| SyncError::io("read", &path, e))?;
        serde_json::from_str(&text).map_err(|source| SyncError::Config { path, source })
    }

    pub fn jsx_style(&self) -> JsxStyle {
        JsxStyle {
            indent: self.indent.clone(),
            marker_attribute: self.marker_attribute.clone(),
        }
    }

    /// Whether a watcher event for `path` should trigger a re-sync.
    pub fn watches(&self, path: &Path) -> bool {
        let ignored = path.components().any(|c| {
            c.as_os_str()
                .to_str()
                .is_some_and(|s| IGNORED_DIRS.contains(&s))
        });
        let source = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.watch_extensions.iter().any(|w| w == ext));
        source && !ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    #[test]
    fn watches_source_extensions_only() {
        let config = SyncConfig::default();
        assert!(config.watches(Path::new("/p/src/app/page.tsx")));
        assert!(config.watches(Path::new("/p/src/lib/util.ts")));
        assert!(!config.watches(Path::new("/p/src/app/globals.css")));
        assert!(!config.watches(Path::new("/p/node_modules/react/index.js")));
        assert!(!config.watches(Path::new("/p/README")));
    }

    #[tokio::test]
    async fn load_defaults_and_overrides() {
        let fs = MemoryFs::new();
        let root = Path::new("/proj");
        assert_eq!(SyncConfig::load(&fs, root).await.unwrap(), SyncConfig::default());

        fs.insert(
            root.join(CONFIG_FILE),
            r#"{ "defaultTarget": "app/page.jsx", "indent": "    " }"#,
        );
        let config = SyncConfig::load(&fs, root).await.unwrap();
        assert_eq!(config.default_target, PathBuf::from("app/page.jsx"));
        assert_eq!(config.jsx_style().indent, "    ");
        assert_eq!(config.marker_attribute, MARKER_ATTRIBUTE);

        fs.insert(root.join(CONFIG_FILE), "{ nope");
        assert!(matches!(
            SyncConfig::load(&fs, root).await,
            Err(SyncError::Config { .. })
        ));
    }
}
