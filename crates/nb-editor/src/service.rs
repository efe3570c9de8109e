//! Path-level code generation: reads sources through the `FileSystem`
//! collaborator and hands text to `nb_core::codegen`.
//!
//! Mutations return the new code without writing it; the caller decides
//! when to commit. `create_component_file` is the one operation that writes.

use crate::error::SyncError;
use crate::fs::FileSystem;
use nb_core::codegen::{self, JsxStyle};
use nb_core::jsx::{JsxDocument, parse_source};
use nb_core::{ComponentId, ComponentNode, Props};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A parsed module and the text it came from.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub document: JsxDocument,
}

/// New contents for a file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub path: PathBuf,
    pub code: String,
}

#[derive(Clone)]
pub struct CodeGenerationService {
    fs: Arc<dyn FileSystem>,
    style: JsxStyle,
}

impl CodeGenerationService {
    pub fn new(fs: Arc<dyn FileSystem>, style: JsxStyle) -> Self {
        Self { fs, style }
    }

    pub fn style(&self) -> &JsxStyle {
        &self.style
    }

    pub async fn read(&self, path: &Path) -> Result<String, SyncError> {
        self.fs
            .read_file(path)
            .await
            .map_err(|e| SyncError::io("read", path, e))
    }

    pub async fn parse_file(&self, path: &Path) -> Result<ParsedFile, SyncError> {
        let source = self.read(path).await?;
        let document = parse_source(&source)?;
        Ok(ParsedFile {
            path: path.to_path_buf(),
            source,
            document,
        })
    }

    pub async fn insert_component(
        &self,
        path: &Path,
        node: &ComponentNode,
        target: Option<&[usize]>,
    ) -> Result<GeneratedCode, SyncError> {
        let source = self.read(path).await?;
        let code = codegen::insert_component(&source, node, target, &self.style)?;
        Ok(GeneratedCode {
            path: path.to_path_buf(),
            code,
        })
    }

    pub async fn update_component_props(
        &self,
        path: &Path,
        id: ComponentId,
        props: &Props,
    ) -> Result<GeneratedCode, SyncError> {
        let source = self.read(path).await?;
        let code = codegen::update_component_props(&source, id, props, &self.style)?;
        Ok(GeneratedCode {
            path: path.to_path_buf(),
            code,
        })
    }

    pub async fn remove_component(
        &self,
        path: &Path,
        id: ComponentId,
    ) -> Result<GeneratedCode, SyncError> {
        let source = self.read(path).await?;
        let code = codegen::remove_component(&source, id, &self.style)?;
        Ok(GeneratedCode {
            path: path.to_path_buf(),
            code,
        })
    }

    pub async fn extract_components(&self, path: &Path) -> Result<Vec<ComponentNode>, SyncError> {
        let source = self.read(path).await?;
        Ok(codegen::extract_components(&source, &self.style)?)
    }

    #[must_use]
    pub fn generate_jsx_from_nodes(&self, nodes: &[ComponentNode]) -> String {
        codegen::generate_jsx(nodes, &self.style)
    }

    /// Write `<dir>/<name>.tsx`, creating `dir` as needed.
    pub async fn create_component_file(
        &self,
        name: &str,
        content: &str,
        dir: &Path,
    ) -> Result<PathBuf, SyncError> {
        self.fs
            .create_dir_all(dir)
            .await
            .map_err(|e| SyncError::io("create directory", dir, e))?;
        let path = dir.join(format!("{name}.tsx"));
        self.fs
            .write_file(&path, content)
            .await
            .map_err(|e| SyncError::io("write", &path, e))?;
        log::info!("created component file {}", path.display());
        Ok(path)
    }
}
