//! Pluggable element mutation.
//!
//! `LineStrategy` is the fast heuristic from `mutator`: it edits a single
//! located line and tolerates broken files. `AstStrategy` goes through the
//! JSX index and handles multi-line tags, but needs a parseable module.

use crate::codegen::{JsxStyle, patch_element};
use crate::error::CodegenError;
use crate::id::ComponentId;
use crate::jsx::parse_source;
use crate::locator::{locate, locate_exact};
use crate::mutator::{ElementUpdates, update_file};
use serde_json::Value;

/// What to edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementTarget {
    /// First element whose source mentions this text.
    Pattern(String),
    /// Element carrying the component marker.
    Component(ComponentId),
}

impl ElementTarget {
    fn pattern(&self, style: &JsxStyle) -> String {
        match self {
            ElementTarget::Pattern(p) => p.clone(),
            ElementTarget::Component(id) => format!("{}=\"{id}\"", style.marker_attribute),
        }
    }
}

pub trait ElementMutationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Apply `updates` to `target` in `source`, returning the new text.
    fn apply(
        &self,
        source: &str,
        target: &ElementTarget,
        updates: &ElementUpdates,
    ) -> Result<String, CodegenError>;
}

#[derive(Debug, Clone, Default)]
pub struct LineStrategy {
    pub style: JsxStyle,
}

impl ElementMutationStrategy for LineStrategy {
    fn name(&self) -> &'static str {
        "line"
    }

    fn apply(
        &self,
        source: &str,
        target: &ElementTarget,
        updates: &ElementUpdates,
    ) -> Result<String, CodegenError> {
        let pattern = target.pattern(&self.style);
        // A component must be found by its own marker; the `<li` fallback
        // would edit some other element.
        let found = match target {
            ElementTarget::Pattern(_) => locate(source, &pattern),
            ElementTarget::Component(_) => locate_exact(source, &pattern),
        };
        if found.is_none() {
            return Err(CodegenError::TargetNotFound(pattern));
        }
        Ok(update_file(source, &pattern, updates))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AstStrategy {
    pub style: JsxStyle,
}

impl ElementMutationStrategy for AstStrategy {
    fn name(&self) -> &'static str {
        "ast"
    }

    fn apply(
        &self,
        source: &str,
        target: &ElementTarget,
        updates: &ElementUpdates,
    ) -> Result<String, CodegenError> {
        let doc = parse_source(source)?;
        let idx = match target {
            ElementTarget::Pattern(p) => doc.find_by_pattern(source, p),
            ElementTarget::Component(id) => {
                doc.find_by_attribute(&self.style.marker_attribute, id.as_str())
            }
        }
        .ok_or_else(|| CodegenError::TargetNotFound(target.pattern(&self.style)))?;

        let mut props = updates.props.clone();
        if let Some(class_name) = &updates.class_name {
            props.insert("className".into(), Value::String(class_name.trim().to_string()));
        }
        if let Some(text) = &updates.text {
            props.insert("children".into(), Value::String(text.clone()));
        }
        patch_element(source, &doc, idx, &props, &self.style)
    }
}
