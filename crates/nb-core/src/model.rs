//! Canvas component model.
//!
//! A `ComponentNode` is what the canvas drops and what the code generator
//! renders to JSX. The model is a plain tree: children are owned by their
//! parent and there are no back-references. Props are free-form JSON values
//! (`map<string, any>`); how each value type renders as a JSX attribute is
//! decided in `codegen`.

use crate::id::ComponentId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Component props: attribute name → JSON value.
pub type Props = Map<String, Value>;

// ─── Geometry ────────────────────────────────────────────────────────────

/// Canvas placement. Only the canvas reads this; it never reaches the JSX.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ─── Component node ──────────────────────────────────────────────────────

/// A component on the canvas, mirrored as a JSX element in a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub id: ComponentId,
    /// JSX tag or component name (`div`, `Button`, `Card.Header`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name shown in the layer panel.
    pub name: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentNode>,
    #[serde(default)]
    pub position: Position,
}

impl ComponentNode {
    /// Create a node whose display name defaults to its tag.
    pub fn new(id: ComponentId, kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            id,
            name: kind.clone(),
            kind,
            props: Props::new(),
            children: Vec::new(),
            position: Position::default(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// IDs of this node and all descendants, pre-order.
    pub fn ids(&self) -> Vec<ComponentId> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids(&self, out: &mut Vec<ComponentId>) {
        out.push(self.id);
        for child in &self.children {
            child.collect_ids(out);
        }
    }

    /// Find a node by ID in this subtree.
    pub fn find(&self, id: ComponentId) -> Option<&ComponentNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: ComponentId) -> Option<&mut ComponentNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Detach a strict descendant by ID.
    pub fn remove_descendant(&mut self, id: ComponentId) -> Option<ComponentNode> {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children
            .iter_mut()
            .find_map(|c| c.remove_descendant(id))
    }

    /// Text content carried as `props.children` when it is a string.
    pub fn text_content(&self) -> Option<&str> {
        self.props.get("children").and_then(Value::as_str)
    }
}

// ─── Partial updates ─────────────────────────────────────────────────────

/// Partial update applied to a stored node. `None` fields are left alone;
/// `props` are merged key by key, and a `null` value removes the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentUpdate {
    pub name: Option<String>,
    pub props: Option<Props>,
    pub position: Option<Position>,
    pub children: Option<Vec<ComponentNode>>,
}

impl ComponentUpdate {
    pub fn props(props: Props) -> Self {
        Self {
            props: Some(props),
            ..Default::default()
        }
    }

    /// Whether applying this update changes what is written to source.
    pub fn touches_source(&self) -> bool {
        self.props.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Merge the update into `node`.
    pub fn apply_to(&self, node: &mut ComponentNode) {
        if let Some(name) = &self.name {
            node.name.clone_from(name);
        }
        if let Some(props) = &self.props {
            for (k, v) in props {
                if v.is_null() {
                    node.props.remove(k);
                } else {
                    node.props.insert(k.clone(), v.clone());
                }
            }
        }
        if let Some(position) = self.position {
            node.position = position;
        }
        if let Some(children) = &self.children {
            node.children.clone_from(children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_are_preorder() {
        let tree = ComponentNode::new(ComponentId::intern("m_root"), "section")
            .with_child(
                ComponentNode::new(ComponentId::intern("m_a"), "div")
                    .with_child(ComponentNode::new(ComponentId::intern("m_b"), "span")),
            )
            .with_child(ComponentNode::new(ComponentId::intern("m_c"), "p"));
        let ids: Vec<&str> = tree.ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["m_root", "m_a", "m_b", "m_c"]);
        assert!(tree.find(ComponentId::intern("m_b")).is_some());
        assert!(tree.find(ComponentId::intern("m_zz")).is_none());
    }

    #[test]
    fn detach_nested_child() {
        let mut tree = ComponentNode::new(ComponentId::intern("m_top"), "ul").with_child(
            ComponentNode::new(ComponentId::intern("m_li"), "li")
                .with_child(ComponentNode::new(ComponentId::intern("m_leaf"), "a")),
        );
        tree.find_mut(ComponentId::intern("m_leaf")).unwrap().name = "Link".into();
        let leaf = tree.remove_descendant(ComponentId::intern("m_leaf")).unwrap();
        assert_eq!(leaf.name, "Link");
        assert_eq!(tree.ids().len(), 2);
        assert!(tree.remove_descendant(ComponentId::intern("m_top")).is_none());
    }

    #[test]
    fn update_merges_props() {
        let mut node = ComponentNode::new(ComponentId::intern("m_btn"), "Button")
            .with_prop("variant", "primary")
            .with_prop("size", "sm");
        let mut props = Props::new();
        props.insert("size".into(), json!("lg"));
        props.insert("disabled".into(), json!(true));
        let update = ComponentUpdate {
            name: Some("Submit".into()),
            props: Some(props),
            ..Default::default()
        };
        assert!(update.touches_source());
        update.apply_to(&mut node);

        assert_eq!(node.name, "Submit");
        assert_eq!(node.props["variant"], json!("primary"));
        assert_eq!(node.props["size"], json!("lg"));
        assert_eq!(node.props["disabled"], json!(true));
    }

    #[test]
    fn null_prop_removes_key() {
        let mut node = ComponentNode::new(ComponentId::intern("m_nul"), "input")
            .with_prop("disabled", true)
            .with_prop("placeholder", "Email");
        let mut props = Props::new();
        props.insert("disabled".into(), Value::Null);
        ComponentUpdate::props(props).apply_to(&mut node);

        assert!(!node.props.contains_key("disabled"));
        assert_eq!(node.props["placeholder"], json!("Email"));
        let jsx = crate::codegen::generate_jsx_from_nodes(std::slice::from_ref(&node));
        assert!(!jsx.contains("null"), "{jsx}");
    }

    #[test]
    fn position_only_update_does_not_touch_source() {
        let update = ComponentUpdate {
            position: Some(Position::new(10.0, 20.0, 100.0, 40.0)),
            ..Default::default()
        };
        assert!(!update.touches_source());
    }

    #[test]
    fn node_serializes_type_field() {
        let node = ComponentNode::new(ComponentId::intern("m_ser"), "Card");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], json!("Card"));
        assert_eq!(value["id"], json!("m_ser"));
        assert!(value.get("children").is_none());
    }
}
