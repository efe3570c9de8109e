//! Source-level component code generation.
//!
//! Insert, update and remove work on the JSX index from `jsx` and apply
//! byte-range edits to the original text, so everything outside the touched
//! ranges (formatting, comments, unrelated code) is preserved.
//!
//! Components are identified in source by a marker attribute
//! (`data-component-id` by default) that `generate_jsx` always emits first.

use crate::error::CodegenError;
use crate::id::ComponentId;
use crate::jsx::{AttrValue, JsxDocument, JsxNode, parse_source};
use crate::model::{ComponentNode, Props};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Write;

pub const MARKER_ATTRIBUTE: &str = "data-component-id";

/// How generated markup is laid out and how components are marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsxStyle {
    pub indent: String,
    pub marker_attribute: String,
}

impl Default for JsxStyle {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            marker_attribute: MARKER_ATTRIBUTE.to_string(),
        }
    }
}

// ─── Text edits ──────────────────────────────────────────────────────────

/// Replace `start..end` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            text: text.into(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: String::new(),
        }
    }
}

/// Apply non-overlapping edits, back to front so earlier offsets stay valid.
#[must_use]
pub fn apply_edits(source: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));
    let mut out = source.to_string();
    for edit in edits {
        out.replace_range(edit.start..edit.end, &edit.text);
    }
    out
}

fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(source: &str, offset: usize) -> usize {
    source[offset..].find('\n').map_or(source.len(), |i| offset + i)
}

fn indentation_at(source: &str, offset: usize) -> &str {
    let line = &source[line_start(source, offset)..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

fn indent_block(markup: &str, indent: &str) -> String {
    markup
        .lines()
        .map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                format!("{indent}{l}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ─── Insert / update / remove ────────────────────────────────────────────

/// Insert `node` as the last child of the target element.
///
/// The target is the root JSX element of the default export (or the first
/// JSX element in the module), optionally narrowed by `path`: a list of
/// child indices counted over element children. A self-closing target is
/// expanded into an open/close pair.
///
/// # Errors
/// `Parse` on invalid source, `TargetNotFound` when there is no JSX or the
/// path does not resolve.
pub fn insert_component(
    source: &str,
    node: &ComponentNode,
    path: Option<&[usize]>,
    style: &JsxStyle,
) -> Result<String, CodegenError> {
    let doc = parse_source(source)?;
    let root = doc
        .root()
        .ok_or_else(|| CodegenError::TargetNotFound("module contains no JSX".into()))?;
    let idx = match path {
        Some(path) => doc
            .resolve_path(root, path)
            .ok_or_else(|| CodegenError::TargetNotFound(format!("child path {path:?}")))?,
        None => root,
    };

    let parent = doc.node(idx);
    let base = indentation_at(source, parent.opening.start);
    let inner = format!("{base}{}", style.indent);
    let markup = indent_block(&render_node(node, style, 0), &inner);

    let edit = match parent.closing {
        Some(closing) => {
            let start = line_start(source, closing.start);
            if source[start..closing.start].trim().is_empty() {
                TextEdit::insert(start, format!("{markup}\n"))
            } else {
                TextEdit::insert(closing.start, format!("\n{markup}\n{base}"))
            }
        }
        None => {
            let open = &source[parent.opening.start..parent.opening.end];
            let head = open.strip_suffix("/>").unwrap_or(open).trim_end();
            TextEdit {
                start: parent.opening.start,
                end: parent.opening.end,
                text: format!("{head}>\n{markup}\n{base}</{}>", parent.tag),
            }
        }
    };

    log::debug!("inserting {} into <{}>", node.id, parent.tag);
    Ok(apply_edits(source, vec![edit]))
}

/// Rewrite props on the element marked with `id`.
///
/// Existing attributes are replaced in place, new ones are appended after
/// the last attribute, and a `null` value removes the attribute. A string
/// `children` prop replaces the element's text content.
///
/// # Errors
/// `Parse` on invalid source, `ComponentNotFound` when no element carries
/// the marker, `Unsupported` when text is set on an element with element
/// children.
pub fn update_component_props(
    source: &str,
    id: ComponentId,
    props: &Props,
    style: &JsxStyle,
) -> Result<String, CodegenError> {
    let doc = parse_source(source)?;
    let idx = doc
        .find_by_attribute(&style.marker_attribute, id.as_str())
        .ok_or(CodegenError::ComponentNotFound(id))?;
    patch_element(source, &doc, idx, props, style)
}

/// Apply prop edits to one indexed element.
pub(crate) fn patch_element(
    source: &str,
    doc: &JsxDocument,
    idx: usize,
    props: &Props,
    style: &JsxStyle,
) -> Result<String, CodegenError> {
    let node = doc.node(idx);
    let mut edits = Vec::new();
    let mut appended = String::new();

    for (key, value) in props {
        if *key == style.marker_attribute {
            log::warn!("ignoring edit of marker attribute on <{}>", node.tag);
            continue;
        }
        if key == "children"
            && let Value::String(text) = value
        {
            edits.push(text_edit(source, node, text)?);
            continue;
        }
        match (node.attribute(key), value) {
            (Some(attr), Value::Null) => {
                let start = source[..attr.span.start].trim_end().len();
                edits.push(TextEdit::delete(start, attr.span.end));
            }
            (Some(attr), value) => edits.push(TextEdit {
                start: attr.span.start,
                end: attr.span.end,
                text: render_attribute(key, value),
            }),
            (None, Value::Null) => {}
            (None, value) => {
                appended.push(' ');
                appended.push_str(&render_attribute(key, value));
            }
        }
    }

    if !appended.is_empty() {
        let at = node
            .attributes
            .last()
            .map_or(node.opening.start + 1 + node.tag.len(), |a| a.span.end);
        edits.push(TextEdit::insert(at, appended));
    }

    Ok(apply_edits(source, edits))
}

fn text_edit(source: &str, node: &JsxNode, text: &str) -> Result<TextEdit, CodegenError> {
    if !node.children.is_empty() {
        return Err(CodegenError::Unsupported(format!(
            "<{}> has element children; text content cannot replace them",
            node.tag
        )));
    }
    let text = render_text(text);
    Ok(match node.closing {
        Some(closing) => TextEdit {
            start: node.opening.end,
            end: closing.start,
            text,
        },
        None => {
            let slash = node.opening.end - 2;
            TextEdit {
                start: source[..slash].trim_end().len(),
                end: node.opening.end,
                text: format!(">{text}</{}>", node.tag),
            }
        }
    })
}

/// Delete the element marked with `id`. When the element occupies whole
/// lines, those lines go with it.
///
/// # Errors
/// `Parse` on invalid source, `ComponentNotFound` when no element carries
/// the marker.
pub fn remove_component(
    source: &str,
    id: ComponentId,
    style: &JsxStyle,
) -> Result<String, CodegenError> {
    let doc = parse_source(source)?;
    let idx = doc
        .find_by_attribute(&style.marker_attribute, id.as_str())
        .ok_or(CodegenError::ComponentNotFound(id))?;
    let span = doc.node(idx).span;

    let start = line_start(source, span.start);
    let end = line_end(source, span.end);
    let whole_lines =
        source[start..span.start].trim().is_empty() && source[span.end..end].trim().is_empty();

    let edit = if whole_lines {
        TextEdit::delete(start, (end + 1).min(source.len()))
    } else {
        TextEdit::delete(span.start, span.end)
    };
    Ok(apply_edits(source, vec![edit]))
}

// ─── Rendering ───────────────────────────────────────────────────────────

/// Render component trees as JSX with the default style.
#[must_use]
pub fn generate_jsx_from_nodes(nodes: &[ComponentNode]) -> String {
    generate_jsx(nodes, &JsxStyle::default())
}

/// Render component trees as JSX. Several top-level nodes are wrapped in a
/// fragment.
#[must_use]
pub fn generate_jsx(nodes: &[ComponentNode], style: &JsxStyle) -> String {
    match nodes {
        [] => String::new(),
        [single] => render_node(single, style, 0),
        many => {
            let body = many
                .iter()
                .map(|n| render_node(n, style, 1))
                .collect::<Vec<_>>()
                .join("\n");
            format!("<>\n{body}\n</>")
        }
    }
}

fn render_node(node: &ComponentNode, style: &JsxStyle, depth: usize) -> String {
    let pad = style.indent.repeat(depth);
    let text = if node.children.is_empty() {
        node.text_content()
    } else {
        None
    };

    let mut out = format!("{pad}<{} {}=\"{}\"", node.kind, style.marker_attribute, node.id);
    for (key, value) in &node.props {
        let rendered_as_content = key == "children" && (text.is_some() || !node.children.is_empty());
        if rendered_as_content || *key == style.marker_attribute {
            continue;
        }
        let _ = write!(out, " {}", render_attribute(key, value));
    }

    if !node.children.is_empty() {
        out.push_str(">\n");
        let children: Vec<String> = node
            .children
            .iter()
            .map(|c| render_node(c, style, depth + 1))
            .collect();
        out.push_str(&children.join("\n"));
        let _ = write!(out, "\n{pad}</{}>", node.kind);
    } else if let Some(text) = text {
        let _ = write!(out, ">{}</{}>", render_text(text), node.kind);
    } else {
        out.push_str(" />");
    }
    out
}

/// One JSX attribute for a prop value.
///
/// Strings without `"` are quoted; `true` is a bare attribute; everything
/// else is a JSON expression in braces.
#[must_use]
pub fn render_attribute(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) if !s.contains('"') => format!("{key}=\"{s}\""),
        Value::Bool(true) => key.to_string(),
        other => format!("{key}={{{other}}}"),
    }
}

pub(crate) fn render_text(text: &str) -> String {
    if text.contains(['{', '}', '<', '>']) {
        format!("{{{}}}", Value::String(text.to_string()))
    } else {
        text.to_string()
    }
}

// ─── Extraction ──────────────────────────────────────────────────────────

/// Rebuild component trees from marked elements in `source`.
///
/// An element's component parent is its nearest marked ancestor. String,
/// bare and JSON-literal attributes become props; other expressions are
/// skipped. Plain text content becomes the `children` prop. Positions are
/// not stored in source and come back as defaults.
///
/// # Errors
/// `Parse` on invalid source.
pub fn extract_components(
    source: &str,
    style: &JsxStyle,
) -> Result<Vec<ComponentNode>, CodegenError> {
    let doc = parse_source(source)?;
    let marker = style.marker_attribute.as_str();
    let is_marked = |n: &JsxNode| n.string_attribute(marker).is_some();

    let mut children_of: HashMap<Option<usize>, Vec<usize>> = HashMap::new();
    for (idx, _) in doc.nodes.iter().enumerate().filter(|(_, n)| is_marked(n)) {
        let parent = doc.ancestor_where(idx, is_marked);
        children_of.entry(parent).or_default().push(idx);
    }

    let roots = children_of.get(&None).cloned().unwrap_or_default();
    Ok(roots
        .into_iter()
        .map(|idx| build_component(&doc, idx, &children_of, marker))
        .collect())
}

fn build_component(
    doc: &JsxDocument,
    idx: usize,
    children_of: &HashMap<Option<usize>, Vec<usize>>,
    marker: &str,
) -> ComponentNode {
    let element = doc.node(idx);
    let id = ComponentId::intern(element.string_attribute(marker).unwrap_or_default());
    let mut component = ComponentNode::new(id, element.tag.clone());

    for attr in element.attributes.iter().filter(|a| a.name != marker) {
        let value = match &attr.value {
            AttrValue::Bare => Value::Bool(true),
            AttrValue::Str(s) => Value::String(s.clone()),
            AttrValue::Expr(expr) => match serde_json::from_str(expr) {
                Ok(v) => v,
                Err(_) => {
                    log::debug!("{id}: skipping non-literal prop `{}`", attr.name);
                    continue;
                }
            },
        };
        component.props.insert(attr.name.clone(), value);
    }
    if let Some(text) = &element.text {
        component
            .props
            .insert("children".to_string(), Value::String(text.clone()));
    }

    if let Some(children) = children_of.get(&Some(idx)) {
        component.children = children
            .iter()
            .map(|&c| build_component(doc, c, children_of, marker))
            .collect();
    }
    component
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn button(id: &str) -> ComponentNode {
        ComponentNode::new(ComponentId::intern(id), "Button")
            .with_prop("variant", "primary")
            .with_prop("children", "Save")
    }

    #[test]
    fn renders_single_node() {
        let jsx = generate_jsx_from_nodes(&[button("cg-btn")]);
        assert_eq!(
            jsx,
            r#"<Button data-component-id="cg-btn" variant="primary">Save</Button>"#
        );
    }

    #[test]
    fn renders_nested_and_wrapped() {
        let card = ComponentNode::new(ComponentId::intern("cg-card"), "div")
            .with_prop("className", "p-4")
            .with_child(button("cg-inner"));
        let img = ComponentNode::new(ComponentId::intern("cg-img"), "img")
            .with_prop("width", 120)
            .with_prop("hidden", false)
            .with_prop("priority", true);

        let jsx = generate_jsx_from_nodes(&[card, img]);
        assert_eq!(
            jsx,
            "<>\n\
             \x20 <div data-component-id=\"cg-card\" className=\"p-4\">\n\
             \x20   <Button data-component-id=\"cg-inner\" variant=\"primary\">Save</Button>\n\
             \x20 </div>\n\
             \x20 <img data-component-id=\"cg-img\" hidden={false} priority width={120} />\n\
             </>"
        );
    }

    #[test]
    fn attribute_rendering() {
        assert_eq!(render_attribute("a", &json!("x")), r#"a="x""#);
        assert_eq!(render_attribute("a", &json!("say \"hi\"")), r#"a={"say \"hi\""}"#);
        assert_eq!(render_attribute("a", &json!(true)), "a");
        assert_eq!(render_attribute("a", &json!({"k": 1})), r#"a={{"k":1}}"#);
        assert_eq!(render_attribute("a", &json!(null)), "a={null}");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(generate_jsx_from_nodes(&[]), "");
    }

    #[test]
    fn insert_before_closing_tag() {
        let src = "export default function P() {\n  return (\n    <main>\n      <h1>Hi</h1>\n    </main>\n  );\n}\n";
        let out = insert_component(src, &button("cg-ins"), None, &JsxStyle::default()).unwrap();
        assert_eq!(
            out,
            "export default function P() {\n  return (\n    <main>\n      <h1>Hi</h1>\n      <Button data-component-id=\"cg-ins\" variant=\"primary\">Save</Button>\n    </main>\n  );\n}\n"
        );
    }

    #[test]
    fn insert_expands_self_closing_target() {
        let src = "export default () => <section className=\"s\" />;\n";
        let node = ComponentNode::new(ComponentId::intern("cg-x"), "span");
        let out = insert_component(src, &node, None, &JsxStyle::default()).unwrap();
        assert_eq!(
            out,
            "export default () => <section className=\"s\">\n  <span data-component-id=\"cg-x\" />\n</section>;\n"
        );
    }

    #[test]
    fn insert_by_path_and_missing_target() {
        let src = "export default () => (\n  <div>\n    <ul>\n    </ul>\n  </div>\n);\n";
        let node = ComponentNode::new(ComponentId::intern("cg-li"), "li");
        let out = insert_component(src, &node, Some(&[0]), &JsxStyle::default()).unwrap();
        assert!(out.contains("    <ul>\n      <li data-component-id=\"cg-li\" />\n    </ul>"));

        let err = insert_component(src, &node, Some(&[3]), &JsxStyle::default()).unwrap_err();
        assert!(matches!(err, CodegenError::TargetNotFound(_)));

        let err = insert_component("const x = 1;", &node, None, &JsxStyle::default()).unwrap_err();
        assert!(matches!(err, CodegenError::TargetNotFound(_)));
    }

    #[test]
    fn update_replaces_appends_and_removes() {
        let src = r#"export default () => <Button data-component-id="cg-up" variant="primary" disabled>Save</Button>;"#;
        let mut props = Props::new();
        props.insert("variant".into(), json!("ghost"));
        props.insert("disabled".into(), Value::Null);
        props.insert("size".into(), json!(2));
        props.insert("children".into(), json!("Done"));

        let out =
            update_component_props(src, ComponentId::intern("cg-up"), &props, &JsxStyle::default())
                .unwrap();
        assert_eq!(
            out,
            r#"export default () => <Button data-component-id="cg-up" variant="ghost" size={2}>Done</Button>;"#
        );
    }

    #[test]
    fn update_sets_text_on_self_closing() {
        let src = r#"export default () => <p data-component-id="cg-p" className="x" />;"#;
        let mut props = Props::new();
        props.insert("children".into(), json!("Hello"));
        let out =
            update_component_props(src, ComponentId::intern("cg-p"), &props, &JsxStyle::default())
                .unwrap();
        assert_eq!(
            out,
            r#"export default () => <p data-component-id="cg-p" className="x">Hello</p>;"#
        );
    }

    #[test]
    fn update_unknown_component() {
        let err = update_component_props(
            "export default () => <div />;",
            ComponentId::intern("cg-missing"),
            &Props::new(),
            &JsxStyle::default(),
        )
        .unwrap_err();
        assert_eq!(err, CodegenError::ComponentNotFound(ComponentId::intern("cg-missing")));
    }

    #[test]
    fn remove_whole_line_and_inline() {
        let src = "export default () => (\n  <div>\n    <span data-component-id=\"cg-rm\" />\n    <b>keep</b>\n  </div>\n);\n";
        let out = remove_component(src, ComponentId::intern("cg-rm"), &JsxStyle::default()).unwrap();
        assert_eq!(out, "export default () => (\n  <div>\n    <b>keep</b>\n  </div>\n);\n");

        let inline = r#"export default () => <p>a<i data-component-id="cg-rm2" />b</p>;"#;
        let out =
            remove_component(inline, ComponentId::intern("cg-rm2"), &JsxStyle::default()).unwrap();
        assert_eq!(out, "export default () => <p>ab</p>;");
    }

    #[test]
    fn extraction_follows_marked_ancestors() {
        let src = r#"
export default function Page() {
  return (
    <main>
      <section data-component-id="cg-sec" title="Intro">
        <div className="wrapper">
          <Button data-component-id="cg-b" count={3} active>Go</Button>
        </div>
        <Chart data-component-id="cg-chart" data={rows} />
      </section>
    </main>
  );
}
"#;
        let tree = extract_components(src, &JsxStyle::default()).unwrap();
        assert_eq!(tree.len(), 1);
        let section = &tree[0];
        assert_eq!(section.kind, "section");
        assert_eq!(section.props.get("title"), Some(&json!("Intro")));
        assert_eq!(section.children.len(), 2);

        let b = &section.children[0];
        assert_eq!(b.id, ComponentId::intern("cg-b"));
        assert_eq!(b.props.get("count"), Some(&json!(3)));
        assert_eq!(b.props.get("active"), Some(&json!(true)));
        assert_eq!(b.props.get("children"), Some(&json!("Go")));

        let chart = &section.children[1];
        assert!(chart.props.get("data").is_none());
    }

    #[test]
    fn generated_markup_extracts_back() {
        let card = ComponentNode::new(ComponentId::intern("cg-rt"), "div")
            .with_prop("className", "flex gap-2")
            .with_prop("data", json!({"rows": [1, 2]}))
            .with_child(button("cg-rt-btn"));
        let src = format!(
            "export default function P() {{\n  return (\n{}\n  );\n}}\n",
            indent_block(&generate_jsx_from_nodes(std::slice::from_ref(&card)), "    ")
        );
        let tree = extract_components(&src, &JsxStyle::default()).unwrap();
        assert_eq!(tree, vec![card]);
    }

    #[test]
    fn text_with_markup_characters_extracts_back() {
        let note = ComponentNode::new(ComponentId::intern("cg-lt"), "p")
            .with_prop("children", "1 < 2 {ok}");
        let jsx = generate_jsx_from_nodes(std::slice::from_ref(&note));
        assert_eq!(jsx, r#"<p data-component-id="cg-lt">{"1 < 2 {ok}"}</p>"#);

        let src = format!("export default function P() {{\n  return {jsx};\n}}\n");
        let tree = extract_components(&src, &JsxStyle::default()).unwrap();
        assert_eq!(tree, vec![note]);
    }
}
