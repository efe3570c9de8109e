//! JSX syntax index over a TSX/JSX module.
//!
//! The module is parsed with `oxc` as TSX (type annotations, decorators,
//! optional chaining and dynamic import all accepted) and every JSX element
//! and fragment is recorded as an owned `JsxNode` with its byte spans,
//! attributes and nesting. Code generation then edits the
//! original text by span, so formatting and comments outside the edited
//! ranges survive untouched.

use crate::error::CodegenError;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    JSXAttributeItem, JSXAttributeValue, JSXChild, JSXElement, JSXExpression, JSXFragment,
};
use oxc_ast::{AstKind, Visit};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};

// ─── Types ───────────────────────────────────────────────────────────────

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn contains(&self, other: TextSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<Span> for TextSpan {
    fn from(span: Span) -> Self {
        Self {
            start: span.start as usize,
            end: span.end as usize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsxNodeKind {
    Element,
    Fragment,
}

/// Attribute value as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `disabled`
    Bare,
    /// `variant="primary"` (contents without quotes)
    Str(String),
    /// `count={3}` (contents without braces), or a nested element value.
    Expr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxAttribute {
    pub name: String,
    pub span: TextSpan,
    pub value: AttrValue,
}

/// One JSX element or fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxNode {
    pub kind: JsxNodeKind,
    /// Tag name as written; empty for fragments.
    pub tag: String,
    pub span: TextSpan,
    /// `<Tag ...>` / `<Tag ... />` / `<>`
    pub opening: TextSpan,
    /// `</Tag>` / `</>`; `None` when self-closing.
    pub closing: Option<TextSpan>,
    pub attributes: Vec<JsxAttribute>,
    /// Concatenated text when every child is plain JSX text.
    pub text: Option<String>,
    pub parent: Option<usize>,
    /// Element/fragment children, in source order.
    pub children: Vec<usize>,
}

impl JsxNode {
    pub fn attribute(&self, name: &str) -> Option<&JsxAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// String value of an attribute, if it is a plain string literal.
    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        match &self.attribute(name)?.value {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_self_closing(&self) -> bool {
        self.closing.is_none()
    }
}

/// All JSX nodes of a module, in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsxDocument {
    pub nodes: Vec<JsxNode>,
    /// Span of the first `export default ...` declaration.
    pub default_export: Option<TextSpan>,
}

impl JsxDocument {
    pub fn node(&self, idx: usize) -> &JsxNode {
        &self.nodes[idx]
    }

    /// Outermost JSX nodes, in source order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| i)
    }

    /// Root of the component tree: the first outermost node inside the
    /// default export, falling back to the first outermost node in the file.
    pub fn root(&self) -> Option<usize> {
        if let Some(export) = self.default_export
            && let Some(idx) = self.roots().find(|&i| export.contains(self.nodes[i].span))
        {
            return Some(idx);
        }
        self.roots().next()
    }

    /// Descend from `from` by child indices.
    pub fn resolve_path(&self, from: usize, path: &[usize]) -> Option<usize> {
        path.iter()
            .try_fold(from, |idx, &child| self.nodes[idx].children.get(child).copied())
    }

    /// First element whose `attribute` is the string `value`.
    pub fn find_by_attribute(&self, attribute: &str, value: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.string_attribute(attribute) == Some(value))
    }

    /// First element whose opening tag text contains `pattern`.
    pub fn find_by_pattern(&self, source: &str, pattern: &str) -> Option<usize> {
        self.nodes.iter().position(|n| {
            n.kind == JsxNodeKind::Element
                && source
                    .get(n.opening.start..n.opening.end)
                    .is_some_and(|open| open.contains(pattern))
        })
    }

    /// Nearest ancestor satisfying `pred`.
    pub fn ancestor_where(&self, idx: usize, pred: impl Fn(&JsxNode) -> bool) -> Option<usize> {
        let mut current = self.nodes[idx].parent;
        while let Some(p) = current {
            if pred(&self.nodes[p]) {
                return Some(p);
            }
            current = self.nodes[p].parent;
        }
        None
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────

/// Parse a TSX module and index its JSX.
///
/// # Errors
/// `CodegenError::Parse` carrying the parser's messages when the source
/// has syntax errors.
pub fn parse_source(source: &str) -> Result<JsxDocument, CodegenError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();

    if !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CodegenError::Parse { message });
    }

    let mut collector = JsxCollector {
        source,
        doc: JsxDocument::default(),
        stack: Vec::new(),
    };
    collector.visit_program(&ret.program);
    log::trace!("indexed {} JSX nodes", collector.doc.nodes.len());
    Ok(collector.doc)
}

struct JsxCollector<'s> {
    source: &'s str,
    doc: JsxDocument,
    stack: Vec<usize>,
}

impl JsxCollector<'_> {
    fn slice(&self, span: Span) -> &str {
        &self.source[span.start as usize..span.end as usize]
    }

    fn push(&mut self, mut node: JsxNode) {
        let idx = self.doc.nodes.len();
        node.parent = self.stack.last().copied();
        if let Some(parent) = node.parent {
            self.doc.nodes[parent].children.push(idx);
        }
        self.doc.nodes.push(node);
        self.stack.push(idx);
    }

    fn element(&self, element: &JSXElement<'_>) -> JsxNode {
        let opening = &element.opening_element;
        let attributes = opening
            .attributes
            .iter()
            .filter_map(|item| match item {
                JSXAttributeItem::Attribute(attr) => Some(JsxAttribute {
                    name: self.slice(attr.name.span()).to_string(),
                    span: attr.span.into(),
                    value: match &attr.value {
                        None => AttrValue::Bare,
                        Some(JSXAttributeValue::StringLiteral(lit)) => {
                            AttrValue::Str(lit.value.to_string())
                        }
                        Some(other) => AttrValue::Expr(strip_braces(self.slice(other.span()))),
                    },
                }),
                JSXAttributeItem::SpreadAttribute(_) => None,
            })
            .collect();

        JsxNode {
            kind: JsxNodeKind::Element,
            tag: self.slice(opening.name.span()).to_string(),
            span: element.span.into(),
            opening: opening.span.into(),
            closing: element.closing_element.as_ref().map(|c| c.span.into()),
            attributes,
            text: text_children(&element.children),
            parent: None,
            children: Vec::new(),
        }
    }

    fn fragment(&self, fragment: &JSXFragment<'_>) -> JsxNode {
        JsxNode {
            kind: JsxNodeKind::Fragment,
            tag: String::new(),
            span: fragment.span.into(),
            opening: fragment.opening_fragment.span.into(),
            closing: Some(fragment.closing_fragment.span.into()),
            attributes: Vec::new(),
            text: text_children(&fragment.children),
            parent: None,
            children: Vec::new(),
        }
    }
}

impl<'a> Visit<'a> for JsxCollector<'_> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        match kind {
            AstKind::JSXElement(element) => {
                let node = self.element(element);
                self.push(node);
            }
            AstKind::JSXFragment(fragment) => {
                let node = self.fragment(fragment);
                self.push(node);
            }
            AstKind::ExportDefaultDeclaration(decl) => {
                if self.doc.default_export.is_none() {
                    self.doc.default_export = Some(decl.span.into());
                }
            }
            _ => {}
        }
    }

    fn leave_node(&mut self, kind: AstKind<'a>) {
        if matches!(kind, AstKind::JSXElement(_) | AstKind::JSXFragment(_)) {
            self.stack.pop();
        }
    }
}

fn strip_braces(raw: &str) -> String {
    raw.strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(raw)
        .trim()
        .to_string()
}

/// Text content when every child is JSX text or a string literal in braces
/// (`{"1 < 2"}`); `None` otherwise or if blank.
fn text_children(children: &[JSXChild<'_>]) -> Option<String> {
    let mut text = String::new();
    for child in children {
        match child {
            JSXChild::Text(t) => text.push_str(t.value.as_str()),
            JSXChild::ExpressionContainer(c) => match &c.expression {
                JSXExpression::StringLiteral(lit) => text.push_str(lit.value.as_str()),
                _ => return None,
            },
            _ => return None,
        }
    }
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"import Image from "next/image";

// helper component, not the default export
function Badge() {
  return <span className="badge">new</span>;
}

export default function Home() {
  const items = data?.items ?? [];
  return (
    <main className="flex min-h-screen">
      <h1 data-component-id="title" className="text-4xl">Welcome</h1>
      <>
        <Image src="/logo.svg" alt="Logo" priority width={120} />
      </>
    </main>
  );
}
"#;

    #[test]
    fn indexes_elements_in_preorder() {
        let doc = parse_source(PAGE).unwrap();
        let tags: Vec<&str> = doc.nodes.iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["span", "main", "h1", "", "Image"]);

        let main = doc.root().unwrap();
        assert_eq!(doc.node(main).tag, "main");
        assert_eq!(doc.node(main).children.len(), 2);
    }

    #[test]
    fn records_attributes_and_text() {
        let doc = parse_source(PAGE).unwrap();
        let h1 = doc.find_by_attribute("data-component-id", "title").unwrap();
        assert_eq!(doc.node(h1).text.as_deref(), Some("Welcome"));
        assert_eq!(doc.node(h1).string_attribute("className"), Some("text-4xl"));

        let image = doc.nodes.iter().find(|n| n.tag == "Image").unwrap();
        assert!(image.is_self_closing());
        assert_eq!(image.attribute("priority").unwrap().value, AttrValue::Bare);
        assert_eq!(
            image.attribute("width").unwrap().value,
            AttrValue::Expr("120".into())
        );
    }

    #[test]
    fn resolves_child_paths() {
        let doc = parse_source(PAGE).unwrap();
        let root = doc.root().unwrap();
        let image = doc.resolve_path(root, &[1, 0]).unwrap();
        assert_eq!(doc.node(image).tag, "Image");
        assert!(doc.resolve_path(root, &[5]).is_none());
        assert_eq!(doc.resolve_path(root, &[]), Some(root));
    }

    #[test]
    fn spans_slice_back_to_source() {
        let doc = parse_source(PAGE).unwrap();
        let h1 = doc.node(doc.find_by_pattern(PAGE, "text-4xl").unwrap());
        assert_eq!(
            &PAGE[h1.span.start..h1.span.end],
            r#"<h1 data-component-id="title" className="text-4xl">Welcome</h1>"#
        );
        let closing = h1.closing.unwrap();
        assert_eq!(&PAGE[closing.start..closing.end], "</h1>");
    }

    #[test]
    fn syntax_errors_become_parse_errors() {
        let err = parse_source("export default () => <div>").unwrap_err();
        assert!(matches!(err, CodegenError::Parse { .. }));
    }

    #[test]
    fn typed_superset_and_decorators_parse() {
        let src = r#"
@sealed
class Store { value?: number = 1 }
type Props = { title: string };
export default async function Page({ title }: Props) {
  const mod = await import("./x");
  const spread = { ...mod };
  return <section title={title as string}>{spread.a}</section>;
}
"#;
        let doc = parse_source(src).unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(
            doc.node(0).attribute("title").unwrap().value,
            AttrValue::Expr("title as string".into())
        );
    }
}
