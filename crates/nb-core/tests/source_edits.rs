//! Integration tests: source-level edits on a Next.js page.
//!
//! Exercises the JSX index, code generation and the line mutator together
//! against a realistic `page.tsx`.

use nb_core::codegen::JsxStyle;
use nb_core::mutator::ElementUpdates;
use nb_core::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const PAGE: &str = include_str!("fixtures/page.tsx");

fn changed_lines(before: &str, after: &str) -> Vec<(usize, String)> {
    before
        .lines()
        .zip(after.lines())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, (_, b))| (i + 1, b.to_string()))
        .collect()
}

// ─── AST edits ──────────────────────────────────────────────────────────

#[test]
fn insert_lands_in_default_export_root() {
    let style = JsxStyle::default();
    let hero = ComponentNode::new(ComponentId::intern("it-hero"), "section")
        .with_prop("className", "p-4")
        .with_child(
            ComponentNode::new(ComponentId::intern("it-hero-title"), "h2")
                .with_prop("children", "Hello"),
        );

    let out = insert_component(PAGE, &hero, None, &style).unwrap();
    assert!(out.contains(
        "      </main>\n\
         \x20     <section data-component-id=\"it-hero\" className=\"p-4\">\n\
         \x20       <h2 data-component-id=\"it-hero-title\">Hello</h2>\n\
         \x20     </section>\n\
         \x20   </div>"
    ));
    // Untouched regions survive byte for byte.
    assert!(out.contains("{/* getting started */}"));
    assert!(out.starts_with("import Image from \"next/image\";\n\nexport default function Home() {"));

    let tree = extract_components(&out, &style).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].ids(), vec![
        ComponentId::intern("it-hero"),
        ComponentId::intern("it-hero-title"),
    ]);
}

#[test]
fn insert_then_remove_restores_source() {
    let style = JsxStyle::default();
    let badge = ComponentNode::new(ComponentId::intern("it-badge"), "span").with_prop("title", "new");

    let inserted = insert_component(PAGE, &badge, Some(&[0, 1]), &style).unwrap();
    assert!(inserted.contains("          <span data-component-id=\"it-badge\" title=\"new\" />\n        </ol>"));

    let removed = remove_component(&inserted, badge.id, &style).unwrap();
    assert_eq!(removed, PAGE);
}

#[test]
fn prop_update_touches_only_the_marked_element() {
    let style = JsxStyle::default();
    let card = ComponentNode::new(ComponentId::intern("it-card"), "Card").with_prop("title", "Draft");
    let src = insert_component(PAGE, &card, None, &style).unwrap();

    let mut props = Props::new();
    props.insert("title".into(), json!("Published"));
    props.insert("elevation".into(), json!(2));
    let out = update_component_props(&src, card.id, &props, &style).unwrap();

    let diff = changed_lines(&src, &out);
    assert_eq!(diff.len(), 1);
    assert_eq!(
        diff[0].1.trim(),
        r#"<Card data-component-id="it-card" title="Published" elevation={2} />"#
    );
}

#[test]
fn broken_source_reports_parse_error() {
    let broken = PAGE.replace("</main>", "");
    let err = extract_components(&broken, &JsxStyle::default()).unwrap_err();
    assert!(matches!(err, CodegenError::Parse { .. }));
}

// ─── Line edits ─────────────────────────────────────────────────────────

#[test]
fn class_edit_rewrites_one_line() {
    let out = update_file(PAGE, "Save and see", &ElementUpdates::class_name("text-red-500"));
    let diff = changed_lines(PAGE, &out);
    assert_eq!(
        diff,
        vec![(
            20,
            r#"          <li className="text-red-500">Save and see your changes instantly.</li>"#
                .to_string()
        )]
    );
}

#[test]
fn locate_falls_back_to_first_list_item() {
    // The matching line has no className, so the first <li> with one wins.
    let found = locate(PAGE, "src/app/page.tsx").unwrap();
    assert_eq!(found.line_number, 17);
    assert!(found.line_text.contains("mb-2 tracking-[-.01em]"));
}

// ─── Class strings from source ──────────────────────────────────────────

#[test]
fn page_classes_parse_and_validate() {
    let parser = ClassParser::default();
    let css = parser.to_css("flex flex-col row-start-2 items-center sm:items-start");
    assert!(css.starts_with("display: flex;\nflex-direction: column;"));
    assert!(css.ends_with("@media (min-width: 640px) { align-items: flex-start; }"));

    let index = ClassIndex::from_rules(parser.table());
    let report = index.validate_string("min-h-screen p-8 pb-20 gap-16 sm:p-20");
    assert!(report.valid, "{:?}", report.errors);
}
