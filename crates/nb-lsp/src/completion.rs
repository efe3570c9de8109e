//! Completions: Tailwind class names inside `className` literals.

use crate::literals::{literal_at, offset_to_position, position_to_offset};
use nb_core::ClassIndex;
use nb_core::class_index::DEFAULT_SEARCH_LIMIT;
use tower_lsp::lsp_types::*;

/// Complete the class under the cursor. Outside a `className` literal, or
/// with nothing typed yet, there are no items.
///
/// Variant prefixes already typed (`md:`, `hover:`) are kept on every item;
/// only the part after the last `:` is searched.
pub fn compute_completions(text: &str, pos: Position, index: &ClassIndex) -> Vec<CompletionItem> {
    let offset = position_to_offset(text, pos);
    let Some(literal) = literal_at(text, offset) else {
        return Vec::new();
    };
    let Some((token_start, token)) = literal.token_at(offset) else {
        return Vec::new();
    };

    let typed = &token[..offset - token_start];
    let (variants, query) = match typed.rfind(':') {
        Some(i) => typed.split_at(i + 1),
        None => ("", typed),
    };

    let range = Range::new(
        offset_to_position(text, token_start),
        offset_to_position(text, token_start + token.len()),
    );

    index
        .search(query, DEFAULT_SEARCH_LIMIT)
        .into_iter()
        .enumerate()
        .map(|(rank, hit)| {
            let label = format!("{variants}{}", hit.name);
            CompletionItem {
                label: label.clone(),
                kind: Some(CompletionItemKind::CONSTANT),
                detail: hit.description,
                label_details: Some(CompletionItemLabelDetails {
                    detail: None,
                    description: Some(hit.category),
                }),
                sort_text: Some(format!("{rank:03}")),
                filter_text: Some(label.clone()),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, label))),
                ..Default::default()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::ClassRuleTable;

    fn index() -> ClassIndex {
        ClassIndex::from_rules(&ClassRuleTable::new())
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn completes_inside_class_literal() {
        let text = r#"<div className="p-4 fle">"#;
        let items = compute_completions(text, Position::new(0, 23), &index());
        assert_eq!(items[0].label, "flex");
        assert!(items.len() <= DEFAULT_SEARCH_LIMIT);
        match &items[0].text_edit {
            Some(CompletionTextEdit::Edit(edit)) => {
                assert_eq!(edit.range, Range::new(Position::new(0, 20), Position::new(0, 23)));
            }
            other => panic!("unexpected edit {other:?}"),
        }
    }

    #[test]
    fn keeps_variant_prefix() {
        let text = r#"<div className="md:text-">"#;
        let items = compute_completions(text, Position::new(0, 24), &index());
        assert!(!items.is_empty());
        assert!(labels(&items).iter().all(|l| l.starts_with("md:text-")));
    }

    #[test]
    fn nothing_outside_literals_or_before_typing() {
        let text = r#"<div id="fle" className="p-4 ">"#;
        assert!(compute_completions(text, Position::new(0, 12), &index()).is_empty());
        assert!(compute_completions(text, Position::new(0, 29), &index()).is_empty());
    }
}
