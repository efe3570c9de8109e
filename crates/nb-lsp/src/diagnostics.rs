//! Diagnostics: unknown Tailwind classes in `className` literals.

use crate::literals::{class_literals, offset_to_position};
use nb_core::ClassIndex;
use serde_json::json;
use tower_lsp::lsp_types::*;

pub const SOURCE: &str = "nb-lsp";

/// One warning per invalid class, ranged over the class itself. When the
/// index has a close match, the message names it and the diagnostic's
/// `data` carries `{ "suggestion": ... }` for the quick fix.
pub fn compute_diagnostics(text: &str, index: &ClassIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for literal in class_literals(text) {
        if index.validate_string(literal.value).valid {
            continue;
        }
        for (start, class) in literal.tokens() {
            let check = index.validate(class);
            if check.valid {
                continue;
            }
            let mut message = check
                .error
                .unwrap_or_else(|| format!("Unknown class: {class}"));
            if let Some(suggestion) = &check.suggestion {
                message.push_str(&format!(" (did you mean `{suggestion}`?)"));
            }
            out.push(Diagnostic {
                range: Range::new(
                    offset_to_position(text, start),
                    offset_to_position(text, start + class.len()),
                ),
                severity: Some(DiagnosticSeverity::WARNING),
                source: Some(SOURCE.to_string()),
                message,
                data: check.suggestion.map(|s| json!({ "suggestion": s })),
                ..Default::default()
            });
        }
    }
    out
}

/// Quick fixes replacing a flagged class with its suggestion.
pub fn quick_fixes(uri: &Url, diagnostics: &[Diagnostic]) -> Vec<CodeActionOrCommand> {
    diagnostics
        .iter()
        .filter(|d| d.source.as_deref() == Some(SOURCE))
        .filter_map(|d| {
            let suggestion = d.data.as_ref()?.get("suggestion")?.as_str()?;
            let edit = TextEdit::new(d.range, suggestion.to_string());
            Some(CodeActionOrCommand::CodeAction(CodeAction {
                title: format!("Replace with `{suggestion}`"),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![d.clone()]),
                edit: Some(WorkspaceEdit {
                    changes: Some([(uri.clone(), vec![edit])].into_iter().collect()),
                    ..Default::default()
                }),
                is_preferred: Some(true),
                ..Default::default()
            }))
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

    #[test]
    fn valid_classes_produce_no_diagnostics() {
        let text = "<main className=\"flex md:p-4 hover:bg-blue-600 w-[320px]\">\n</main>";
        assert!(compute_diagnostics(text, &index()).is_empty());
    }

    #[test]
    fn unknown_class_is_ranged_and_suggested() {
        let text = "<div>\n  <p className=\"p-4 flexx\">x</p>\n</div>";
        let diags = compute_diagnostics(text, &index());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range, Range::new(Position::new(1, 20), Position::new(1, 25)));
        assert!(diags[0].message.contains("did you mean `flex`"));

        let uri = Url::parse("file:///p/page.tsx").unwrap();
        let fixes = quick_fixes(&uri, &diags);
        assert_eq!(fixes.len(), 1);
        match &fixes[0] {
            CodeActionOrCommand::CodeAction(action) => {
                assert_eq!(action.title, "Replace with `flex`");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unsupported_variant_warns_without_fix() {
        let text = r#"<b className="hover:p-4">"#;
        let diags = compute_diagnostics(text, &index());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("Variant 'hover' is not supported by p-4"));
        assert!(diags[0].data.is_none());
    }
}
