//! Hover: generated CSS for the class under the cursor.

use crate::literals::{literal_at, offset_to_position, position_to_offset};
use nb_core::rules::split_variants;
use nb_core::{ClassIndex, ClassParser};
use tower_lsp::lsp_types::*;

pub fn compute_hover(
    text: &str,
    pos: Position,
    parser: &ClassParser,
    index: &ClassIndex,
) -> Option<Hover> {
    let offset = position_to_offset(text, pos);
    let (start, class) = literal_at(text, offset)?.token_at(offset)?;

    let css = parser.to_css(class);
    let (_, base) = split_variants(class);
    let entry = index.get(base.strip_prefix('!').unwrap_or(base));
    if css.is_empty() && entry.is_none() {
        return None;
    }

    let mut value = format!("**`{class}`**");
    if !css.is_empty() {
        value.push_str(&format!("\n\n```css\n{css}\n```"));
    }
    if let Some(entry) = entry {
        value.push_str(&format!("\n\n*{}*", entry.category));
    }

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(Range::new(
            offset_to_position(text, start),
            offset_to_position(text, start + class.len()),
        )),
    })
}
