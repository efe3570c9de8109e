//! `className` string literals in JSX/TSX text, and LSP position mapping.

use tower_lsp::lsp_types::Position;

const CLASS_ATTR: &str = "className=";

/// The contents of one `className="..."` (or `'...'`, `{"..."}`,
/// `` {`...`} ``) literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassLiteral<'a> {
    /// Byte offset of the first character inside the quotes.
    pub start: usize,
    pub value: &'a str,
}

impl<'a> ClassLiteral<'a> {
    pub fn end(&self) -> usize {
        self.start + self.value.len()
    }

    /// Whitespace-separated classes with their absolute byte offsets.
    pub fn tokens(&self) -> Vec<(usize, &'a str)> {
        let mut out = Vec::new();
        let mut token_start = None;
        for (i, ch) in self.value.char_indices() {
            match (ch.is_whitespace(), token_start) {
                (false, None) => token_start = Some(i),
                (true, Some(s)) => {
                    out.push((self.start + s, &self.value[s..i]));
                    token_start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = token_start {
            out.push((self.start + s, &self.value[s..]));
        }
        out
    }

    /// Class touching `offset` (cursor at either edge counts).
    pub fn token_at(&self, offset: usize) -> Option<(usize, &'a str)> {
        self.tokens()
            .into_iter()
            .find(|(s, t)| *s <= offset && offset <= s + t.len())
    }
}

pub fn class_literals(text: &str) -> Vec<ClassLiteral<'_>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut from = 0;

    while let Some(rel) = text[from..].find(CLASS_ATTR) {
        let mut at = from + rel + CLASS_ATTR.len();
        from = at;
        if bytes.get(at) == Some(&b'{') {
            at += 1;
        }
        if let Some(quote @ (b'"' | b'\'' | b'`')) = bytes.get(at).copied() {
            let start = at + 1;
            if let Some(len) = text[start..].find(quote as char) {
                out.push(ClassLiteral {
                    start,
                    value: &text[start..start + len],
                });
                from = start + len + 1;
            }
        }
    }
    out
}

/// Literal whose contents contain `offset` (edges included).
pub fn literal_at(text: &str, offset: usize) -> Option<ClassLiteral<'_>> {
    class_literals(text)
        .into_iter()
        .find(|l| l.start <= offset && offset <= l.end())
}

/// Byte offset → zero-based line/column (columns count chars).
pub fn offset_to_position(source: &str, offset: usize) -> Position {
    let mut line = 0u32;
    let mut col = 0u32;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    Position::new(line, col)
}

/// Zero-based line/column → byte offset, clamped to the line's end.
pub fn position_to_offset(source: &str, pos: Position) -> usize {
    let mut line = 0u32;
    let mut col = 0u32;
    for (i, ch) in source.char_indices() {
        if line == pos.line && (col == pos.character || ch == '\n') {
            return i;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_literals_in_all_quote_styles() {
        let src = r#"<a className="p-4 flex" /><b className='m-2' /><i className={`gap-2`} /><u className={cn(x)} />"#;
        let values: Vec<&str> = class_literals(src).iter().map(|l| l.value).collect();
        assert_eq!(values, vec!["p-4 flex", "m-2", "gap-2"]);
    }

    #[test]
    fn tokens_carry_offsets() {
        let src = r#"<div className="  p-4   md:flex">"#;
        let literal = class_literals(src)[0];
        let tokens = literal.tokens();
        assert_eq!(tokens.len(), 2);
        assert_eq!(&src[tokens[1].0..tokens[1].0 + tokens[1].1.len()], "md:flex");
        assert_eq!(literal.token_at(tokens[0].0 + 3), Some(tokens[0]));
        assert_eq!(literal.token_at(literal.start), None);
    }

    #[test]
    fn positions_round_trip() {
        let src = "line0\nline1\nline2";
        assert_eq!(offset_to_position(src, 0), Position::new(0, 0));
        assert_eq!(offset_to_position(src, 6), Position::new(1, 0));
        assert_eq!(position_to_offset(src, Position::new(1, 3)), 9);
        assert_eq!(position_to_offset(src, Position::new(0, 99)), 5);
        assert_eq!(position_to_offset(src, Position::new(2, 5)), src.len());
    }
}
