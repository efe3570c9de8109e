//! Single-line element edits.
//!
//! Works on the line found by `locator::locate` and rewrites only that line;
//! every other byte of the file, line endings included, is preserved.

use crate::codegen::{render_attribute, render_text};
use crate::locator::locate;
use crate::model::Props;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CLASS_VALUE: &str = "className=\"";

/// Edits to apply to one located element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementUpdates {
    pub class_name: Option<String>,
    pub text: Option<String>,
    pub props: Props,
}

impl ElementUpdates {
    pub fn class_name(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.class_name.is_none() && self.text.is_none() && self.props.is_empty()
    }
}

// ─── Tag scanning ────────────────────────────────────────────────────────

/// Byte range `(start, end)` of the first opening tag on the line, where
/// `line[start] == '<'` and `line[end] == '>'`.
fn opening_tag(line: &str) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    let start = (0..bytes.len()).find(|&i| {
        bytes[i] == b'<' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic())
    })?;

    let mut quote: Option<u8> = None;
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' | b'`' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => return Some((start, i)),
                _ => {}
            },
        }
    }
    None
}

/// Offset just after the last attribute of the opening tag.
fn attribute_insert_point(line: &str, end: usize) -> usize {
    let close = if line[..end].ends_with('/') { end - 1 } else { end };
    line[..close].trim_end().len()
}

fn inject_attribute(line: &str, attribute: &str) -> String {
    match opening_tag(line) {
        Some((_, end)) => {
            let at = attribute_insert_point(line, end);
            format!("{} {attribute}{}", &line[..at], &line[at..])
        }
        None => {
            log::debug!("no opening tag on line; `{attribute}` not injected");
            line.to_string()
        }
    }
}

/// End offset (exclusive) of an attribute value starting at `pos`.
fn value_end(line: &str, pos: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    match *bytes.get(pos)? {
        q @ (b'"' | b'\'') => line[pos + 1..].find(q as char).map(|i| pos + i + 2),
        b'{' => {
            let mut depth = 0usize;
            for (i, &b) in bytes.iter().enumerate().skip(pos) {
                match b {
                    b'{' => depth += 1,
                    b'}' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(i + 1);
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        _ => None,
    }
}

/// Span of attribute `name` (with its value) inside `line[start..end]`.
fn find_attribute(line: &str, start: usize, end: usize, name: &str) -> Option<(usize, usize)> {
    let mut from = start;
    while let Some(rel) = line[from..end].find(name) {
        let at = from + rel;
        let after = at + name.len();
        if line[..at].ends_with(char::is_whitespace) {
            match line[after..].chars().next() {
                Some('=') => return value_end(line, after + 1).map(|e| (at, e)),
                Some(c) if c.is_whitespace() || c == '/' || c == '>' => return Some((at, after)),
                _ => {}
            }
        }
        from = after;
    }
    None
}

// ─── Line edits ──────────────────────────────────────────────────────────

/// Replace the first double-quoted `className` value, or add the attribute
/// to the first opening tag when the line has none.
#[must_use]
pub fn set_class_name(line: &str, class_name: &str) -> String {
    let class_name = class_name.trim();
    if let Some(at) = line.find(CLASS_VALUE) {
        let value_start = at + CLASS_VALUE.len();
        if let Some(len) = line[value_start..].find('"') {
            return format!(
                "{}{class_name}{}",
                &line[..value_start],
                &line[value_start + len..]
            );
        }
    }
    if line.contains("className=") {
        log::debug!("className is not a string literal; line left unchanged");
        return line.to_string();
    }
    inject_attribute(line, &format!("{CLASS_VALUE}{class_name}\""))
}

/// Replace the text between the first opening tag and its closing tag.
/// Lines where the element's content does not end on the same line are
/// left unchanged.
#[must_use]
pub fn set_text_content(line: &str, text: &str) -> String {
    let Some((_, end)) = opening_tag(line) else {
        return line.to_string();
    };
    if line[..end].ends_with('/') {
        log::debug!("self-closing element has no text content");
        return line.to_string();
    }
    let content_start = end + 1;
    match line[content_start..].find('<') {
        Some(rel) if line[content_start + rel..].starts_with("</") => format!(
            "{}{}{}",
            &line[..content_start],
            render_text(text),
            &line[content_start + rel..]
        ),
        _ => line.to_string(),
    }
}

/// Set, replace or (with `null`) remove one attribute on the first opening
/// tag of the line.
#[must_use]
pub fn set_prop(line: &str, name: &str, value: &Value) -> String {
    let Some((start, end)) = opening_tag(line) else {
        return line.to_string();
    };
    match (find_attribute(line, start, end, name), value) {
        (Some((at, attr_end)), Value::Null) => {
            let from = line[..at].trim_end().len();
            format!("{}{}", &line[..from], &line[attr_end..])
        }
        (Some((at, attr_end)), value) => format!(
            "{}{}{}",
            &line[..at],
            render_attribute(name, value),
            &line[attr_end..]
        ),
        (None, Value::Null) => line.to_string(),
        (None, value) => inject_attribute(line, &render_attribute(name, value)),
    }
}

/// Apply every requested edit to one line.
#[must_use]
pub fn update_line(line: &str, updates: &ElementUpdates) -> String {
    let mut out = line.to_string();
    if let Some(class_name) = &updates.class_name {
        out = set_class_name(&out, class_name);
    }
    if let Some(text) = &updates.text {
        out = set_text_content(&out, text);
    }
    for (name, value) in &updates.props {
        out = set_prop(&out, name, value);
    }
    out
}

/// Locate the element for `pattern` and rewrite its line.
///
/// Returns the input unchanged when nothing matches or the edit is a no-op.
#[must_use]
pub fn update_file(file_text: &str, pattern: &str, updates: &ElementUpdates) -> String {
    try_update_file(file_text, pattern, updates).unwrap_or_else(|| file_text.to_string())
}

/// Like `update_file`, but `None` when nothing changed.
pub fn try_update_file(file_text: &str, pattern: &str, updates: &ElementUpdates) -> Option<String> {
    let found = locate(file_text, pattern)?;
    let segments: Vec<&str> = file_text.split_inclusive('\n').collect();
    let segment = *segments.get(found.index())?;
    let (body, ending) = segment.split_at(found.line_text.len());

    let updated = update_line(body, updates);
    if updated == body {
        return None;
    }

    let mut out = String::with_capacity(file_text.len() + updated.len());
    for (i, seg) in segments.iter().enumerate() {
        if i == found.index() {
            out.push_str(&updated);
            out.push_str(ending);
        } else {
            out.push_str(seg);
        }
    }
    Some(out)
}
