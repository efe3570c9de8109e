//! Line-oriented element lookup.
//!
//! A lightweight heuristic for visual edits: find the first line that
//! mentions a pattern and carries a `className=` attribute. No parsing, so it
//! works on files that are temporarily broken mid-edit.

use serde::{Deserialize, Serialize};

const CLASS_ATTR: &str = "className=";

/// A matched source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedLine {
    /// 1-based.
    pub line_number: usize,
    pub line_text: String,
}

impl LocatedLine {
    pub fn index(&self) -> usize {
        self.line_number - 1
    }
}

/// Find the first line containing both `pattern` and `className=`.
///
/// When none matches, fall back to the first list item (`<li`) that carries
/// a class attribute.
#[must_use]
pub fn locate(file_text: &str, pattern: &str) -> Option<LocatedLine> {
    if let Some(found) = locate_exact(file_text, pattern) {
        return Some(found);
    }
    let fallback = first_class_line(file_text, |line| line.contains("<li"));
    if let Some(found) = &fallback {
        log::debug!(
            "pattern `{pattern}` not found; falling back to <li> on line {}",
            found.line_number
        );
    }
    fallback
}

/// `locate` without the `<li` fallback.
#[must_use]
pub fn locate_exact(file_text: &str, pattern: &str) -> Option<LocatedLine> {
    first_class_line(file_text, |line| line.contains(pattern))
}

fn first_class_line(file_text: &str, pred: impl Fn(&str) -> bool) -> Option<LocatedLine> {
    file_text
        .lines()
        .enumerate()
        .find(|(_, line)| line.contains(CLASS_ATTR) && pred(line))
        .map(|(i, line)| LocatedLine {
            line_number: i + 1,
            line_text: line.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "\
export default function Home() {
  return (
    <ol className=\"list-inside\">
      <li className=\"mb-2 tracking-[-.01em]\">
        Get started by editing <code>src/app/page.tsx</code>.
      </li>
      <li className=\"tracking-[-.01em]\">Save and see your changes.</li>
    </ol>
  );
}
";

    #[test]
    fn needs_pattern_and_class_attribute() {
        let found = locate(PAGE, "Save and see").unwrap();
        assert_eq!(found.line_number, 7);
        assert!(found.line_text.contains("Save and see"));

        // Line mentions the pattern but has no className.
        let found = locate(PAGE, "src/app/page.tsx").unwrap();
        assert_eq!(found.line_number, 4, "falls back to first <li>");
    }

    #[test]
    fn exact_lookup_has_no_fallback() {
        assert_eq!(locate_exact(PAGE, "src/app/page.tsx"), None);
        assert_eq!(locate_exact(PAGE, "Save and see").unwrap().line_number, 7);
    }

    #[test]
    fn first_match_wins() {
        let found = locate(PAGE, "tracking-").unwrap();
        assert_eq!(found.line_number, 4);
        assert_eq!(found.index(), 3);
    }

    #[test]
    fn no_match_without_list_items() {
        assert_eq!(locate("<div className=\"a\">x</div>", "nothing"), None);
        assert_eq!(locate("", "x"), None);
    }
}
