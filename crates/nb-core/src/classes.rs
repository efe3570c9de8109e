//! Class-string parser: `"p-4 md:text-lg bg-white"` → categorized styles → CSS.
//!
//! Unknown tokens are dropped from the structured result; the raw string is
//! kept for display. Parsing and CSS generation are pure, so
//! `generate_css(&parse(s))` is stable across calls.

use crate::rules::{Breakpoint, ClassRuleTable, ParsedStyle};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::Write;
use std::sync::Arc;

// ─── Categories ──────────────────────────────────────────────────────────

/// Fixed buckets a resolved declaration is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    Typography,
    Spacing,
    Layout,
    Colors,
    Effects,
    Transforms,
    Transitions,
    Other,
}

impl StyleCategory {
    /// Emission order used by `generate_css`.
    pub const ORDER: [StyleCategory; 8] = [
        StyleCategory::Typography,
        StyleCategory::Spacing,
        StyleCategory::Layout,
        StyleCategory::Colors,
        StyleCategory::Effects,
        StyleCategory::Transforms,
        StyleCategory::Transitions,
        StyleCategory::Other,
    ];

    /// Categorize by CSS property name. First matching rule wins.
    pub fn of(property: &str) -> Self {
        let has = |needles: &[&str]| needles.iter().any(|n| property.contains(n));

        if has(&["font", "text"]) {
            StyleCategory::Typography
        } else if has(&["padding", "margin"]) {
            StyleCategory::Spacing
        } else if has(&[
            "display", "flex", "grid", "width", "height", "justify", "align", "items",
        ]) {
            StyleCategory::Layout
        } else if has(&["color", "background"]) {
            StyleCategory::Colors
        } else if has(&["shadow", "opacity", "border"]) {
            StyleCategory::Effects
        } else if has(&["transform", "scale", "rotate", "translate"]) {
            StyleCategory::Transforms
        } else if has(&["transition", "animation"]) {
            StyleCategory::Transitions
        } else {
            StyleCategory::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StyleCategory::Typography => "typography",
            StyleCategory::Spacing => "spacing",
            StyleCategory::Layout => "layout",
            StyleCategory::Colors => "colors",
            StyleCategory::Effects => "effects",
            StyleCategory::Transforms => "transforms",
            StyleCategory::Transitions => "transitions",
            StyleCategory::Other => "other",
        }
    }
}

type Bucket = SmallVec<[ParsedStyle; 4]>;

/// Result of parsing one class string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedClasses {
    pub typography: Bucket,
    pub spacing: Bucket,
    pub layout: Bucket,
    pub colors: Bucket,
    pub effects: Bucket,
    pub transforms: Bucket,
    pub transitions: Bucket,
    pub other: Bucket,
    /// The input string, untouched.
    pub raw: String,
}

impl ParsedClasses {
    pub fn bucket(&self, category: StyleCategory) -> &[ParsedStyle] {
        match category {
            StyleCategory::Typography => &self.typography,
            StyleCategory::Spacing => &self.spacing,
            StyleCategory::Layout => &self.layout,
            StyleCategory::Colors => &self.colors,
            StyleCategory::Effects => &self.effects,
            StyleCategory::Transforms => &self.transforms,
            StyleCategory::Transitions => &self.transitions,
            StyleCategory::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, category: StyleCategory) -> &mut Bucket {
        match category {
            StyleCategory::Typography => &mut self.typography,
            StyleCategory::Spacing => &mut self.spacing,
            StyleCategory::Layout => &mut self.layout,
            StyleCategory::Colors => &mut self.colors,
            StyleCategory::Effects => &mut self.effects,
            StyleCategory::Transforms => &mut self.transforms,
            StyleCategory::Transitions => &mut self.transitions,
            StyleCategory::Other => &mut self.other,
        }
    }

    /// All styles in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleCategory, &ParsedStyle)> {
        StyleCategory::ORDER
            .into_iter()
            .flat_map(move |cat| self.bucket(cat).iter().map(move |s| (cat, s)))
    }

    pub fn len(&self) -> usize {
        StyleCategory::ORDER
            .iter()
            .map(|cat| self.bucket(*cat).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── Parser ──────────────────────────────────────────────────────────────

/// Parses class strings against a shared, read-only `ClassRuleTable`.
#[derive(Debug, Clone)]
pub struct ClassParser {
    table: Arc<ClassRuleTable>,
}

impl Default for ClassParser {
    fn default() -> Self {
        Self::new(Arc::new(ClassRuleTable::new()))
    }
}

impl ClassParser {
    pub fn new(table: Arc<ClassRuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ClassRuleTable {
        &self.table
    }

    /// Split on whitespace, resolve each token, bucket by property.
    #[must_use]
    pub fn parse(&self, class_string: &str) -> ParsedClasses {
        let mut parsed = ParsedClasses {
            raw: class_string.to_string(),
            ..Default::default()
        };

        for token in class_string.split_whitespace() {
            match self.table.resolve(token) {
                Some(style) => {
                    let category = StyleCategory::of(&style.property);
                    parsed.bucket_mut(category).push(style);
                }
                None => log::trace!("dropping unknown class `{token}`"),
            }
        }

        parsed
    }

    /// Convenience: parse and emit CSS in one step.
    #[must_use]
    pub fn to_css(&self, class_string: &str) -> String {
        generate_css(&self.parse(class_string))
    }
}

// ─── CSS emission ────────────────────────────────────────────────────────

/// Emit CSS declarations for a parse result.
///
/// Base declarations come first, one per line, in category order. Styles
/// carrying a breakpoint are grouped into one
/// `@media (min-width: <px>) { ... }` line per breakpoint, smallest first.
#[must_use]
pub fn generate_css(parsed: &ParsedClasses) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut responsive: Vec<(Breakpoint, &ParsedStyle)> = Vec::new();

    for (_, style) in parsed.iter() {
        match style.responsive {
            Some(bp) => responsive.push((bp, style)),
            None => lines.push(declaration(style)),
        }
    }

    for bp in Breakpoint::ALL {
        let mut block = String::new();
        for (_, style) in responsive.iter().filter(|(b, _)| *b == bp) {
            let _ = write!(block, " {}", declaration(style));
        }
        if !block.is_empty() {
            lines.push(format!(
                "@media (min-width: {}px) {{{block} }}",
                bp.min_width_px()
            ));
        }
    }

    lines.join("\n")
}

fn declaration(style: &ParsedStyle) -> String {
    let important = if style.important { " !important" } else { "" };
    format!("{}: {}{important};", style.property, style.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn categorizes_by_property() {
        let parser = ClassParser::default();
        let parsed = parser.parse("text-lg p-4 flex bg-white shadow-md scale-105 transition z-10");

        assert_eq!(parsed.typography[0].property, "font-size");
        assert_eq!(parsed.spacing[0].property, "padding");
        assert_eq!(parsed.layout[0].property, "display");
        assert_eq!(parsed.colors[0].property, "background-color");
        assert_eq!(parsed.effects[0].property, "box-shadow");
        assert_eq!(parsed.transforms[0].property, "transform");
        assert_eq!(parsed.transitions[0].property, "transition-property");
        assert_eq!(parsed.other[0].property, "z-index");
        assert_eq!(parsed.len(), 8);
    }

    #[test]
    fn category_priority() {
        // `text-align` hits typography before layout's `align`.
        assert_eq!(StyleCategory::of("text-align"), StyleCategory::Typography);
        // `border-color` hits colors before effects' `border`.
        assert_eq!(StyleCategory::of("border-color"), StyleCategory::Colors);
        assert_eq!(StyleCategory::of("border-radius"), StyleCategory::Effects);
        assert_eq!(StyleCategory::of("max-width"), StyleCategory::Layout);
        assert_eq!(StyleCategory::of("letter-spacing"), StyleCategory::Other);
    }

    #[test]
    fn unknown_tokens_dropped_raw_kept() {
        let parser = ClassParser::default();
        let parsed = parser.parse("  flex   nonsense-class  p-2 ");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.raw, "  flex   nonsense-class  p-2 ");
    }

    #[test]
    fn responsive_style_becomes_media_block() {
        let parser = ClassParser::default();
        let css = parser.to_css("md:text-lg");
        assert_eq!(css, "@media (min-width: 768px) { font-size: 1.125rem; }");
    }

    #[test]
    fn css_order_and_important() {
        let parser = ClassParser::default();
        let css = parser.to_css("bg-black !p-4 text-sm lg:flex sm:p-2 lg:text-xl");
        assert_eq!(
            css,
            "font-size: 0.875rem;\n\
             padding: 1rem !important;\n\
             background-color: #000000;\n\
             @media (min-width: 640px) { padding: 0.5rem; }\n\
             @media (min-width: 1024px) { font-size: 1.25rem; display: flex; }"
        );
    }

    #[test]
    fn generation_is_stable() {
        let parser = ClassParser::default();
        let input = "flex items-center justify-between p-6 md:p-8 text-gray-900 rounded-lg";
        let once = generate_css(&parser.parse(input));
        let twice = generate_css(&parser.parse(input));
        assert_eq!(once, twice);
        assert!(!once.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_css() {
        let parser = ClassParser::default();
        assert!(parser.parse("").is_empty());
        assert_eq!(parser.to_css("   "), "");
    }
}
