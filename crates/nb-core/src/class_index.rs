//! Class-name registry for autocomplete and validation.
//!
//! The default index is derived from `ClassRuleTable` (every static token
//! plus the advertised dynamic scale), and `validate` falls back to the
//! table's dynamic scale for steps that are not advertised, so anything the
//! table resolves also validates. Custom entries can still be registered on
//! top.

use crate::classes::StyleCategory;
use crate::rules::{self, Breakpoint, ClassRuleTable};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of results returned by `search`.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

// ─── Types ───────────────────────────────────────────────────────────────

/// One registered class name and the variants it supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailwindClassEntry {
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub responsive: bool,
    pub hover: bool,
    pub focus: bool,
    pub dark: bool,
}

impl TailwindClassEntry {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: None,
            responsive: true,
            hover: false,
            focus: false,
            dark: false,
        }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this entry may appear behind `variant:`.
    pub fn supports_variant(&self, variant: &str) -> Option<bool> {
        if Breakpoint::from_prefix(variant).is_some() {
            return Some(self.responsive);
        }
        match variant {
            "hover" => Some(self.hover),
            "focus" => Some(self.focus),
            "dark" => Some(self.dark),
            _ => None,
        }
    }
}

/// A scored search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub score: u32,
}

/// Outcome of validating one class name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ClassValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    fn invalid(error: String, suggestion: Option<String>) -> Self {
        Self {
            valid: false,
            error: Some(error),
            suggestion,
        }
    }
}

/// Outcome of validating a whole class string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StringValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Bad class → best replacement.
    pub suggestions: BTreeMap<String, String>,
}

// ─── Index ───────────────────────────────────────────────────────────────

/// Name-keyed class registry. Iteration order is registration order, which
/// is also the tie-breaker for equal search scores.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    entries: IndexMap<String, TailwindClassEntry>,
    categories: IndexSet<String>,
}

impl ClassIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the index from a rule table.
    pub fn from_rules(table: &ClassRuleTable) -> Self {
        let mut index = Self::new();
        for (name, rule) in table.entries() {
            index.register(entry_for(name, &rule.property, &rule.value));
        }
        for (name, rule) in table.scale_entries() {
            index.register(entry_for(&name, &rule.property, &rule.value));
        }
        log::debug!(
            "class index built: {} classes in {} categories",
            index.len(),
            index.categories.len()
        );
        index
    }

    /// Add or replace an entry. Replacing keeps the original position.
    pub fn register(&mut self, entry: TailwindClassEntry) {
        self.categories.insert(entry.category.clone());
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&TailwindClassEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all_classes(&self) -> impl Iterator<Item = &TailwindClassEntry> {
        self.entries.values()
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a TailwindClassEntry> + 'a {
        self.entries.values().filter(move |e| e.category == category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Scored search over names and descriptions.
    ///
    /// Scores: exact 100, prefix 80, substring 60, description substring 40,
    /// name contained in the query 30, edit distance ≤ 2 → 20. Zero-score
    /// entries are excluded. Sorted by score, ties in registration order.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }
        let lowered = query.to_lowercase();

        let mut hits: Vec<Suggestion> = self
            .entries
            .values()
            .filter_map(|entry| {
                let score = score(entry, query, &lowered);
                (score > 0).then(|| Suggestion {
                    name: entry.name.clone(),
                    category: entry.category.clone(),
                    description: entry.description.clone(),
                    score,
                })
            })
            .collect();

        // Stable: equal scores keep registration order.
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(limit);
        hits
    }

    /// Validate a single class, accepting variant prefixes the entry
    /// supports, a leading `!`, opacity modifiers, and arbitrary values.
    #[must_use]
    pub fn validate(&self, name: &str) -> ClassValidation {
        let name = name.trim();
        if name.is_empty() {
            return ClassValidation::invalid("Empty class name".to_string(), None);
        }
        if self.contains(name) {
            return ClassValidation::ok();
        }

        let (variants, base) = rules::split_variants(name);
        let base = base.strip_prefix('!').unwrap_or(base);
        let base = rules::split_opacity(base).map_or(base, |(b, _)| b);

        if let Some((prefix, _)) = rules::split_arbitrary(base)
            && ClassRuleTable::accepts_arbitrary(prefix)
        {
            return self.check_variants(name, &variants, None);
        }

        if let Some(entry) = self.get(base) {
            return self.check_variants(name, &variants, Some(entry));
        }

        // Scale steps the index does not advertise (`p-7`, `-mt-2`).
        if let Some(rule) = ClassRuleTable::dynamic_rule(base) {
            let entry = entry_for(base, &rule.property, &rule.value);
            return self.check_variants(name, &variants, Some(&entry));
        }

        let suggestion = self.search(base, 3).into_iter().next().map(|hit| {
            if variants.is_empty() {
                hit.name
            } else {
                format!("{}:{}", variants.join(":"), hit.name)
            }
        });
        ClassValidation::invalid(format!("Unknown class: {name}"), suggestion)
    }

    fn check_variants(
        &self,
        name: &str,
        variants: &[&str],
        entry: Option<&TailwindClassEntry>,
    ) -> ClassValidation {
        for variant in variants {
            let supported = match entry {
                Some(entry) => entry.supports_variant(variant),
                None => is_known_variant(variant).then_some(true),
            };
            match supported {
                Some(true) => {}
                Some(false) => {
                    let class = entry.map_or(name, |e| e.name.as_str());
                    return ClassValidation::invalid(
                        format!("Variant '{variant}' is not supported by {class}"),
                        None,
                    );
                }
                None => {
                    return ClassValidation::invalid(
                        format!("Unknown variant '{variant}' in {name}"),
                        None,
                    );
                }
            }
        }
        ClassValidation::ok()
    }

    /// Validate every whitespace-separated class; never short-circuits.
    #[must_use]
    pub fn validate_string(&self, class_string: &str) -> StringValidation {
        let mut result = StringValidation {
            valid: true,
            ..Default::default()
        };
        for token in class_string.split_whitespace() {
            let check = self.validate(token);
            if check.valid {
                continue;
            }
            result.valid = false;
            if let Some(error) = check.error {
                result.errors.push(error);
            }
            if let Some(suggestion) = check.suggestion {
                result.suggestions.insert(token.to_string(), suggestion);
            }
        }
        result
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn entry_for(name: &str, property: &str, value: &str) -> TailwindClassEntry {
    let category = StyleCategory::of(property);
    let interactive = matches!(
        category,
        StyleCategory::Colors
            | StyleCategory::Effects
            | StyleCategory::Transforms
            | StyleCategory::Transitions
    );
    let mut entry = TailwindClassEntry::new(name, category.as_str())
        .describe(format!("{property}: {value}"));
    entry.hover = interactive;
    entry.focus = interactive;
    entry.dark = matches!(category, StyleCategory::Colors | StyleCategory::Effects);
    entry
}

fn is_known_variant(variant: &str) -> bool {
    Breakpoint::from_prefix(variant).is_some() || matches!(variant, "hover" | "focus" | "dark")
}

/// Name tiers compare `query` as typed; the description tier compares
/// `lowered` against the lowercased description.
fn score(entry: &TailwindClassEntry, query: &str, lowered: &str) -> u32 {
    let name = entry.name.as_str();
    if name == query {
        100
    } else if name.starts_with(query) {
        80
    } else if name.contains(query) {
        60
    } else if entry
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(lowered))
    {
        40
    } else if name.len() >= 3 && query.contains(name) {
        30
    } else if query.len() >= 3 && strsim::levenshtein(name, query) <= 2 {
        20
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index() -> ClassIndex {
        ClassIndex::from_rules(&ClassRuleTable::new())
    }

    #[test]
    fn derived_from_rule_table() {
        let table = ClassRuleTable::new();
        let index = ClassIndex::from_rules(&table);
        assert!(index.len() > table.len());
        for entry in index.all_classes() {
            assert!(
                table.resolve(&entry.name).is_some(),
                "index entry `{}` does not resolve",
                entry.name
            );
        }
    }

    #[test]
    fn categories_and_listing() {
        let index = index();
        let cats: Vec<&str> = index.categories().collect();
        assert!(cats.contains(&"typography"));
        assert!(cats.contains(&"colors"));
        assert!(index.by_category("layout").any(|e| e.name == "flex"));
        assert!(index.by_category("layout").all(|e| e.category == "layout"));
    }

    #[test]
    fn search_ranks_exact_above_substring_above_description() {
        let index = index();
        let hits = index.search("flex", DEFAULT_SEARCH_LIMIT);
        assert_eq!(hits[0].name, "flex");
        assert_eq!(hits[0].score, 100);

        let score_of = |name: &str| {
            index
                .search("flex", 500)
                .into_iter()
                .find(|h| h.name == name)
                .map(|h| h.score)
        };
        assert_eq!(score_of("flex-row"), Some(80));
        assert_eq!(score_of("inline-flex"), Some(60));
        assert_eq!(score_of("grow"), Some(40), "matched via `flex-grow: 1`");
    }

    #[test]
    fn search_is_sorted_and_limited() {
        let index = index();
        let hits = index.search("text", 5);
        assert_eq!(hits.len(), 5);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(index.search("   ", 5).is_empty());
    }

    #[test]
    fn validate_known_and_typo() {
        let index = index();
        assert!(index.validate("flex").valid);

        let typo = index.validate("flexx");
        assert!(!typo.valid);
        assert_eq!(typo.error.as_deref(), Some("Unknown class: flexx"));
        let top = index.search("flexx", 3).into_iter().next().map(|h| h.name);
        assert_eq!(typo.suggestion, top);
        assert_eq!(typo.suggestion.as_deref(), Some("flex"));
    }

    #[test]
    fn validate_without_candidates() {
        let index = index();
        let result = index.validate("zzqqxxyy");
        assert!(!result.valid);
        assert_eq!(result.suggestion, None);
    }

    #[test]
    fn validate_variants_and_modifiers() {
        let index = index();
        assert!(index.validate("md:p-4").valid);
        assert!(index.validate("hover:bg-blue-600").valid);
        assert!(index.validate("dark:text-white").valid);
        assert!(index.validate("!mt-2").valid);
        assert!(index.validate("bg-black/50").valid);
        assert!(index.validate("tracking-[-.01em]").valid);

        let unsupported = index.validate("hover:p-4");
        assert!(!unsupported.valid);
        assert_eq!(
            unsupported.error.as_deref(),
            Some("Variant 'hover' is not supported by p-4")
        );

        let unknown = index.validate("group-hover:p-4");
        assert!(!unknown.valid);

        let typo = index.validate("md:flexx");
        assert_eq!(typo.suggestion.as_deref(), Some("md:flex"));
    }

    #[test]
    fn validate_accepts_every_dynamic_step() {
        let index = index();
        for class in ["p-7", "w-72", "-mt-2", "gap-14", "md:-mx-9", "!p-11"] {
            assert!(index.validate(class).valid, "{class} should validate");
        }
        assert!(index.get("p-7").is_none(), "p-7 is not advertised");
        assert_eq!(
            index.validate("hover:p-7").error.as_deref(),
            Some("Variant 'hover' is not supported by p-7")
        );
        assert!(!index.validate("-p-2").valid);
    }

    #[test]
    fn search_names_are_case_sensitive_descriptions_are_not() {
        let mut index = ClassIndex::new();
        index.register(TailwindClassEntry::new("BtnPrimary", "components").describe("Brand Button"));
        let hits = index.search("BtnPrimary", 5);
        assert_eq!(hits[0].name, "BtnPrimary");
        assert_eq!(hits[0].score, 100);
        assert_eq!(index.search("Btn", 5)[0].score, 80);
        assert_eq!(index.search("brand button", 5)[0].score, 40);
    }

    #[test]
    fn validate_string_collects_everything() {
        let index = index();
        let result = index.validate_string("flex itemz-center p-4 flexx");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.suggestions.get("flexx").map(String::as_str), Some("flex"));
        assert!(result.suggestions.contains_key("itemz-center"));

        assert!(index.validate_string("flex p-4 md:text-lg").valid);
    }

    #[test]
    fn custom_registration() {
        let mut index = ClassIndex::new();
        index.register(TailwindClassEntry::new("btn-primary", "components").describe("Brand button"));
        assert!(index.validate("btn-primary").valid);
        assert_eq!(index.categories().collect::<Vec<_>>(), vec!["components"]);
        assert_eq!(index.search("brand", 5)[0].score, 40);
    }
}
