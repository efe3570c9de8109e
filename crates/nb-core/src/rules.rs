//! Tailwind utility-class → CSS declaration table.
//!
//! Resolution order for a token:
//!
//! 1. `<base>/<N>` opacity modifier: `N` must be a known opacity step. The
//!    opacity itself is not folded into the value.
//! 2. One responsive prefix (`sm:` … `2xl:`): annotates the breakpoint.
//! 3. One leading `!`: marks the declaration important.
//! 4. Static table lookup.
//! 5. Dynamic spacing/sizing scale (`p-4`, `mt-8`, `w-12`, `-mx-2`, `gap-3`).
//! 6. Arbitrary values (`w-[320px]`, `tracking-[-.01em]`, `bg-[#0a0a0a]`).
//!
//! Unknown tokens resolve to `None`; resolution never fails loudly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::take_while;

// ─── Types ───────────────────────────────────────────────────────────────

/// A single CSS declaration produced by a utility class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRule {
    pub property: String,
    pub value: String,
}

impl ClassRule {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Responsive breakpoint prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Breakpoint {
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bp| bp.prefix() == prefix)
    }

    /// `min-width` used in the generated `@media` query.
    pub fn min_width_px(self) -> u32 {
        match self {
            Breakpoint::Sm => 640,
            Breakpoint::Md => 768,
            Breakpoint::Lg => 1024,
            Breakpoint::Xl => 1280,
            Breakpoint::Xxl => 1536,
        }
    }
}

/// A resolved declaration with the modifiers that applied to its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStyle {
    pub property: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<Breakpoint>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub important: bool,
}

impl From<ClassRule> for ParsedStyle {
    fn from(rule: ClassRule) -> Self {
        Self {
            property: rule.property,
            value: rule.value,
            responsive: None,
            important: false,
        }
    }
}

/// Opacity steps accepted after a `/` modifier.
pub const OPACITY_STEPS: [u32; 15] = [0, 5, 10, 20, 25, 30, 40, 50, 60, 70, 75, 80, 90, 95, 100];

/// Dynamic scale prefixes → CSS property. Multi-axis shorthands map to their
/// first logical property only (`px` → `padding-left`).
const SCALE_PREFIXES: &[(&str, &str)] = &[
    ("w", "width"),
    ("h", "height"),
    ("p", "padding"),
    ("px", "padding-left"),
    ("py", "padding-top"),
    ("pt", "padding-top"),
    ("pr", "padding-right"),
    ("pb", "padding-bottom"),
    ("pl", "padding-left"),
    ("m", "margin"),
    ("mx", "margin-left"),
    ("my", "margin-top"),
    ("mt", "margin-top"),
    ("mr", "margin-right"),
    ("mb", "margin-bottom"),
    ("ml", "margin-left"),
    ("gap", "gap"),
];

/// Steps of the dynamic scale that the class index advertises.
pub const SCALE_STEPS: [u32; 17] = [0, 1, 2, 3, 4, 5, 6, 8, 10, 12, 16, 20, 24, 32, 40, 48, 64];

/// Prefixes that accept `[arbitrary]` values → default CSS property.
const ARBITRARY_PREFIXES: &[(&str, &str)] = &[
    ("w", "width"),
    ("h", "height"),
    ("min-w", "min-width"),
    ("min-h", "min-height"),
    ("max-w", "max-width"),
    ("max-h", "max-height"),
    ("p", "padding"),
    ("px", "padding-left"),
    ("py", "padding-top"),
    ("pt", "padding-top"),
    ("pr", "padding-right"),
    ("pb", "padding-bottom"),
    ("pl", "padding-left"),
    ("m", "margin"),
    ("mx", "margin-left"),
    ("my", "margin-top"),
    ("mt", "margin-top"),
    ("mr", "margin-right"),
    ("mb", "margin-bottom"),
    ("ml", "margin-left"),
    ("gap", "gap"),
    ("top", "top"),
    ("right", "right"),
    ("bottom", "bottom"),
    ("left", "left"),
    ("z", "z-index"),
    ("tracking", "letter-spacing"),
    ("leading", "line-height"),
    ("rounded", "border-radius"),
    ("text", "font-size"),
    ("bg", "background"),
    ("border", "border-width"),
];

// ─── Table ───────────────────────────────────────────────────────────────

/// Read-only token → declaration table.
///
/// Built once and handed to whoever needs it (`ClassParser`, `ClassIndex`).
/// Iteration order is stable: the order entries were defined in.
#[derive(Debug, Clone)]
pub struct ClassRuleTable {
    rules: IndexMap<String, ClassRule>,
}

impl Default for ClassRuleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRuleTable {
    /// Build the default Tailwind table.
    pub fn new() -> Self {
        let mut rules = IndexMap::with_capacity(800);
        let mut put = |token: &str, property: &str, value: &str| {
            rules.insert(token.to_string(), ClassRule::new(property, value));
        };

        for &(token, property, value) in STATIC_RULES {
            put(token, property, value);
        }

        for n in 1..=12 {
            put(
                &format!("grid-cols-{n}"),
                "grid-template-columns",
                &format!("repeat({n}, minmax(0, 1fr))"),
            );
            put(
                &format!("col-span-{n}"),
                "grid-column",
                &format!("span {n} / span {n}"),
            );
        }

        for (prefix, property) in [
            ("text", "color"),
            ("bg", "background-color"),
            ("border", "border-color"),
        ] {
            for &(name, value) in SPECIAL_COLORS {
                put(&format!("{prefix}-{name}"), property, value);
            }
            for &(color, shades) in PALETTE {
                for (shade, hex) in SHADES.iter().zip(shades) {
                    put(&format!("{prefix}-{color}-{shade}"), property, hex);
                }
            }
        }

        for step in OPACITY_STEPS {
            put(
                &format!("opacity-{step}"),
                "opacity",
                &format_fraction(step as f64 / 100.0),
            );
        }

        for &(token, property, value) in EFFECT_RULES {
            put(token, property, value);
        }

        for scale in [0, 50, 75, 90, 95, 100, 105, 110, 125, 150] {
            put(
                &format!("scale-{scale}"),
                "transform",
                &format!("scale({})", format_fraction(scale as f64 / 100.0)),
            );
        }
        for deg in [0, 1, 2, 3, 6, 12, 45, 90, 180] {
            put(
                &format!("rotate-{deg}"),
                "transform",
                &format!("rotate({deg}deg)"),
            );
        }

        for &(token, property, value) in TRANSITION_RULES {
            put(token, property, value);
        }
        for ms in [75, 100, 150, 200, 300, 500, 700, 1000] {
            put(
                &format!("duration-{ms}"),
                "transition-duration",
                &format!("{ms}ms"),
            );
        }

        for &(token, property, value) in OTHER_RULES {
            put(token, property, value);
        }

        Self { rules }
    }

    /// Verbatim static-table lookup, no modifiers.
    pub fn rule(&self, token: &str) -> Option<&ClassRule> {
        self.rules.get(token)
    }

    /// Static entries in definition order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ClassRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the dynamic-scale classes advertised for autocompletion,
    /// paired with their resolved rule.
    pub fn scale_entries(&self) -> Vec<(String, ClassRule)> {
        let mut out = Vec::with_capacity(SCALE_PREFIXES.len() * SCALE_STEPS.len());
        for &(prefix, property) in SCALE_PREFIXES {
            for step in SCALE_STEPS {
                let name = format!("{prefix}-{step}");
                if self.rules.contains_key(&name) {
                    continue;
                }
                out.push((name, ClassRule::new(property, scale_value(step, false))));
            }
        }
        out
    }

    /// Resolve a single utility token. See the module docs for the order.
    ///
    /// Each modifier is peeled at most once: one opacity suffix, one
    /// breakpoint, one `!`. Anything else (`!!p-4`, `hover:p-4`,
    /// `md:lg:p-4`) is `None`.
    pub fn resolve(&self, token: &str) -> Option<ParsedStyle> {
        let base = match split_opacity(token) {
            Some((base, modifier)) => {
                let step: u32 = modifier.parse().ok()?;
                if !OPACITY_STEPS.contains(&step) {
                    return None;
                }
                log::trace!("opacity modifier /{step} on `{base}` is not applied");
                base
            }
            None => token,
        };

        let (variants, base) = split_variants(base);
        let responsive = match variants.as_slice() {
            [] => None,
            [prefix] => Some(Breakpoint::from_prefix(prefix)?),
            _ => return None,
        };

        let (important, base) = match base.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, base),
        };
        if base.is_empty() || base.starts_with('!') {
            return None;
        }

        let rule = match self.rules.get(base) {
            Some(rule) => rule.clone(),
            None => scale_rule(base).or_else(|| arbitrary_rule(base))?,
        };
        Some(ParsedStyle {
            responsive,
            important,
            ..rule.into()
        })
    }

    /// Dynamic-scale rule for a bare token (`p-7`, `-mt-2`, `gap-14`), the
    /// part of `resolve` the static table does not list.
    pub fn dynamic_rule(token: &str) -> Option<ClassRule> {
        scale_rule(token)
    }

    /// Whether `prefix` accepts `[arbitrary]` values.
    pub fn accepts_arbitrary(prefix: &str) -> bool {
        ARBITRARY_PREFIXES.iter().any(|(p, _)| *p == prefix)
    }
}

// ─── Token helpers ───────────────────────────────────────────────────────

/// Split `base/N` when the slash sits outside any `[...]` arbitrary value.
pub fn split_opacity(token: &str) -> Option<(&str, &str)> {
    let (base, modifier) = token.rsplit_once('/')?;
    if base.is_empty() || modifier.is_empty() || modifier.contains(']') {
        return None;
    }
    if !modifier.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((base, modifier))
}

/// Split `hover:md:bg-blue-500` into (`["hover", "md"]`, `"bg-blue-500"`).
/// Colons inside `[...]` do not split.
pub fn split_variants(token: &str) -> (Vec<&str>, &str) {
    let mut variants = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in token.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                variants.push(&token[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    (variants, &token[start..])
}

/// Split `prefix-[value]` into its parts.
pub fn split_arbitrary(token: &str) -> Option<(&str, &str)> {
    let inner = token.strip_suffix(']')?;
    let open = inner.find("-[")?;
    let prefix = &inner[..open];
    let value = &inner[open + 2..];
    if prefix.is_empty() || value.is_empty() {
        return None;
    }
    Some((prefix, value))
}

/// `<->?<prefix>-<n>` with a lowercase prefix and an integer step.
fn scale_token<'a>(input: &mut &'a str) -> ModalResult<(bool, &'a str, u32)> {
    (
        opt('-').map(|sign| sign.is_some()),
        take_while(1.., |c: char| c.is_ascii_lowercase()),
        preceded('-', digit1.try_map(str::parse::<u32>)),
    )
        .parse_next(input)
}

fn scale_rule(token: &str) -> Option<ClassRule> {
    let mut rest = token;
    let (negative, prefix, step) = scale_token(&mut rest).ok()?;
    if !rest.is_empty() {
        return None;
    }
    let &(_, property) = SCALE_PREFIXES.iter().find(|(p, _)| *p == prefix)?;
    if negative && !property.starts_with("margin") {
        return None;
    }
    Some(ClassRule::new(property, scale_value(step, negative)))
}

/// `n * 0.25rem`, with `0` rendered as `0px`.
fn scale_value(step: u32, negative: bool) -> String {
    if step == 0 {
        return "0px".to_string();
    }
    let rem = format_fraction(step as f64 * 0.25);
    if negative { format!("-{rem}rem") } else { format!("{rem}rem") }
}

fn arbitrary_rule(token: &str) -> Option<ClassRule> {
    let (prefix, raw) = split_arbitrary(token)?;
    let &(_, default_property) = ARBITRARY_PREFIXES.iter().find(|(p, _)| *p == prefix)?;
    let value = raw.replace('_', " ");
    let property = if looks_like_color(&value) {
        match prefix {
            "text" => "color",
            "bg" => "background-color",
            "border" => "border-color",
            _ => default_property,
        }
    } else {
        default_property
    };
    Some(ClassRule::new(property, value))
}

fn looks_like_color(value: &str) -> bool {
    value.starts_with('#')
        || value.starts_with("rgb")
        || value.starts_with("hsl")
        || value.starts_with("oklch")
}

/// Shortest decimal form: `1.0` → `1`, `0.25` → `0.25`.
fn format_fraction(v: f64) -> String {
    format!("{v}")
}

// ─── Data ────────────────────────────────────────────────────────────────

const STATIC_RULES: &[(&str, &str, &str)] = &[
    // Typography
    ("text-xs", "font-size", "0.75rem"),
    ("text-sm", "font-size", "0.875rem"),
    ("text-base", "font-size", "1rem"),
    ("text-lg", "font-size", "1.125rem"),
    ("text-xl", "font-size", "1.25rem"),
    ("text-2xl", "font-size", "1.5rem"),
    ("text-3xl", "font-size", "1.875rem"),
    ("text-4xl", "font-size", "2.25rem"),
    ("text-5xl", "font-size", "3rem"),
    ("text-6xl", "font-size", "3.75rem"),
    ("text-7xl", "font-size", "4.5rem"),
    ("text-8xl", "font-size", "6rem"),
    ("text-9xl", "font-size", "8rem"),
    ("font-thin", "font-weight", "100"),
    ("font-extralight", "font-weight", "200"),
    ("font-light", "font-weight", "300"),
    ("font-normal", "font-weight", "400"),
    ("font-medium", "font-weight", "500"),
    ("font-semibold", "font-weight", "600"),
    ("font-bold", "font-weight", "700"),
    ("font-extrabold", "font-weight", "800"),
    ("font-black", "font-weight", "900"),
    ("font-sans", "font-family", "ui-sans-serif, system-ui, sans-serif"),
    ("font-serif", "font-family", "ui-serif, Georgia, serif"),
    ("font-mono", "font-family", "ui-monospace, SFMono-Regular, monospace"),
    ("text-left", "text-align", "left"),
    ("text-center", "text-align", "center"),
    ("text-right", "text-align", "right"),
    ("text-justify", "text-align", "justify"),
    ("italic", "font-style", "italic"),
    ("not-italic", "font-style", "normal"),
    ("underline", "text-decoration-line", "underline"),
    ("line-through", "text-decoration-line", "line-through"),
    ("no-underline", "text-decoration-line", "none"),
    ("uppercase", "text-transform", "uppercase"),
    ("lowercase", "text-transform", "lowercase"),
    ("capitalize", "text-transform", "capitalize"),
    ("normal-case", "text-transform", "none"),
    ("leading-none", "line-height", "1"),
    ("leading-tight", "line-height", "1.25"),
    ("leading-snug", "line-height", "1.375"),
    ("leading-normal", "line-height", "1.5"),
    ("leading-relaxed", "line-height", "1.625"),
    ("leading-loose", "line-height", "2"),
    ("tracking-tighter", "letter-spacing", "-0.05em"),
    ("tracking-tight", "letter-spacing", "-0.025em"),
    ("tracking-normal", "letter-spacing", "0em"),
    ("tracking-wide", "letter-spacing", "0.025em"),
    ("tracking-wider", "letter-spacing", "0.05em"),
    ("tracking-widest", "letter-spacing", "0.1em"),
    ("whitespace-nowrap", "white-space", "nowrap"),
    ("whitespace-normal", "white-space", "normal"),
    // Layout
    ("block", "display", "block"),
    ("inline-block", "display", "inline-block"),
    ("inline", "display", "inline"),
    ("flex", "display", "flex"),
    ("inline-flex", "display", "inline-flex"),
    ("grid", "display", "grid"),
    ("inline-grid", "display", "inline-grid"),
    ("contents", "display", "contents"),
    ("hidden", "display", "none"),
    ("flex-row", "flex-direction", "row"),
    ("flex-row-reverse", "flex-direction", "row-reverse"),
    ("flex-col", "flex-direction", "column"),
    ("flex-col-reverse", "flex-direction", "column-reverse"),
    ("flex-wrap", "flex-wrap", "wrap"),
    ("flex-nowrap", "flex-wrap", "nowrap"),
    ("flex-1", "flex", "1 1 0%"),
    ("flex-auto", "flex", "1 1 auto"),
    ("flex-none", "flex", "none"),
    ("grow", "flex-grow", "1"),
    ("grow-0", "flex-grow", "0"),
    ("shrink", "flex-shrink", "1"),
    ("shrink-0", "flex-shrink", "0"),
    ("items-start", "align-items", "flex-start"),
    ("items-end", "align-items", "flex-end"),
    ("items-center", "align-items", "center"),
    ("items-baseline", "align-items", "baseline"),
    ("items-stretch", "align-items", "stretch"),
    ("justify-start", "justify-content", "flex-start"),
    ("justify-end", "justify-content", "flex-end"),
    ("justify-center", "justify-content", "center"),
    ("justify-between", "justify-content", "space-between"),
    ("justify-around", "justify-content", "space-around"),
    ("justify-evenly", "justify-content", "space-evenly"),
    ("self-auto", "align-self", "auto"),
    ("self-start", "align-self", "flex-start"),
    ("self-end", "align-self", "flex-end"),
    ("self-center", "align-self", "center"),
    ("w-full", "width", "100%"),
    ("w-screen", "width", "100vw"),
    ("w-auto", "width", "auto"),
    ("w-fit", "width", "fit-content"),
    ("h-full", "height", "100%"),
    ("h-screen", "height", "100vh"),
    ("h-auto", "height", "auto"),
    ("min-h-screen", "min-height", "100vh"),
    ("min-h-full", "min-height", "100%"),
    ("min-w-0", "min-width", "0px"),
    ("min-w-full", "min-width", "100%"),
    ("max-w-xs", "max-width", "20rem"),
    ("max-w-sm", "max-width", "24rem"),
    ("max-w-md", "max-width", "28rem"),
    ("max-w-lg", "max-width", "32rem"),
    ("max-w-xl", "max-width", "36rem"),
    ("max-w-2xl", "max-width", "42rem"),
    ("max-w-3xl", "max-width", "48rem"),
    ("max-w-4xl", "max-width", "56rem"),
    ("max-w-5xl", "max-width", "64rem"),
    ("max-w-6xl", "max-width", "72rem"),
    ("max-w-7xl", "max-width", "80rem"),
    ("max-w-full", "max-width", "100%"),
    ("max-w-prose", "max-width", "65ch"),
    ("max-w-none", "max-width", "none"),
    // Spacing
    ("mx-auto", "margin-left", "auto"),
    ("my-auto", "margin-top", "auto"),
    ("m-auto", "margin", "auto"),
    ("p-px", "padding", "1px"),
    ("m-px", "margin", "1px"),
];

/// Non-palette colors shared by `text-`, `bg-`, `border-`.
const SPECIAL_COLORS: &[(&str, &str)] = &[
    ("inherit", "inherit"),
    ("current", "currentColor"),
    ("transparent", "transparent"),
    ("black", "#000000"),
    ("white", "#ffffff"),
];

const SHADES: [u32; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

const PALETTE: &[(&str, [&str; 10])] = &[
    (
        "slate",
        [
            "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155",
            "#1e293b", "#0f172a",
        ],
    ),
    (
        "gray",
        [
            "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151",
            "#1f2937", "#111827",
        ],
    ),
    (
        "red",
        [
            "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c",
            "#991b1b", "#7f1d1d",
        ],
    ),
    (
        "orange",
        [
            "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c",
            "#9a3412", "#7c2d12",
        ],
    ),
    (
        "yellow",
        [
            "#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207",
            "#854d0e", "#713f12",
        ],
    ),
    (
        "green",
        [
            "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
            "#166534", "#14532d",
        ],
    ),
    (
        "blue",
        [
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
            "#1e40af", "#1e3a8a",
        ],
    ),
    (
        "indigo",
        [
            "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca",
            "#3730a3", "#312e81",
        ],
    ),
    (
        "purple",
        [
            "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7e22ce",
            "#6b21a8", "#581c87",
        ],
    ),
    (
        "pink",
        [
            "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d",
            "#9d174d", "#831843",
        ],
    ),
];

const EFFECT_RULES: &[(&str, &str, &str)] = &[
    ("shadow-sm", "box-shadow", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
    (
        "shadow",
        "box-shadow",
        "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)",
    ),
    (
        "shadow-md",
        "box-shadow",
        "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
    ),
    (
        "shadow-lg",
        "box-shadow",
        "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
    ),
    (
        "shadow-xl",
        "box-shadow",
        "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)",
    ),
    ("shadow-2xl", "box-shadow", "0 25px 50px -12px rgb(0 0 0 / 0.25)"),
    ("shadow-inner", "box-shadow", "inset 0 2px 4px 0 rgb(0 0 0 / 0.05)"),
    ("shadow-none", "box-shadow", "0 0 #0000"),
    ("rounded-none", "border-radius", "0px"),
    ("rounded-sm", "border-radius", "0.125rem"),
    ("rounded", "border-radius", "0.25rem"),
    ("rounded-md", "border-radius", "0.375rem"),
    ("rounded-lg", "border-radius", "0.5rem"),
    ("rounded-xl", "border-radius", "0.75rem"),
    ("rounded-2xl", "border-radius", "1rem"),
    ("rounded-3xl", "border-radius", "1.5rem"),
    ("rounded-full", "border-radius", "9999px"),
    ("border", "border-width", "1px"),
    ("border-0", "border-width", "0px"),
    ("border-2", "border-width", "2px"),
    ("border-4", "border-width", "4px"),
    ("border-8", "border-width", "8px"),
    ("border-solid", "border-style", "solid"),
    ("border-dashed", "border-style", "dashed"),
    ("border-dotted", "border-style", "dotted"),
    ("border-none", "border-style", "none"),
];

const TRANSITION_RULES: &[(&str, &str, &str)] = &[
    (
        "transition",
        "transition-property",
        "color, background-color, border-color, text-decoration-color, fill, stroke, opacity, box-shadow, transform",
    ),
    ("transition-none", "transition-property", "none"),
    ("transition-all", "transition-property", "all"),
    (
        "transition-colors",
        "transition-property",
        "color, background-color, border-color, text-decoration-color, fill, stroke",
    ),
    ("transition-opacity", "transition-property", "opacity"),
    ("transition-transform", "transition-property", "transform"),
    ("ease-linear", "transition-timing-function", "linear"),
    ("ease-in", "transition-timing-function", "cubic-bezier(0.4, 0, 1, 1)"),
    ("ease-out", "transition-timing-function", "cubic-bezier(0, 0, 0.2, 1)"),
    (
        "ease-in-out",
        "transition-timing-function",
        "cubic-bezier(0.4, 0, 0.2, 1)",
    ),
];

const OTHER_RULES: &[(&str, &str, &str)] = &[
    ("static", "position", "static"),
    ("fixed", "position", "fixed"),
    ("absolute", "position", "absolute"),
    ("relative", "position", "relative"),
    ("sticky", "position", "sticky"),
    ("inset-0", "inset", "0px"),
    ("top-0", "top", "0px"),
    ("right-0", "right", "0px"),
    ("bottom-0", "bottom", "0px"),
    ("left-0", "left", "0px"),
    ("z-0", "z-index", "0"),
    ("z-10", "z-index", "10"),
    ("z-20", "z-index", "20"),
    ("z-30", "z-index", "30"),
    ("z-40", "z-index", "40"),
    ("z-50", "z-index", "50"),
    ("overflow-auto", "overflow", "auto"),
    ("overflow-hidden", "overflow", "hidden"),
    ("overflow-visible", "overflow", "visible"),
    ("overflow-scroll", "overflow", "scroll"),
    ("cursor-pointer", "cursor", "pointer"),
    ("cursor-default", "cursor", "default"),
    ("cursor-not-allowed", "cursor", "not-allowed"),
    ("select-none", "user-select", "none"),
    ("pointer-events-none", "pointer-events", "none"),
];
