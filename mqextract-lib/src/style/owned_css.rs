// src/style/owned_css.rs: the owned stylesheet tree the extractor works on.
use std::fmt;

/// A fully-owned stylesheet, as produced by the parser adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<TopLevelRule>,
}

/// Anything that can sit in a rule list (top level or inside `@media`).
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelRule {
    Style(StyleRule),
    Media(MediaBlock),
    Keyframes(KeyframesBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StyleRule {
    /// Comment text without the `/*` `*/` delimiters.
    Comment(String),
    Declaration(OwnedDeclaration),
    Rule(OwnedRule),
    KeyframeStep(KeyframeStep),
    /// `@font-face`, `@import`, `@supports` and friends, kept verbatim.
    AtRule(AtRule),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OwnedRule {
    /// e.g. "div", ".red", "#header > a"
    pub selectors: Vec<String>,
    /// Declarations and comments, in source order.
    pub children: Vec<StyleRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OwnedDeclaration {
    pub property: String,
    /// Raw value text, `!important` included.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeStep {
    /// "from", "to", "50%", ...
    pub values: Vec<String>,
    pub children: Vec<StyleRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Lowercased name without the `@`.
    pub name: String,
    pub prelude: String,
    /// Raw text between the braces, `None` for statements like `@import`.
    pub block: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock {
    /// The condition as written, e.g. "screen and (min-width: 768px)".
    pub condition: String,
    pub rules: Vec<TopLevelRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesBlock {
    /// "-webkit-", "-moz-", ... or empty.
    pub vendor_prefix: String,
    pub name: String,
    /// Keyframe steps and comments.
    pub steps: Vec<StyleRule>,
}

/// All `@media` blocks sharing one normalized id, merged.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaGroup {
    pub id: String,
    /// First-seen condition text, used for the `@media` header.
    pub condition: String,
    /// First numeric literal of the condition.
    pub sort_value: Option<f64>,
    /// Rules and comments only.
    pub rules: Vec<StyleRule>,
}

/// Working state of one input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedStylesheet {
    pub base: Vec<StyleRule>,
    pub media_groups: Vec<MediaGroup>,
    pub keyframes: Vec<KeyframesBlock>,
}

impl ProcessedStylesheet {
    pub fn has_media(&self) -> bool {
        !self.media_groups.is_empty()
    }
}

impl fmt::Display for MediaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@media {} - {} rules", self.condition, self.rules.len())
    }
}
