//! Form item data model
//!
//! The parser output is a flat, ordered list of [`FormItem`]s. Each item is
//! either a question (rendered as an input widget by the presentation layer)
//! or a media reference (rendered inline, never answerable). Behavior is
//! controlled by a closed vocabulary of [`Modifier`] tokens.

use std::fmt;

/// A recognized behavioral modifier attached to a form item.
///
/// The vocabulary is closed: tokens outside this set are dropped during
/// parsing rather than carried around as loose strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Boolean toggle; the raw value is the stringified bool.
    Checkmark,
    /// Multi-line input widget.
    Long,
    /// Value must contain no digits.
    Text,
    /// Value must parse as a decimal number.
    Number,
    /// Value must consist of decimal digits only.
    Integer,
    /// Value must not be left empty.
    Required,
    /// The item is a media reference, not a question.
    Media,
}

impl Modifier {
    /// Map a lowercased, trimmed tag token to a modifier.
    ///
    /// Returns `None` for tokens outside the recognized vocabulary.
    pub fn from_token(token: &str) -> Option<Modifier> {
        match token {
            "checkmark" => Some(Modifier::Checkmark),
            "long" => Some(Modifier::Long),
            "text" => Some(Modifier::Text),
            "number" => Some(Modifier::Number),
            "integer" => Some(Modifier::Integer),
            "required" => Some(Modifier::Required),
            "media" => Some(Modifier::Media),
            _ => None,
        }
    }

    /// The canonical lowercase token for this modifier.
    pub fn as_token(&self) -> &'static str {
        match self {
            Modifier::Checkmark => "checkmark",
            Modifier::Long => "long",
            Modifier::Text => "text",
            Modifier::Number => "number",
            Modifier::Integer => "integer",
            Modifier::Required => "required",
            Modifier::Media => "media",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// The modifiers attached to one item.
///
/// The parser does not de-duplicate (a line may legally repeat a tag); all
/// engine-side queries go through [`contains`](ModifierSet::contains), which
/// gives set semantics regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet(Vec<Modifier>);

impl ModifierSet {
    pub fn new() -> Self {
        ModifierSet(Vec::new())
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.0.iter()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        ModifierSet(iter.into_iter().collect())
    }
}

impl From<Vec<Modifier>> for ModifierSet {
    fn from(modifiers: Vec<Modifier>) -> Self {
        ModifierSet(modifiers)
    }
}

/// Whether an item collects input or displays media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// An answerable prompt.
    Question,
    /// A media reference; `text` holds the media filename.
    Media,
}

/// One parsed unit of a form definition.
///
/// Items are created once per parse pass and never mutated afterwards; a
/// reload replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormItem {
    pub kind: ItemKind,
    pub text: String,
    pub modifiers: ModifierSet,
}

impl FormItem {
    /// Build an item, classifying it from its modifiers: an item is media
    /// iff the `media` modifier is present.
    pub fn new(text: String, modifiers: ModifierSet) -> Self {
        let kind = if modifiers.contains(Modifier::Media) {
            ItemKind::Media
        } else {
            ItemKind::Question
        };
        FormItem {
            kind,
            text,
            modifiers,
        }
    }

    pub fn is_question(&self) -> bool {
        self.kind == ItemKind::Question
    }

    pub fn is_media(&self) -> bool {
        self.kind == ItemKind::Media
    }
}
