//! Form definition parsing
//!
//! Turns raw formfile text into an ordered list of [`FormItem`]s. Each
//! logical line (see [`crate::lines`]) may end with an angle-bracketed,
//! comma-separated tag list; the tags are lowercased, trimmed, and mapped
//! onto the closed [`Modifier`] vocabulary. Only a tag list anchored at the
//! end of the line is recognized; there is no escaping mechanism for
//! literal `<...>` in prompt text.

use crate::item::{FormItem, Modifier, ModifierSet};
use crate::lines::join_logical_lines;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TAG_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*<([^>]+)>\s*$").expect("tag list regex is valid"));

/// Error produced when a form definition yields no items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The definition contained no items at all.
    EmptyForm,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyForm => write!(f, "no items found in the form definition"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a full form definition.
///
/// Items come back in source order, one per logical line. Fails with
/// [`ParseError::EmptyForm`] when the input contains no logical lines.
pub fn parse(source: &str) -> Result<Vec<FormItem>, ParseError> {
    let items: Vec<FormItem> = join_logical_lines(source)
        .into_iter()
        .map(|line| parse_item(&line))
        .collect();
    if items.is_empty() {
        return Err(ParseError::EmptyForm);
    }
    Ok(items)
}

/// Parse one logical line into an item.
///
/// The trailing tag list (if any) is stripped from the display text;
/// unrecognized tags are dropped. A line that is nothing but a tag list
/// yields an item with empty text, which is legal.
pub fn parse_item(line: &str) -> FormItem {
    let (text, modifiers) = split_tag_list(line);
    FormItem::new(text, modifiers)
}

fn split_tag_list(line: &str) -> (String, ModifierSet) {
    match TAG_LIST.captures(line) {
        Some(captures) => {
            let tags = captures.get(1).map(|m| m.as_str()).unwrap_or("");
            let modifiers = tags
                .split(',')
                .map(|token| token.trim().to_lowercase())
                .filter_map(|token| Modifier::from_token(&token))
                .collect();
            let text = TAG_LIST.replace(line, "").trim().to_string();
            (text, modifiers)
        }
        None => (line.trim().to_string(), ModifierSet::new()),
    }
}
