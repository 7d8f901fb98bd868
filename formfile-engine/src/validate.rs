//! Modifier-driven answer validation
//!
//! The rules run in a fixed order and the first failure wins. The integer,
//! number, and text checks are deliberately sequential, independent checks
//! rather than a dispatch on a single modifier: a field carrying several of
//! them gets each check applied in the documented order.

use formfile_parser::{Modifier, ModifierSet};
use std::fmt;

/// Why an answer was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field left empty (or a required toggle left unset).
    RequiredMissing,
    /// Value is not a plain run of decimal digits.
    NotAnInteger,
    /// Value does not parse as a decimal number.
    NotANumber,
    /// Value contains digits but the field is text-only.
    NotTextOnly,
}

impl ValidationError {
    /// The user-facing reason string.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::RequiredMissing => "This field is required",
            ValidationError::NotAnInteger => "Please enter a valid integer",
            ValidationError::NotANumber => "Please enter a valid number",
            ValidationError::NotTextOnly => "This field should contain only text",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

impl std::error::Error for ValidationError {}

/// Validate one raw answer against an item's modifiers.
///
/// Checkmark fields carry the stringified bool from a toggle and bypass the
/// text rules entirely; `required` on a checkmark demands the literal
/// `"true"`. For everything else the order is: required/empty handling
/// first, then the integer, number, and text checks. The first failure wins;
/// an empty non-required field skips the later rules.
pub fn validate(raw_input: &str, modifiers: &ModifierSet) -> Result<(), ValidationError> {
    let trimmed = raw_input.trim();

    if modifiers.contains(Modifier::Checkmark) {
        if modifiers.contains(Modifier::Required) && trimmed != "true" {
            return Err(ValidationError::RequiredMissing);
        }
        return Ok(());
    }

    if trimmed.is_empty() {
        if modifiers.contains(Modifier::Required) {
            return Err(ValidationError::RequiredMissing);
        }
        return Ok(());
    }

    if modifiers.contains(Modifier::Integer) && !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotAnInteger);
    }

    if modifiers.contains(Modifier::Number) && trimmed.parse::<f64>().is_err() {
        return Err(ValidationError::NotANumber);
    }

    if modifiers.contains(Modifier::Text) && trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotTextOnly);
    }

    Ok(())
}
