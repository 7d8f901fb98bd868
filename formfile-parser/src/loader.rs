//! Form loading utilities
//!
//! `FormLoader` loads form-definition text from a file or string and parses
//! it. Used by the CLI and by tests.

use crate::item::FormItem;
use crate::parse::{parse, ParseError};
use std::fs;
use std::path::Path;

/// Error that can occur when loading a form definition.
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading the file.
    IoError(String),
    /// The definition did not parse into any items.
    ParseError(ParseError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::ParseError(err) => write!(f, "parse error: {}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

impl From<ParseError> for LoaderError {
    fn from(err: ParseError) -> Self {
        LoaderError::ParseError(err)
    }
}

/// Form definition loader.
///
/// ```ignore
/// let items = FormLoader::from_path("Questions.txt")?.parse()?;
/// ```
pub struct FormLoader {
    source: String,
}

impl FormLoader {
    /// Load from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(FormLoader { source })
    }

    /// Load from a string.
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        FormLoader {
            source: source.into(),
        }
    }

    /// Parse the source into an ordered item list.
    pub fn parse(&self) -> Result<Vec<FormItem>, LoaderError> {
        Ok(parse(&self.source)?)
    }

    /// The raw source text.
    pub fn source_ref(&self) -> &str {
        &self.source
    }
}
