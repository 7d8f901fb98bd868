//! # formfile-parser
//!
//! Parser for the formfile form-definition format.
//!
//! A formfile is a line-oriented UTF-8 text file. Each unindented, non-blank
//! line starts one form item; indented follow-on lines continue the previous
//! item (continuation joining). An item may end with an angle-bracketed,
//! comma-separated modifier list:
//!
//! ```text
//! What is your name?<text,required>
//! Please describe your experience
//!     in as much detail as you like.<long>
//! diagram.png<media>
//! ```
//!
//! Parsing produces an ordered [`Vec<FormItem>`](item::FormItem); order is
//! preserved exactly and nothing is de-duplicated. Lines carrying the `media`
//! modifier become [`ItemKind::Media`](item::ItemKind) references, everything
//! else becomes an answerable question.

pub mod item;
pub mod lines;
pub mod loader;
pub mod parse;

pub use item::{FormItem, ItemKind, Modifier, ModifierSet};
pub use loader::{FormLoader, LoaderError};
pub use parse::{parse, ParseError};
