//! Persistence dispatch
//!
//! A completed [`ResponseRecord`] goes to exactly one resolved
//! [`PersistenceTarget`]:
//!
//! - `Default`: append to the session's default local table;
//! - `Remote`: POST the record as JSON, success iff the server answers 200;
//! - `LocalPath`: append to an arbitrary file (a directory target gets a
//!   fixed filename, a file target gets its parent directories created).
//!
//! Local appends write the header row only when the file does not yet exist
//! at the moment of the call, so re-submissions never duplicate it. Each
//! call is a single attempt with no retries or backoff; fallback policy lives
//! with the caller.

use crate::record::ResponseRecord;
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Filename used when a local target points at a directory.
const DIRECTORY_TABLE_NAME: &str = "Responses.csv";

/// Resolved destination for a submitted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceTarget {
    /// No link configured; use the default local table.
    Default,
    /// An http/https URL to POST to.
    Remote(String),
    /// Any other non-empty link: a local file or directory.
    LocalPath(PathBuf),
}

impl PersistenceTarget {
    /// Resolve a configured link. Empty or absent links mean the default
    /// table; otherwise a single scheme-prefix check decides between remote
    /// and local, with no ambiguous state.
    pub fn resolve(link: Option<&str>) -> PersistenceTarget {
        match link.map(str::trim) {
            None | Some("") => PersistenceTarget::Default,
            Some(link) if is_web_url(link) => PersistenceTarget::Remote(link.to_string()),
            Some(link) => PersistenceTarget::LocalPath(PathBuf::from(link)),
        }
    }
}

/// True iff the link carries an http or https scheme prefix.
fn is_web_url(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Why a persistence attempt failed. All variants are recoverable: prior
/// data is never corrupted and the caller may offer a fallback.
#[derive(Debug, Clone)]
pub enum PersistError {
    /// Filesystem failure while appending locally.
    Io { path: PathBuf, message: String },
    /// CSV serialization failure.
    Csv { path: PathBuf, message: String },
    /// The endpoint answered with something other than 200.
    RemoteStatus(u16),
    /// The POST never completed (connect failure, timeout, bad URL).
    Transport(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io { path, message } => {
                write!(f, "failed to write {}: {}", path.display(), message)
            }
            PersistError::Csv { path, message } => {
                write!(f, "failed to encode row for {}: {}", path.display(), message)
            }
            PersistError::RemoteStatus(code) => {
                write!(f, "remote server returned status code {}", code)
            }
            PersistError::Transport(message) => write!(f, "failed to reach remote: {}", message),
        }
    }
}

impl std::error::Error for PersistError {}

/// Writes records to their resolved targets.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    default_table: PathBuf,
    remote_timeout: Duration,
}

impl Dispatcher {
    /// A dispatcher whose `Default` target is `default_table` and whose
    /// remote attempts give up after `remote_timeout`.
    pub fn new(default_table: impl Into<PathBuf>, remote_timeout: Duration) -> Self {
        Dispatcher {
            default_table: default_table.into(),
            remote_timeout,
        }
    }

    pub fn default_table(&self) -> &Path {
        &self.default_table
    }

    /// Write `record` to `target`. One attempt; returns a human-readable
    /// success message or the failure reason.
    pub fn persist(
        &self,
        record: &ResponseRecord,
        target: &PersistenceTarget,
    ) -> Result<String, PersistError> {
        match target {
            PersistenceTarget::Default => self.append_local(record, &self.default_table),
            PersistenceTarget::Remote(url) => self.post_remote(record, url),
            PersistenceTarget::LocalPath(path) => {
                let resolved = resolve_local_file(path)?;
                self.append_local(record, &resolved)
            }
        }
    }

    /// Append one CSV row, emitting the header first iff the file does not
    /// exist yet. A row is written whole or not at all.
    fn append_local(&self, record: &ResponseRecord, path: &Path) -> Result<String, PersistError> {
        let io_err = |e: std::io::Error| PersistError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let csv_err = |e: csv::Error| PersistError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let existed = path.is_file();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(io_err)?;
        let mut writer = csv::Writer::from_writer(file);

        if !existed {
            let header = record
                .questions
                .iter()
                .map(String::as_str)
                .chain(std::iter::once("Timestamp"));
            writer.write_record(header).map_err(csv_err)?;
        }
        let row = record
            .answers
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(record.timestamp.as_str()));
        writer.write_record(row).map_err(csv_err)?;
        writer.flush().map_err(io_err)?;

        Ok(format!("Responses saved to {}", path.display()))
    }

    /// POST the record as JSON. Success iff the endpoint returns 200.
    fn post_remote(&self, record: &ResponseRecord, url: &str) -> Result<String, PersistError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.remote_timeout)
            .build()
            .map_err(|e| PersistError::Transport(e.to_string()))?;
        let response = client
            .post(url)
            .json(record)
            .send()
            .map_err(|e| PersistError::Transport(e.to_string()))?;
        if response.status() == reqwest::StatusCode::OK {
            Ok("Responses saved remotely".to_string())
        } else {
            Err(PersistError::RemoteStatus(response.status().as_u16()))
        }
    }
}

/// Turn a local link into a concrete file path: directories get the fixed
/// table filename appended, file paths get their parent directories created.
fn resolve_local_file(path: &Path) -> Result<PathBuf, PersistError> {
    if path.is_dir() {
        return Ok(path.join(DIRECTORY_TABLE_NAME));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| PersistError::Io {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absent_or_blank_is_default() {
        assert_eq!(PersistenceTarget::resolve(None), PersistenceTarget::Default);
        assert_eq!(
            PersistenceTarget::resolve(Some("")),
            PersistenceTarget::Default
        );
        assert_eq!(
            PersistenceTarget::resolve(Some("   ")),
            PersistenceTarget::Default
        );
    }

    #[test]
    fn test_resolve_web_urls() {
        assert_eq!(
            PersistenceTarget::resolve(Some("https://example.com/submit")),
            PersistenceTarget::Remote("https://example.com/submit".into())
        );
        assert_eq!(
            PersistenceTarget::resolve(Some("HTTP://example.com")),
            PersistenceTarget::Remote("HTTP://example.com".into())
        );
    }

    #[test]
    fn test_resolve_everything_else_is_local() {
        assert_eq!(
            PersistenceTarget::resolve(Some("/data/out.csv")),
            PersistenceTarget::LocalPath(PathBuf::from("/data/out.csv"))
        );
        // Not a scheme prefix, just a name that mentions http.
        assert_eq!(
            PersistenceTarget::resolve(Some("httpdocs/out.csv")),
            PersistenceTarget::LocalPath(PathBuf::from("httpdocs/out.csv"))
        );
    }
}
