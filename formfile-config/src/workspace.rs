//! Form workspace layout
//!
//! A form workspace is a directory holding the form definition and its
//! companion files, laid out per [`FormConfig`]:
//!
//! ```text
//! <root>/
//!   Change_Form/
//!     Questions.txt      form definition (required)
//!     Description.txt    shown above the form (optional)
//!     Remote_Link.txt    submission target (optional)
//!     Responses.csv      default local table
//!   Media_Data/          files referenced by <media> items
//! ```
//!
//! Optional files defaulting to empty content when absent is expected
//! steady-state, not an error. A missing definition file is fatal to the
//! session and reported as such.

use crate::FormConfig;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Starter form definition written on first run. Must stay parseable by
/// `formfile-parser` (covered by a test below).
const DEFAULT_QUESTIONS: &str = "\
What is your name?<text>

What is your email address?

What is your age?<number>

Please describe your experience.<long>

Do you agree to the terms?<checkmark>
";

const DEFAULT_DESCRIPTION: &str = "Please fill out this form with your information.";

/// Error reading or preparing workspace files.
#[derive(Debug, Clone)]
pub enum WorkspaceError {
    /// IO failure, with the path it happened on.
    Io { path: PathBuf, message: String },
    /// The form definition file does not exist.
    MissingDefinition(PathBuf),
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::Io { path, message } => {
                write!(f, "IO error on {}: {}", path.display(), message)
            }
            WorkspaceError::MissingDefinition(path) => {
                write!(f, "form definition not found: {}", path.display())
            }
        }
    }
}

impl std::error::Error for WorkspaceError {}

/// Rough media classification by filename extension, so the presentation
/// layer can pick a renderer or an external player. The core never touches
/// playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaKind {
    pub fn classify(filename: &str) -> MediaKind {
        let lower = filename.to_lowercase();
        match lower.rsplit('.').next() {
            Some("png") | Some("jpg") | Some("jpeg") => MediaKind::Image,
            Some("mp4") => MediaKind::Video,
            Some("mp3") => MediaKind::Audio,
            _ => MediaKind::Other,
        }
    }
}

/// Resolved paths for one form workspace.
#[derive(Debug, Clone)]
pub struct FormWorkspace {
    form_dir: PathBuf,
    media_dir: PathBuf,
    questions: PathBuf,
    responses: PathBuf,
    description: PathBuf,
    remote_link: PathBuf,
}

impl FormWorkspace {
    /// Resolve workspace paths under `root` according to `config`.
    pub fn new(root: impl AsRef<Path>, config: &FormConfig) -> Self {
        let root = root.as_ref();
        let form_dir = root.join(&config.files.form_dir);
        let media_dir = root.join(&config.files.media_dir);
        FormWorkspace {
            questions: form_dir.join(&config.files.questions),
            responses: form_dir.join(&config.files.responses),
            description: form_dir.join(&config.files.description),
            remote_link: form_dir.join(&config.files.remote_link),
            form_dir,
            media_dir,
        }
    }

    pub fn form_dir(&self) -> &Path {
        &self.form_dir
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    pub fn questions_path(&self) -> &Path {
        &self.questions
    }

    /// Path of the default local response table.
    pub fn responses_path(&self) -> &Path {
        &self.responses
    }

    /// Resolve a media filename referenced by a `<media>` item.
    pub fn media_path(&self, filename: &str) -> PathBuf {
        self.media_dir.join(filename)
    }

    /// Create the workspace directories if they do not exist yet.
    pub fn ensure_layout(&self) -> Result<(), WorkspaceError> {
        for dir in [&self.form_dir, &self.media_dir] {
            fs::create_dir_all(dir).map_err(|e| WorkspaceError::Io {
                path: dir.clone(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Write starter content for any companion file that is absent.
    ///
    /// Returns the paths that were created so the caller can tell the user
    /// where to edit. Existing files are never touched.
    pub fn ensure_default_files(&self) -> Result<Vec<PathBuf>, WorkspaceError> {
        self.ensure_layout()?;
        let defaults: [(&Path, &str); 3] = [
            (&self.questions, DEFAULT_QUESTIONS),
            (&self.description, DEFAULT_DESCRIPTION),
            (&self.remote_link, ""),
        ];
        let mut created = Vec::new();
        for (path, content) in defaults {
            if !path.exists() {
                fs::write(path, content).map_err(|e| WorkspaceError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                created.push(path.to_path_buf());
            }
        }
        Ok(created)
    }

    /// Read the form definition. Absence is fatal for a session.
    pub fn read_questions(&self) -> Result<String, WorkspaceError> {
        fs::read_to_string(&self.questions).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                WorkspaceError::MissingDefinition(self.questions.clone())
            } else {
                WorkspaceError::Io {
                    path: self.questions.clone(),
                    message: e.to_string(),
                }
            }
        })
    }

    /// Read the form description; absent file means empty description.
    pub fn read_description(&self) -> Result<String, WorkspaceError> {
        match fs::read_to_string(&self.description) {
            Ok(content) => Ok(content.trim().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(WorkspaceError::Io {
                path: self.description.clone(),
                message: e.to_string(),
            }),
        }
    }

    /// Read the configured submission link.
    ///
    /// Absent file or blank content both mean "no remote target".
    pub fn read_remote_link(&self) -> Result<Option<String>, WorkspaceError> {
        match fs::read_to_string(&self.remote_link) {
            Ok(content) => {
                let link = content.trim();
                if link.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(link.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WorkspaceError::Io {
                path: self.remote_link.clone(),
                message: e.to_string(),
            }),
        }
    }
}
