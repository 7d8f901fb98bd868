//! Session orchestration
//!
//! One [`Session`] owns one form lifecycle: present items, collect raw
//! answers, validate them in order, confirm empty fields, build the record,
//! and hand it to the persistence [`Dispatcher`], offering a single local
//! fallback when a remote attempt fails. Everything user-facing goes
//! through the [`Presenter`] seam; the session never touches widgets,
//! stdin, or players.

use crate::persist::{Dispatcher, PersistenceTarget};
use crate::record::{RecordError, ResponseRecord};
use crate::validate::validate;
use formfile_parser::{FormItem, Modifier, ModifierSet};
use std::fmt;

/// Presentation-layer callbacks.
///
/// Media items only ever reach the presenter as a filename plus modifier
/// set; locating the file and invoking a player is presentation business.
pub trait Presenter {
    /// Display a media reference.
    fn show_media(&mut self, filename: &str, modifiers: &ModifierSet);
    /// Collect the raw answer for a question item. Checkmark items must
    /// come back as the stringified bool (`"true"` / `"false"`).
    fn collect_answer(&mut self, item: &FormItem) -> String;
    /// Surface a per-field rejection.
    fn show_rejection(&mut self, question: &str, reason: &str);
    /// Ask a yes/no question; `true` means proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// Report a final outcome or persistence message.
    fn report(&mut self, message: &str);
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted; carries the success message.
    Saved(String),
    /// A field failed validation; nothing written. `index` addresses the
    /// question (not the item) so the caller can re-collect just that one.
    Rejected {
        index: usize,
        question: String,
        reason: String,
    },
    /// The user declined one of the confirmation gates; nothing written.
    Cancelled,
    /// Persistence failed (and any offered fallback was declined or also
    /// failed); nothing new written.
    Failed(String),
}

/// Caller-side misuse of the session API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// One answer per question is required.
    AnswerCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AnswerCountMismatch { expected, actual } => write!(
                f,
                "expected {} answers, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<RecordError> for SessionError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::LengthMismatch { questions, answers } => {
                SessionError::AnswerCountMismatch {
                    expected: questions,
                    actual: answers,
                }
            }
        }
    }
}

/// One form lifecycle over a parsed item list.
pub struct Session {
    items: Vec<FormItem>,
    dispatcher: Dispatcher,
    remote_link: Option<String>,
}

impl Session {
    pub fn new(items: Vec<FormItem>, dispatcher: Dispatcher, remote_link: Option<String>) -> Self {
        Session {
            items,
            dispatcher,
            remote_link,
        }
    }

    /// All items, in definition order.
    pub fn items(&self) -> &[FormItem] {
        &self.items
    }

    /// The answerable items, in definition order.
    pub fn questions(&self) -> impl Iterator<Item = &FormItem> {
        self.items.iter().filter(|item| item.is_question())
    }

    pub fn question_count(&self) -> usize {
        self.questions().count()
    }

    /// Run the whole interactive lifecycle: present items, collect answers,
    /// and resubmit after rejections (re-collecting only the rejected
    /// field) until the submission saves, cancels, or fails.
    pub fn run(&self, presenter: &mut dyn Presenter) -> Result<SubmitOutcome, SessionError> {
        let mut answers = Vec::with_capacity(self.question_count());
        for item in &self.items {
            if item.is_media() {
                presenter.show_media(&item.text, &item.modifiers);
            } else {
                answers.push(presenter.collect_answer(item));
            }
        }

        loop {
            match self.submit(&answers, presenter)? {
                SubmitOutcome::Rejected { index, .. } => {
                    // The rejection was already shown; re-collect just that
                    // field and resubmit.
                    let item = self
                        .questions()
                        .nth(index)
                        .expect("rejected index addresses a question");
                    answers[index] = presenter.collect_answer(item);
                }
                outcome => return Ok(outcome),
            }
        }
    }

    /// Validate and persist one set of raw answers (one per question, in
    /// definition order). Nothing is written unless every gate passes.
    pub fn submit(
        &self,
        answers: &[String],
        presenter: &mut dyn Presenter,
    ) -> Result<SubmitOutcome, SessionError> {
        let questions: Vec<&FormItem> = self.questions().collect();
        if questions.len() != answers.len() {
            return Err(SessionError::AnswerCountMismatch {
                expected: questions.len(),
                actual: answers.len(),
            });
        }

        // First pass: per-field validation, stop at the first rejection.
        for (index, (item, answer)) in questions.iter().zip(answers).enumerate() {
            if let Err(err) = validate(answer, &item.modifiers) {
                presenter.show_rejection(&item.text, err.reason());
                return Ok(SubmitOutcome::Rejected {
                    index,
                    question: item.text.clone(),
                    reason: err.reason().to_string(),
                });
            }
        }

        // Second pass: required fields that are still empty. Validation has
        // already rejected these, so this gate normally finds nothing; it is
        // kept as its own explicit pass rather than folded into the rules.
        for (item, answer) in questions.iter().zip(answers) {
            if item.modifiers.contains(Modifier::Required) && answer.trim().is_empty() {
                let prompt = format!(
                    "Required field '{}' is empty. Submit anyway?",
                    item.text
                );
                if !presenter.confirm(&prompt) {
                    return Ok(SubmitOutcome::Cancelled);
                }
            }
        }

        // Batch warning for empty non-required fields.
        let empty_fields: Vec<&str> = questions
            .iter()
            .zip(answers)
            .filter(|(item, answer)| {
                !item.modifiers.contains(Modifier::Required) && answer.trim().is_empty()
            })
            .map(|(item, _)| item.text.as_str())
            .collect();
        if !empty_fields.is_empty() {
            let mut prompt = String::from("The following non-required fields are empty:\n\n");
            for question in &empty_fields {
                prompt.push_str(&format!("- {}\n", question));
            }
            prompt.push_str("\nDo you want to submit anyway?");
            if !presenter.confirm(&prompt) {
                return Ok(SubmitOutcome::Cancelled);
            }
        }

        let record = ResponseRecord::new(
            questions.iter().map(|item| item.text.clone()).collect(),
            answers.to_vec(),
        )?;

        let target = PersistenceTarget::resolve(self.remote_link.as_deref());
        match self.dispatcher.persist(&record, &target) {
            Ok(message) => {
                presenter.report(&message);
                Ok(SubmitOutcome::Saved(message))
            }
            Err(err) if matches!(target, PersistenceTarget::Remote(_)) => {
                let prompt = format!(
                    "{}\n\nWould you like to save to the default location instead?",
                    err
                );
                if !presenter.confirm(&prompt) {
                    return Ok(SubmitOutcome::Failed(err.to_string()));
                }
                match self.dispatcher.persist(&record, &PersistenceTarget::Default) {
                    Ok(message) => {
                        presenter.report(&message);
                        Ok(SubmitOutcome::Saved(message))
                    }
                    Err(fallback_err) => {
                        presenter.report(&fallback_err.to_string());
                        Ok(SubmitOutcome::Failed(fallback_err.to_string()))
                    }
                }
            }
            Err(err) => {
                presenter.report(&err.to_string());
                Ok(SubmitOutcome::Failed(err.to_string()))
            }
        }
    }
}
