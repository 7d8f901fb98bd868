//! End-to-end session behavior over a scripted presenter.

use formfile_engine::{Dispatcher, Presenter, Session, SubmitOutcome};
use formfile_parser::{parse, FormItem, ModifierSet};
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

/// Presenter that replays canned answers and confirmation decisions while
/// recording everything shown to it.
#[derive(Default)]
struct Scripted {
    answers: VecDeque<String>,
    confirms: VecDeque<bool>,
    rejections: Vec<(String, String)>,
    reports: Vec<String>,
    media: Vec<String>,
}

impl Scripted {
    fn with_answers(answers: &[&str]) -> Self {
        Scripted {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn confirming(mut self, decisions: &[bool]) -> Self {
        self.confirms = decisions.iter().copied().collect();
        self
    }
}

impl Presenter for Scripted {
    fn show_media(&mut self, filename: &str, _modifiers: &ModifierSet) {
        self.media.push(filename.to_string());
    }

    fn collect_answer(&mut self, _item: &FormItem) -> String {
        self.answers.pop_front().expect("script ran out of answers")
    }

    fn show_rejection(&mut self, question: &str, reason: &str) {
        self.rejections.push((question.to_string(), reason.to_string()));
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.confirms
            .pop_front()
            .expect("script ran out of confirmations")
    }

    fn report(&mut self, message: &str) {
        self.reports.push(message.to_string());
    }
}

fn session_for(definition: &str, table: &Path, remote_link: Option<&str>) -> Session {
    let items = parse(definition).unwrap();
    let dispatcher = Dispatcher::new(table, Duration::from_secs(2));
    Session::new(items, dispatcher, remote_link.map(str::to_string))
}

fn serve_once(status: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        // Drain the full request (headers + content-length body) before
        // answering, so the client never sees a reset mid-write.
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let (mut header_end, mut content_length) = (None, 0usize);
        loop {
            let n = match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            buf.extend_from_slice(&chunk[..n]);
            if header_end.is_none() {
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    header_end = Some(pos + 4);
                    let headers = String::from_utf8_lossy(&buf[..pos]);
                    content_length = headers
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse().ok())?
                        })
                        .unwrap_or(0);
                }
            }
            if let Some(end) = header_end {
                if buf.len() >= end + content_length {
                    break;
                }
            }
        }
        let response =
            format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
        let _ = stream.write_all(response.as_bytes());
    });
    format!("http://{addr}/submit")
}

#[test]
fn valid_submission_saves_one_row() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("Name?<text,required>\nAge?<integer>\n", &table, None);

    let mut presenter = Scripted::with_answers(&["Alice", "42"]);
    let outcome = session.run(&mut presenter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    let content = std::fs::read_to_string(&table).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.starts_with("Name?,Age?,Timestamp"));
    assert!(presenter.rejections.is_empty());
}

#[test]
fn required_empty_field_is_rejected() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("Name?<text,required>\n", &table, None);

    let mut presenter = Scripted::default();
    let outcome = session.submit(&[String::new()], &mut presenter).unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            index: 0,
            question: "Name?".into(),
            reason: "This field is required".into(),
        }
    );
    assert!(!table.exists());
}

#[test]
fn first_failing_item_wins_in_definition_order() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("Age?<integer>\nCity?<text>\n", &table, None);

    let mut presenter = Scripted::default();
    let outcome = session
        .submit(&["12abc".into(), "99".into()], &mut presenter)
        .unwrap();

    // Both answers are invalid; only the first is surfaced.
    match outcome {
        SubmitOutcome::Rejected { index, reason, .. } => {
            assert_eq!(index, 0);
            assert_eq!(reason, "Please enter a valid integer");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(presenter.rejections.len(), 1);
}

#[test]
fn rejected_field_is_recollected_by_run() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("Age?<integer>\n", &table, None);

    let mut presenter = Scripted::with_answers(&["abc", "42"]);
    let outcome = session.run(&mut presenter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(presenter.rejections.len(), 1);
    let content = std::fs::read_to_string(&table).unwrap();
    assert!(content.lines().nth(1).unwrap().starts_with("42,"));
}

#[test]
fn empty_non_required_fields_need_confirmation() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("Name?\nNotes?\n", &table, None);

    // Declined: nothing is written.
    let mut declined = Scripted::default().confirming(&[false]);
    let outcome = session
        .submit(&["".into(), "".into()], &mut declined)
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Cancelled);
    assert!(!table.exists());

    // Accepted: the empty answers are persisted as-is.
    let mut accepted = Scripted::default().confirming(&[true]);
    let outcome = session
        .submit(&["".into(), "".into()], &mut accepted)
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert!(table.is_file());
}

#[test]
fn unchecked_checkmark_submits_without_prompts() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("Agree?<checkmark>\n", &table, None);

    // No confirmations scripted: any prompt would panic the test.
    let mut presenter = Scripted::with_answers(&["false"]);
    let outcome = session.run(&mut presenter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    let content = std::fs::read_to_string(&table).unwrap();
    assert!(content.lines().nth(1).unwrap().starts_with("false,"));
}

#[test]
fn required_checkmark_demands_true() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("Agree?<checkmark,required>\n", &table, None);

    let mut presenter = Scripted::default();
    let outcome = session.submit(&["false".into()], &mut presenter).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));

    let outcome = session.submit(&["true".into()], &mut presenter).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
}

#[test]
fn media_items_are_shown_and_never_answered() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("banner.png<media>\nName?\n", &table, None);

    assert_eq!(session.question_count(), 1);

    let mut presenter = Scripted::with_answers(&["Alice"]);
    let outcome = session.run(&mut presenter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(presenter.media, vec!["banner.png"]);
    let content = std::fs::read_to_string(&table).unwrap();
    // Only the question appears in the table.
    assert!(content.starts_with("Name?,Timestamp"));
}

#[test]
fn remote_failure_offers_local_fallback() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let url = serve_once("500 Internal Server Error");
    let session = session_for("Name?\n", &table, Some(&url));

    let mut presenter = Scripted::with_answers(&["Alice"]).confirming(&[true]);
    let outcome = session.run(&mut presenter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    // Exactly one row landed locally, none were lost.
    let content = std::fs::read_to_string(&table).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn declined_fallback_writes_nothing() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let url = serve_once("500 Internal Server Error");
    let session = session_for("Name?\n", &table, Some(&url));

    let mut presenter = Scripted::with_answers(&["Alice"]).confirming(&[false]);
    let outcome = session.run(&mut presenter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(!table.exists());
}

#[test]
fn remote_success_skips_local_table() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let url = serve_once("200 OK");
    let session = session_for("Name?\n", &table, Some(&url));

    let mut presenter = Scripted::with_answers(&["Alice"]);
    let outcome = session.run(&mut presenter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert!(!table.exists());
}

#[test]
fn answer_count_mismatch_is_a_caller_error() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("Responses.csv");
    let session = session_for("Name?\nAge?\n", &table, None);

    let mut presenter = Scripted::default();
    assert!(session.submit(&["Alice".into()], &mut presenter).is_err());
}
