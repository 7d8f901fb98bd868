//! Console presentation layer
//!
//! Implements the engine's [`Presenter`] seam over stdin/stdout. This is
//! where media filenames become concrete paths and toggles become
//! stringified booleans; the engine itself never sees any of it.

use formfile_config::{FormWorkspace, MediaKind};
use formfile_engine::Presenter;
use formfile_parser::{FormItem, Modifier, ModifierSet};
use std::io::{self, BufRead, Write};

pub struct ConsolePresenter<'a> {
    workspace: &'a FormWorkspace,
}

impl<'a> ConsolePresenter<'a> {
    pub fn new(workspace: &'a FormWorkspace) -> Self {
        ConsolePresenter { workspace }
    }

    /// Read one line from stdin, without the trailing newline. EOF reads as
    /// an empty line.
    fn read_line(&self) -> String {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return String::new();
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        line
    }

    fn prompt(&self, text: &str) -> String {
        print!("{}", text);
        let _ = io::stdout().flush();
        self.read_line()
    }

    fn yes_no(&self, prompt: &str) -> bool {
        let answer = self.prompt(&format!("{} [y/N]: ", prompt));
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

impl Presenter for ConsolePresenter<'_> {
    fn show_media(&mut self, filename: &str, _modifiers: &ModifierSet) {
        let path = self.workspace.media_path(filename);
        if !path.exists() {
            println!("Media file not found: {}", filename);
            return;
        }
        match MediaKind::classify(filename) {
            MediaKind::Image => println!("Image: {}", path.display()),
            MediaKind::Video => println!("Video: {} (open with your video player)", path.display()),
            MediaKind::Audio => println!("Audio: {} (open with your audio player)", path.display()),
            MediaKind::Other => println!("Media: {}", path.display()),
        }
    }

    fn collect_answer(&mut self, item: &FormItem) -> String {
        let label = if item.text.is_empty() {
            ">"
        } else {
            item.text.as_str()
        };
        if item.modifiers.contains(Modifier::Checkmark) {
            if self.yes_no(label) {
                "true".to_string()
            } else {
                "false".to_string()
            }
        } else if item.modifiers.contains(Modifier::Long) {
            println!("{} (finish with an empty line)", label);
            let mut lines = Vec::new();
            loop {
                let line = self.read_line();
                if line.trim().is_empty() {
                    break;
                }
                lines.push(line);
            }
            lines.join("\n")
        } else {
            self.prompt(&format!("{} ", label))
        }
    }

    fn show_rejection(&mut self, question: &str, reason: &str) {
        eprintln!("Question: {}", question);
        eprintln!("Error: {}", reason);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.yes_no(prompt)
    }

    fn report(&mut self, message: &str) {
        println!("{}", message);
    }
}
