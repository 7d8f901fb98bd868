//! Command-line interface for formfile
//! This binary prepares a form workspace, renders the form on the console,
//! and submits collected responses.
//!
//! Usage:
//!   formfile `[dir]`                 - Run an interactive form session
//!   formfile `[dir]` --check        - Prepare the workspace and verify the definition
//!   formfile `[dir]` --items        - List the parsed form items
//!   formfile `[dir]` -c extra.toml  - Layer an extra configuration file

use clap::{Arg, ArgAction, Command};
use formfile_config::{FormConfig, FormWorkspace, Loader};
use formfile_engine::{Dispatcher, Session, SubmitOutcome};
use formfile_parser::{FormLoader, ItemKind};
use std::time::Duration;

mod console;

fn main() {
    let matches = Command::new("formfile")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a plain-text form, collect answers, and save them")
        .arg(
            Arg::new("dir")
                .help("Form workspace directory")
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Extra configuration file (TOML) layered over the defaults"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Prepare the workspace, verify the form definition, and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("items")
                .long("items")
                .help("List the parsed form items and exit")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = load_config(matches.get_one::<String>("config"));
    let dir = matches.get_one::<String>("dir").expect("dir has a default");
    let workspace = FormWorkspace::new(dir, &config);

    if matches.get_flag("check") {
        handle_check_command(&workspace);
        return;
    }
    if matches.get_flag("items") {
        handle_items_command(&workspace);
        return;
    }
    handle_run_command(&workspace, &config);
}

fn load_config(extra_file: Option<&String>) -> FormConfig {
    let mut loader = Loader::new();
    if let Some(path) = extra_file {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

/// Prepare the workspace and verify the form definition parses.
fn handle_check_command(workspace: &FormWorkspace) {
    let created = workspace.ensure_default_files().unwrap_or_else(|e| {
        eprintln!("Workspace error: {}", e);
        std::process::exit(1);
    });
    for path in &created {
        println!("Created {}", path.display());
    }

    let items = load_items(workspace);
    let questions = items.iter().filter(|i| i.kind == ItemKind::Question).count();
    let media = items.len() - questions;
    println!(
        "Form OK: {} items ({} questions, {} media)",
        items.len(),
        questions,
        media
    );
    println!("Definition: {}", workspace.questions_path().display());
    println!("Responses:  {}", workspace.responses_path().display());
}

/// List the parsed items with their kinds and modifiers.
fn handle_items_command(workspace: &FormWorkspace) {
    let items = load_items(workspace);
    for (index, item) in items.iter().enumerate() {
        let kind = match item.kind {
            ItemKind::Question => "question",
            ItemKind::Media => "media",
        };
        let modifiers: Vec<&str> = item.modifiers.iter().map(|m| m.as_token()).collect();
        if modifiers.is_empty() {
            println!("{:3}  {:8}  {}", index + 1, kind, item.text);
        } else {
            println!(
                "{:3}  {:8}  {}  <{}>",
                index + 1,
                kind,
                item.text,
                modifiers.join(",")
            );
        }
    }
}

/// Run one interactive form session on the console.
fn handle_run_command(workspace: &FormWorkspace, config: &FormConfig) {
    if let Err(e) = workspace.ensure_default_files() {
        eprintln!("Workspace error: {}", e);
        std::process::exit(1);
    }

    let description = workspace.read_description().unwrap_or_else(|e| {
        eprintln!("Warning: could not read description: {}", e);
        String::new()
    });
    let remote_link = workspace.read_remote_link().unwrap_or_else(|e| {
        eprintln!("Warning: could not read remote link: {}", e);
        None
    });

    let items = load_items(workspace);
    let dispatcher = Dispatcher::new(
        workspace.responses_path(),
        Duration::from_secs(config.remote.timeout_secs),
    );
    let session = Session::new(items, dispatcher, remote_link);

    println!("Please answer the following questions");
    if !description.is_empty() {
        println!("\n{}\n", description);
    }

    let mut presenter = console::ConsolePresenter::new(workspace);
    let outcome = session.run(&mut presenter).unwrap_or_else(|e| {
        eprintln!("Session error: {}", e);
        std::process::exit(1);
    });

    match outcome {
        SubmitOutcome::Saved(_) => {}
        SubmitOutcome::Cancelled => println!("Submission cancelled; nothing was saved."),
        SubmitOutcome::Failed(_) => std::process::exit(1),
        SubmitOutcome::Rejected { .. } => unreachable!("run resubmits after rejections"),
    }
}

fn load_items(workspace: &FormWorkspace) -> Vec<formfile_parser::FormItem> {
    let loader = FormLoader::from_path(workspace.questions_path()).unwrap_or_else(|e| {
        eprintln!("Failed to load form definition: {}", e);
        std::process::exit(1);
    });
    loader.parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse form definition: {}", e);
        std::process::exit(1);
    })
}
