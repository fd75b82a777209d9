use colored::Colorize;
use std::fmt;
use std::fmt::Write as _;

use crate::domain::{Record, Source};
use crate::ledger::VersionedTracker;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

/// Turns colour on or off for every later line, overriding terminal detection.
pub fn set_colored(enabled: bool) {
    colored::control::set_override(enabled);
}

fn build_label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "[i]",
        MessageKind::Success => "[✓]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Section => "",
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => format!("{} {}", build_label(kind), text),
    };

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Renders the displayed records with one-based indices and a pin marker.
pub fn render_records(tracker: &VersionedTracker) -> String {
    let records = tracker.records();
    let rows: Vec<(usize, &Record)> = tracker
        .record_view()
        .positions(records)
        .into_iter()
        .filter_map(|position| records.get(position).map(|record| (position, record)))
        .collect();
    if rows.is_empty() {
        return String::from("No records to show.");
    }

    let mut out = String::new();
    for (display, (position, record)) in rows.into_iter().enumerate() {
        let marker = if tracker.pinned().contains(position) {
            " [pinned]"
        } else {
            ""
        };
        let _ = writeln!(out, "{}. {}{}", display + 1, record, marker);
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_sources(sources: &[&Source]) -> String {
    if sources.is_empty() {
        return String::from("No sources to show.");
    }
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| format!("{}. {}", index + 1, source))
        .collect::<Vec<_>>()
        .join("\n")
}
