#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use finance_tracker::{
    cli::CommandParser,
    core::{CommandOutcome, FixedClock, Session, SessionError},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a session backed by a JSON data file inside `base`.
pub fn open_session(base: &std::path::Path) -> Session {
    let storage = JsonStorage::new(base.join("finance_tracker.json"));
    Session::open(Box::new(storage), Box::new(FixedClock::new(today())))
        .expect("open session on temp dir")
}

pub fn setup_test_env() -> (Session, PathBuf) {
    let base = temp_base();
    (open_session(&base), base)
}

/// Parses `line` the way the shell does and runs it.
pub fn run(session: &mut Session, line: &str) -> Result<CommandOutcome, SessionError> {
    let command = CommandParser::default()
        .parse(line, today())
        .unwrap_or_else(|err| panic!("`{line}` should parse: {err}"));
    session.execute(command)
}

pub fn run_all(session: &mut Session, lines: &[&str]) {
    for line in lines {
        run(session, line).unwrap_or_else(|err| panic!("`{line}` failed: {err}"));
    }
}

pub fn names(session: &Session) -> Vec<String> {
    session
        .tracker()
        .filtered_records()
        .iter()
        .map(|record| record.name().to_string())
        .collect()
}
