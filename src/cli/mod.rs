pub mod commands;
pub mod output;
pub mod parser;
mod shell;
pub mod shell_context;

pub use parser::{CommandParser, ParseError};
pub use shell::{run_cli, SCRIPT_ENV};
