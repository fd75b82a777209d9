use tracing::debug;

use crate::cli::output;
use crate::cli::parser::{CommandParser, ParseError};
use crate::config::{Config, ConfigManager};
use crate::core::{Command, CommandOutcome, FollowUp, Session, SessionError, SystemClock};
use crate::errors::CliError;
use crate::storage::JsonStorage;
use crate::utils::build_info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// A line the shell could not turn into a successful command.
#[derive(Debug)]
pub(crate) enum LineError {
    Parse(ParseError),
    Session(SessionError),
}

pub struct ShellContext {
    pub mode: CliMode,
    pub parser: CommandParser,
    pub session: Session,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load_or_init()?;
        output::set_colored(config.colored_output && mode == CliMode::Interactive);

        let storage = JsonStorage::new(config_manager.data_path(&config));
        let session = Session::open(Box::new(storage), Box::new(SystemClock))?;

        Ok(ShellContext {
            mode,
            parser: CommandParser::default(),
            session,
            config_manager,
            config,
            last_command: None,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        match self.mode {
            CliMode::Interactive => String::from("finance> "),
            CliMode::Script => String::new(),
        }
    }

    pub fn command_words(&self) -> Vec<&'static str> {
        self.parser.registry().words().collect()
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, LineError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(LoopControl::Continue);
        }
        self.last_command = Some(trimmed.to_string());

        let today = self.session.clock().today();
        let command = self.parser.parse(trimmed, today).map_err(LineError::Parse)?;
        debug!(command = command.word(), "parsed command line");
        let outcome = self
            .session
            .execute(command.clone())
            .map_err(LineError::Session)?;
        Ok(self.present(&command, outcome))
    }

    fn present(&mut self, command: &Command, outcome: CommandOutcome) -> LoopControl {
        output::success(&outcome.message);
        let tracker = self.session.tracker();
        match command {
            Command::List
            | Command::Find(_)
            | Command::Reverse
            | Command::Add(_)
            | Command::Delete(_)
            | Command::Edit(_)
            | Command::Undo
            | Command::Redo
            | Command::Pin(_)
            | Command::Unpin(_) => println!("{}", output::render_records(tracker)),
            Command::ListSources | Command::AddSource(_) | Command::DeleteSource(_) => {
                println!("{}", output::render_sources(&tracker.filtered_sources()))
            }
            Command::Summary(_) | Command::Help | Command::Exit => {}
        }

        match outcome.follow_up {
            FollowUp::None => LoopControl::Continue,
            FollowUp::ShowHelp => {
                self.print_help();
                LoopControl::Continue
            }
            FollowUp::Exit => {
                self.running = false;
                LoopControl::Exit
            }
        }
    }

    pub fn print_help(&self) {
        output::section("Available commands");
        for definition in self.parser.registry().iter() {
            output::info(format!("  {:<16} {}", definition.name, definition.description));
            println!("      {}", definition.usage);
        }
        let build = build_info::current();
        output::info(format!(
            "finance tracker {} ({} {}, built {})",
            build.version, build.git_hash, build.profile, build.timestamp
        ));
    }

    pub(crate) fn report_error(&self, err: LineError) {
        match err {
            LineError::Parse(ParseError::UnknownCommand { input, suggestion }) => {
                let input = if input.is_empty() {
                    String::from("(empty)")
                } else {
                    input
                };
                output::warning(ParseError::UnknownCommand {
                    input,
                    suggestion: None,
                });
                if let Some(suggestion) = suggestion {
                    output::info(format!("Suggestion: `{}`?", suggestion));
                }
            }
            LineError::Parse(other) => output::error(other),
            LineError::Session(SessionError::Command(err)) => output::error(err),
            LineError::Session(SessionError::Storage(err)) => {
                output::error(format!("Could not save the finance tracker: {err}"))
            }
        }
    }
}
