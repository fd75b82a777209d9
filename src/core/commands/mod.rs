//! Typed commands and their execution against the tracker.

use tracing::{info, warn};

pub mod add;
pub mod delete;
pub mod edit;
pub mod history;
pub mod list;
pub mod pin;
pub mod source;
pub mod summary;

pub use add::AddCommand;
pub use delete::DeleteCommand;
pub use edit::{EditCommand, EditRecordDescriptor};
pub use list::FindCommand;
pub use pin::PinCommand;
pub use source::{AddSourceCommand, DeleteSourceCommand};
pub use summary::{SummaryCommand, SummaryUnit};

use crate::core::error::CommandResult;
use crate::core::time::Clock;
use crate::ledger::{PinnedCoordinator, VersionedTracker};

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub model: &'a mut VersionedTracker,
    pub pins: &'a mut PinnedCoordinator,
    pub clock: &'a dyn Clock,
}

/// What the shell should do after the command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowUp {
    #[default]
    None,
    ShowHelp,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub message: String,
    /// Set when the live tracker state changed and should be written out.
    pub state_changed: bool,
    pub follow_up: FollowUp,
}

impl CommandOutcome {
    pub fn changed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            state_changed: true,
            follow_up: FollowUp::None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            state_changed: false,
            follow_up: FollowUp::None,
        }
    }

    fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = follow_up;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Delete(DeleteCommand),
    Edit(EditCommand),
    Undo,
    Redo,
    List,
    Find(FindCommand),
    Reverse,
    Summary(SummaryCommand),
    Pin(PinCommand),
    Unpin(PinCommand),
    AddSource(AddSourceCommand),
    DeleteSource(DeleteSourceCommand),
    ListSources,
    Help,
    Exit,
}

impl Command {
    pub fn word(&self) -> &'static str {
        match self {
            Command::Add(_) => "spend",
            Command::Delete(_) => "delete",
            Command::Edit(_) => "edit",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::List => "list",
            Command::Find(_) => "find",
            Command::Reverse => "list reverse",
            Command::Summary(_) => "summary",
            Command::Pin(_) => "pin",
            Command::Unpin(_) => "unpin",
            Command::AddSource(_) => "source add",
            Command::DeleteSource(_) => "source delete",
            Command::ListSources => "source list",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }

    /// Runs the command. On failure staged pins and uncommitted tracker
    /// changes are dropped, so a failed command leaves no trace.
    pub fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        let word = self.word();
        let result = match self {
            Command::Add(command) => command.execute(ctx),
            Command::Delete(command) => command.execute(ctx),
            Command::Edit(command) => command.execute(ctx),
            Command::Undo => history::undo(ctx),
            Command::Redo => history::redo(ctx),
            Command::List => list::list(ctx),
            Command::Find(command) => command.execute(ctx),
            Command::Reverse => list::reverse(ctx),
            Command::Summary(command) => command.execute(ctx),
            Command::Pin(command) => command.pin(ctx),
            Command::Unpin(command) => command.unpin(ctx),
            Command::AddSource(command) => command.execute(ctx),
            Command::DeleteSource(command) => command.execute(ctx),
            Command::ListSources => source::list(ctx),
            Command::Help => Ok(CommandOutcome::message("Showing available commands.")
                .with_follow_up(FollowUp::ShowHelp)),
            Command::Exit => Ok(CommandOutcome::message("Exiting finance tracker as requested ...")
                .with_follow_up(FollowUp::Exit)),
        };

        match &result {
            Ok(outcome) => info!(
                command = word,
                changed = outcome.state_changed,
                "command executed"
            ),
            Err(err) => {
                warn!(command = word, error = %err, "command rejected");
                ctx.pins.discard();
                ctx.model.discard_uncommitted();
            }
        }
        result
    }
}
