//! Command execution on top of the versioned tracker.

pub mod commands;
pub mod error;
pub mod index;
pub mod services;
pub mod session;
pub mod time;

pub use commands::{Command, CommandContext, CommandOutcome, FollowUp};
pub use error::{CommandError, CommandResult};
pub use index::Index;
pub use session::{Session, SessionError};
pub use time::{Clock, FixedClock, SystemClock};
