use thiserror::Error;

use crate::domain::ValidationError;
use crate::errors::FinanceError;

/// Failures a command reports back to the user.
///
/// Expected store and history failures are translated into the literal
/// messages below; anything else surfaces as [`CommandError::Internal`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("This record already exists in the finance tracker.")]
    DuplicateRecord,
    #[error("This source already exists in the finance tracker.")]
    DuplicateSource,
    #[error("The record index provided is invalid")]
    InvalidRecordIndex,
    #[error("The source index provided is invalid")]
    InvalidSourceIndex,
    #[error("No more commands to undo!")]
    NothingToUndo,
    #[error("No more commands to redo!")]
    NothingToRedo,
    #[error("{0}")]
    IllegalArgument(String),
    #[error("{0}")]
    Validation(String),
    #[error("Internal error: {0}")]
    Internal(#[from] FinanceError),
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::Validation(err.to_string())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
