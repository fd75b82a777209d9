use thiserror::Error;
use tracing::{info, warn};

use crate::core::commands::{Command, CommandContext, CommandOutcome};
use crate::core::error::CommandError;
use crate::core::time::{Clock, SystemClock};
use crate::errors::StorageError;
use crate::ledger::{PinnedCoordinator, VersionedTracker};
use crate::storage::StorageBackend;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("Failed to save tracker: {0}")]
    Storage(#[from] StorageError),
}

/// One user session: the tracker, its pin coordinator and an optional backend
/// that receives every state change.
pub struct Session {
    tracker: VersionedTracker,
    pins: PinnedCoordinator,
    clock: Box<dyn Clock>,
    storage: Option<Box<dyn StorageBackend>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory(Box::new(SystemClock))
    }
}

impl Session {
    pub fn in_memory(clock: Box<dyn Clock>) -> Self {
        Self {
            tracker: VersionedTracker::default(),
            pins: PinnedCoordinator::new(),
            clock,
            storage: None,
        }
    }

    /// Starts from the backend's saved state, or an empty tracker when there is none.
    pub fn open(
        storage: Box<dyn StorageBackend>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, StorageError> {
        let initial = storage.load()?.unwrap_or_default();
        info!(
            path = %storage.path().display(),
            records = initial.records().len(),
            sources = initial.sources().len(),
            "opened finance tracker"
        );
        Ok(Self {
            tracker: VersionedTracker::new(initial),
            pins: PinnedCoordinator::new(),
            clock,
            storage: Some(storage),
        })
    }

    pub fn tracker(&self) -> &VersionedTracker {
        &self.tracker
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Runs `command` and writes the new state out when it changed.
    ///
    /// A failed save rolls the tracker back to where it was before the
    /// command, so memory and the data file never disagree.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, SessionError> {
        self.tracker.begin_transaction();
        let result = {
            let mut ctx = CommandContext {
                model: &mut self.tracker,
                pins: &mut self.pins,
                clock: self.clock.as_ref(),
            };
            command.execute(&mut ctx)
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.tracker.end_transaction();
                return Err(err.into());
            }
        };

        if outcome.state_changed {
            if let Some(storage) = &self.storage {
                if let Err(err) = storage.save(self.tracker.state()) {
                    warn!(error = %err, "save failed, rolling back command");
                    self.pins.discard();
                    self.tracker.rollback_transaction();
                    return Err(err.into());
                }
            }
        }
        self.tracker.end_transaction();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::core::commands::test_support::record;
    use crate::core::commands::{AddCommand, DeleteCommand};
    use crate::core::time::FixedClock;
    use crate::core::Index;
    use crate::ledger::TrackerState;
    use crate::storage;

    /// Backend whose writes fail while `failing` is set.
    struct FlakyStorage {
        failing: Arc<AtomicBool>,
    }

    impl StorageBackend for FlakyStorage {
        fn load(&self) -> storage::Result<Option<TrackerState>> {
            Ok(None)
        }

        fn save(&self, _state: &TrackerState) -> storage::Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
            }
            Ok(())
        }

        fn path(&self) -> &Path {
            Path::new("flaky.json")
        }
    }

    fn flaky_session() -> (Session, Arc<AtomicBool>) {
        let failing = Arc::new(AtomicBool::new(false));
        let storage = FlakyStorage {
            failing: Arc::clone(&failing),
        };
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let session = Session::open(Box::new(storage), Box::new(clock)).unwrap();
        (session, failing)
    }

    fn add(name: &str) -> Command {
        Command::Add(AddCommand::new(record(name, "5", "15/03/2024")))
    }

    fn delete_first() -> Command {
        Command::Delete(DeleteCommand::new(Index::from_one_based(1).unwrap()))
    }

    #[test]
    fn in_memory_session_executes_commands() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let mut session = Session::in_memory(Box::new(clock));
        session
            .execute(Command::Add(AddCommand::new(record("Lunch", "5", "15/03/2024"))))
            .unwrap();
        assert_eq!(session.tracker().records().len(), 1);

        let err = session.execute(Command::Redo).unwrap_err();
        assert!(matches!(err, SessionError::Command(CommandError::NothingToRedo)));
    }

    #[test]
    fn failed_save_takes_the_command_back() {
        let (mut session, failing) = flaky_session();
        session.execute(add("Lunch")).unwrap();
        let saved = session.tracker().state().clone();

        failing.store(true, Ordering::SeqCst);
        let err = session.execute(add("Bus")).unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert_eq!(session.tracker().state(), &saved);
        assert_eq!(session.tracker().history_len(), 2);
        assert!(!session.tracker().can_redo());

        failing.store(false, Ordering::SeqCst);
        session.execute(add("Bus")).unwrap();
        assert_eq!(session.tracker().records().len(), 2);
    }

    #[test]
    fn failed_save_restores_the_redo_branch() {
        let (mut session, failing) = flaky_session();
        session.execute(add("Lunch")).unwrap();
        session.execute(add("Bus")).unwrap();
        session.execute(Command::Undo).unwrap();

        failing.store(true, Ordering::SeqCst);
        assert!(session.execute(add("Taxi")).is_err());
        assert!(session.execute(Command::Redo).is_err());
        assert_eq!(session.tracker().records().len(), 1);

        failing.store(false, Ordering::SeqCst);
        session.execute(Command::Redo).unwrap();
        assert_eq!(session.tracker().records().len(), 2);
    }

    #[test]
    fn failed_permanent_delete_keeps_history_intact() {
        let (mut session, failing) = flaky_session();
        session.execute(add("Lunch")).unwrap();
        session.execute(delete_first()).unwrap();
        session.execute(add("Lunch")).unwrap();
        let before = session.tracker().state().clone();

        failing.store(true, Ordering::SeqCst);
        assert!(session.execute(delete_first()).is_err());
        assert_eq!(session.tracker().state(), &before);

        failing.store(false, Ordering::SeqCst);
        session.execute(Command::Undo).unwrap();
        session.execute(Command::Undo).unwrap();
        assert_eq!(session.tracker().records().len(), 1);
    }
}
