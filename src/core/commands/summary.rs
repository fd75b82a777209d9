use std::fmt;

use crate::core::commands::{CommandContext, CommandOutcome};
use crate::core::error::CommandResult;
use crate::core::services::SummaryService;
use crate::errors::{FinanceError, Result};

pub const DEFAULT_WINDOW: i64 = 7;
pub const DEFAULT_UNIT: &str = "d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryUnit {
    Days,
    Months,
}

impl SummaryUnit {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "d" => Ok(SummaryUnit::Days),
            "m" => Ok(SummaryUnit::Months),
            other => Err(FinanceError::IllegalArgument(format!(
                "Summary unit must be `d` or `m`, got `{other}`"
            ))),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SummaryUnit::Days => "d",
            SummaryUnit::Months => "m",
        }
    }
}

impl fmt::Display for SummaryUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SummaryUnit::Days => "days",
            SummaryUnit::Months => "months",
        })
    }
}

/// Read-only spending summary over the trailing window ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCommand {
    window: u32,
    unit: SummaryUnit,
}

impl Default for SummaryCommand {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW as u32,
            unit: SummaryUnit::Days,
        }
    }
}

impl SummaryCommand {
    pub fn new(window: i64, unit: &str) -> Result<Self> {
        if window <= 0 {
            return Err(FinanceError::IllegalArgument(format!(
                "Summary window must be a positive number, got {window}"
            )));
        }
        let window = u32::try_from(window).map_err(|_| {
            FinanceError::IllegalArgument(format!("Summary window {window} is too large"))
        })?;
        Ok(Self {
            window,
            unit: SummaryUnit::parse(unit)?,
        })
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn unit(&self) -> SummaryUnit {
        self.unit
    }

    pub(super) fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        let today = ctx.clock.today();
        let start = SummaryService::window_start(today, self.window, self.unit);
        let summary = SummaryService::summarize(ctx.model.records(), start, today);
        Ok(CommandOutcome::message(format!(
            "Summary for the last {} {}\n{}",
            self.window, self.unit, summary
        )))
    }
}
