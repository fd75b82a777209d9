use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::core::commands::SummaryUnit;
use crate::domain::{Amount, Record, RecordDate};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Spending totals over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub record_count: usize,
    pub total: Amount,
    pub by_category: BTreeMap<String, Amount>,
}

impl fmt::Display for SpendingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From {} to {}: {} records\nTotal spent: {}",
            RecordDate::new(self.start),
            RecordDate::new(self.end),
            self.record_count,
            self.total
        )?;
        for (category, amount) in &self.by_category {
            write!(f, "\n  {category}: {amount}")?;
        }
        Ok(())
    }
}

pub struct SummaryService;

impl SummaryService {
    /// First day covered by a window of `window` units ending on `today`.
    ///
    /// Day windows include today; month windows start on the first of the
    /// month `window - 1` months back.
    pub fn window_start(today: NaiveDate, window: u32, unit: SummaryUnit) -> NaiveDate {
        let back = window.saturating_sub(1);
        match unit {
            SummaryUnit::Days => today
                .checked_sub_days(Days::new(u64::from(back)))
                .unwrap_or(NaiveDate::MIN),
            SummaryUnit::Months => today
                .with_day(1)
                .and_then(|first| first.checked_sub_months(Months::new(back)))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    pub fn summarize<'a>(
        records: impl IntoIterator<Item = &'a Record>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SpendingSummary {
        let mut summary = SpendingSummary {
            start,
            end,
            record_count: 0,
            total: Amount::ZERO,
            by_category: BTreeMap::new(),
        };
        let in_window = records.into_iter().filter(|record| {
            let date = record.date().date();
            date >= start && date <= end
        });
        for record in in_window {
            summary.record_count += 1;
            summary.total = summary.total.saturating_add(record.amount());
            if record.categories().is_empty() {
                Self::accumulate(&mut summary.by_category, UNCATEGORIZED, record.amount());
            }
            for category in record.categories() {
                Self::accumulate(&mut summary.by_category, category.as_str(), record.amount());
            }
        }
        summary
    }

    fn accumulate(totals: &mut BTreeMap<String, Amount>, key: &str, amount: Amount) {
        let entry = totals.entry(key.to_string()).or_insert(Amount::ZERO);
        *entry = entry.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn day_window_includes_today() {
        assert_eq!(
            SummaryService::window_start(date(15, 3, 2024), 7, SummaryUnit::Days),
            date(9, 3, 2024)
        );
        assert_eq!(
            SummaryService::window_start(date(15, 3, 2024), 1, SummaryUnit::Days),
            date(15, 3, 2024)
        );
    }

    #[test]
    fn month_window_starts_on_the_first() {
        assert_eq!(
            SummaryService::window_start(date(15, 3, 2024), 1, SummaryUnit::Months),
            date(1, 3, 2024)
        );
        assert_eq!(
            SummaryService::window_start(date(31, 3, 2024), 3, SummaryUnit::Months),
            date(1, 1, 2024)
        );
    }

    #[test]
    fn empty_summary_has_zero_total() {
        let summary = SummaryService::summarize(
            std::iter::empty::<&Record>(),
            date(1, 3, 2024),
            date(2, 3, 2024),
        );
        assert_eq!(summary.total, Amount::ZERO);
        assert!(summary.by_category.is_empty());
    }
}
