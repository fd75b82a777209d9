use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::common::{Entry, NamedEntity};
use crate::domain::fields::{Amount, Category, Description, Name, RecordDate};

/// A single spending entry. Never mutated in place; edits build a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    amount: Amount,
    date: RecordDate,
    #[serde(default)]
    description: Description,
    #[serde(default)]
    categories: BTreeSet<Category>,
}

impl Record {
    pub fn new(
        name: Name,
        amount: Amount,
        date: RecordDate,
        description: Description,
        categories: BTreeSet<Category>,
    ) -> Self {
        Self {
            name,
            amount,
            date,
            description,
            categories,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> RecordDate {
        self.date
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn categories(&self) -> &BTreeSet<Category> {
        &self.categories
    }

    /// Weaker identity used for duplicate detection: name, amount and date.
    pub fn is_same_record(&self, other: &Record) -> bool {
        self.name == other.name && self.amount == other.amount && self.date == other.date
    }
}

impl Entry for Record {
    fn is_same(&self, other: &Self) -> bool {
        self.is_same_record(other)
    }
}

impl NamedEntity for Record {
    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Amount: {} Date: {} Description: {}",
            self.name, self.amount, self.date, self.description
        )?;
        if !self.categories.is_empty() {
            f.write_str(" Categories: ")?;
            for category in &self.categories {
                write!(f, "{category}")?;
            }
        }
        Ok(())
    }
}
