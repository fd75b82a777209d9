use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::common::{Entry, NamedEntity};
use crate::domain::fields::{Category, Description, Name};

/// A named income or spending source, unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    name: Name,
    #[serde(default)]
    description: Description,
    #[serde(default)]
    categories: BTreeSet<Category>,
}

impl Source {
    pub fn new(name: Name, description: Description, categories: BTreeSet<Category>) -> Self {
        Self {
            name,
            description,
            categories,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn categories(&self) -> &BTreeSet<Category> {
        &self.categories
    }
}

impl Entry for Source {
    fn is_same(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl NamedEntity for Source {
    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Description: {}", self.name, self.description)?;
        if !self.categories.is_empty() {
            f.write_str(" Categories: ")?;
            for category in &self.categories {
                write!(f, "{category}")?;
            }
        }
        Ok(())
    }
}
