//! Ordered collection that rejects duplicate entries.

use std::slice;

use crate::domain::Entry;
use crate::errors::{FinanceError, Result};

/// Ordered sequence of entries, unique under [`Entry::is_same`].
///
/// Insertion order is preserved for display. The list knows nothing about
/// other lists; cross-list rules belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
    entries: Vec<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Entry> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from existing entries, failing on the first duplicate.
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut list = Self::new();
        for entry in entries {
            list.add(entry)?;
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn contains(&self, entry: &T) -> bool {
        self.position_of(entry).is_some()
    }

    /// Full structural equality rather than `is_same`.
    pub fn contains_exact(&self, entry: &T) -> bool {
        self.entries.iter().any(|existing| existing == entry)
    }

    pub fn position_of(&self, entry: &T) -> Option<usize> {
        self.entries.iter().position(|existing| existing.is_same(entry))
    }

    pub fn position_of_exact(&self, entry: &T) -> Option<usize> {
        self.entries.iter().position(|existing| existing == entry)
    }

    pub fn add(&mut self, entry: T) -> Result<()> {
        if self.contains(&entry) {
            return Err(FinanceError::Duplicate(entry.to_string()));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Removes the entry matching `entry` and returns the stored value with its position.
    pub fn remove(&mut self, entry: &T) -> Result<(usize, T)> {
        let position = self
            .position_of(entry)
            .ok_or_else(|| FinanceError::NotFound(entry.to_string()))?;
        Ok((position, self.entries.remove(position)))
    }

    pub fn remove_at(&mut self, position: usize) -> Option<T> {
        (position < self.entries.len()).then(|| self.entries.remove(position))
    }

    /// Replaces `target` with `edited`, keeping its position.
    pub fn replace(&mut self, target: &T, edited: T) -> Result<usize> {
        let position = self
            .position_of(target)
            .ok_or_else(|| FinanceError::NotFound(target.to_string()))?;
        let collides = self
            .entries
            .iter()
            .enumerate()
            .any(|(idx, existing)| idx != position && existing.is_same(&edited));
        if collides {
            return Err(FinanceError::Duplicate(edited.to_string()));
        }
        self.entries[position] = edited;
        Ok(position)
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T> From<UniqueList<T>> for Vec<T> {
    fn from(list: UniqueList<T>) -> Self {
        list.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, Description, Name, Record, RecordDate};
    use std::collections::BTreeSet;

    fn record(name: &str, amount: &str, description: &str) -> Record {
        Record::new(
            Name::parse(name).unwrap(),
            Amount::parse(amount).unwrap(),
            RecordDate::parse("10/01/2024").unwrap(),
            Description::new(description),
            BTreeSet::new(),
        )
    }

    #[test]
    fn add_rejects_same_record_and_leaves_list_untouched() {
        let mut list = UniqueList::new();
        list.add(record("Lunch", "5", "rice")).unwrap();
        let before = list.clone();

        let err = list
            .add(record("Lunch", "5", "noodles"))
            .expect_err("duplicate must fail");
        assert!(matches!(err, FinanceError::Duplicate(_)));
        assert_eq!(list, before);
    }

    #[test]
    fn remove_missing_entry_fails() {
        let mut list: UniqueList<Record> = UniqueList::new();
        let err = list.remove(&record("Lunch", "5", "")).unwrap_err();
        assert!(matches!(err, FinanceError::NotFound(_)));
    }

    #[test]
    fn replace_keeps_position_and_checks_collisions() {
        let mut list = UniqueList::from_entries([
            record("Breakfast", "3", ""),
            record("Lunch", "5", ""),
            record("Dinner", "8", ""),
        ])
        .unwrap();

        let position = list
            .replace(&record("Lunch", "5", ""), record("Brunch", "6", ""))
            .unwrap();
        assert_eq!(position, 1);
        assert_eq!(list.get(1).unwrap().name().as_str(), "Brunch");

        let err = list
            .replace(&record("Brunch", "6", ""), record("Dinner", "8", "late"))
            .unwrap_err();
        assert!(matches!(err, FinanceError::Duplicate(_)));
    }

    #[test]
    fn replace_with_same_record_is_allowed() {
        let mut list = UniqueList::from_entries([record("Lunch", "5", "")]).unwrap();
        list.replace(&record("Lunch", "5", ""), record("Lunch", "5", "with tea"))
            .unwrap();
        assert_eq!(list.get(0).unwrap().description().as_str(), "with tea");
    }

    #[test]
    fn exact_lookup_differs_from_same_lookup() {
        let list = UniqueList::from_entries([record("Lunch", "5", "rice")]).unwrap();
        let variant = record("Lunch", "5", "noodles");
        assert!(list.contains(&variant));
        assert!(!list.contains_exact(&variant));
        assert_eq!(list.position_of_exact(&record("Lunch", "5", "rice")), Some(0));
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let result = UniqueList::from_entries([record("Lunch", "5", ""), record("Lunch", "5", "")]);
        assert!(result.is_err());
    }
}
