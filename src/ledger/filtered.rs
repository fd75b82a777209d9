//! Read-only projections over a [`UniqueList`].

use std::{cmp::Ordering, fmt, rc::Rc};

use crate::domain::Entry;
use crate::ledger::unique_list::UniqueList;

/// Shared, clonable predicate over list entries.
pub struct Predicate<T>(Rc<dyn Fn(&T) -> bool>);

impl<T> Predicate<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self(Rc::new(predicate))
    }

    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, entry: &T) -> bool {
        (self.0)(entry)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

pub type Comparator<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// View configuration: which entries are shown and in what order.
///
/// The view never owns or mutates the list; it is resolved against the list
/// on every read, so it always reflects the latest state. Resolution filters
/// first, then sorts (stable), then reverses when flagged, which keeps a
/// reversed order intact inside any later filter.
pub struct FilteredView<T> {
    predicate: Predicate<T>,
    comparator: Option<Comparator<T>>,
    reversed: bool,
}

impl<T> Default for FilteredView<T> {
    fn default() -> Self {
        Self {
            predicate: Predicate::all(),
            comparator: None,
            reversed: false,
        }
    }
}

impl<T> Clone for FilteredView<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            comparator: self.comparator.clone(),
            reversed: self.reversed,
        }
    }
}

impl<T> fmt::Debug for FilteredView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredView")
            .field("sorted", &self.comparator.is_some())
            .field("reversed", &self.reversed)
            .finish()
    }
}

impl<T: Entry> FilteredView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_predicate(&mut self, predicate: Predicate<T>) {
        self.predicate = predicate;
    }

    pub fn show_all(&mut self) {
        self.predicate = Predicate::all();
    }

    pub fn set_comparator(&mut self, comparator: Option<Comparator<T>>) {
        self.comparator = comparator;
    }

    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Positions in `list` of the visible entries, in display order.
    pub fn positions(&self, list: &UniqueList<T>) -> Vec<usize> {
        let mut positions: Vec<usize> = list
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.predicate.matches(entry))
            .map(|(position, _)| position)
            .collect();
        if let Some(comparator) = &self.comparator {
            positions.sort_by(|a, b| match (list.get(*a), list.get(*b)) {
                (Some(left), Some(right)) => comparator(left, right),
                _ => Ordering::Equal,
            });
        }
        if self.reversed {
            positions.reverse();
        }
        positions
    }

    pub fn items<'a>(&self, list: &'a UniqueList<T>) -> Vec<&'a T> {
        self.positions(list)
            .into_iter()
            .filter_map(|position| list.get(position))
            .collect()
    }

    pub fn len(&self, list: &UniqueList<T>) -> usize {
        self.positions(list).len()
    }

    /// Resolves a display index to the list position and entry behind it.
    pub fn get<'a>(&self, list: &'a UniqueList<T>, index: usize) -> Option<(usize, &'a T)> {
        let position = *self.positions(list).get(index)?;
        list.get(position).map(|entry| (position, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, Description, NamedEntity, Record, RecordDate};
    use std::collections::BTreeSet;

    fn record(name: &str, amount: &str) -> Record {
        Record::new(
            crate::domain::Name::parse(name).unwrap(),
            Amount::parse(amount).unwrap(),
            RecordDate::parse("10/01/2024").unwrap(),
            Description::default(),
            BTreeSet::new(),
        )
    }

    fn names(items: Vec<&Record>) -> Vec<String> {
        items
            .into_iter()
            .map(|r| NamedEntity::name(r).to_string())
            .collect()
    }

    fn abc() -> UniqueList<Record> {
        UniqueList::from_entries([record("A", "1"), record("B", "2"), record("C", "3")]).unwrap()
    }

    #[test]
    fn reverse_then_filter_keeps_reversed_order() {
        let list = abc();
        let mut view = FilteredView::new();
        view.reverse();
        view.set_predicate(Predicate::new(|r: &Record| {
            matches!(NamedEntity::name(r), "B" | "C")
        }));

        assert_eq!(names(view.items(&list)), ["C", "B"]);
    }

    #[test]
    fn changing_the_view_never_touches_the_list() {
        let list = abc();
        let before = list.clone();
        let mut view = FilteredView::new();
        view.set_predicate(Predicate::new(|r: &Record| NamedEntity::name(r) == "A"));
        view.reverse();
        assert_eq!(view.len(&list), 1);
        assert_eq!(list, before);
    }

    #[test]
    fn comparator_sorts_before_reversal() {
        let list = UniqueList::from_entries([record("B", "9"), record("A", "1"), record("C", "5")])
            .unwrap();
        let mut view = FilteredView::new();
        let by_amount: Comparator<Record> =
            Rc::new(|a: &Record, b: &Record| a.amount().cmp(&b.amount()));
        view.set_comparator(Some(by_amount));
        assert_eq!(names(view.items(&list)), ["A", "C", "B"]);

        view.reverse();
        assert_eq!(names(view.items(&list)), ["B", "C", "A"]);
    }

    #[test]
    fn get_maps_display_index_to_list_position() {
        let list = abc();
        let mut view = FilteredView::new();
        view.reverse();
        let (position, entry) = view.get(&list, 0).unwrap();
        assert_eq!(position, 2);
        assert_eq!(NamedEntity::name(entry), "C");
        assert!(view.get(&list, 3).is_none());
    }
}
