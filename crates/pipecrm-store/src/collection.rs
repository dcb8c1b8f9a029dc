//! A thread-safe, id-keyed record collection.

use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

/// A record that owns an integer primary key.
pub trait Record: Clone {
    fn id(&self) -> i64;
}

/// Insertion-ordered records behind a lock, with monotonic id assignment.
///
/// Reads hand out clones so query evaluation never holds the lock. A
/// poisoned lock is recovered rather than propagated: record data stays
/// consistent because writers mutate in place through closures.
pub struct Collection<T> {
    rows: RwLock<Vec<T>>,
    next_id: AtomicI64,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Build a collection from existing records; ids continue past the
    /// highest one present.
    pub fn with_records(records: Vec<T>) -> Self {
        let max_id = records.iter().map(Record::id).max().unwrap_or(0);
        Self {
            rows: RwLock::new(records),
            next_id: AtomicI64::new(max_id + 1),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<T>> {
        self.rows.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<T>> {
        self.rows.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Every record, in insertion order.
    pub fn snapshot(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.read().iter().find(|r| r.id() == id).cloned()
    }

    /// First record matching `pred`.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.read().iter().find(|r| pred(r)).cloned()
    }

    pub fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.read().iter().any(|r| pred(r))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Allocate the next id, build the record with it, and append it.
    pub fn insert(&self, make: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = make(id);
        self.write().push(record.clone());
        record
    }

    /// Mutate the record with `id` in place, returning the updated copy.
    pub fn update(&self, id: i64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.write();
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        apply(row);
        Some(row.clone())
    }

    /// Mutate every record matching `pred`, returning how many were touched.
    pub fn update_where(&self, pred: impl Fn(&T) -> bool, apply: impl Fn(&mut T)) -> usize {
        let mut rows = self.write();
        let mut touched = 0;
        for row in rows.iter_mut().filter(|r| pred(r)) {
            apply(row);
            touched += 1;
        }
        touched
    }

    /// Remove and return the record with `id`.
    pub fn remove(&self, id: i64) -> Option<T> {
        let mut rows = self.write();
        let index = rows.iter().position(|r| r.id() == id)?;
        Some(rows.remove(index))
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    impl Record for Row {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn row(id: i64, name: &str) -> Row {
        Row {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let rows = Collection::new();
        let a = rows.insert(|id| row(id, "a"));
        let b = rows.insert(|id| row(id, "b"));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn ids_continue_past_seeded_records() {
        let rows = Collection::with_records(vec![row(1, "a"), row(7, "b")]);
        let c = rows.insert(|id| row(id, "c"));
        assert_eq!(c.id, 8);
    }

    #[test]
    fn update_mutates_in_place() {
        let rows = Collection::with_records(vec![row(1, "a")]);
        let updated = rows.update(1, |r| r.name = "z".to_string()).unwrap();
        assert_eq!(updated.name, "z");
        assert_eq!(rows.get(1).unwrap().name, "z");
        assert!(rows.update(99, |_| {}).is_none());
    }

    #[test]
    fn remove_returns_the_record() {
        let rows = Collection::with_records(vec![row(1, "a"), row(2, "b")]);
        let gone = rows.remove(1).unwrap();
        assert_eq!(gone.name, "a");
        assert!(rows.get(1).is_none());
        assert!(rows.remove(1).is_none());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let rows = Collection::new();
        rows.insert(|id| row(id, "a"));
        rows.remove(1);
        let b = rows.insert(|id| row(id, "b"));
        assert_eq!(b.id, 2);
    }

    #[test]
    fn update_where_touches_only_matches() {
        let rows = Collection::with_records(vec![row(1, "a"), row(2, "b"), row(3, "a")]);
        let touched = rows.update_where(|r| r.name == "a", |r| r.name = "z".to_string());
        assert_eq!(touched, 2);
        assert_eq!(rows.get(2).unwrap().name, "b");
        assert_eq!(rows.get(3).unwrap().name, "z");
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let rows = Collection::new();
        for name in ["a", "b", "c"] {
            rows.insert(|id| row(id, name));
        }
        let names: Vec<_> = rows.snapshot().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
