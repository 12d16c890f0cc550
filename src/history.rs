//! Bounded, newest-first list of recently accepted datasets.

use std::collections::VecDeque;

use crate::types::{Dataset, DatasetId};

/// Number of datasets kept by [`DatasetHistory::default`].
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Recently accepted uploads, newest first.
///
/// Only successfully built [`Dataset`]s can be pushed, so a failed upload can never displace what
/// is already held.
#[derive(Debug, Clone)]
pub struct DatasetHistory {
    capacity: usize,
    entries: VecDeque<Dataset>,
}

impl Default for DatasetHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl DatasetHistory {
    /// Create an empty history holding at most `capacity` datasets (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add `dataset` as the newest entry. Returns any entries evicted to stay within capacity.
    pub fn push(&mut self, dataset: Dataset) -> Vec<Dataset> {
        self.entries.push_front(dataset);
        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            if let Some(old) = self.entries.pop_back() {
                evicted.push(old);
            }
        }
        evicted
    }

    /// The most recently pushed dataset.
    pub fn latest(&self) -> Option<&Dataset> {
        self.entries.front()
    }

    pub fn get(&self, id: &DatasetId) -> Option<&Dataset> {
        self.entries.iter().find(|d| d.id() == *id)
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EquipmentRecord;

    fn dataset(name: &str) -> Dataset {
        Dataset::new(name, vec![EquipmentRecord::new("A", "Pump", 1.0, 1.0, 1.0)])
    }

    #[test]
    fn keeps_newest_first_and_evicts_oldest() {
        let mut h = DatasetHistory::default();
        for i in 0..5 {
            assert!(h.push(dataset(&format!("f{i}.csv"))).is_empty());
        }
        let evicted = h.push(dataset("f5.csv"));
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].filename(), "f0.csv");

        let names: Vec<&str> = h.iter().map(|d| d.filename()).collect();
        assert_eq!(names, vec!["f5.csv", "f4.csv", "f3.csv", "f2.csv", "f1.csv"]);
        assert_eq!(h.latest().map(|d| d.filename()), Some("f5.csv"));
    }

    #[test]
    fn lookup_by_id() {
        let mut h = DatasetHistory::new(2);
        let ds = dataset("a.csv");
        let id = ds.id();
        h.push(ds);
        h.push(dataset("b.csv"));
        assert_eq!(h.get(&id).map(|d| d.filename()), Some("a.csv"));

        h.push(dataset("c.csv"));
        assert!(h.get(&id).is_none());
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut h = DatasetHistory::new(0);
        assert_eq!(h.capacity(), 1);
        h.push(dataset("a.csv"));
        h.push(dataset("b.csv"));
        assert_eq!(h.len(), 1);
        assert!(!h.is_empty());
    }
}
