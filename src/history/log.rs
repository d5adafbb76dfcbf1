//! Append-only log with doubling growth
//!
//! Backs both the snapshot history and the AI decision trail. Capacity is
//! tracked explicitly so growth is deterministic: it starts at
//! [`INITIAL_CAPACITY`] and doubles whenever an append finds the log full.
//! Elements are never removed or reordered once appended.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::{Result, StrongholdError};

/// Capacity of a freshly created log
pub const INITIAL_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct GrowableLog<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowableLog<T> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create a log with at least `capacity` slots (never fewer than the initial 10)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(INITIAL_CAPACITY);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item, doubling capacity first if the log is full.
    ///
    /// Allocation failure aborts the process. Use [`GrowableLog::try_append`]
    /// where that is not acceptable.
    pub fn append(&mut self, item: T) {
        if self.items.len() == self.capacity {
            let extra = self.capacity;
            self.items.reserve_exact(extra);
            self.grew(extra);
        }
        self.items.push(item);
    }

    /// Append an item, surfacing allocation failure as `OutOfMemory`.
    ///
    /// On failure the log is left exactly as it was.
    pub fn try_append(&mut self, item: T) -> Result<()> {
        if self.items.len() == self.capacity {
            let extra = self.capacity;
            self.items
                .try_reserve_exact(extra)
                .map_err(|_| StrongholdError::OutOfMemory)?;
            self.grew(extra);
        }
        self.items.push(item);
        Ok(())
    }

    fn grew(&mut self, extra: usize) {
        self.capacity += extra;
        tracing::debug!("Grew log to {} capacity", self.capacity);
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(StrongholdError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity; grows 10, 20, 40, ...
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for GrowableLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for GrowableLog<T> {
    /// Rebuild a log from stored items, replaying the doubling schedule
    fn from(items: Vec<T>) -> Self {
        let mut capacity = INITIAL_CAPACITY;
        while capacity < items.len() {
            capacity *= 2;
        }
        let mut log = Self::with_capacity(capacity);
        log.items.extend(items);
        log
    }
}

impl<'a, T> IntoIterator for &'a GrowableLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for GrowableLog<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for GrowableLog<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(GrowableLog::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_is_empty_with_initial_capacity() {
        let log: GrowableLog<i32> = GrowableLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(log.capacity(), INITIAL_CAPACITY);
    }

    #[test]
    fn test_eleventh_append_doubles_capacity() {
        let mut log = GrowableLog::new();
        for i in 0..10 {
            log.append(i);
        }
        // Filling the array exactly must not grow it
        assert_eq!(log.capacity(), 10);

        log.append(10);
        assert_eq!(log.capacity(), 20);
        assert_eq!(log.len(), 11);
    }

    #[test]
    fn test_capacity_keeps_doubling() {
        let mut log = GrowableLog::new();
        for i in 0..41 {
            log.append(i);
        }
        assert_eq!(log.capacity(), 80);
    }

    #[test]
    fn test_values_survive_resize() {
        let mut log = GrowableLog::new();
        for i in 0..25 {
            log.append(i * 3);
        }
        for i in 0..25 {
            assert_eq!(*log.get(i).unwrap(), i * 3);
        }
    }

    #[test]
    fn test_get_out_of_range() {
        let mut log = GrowableLog::new();
        log.append("only");
        let err = log.get(1).unwrap_err();
        assert!(matches!(
            err,
            StrongholdError::IndexOutOfRange { index: 1, len: 1 }
        ));
    }

    #[test]
    fn test_try_append_grows_like_append() {
        let mut log = GrowableLog::new();
        for i in 0..11 {
            log.try_append(i).unwrap();
        }
        assert_eq!(log.capacity(), 20);
        assert_eq!(log.last(), Some(&10));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut log = GrowableLog::new();
        log.append('a');
        log.append('b');
        log.append('c');

        let first: String = log.iter().collect();
        let second: String = (&log).into_iter().collect();
        assert_eq!(first, "abc");
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_vec_replays_doubling() {
        let log = GrowableLog::from((0..21).collect::<Vec<_>>());
        assert_eq!(log.len(), 21);
        assert_eq!(log.capacity(), 40);

        let small = GrowableLog::from(vec![1, 2]);
        assert_eq!(small.capacity(), 10);
    }

    #[test]
    fn test_serializes_as_plain_sequence() {
        let mut log = GrowableLog::new();
        log.append(4);
        log.append(5);
        assert_eq!(serde_json::to_string(&log).unwrap(), "[4,5]");

        let back: GrowableLog<i32> = serde_json::from_str("[4,5]").unwrap();
        assert_eq!(back, log);
    }
}
