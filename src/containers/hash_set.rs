//! StringHashSet: open-addressing set of strings with linear probing
//!
//! Slots are empty, occupied, or tombstoned. Removal leaves a tombstone so
//! lookup chains stay intact; tombstones count toward the load that triggers a
//! rehash, and a rehash drops them.

use std::fmt;

use crate::config::ContainerConfig;
use crate::containers::BinaryPersist;
use crate::error::{ContainerError, Result};
use crate::io::{DataInput, DataOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Empty,
    Occupied(String),
    Deleted,
}

/// DJB2 string hash
#[inline]
fn djb2(key: &str) -> u64 {
    key.bytes()
        .fold(5381u64, |h, b| h.wrapping_shl(5).wrapping_add(h).wrapping_add(b as u64))
}

/// Open-addressing string set
///
/// # Examples
///
/// ```rust
/// use sdkit::StringHashSet;
///
/// let mut set = StringHashSet::new();
/// assert!(set.add("alice"));
/// assert!(!set.add("alice"));
/// assert!(set.contains("alice"));
/// assert!(set.remove("alice"));
/// assert!(!set.contains("alice"));
/// ```
#[derive(Clone)]
pub struct StringHashSet {
    table: Vec<Slot>,
    len: usize,
    deleted: usize,
    max_load_factor: f64,
}

impl StringHashSet {
    /// Create an empty set with the default capacity and load factor
    pub fn new() -> Self {
        Self::with_config(&ContainerConfig::default())
    }

    /// Create an empty set with `capacity` slots and the default load factor
    pub fn with_capacity(capacity: usize) -> Self {
        let config = ContainerConfig {
            set_initial_capacity: capacity,
            ..ContainerConfig::default()
        };
        Self::with_config(&config)
    }

    /// Create an empty set sized by `config`
    ///
    /// A load factor outside `(0, 1)` falls back to the default.
    pub fn with_config(config: &ContainerConfig) -> Self {
        let mut max_load_factor = config.set_max_load_factor;
        if !(max_load_factor > 0.0 && max_load_factor < 1.0) {
            max_load_factor = ContainerConfig::default().set_max_load_factor;
        }
        Self {
            table: vec![Slot::Empty; config.set_initial_capacity.max(1)],
            len: 0,
            deleted: 0,
            max_load_factor,
        }
    }

    /// Number of keys
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the set has no keys
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Number of tombstoned slots
    #[inline]
    pub fn deleted_count(&self) -> usize {
        self.deleted
    }

    #[inline]
    fn home_slot(&self, key: &str) -> usize {
        (djb2(key) % self.table.len() as u64) as usize
    }

    fn find_slot(&self, key: &str) -> Option<usize> {
        let cap = self.table.len();
        let mut index = self.home_slot(key);
        for _ in 0..cap {
            match &self.table[index] {
                Slot::Empty => return None,
                Slot::Occupied(k) if k == key => return Some(index),
                _ => {}
            }
            index = (index + 1) % cap;
        }
        None
    }

    /// Check whether `key` is in the set
    pub fn contains(&self, key: &str) -> bool {
        self.find_slot(key).is_some()
    }

    /// Add `key`; returns `false` if it was already present
    ///
    /// When live keys plus tombstones reach the load threshold, the table
    /// doubles before the insert.
    pub fn add<S: AsRef<str> + Into<String>>(&mut self, key: S) -> bool {
        if self.contains(key.as_ref()) {
            return false;
        }
        let threshold = self.table.len() as f64 * self.max_load_factor;
        if (self.len + self.deleted) as f64 >= threshold {
            self.rehash(self.table.len() * 2);
        }
        self.place(key.into());
        true
    }

    /// Store a key known to be absent in the first free slot on its search path
    fn place(&mut self, key: String) {
        let cap = self.table.len();
        let mut index = self.home_slot(&key);
        while matches!(self.table[index], Slot::Occupied(_)) {
            index = (index + 1) % cap;
        }
        if matches!(self.table[index], Slot::Deleted) {
            self.deleted -= 1;
        }
        self.table[index] = Slot::Occupied(key);
        self.len += 1;
    }

    /// Move live keys into a table of `new_capacity` slots, dropping tombstones
    ///
    /// Callers always double. Tombstones count toward the trigger, so add and
    /// remove churn keeps growing the table even when few keys are live.
    fn rehash(&mut self, new_capacity: usize) {
        log::debug!(
            "rehashing string set: {} -> {} slots ({} keys, {} tombstones)",
            self.table.len(),
            new_capacity,
            self.len,
            self.deleted
        );
        let old = std::mem::replace(&mut self.table, vec![Slot::Empty; new_capacity]);
        self.len = 0;
        self.deleted = 0;
        for slot in old {
            if let Slot::Occupied(key) = slot {
                self.place(key);
            }
        }
    }

    /// Remove `key`; returns `false` if it was not present
    pub fn remove(&mut self, key: &str) -> bool {
        match self.find_slot(key) {
            Some(index) => {
                self.table[index] = Slot::Deleted;
                self.len -= 1;
                self.deleted += 1;
                true
            }
            None => false,
        }
    }

    /// Remove every key, keeping the current capacity
    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.len = 0;
        self.deleted = 0;
    }

    /// Iterate over the keys in slot order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.iter().filter_map(|slot| match slot {
            Slot::Occupied(key) => Some(key.as_str()),
            _ => None,
        })
    }
}

impl Default for StringHashSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringHashSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for StringHashSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|k| other.contains(k))
    }
}

impl Eq for StringHashSet {}

impl<S: AsRef<str> + Into<String>> Extend<S> for StringHashSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<S: AsRef<str> + Into<String>> FromIterator<S> for StringHashSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl BinaryPersist for StringHashSet {
    fn serialize<O: DataOutput + ?Sized>(&self, output: &mut O) -> Result<()> {
        let count = i32::try_from(self.len).map_err(|_| {
            ContainerError::invalid_data(format!("{} keys exceed an i32 count", self.len))
        })?;
        output.write_i32(count)?;
        for key in self.iter() {
            output.write_i32_prefixed_string(key)?;
        }
        log::debug!("serialized string set: {} keys", self.len);
        Ok(())
    }

    fn deserialize<I: DataInput + ?Sized>(&mut self, input: &mut I) -> Result<()> {
        self.clear();

        let count = input.read_i32()?;
        if count < 0 {
            return Err(ContainerError::invalid_data(format!(
                "Negative set key count: {}",
                count
            )));
        }
        for _ in 0..count {
            let key = input.read_i32_prefixed_string()?;
            self.add(key);
        }
        log::debug!("deserialized string set: {} keys", self.len);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{SliceDataInput, VecDataOutput};

    #[test]
    fn test_basic_add_and_find() {
        let mut set = StringHashSet::new();
        assert!(set.add("apple"));
        assert!(set.add("banana"));
        assert!(set.contains("apple"));
        assert!(set.contains("banana"));
        assert!(!set.contains("cherry"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_add_duplicate() {
        let mut set = StringHashSet::new();
        assert!(set.add("x"));
        assert!(!set.add("x"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set: StringHashSet = ["1", "2"].into_iter().collect();
        assert!(set.remove("1"));
        assert!(!set.contains("1"));
        assert!(set.contains("2"));
        assert!(!set.remove("10"));
        assert!(!set.remove("1"));
        assert_eq!(set.deleted_count(), 1);
    }

    #[test]
    fn test_deleted_slot_reused() {
        let mut set = StringHashSet::new();
        set.add("1");
        set.remove("1");
        assert_eq!(set.deleted_count(), 1);
        assert!(set.add("1"));
        assert!(set.contains("1"));
        assert_eq!(set.deleted_count(), 0);
    }

    #[test]
    fn test_rehash_threshold() {
        let mut set = StringHashSet::new();
        assert_eq!(set.capacity(), 8);
        for i in 0..6 {
            set.add(i.to_string());
        }
        // 6 >= 8 * 0.7 only becomes true before the 7th insert.
        assert_eq!(set.capacity(), 8);
        set.add("6");
        assert_eq!(set.capacity(), 16);
        for i in 0..7 {
            assert!(set.contains(&i.to_string()));
        }
    }

    #[test]
    fn test_tombstones_count_toward_load() {
        let mut set = StringHashSet::new();
        for i in 0..6 {
            set.add(i.to_string());
        }
        for i in 0..6 {
            set.remove(&i.to_string());
        }
        assert!(set.is_empty());
        set.add("fresh");
        assert_eq!(set.capacity(), 16);
        assert_eq!(set.deleted_count(), 0);
    }

    #[test]
    fn test_resize_from_small_capacity() {
        let mut set = StringHashSet::with_capacity(4);
        for i in 0..10 {
            set.add(i.to_string());
        }
        assert!(set.capacity() > 4);
        for i in 0..10 {
            assert!(set.contains(&i.to_string()));
        }
    }

    #[test]
    fn test_collision_handling() {
        // One slot to start, so early keys all collide.
        let config = ContainerConfig {
            set_initial_capacity: 1,
            ..ContainerConfig::default()
        };
        let mut set = StringHashSet::with_config(&config);
        for key in ["a", "b", "c", "d", "e"] {
            assert!(set.add(key));
        }
        for key in ["a", "b", "c", "d", "e"] {
            assert!(set.contains(key));
        }
        assert!(set.remove("c"));
        assert!(set.contains("e"));
    }

    #[test]
    fn test_invalid_load_factor_falls_back() {
        let config = ContainerConfig {
            set_max_load_factor: 1.5,
            ..ContainerConfig::default()
        };
        let mut set = StringHashSet::with_config(&config);
        for i in 0..100 {
            set.add(i.to_string());
        }
        assert_eq!(set.len(), 100);
        assert!(set.capacity() > 100);
    }

    #[test]
    fn test_stress_add_remove() {
        let mut set = StringHashSet::new();
        for i in 0..1000 {
            set.add(format!("k{}", i));
            if i % 3 == 0 {
                set.remove(&format!("k{}", i / 2));
            }
        }
        for i in 0..1000 {
            let removed = (0..1000).any(|j| j % 3 == 0 && j / 2 == i && j >= i);
            assert_eq!(set.contains(&format!("k{}", i)), !removed, "k{}", i);
        }
    }

    #[test]
    fn test_round_trip() {
        let set: StringHashSet = ["alice", "bob", "charlie"].into_iter().collect();
        let mut out = VecDataOutput::new();
        set.serialize(&mut out).unwrap();

        let mut restored = StringHashSet::new();
        restored.add("stale");
        restored
            .deserialize(&mut SliceDataInput::new(out.as_slice()))
            .unwrap();
        assert_eq!(restored, set);
        assert!(!restored.contains("stale"));
    }

    #[test]
    fn test_round_trip_empty() {
        let mut out = VecDataOutput::new();
        StringHashSet::new().serialize(&mut out).unwrap();
        assert_eq!(out.as_slice(), &0i32.to_le_bytes());

        let mut restored = StringHashSet::new();
        restored
            .deserialize(&mut SliceDataInput::new(out.as_slice()))
            .unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn test_churn_grows_capacity() {
        let mut set = StringHashSet::new();
        for i in 0..10_000 {
            let key = format!("churn-{}", i);
            set.add(key.as_str());
            set.remove(&key);
        }
        assert!(set.is_empty());
        set.add("live");
        assert_eq!(set.len(), 1);
        // Doubling on tombstone load, never shrinking.
        assert!(set.capacity() > 8);
        assert!(set.capacity().is_power_of_two());
        assert!(set.contains("live"));
    }
}
