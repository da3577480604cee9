//! DynArray: growable sequence of strings with an explicit growth policy

use std::ops::Index;
use std::slice;

use crate::config::ContainerConfig;
use crate::containers::BinaryPersist;
use crate::error::{check_bounds, check_insert_position, ContainerError, Result};
use crate::io::{DataInput, DataOutput};

/// Growable array of strings
///
/// Capacity grows to the configured initial capacity on first use, then by the
/// configured factor whenever a push or insert finds the array full.
///
/// # Examples
///
/// ```rust
/// use sdkit::DynArray;
///
/// let mut arr = DynArray::new();
/// arr.push_back("a");
/// arr.push_back("c");
/// arr.insert_at(1, "b")?;
/// assert_eq!(arr.get(1), Some("b"));
/// assert_eq!(arr.capacity(), 4);
/// # Ok::<(), sdkit::ContainerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DynArray {
    data: Vec<String>,
    capacity: usize,
    initial_capacity: usize,
    growth_factor: usize,
}

impl DynArray {
    /// Create an empty array with the default growth policy
    pub fn new() -> Self {
        Self::with_config(&ContainerConfig::default())
    }

    /// Create an empty array using the growth policy from `config`
    pub fn with_config(config: &ContainerConfig) -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
            initial_capacity: config.array_initial_capacity.max(1),
            growth_factor: config.array_growth_factor.max(2),
        }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the array has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of elements the array can hold before growing
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Grow capacity to at least `new_capacity`; smaller requests are ignored
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity {
            return;
        }
        self.data.reserve_exact(new_capacity - self.data.len());
        self.capacity = new_capacity;
    }

    fn grow_if_full(&mut self) {
        if self.data.len() == self.capacity {
            let next = if self.capacity == 0 {
                self.initial_capacity
            } else {
                self.capacity.saturating_mul(self.growth_factor)
            };
            self.reserve(next);
        }
    }

    /// Append a value
    pub fn push_back<S: Into<String>>(&mut self, value: S) {
        self.grow_if_full();
        self.data.push(value.into());
    }

    /// Insert a value at `index`, shifting later elements right
    ///
    /// `index == len()` appends.
    pub fn insert_at<S: Into<String>>(&mut self, index: usize, value: S) -> Result<()> {
        check_insert_position(index, self.data.len())?;
        self.grow_if_full();
        self.data.insert(index, value.into());
        Ok(())
    }

    /// Remove and return the value at `index`, shifting later elements left
    pub fn delete_at(&mut self, index: usize) -> Result<String> {
        check_bounds(index, self.data.len())?;
        Ok(self.data.remove(index))
    }

    /// Value at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.data.get(index).map(String::as_str)
    }

    /// Value at `index`, or an out-of-bounds error
    pub fn get_at(&self, index: usize) -> Result<&str> {
        self.get(index)
            .ok_or_else(|| ContainerError::out_of_bounds(index, self.data.len()))
    }

    /// Overwrite the value at `index`, returning the previous one
    pub fn replace_at<S: Into<String>>(&mut self, index: usize, value: S) -> Result<String> {
        check_bounds(index, self.data.len())?;
        Ok(std::mem::replace(&mut self.data[index], value.into()))
    }

    /// Remove every element; capacity is kept
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterate over the values in order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.iter().map(String::as_str)
    }

    /// Elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.data
    }
}

impl Default for DynArray {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for DynArray {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for DynArray {}

impl Index<usize> for DynArray {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a DynArray {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for DynArray {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut arr = Self::new();
        for value in iter {
            arr.push_back(value);
        }
        arr
    }
}

impl BinaryPersist for DynArray {
    fn serialize<O: DataOutput + ?Sized>(&self, output: &mut O) -> Result<()> {
        let count = i32::try_from(self.data.len()).map_err(|_| {
            ContainerError::invalid_data(format!("{} elements exceed an i32 count", self.data.len()))
        })?;
        output.write_i32(count)?;
        for value in &self.data {
            output.write_i32_prefixed_string(value)?;
        }
        log::debug!("serialized array: {} elements", self.data.len());
        Ok(())
    }

    fn deserialize<I: DataInput + ?Sized>(&mut self, input: &mut I) -> Result<()> {
        self.data = Vec::new();
        self.capacity = 0;

        let count = input.read_i32()?;
        if count < 0 {
            return Err(ContainerError::invalid_data(format!(
                "Negative array element count: {}",
                count
            )));
        }
        for _ in 0..count {
            let value = input.read_i32_prefixed_string()?;
            self.push_back(value);
        }
        log::debug!("deserialized array: {} elements", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{SliceDataInput, VecDataOutput};

    #[test]
    fn test_push_and_growth_policy() {
        let mut arr = DynArray::new();
        assert_eq!(arr.capacity(), 0);
        arr.push_back("a");
        assert_eq!(arr.capacity(), 4);
        for s in ["b", "c", "d"] {
            arr.push_back(s);
        }
        assert_eq!(arr.capacity(), 4);
        arr.push_back("e");
        assert_eq!(arr.capacity(), 8);
        assert_eq!(arr.len(), 5);
    }

    #[test]
    fn test_custom_growth_policy() {
        let config = ContainerConfig {
            array_initial_capacity: 2,
            array_growth_factor: 3,
            ..ContainerConfig::default()
        };
        let mut arr = DynArray::with_config(&config);
        arr.push_back("x");
        assert_eq!(arr.capacity(), 2);
        arr.push_back("y");
        arr.push_back("z");
        assert_eq!(arr.capacity(), 6);
    }

    #[test]
    fn test_reserve_never_shrinks() {
        let mut arr = DynArray::new();
        arr.reserve(16);
        assert_eq!(arr.capacity(), 16);
        arr.reserve(4);
        assert_eq!(arr.capacity(), 16);
    }

    #[test]
    fn test_insert_at_multiple_positions() {
        let mut arr: DynArray = ["a", "d"].into_iter().collect();
        arr.insert_at(1, "c").unwrap();
        arr.insert_at(1, "b").unwrap();
        arr.insert_at(4, "e").unwrap();
        assert_eq!(arr.iter().collect::<Vec<_>>(), vec!["a", "b", "c", "d", "e"]);

        assert!(matches!(
            arr.insert_at(6, "x"),
            Err(ContainerError::OutOfBounds { index: 6, size: 5 })
        ));
    }

    #[test]
    fn test_delete_and_replace() {
        let mut arr: DynArray = ["a", "b", "c"].into_iter().collect();
        assert_eq!(arr.delete_at(0).unwrap(), "a");
        assert_eq!(arr.get(0), Some("b"));
        assert_eq!(arr.replace_at(1, "z").unwrap(), "c");
        assert_eq!(&arr[1], "z");

        assert!(arr.delete_at(2).is_err());
        assert!(arr.replace_at(5, "q").is_err());
        assert!(arr.get_at(2).is_err());
        assert_eq!(arr.get_at(0).unwrap(), "b");
    }

    #[test]
    fn test_binary_layout() {
        let arr: DynArray = ["hi", ""].into_iter().collect();
        let mut out = VecDataOutput::new();
        arr.serialize(&mut out).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&2i32.to_le_bytes());
        expected.extend_from_slice(&2i32.to_le_bytes());
        expected.extend_from_slice(b"hi");
        expected.extend_from_slice(&0i32.to_le_bytes());
        assert_eq!(out.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_round_trip() {
        let arr: DynArray = ["hello", "world", "test"].into_iter().collect();
        let mut out = VecDataOutput::new();
        arr.serialize(&mut out).unwrap();

        let mut restored: DynArray = ["stale"].into_iter().collect();
        restored
            .deserialize(&mut SliceDataInput::new(out.as_slice()))
            .unwrap();
        assert_eq!(restored, arr);
        assert_eq!(restored.get(2), Some("test"));
    }

    #[test]
    fn test_deserialize_errors() {
        let mut arr = DynArray::new();

        let negative = (-3i32).to_le_bytes();
        assert!(matches!(
            arr.deserialize(&mut SliceDataInput::new(&negative)),
            Err(ContainerError::InvalidData { .. })
        ));

        let mut short = Vec::new();
        short.extend_from_slice(&1i32.to_le_bytes());
        short.extend_from_slice(&10i32.to_le_bytes());
        short.extend_from_slice(b"abc");
        assert!(matches!(
            arr.deserialize(&mut SliceDataInput::new(&short)),
            Err(ContainerError::Io(_))
        ));
    }
}
