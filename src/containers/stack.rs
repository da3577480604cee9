//! Stack: LIFO of strings

use std::io::{BufRead, Write};

use crate::containers::TextPersist;
use crate::error::{ContainerError, Result};
use crate::io::{read_text_records, write_text_records};

/// LIFO stack of strings
///
/// The text format lists the values from the top down, so the first record
/// after the count line is the value [`Stack::top`] returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    items: Vec<String>,
}

impl Stack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the stack has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push a value on top
    pub fn push<S: Into<String>>(&mut self, value: S) {
        self.items.push(value.into());
    }

    /// Remove and return the top value
    pub fn pop(&mut self) -> Result<String> {
        self.items.pop().ok_or_else(|| ContainerError::empty("stack"))
    }

    /// The top value
    pub fn top(&self) -> Result<&str> {
        self.items
            .last()
            .map(String::as_str)
            .ok_or_else(|| ContainerError::empty("stack"))
    }

    /// Iterate from the top down
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.items.iter().rev().map(String::as_str)
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl TextPersist for Stack {
    fn serialize_text<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_text_records(writer, self.iter())?;
        log::debug!("serialized stack: {} elements", self.items.len());
        Ok(())
    }

    fn deserialize_text<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.items.clear();
        let mut records = read_text_records(reader)?;
        // Records are top-first; the vector keeps the top last.
        records.reverse();
        self.items = records;
        log::debug!("deserialized stack: {} elements", self.items.len());
        Ok(())
    }
}
