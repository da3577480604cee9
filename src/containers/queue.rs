//! Queue: FIFO of strings

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::containers::TextPersist;
use crate::error::{ContainerError, Result};
use crate::io::{read_text_records, write_text_records};

/// FIFO queue of strings; the text format lists values front to back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    items: VecDeque<String>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the queue has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a value at the back
    pub fn push<S: Into<String>>(&mut self, value: S) {
        self.items.push_back(value.into());
    }

    /// Remove and return the front value
    pub fn pop(&mut self) -> Result<String> {
        self.items
            .pop_front()
            .ok_or_else(|| ContainerError::empty("queue"))
    }

    /// The front value
    pub fn front(&self) -> Result<&str> {
        self.items
            .front()
            .map(String::as_str)
            .ok_or_else(|| ContainerError::empty("queue"))
    }

    /// Iterate from front to back
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.items.iter().map(String::as_str)
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl TextPersist for Queue {
    fn serialize_text<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_text_records(writer, self.iter())?;
        log::debug!("serialized queue: {} elements", self.items.len());
        Ok(())
    }

    fn deserialize_text<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.items.clear();
        self.items = read_text_records(reader)?.into();
        log::debug!("deserialized queue: {} elements", self.items.len());
        Ok(())
    }
}
