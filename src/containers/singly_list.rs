//! SinglyList: singly linked list of strings
//!
//! Nodes live in an index arena; `next` links are slot indices and freed slots
//! are recycled. Head and tail are tracked so both ends accept pushes in O(1).

use std::io::{BufRead, Write};

use crate::containers::TextPersist;
use crate::error::{ContainerError, Result};
use crate::io::{read_text_records, write_text_records};

#[derive(Debug, Clone)]
struct Node {
    value: String,
    next: Option<usize>,
}

/// Singly linked list of strings
///
/// # Examples
///
/// ```rust
/// use sdkit::SinglyList;
///
/// let mut list = SinglyList::new();
/// list.push_back("alice");
/// list.push_front("bob");
/// assert_eq!(list.find("alice"), Some(1));
/// list.remove("bob")?;
/// assert_eq!(list.get(0), Some("alice"));
/// # Ok::<(), sdkit::ContainerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SinglyList {
    nodes: Vec<Node>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl SinglyList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the list has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn alloc(&mut self, value: String, next: Option<usize>) -> usize {
        let node = Node { value, next };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> String {
        self.free.push(slot);
        let node = &mut self.nodes[slot];
        node.next = None;
        std::mem::take(&mut node.value)
    }

    #[inline]
    fn node(&self, slot: usize) -> &Node {
        &self.nodes[slot]
    }

    #[inline]
    fn node_mut(&mut self, slot: usize) -> &mut Node {
        &mut self.nodes[slot]
    }

    /// Append a value at the tail
    pub fn push_back<S: Into<String>>(&mut self, value: S) {
        let slot = self.alloc(value.into(), None);
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Prepend a value at the head
    pub fn push_front<S: Into<String>>(&mut self, value: S) {
        let slot = self.alloc(value.into(), self.head);
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
        self.len += 1;
    }

    /// Position of the first element equal to `value`
    pub fn find(&self, value: &str) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// Check whether some element equals `value`
    pub fn contains(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    /// Element at `index`, counting from the head
    pub fn get(&self, index: usize) -> Option<&str> {
        self.iter().nth(index)
    }

    /// Slot holding the first element equal to `value`, with its predecessor
    fn locate(&self, value: &str) -> Option<(Option<usize>, usize)> {
        let mut prev = None;
        let mut current = self.head;
        while let Some(slot) = current {
            if self.node(slot).value == value {
                return Some((prev, slot));
            }
            prev = Some(slot);
            current = self.node(slot).next;
        }
        None
    }

    /// Slot linking to `target`; `None` when `target` is the head
    fn predecessor(&self, target: usize) -> Option<usize> {
        let mut prev = None;
        let mut current = self.head;
        while let Some(slot) = current {
            if slot == target {
                break;
            }
            prev = Some(slot);
            current = self.node(slot).next;
        }
        prev
    }

    /// Detach `slot`, whose predecessor is `prev`, and return its value
    fn unlink(&mut self, prev: Option<usize>, slot: usize) -> String {
        let next = self.node(slot).next;
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        if self.tail == Some(slot) {
            self.tail = prev;
        }
        self.len -= 1;
        self.release(slot)
    }

    /// Insert `value` right after the first element equal to `key`
    ///
    /// Fails with [`ContainerError::NotFound`] when `key` is absent.
    pub fn insert_after<S: Into<String>>(&mut self, key: &str, value: S) -> Result<()> {
        let Some((_, anchor)) = self.locate(key) else {
            return Err(anchor_not_found(key));
        };
        let next = self.node(anchor).next;
        let slot = self.alloc(value.into(), next);
        self.node_mut(anchor).next = Some(slot);
        if self.tail == Some(anchor) {
            self.tail = Some(slot);
        }
        self.len += 1;
        Ok(())
    }

    /// Insert `value` right before the first element equal to `key`
    ///
    /// Fails with [`ContainerError::NotFound`] when `key` is absent.
    pub fn insert_before<S: Into<String>>(&mut self, key: &str, value: S) -> Result<()> {
        let Some((prev, anchor)) = self.locate(key) else {
            return Err(anchor_not_found(key));
        };
        let slot = self.alloc(value.into(), Some(anchor));
        match prev {
            Some(p) => self.node_mut(p).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the head value
    pub fn remove_front(&mut self) -> Result<String> {
        let head = self.head.ok_or_else(|| ContainerError::empty("list"))?;
        Ok(self.unlink(None, head))
    }

    /// Remove and return the tail value
    ///
    /// Walks from the head to find the new tail.
    pub fn remove_back(&mut self) -> Result<String> {
        let tail = self.tail.ok_or_else(|| ContainerError::empty("list"))?;
        let prev = self.predecessor(tail);
        Ok(self.unlink(prev, tail))
    }

    /// Remove and return the element following the first one equal to `key`
    ///
    /// Fails with [`ContainerError::NotFound`] when `key` is absent or is
    /// the tail.
    pub fn remove_after(&mut self, key: &str) -> Result<String> {
        let Some((_, anchor)) = self.locate(key) else {
            return Err(anchor_not_found(key));
        };
        let Some(next) = self.node(anchor).next else {
            return Err(ContainerError::not_found(format!("element after {:?}", key)));
        };
        Ok(self.unlink(Some(anchor), next))
    }

    /// Remove and return the element preceding the first one equal to `key`
    ///
    /// Fails with [`ContainerError::Empty`] on an empty list and with
    /// [`ContainerError::NotFound`] when `key` is absent or is the head.
    pub fn remove_before(&mut self, key: &str) -> Result<String> {
        if self.head.is_none() {
            return Err(ContainerError::empty("list"));
        }
        let Some((prev, _)) = self.locate(key) else {
            return Err(anchor_not_found(key));
        };
        let Some(target) = prev else {
            return Err(ContainerError::not_found(format!("element before {:?}", key)));
        };
        let before = self.predecessor(target);
        Ok(self.unlink(before, target))
    }

    /// Remove the first element equal to `value`
    ///
    /// Fails with [`ContainerError::Empty`] on an empty list and with
    /// [`ContainerError::NotFound`] when no element matches.
    pub fn remove(&mut self, value: &str) -> Result<()> {
        if self.head.is_none() {
            return Err(ContainerError::empty("list"));
        }
        let (prev, slot) = self
            .locate(value)
            .ok_or_else(|| ContainerError::not_found(format!("value {:?}", value)))?;
        self.unlink(prev, slot);
        Ok(())
    }

    /// Remove every element
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Iterate from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }
}

fn anchor_not_found(key: &str) -> ContainerError {
    ContainerError::not_found(format!("anchor {:?}", key))
}

impl PartialEq for SinglyList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for SinglyList {}

impl<S: Into<String>> FromIterator<S> for SinglyList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

/// Head-to-tail iterator over a [`SinglyList`]
pub struct Iter<'a> {
    list: &'a SinglyList,
    current: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let node = self.list.node(self.current?);
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl TextPersist for SinglyList {
    fn serialize_text<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_text_records(writer, self.iter())?;
        log::debug!("serialized list: {} elements", self.len);
        Ok(())
    }

    fn deserialize_text<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.clear();
        for value in read_text_records(reader)? {
            self.push_back(value);
        }
        log::debug!("deserialized list: {} elements", self.len);
        Ok(())
    }
}
