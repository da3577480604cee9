//! DoublyList: doubly linked list of strings over an index arena

use std::io::{BufRead, Write};
use std::iter::Rev;

use crate::containers::TextPersist;
use crate::error::{ContainerError, Result};
use crate::io::{read_text_records, write_text_records};

#[derive(Debug, Clone)]
struct Node {
    value: String,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked list of strings
///
/// Links are slot indices into an arena, so no node is shared or reference
/// counted. Both ends support O(1) push and pop.
///
/// # Examples
///
/// ```rust
/// use sdkit::DoublyList;
///
/// let mut list = DoublyList::new();
/// list.push_back("b");
/// list.push_front("a");
/// list.push_back("c");
/// assert_eq!(list.iter_rev().collect::<Vec<_>>(), vec!["c", "b", "a"]);
/// assert_eq!(list.pop_front().as_deref(), Some("a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DoublyList {
    nodes: Vec<Node>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl DoublyList {
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

    fn alloc(&mut self, node: Node) -> usize {
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

    /// Detach `slot` from its neighbours and return its value
    fn unlink(&mut self, slot: usize) -> String {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        self.free.push(slot);

        let node = &mut self.nodes[slot];
        node.prev = None;
        node.next = None;
        std::mem::take(&mut node.value)
    }

    /// Append a value at the tail
    pub fn push_back<S: Into<String>>(&mut self, value: S) {
        let slot = self.alloc(Node {
            value: value.into(),
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Prepend a value at the head
    pub fn push_front<S: Into<String>>(&mut self, value: S) {
        let slot = self.alloc(Node {
            value: value.into(),
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => self.nodes[head].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
        self.len += 1;
    }

    /// Remove and return the head value
    pub fn pop_front(&mut self) -> Option<String> {
        let head = self.head?;
        Some(self.unlink(head))
    }

    /// Remove and return the tail value
    pub fn pop_back(&mut self) -> Option<String> {
        let tail = self.tail?;
        Some(self.unlink(tail))
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
        if index >= self.len {
            return None;
        }
        // Walk from whichever end is closer.
        if index < self.len / 2 {
            self.iter().nth(index)
        } else {
            self.iter().rev().nth(self.len - 1 - index)
        }
    }

    /// Slot holding the first element equal to `value`
    fn locate(&self, value: &str) -> Option<usize> {
        let mut current = self.head;
        while let Some(slot) = current {
            if self.nodes[slot].value == value {
                return Some(slot);
            }
            current = self.nodes[slot].next;
        }
        None
    }

    fn anchor(&self, key: &str) -> Result<usize> {
        self.locate(key)
            .ok_or_else(|| ContainerError::not_found(format!("anchor {:?}", key)))
    }

    /// Insert `value` right after the first element equal to `key`
    ///
    /// Fails with [`ContainerError::NotFound`] when `key` is absent.
    pub fn insert_after<S: Into<String>>(&mut self, key: &str, value: S) -> Result<()> {
        let anchor = self.anchor(key)?;
        let next = self.nodes[anchor].next;
        let slot = self.alloc(Node {
            value: value.into(),
            prev: Some(anchor),
            next,
        });
        self.nodes[anchor].next = Some(slot);
        match next {
            Some(n) => self.nodes[n].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.len += 1;
        Ok(())
    }

    /// Insert `value` right before the first element equal to `key`
    ///
    /// Fails with [`ContainerError::NotFound`] when `key` is absent.
    pub fn insert_before<S: Into<String>>(&mut self, key: &str, value: S) -> Result<()> {
        let anchor = self.anchor(key)?;
        let prev = self.nodes[anchor].prev;
        let slot = self.alloc(Node {
            value: value.into(),
            prev,
            next: Some(anchor),
        });
        self.nodes[anchor].prev = Some(slot);
        match prev {
            Some(p) => self.nodes[p].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element following the first one equal to `key`
    ///
    /// Fails with [`ContainerError::NotFound`] when `key` is absent or is
    /// the tail.
    pub fn remove_after(&mut self, key: &str) -> Result<String> {
        let anchor = self.anchor(key)?;
        let next = self.nodes[anchor]
            .next
            .ok_or_else(|| ContainerError::not_found(format!("element after {:?}", key)))?;
        Ok(self.unlink(next))
    }

    /// Remove and return the element preceding the first one equal to `key`
    ///
    /// Fails with [`ContainerError::NotFound`] when `key` is absent or is
    /// the head.
    pub fn remove_before(&mut self, key: &str) -> Result<String> {
        let anchor = self.anchor(key)?;
        let prev = self.nodes[anchor]
            .prev
            .ok_or_else(|| ContainerError::not_found(format!("element before {:?}", key)))?;
        Ok(self.unlink(prev))
    }

    /// Remove the first element equal to `value`
    ///
    /// Fails with [`ContainerError::NotFound`] when no element matches,
    /// including on an empty list.
    pub fn remove(&mut self, value: &str) -> Result<()> {
        let slot = self
            .locate(value)
            .ok_or_else(|| ContainerError::not_found(format!("value {:?}", value)))?;
        self.unlink(slot);
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
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Iterate from tail to head
    pub fn iter_rev(&self) -> Rev<Iter<'_>> {
        self.iter().rev()
    }
}

impl PartialEq for DoublyList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for DoublyList {}

impl<S: Into<String>> FromIterator<S> for DoublyList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

/// Double-ended iterator over a [`DoublyList`]
pub struct Iter<'a> {
    list: &'a DoublyList,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<&'a str> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl TextPersist for DoublyList {
    fn serialize_text<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_text_records(writer, self.iter())?;
        log::debug!("serialized doubly linked list: {} elements", self.len);
        Ok(())
    }

    fn deserialize_text<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.clear();
        for value in read_text_records(reader)? {
            self.push_back(value);
        }
        log::debug!("deserialized doubly linked list: {} elements", self.len);
        Ok(())
    }
}
