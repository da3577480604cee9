//! In-memory containers with stream persistence
//!
//! ## Core
//!
//! - **`AvlTree`** - Height-balanced search tree of unique `i32` keys, binary format
//!
//! ## Linear containers
//!
//! - **`DynArray`** - Growable string sequence, binary length-prefixed format
//! - **`SinglyList`** / **`DoublyList`** - Linked string lists, text format
//! - **`Stack`** - LIFO of strings, text format (top first)
//! - **`Queue`** - FIFO of strings, text format (front first)
//! - **`StringHashSet`** - Open-addressing string set, binary length-prefixed format
//!
//! Every container replaces its whole content on deserialize. Binary formats
//! implement [`BinaryPersist`], text formats implement [`TextPersist`].

mod array;
mod avl_tree;
mod doubly_list;
mod hash_set;
mod queue;
mod singly_list;
mod stack;

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::io::{DataInput, DataOutput};

pub use array::DynArray;
pub use avl_tree::{AvlTree, Iter as AvlIter, TreeNode, EMPTY_SUBTREE_MARKER};
pub use doubly_list::DoublyList;
pub use hash_set::StringHashSet;
pub use queue::Queue;
pub use singly_list::SinglyList;
pub use stack::Stack;

/// Containers persisted in a fixed-width little-endian binary format
pub trait BinaryPersist {
    /// Write the whole container to `output`
    fn serialize<O: DataOutput + ?Sized>(&self, output: &mut O) -> Result<()>;

    /// Replace the container's content with the one read from `input`
    ///
    /// On error the container is left in an unspecified but safe state and
    /// should be discarded or cleared.
    fn deserialize<I: DataInput + ?Sized>(&mut self, input: &mut I) -> Result<()>;
}

/// Containers persisted as newline-delimited text records
pub trait TextPersist {
    /// Write the whole container to `writer`
    fn serialize_text<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()>;

    /// Replace the container's content with the one read from `reader`
    fn deserialize_text<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> Result<()>;
}
