//! # sdkit: Persistent In-Memory Containers
//!
//! This crate provides a height-balanced (AVL) search tree of `i32` keys with a
//! compact preorder binary format, alongside a family of string containers
//! that persist themselves to byte streams.
//!
//! ## Key Features
//!
//! - **AVL Tree**: Unique `i32` keys, O(log n) insert and search, preorder
//!   serialization with an absent-child marker, and iterative traversal so
//!   hand-crafted deep streams cannot overflow the call stack
//! - **String Containers**: Growable array, singly and doubly linked lists,
//!   stack, queue, and an open-addressing hash set
//! - **Stream I/O**: `DataInput` / `DataOutput` traits over slices, readers,
//!   vectors, and writers
//! - **Configuration**: Capacity policy from code, presets, environment, or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use sdkit::{AvlTree, Stack, TextPersist};
//!
//! let mut tree = AvlTree::new();
//! for key in [10, 20, 30, 40, 50, 25] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.root().map(|n| n.key()), Some(30));
//!
//! // Binary round trip
//! let bytes = tree.to_bytes().unwrap();
//! let restored = AvlTree::from_bytes(&bytes).unwrap();
//! assert_eq!(restored, tree);
//!
//! // Text round trip
//! let mut stack = Stack::new();
//! stack.push("a");
//! stack.push("b");
//! let mut buf = Vec::new();
//! stack.serialize_text(&mut buf).unwrap();
//! let mut copy = Stack::new();
//! copy.deserialize_text(&mut buf.as_slice()).unwrap();
//! assert_eq!(copy.top().unwrap(), "b");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod containers;
pub mod error;
pub mod io;

// Re-export core types
pub use containers::{
    AvlIter, AvlTree, BinaryPersist, DoublyList, DynArray, Queue, SinglyList, Stack,
    StringHashSet, TextPersist, TreeNode, EMPTY_SUBTREE_MARKER,
};
pub use error::{ContainerError, Result};
pub use io::{DataInput, DataOutput, ReaderDataInput, SliceDataInput, VecDataOutput, WriterDataOutput};

pub use config::{Config, ContainerConfig};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing sdkit v{}", VERSION);
}
