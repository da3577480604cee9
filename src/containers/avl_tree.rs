//! AvlTree: height-balanced binary search tree over unique `i32` keys
//!
//! Every insertion rebalances the path back to the root with single or double
//! rotations, so that for every node the heights of its two subtrees differ by
//! at most one. Nodes are exclusively owned by their parent through
//! `Option<Box<TreeNode>>` links; there are no parent pointers and no node is
//! ever removed individually.
//!
//! # Persistent format
//!
//! The tree persists as a preorder walk, little-endian throughout:
//!
//! ```text
//! tree-stream   := node-or-empty
//! node-or-empty := empty | node
//! empty         := i32(-999999)
//! node          := i32(key) i32(height) node-or-empty(left) node-or-empty(right)
//! ```
//!
//! Loading trusts the stream: the recorded shape and heights are materialized
//! as-is, without rebalancing or validation. Use [`AvlTree::check_invariants`]
//! to verify a tree obtained from an untrusted source.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use crate::containers::BinaryPersist;
use crate::error::{ContainerError, Result};
use crate::io::{DataInput, DataOutput, SliceDataInput, VecDataOutput};

/// Stream marker for an absent child
///
/// A real key equal to this value cannot be told apart from an absent child
/// once serialized.
pub const EMPTY_SUBTREE_MARKER: i32 = -999_999;

type Link = Option<Box<TreeNode>>;

/// A node of an [`AvlTree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    key: i32,
    height: i32,
    left: Link,
    right: Link,
}

impl TreeNode {
    fn leaf(key: i32) -> Box<Self> {
        Box::new(Self {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// The key stored in this node
    #[inline]
    pub fn key(&self) -> i32 {
        self.key
    }

    /// Stored height of the subtree rooted here; a leaf has height 1
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Left child, holding smaller keys
    #[inline]
    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    /// Right child, holding larger keys
    #[inline]
    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }

    /// `height(left) - height(right)` from the stored child heights
    #[inline]
    pub fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

#[inline]
fn height(link: &Link) -> i32 {
    link.as_ref().map_or(0, |n| n.height)
}

/// Right rotation: the left child becomes the subtree root
///
/// ```text
///       y            x
///      / \          / \
///     x   C  -->   A   y
///    / \              / \
///   A   B            B   C
/// ```
fn rotate_right(mut y: Box<TreeNode>) -> Box<TreeNode> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    log::trace!("rotate right at {} (new root {})", y.key, x.key);
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Left rotation: the right child becomes the subtree root
fn rotate_left(mut x: Box<TreeNode>) -> Box<TreeNode> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    log::trace!("rotate left at {} (new root {})", x.key, y.key);
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Insert `key` below `link`, returning the (possibly new) subtree root
/// and whether a node was created.
fn insert_at(link: Link, key: i32) -> (Box<TreeNode>, bool) {
    let mut node = match link {
        None => return (TreeNode::leaf(key), true),
        Some(node) => node,
    };

    let inserted = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, inserted) = insert_at(node.left.take(), key);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert_at(node.right.take(), key);
            node.right = Some(child);
            inserted
        }
        Ordering::Equal => return (node, false),
    };
    if !inserted {
        return (node, false);
    }

    node.update_height();
    (rebalance(node, key), true)
}

/// Restore the balance of `node` after `key` was inserted below it
fn rebalance(mut node: Box<TreeNode>, key: i32) -> Box<TreeNode> {
    let balance = node.balance_factor();

    if balance > 1 {
        // Heavy on the left, so the left child exists.
        let left_key = node.left.as_ref().map_or(key, |l| l.key);
        if key > left_key {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        let right_key = node.right.as_ref().map_or(key, |r| r.key);
        if key < right_key {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

/// Height-balanced binary search tree of unique `i32` keys
///
/// # Examples
///
/// ```rust
/// use sdkit::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for key in [10, 20, 30] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.root().map(|n| n.key()), Some(20));
/// assert_eq!(tree.height(), 2);
/// assert!(tree.search(30).is_some());
/// assert!(tree.search(40).is_none());
/// ```
#[derive(Default, Clone, PartialEq, Eq)]
pub struct AvlTree {
    root: Link,
    len: usize,
}

impl AvlTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Insert `key`; inserting a key that is already present does nothing
    ///
    /// Returns `true` if a node was created.
    pub fn insert(&mut self, key: i32) -> bool {
        if key == EMPTY_SUBTREE_MARKER {
            log::warn!(
                "inserting key {} which collides with the empty-subtree stream marker",
                key
            );
        }
        let (root, inserted) = insert_at(self.root.take(), key);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Find the node holding `key`
    pub fn search(&self, key: i32) -> Option<&TreeNode> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Check whether `key` is present
    #[inline]
    pub fn contains(&self, key: i32) -> bool {
        self.search(key).is_some()
    }

    /// The root node, if any
    #[inline]
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Check whether the tree has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Stored height of the root; 0 for an empty tree
    #[inline]
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Discard every node
    pub fn clear(&mut self) {
        drop_subtree(self.root.take());
        self.len = 0;
    }

    /// Insert every key of `other`, in ascending order
    pub fn add_tree(&mut self, other: &AvlTree) {
        for key in other.iter() {
            self.insert(key);
        }
    }

    /// In-order iterator over the keys
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }

    /// Keys in ascending order
    pub fn inorder(&self) -> Vec<i32> {
        self.iter().collect()
    }

    /// Keys in node, left, right order
    pub fn preorder(&self) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut stack: Vec<&TreeNode> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            keys.push(node.key);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        keys
    }

    /// Keys in left, right, node order
    pub fn postorder(&self) -> Vec<i32> {
        // Reverse of a node, right, left walk.
        let mut keys = Vec::new();
        let mut stack: Vec<&TreeNode> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            keys.push(node.key);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        keys.reverse();
        keys
    }

    /// Keys level by level, left to right
    pub fn level_order(&self) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut queue: VecDeque<&TreeNode> = self.root.as_deref().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            keys.push(node.key);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        keys
    }

    /// Verify search order, stored heights and balance of every node
    ///
    /// Returns the first violation found as [`ContainerError::InvalidData`].
    pub fn check_invariants(&self) -> Result<()> {
        // (node, exclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(&TreeNode, Option<i32>, Option<i32>)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, None, None));
        }
        while let Some((node, lower, upper)) = stack.pop() {
            if lower.is_some_and(|lo| node.key <= lo) || upper.is_some_and(|hi| node.key >= hi) {
                return Err(ContainerError::invalid_data(format!(
                    "key {} violates search order (bounds {:?}..{:?})",
                    node.key, lower, upper
                )));
            }
            let expected = 1 + height(&node.left).max(height(&node.right));
            if node.height != expected {
                return Err(ContainerError::invalid_data(format!(
                    "node {} stores height {}, expected {}",
                    node.key, node.height, expected
                )));
            }
            let balance = node.balance_factor();
            if !(-1..=1).contains(&balance) {
                return Err(ContainerError::invalid_data(format!(
                    "node {} has balance factor {}",
                    node.key, balance
                )));
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, lower, Some(node.key)));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, Some(node.key), upper));
            }
        }
        Ok(())
    }

    /// Serialize into a new byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = VecDataOutput::new();
        self.serialize(&mut output)?;
        Ok(output.into_vec())
    }

    /// Deserialize a tree from a byte slice
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut tree = Self::new();
        tree.deserialize(&mut SliceDataInput::new(bytes))?;
        Ok(tree)
    }
}

impl BinaryPersist for AvlTree {
    fn serialize<O: DataOutput + ?Sized>(&self, output: &mut O) -> Result<()> {
        // Explicit stack instead of recursion; right is pushed before left so
        // the emitted order matches a recursive preorder walk.
        let mut stack: Vec<Option<&TreeNode>> = vec![self.root.as_deref()];
        let mut nodes = 0usize;
        while let Some(slot) = stack.pop() {
            match slot {
                None => output.write_i32(EMPTY_SUBTREE_MARKER)?,
                Some(node) => {
                    output.write_i32(node.key)?;
                    output.write_i32(node.height)?;
                    stack.push(node.right.as_deref());
                    stack.push(node.left.as_deref());
                    nodes += 1;
                }
            }
        }
        log::debug!("serialized avl tree: {} nodes", nodes);
        Ok(())
    }

    fn deserialize<I: DataInput + ?Sized>(&mut self, input: &mut I) -> Result<()> {
        self.clear();

        let mut pending = PendingNodes(Vec::new());
        let mut nodes = 0usize;

        loop {
            let key = input.read_i32()?;
            let mut finished: Link = if key == EMPTY_SUBTREE_MARKER {
                None
            } else {
                let height = input.read_i32()?;
                nodes += 1;
                pending.0.push((
                    Box::new(TreeNode {
                        key,
                        height,
                        left: None,
                        right: None,
                    }),
                    Side::Left,
                ));
                continue;
            };

            // Attach the completed subtree to its parent, closing every
            // ancestor whose right side it completes.
            loop {
                match pending.0.last_mut() {
                    None => {
                        self.root = finished;
                        self.len = nodes;
                        log::debug!("deserialized avl tree: {} nodes", nodes);
                        return Ok(());
                    }
                    Some((parent, side @ Side::Left)) => {
                        parent.left = finished;
                        *side = Side::Right;
                        break;
                    }
                    Some((parent, Side::Right)) => {
                        parent.right = finished;
                        finished = pending.0.pop().map(|(node, _)| node);
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Nodes whose children are still being read, with the side to fill next
struct PendingNodes(Vec<(Box<TreeNode>, Side)>);

impl Drop for PendingNodes {
    fn drop(&mut self) {
        // Only non-empty when a read failed midway.
        for (node, _) in self.0.drain(..) {
            drop_subtree(Some(node));
        }
    }
}

/// Tear down a subtree without recursing, so a degenerate chain read from a
/// stream cannot exhaust the call stack.
fn drop_subtree(link: Link) {
    let mut stack: Vec<Box<TreeNode>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl Drop for AvlTree {
    fn drop(&mut self) {
        drop_subtree(self.root.take());
    }
}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Extend<i32> for AvlTree {
    fn extend<T: IntoIterator<Item = i32>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<i32> for AvlTree {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the keys of an [`AvlTree`]
pub struct Iter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a TreeNode>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.key)
    }
}
