use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// Stack of handles for walking the tree without recursion.
///
/// Inline capacity covers a reasonably shaped tree; a degenerate one spills to
/// the heap instead of the call stack.
type Stack<E> = SmallVec<[E; 32]>;

/// The unbalanced binary search tree backing `BstSet`.
pub(crate) struct RawBst<T> {
    /// Every node of this tree and no other.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<T> RawBst<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new, empty tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of elements. Nodes are never unlinked one by one,
    /// so this is the arena size.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the smallest element.
    pub(crate) fn first(&self) -> Option<&T> {
        self.extreme(Side::Left)
    }

    /// Returns the largest element.
    pub(crate) fn last(&self) -> Option<&T> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<&T> {
        let mut current = self.nodes.get(self.root?);
        while let Some(child) = current.child(side) {
            current = self.nodes.get(child);
        }
        Some(current.value())
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut height = 0;
        let mut pending: Stack<(Handle, usize)> = SmallVec::new();
        pending.push((root, 1));

        while let Some((handle, depth)) = pending.pop() {
            let node = self.nodes.get(handle);
            if node.is_leaf() {
                height = height.max(depth);
                continue;
            }
            pending.extend(node.left().map(|left| (left, depth + 1)));
            pending.extend(node.right().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Returns an in-order iterator over the elements.
    pub(crate) fn iter(&self) -> RawIter<'_, T> {
        let mut iter = RawIter {
            tree: self,
            stack: SmallVec::new(),
            remaining: self.len(),
        };
        iter.descend_left(self.root);
        iter
    }
}

impl<T: Ord> RawBst<T> {
    /// Finds the node holding `value`.
    pub(crate) fn search(&self, value: &T) -> Option<Handle> {
        let mut current = self.root?;

        loop {
            let node = self.nodes.get(current);
            match Side::of(value.cmp(node.value())) {
                None => return Some(current),
                Some(side) => current = node.child(side)?,
            }
        }
    }

    pub(crate) fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Inserts `value` as a new leaf. Returns `false`, leaving the tree
    /// untouched, if an equal value is already present.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.alloc(Node::leaf(value)));
            return true;
        };

        loop {
            let node = self.nodes.get(current);
            let Some(side) = Side::of(value.cmp(node.value())) else {
                return false;
            };

            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let leaf = self.nodes.alloc(Node::leaf(value));
                    self.nodes.get_mut(current).attach(side, leaf);
                    return true;
                }
            }
        }
    }
}

impl<T: Clone> RawBst<T> {
    /// Copies the tree node by node into a fresh arena, preserving its shape.
    pub(crate) fn deep_copy(&self) -> Self {
        let mut copy = Self::with_capacity(self.len());
        let Some(root) = self.root else {
            return copy;
        };

        // (source node, where its copy hangs in the new tree)
        let mut pending: Stack<(Handle, Option<(Handle, Side)>)> = SmallVec::new();
        pending.push((root, None));

        while let Some((source, parent)) = pending.pop() {
            let node = self.nodes.get(source);
            let fresh = copy.nodes.alloc(Node::leaf(node.value().clone()));
            match parent {
                Some((parent, side)) => copy.nodes.get_mut(parent).attach(side, fresh),
                None => copy.root = Some(fresh),
            }

            if let Some(right) = node.right() {
                pending.push((right, Some((fresh, Side::Right))));
            }
            if let Some(left) = node.left() {
                pending.push((left, Some((fresh, Side::Left))));
            }
        }

        copy
    }
}

/// In-order iterator over a [`RawBst`].
pub(crate) struct RawIter<'a, T> {
    tree: &'a RawBst<T>,
    /// Nodes whose left subtree is being visited; the top is the next to yield.
    stack: Stack<Handle>,
    remaining: usize,
}

impl<T> RawIter<'_, T> {
    fn descend_left(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.tree.nodes.get(handle).left();
        }
    }
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.stack.pop()?;
        let tree = self.tree;
        let node = tree.nodes.get(handle);
        self.descend_left(node.right());
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RawIter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for RawIter<'_, T> {}

impl<T> Clone for RawIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
