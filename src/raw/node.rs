use core::cmp::Ordering;

use super::handle::Handle;

/// Which child link of a node a value descends into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// The side a value lands on relative to a node, or `None` if it is equal.
    #[inline]
    pub(crate) fn of(ordering: Ordering) -> Option<Self> {
        match ordering {
            Ordering::Less => Some(Side::Left),
            Ordering::Greater => Some(Side::Right),
            Ordering::Equal => None,
        }
    }
}

// A single BST cell. Children are handles into the same arena as the node.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    value: T,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a leaf holding `value`.
    pub(crate) const fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Links `child` under this node. The slot must be empty.
    pub(crate) fn attach(&mut self, side: Side, child: Handle) {
        let link = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        debug_assert!(link.is_none(), "`Node::attach()` - {side:?} child already present!");
        *link = Some(child);
    }

    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn side_of_ordering() {
        assert_eq!(Side::of(Ordering::Less), Some(Side::Left));
        assert_eq!(Side::of(Ordering::Greater), Some(Side::Right));
        assert_eq!(Side::of(Ordering::Equal), None);
    }

    #[test]
    fn attach_children() {
        let mut node = Node::leaf(5);
        assert!(node.is_leaf());

        node.attach(Side::Right, Handle::new(7));
        assert_eq!(node.right(), Some(Handle::new(7)));
        assert_eq!(node.child(Side::Left), None);
        assert!(!node.is_leaf());

        node.attach(Side::Left, Handle::new(3));
        assert_eq!(node.left(), Some(Handle::new(3)));
        assert_eq!(*node.value(), 5);
    }

    #[test]
    #[should_panic(expected = "child already present")]
    #[cfg(debug_assertions)]
    fn attach_twice_panics() {
        let mut node = Node::leaf(1);
        node.attach(Side::Left, Handle::new(0));
        node.attach(Side::Left, Handle::new(1));
    }
}
