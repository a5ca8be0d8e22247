use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};
use core::iter::FusedIterator;

use crate::raw::{RawBst, RawIter};

mod capacity;

/// An ordered set of unique elements backed by an unbalanced binary search tree.
///
/// Elements are placed by comparison alone: no rebalancing ever happens, so
/// the shape of the tree is decided by insertion order. Inserting already
/// sorted values produces a tree shaped like a linked list, and every
/// operation then costs O(n) instead of O(log n). [`height`] exposes this.
///
/// Nodes are owned by the set that created them. Copying, union and
/// intersection always place duplicated values into freshly allocated nodes,
/// so two sets never share structure.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element, as determined by the [`Ord`]
/// trait, changes while it is in the set.
///
/// [`height`]: BstSet::height
///
/// # Examples
///
/// ```
/// use bst_calc::BstSet;
///
/// let mut x = BstSet::new();
/// x.insert(5);
/// x.insert(3);
/// x.insert(8);
/// x.insert(3);
///
/// assert_eq!(x.iter().copied().collect::<Vec<_>>(), [3, 5, 8]);
/// assert_eq!(x.render(), "3 5 8\n");
///
/// let y = BstSet::from([2, 3, 4]);
/// x.intersect_with(&y);
/// assert_eq!(x.render(), "3\n");
/// ```
pub struct BstSet<T> {
    tree: RawBst<T>,
}

/// An iterator over the elements of a `BstSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`BstSet`].
///
/// [`iter`]: BstSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: RawIter<'a, T>,
}

impl<T> BstSet<T> {
    /// Makes a new, empty `BstSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let set: BstSet<i64> = BstSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> BstSet<T> {
        BstSet { tree: RawBst::new() }
    }

    /// Clears the set, dropping every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let mut v = BstSet::from([1, 2]);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.render(), "null\n");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// Every call starts a fresh traversal, so a set can be walked any number
    /// of times.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let set = BstSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height) to create the iterator; O(n) for a full traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.tree.iter() }
    }

    /// Returns the smallest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// assert_eq!(BstSet::from([4, 2, 9]).first(), Some(&2));
    /// assert_eq!(BstSet::<i32>::new().first(), None);
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns the largest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// assert_eq!(BstSet::from([4, 2, 9]).last(), Some(&9));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// An empty set has height 0. Since the tree never rebalances, `n` values
    /// inserted in sorted order give height `n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// assert_eq!(BstSet::from([2, 1, 3]).height(), 2);
    /// assert_eq!(BstSet::from([1, 2, 3]).height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Applies `f` to every element in ascending order and collects the
    /// results, in that order.
    ///
    /// The set is never modified, and `f` is free to produce values that are
    /// unordered or repeated. The first error returned by `f` stops the
    /// traversal and is handed back; no partial output is returned.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let x = BstSet::from([5, 1, 9]);
    /// let doubled = x.apply(|v| Ok::<_, ()>(v * 2));
    /// assert_eq!(doubled, Ok(vec![2, 10, 18]));
    ///
    /// let checked = x.apply(|v| 10i32.checked_div(v - 5).ok_or("division by zero"));
    /// assert_eq!(checked, Err("division by zero"));
    /// ```
    pub fn apply<U, E, F>(&self, mut f: F) -> Result<Vec<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        self.iter().map(&mut f).collect()
    }
}

impl<T: fmt::Display> BstSet<T> {
    /// Renders the elements in ascending order, separated by single spaces and
    /// terminated by a line break.
    ///
    /// An empty set renders as the literal `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// assert_eq!(BstSet::from([10, -2, 7]).render(), "-2 7 10\n");
    /// assert_eq!(BstSet::<i64>::new().render(), "null\n");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = writeln!(out, "{self}");
        out
    }
}

impl<T: Ord> BstSet<T> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. An equal value already in
    /// the set is left in place and the call is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = self.tree.insert(value);
        log::trace!("insert: inserted={inserted} len={}", self.len());
        inserted
    }

    /// Returns `true` if the set contains a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3]);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }
}

impl<T: Ord + Clone> BstSet<T> {
    /// Returns an independent copy of the set with the same tree shape.
    ///
    /// Every node is freshly allocated; changes to either set are invisible to
    /// the other.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let x = BstSet::from([2, 1, 3]);
    /// let mut y = x.deep_copy();
    /// y.insert(4);
    /// assert_eq!(x.len(), 3);
    /// assert_eq!(y.height(), x.height() + 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn deep_copy(&self) -> BstSet<T> {
        BstSet {
            tree: self.tree.deep_copy(),
        }
    }

    /// Inserts every element of `other` into `self`, leaving `other` untouched.
    ///
    /// Returns `self` so calls can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let mut x = BstSet::from([1, 2]);
    /// let y = BstSet::from([2, 3]);
    /// let z = BstSet::from([9]);
    /// x.union_with(&y).union_with(&z);
    /// assert_eq!(x.render(), "1 2 3 9\n");
    /// assert_eq!(y.render(), "2 3\n");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m * height) for `m` elements in `other`.
    pub fn union_with(&mut self, other: &BstSet<T>) -> &mut BstSet<T> {
        let before = self.len();
        for element in other {
            self.tree.insert(element.clone());
        }
        log::debug!("union_with: {before} -> {} elements ({} offered)", self.len(), other.len());
        self
    }

    /// Keeps only the elements of `self` that are also in `other`, leaving
    /// `other` untouched.
    ///
    /// The current contents are copied aside before the set is cleared and
    /// rebuilt from the surviving elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let mut x = BstSet::from([1, 2, 3]);
    /// let y = BstSet::from([2, 3, 4]);
    /// x.intersect_with(&y);
    /// assert_eq!(x.render(), "2 3\n");
    /// assert_eq!(y.render(), "2 3 4\n");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n * (height(other) + height)) for `n` elements in `self`.
    pub fn intersect_with(&mut self, other: &BstSet<T>) {
        let before = self.len();
        let snapshot = self.tree.deep_copy();
        self.tree.clear();

        for element in snapshot.iter() {
            if other.contains(element) {
                self.tree.insert(element.clone());
            }
        }
        log::debug!("intersect_with: {before} -> {} elements", self.len());
    }
}

impl<T: fmt::Display> fmt::Display for BstSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut elements = self.iter();
        let Some(first) = elements.next() else {
            return f.write_str("null");
        };

        write!(f, "{first}")?;
        for element in elements {
            write!(f, " {element}")?;
        }
        Ok(())
    }
}

impl<T: PartialEq> PartialEq for BstSet<T> {
    /// Two sets are equal when they hold the same elements, whatever the shape
    /// of their trees.
    fn eq(&self, other: &BstSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BstSet<T> {}

impl<T: Ord + Clone> Clone for BstSet<T> {
    fn clone(&self) -> Self {
        self.deep_copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for BstSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for BstSet<T> {
    fn default() -> Self {
        BstSet::new()
    }
}

impl<T: Ord> FromIterator<T> for BstSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = BstSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for BstSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.tree.insert(element);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for BstSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BstSet<T> {
    /// Inserts the array's elements in array order, so the first element
    /// becomes the root.
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a BstSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
