use super::BstSet;
use crate::raw::RawBst;

impl<T> BstSet<T> {
    /// Creates an empty set with room for at least `capacity` elements.
    ///
    /// Each element occupies one node, so inserting up to `capacity` values
    /// does not reallocate node storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_calc::BstSet;
    ///
    /// let set: BstSet<i64> = BstSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BstSet {
            tree: RawBst::with_capacity(capacity),
        }
    }

    /// Returns how many elements the set can hold before node storage grows.
    ///
    /// Clearing keeps the capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
