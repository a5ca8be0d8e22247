use core::num::NonZero;

// Small handles under test make the capacity limit reachable.
#[cfg(test)]
type Slot = u16;
#[cfg(not(test))]
type Slot = u32;

/// Index of a node inside an [`Arena`](super::arena::Arena).
///
/// Stored off by one so that `Option<Handle>` (an absent child link) costs no
/// more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Slot>);

impl Handle {
    /// The largest slot index a handle can address.
    pub(crate) const MAX: usize = (Slot::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        assert!(slot <= Self::MAX, "`Handle::new()` - `slot` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((slot + 1) as Slot) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
