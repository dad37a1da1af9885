//! Validator stack: a dense registry of live secondary groups.
//!
//! Slot `v < len` holds the group that registered it. A group's link is
//! trusted only if it names a slot below `len` *and* that slot names the group
//! back. Everything else, including memory left over from an earlier
//! registration or a [`clear`](ValidatorStack::clear), reads as unregistered.
//!
//! Removal swaps the last slot into the freed one so slots `0..len` stay
//! gap-free; the caller must then rewrite the moved group's link.

#[derive(Debug, Clone, Default)]
pub(crate) struct ValidatorStack {
    slots: Vec<usize>,
    len: usize,
}

impl ValidatorStack {
    /// A stack able to hold `capacity` groups. This is the only zero-fill.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot `v` as seen by `group`'s link: true iff the round trip closes.
    #[inline]
    pub(crate) fn is_registered(&self, slot: usize, group: usize) -> bool {
        slot < self.len && self.slots[slot] == group
    }

    /// Group held by slot `v`. `v` must be below `len`.
    #[inline]
    pub(crate) fn get(&self, slot: usize) -> usize {
        debug_assert!(slot < self.len);
        self.slots[slot]
    }

    /// Most recently registered group still live.
    #[inline]
    pub(crate) fn top(&self) -> Option<usize> {
        self.len.checked_sub(1).map(|v| self.slots[v])
    }

    /// Register `group` and return its slot.
    #[inline]
    pub(crate) fn push(&mut self, group: usize) -> usize {
        let slot = self.len;
        self.slots[slot] = group;
        self.len += 1;
        slot
    }

    /// Free `slot`, moving the last entry into it.
    ///
    /// Returns the group that now occupies `slot`, or `None` if `slot` was the
    /// last one and nothing moved.
    #[inline]
    pub(crate) fn swap_remove(&mut self, slot: usize) -> Option<usize> {
        debug_assert!(slot < self.len);
        let last = self.len - 1;
        self.len = last;
        if slot < last {
            let moved = self.slots[last];
            self.slots[slot] = moved;
            Some(moved)
        } else {
            None
        }
    }

    /// Unregister every group at once.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<usize>()
    }
}
