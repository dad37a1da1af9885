//! Word-level bit addressing shared by the primary and secondary layers.
//!
//! Bits are numbered MSB-first: offset `0` is the most significant bit of a
//! word. With this convention the O(1) "find any set bit" primitive is
//! `leading_zeros`, which lowers to a single `lzcnt`/`bsr` where the target
//! has one.

/// Number of elements tracked per primary word, and primary words per group.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Location of a bit inside a word array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BitAddr {
    pub(crate) word: usize,
    pub(crate) offset: usize, // invariant: in 0..WORD_BITS
}

impl BitAddr {
    #[inline]
    pub(crate) const fn of(index: usize) -> Self {
        Self {
            word: index / WORD_BITS,
            offset: index % WORD_BITS,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.word * WORD_BITS + self.offset
    }

    #[inline]
    pub(crate) const fn mask(self) -> u64 {
        mask(self.offset)
    }
}

/// Single-bit mask for `offset`, MSB-first.
#[inline]
pub(crate) const fn mask(offset: usize) -> u64 {
    debug_assert!(offset < WORD_BITS);
    1u64 << (WORD_BITS - 1 - offset)
}

/// Offset of the first (most significant) set bit. `word` must be non-zero.
#[inline]
pub(crate) const fn first_set(word: u64) -> usize {
    debug_assert!(word != 0);
    word.leading_zeros() as usize
}
