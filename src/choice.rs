//! Choice dictionary over a fixed universe `[0, n)`.
//!
//! Supports `insert`, `remove`, `contains` and `choice` (return *some*
//! present element) in $O(1)$ worst-case time, with no operation ever
//! scanning the universe.
//!
//! # Layout
//!
//! - **Primary**: one bit per element, `ceil(n / 64)` words.
//! - **Secondary**: one tuple per group of 64 primary words, stored
//!   interleaved as `[liveness, link]`. Bit `j` of `liveness` says primary
//!   word `64 * group + j` is non-zero; `link` is the group's slot on the
//!   validator stack.
//! - **Validator stack**: dense list of live groups; its length is the live
//!   group count.
//!
//! A group is live iff `link < stack.len()` and `stack[link] == group`. Data
//! belonging to a group that fails this round trip is never read, so nothing
//! has to be zeroed after construction, and [`ChoiceDictionary::clear`] is a
//! single store.

use crate::error::{Error, Result};
use crate::iter::{Drain, Iter};
use crate::validator::ValidatorStack;
use crate::word::{first_set, mask, BitAddr, WORD_BITS};

/// Words per secondary tuple.
const TUPLE_WIDTH: usize = 2;
/// Offset of the link inside a tuple; the liveness word sits at offset 0.
const LINK_OFFSET: usize = 1;

/// A set over `[0, universe)` with $O(1)$ insert, remove, membership and choice.
#[derive(Clone, Default)]
pub struct ChoiceDictionary {
    primary: Vec<u64>,
    /// Interleaved `[liveness, link]` tuples, one per group.
    secondary: Vec<u64>,
    validator: ValidatorStack,
    universe: usize,
    len: usize,
}

impl std::fmt::Debug for ChoiceDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChoiceDictionary")
            .field("universe", &self.universe)
            .field("len", &self.len)
            .field("live_groups", &self.validator.len())
            .finish()
    }
}

impl ChoiceDictionary {
    /// Create an empty dictionary over `[0, universe)`.
    pub fn new(universe: usize) -> Self {
        let words = universe.div_ceil(WORD_BITS);
        let groups = words.div_ceil(WORD_BITS);
        tracing::debug!(universe, words, groups, "allocating choice dictionary");
        Self {
            primary: vec![0; words],
            secondary: vec![0; groups * TUPLE_WIDTH],
            validator: ValidatorStack::with_capacity(groups),
            universe,
            len: 0,
        }
    }

    /// Size of the universe this dictionary was built for.
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Number of elements currently present.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if no element is present.
    pub fn is_empty(&self) -> bool {
        self.validator.is_empty()
    }

    /// Number of groups currently registered on the validator stack.
    pub fn live_groups(&self) -> usize {
        self.validator.len()
    }

    /// Approximate heap memory usage in bytes.
    pub fn heap_bytes(&self) -> usize {
        (self.primary.capacity() + self.secondary.capacity()) * std::mem::size_of::<u64>()
            + self.validator.heap_bytes()
    }

    /// Add `index`. Returns true if it was absent before.
    pub fn insert(&mut self, index: usize) -> Result<bool> {
        let addr = self.addr(index)?;
        if self.word_is_live(addr.word) {
            let word = &mut self.primary[addr.word];
            if *word & addr.mask() != 0 {
                return Ok(false);
            }
            *word |= addr.mask();
        } else {
            // Whatever the word held is stale.
            self.primary[addr.word] = addr.mask();
            self.register_word(addr.word);
        }
        self.len += 1;
        Ok(true)
    }

    /// Remove `index`. Returns true if it was present before.
    ///
    /// Fails with [`Error::Empty`] when nothing is present.
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        let addr = self.addr(index)?;
        if self.validator.is_empty() {
            return Err(Error::Empty);
        }
        if !self.word_is_live(addr.word) || self.primary[addr.word] & addr.mask() == 0 {
            return Ok(false);
        }
        let word = &mut self.primary[addr.word];
        *word &= !addr.mask();
        if *word == 0 {
            self.unregister_word(addr.word);
        }
        self.len -= 1;
        Ok(true)
    }

    /// Return true if `index` is present.
    pub fn contains(&self, index: usize) -> Result<bool> {
        let addr = self.addr(index)?;
        Ok(self.word_is_live(addr.word) && self.primary[addr.word] & addr.mask() != 0)
    }

    /// Alias of [`contains`](Self::contains).
    pub fn get(&self, index: usize) -> Result<bool> {
        self.contains(index)
    }

    /// Return some present element.
    ///
    /// Which one is unspecified, but the answer does not change until the
    /// dictionary is mutated.
    pub fn choice(&self) -> Result<usize> {
        let group = self.validator.top().ok_or(Error::Empty)?;
        // Live groups have a non-zero liveness word; live words are non-zero.
        let word = group * WORD_BITS + first_set(self.liveness(group));
        let offset = first_set(self.primary[word]);
        Ok(BitAddr { word, offset }.index())
    }

    /// Remove every element in $O(1)$.
    ///
    /// Only the validator stack is reset; the stale words left behind fail
    /// validation and are overwritten when their group is registered again.
    pub fn clear(&mut self) {
        tracing::debug!(len = self.len, live_groups = self.validator.len(), "clearing");
        self.validator.clear();
        self.len = 0;
    }

    /// Iterate over all present elements in unspecified order.
    ///
    /// Runs in $O(len + live\_groups)$ time.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Remove and yield every present element, one `choice` at a time.
    ///
    /// Dropping the iterator early clears whatever is left.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain::new(self)
    }

    fn addr(&self, index: usize) -> Result<BitAddr> {
        if index >= self.universe {
            return Err(Error::OutOfRange {
                index,
                universe: self.universe,
            });
        }
        Ok(BitAddr::of(index))
    }

    // ---- secondary layer ----

    #[inline]
    pub(crate) fn liveness(&self, group: usize) -> u64 {
        self.secondary[group * TUPLE_WIDTH]
    }

    #[inline]
    fn liveness_mut(&mut self, group: usize) -> &mut u64 {
        &mut self.secondary[group * TUPLE_WIDTH]
    }

    #[inline]
    fn link(&self, group: usize) -> usize {
        self.secondary[group * TUPLE_WIDTH + LINK_OFFSET] as usize
    }

    #[inline]
    fn set_link(&mut self, group: usize, slot: usize) {
        self.secondary[group * TUPLE_WIDTH + LINK_OFFSET] = slot as u64;
    }

    #[inline]
    fn group_is_live(&self, group: usize) -> bool {
        self.validator.is_registered(self.link(group), group)
    }

    #[inline]
    fn word_is_live(&self, word: usize) -> bool {
        let group = word / WORD_BITS;
        self.group_is_live(group) && self.liveness(group) & mask(word % WORD_BITS) != 0
    }

    /// Mark primary `word` non-zero, registering its group if needed.
    fn register_word(&mut self, word: usize) {
        let group = word / WORD_BITS;
        if !self.group_is_live(group) {
            *self.liveness_mut(group) = 0;
            let slot = self.validator.push(group);
            self.set_link(group, slot);
            tracing::trace!(group, slot, "registered group");
        }
        *self.liveness_mut(group) |= mask(word % WORD_BITS);
    }

    /// Mark primary `word` zero, unregistering its group once it is empty.
    fn unregister_word(&mut self, word: usize) {
        let group = word / WORD_BITS;
        let liveness = self.liveness_mut(group);
        *liveness &= !mask(word % WORD_BITS);
        if *liveness != 0 {
            return;
        }
        let slot = self.link(group);
        if let Some(moved) = self.validator.swap_remove(slot) {
            self.set_link(moved, slot);
        }
        tracing::trace!(group, slot, "unregistered group");
    }

    // ---- accessors for iteration ----

    #[inline]
    pub(crate) fn primary_word(&self, word: usize) -> u64 {
        self.primary[word]
    }

    #[inline]
    pub(crate) fn validator(&self) -> &ValidatorStack {
        &self.validator
    }
}

impl<'a> IntoIterator for &'a ChoiceDictionary {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_dictionary_is_empty() {
        let cd = ChoiceDictionary::new(100);
        assert_eq!(cd.universe(), 100);
        assert!(cd.is_empty());
        // Two primary words, one tuple of two words, one validator slot.
        assert_eq!(
            cd.heap_bytes(),
            4 * std::mem::size_of::<u64>() + std::mem::size_of::<usize>()
        );
        for x in 0..100 {
            assert!(!cd.get(x).unwrap());
        }
        assert_eq!(cd.choice(), Err(Error::Empty));
    }

    #[test]
    fn insert_remove_choice_scenario() {
        let mut cd = ChoiceDictionary::new(100);
        assert!(cd.insert(5).unwrap());
        assert!(cd.insert(10).unwrap());
        assert!(cd.insert(99).unwrap());
        assert!(cd.get(5).unwrap());
        assert!(!cd.get(6).unwrap());
        assert!(cd.get(99).unwrap());
        assert_eq!(cd.len(), 3);

        let c = cd.choice().unwrap();
        assert!([5, 10, 99].contains(&c));
        assert_eq!(cd.choice().unwrap(), c);

        assert!(cd.remove(10).unwrap());
        assert!(!cd.get(10).unwrap());
        assert!([5, 99].contains(&cd.choice().unwrap()));

        cd.remove(5).unwrap();
        cd.remove(99).unwrap();
        assert!(cd.is_empty());
        assert_eq!(cd.len(), 0);
        assert_eq!(cd.choice(), Err(Error::Empty));
        assert_eq!(cd.remove(5), Err(Error::Empty));
    }

    #[test]
    fn out_of_range_is_rejected_without_mutation() {
        let mut cd = ChoiceDictionary::new(100);
        cd.insert(7).unwrap();
        let err = Error::OutOfRange {
            index: 200,
            universe: 100,
        };
        assert_eq!(cd.insert(200), Err(err));
        assert_eq!(cd.remove(200), Err(err));
        assert!(cd.get(100).is_err());
        assert!(cd.contains(usize::MAX).is_err());
        assert!(cd.get(7).unwrap());
        assert_eq!(cd.len(), 1);
    }

    #[test]
    fn range_is_checked_before_emptiness() {
        let mut cd = ChoiceDictionary::new(10);
        assert!(matches!(cd.remove(10), Err(Error::OutOfRange { .. })));
        assert_eq!(cd.remove(3), Err(Error::Empty));
    }

    #[test]
    fn insert_and_remove_are_idempotent() {
        let mut cd = ChoiceDictionary::new(64);
        assert!(cd.insert(3).unwrap());
        assert!(!cd.insert(3).unwrap());
        assert_eq!(cd.len(), 1);
        assert_eq!(cd.live_groups(), 1);

        cd.insert(4).unwrap();
        assert!(cd.remove(3).unwrap());
        assert!(!cd.remove(3).unwrap());
        assert_eq!(cd.len(), 1);
        assert!(cd.get(4).unwrap());
    }

    #[test]
    fn choice_prefers_most_significant_bits() {
        let mut cd = ChoiceDictionary::new(200);
        cd.insert(70).unwrap();
        cd.insert(65).unwrap();
        cd.insert(130).unwrap();
        // Words 1 and 2 share group 0; word 1 sits at the higher bit.
        assert_eq!(cd.choice().unwrap(), 65);
    }

    #[test]
    fn swap_remove_relinks_moved_group() {
        // Three groups: elements in words 0, 64 and 128 land in groups 0, 1, 2.
        let universe = 3 * WORD_BITS * WORD_BITS;
        let a = 0;
        let b = WORD_BITS * WORD_BITS;
        let c = 2 * WORD_BITS * WORD_BITS;
        let mut cd = ChoiceDictionary::new(universe);
        for x in [a, b, c] {
            cd.insert(x).unwrap();
        }
        assert_eq!(cd.live_groups(), 3);
        assert_eq!(cd.choice().unwrap(), c);

        // Group 0 sits at the bottom; removing it moves group 2 into slot 0.
        cd.remove(a).unwrap();
        assert_eq!(cd.live_groups(), 2);
        assert!(!cd.get(a).unwrap());
        assert!(cd.get(b).unwrap());
        assert!(cd.get(c).unwrap());
        assert_eq!(cd.choice().unwrap(), b);

        cd.remove(b).unwrap();
        assert_eq!(cd.choice().unwrap(), c);
        cd.remove(c).unwrap();
        assert!(cd.is_empty());
    }

    #[test]
    fn reregistered_group_ignores_stale_words() {
        let mut cd = ChoiceDictionary::new(WORD_BITS * 4);
        cd.insert(1).unwrap();
        cd.insert(WORD_BITS + 2).unwrap();
        cd.remove(WORD_BITS + 2).unwrap();
        cd.remove(1).unwrap();
        assert!(cd.is_empty());

        cd.insert(2 * WORD_BITS).unwrap();
        assert!(!cd.get(1).unwrap());
        assert!(!cd.get(WORD_BITS + 2).unwrap());
        assert_eq!(cd.choice().unwrap(), 2 * WORD_BITS);
    }

    #[test]
    fn clear_is_logical_reset() {
        let mut cd = ChoiceDictionary::new(10_000);
        for x in (0..10_000).step_by(7) {
            cd.insert(x).unwrap();
        }
        cd.clear();
        assert!(cd.is_empty());
        assert_eq!(cd.len(), 0);
        assert_eq!(cd.choice(), Err(Error::Empty));
        for x in (0..10_000).step_by(7) {
            assert!(!cd.get(x).unwrap());
        }

        // Stale primary bits of a reused word must not resurface.
        cd.insert(8).unwrap();
        assert!(cd.get(8).unwrap());
        assert!(!cd.get(7).unwrap());
        assert!(!cd.get(0).unwrap());
        assert_eq!(cd.len(), 1);
        assert_eq!(cd.choice().unwrap(), 8);
    }

    #[test]
    fn empty_universe() {
        let mut cd = ChoiceDictionary::new(0);
        assert!(cd.insert(0).is_err());
        assert_eq!(cd.choice(), Err(Error::Empty));
        assert_eq!(cd.iter().count(), 0);
    }

    #[test]
    fn universe_not_multiple_of_word() {
        let mut cd = ChoiceDictionary::new(65);
        cd.insert(64).unwrap();
        assert_eq!(cd.choice().unwrap(), 64);
        assert!(cd.insert(65).is_err());
    }
}
