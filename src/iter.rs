//! Iterators over a [`ChoiceDictionary`].

use std::iter::FusedIterator;

use crate::choice::ChoiceDictionary;
use crate::word::{first_set, mask, BitAddr, WORD_BITS};

/// Non-destructive iterator over present elements.
///
/// Walks validator slots, then the set bits of each liveness word, then the
/// set bits of each primary word. Never visits a dead group or word.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    dict: &'a ChoiceDictionary,
    next_slot: usize,
    group: usize,
    group_bits: u64,
    word: usize,
    word_bits: u64,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(dict: &'a ChoiceDictionary) -> Self {
        Self {
            dict,
            next_slot: 0,
            group: 0,
            group_bits: 0,
            word: 0,
            word_bits: 0,
            remaining: dict.len(),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.word_bits != 0 {
                let offset = first_set(self.word_bits);
                self.word_bits &= !mask(offset);
                self.remaining -= 1;
                return Some(BitAddr { word: self.word, offset }.index());
            }
            if self.group_bits != 0 {
                let j = first_set(self.group_bits);
                self.group_bits &= !mask(j);
                self.word = self.group * WORD_BITS + j;
                self.word_bits = self.dict.primary_word(self.word);
                continue;
            }
            let validator = self.dict.validator();
            if self.next_slot >= validator.len() {
                return None;
            }
            self.group = validator.get(self.next_slot);
            self.next_slot += 1;
            self.group_bits = self.dict.liveness(self.group);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Draining iterator returned by [`ChoiceDictionary::drain`].
///
/// Each step is one `choice` followed by one `remove`, so draining `k`
/// elements costs $O(k)$ regardless of the universe size.
#[derive(Debug)]
pub struct Drain<'a> {
    dict: &'a mut ChoiceDictionary,
}

impl<'a> Drain<'a> {
    pub(crate) fn new(dict: &'a mut ChoiceDictionary) -> Self {
        Self { dict }
    }
}

impl Iterator for Drain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let x = self.dict.choice().ok()?;
        self.dict.remove(x).ok()?;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.dict.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Drain<'_> {}
impl FusedIterator for Drain<'_> {}

impl Drop for Drain<'_> {
    fn drop(&mut self) {
        self.dict.clear();
    }
}
