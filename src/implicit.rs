//! Implicit choice dictionary: a plain bit array with no auxiliary index.
//!
//! Uses exactly `n` bits (rounded up to a word) and serves as the baseline for
//! [`ChoiceDictionary`](crate::ChoiceDictionary): membership is still $O(1)$,
//! but `choice` has to scan for a non-zero word, costing $O(n / 64)$ in the
//! worst case.

use crate::error::{Error, Result};
use crate::word::{first_set, BitAddr, WORD_BITS};

/// A flat bit-array set with linear-time `choice`.
#[derive(Debug, Clone, Default)]
pub struct ImplicitChoiceDictionary {
    data: Vec<u64>,
    universe: usize,
    len: usize,
}

impl ImplicitChoiceDictionary {
    /// Create an empty set over `[0, universe)`.
    pub fn new(universe: usize) -> Self {
        Self {
            data: vec![0; universe.div_ceil(WORD_BITS)],
            universe,
            len: 0,
        }
    }

    /// Size of the universe.
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Number of elements present. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if no element is present.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add `index`. O(1).
    pub fn insert(&mut self, index: usize) -> Result<bool> {
        let addr = self.addr(index)?;
        let word = &mut self.data[addr.word];
        let was = *word & addr.mask() != 0;
        *word |= addr.mask();
        if !was {
            self.len += 1;
        }
        Ok(!was)
    }

    /// Remove `index`. O(1). Fails with [`Error::Empty`] when nothing is present.
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        let addr = self.addr(index)?;
        if self.len == 0 {
            return Err(Error::Empty);
        }
        let word = &mut self.data[addr.word];
        let was = *word & addr.mask() != 0;
        *word &= !addr.mask();
        if was {
            self.len -= 1;
        }
        Ok(was)
    }

    /// Return true if `index` is present. O(1).
    pub fn contains(&self, index: usize) -> Result<bool> {
        let addr = self.addr(index)?;
        Ok(self.data[addr.word] & addr.mask() != 0)
    }

    /// Linear-time choice: the smallest present element. O(n / 64).
    pub fn choice(&self) -> Result<usize> {
        self.data
            .iter()
            .enumerate()
            .find(|&(_, &w)| w != 0)
            .map(|(word, &w)| {
                BitAddr {
                    word,
                    offset: first_set(w),
                }
                .index()
            })
            .ok_or(Error::Empty)
    }

    /// Remove every element. O(n / 64).
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.len = 0;
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_basic() {
        let mut set = ImplicitChoiceDictionary::new(100);
        assert_eq!(set.choice(), Err(Error::Empty));
        set.insert(99).unwrap();
        set.insert(5).unwrap();
        assert_eq!(set.choice().unwrap(), 5);
        assert!(set.contains(99).unwrap());
        assert!(set.remove(5).unwrap());
        assert_eq!(set.choice().unwrap(), 99);
        assert_eq!(set.len(), 1);
        assert!(set.insert(100).is_err());
    }
}
