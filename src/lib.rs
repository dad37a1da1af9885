//! # Choice Dictionaries
//!
//! *A dynamic subset of `[0, n)` that can hand you one of its members in $O(1)$.*
//!
//! ## Intuition First
//!
//! Imagine a warehouse with a million numbered shelves, of which only a few
//! dozen hold anything. A bit per shelf answers "is shelf 71 occupied?"
//! instantly, but "give me *any* occupied shelf" means walking the aisles.
//!
//! A choice dictionary keeps a clipboard at the door listing which *aisles*
//! currently have something on them. To pick an occupied shelf, read the top
//! line of the clipboard, walk to that aisle, and look at the one summary
//! sign that says which racks are non-empty. Three lookups, no walking.
//!
//! ## The Problem
//!
//! A plain bit vector gives:
//! - `insert`/`remove`/`contains` in $O(1)$,
//! - `choice` (return some member) in $O(n / w)$ because it must scan.
//!
//! Keeping an explicit list of members fixes `choice` but costs
//! $O(n \log n)$ bits. A choice dictionary stays at $n + O(n / w)$ bits
//! and makes every operation $O(1)$ worst case.
//!
//! ## Historical Context
//!
//! ```text
//! 1974  Aho-Hopcroft-Ullman  Using uninitialized memory via forward/back pointers
//! 1993  Briggs-Torczon       Sparse sets: dense array + sparse index, O(1) clear
//! 2015  Elmasry et al.       Space-efficient DFS/BFS; choice dictionaries as worklists
//! 2016  Hagerup-Kammer       Succinct choice dictionaries
//! ```
//!
//! The trick shared by all of these: a region of memory is trusted only if a
//! forward link from it and a back link into it agree. Anything else is
//! garbage by definition, so nothing ever has to be cleared.
//!
//! ## Mathematical Formulation
//!
//! For universe size $n$ and word width $w = 64$:
//! - **Primary**: $\lceil n / w \rceil$ words, one bit per element.
//! - **Secondary**: $\lceil n / w^2 \rceil$ tuples `[liveness, link]`.
//!   Bit $j$ of `liveness` of group $g$ marks primary word $g w + j$ non-zero.
//! - **Validator**: stack of $\lceil n / w^2 \rceil$ slots; slots below the
//!   pointer name the live groups.
//!
//! Group $g$ is live iff $link_g < p$ and $validator[link_g] = g$.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(1)$ worst case for `insert`, `remove`, `contains`,
//!   `choice` and `clear`; iteration is $O(k + \text{live groups})$.
//! - **Space**: $n + O(n / w)$ bits.
//!
//! ## What Could Go Wrong
//!
//! 1. **Stale links**: a group's link may point at a slot that has since been
//!    reused by another group. The back-link check rejects it; skipping that
//!    check resurrects deleted elements.
//! 2. **Swap-remove bookkeeping**: when the last stack slot is moved into a
//!    freed one, the moved group's link must be rewritten, or it silently
//!    becomes dead.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **`ChoiceDictionary`**: the three-layer structure with $O(1)$ `choice`.
//! - **`ImplicitChoiceDictionary`**: plain bit array baseline with linear `choice`.
//!
//! ## References
//!
//! - Briggs, P., & Torczon, L. (1993). "An efficient representation for sparse sets."
//! - Elmasry, A., Hagerup, T., & Kammer, F. (2015). "Space-efficient basic graph algorithms."
//! - Hagerup, T., & Kammer, F. (2016). "Succinct choice dictionaries."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod choice;
pub mod error;
pub mod implicit;
pub mod iter;
mod validator;
pub mod word;

pub use choice::ChoiceDictionary;
pub use error::{Error, Result};
pub use implicit::ImplicitChoiceDictionary;
pub use iter::{Drain, Iter};
pub use word::WORD_BITS;
