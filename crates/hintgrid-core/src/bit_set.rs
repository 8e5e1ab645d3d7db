//! Fixed-capacity bit sets with semantic index domains.
//!
//! A [`BitSet`] stores membership for a contiguous range of indices. The range
//! starts at an offset fixed by its semantics type and spans a length chosen
//! at construction:
//!
//! - [`ValueSet`] - candidate values, `1..=grid_size`
//! - [`CellSet`] - cell indices, `0..cell_count`
//! - [`HouseSet`] - house region indices, `0..grid_size`
//!
//! Every accessor is checked against the domain, so a raw word index never
//! leaks through the public interface. Sets are `Copy`; mutating a copy never
//! affects the original.
//!
//! # Examples
//!
//! ```
//! use hintgrid_core::ValueSet;
//!
//! let a = ValueSet::from_bits(9, [1, 2, 3]);
//! let b = ValueSet::from_bits(9, [2, 3, 4]);
//!
//! assert_eq!((a | b).len(), 4);
//! assert_eq!((a & b).iter().collect::<Vec<_>>(), vec![2, 3]);
//! assert_eq!((a - b).as_single(), Some(1));
//! assert_eq!(ValueSet::full(9).previous(5), Some(4));
//! ```

use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    marker::PhantomData,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Range, Sub, SubAssign},
};

const WORDS: usize = 4;
const WORD_BITS: usize = u64::BITS as usize;

/// Maximum domain length of any [`BitSet`].
pub const CAPACITY: usize = WORDS * WORD_BITS;

/// Defines the index domain of a [`BitSet`].
pub trait BitSemantics {
    /// Smallest index of the domain.
    const OFFSET: usize;
    /// Human-readable element name used in panic messages.
    const NAME: &'static str;
}

/// Semantics for candidate values, which start at 1.
#[derive(Debug, Clone, Copy)]
pub struct ValueSemantics;

impl BitSemantics for ValueSemantics {
    const OFFSET: usize = 1;
    const NAME: &'static str = "value";
}

/// Semantics for cell indices, which start at 0.
#[derive(Debug, Clone, Copy)]
pub struct CellSemantics;

impl BitSemantics for CellSemantics {
    const OFFSET: usize = 0;
    const NAME: &'static str = "cell";
}

/// Semantics for house region indices, which start at 0.
#[derive(Debug, Clone, Copy)]
pub struct HouseSemantics;

impl BitSemantics for HouseSemantics {
    const OFFSET: usize = 0;
    const NAME: &'static str = "house";
}

/// A set of candidate values in `1..=grid_size`.
pub type ValueSet = BitSet<ValueSemantics>;

/// A set of cell indices in `0..cell_count`.
pub type CellSet = BitSet<CellSemantics>;

/// A set of house region indices of a single house kind, in `0..grid_size`.
pub type HouseSet = BitSet<HouseSemantics>;

/// A bit set over the domain `S::OFFSET..S::OFFSET + len`.
pub struct BitSet<S> {
    words: [u64; WORDS],
    len: u16,
    _semantics: PhantomData<fn() -> S>,
}

impl<S> Clone for BitSet<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for BitSet<S> {}

impl<S> PartialEq for BitSet<S> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.words == other.words
    }
}

impl<S> Eq for BitSet<S> {}

impl<S> Hash for BitSet<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.words.hash(state);
    }
}

impl<S: BitSemantics> BitSet<S> {
    /// Creates an empty set over a domain of `len` indices.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds [`CAPACITY`].
    #[must_use]
    pub fn new(len: usize) -> Self {
        assert!(
            len <= CAPACITY,
            "{} domain of {len} exceeds capacity {CAPACITY}",
            S::NAME
        );
        #[expect(clippy::cast_possible_truncation)]
        let len = len as u16;
        Self {
            words: [0; WORDS],
            len,
            _semantics: PhantomData,
        }
    }

    /// Creates a set containing every index of the domain.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds [`CAPACITY`].
    #[must_use]
    pub fn full(len: usize) -> Self {
        let mut set = Self::new(len);
        set.fill();
        set
    }

    /// Creates a set from the given indices.
    ///
    /// # Panics
    ///
    /// Panics if any index lies outside the domain.
    #[must_use]
    #[track_caller]
    pub fn from_bits<I>(len: usize, bits: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::new(len);
        for bit in bits {
            set.insert(bit);
        }
        set
    }

    /// Returns the number of indices in the domain.
    #[must_use]
    #[inline]
    pub fn domain_len(&self) -> usize {
        usize::from(self.len)
    }

    /// Returns the index range covered by this set.
    #[must_use]
    #[inline]
    pub fn domain(&self) -> Range<usize> {
        S::OFFSET..S::OFFSET + self.domain_len()
    }

    #[inline]
    #[track_caller]
    fn bit(&self, index: usize) -> usize {
        assert!(
            self.domain().contains(&index),
            "illegal {} {index}: outside {:?}",
            S::NAME,
            self.domain()
        );
        index - S::OFFSET
    }

    #[inline]
    #[track_caller]
    fn check_domain(&self, other: &Self) {
        assert_eq!(
            self.len,
            other.len,
            "{} sets have different domain lengths",
            S::NAME
        );
    }

    /// Adds an index, returning `true` if it was not present.
    ///
    /// # Panics
    ///
    /// Panics if `index` lies outside the domain.
    #[inline]
    #[track_caller]
    pub fn insert(&mut self, index: usize) -> bool {
        let bit = self.bit(index);
        let mask = 1 << (bit % WORD_BITS);
        let word = &mut self.words[bit / WORD_BITS];
        let inserted = *word & mask == 0;
        *word |= mask;
        inserted
    }

    /// Removes an index, returning `true` if it was present.
    ///
    /// # Panics
    ///
    /// Panics if `index` lies outside the domain.
    #[inline]
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> bool {
        let bit = self.bit(index);
        let mask = 1 << (bit % WORD_BITS);
        let word = &mut self.words[bit / WORD_BITS];
        let removed = *word & mask != 0;
        *word &= !mask;
        removed
    }

    /// Returns `true` if the set contains `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` lies outside the domain.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn contains(&self, index: usize) -> bool {
        let bit = self.bit(index);
        self.words[bit / WORD_BITS] & (1 << (bit % WORD_BITS)) != 0
    }

    /// Returns the number of indices in the set.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Removes every index.
    #[inline]
    pub fn clear(&mut self) {
        self.words = [0; WORDS];
    }

    /// Inserts every index of the domain.
    pub fn fill(&mut self) {
        let len = self.domain_len();
        for (i, word) in self.words.iter_mut().enumerate() {
            let start = i * WORD_BITS;
            *word = match len.saturating_sub(start) {
                0 => 0,
                n if n >= WORD_BITS => u64::MAX,
                n => (1 << n) - 1,
            };
        }
    }

    /// Returns the indices of the domain missing from this set.
    #[must_use]
    pub fn complement(self) -> Self {
        Self::full(self.domain_len()) - self
    }

    /// Returns the union of two sets.
    ///
    /// # Panics
    ///
    /// Panics if the domains differ.
    #[must_use]
    #[track_caller]
    pub fn union(self, other: Self) -> Self {
        self | other
    }

    /// Returns the intersection of two sets.
    ///
    /// # Panics
    ///
    /// Panics if the domains differ.
    #[must_use]
    #[track_caller]
    pub fn intersection(self, other: Self) -> Self {
        self & other
    }

    /// Returns the indices in `self` but not in `other`.
    ///
    /// # Panics
    ///
    /// Panics if the domains differ.
    #[must_use]
    #[track_caller]
    pub fn difference(self, other: Self) -> Self {
        self - other
    }

    /// Returns `true` if every index of `self` is also in `other`.
    #[must_use]
    #[track_caller]
    pub fn is_subset(self, other: Self) -> bool {
        (self - other).is_empty()
    }

    /// Returns `true` if the sets share at least one index.
    #[must_use]
    #[track_caller]
    pub fn intersects(self, other: Self) -> bool {
        !(self & other).is_empty()
    }

    /// Returns the smallest index in the set.
    #[must_use]
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.iter().next()
    }

    /// Returns the smallest index of the domain not in the set.
    #[must_use]
    #[inline]
    pub fn first_unset(&self) -> Option<usize> {
        self.iter_unset().next()
    }

    /// Returns the largest index in the set.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.previous(S::OFFSET + self.domain_len())
    }

    /// Returns the largest index in the set that is strictly smaller than `before`.
    #[must_use]
    pub fn previous(&self, before: usize) -> Option<usize> {
        let limit = before.checked_sub(S::OFFSET)?.min(self.domain_len());
        (0..WORDS).rev().find_map(|i| {
            let start = i * WORD_BITS;
            if start >= limit {
                return None;
            }
            let word = match limit - start {
                n if n >= WORD_BITS => self.words[i],
                n => self.words[i] & ((1 << n) - 1),
            };
            (word != 0)
                .then(|| start + (WORD_BITS - 1 - word.leading_zeros() as usize) + S::OFFSET)
        })
    }

    /// Returns the only index if the set has exactly one element.
    #[must_use]
    #[inline]
    pub fn as_single(&self) -> Option<usize> {
        let mut iter = self.iter();
        let first = iter.next()?;
        iter.next().is_none().then_some(first)
    }

    /// Returns the two indices if the set has exactly two elements.
    #[must_use]
    #[inline]
    pub fn as_double(&self) -> Option<(usize, usize)> {
        let mut iter = self.iter();
        let first = iter.next()?;
        let second = iter.next()?;
        iter.next().is_none().then_some((first, second))
    }

    /// Returns an ascending iterator over the indices in the set.
    #[must_use]
    #[inline]
    pub fn iter(&self) -> Iter<S> {
        self.iter_from(S::OFFSET)
    }

    /// Returns an ascending iterator over the indices in the set that are `>= start`.
    #[must_use]
    pub fn iter_from(&self, start: usize) -> Iter<S> {
        Iter {
            words: self.words,
            next: start.saturating_sub(S::OFFSET),
            end: self.domain_len(),
            _semantics: PhantomData,
        }
    }

    /// Returns an ascending iterator over the domain indices not in the set.
    #[must_use]
    #[inline]
    pub fn iter_unset(&self) -> Iter<S> {
        self.complement().iter()
    }

    /// Returns an ascending iterator over the domain indices `>= start` not in the set.
    #[must_use]
    #[inline]
    pub fn iter_unset_from(&self, start: usize) -> Iter<S> {
        self.complement().iter_from(start)
    }
}

impl<S: BitSemantics> BitOr for BitSet<S> {
    type Output = Self;

    #[track_caller]
    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl<S: BitSemantics> BitOrAssign for BitSet<S> {
    #[track_caller]
    fn bitor_assign(&mut self, rhs: Self) {
        self.check_domain(&rhs);
        for (a, b) in self.words.iter_mut().zip(rhs.words) {
            *a |= b;
        }
    }
}

impl<S: BitSemantics> BitAnd for BitSet<S> {
    type Output = Self;

    #[track_caller]
    fn bitand(mut self, rhs: Self) -> Self::Output {
        self &= rhs;
        self
    }
}

impl<S: BitSemantics> BitAndAssign for BitSet<S> {
    #[track_caller]
    fn bitand_assign(&mut self, rhs: Self) {
        self.check_domain(&rhs);
        for (a, b) in self.words.iter_mut().zip(rhs.words) {
            *a &= b;
        }
    }
}

impl<S: BitSemantics> Sub for BitSet<S> {
    type Output = Self;

    #[track_caller]
    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<S: BitSemantics> SubAssign for BitSet<S> {
    #[track_caller]
    fn sub_assign(&mut self, rhs: Self) {
        self.check_domain(&rhs);
        for (a, b) in self.words.iter_mut().zip(rhs.words) {
            *a &= !b;
        }
    }
}

impl<S: BitSemantics> fmt::Debug for BitSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<S: BitSemantics> fmt::Display for BitSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, bit) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{bit}")?;
        }
        f.write_str("}")
    }
}

impl<S: BitSemantics> IntoIterator for BitSet<S> {
    type Item = usize;
    type IntoIter = Iter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: BitSemantics> IntoIterator for &BitSet<S> {
    type Item = usize;
    type IntoIter = Iter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the indices of a [`BitSet`].
///
/// The iterator owns a snapshot of the bits, so the set may be mutated while
/// iterating over a previous state of it.
#[derive(Debug, Clone)]
pub struct Iter<S> {
    words: [u64; WORDS],
    next: usize,
    end: usize,
    _semantics: PhantomData<fn() -> S>,
}

impl<S: BitSemantics> Iterator for Iter<S> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.end {
            let word = self.next / WORD_BITS;
            let bits = self.words[word] >> (self.next % WORD_BITS);
            if bits == 0 {
                self.next = (word + 1) * WORD_BITS;
                continue;
            }
            let bit = self.next + bits.trailing_zeros() as usize;
            if bit >= self.end {
                break;
            }
            self.next = bit + 1;
            return Some(bit + S::OFFSET);
        }
        self.next = self.end;
        None
    }
}

impl<S: BitSemantics> FusedIterator for Iter<S> {}
