//! Immutable finite integer domains backed by a packed bitset.
//!
//! Values range over `1..=max_value`; zero and negative values are handled
//! by callers via a fixed offset transform (see `fd::constraints`'s
//! `OffsetView`), so the bitset universe itself is always 1-indexed and
//! positive, matching the representation the finite-domain propagators
//! assume.

use std::fmt;

const WORD_BITS: usize = 64;

/// A finite, immutable subset of `{1..=max_value}`.
///
/// All mutating-looking operations return a new `Domain`; `Domain` never
/// panics on disjoint/empty intermediate results — callers detect
/// infeasibility by checking `is_empty()`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Domain {
    words: Vec<u64>,
    max_value: i64,
}

impl Domain {
    /// The full domain `{1..=max_value}`.
    pub fn full(max_value: i64) -> Domain {
        assert!(max_value >= 0, "domain max_value must be non-negative");
        let mut d = Domain {
            words: vec![0u64; Self::word_count(max_value)],
            max_value,
        };
        for v in 1..=max_value {
            d.set_bit(v, true);
        }
        d
    }

    /// The empty domain over the same universe size.
    pub fn empty(max_value: i64) -> Domain {
        Domain {
            words: vec![0u64; Self::word_count(max_value)],
            max_value,
        }
    }

    /// A singleton domain `{value}` over `1..=max_value`.
    pub fn singleton(value: i64, max_value: i64) -> Domain {
        let mut d = Domain::empty(max_value);
        d.set_bit(value, true);
        d
    }

    /// Build a domain from an explicit list of values.
    pub fn from_values<I: IntoIterator<Item = i64>>(values: I, max_value: i64) -> Domain {
        let mut d = Domain::empty(max_value);
        for v in values {
            d.set_bit(v, true);
        }
        d
    }

    /// Build a domain from an inclusive range, clamped to `1..=max_value`.
    pub fn from_range(lo: i64, hi: i64, max_value: i64) -> Domain {
        let mut d = Domain::empty(max_value);
        let lo = lo.max(1);
        let hi = hi.min(max_value);
        let mut v = lo;
        while v <= hi {
            d.set_bit(v, true);
            v += 1;
        }
        d
    }

    pub fn max_value(&self) -> i64 {
        self.max_value
    }

    fn word_count(max_value: i64) -> usize {
        let bits = max_value.max(0) as usize;
        (bits + WORD_BITS - 1) / WORD_BITS
    }

    fn in_range(&self, value: i64) -> bool {
        value >= 1 && value <= self.max_value
    }

    fn set_bit(&mut self, value: i64, on: bool) {
        if !self.in_range(value) {
            return;
        }
        let idx = (value - 1) as usize;
        let word = idx / WORD_BITS;
        let bit = idx % WORD_BITS;
        if on {
            self.words[word] |= 1u64 << bit;
        } else {
            self.words[word] &= !(1u64 << bit);
        }
    }

    pub fn has(&self, value: i64) -> bool {
        if !self.in_range(value) {
            return false;
        }
        let idx = (value - 1) as usize;
        let word = idx / WORD_BITS;
        let bit = idx % WORD_BITS;
        (self.words[word] >> bit) & 1 == 1
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn count(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    pub fn is_singleton(&self) -> bool {
        self.count() == 1
    }

    pub fn singleton_value(&self) -> Option<i64> {
        if self.is_singleton() {
            self.min()
        } else {
            None
        }
    }

    pub fn min(&self) -> Option<i64> {
        for (i, w) in self.words.iter().enumerate() {
            if *w != 0 {
                let bit = w.trailing_zeros() as usize;
                return Some((i * WORD_BITS + bit + 1) as i64);
            }
        }
        None
    }

    pub fn max(&self) -> Option<i64> {
        for (i, w) in self.words.iter().enumerate().rev() {
            if *w != 0 {
                let bit = 63 - w.leading_zeros() as usize;
                return Some((i * WORD_BITS + bit + 1) as i64);
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        (1..=self.max_value).filter(move |v| self.has(*v))
    }

    /// Remove a single value, returning a new domain.
    pub fn remove(&self, value: i64) -> Domain {
        let mut d = self.clone();
        d.set_bit(value, false);
        d
    }

    /// Remove all values strictly below `k`.
    pub fn remove_below(&self, k: i64) -> Domain {
        let mut d = self.clone();
        let mut v = 1;
        while v < k && v <= d.max_value {
            d.set_bit(v, false);
            v += 1;
        }
        d
    }

    /// Remove all values strictly above `k`.
    pub fn remove_above(&self, k: i64) -> Domain {
        let mut d = self.clone();
        let mut v = k + 1;
        while v <= d.max_value {
            d.set_bit(v, false);
            v += 1;
        }
        d
    }

    fn binop(&self, other: &Domain, f: impl Fn(u64, u64) -> u64) -> Domain {
        assert_eq!(
            self.max_value, other.max_value,
            "domain operations require matching universes"
        );
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| f(*a, *b))
            .collect();
        Domain {
            words,
            max_value: self.max_value,
        }
    }

    pub fn intersect(&self, other: &Domain) -> Domain {
        self.binop(other, |a, b| a & b)
    }

    pub fn union(&self, other: &Domain) -> Domain {
        self.binop(other, |a, b| a | b)
    }

    pub fn difference(&self, other: &Domain) -> Domain {
        self.binop(other, |a, b| a & !b)
    }

    pub fn complement(&self) -> Domain {
        let full = Domain::full(self.max_value);
        full.difference(self)
    }

    pub fn is_disjoint(&self, other: &Domain) -> bool {
        self.intersect(other).is_empty()
    }

    pub fn is_subset(&self, other: &Domain) -> bool {
        self.difference(other).is_empty()
    }

    pub fn equal(&self, other: &Domain) -> bool {
        self.max_value == other.max_value && self.words == other.words
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain")?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<i64> = self.iter().collect();
        if values.is_empty() {
            return write!(f, "{{}}");
        }
        // Dense run detection: print a single range when the whole domain
        // is contiguous, otherwise an explicit set.
        let lo = values[0];
        let hi = *values.last().unwrap();
        if values.len() as i64 == hi - lo + 1 {
            write!(f, "{{{}..{}}}", lo, hi)
        } else {
            let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            write!(f, "{{{}}}", parts.join(","))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_and_empty() {
        let full = Domain::full(5);
        assert_eq!(full.count(), 5);
        assert!(!full.is_empty());
        let empty = Domain::empty(5);
        assert!(empty.is_empty());
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn singleton() {
        let d = Domain::singleton(3, 5);
        assert!(d.is_singleton());
        assert_eq!(d.singleton_value(), Some(3));
        assert!(d.has(3));
        assert!(!d.has(2));
    }

    #[test]
    fn intersect_union_commute() {
        let a = Domain::from_values([1, 2, 3], 5);
        let b = Domain::from_values([2, 3, 4], 5);
        assert!(a.intersect(&b).equal(&b.intersect(&a)));
        assert!(a.union(&b).equal(&b.union(&a)));
    }

    #[test]
    fn absorption_and_difference() {
        let a = Domain::from_values([1, 2, 3], 5);
        let b = Domain::from_values([2, 3, 4], 5);
        assert!(a.union(&a.intersect(&b)).equal(&a));
        assert!(a.difference(&b).intersect(&b).is_empty());
    }

    #[test]
    fn inclusion_exclusion() {
        let a = Domain::from_values([1, 2, 3], 8);
        let b = Domain::from_values([3, 4, 5, 6], 8);
        let union_count = a.union(&b).count();
        let inter_count = a.intersect(&b).count();
        assert_eq!(union_count, a.count() + b.count() - inter_count);
    }

    #[test]
    fn remove_below_above() {
        let d = Domain::full(10);
        let d = d.remove_below(4).remove_above(7);
        assert_eq!(d.min(), Some(4));
        assert_eq!(d.max(), Some(7));
        assert_eq!(d.count(), 4);
    }

    #[test]
    fn bitset_crosses_word_boundary() {
        let d = Domain::full(130);
        assert_eq!(d.count(), 130);
        assert_eq!(d.max(), Some(130));
        let d = d.remove(64).remove(65).remove(128);
        assert!(!d.has(64));
        assert!(!d.has(65));
        assert!(!d.has(128));
        assert_eq!(d.count(), 127);
    }

    #[test]
    fn display_dense_vs_sparse() {
        let dense = Domain::from_range(2, 5, 10);
        assert_eq!(format!("{}", dense), "{2..5}");
        let sparse = Domain::from_values([1, 3, 5], 10);
        assert_eq!(format!("{}", sparse), "{1,3,5}");
    }
}
