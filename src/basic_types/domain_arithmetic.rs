//! Interval arithmetic over [`Domain`]s.
//!
//! All operations reason over interval bounds only and clamp every produced
//! bound into `[INF, SUP]`. Multiplication and division are deliberately not
//! domain-consistent; bounds reasoning is sufficient for the propagators built
//! on top of them.

use itertools::Itertools;

use crate::basic_types::domain::Domain;
use crate::basic_types::domain::Interval;
use crate::basic_types::domain::SUP;

impl Domain {
    /// The pairwise sums of `self` and `other`.
    pub fn add(&self, other: &Domain) -> Domain {
        if self.is_empty() || other.is_empty() {
            return Domain::empty();
        }
        let (a, b) = close_gaps(self, other);
        let intervals = a
            .intervals()
            .iter()
            .cartesian_product(b.intervals().iter())
            .map(|(x, y)| Interval::new((x.lo + y.lo).min(SUP), (x.hi + y.hi).min(SUP)))
            .collect();
        Domain::from_raw(intervals)
    }

    /// The pairwise differences of `self` and `other`, clamped at zero.
    /// Interval pairs which cannot produce a non-negative difference are
    /// skipped.
    pub fn subtract(&self, other: &Domain) -> Domain {
        if self.is_empty() || other.is_empty() {
            return Domain::empty();
        }
        let (a, b) = close_gaps(self, other);
        let intervals = a
            .intervals()
            .iter()
            .cartesian_product(b.intervals().iter())
            .filter(|(x, y)| x.hi >= y.lo)
            .map(|(x, y)| Interval::new(x.lo.saturating_sub(y.hi), x.hi - y.lo))
            .collect();
        Domain::from_raw(intervals)
    }

    /// The pairwise products of `self` and `other`, by bounds only.
    pub fn multiply(&self, other: &Domain) -> Domain {
        let intervals = self
            .intervals()
            .iter()
            .cartesian_product(other.intervals().iter())
            .map(|(x, y)| Interval::new((x.lo * y.lo).min(SUP), (x.hi * y.hi).min(SUP)))
            .collect();
        Domain::from_raw(intervals)
    }

    /// The pairwise quotients of `self` and `other`, by bounds only.
    ///
    /// Divisor intervals whose upper bound is zero contribute nothing. A
    /// divisor interval containing zero yields an open-ended quotient capped
    /// at `SUP`.
    pub fn divide_by(&self, other: &Domain) -> Domain {
        let intervals = self
            .intervals()
            .iter()
            .cartesian_product(other.intervals().iter())
            .filter(|(_, y)| y.hi > 0)
            .map(|(x, y)| {
                let hi = if y.lo == 0 { SUP } else { x.hi / y.lo };
                Interval::new(x.lo / y.hi, hi)
            })
            .collect();
        Domain::from_raw(intervals)
    }
}

/// Pre-simplification for [`Domain::add`] and [`Domain::subtract`]: merges
/// interval gaps which the other operand's extent would bridge anyway.
///
/// A gap of `g` missing values between two intervals of one operand vanishes
/// in the sum whenever the other operand has an interval of width `> g`, so
/// merging such gaps up front preserves the result while capping the size of
/// the cartesian product.
fn close_gaps(a: &Domain, b: &Domain) -> (Domain, Domain) {
    let mut a = a.clone();
    let mut b = b.clone();
    loop {
        let merged_a = merge_gaps_below(&a, min_width(&b));
        let merged_b = merge_gaps_below(&b, min_width(&merged_a));
        let stable = merged_a.intervals().len() == a.intervals().len()
            && merged_b.intervals().len() == b.intervals().len();
        a = merged_a;
        b = merged_b;
        if stable {
            return (a, b);
        }
    }
}

/// Merges adjacent intervals separated by fewer than `width` missing values.
fn merge_gaps_below(domain: &Domain, width: u64) -> Domain {
    let mut result: Vec<Interval> = Vec::with_capacity(domain.intervals().len());
    for &interval in domain.intervals() {
        match result.last_mut() {
            Some(last) if interval.lo - last.hi - 1 < width => last.hi = interval.hi,
            _ => result.push(interval),
        }
    }
    Domain::from_raw(result)
}

fn min_width(domain: &Domain) -> u64 {
    domain
        .intervals()
        .iter()
        .map(Interval::width)
        .min()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(intervals: &[(u64, u64)]) -> Domain {
        Domain::from_intervals(intervals.iter().copied())
    }

    #[test]
    fn add_single_intervals() {
        assert_eq!(domain(&[(1, 2)]).add(&domain(&[(10, 20)])), domain(&[(11, 22)]));
    }

    #[test]
    fn add_covers_exactly_the_pairwise_sums() {
        let a = domain(&[(0, 1), (10, 10)]);
        let b = domain(&[(0, 0), (100, 100)]);
        assert_eq!(
            a.add(&b),
            domain(&[(0, 1), (10, 10), (100, 101), (110, 110)])
        );
    }

    #[test]
    fn add_clamps_to_sup() {
        let near_top = domain(&[(SUP - 1, SUP)]);
        assert_eq!(near_top.add(&domain(&[(5, 5)])), domain(&[(SUP, SUP)]));
    }

    #[test]
    fn add_with_empty_is_empty() {
        assert!(domain(&[(1, 5)]).add(&Domain::empty()).is_empty());
    }

    #[test]
    fn subtract_clamps_at_zero() {
        assert_eq!(domain(&[(3, 5)]).subtract(&domain(&[(4, 10)])), domain(&[(0, 1)]));
    }

    #[test]
    fn subtract_skips_impossible_pairs() {
        // 3 - [10, 20] has no non-negative outcome.
        assert!(domain(&[(3, 3)]).subtract(&domain(&[(10, 20)])).is_empty());
        // Only the first divisor interval applies.
        assert_eq!(
            domain(&[(5, 5)]).subtract(&domain(&[(2, 2), (9, 9)])),
            domain(&[(3, 3)])
        );
    }

    #[test]
    fn multiply_uses_bounds() {
        assert_eq!(domain(&[(2, 3)]).multiply(&domain(&[(4, 5)])), domain(&[(8, 15)]));
        assert_eq!(
            domain(&[(0, 2)]).multiply(&domain(&[(10, 10)])),
            domain(&[(0, 20)])
        );
    }

    #[test]
    fn multiply_clamps_to_sup() {
        let big = domain(&[(SUP / 2, SUP)]);
        assert_eq!(big.multiply(&domain(&[(3, 3)])), domain(&[(SUP, SUP)]));
    }

    #[test]
    fn divide_by_positive_interval() {
        assert_eq!(domain(&[(10, 21)]).divide_by(&domain(&[(2, 5)])), domain(&[(2, 10)]));
    }

    #[test]
    fn divide_by_interval_containing_zero_is_open_ended() {
        let quotient = domain(&[(10, 20)]).divide_by(&domain(&[(0, 5)]));
        assert_eq!(quotient, domain(&[(2, SUP)]));
    }

    #[test]
    fn divide_by_zero_only_is_empty() {
        assert!(domain(&[(10, 20)]).divide_by(&domain(&[(0, 0)])).is_empty());
    }

    #[test]
    fn close_gaps_merges_bridgeable_holes() {
        // The gap 3..=4 (2 missing values) is bridged by an operand of width 3.
        let fragmented = domain(&[(0, 2), (5, 7)]);
        let wide = domain(&[(0, 2)]);
        let (merged, _) = close_gaps(&fragmented, &wide);
        assert_eq!(merged, domain(&[(0, 7)]));
        // The sum is identical either way.
        assert_eq!(fragmented.add(&wide), domain(&[(0, 9)]));
    }

    #[test]
    fn close_gaps_keeps_unbridgeable_holes() {
        let fragmented = domain(&[(0, 0), (9, 9)]);
        let narrow = domain(&[(0, 0)]);
        let (merged, _) = close_gaps(&fragmented, &narrow);
        assert_eq!(merged, fragmented);
        assert_eq!(fragmented.add(&narrow), fragmented);
    }
}
