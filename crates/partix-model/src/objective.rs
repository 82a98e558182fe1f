// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Objectives
//!
//! An objective ranks vectors of bin sums: smaller keys are better. The
//! searches use it twice, to rank complete partitions and to prune partial
//! ones through an admissible lower bound on every completion.
//!
//! Objectives whose natural value is fractional are expressed as exact,
//! order-preserving integer keys, so that every comparison stays in the value
//! type of the instance:
//!
//! - [`MinimizeDistanceFromAverage`] reports `n` times the total distance of
//!   the bins above the average.
//! - [`MaximizeSmallestWeightedSum`] reports `-min(s_i * L / w_i)` with `L`
//!   the least common multiple of the weights.
//!
//! ```rust
//! use partix_model::objective::{MaximizeSmallestSum, MinimizeLargestSum, Objective};
//!
//! let sums = [10i64, 20, 30, 40, 50];
//! assert_eq!(MinimizeLargestSum.value_to_minimize(&sums, true), 50);
//! assert_eq!(MinimizeLargestSum.lower_bound(&sums, 200, true), 70);
//! assert_eq!(MaximizeSmallestSum.lower_bound(&sums, 45, true), -35);
//! ```

use partix_core::num::{SolverNumeric, count_as};
use smallvec::SmallVec;

/// A total preorder over bin sum vectors.
///
/// `ascending` tells the implementation that `sums` is already sorted
/// ascending, so extremal sums can be read in constant time. Implementations
/// must give the same answer for every permutation of `sums` unless they
/// report `is_symmetric() == false`.
pub trait Objective<T>: Send + Sync
where
    T: SolverNumeric,
{
    /// Returns the name of this objective for logging.
    fn name(&self) -> &str;

    /// Returns the key of a complete assignment; smaller is better.
    fn value_to_minimize(&self, sums: &[T], ascending: bool) -> T;

    /// Returns a key no completion of `sums` can beat, once `remaining` more
    /// value has been distributed over the bins.
    ///
    /// The default never prunes.
    #[inline]
    fn lower_bound(&self, sums: &[T], remaining: T, ascending: bool) -> T {
        let _ = (sums, remaining, ascending);
        T::min_value()
    }

    /// Whether the key is a function of the largest sum alone.
    ///
    /// Enables the largest-sum completion of the branch-and-bound search.
    #[inline]
    fn depends_only_on_largest_sum(&self) -> bool {
        false
    }

    /// Whether bins are interchangeable under this objective.
    ///
    /// When `false`, the searches keep bins in their positions and skip every
    /// form of symmetry breaking.
    #[inline]
    fn is_symmetric(&self) -> bool {
        true
    }

    /// The number of bins the objective was built for, if it is tied to one.
    #[inline]
    fn expected_num_bins(&self) -> Option<usize> {
        None
    }

    /// Checks that every key and bound over `num_bins` bins holding `total`
    /// in all is representable in `T`.
    ///
    /// The default only requires the bin count itself to fit.
    #[inline]
    fn check_range(&self, num_bins: usize, total: T) -> Result<(), ObjectiveError<T>> {
        let _ = total;
        bin_count::<T>(num_bins).map(|_| ())
    }
}

#[inline]
fn bin_count<T: SolverNumeric>(num_bins: usize) -> Result<T, ObjectiveError<T>> {
    T::from_usize(num_bins).ok_or(ObjectiveError::BinCountOverflow { num_bins })
}

/// Fails unless `total * factor` fits into `T`.
#[inline]
fn check_scaled<T: SolverNumeric>(
    num_bins: usize,
    total: T,
    factor: T,
) -> Result<(), ObjectiveError<T>> {
    match total.checked_mul_val(factor) {
        Some(_) => Ok(()),
        None => Err(ObjectiveError::KeyOverflow { num_bins, total }),
    }
}

#[inline]
fn with_ascending<T, R>(sums: &[T], ascending: bool, f: impl FnOnce(&[T]) -> R) -> R
where
    T: SolverNumeric,
{
    if ascending {
        f(sums)
    } else {
        let mut sorted: SmallVec<[T; 16]> = SmallVec::from_slice(sums);
        sorted.sort_unstable();
        f(&sorted)
    }
}

#[inline]
fn largest<T: SolverNumeric>(sums: &[T], ascending: bool) -> T {
    if ascending {
        sums.last().copied().unwrap_or(T::ZERO)
    } else {
        sums.iter().copied().max().unwrap_or(T::ZERO)
    }
}

#[inline]
fn smallest<T: SolverNumeric>(sums: &[T], ascending: bool) -> T {
    if ascending {
        sums.first().copied().unwrap_or(T::ZERO)
    } else {
        sums.iter().copied().min().unwrap_or(T::ZERO)
    }
}

#[inline]
fn total<T: SolverNumeric>(sums: &[T]) -> T {
    sums.iter()
        .fold(T::ZERO, |acc, &s| acc.saturating_add_val(s))
}

/// Ceiling division for non-negative operands.
#[inline]
fn div_ceil<T: SolverNumeric>(numerator: T, denominator: T) -> T {
    let quotient = numerator / denominator;
    if numerator % denominator == T::ZERO {
        quotient
    } else {
        quotient + T::PLUS_ONE
    }
}

/// Minimizes the largest bin sum (makespan).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimizeLargestSum;

impl<T> Objective<T> for MinimizeLargestSum
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MinimizeLargestSum"
    }

    #[inline]
    fn value_to_minimize(&self, sums: &[T], ascending: bool) -> T {
        largest(sums, ascending)
    }

    /// The largest sum never decreases, and some bin ends up at or above the
    /// rounded-up average.
    #[inline]
    fn lower_bound(&self, sums: &[T], remaining: T, ascending: bool) -> T {
        if sums.is_empty() {
            return T::ZERO;
        }
        let all = total(sums).saturating_add_val(remaining);
        let average = div_ceil(all, count_as(sums.len()));
        largest(sums, ascending).max(average)
    }

    #[inline]
    fn depends_only_on_largest_sum(&self) -> bool {
        true
    }
}

/// Maximizes the smallest bin sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaximizeSmallestSum;

impl MaximizeSmallestSum {
    /// Pours `remaining` into the `i` smallest bins until the next bin is
    /// already at least as full as their common level.
    fn bound_sorted<T: SolverNumeric>(sorted: &[T], remaining: T) -> T {
        let n = sorted.len();
        if n == 0 {
            return T::ZERO;
        }
        let mut level = remaining.saturating_add_val(sorted[0]);
        for (i, &next) in sorted.iter().enumerate().skip(1) {
            let count: T = count_as(i);
            if level <= next.saturating_mul_val(count) {
                return -(level / count);
            }
            level = level.saturating_add_val(next);
        }
        -(level / count_as(n))
    }
}

impl<T> Objective<T> for MaximizeSmallestSum
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MaximizeSmallestSum"
    }

    #[inline]
    fn value_to_minimize(&self, sums: &[T], ascending: bool) -> T {
        -smallest(sums, ascending)
    }

    fn lower_bound(&self, sums: &[T], remaining: T, ascending: bool) -> T {
        with_ascending(sums, ascending, |sorted| Self::bound_sorted(sorted, remaining))
    }
}

/// Minimizes the difference between the largest and the smallest sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimizeDifference;

impl<T> Objective<T> for MinimizeDifference
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MinimizeDifference"
    }

    #[inline]
    fn value_to_minimize(&self, sums: &[T], ascending: bool) -> T {
        largest(sums, ascending) - smallest(sums, ascending)
    }

    fn lower_bound(&self, sums: &[T], remaining: T, ascending: bool) -> T {
        with_ascending(sums, ascending, |sorted| {
            let low = MinimizeLargestSum.lower_bound(sorted, remaining, true);
            let high = MaximizeSmallestSum::bound_sorted(sorted, remaining);
            low.saturating_add_val(high)
        })
    }
}

/// Minimizes the total distance of the bin sums from their average.
///
/// The key is `sum(n * s - total)` over the bins with `n * s > total`, which
/// is `n` times the real-valued distance of the bins above the average (the
/// bins below the average are exactly as far away in total).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimizeDistanceFromAverage;

impl<T> Objective<T> for MinimizeDistanceFromAverage
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MinimizeDistanceFromAverage"
    }

    fn value_to_minimize(&self, sums: &[T], _ascending: bool) -> T {
        let n: T = count_as(sums.len());
        let all = total(sums);
        sums.iter().fold(T::ZERO, |acc, &s| {
            let scaled = s.saturating_mul_val(n);
            if scaled > all {
                acc.saturating_add_val(scaled - all)
            } else {
                acc
            }
        })
    }

    /// Remaining value first fills the bins below the final average; what is
    /// left over cannot be split evenly and costs `r mod n`.
    fn lower_bound(&self, sums: &[T], remaining: T, _ascending: bool) -> T {
        if sums.is_empty() {
            return T::ZERO;
        }
        let n: T = count_as(sums.len());
        let all = total(sums).saturating_add_val(remaining);
        let mut left = remaining;
        let mut above = T::ZERO;
        for &s in sums {
            let scaled = s.saturating_mul_val(n);
            if scaled < all && left > T::ZERO {
                left = left - left.min((all - scaled) / n);
            }
            if scaled > all {
                above = above.saturating_add_val(scaled - all);
            }
        }
        above.saturating_add_val(left % n)
    }

    /// Keys scale every sum by the bin count.
    fn check_range(&self, num_bins: usize, total: T) -> Result<(), ObjectiveError<T>> {
        let n = bin_count(num_bins)?;
        check_scaled(num_bins, total, n)
    }
}

/// Maximizes the total of the `k` smallest sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaximizeKSmallestSums {
    k: usize,
}

impl MaximizeKSmallestSums {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }
}

impl<T> Objective<T> for MaximizeKSmallestSums
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MaximizeKSmallestSums"
    }

    fn value_to_minimize(&self, sums: &[T], ascending: bool) -> T {
        with_ascending(sums, ascending, |sorted| {
            -total(&sorted[..self.k.min(sorted.len())])
        })
    }
}

/// Minimizes the total of the `k` largest sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimizeKLargestSums {
    k: usize,
}

impl MinimizeKLargestSums {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }
}

impl<T> Objective<T> for MinimizeKLargestSums
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MinimizeKLargestSums"
    }

    fn value_to_minimize(&self, sums: &[T], ascending: bool) -> T {
        with_ascending(sums, ascending, |sorted| {
            let start = sorted.len() - self.k.min(sorted.len());
            total(&sorted[start..])
        })
    }
}

/// The error type for objective construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveError<T> {
    /// A weight is zero or negative.
    NonPositiveWeight { index: usize, weight: T },
    /// The least common multiple of the weights overflows the value type.
    WeightOverflow,
    /// No weights were given.
    NoWeights,
    /// The bin count does not fit into the value type.
    BinCountOverflow { num_bins: usize },
    /// Scaled keys for `total` over `num_bins` bins overflow the value type.
    KeyOverflow { num_bins: usize, total: T },
}

impl<T> std::fmt::Display for ObjectiveError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveWeight { index, weight } => {
                write!(f, "Weight {} is not positive: {}", index, weight)
            }
            Self::WeightOverflow => write!(
                f,
                "The least common multiple of the weights overflows the value type"
            ),
            Self::NoWeights => write!(f, "At least one weight is required"),
            Self::BinCountOverflow { num_bins } => {
                write!(f, "{} bins do not fit the value type", num_bins)
            }
            Self::KeyOverflow { num_bins, total } => write!(
                f,
                "Objective keys for a total of {} over {} bins overflow the value type",
                total, num_bins
            ),
        }
    }
}

impl<T> std::error::Error for ObjectiveError<T> where T: std::fmt::Debug + std::fmt::Display {}

fn gcd<T: SolverNumeric>(mut a: T, mut b: T) -> T {
    while b != T::ZERO {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Maximizes the smallest ratio `s_i / w_i` of bin sum to bin weight.
///
/// Bin `i` is tied to weight `i`, so bins are not interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaximizeSmallestWeightedSum<T> {
    weights: Vec<T>,
    /// `multipliers[i] = lcm(weights) / weights[i]`.
    multipliers: Vec<T>,
}

impl<T> MaximizeSmallestWeightedSum<T>
where
    T: SolverNumeric,
{
    /// Builds the objective for one positive weight per bin.
    pub fn new(weights: Vec<T>) -> Result<Self, ObjectiveError<T>> {
        if weights.is_empty() {
            return Err(ObjectiveError::NoWeights);
        }
        if let Some((index, &weight)) = weights.iter().enumerate().find(|(_, w)| **w <= T::ZERO) {
            return Err(ObjectiveError::NonPositiveWeight { index, weight });
        }

        let mut lcm = T::PLUS_ONE;
        for &w in &weights {
            lcm = (lcm / gcd(lcm, w))
                .checked_mul_val(w)
                .ok_or(ObjectiveError::WeightOverflow)?;
        }
        let multipliers = weights.iter().map(|&w| lcm / w).collect();

        Ok(Self {
            weights,
            multipliers,
        })
    }

    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }
}

impl<T> Objective<T> for MaximizeSmallestWeightedSum<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MaximizeSmallestWeightedSum"
    }

    fn value_to_minimize(&self, sums: &[T], _ascending: bool) -> T {
        debug_assert_eq!(
            sums.len(),
            self.multipliers.len(),
            "called `MaximizeSmallestWeightedSum::value_to_minimize` with {} sums for {} weights",
            sums.len(),
            self.multipliers.len()
        );
        let smallest = sums
            .iter()
            .zip(&self.multipliers)
            .map(|(&s, &m)| s.saturating_mul_val(m))
            .min()
            .unwrap_or(T::ZERO);
        -smallest
    }

    #[inline]
    fn is_symmetric(&self) -> bool {
        false
    }

    #[inline]
    fn expected_num_bins(&self) -> Option<usize> {
        Some(self.weights.len())
    }

    /// Keys scale each sum by its bin's multiplier.
    fn check_range(&self, num_bins: usize, total: T) -> Result<(), ObjectiveError<T>> {
        bin_count::<T>(num_bins)?;
        let largest = self.multipliers.iter().copied().max().unwrap_or(T::PLUS_ONE);
        check_scaled(num_bins, total, largest)
    }
}

/// An objective given by a closure.
///
/// The closure receives the sums and the `ascending` hint and returns the key
/// to minimize. Custom objectives have no lower bound.
pub struct CustomObjective<F> {
    name: String,
    key: F,
}

impl<F> CustomObjective<F> {
    pub fn new(name: impl Into<String>, key: F) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }
}

impl<F> std::fmt::Debug for CustomObjective<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomObjective")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T, F> Objective<T> for CustomObjective<F>
where
    T: SolverNumeric,
    F: Fn(&[T], bool) -> T + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn value_to_minimize(&self, sums: &[T], ascending: bool) -> T {
        (self.key)(sums, ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMS: [i64; 5] = [10, 20, 30, 40, 50];
    const REMAINING: [i64; 4] = [5, 20, 45, 200];
    const ZEROS: [i64; 5] = [0; 5];

    fn bounds<O: Objective<i64>>(objective: &O) -> Vec<i64> {
        REMAINING
            .iter()
            .map(|&r| objective.lower_bound(&SUMS, r, true))
            .collect()
    }

    #[test]
    fn test_values_on_ascending_sums() {
        let sums = [1i64, 2, 3, 4, 5];
        assert_eq!(MaximizeSmallestSum.value_to_minimize(&sums, true), -1);
        assert_eq!(MaximizeKSmallestSums::new(2).value_to_minimize(&sums, true), -3);
        assert_eq!(MinimizeLargestSum.value_to_minimize(&sums, true), 5);
        assert_eq!(MinimizeKLargestSums::new(2).value_to_minimize(&sums, true), 9);
        assert_eq!(MinimizeDifference.value_to_minimize(&sums, true), 4);
        assert_eq!(MinimizeDistanceFromAverage.value_to_minimize(&sums, true), 15);
    }

    #[test]
    fn test_values_ignore_input_order() {
        let sums = [4i64, 1, 5, 3, 2];
        assert_eq!(MaximizeSmallestSum.value_to_minimize(&sums, false), -1);
        assert_eq!(MaximizeKSmallestSums::new(2).value_to_minimize(&sums, false), -3);
        assert_eq!(MinimizeLargestSum.value_to_minimize(&sums, false), 5);
        assert_eq!(MinimizeKLargestSums::new(2).value_to_minimize(&sums, false), 9);
        assert_eq!(MinimizeDifference.value_to_minimize(&sums, false), 4);
        assert_eq!(MinimizeDistanceFromAverage.value_to_minimize(&sums, false), 15);
    }

    #[test]
    fn test_k_larger_than_bin_count_uses_all_bins() {
        let sums = [1i64, 2, 3];
        assert_eq!(MaximizeKSmallestSums::new(7).value_to_minimize(&sums, true), -6);
        assert_eq!(MinimizeKLargestSums::new(7).value_to_minimize(&sums, true), 6);
    }

    #[test]
    fn test_empty_sums_give_zero() {
        let empty: [i64; 0] = [];
        assert_eq!(MinimizeLargestSum.value_to_minimize(&empty, false), 0);
        assert_eq!(MaximizeSmallestSum.value_to_minimize(&empty, false), 0);
        assert_eq!(MinimizeDifference.value_to_minimize(&empty, true), 0);
        assert_eq!(MinimizeLargestSum.lower_bound(&empty, 10, true), 0);
        assert_eq!(MaximizeSmallestSum.lower_bound(&empty, 10, true), 0);
    }

    #[test]
    fn test_minimize_largest_sum_bounds() {
        assert_eq!(bounds(&MinimizeLargestSum), vec![50, 50, 50, 70]);
        assert_eq!(MinimizeLargestSum.lower_bound(&ZEROS, 54, true), 11);
    }

    #[test]
    fn test_maximize_smallest_sum_bounds() {
        assert_eq!(bounds(&MaximizeSmallestSum), vec![-15, -25, -35, -70]);
        assert_eq!(MaximizeSmallestSum.lower_bound(&ZEROS, 54, true), -10);
    }

    #[test]
    fn test_minimize_difference_bounds() {
        assert_eq!(bounds(&MinimizeDifference), vec![35, 25, 15, 0]);
        assert_eq!(MinimizeDifference.lower_bound(&ZEROS, 54, true), 1);
    }

    #[test]
    fn test_distance_from_average_bounds() {
        assert_eq!(bounds(&MinimizeDistanceFromAverage), vec![140, 110, 60, 0]);
        assert_eq!(MinimizeDistanceFromAverage.lower_bound(&ZEROS, 54, true), 4);
    }

    #[test]
    fn test_bounds_accept_unsorted_sums() {
        let shuffled = [40i64, 10, 50, 30, 20];
        for &r in &REMAINING {
            assert_eq!(
                MaximizeSmallestSum.lower_bound(&shuffled, r, false),
                MaximizeSmallestSum.lower_bound(&SUMS, r, true)
            );
            assert_eq!(
                MinimizeDifference.lower_bound(&shuffled, r, false),
                MinimizeDifference.lower_bound(&SUMS, r, true)
            );
            assert_eq!(
                MinimizeLargestSum.lower_bound(&shuffled, r, false),
                MinimizeLargestSum.lower_bound(&SUMS, r, true)
            );
        }
    }

    #[test]
    fn test_bounds_never_exceed_complete_values() {
        // Every way to place 7 more units on [1, 2, 4] is at least the bound.
        let sums = [1i64, 2, 4];
        let objectives: Vec<Box<dyn Objective<i64>>> = vec![
            Box::new(MinimizeLargestSum),
            Box::new(MaximizeSmallestSum),
            Box::new(MinimizeDifference),
            Box::new(MinimizeDistanceFromAverage),
        ];
        for objective in &objectives {
            let bound = objective.lower_bound(&sums, 7, true);
            for a in 0..=7 {
                for b in 0..=(7 - a) {
                    let c = 7 - a - b;
                    let complete = [sums[0] + a, sums[1] + b, sums[2] + c];
                    assert!(
                        objective.value_to_minimize(&complete, false) >= bound,
                        "{} bound {} beaten by {:?}",
                        objective.name(),
                        bound,
                        complete
                    );
                }
            }
        }
    }

    #[test]
    fn test_unbounded_objectives_never_prune() {
        let sums = [1i64, 2];
        assert_eq!(MaximizeKSmallestSums::new(1).lower_bound(&sums, 3, true), i64::MIN);
        let custom = CustomObjective::new("Spread", |s: &[i64], _: bool| s[1] - s[0]);
        assert_eq!(custom.lower_bound(&sums, 3, true), i64::MIN);
        assert_eq!(custom.value_to_minimize(&sums, true), 1);
        assert_eq!(Objective::<i64>::name(&custom), "Spread");
    }

    #[test]
    fn test_weighted_objective() {
        let objective = MaximizeSmallestWeightedSum::new(vec![1i64, 1, 1, 3, 4]).unwrap();
        assert_eq!(objective.value_to_minimize(&[2, 4, 1, 5, 3], false), -9);
        assert!(!objective.is_symmetric());
        assert_eq!(objective.expected_num_bins(), Some(5));
    }

    #[test]
    fn test_weighted_objective_rejects_bad_weights() {
        assert_eq!(
            MaximizeSmallestWeightedSum::new(vec![2i64, 0, 1]),
            Err(ObjectiveError::NonPositiveWeight {
                index: 1,
                weight: 0
            })
        );
        assert_eq!(
            MaximizeSmallestWeightedSum::<i64>::new(vec![]),
            Err(ObjectiveError::NoWeights)
        );
        assert_eq!(
            MaximizeSmallestWeightedSum::new(vec![7i8, 11, 13]),
            Err(ObjectiveError::WeightOverflow)
        );
    }

    #[test]
    fn test_capabilities() {
        assert!(Objective::<i64>::depends_only_on_largest_sum(&MinimizeLargestSum));
        assert!(!Objective::<i64>::depends_only_on_largest_sum(&MinimizeDifference));
        assert!(Objective::<i64>::is_symmetric(&MaximizeSmallestSum));
        assert_eq!(Objective::<i64>::expected_num_bins(&MinimizeLargestSum), None);
    }

    #[test]
    fn test_check_range_requires_representable_bin_count() {
        assert_eq!(Objective::<i8>::check_range(&MinimizeLargestSum, 127, 100), Ok(()));
        assert_eq!(
            Objective::<i8>::check_range(&MinimizeLargestSum, 200, 100),
            Err(ObjectiveError::BinCountOverflow { num_bins: 200 })
        );
        assert_eq!(
            Objective::<i8>::check_range(&MaximizeSmallestSum, 128, 1),
            Err(ObjectiveError::BinCountOverflow { num_bins: 128 })
        );
    }

    #[test]
    fn test_check_range_rejects_scaled_key_overflow() {
        assert_eq!(
            Objective::<i8>::check_range(&MinimizeDistanceFromAverage, 3, 42),
            Ok(())
        );
        assert_eq!(
            Objective::<i8>::check_range(&MinimizeDistanceFromAverage, 3, 96),
            Err(ObjectiveError::KeyOverflow {
                num_bins: 3,
                total: 96
            })
        );
        assert_eq!(
            Objective::<i32>::check_range(&MinimizeDistanceFromAverage, 3, 1_000_000_000),
            Err(ObjectiveError::KeyOverflow {
                num_bins: 3,
                total: 1_000_000_000
            })
        );

        let weighted = MaximizeSmallestWeightedSum::new(vec![1i8, 2]).unwrap();
        assert_eq!(weighted.check_range(2, 63), Ok(()));
        assert_eq!(
            weighted.check_range(2, 64),
            Err(ObjectiveError::KeyOverflow {
                num_bins: 2,
                total: 64
            })
        );
        assert_eq!(
            ObjectiveError::KeyOverflow {
                num_bins: 2,
                total: 64i8
            }
            .to_string(),
            "Objective keys for a total of 64 over 2 bins overflow the value type"
        );
    }
}
