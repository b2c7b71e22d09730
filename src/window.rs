//! # Time windows
//! Demand attached to delivery windows `[i, j]` of the planning horizon.
//!
//! ## Storage
//! Window demand `d_w` is stored for every pair `0 <= i <= j < T` in a flat upper-triangular
//! layout ordered lexicographically by `(i, j)`. Zero-width windows `(i, i)` are kept as
//! placeholders and never carry demand.
//!
//! ## Nesting
//! Two windows are *ordered* if their bounds are componentwise ordered the same way, i.e.
//! `(a.start <= b.start && a.end <= b.end) || (a.start >= b.start && a.end >= b.end)`.
//! Otherwise one of them lies *strictly* inside the other (both of its bounds are strictly
//! inside). The non-customer-specific variant suppresses all such nested windows with
//! [prune_nested].
use std::fmt;

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use log::trace;

use crate::{checked_add, checked_sum, Bounds, GenError, Quantity, RandomSource};

/// Closed period interval `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True iff bounds of `self` and `other` are componentwise ordered the same way.
    #[inline]
    pub fn is_ordered_with(&self, other: &Window) -> bool {
        (self.start <= other.start && self.end <= other.end)
            || (self.start >= other.start && self.end >= other.end)
    }

    /// True iff `other` lies strictly inside `self` on both sides.
    ///
    /// ## Example
    /// ```
    /// # extern crate lotsizing;
    /// use lotsizing::Window;
    ///
    /// assert!(Window::new(0, 3).strictly_contains(&Window::new(1, 2)));
    /// assert!(!Window::new(0, 3).strictly_contains(&Window::new(0, 2)));
    /// assert!(!Window::new(1, 2).strictly_contains(&Window::new(0, 3)));
    /// ```
    #[inline]
    pub fn strictly_contains(&self, other: &Window) -> bool {
        self.start < other.start && other.end < self.end
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Demand `d_w[(i, j)]` for every window `0 <= i <= j < T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDemand<T> {
    horizon: usize,
    demand: Vec<T>,
}

impl<T: Quantity> WindowDemand<T> {
    /// All windows of a horizon of length `horizon` with zero demand.
    pub fn zeros(horizon: usize) -> Self {
        Self {
            horizon,
            demand: vec![T::zero(); horizon * (horizon + 1) / 2],
        }
    }

    /// Sample demand of every window `(i, j)` with `i < j` from `bounds` in lexicographic order.
    /// Zero-width windows consume no draw and stay at zero.
    pub fn sample(horizon: usize, bounds: &Bounds<T>, source: &mut RandomSource) -> Self {
        let mut demand = Self::zeros(horizon);
        for (i, j) in (0..horizon).flat_map(|i| (i..horizon).map(move |j| (i, j))) {
            if i != j {
                demand.put(Window::new(i, j), source.sample(bounds));
            }
        }
        demand
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    #[inline]
    fn is_window(&self, start: usize, end: usize) -> bool {
        start <= end && end < self.horizon
    }

    fn check_window(&self, start: usize, end: usize) -> Result<(), GenError> {
        if self.is_window(start, end) {
            Ok(())
        } else {
            Err(GenError::InvalidWindow {
                start,
                end,
                horizon: self.horizon,
            })
        }
    }

    // row `i` of the triangle starts after `sum_{k < i} (T - k) = i * (2T - i + 1) / 2` entries
    #[inline]
    fn index(&self, start: usize, end: usize) -> usize {
        start * (2 * self.horizon - start + 1) / 2 + (end - start)
    }

    /// Demand of window `[start, end]` or `None` if it is not a window of this horizon.
    #[inline]
    pub fn get(&self, start: usize, end: usize) -> Option<T> {
        if self.is_window(start, end) {
            Some(self.at(start, end))
        } else {
            None
        }
    }

    /// Demand of a window known to be valid.
    #[inline]
    pub(crate) fn at(&self, start: usize, end: usize) -> T {
        debug_assert!(self.is_window(start, end));
        self.demand[self.index(start, end)]
    }

    /// Set demand of window `w`.
    ///
    /// Fails if `w` is not a window of this horizon or if nonzero demand is put on a zero-width
    /// window.
    ///
    /// ## Example
    /// ```
    /// # extern crate lotsizing;
    /// use lotsizing::{GenError, Window, WindowDemand};
    ///
    /// let mut d_w = WindowDemand::<u32>::zeros(3);
    ///
    /// assert!(d_w.set(Window::new(0, 2), 4).is_ok());
    /// assert!(matches!(
    ///     d_w.set(Window::new(1, 1), 4),
    ///     Err(GenError::ZeroWidthDemand { period: 1 })
    /// ));
    /// assert!(matches!(
    ///     d_w.set(Window::new(1, 3), 4),
    ///     Err(GenError::InvalidWindow { .. })
    /// ));
    /// ```
    pub fn set(&mut self, w: Window, value: T) -> Result<(), GenError> {
        self.check_window(w.start, w.end)?;
        if w.start == w.end && value != T::zero() {
            return Err(GenError::ZeroWidthDemand { period: w.start });
        }
        self.put(w, value);
        Ok(())
    }

    #[inline]
    pub(crate) fn put(&mut self, w: Window, value: T) {
        debug_assert!(self.is_window(w.start, w.end));
        let i = self.index(w.start, w.end);
        self.demand[i] = value;
    }

    /// Iterate over all windows and their demand in lexicographic order of `(start, end)`.
    pub fn iter(&self) -> impl Iterator<Item = (Window, T)> + Clone + '_ {
        let horizon = self.horizon;
        (0..horizon)
            .flat_map(move |i| (i..horizon).map(move |j| Window::new(i, j)))
            .zip(self.demand.iter().copied())
    }

    /// Windows carrying nonzero demand.
    pub fn active(&self) -> impl Iterator<Item = (Window, T)> + Clone + '_ {
        self.iter().filter(|&(_, d)| d != T::zero())
    }

    /// Total demand over all windows.
    pub fn total(&self) -> Result<T, GenError> {
        checked_sum(self.demand.iter().copied())
    }

    /// Total demand of windows `(k, l)` fully covered by `[t1, t2]`.
    pub fn contained(&self, t1: usize, t2: usize) -> Result<T, GenError> {
        self.check_window(t1, t2)?;
        checked_sum(
            (t1..=t2)
                .flat_map(|k| (k..=t2).map(move |l| (k, l)))
                .map(|(k, l)| self.at(k, l)),
        )
    }

    /// Aggregate demand per period: `d[t]` is the total demand of all windows ending at `t`.
    pub fn aggregate(&self) -> Result<Vec<T>, GenError> {
        (0..self.horizon)
            .map(|t| (0..=t).try_fold(T::zero(), |acc, t1| checked_add(acc, self.at(t1, t))))
            .collect()
    }
}

/// Zero the demand of every window that is strictly nested inside another window with nonzero
/// demand and return the nested windows in lexicographic order.
///
/// The nesting relation is evaluated on the windows active *before* pruning, hence the result
/// does not depend on the order in which pairs are compared.
///
/// ## Example
/// ```
/// # extern crate lotsizing;
/// use lotsizing::{prune_nested, Window, WindowDemand};
///
/// let mut d_w = WindowDemand::<u32>::zeros(4);
/// d_w.set(Window::new(0, 3), 4).expect("valid window");
/// d_w.set(Window::new(1, 2), 2).expect("valid window");
///
/// assert_eq!(prune_nested(&mut d_w), vec![Window::new(1, 2)]);
/// assert_eq!(d_w.get(1, 2), Some(0));
/// assert_eq!(d_w.get(0, 3), Some(4));
/// ```
pub fn prune_nested<T: Quantity>(demand: &mut WindowDemand<T>) -> Vec<Window> {
    let active = demand.active().map(|(w, _)| w).collect_vec();

    // phase 1: mark nested windows without touching any demand
    let mut nested = FixedBitSet::with_capacity(active.len());
    for ((a, wa), (b, wb)) in active.iter().enumerate().tuple_combinations() {
        if wa.is_ordered_with(wb) {
            continue;
        }
        if wa.strictly_contains(wb) {
            nested.insert(b);
        } else {
            nested.insert(a);
        }
    }

    // phase 2: suppress marked windows
    let pruned = nested.ones().map(|i| active[i]).collect_vec();
    for &w in pruned.iter() {
        trace!("pruning time window {} nested in an active window", w);
        demand.put(w, T::zero());
    }

    pruned
}
