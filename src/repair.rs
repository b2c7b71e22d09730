//! # Capacity repair
//! Post-hoc adjustment of sampled capacity `C` so that every generated instance admits at least
//! one feasible production plan. Capacity is only ever increased.
//!
//! ## Point-wise repair (base variant)
//! Each period has to cover its own demand, i.e. `C[t] >= d[t]`. A violating period receives its
//! whole demand on top of the sampled capacity.
//!
//! ## Interval-wise repair (time-window variants)
//! For every sub-interval `[t1, t2]` of the horizon (ordered by `t2` and then by `t1`) the total
//! capacity `sum_{k in [t1, t2]} C[k]` must not be smaller than the total demand `W(t1, t2)` of
//! windows fully covered by `[t1, t2]`. A violating interval adds the whole `W(t1, t2)` (not just
//! the shortfall) to the capacity of every period in `[t1, t2]`.
//!
//! `W(t1, t2)` only depends on window demand and is maintained incrementally per `t2`, giving
//! `O(T^3)` instead of a naive `O(T^4)` re-summation while making exactly the same sequence of
//! comparisons and additions.
//!
//! All sums are checked: if capacity or contained demand does not fit into the quantity type,
//! repair stops with [GenError::Overflow].
use log::trace;

use crate::{checked_add, checked_sum, GenError, Quantity, WindowDemand};

/// Raise `capacity[t]` by `demand[t]` wherever `capacity[t] < demand[t]` and return the number of
/// repaired periods.
///
/// ## Example
/// ```
/// # extern crate lotsizing;
/// use lotsizing::repair;
///
/// let mut c = vec![3, 1, 4];
/// let d = vec![2, 5, 4];
///
/// assert_eq!(repair::pointwise(&mut c, &d).expect("no overflow"), 1);
/// assert_eq!(c, vec![3, 6, 4]);
/// ```
pub fn pointwise<T: Quantity>(capacity: &mut [T], demand: &[T]) -> Result<usize, GenError> {
    debug_assert_eq!(capacity.len(), demand.len());
    let mut repairs = 0;
    for (t, (c, &d)) in capacity.iter_mut().zip(demand).enumerate() {
        if *c < d {
            trace!("repairing period {}: capacity {} < demand {}", t, c, d);
            *c = checked_add(*c, d)?;
            repairs += 1;
        }
    }
    Ok(repairs)
}

/// Repair `capacity` such that every sub-interval covers the demand of windows it contains and
/// return the number of repaired intervals.
///
/// ## Example
/// ```
/// # extern crate lotsizing;
/// use lotsizing::{repair, Window, WindowDemand};
///
/// let mut d_w = WindowDemand::zeros(2);
/// d_w.set(Window::new(0, 1), 5).expect("valid window");
///
/// let mut c = vec![1, 1];
/// assert_eq!(repair::intervalwise(&mut c, &d_w).expect("no overflow"), 1);
/// assert_eq!(c, vec![6, 6]);
/// ```
pub fn intervalwise<T: Quantity>(
    capacity: &mut [T],
    demand: &WindowDemand<T>,
) -> Result<usize, GenError> {
    let horizon = capacity.len();
    debug_assert_eq!(horizon, demand.horizon());

    // contained[t1] = W(t1, t2) for the current t2
    let mut contained = vec![T::zero(); horizon];
    let mut repairs = 0;

    for t2 in 0..horizon {
        // extend W(t1, t2 - 1) by windows ending at t2 that start at or after t1
        let mut ending = T::zero();
        for t1 in (0..=t2).rev() {
            ending = checked_add(ending, demand.at(t1, t2))?;
            contained[t1] = checked_add(contained[t1], ending)?;
        }

        for t1 in 0..=t2 {
            let w = contained[t1];
            let c = checked_sum(capacity[t1..=t2].iter().copied())?;
            if c < w {
                trace!(
                    "repairing interval [{}, {}]: capacity {} < contained demand {}",
                    t1,
                    t2,
                    c,
                    w
                );
                for c in capacity[t1..=t2].iter_mut() {
                    *c = checked_add(*c, w)?;
                }
                repairs += 1;
            }
        }
    }

    Ok(repairs)
}

/// True iff `capacity[t] >= demand[t]` for all periods `t`.
pub fn is_pointwise_feasible<T: Quantity>(capacity: &[T], demand: &[T]) -> bool {
    capacity.len() == demand.len() && capacity.iter().zip(demand).all(|(c, d)| c >= d)
}

/// True iff every sub-interval `[t1, t2]` has at least as much capacity as the total demand of
/// windows it fully covers.
///
/// Demand that does not fit into `T` cannot be certified and counts as infeasible, whereas
/// non-negative capacity that does not fit exceeds any demand.
pub fn is_interval_feasible<T: Quantity>(capacity: &[T], demand: &WindowDemand<T>) -> bool {
    let horizon = capacity.len();
    horizon == demand.horizon()
        && (0..horizon).all(|t2| {
            (0..=t2).all(|t1| match demand.contained(t1, t2) {
                Ok(w) => checked_sum(capacity[t1..=t2].iter().copied()).map_or(true, |c| c >= w),
                Err(_) => false,
            })
        })
}
