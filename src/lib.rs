//! # Feasible instance generator for lot-sizing problems
//! This crate produces synthetic, guaranteed-feasible instances of the *Capacitated Single-Item
//! Lot-Sizing Problem* (CSILSP) for benchmarking and testing optimization solvers. It does not
//! solve anything.
//!
//! ## Problem variants
//! There are three variants selected by [TimeWindowMode]:
//!  1. **Base CSILSP** - per-period demand `d[t]` and capacity `C[t]`
//!  1. **Customer-specific time windows (CS)** - demand `d_w[(i, j)]` may be delivered at any
//!     period of window `[i, j]` and windows may nest arbitrarily
//!  1. **Non-customer-specific time windows (NCS)** - like CS but windows strictly nested inside
//!     another active window are suppressed (see [prune_nested])
//!
//! Every instance further carries per-period holding cost `h`, unit production cost `p` and setup
//! cost `s`.
//!
//! ## Feasibility
//! Sampled capacity is repaired (only ever increased) such that
//!  - `C[t] >= d[t]` for every period `t` in the base variant
//!  - `sum_{k in [t1, t2]} C[k] >= sum { d_w[(k, l)] : t1 <= k <= l <= t2 }` for every
//!    sub-interval `[t1, t2]` in the time-window variants
//!
//! See [repair] for details.
//!
//! ## Example
//! ```
//! # extern crate lotsizing;
//! use lotsizing::{GenConfig, Generator};
//!
//! let mut generator = Generator::<u32>::non_customer_specific(4).expect("valid horizon");
//! generator.seed(Some(7));
//!
//! let config = GenConfig::new(1, 6, 0, 4).expect("valid bounds");
//! let instance = generator.generate(&config).expect("instance");
//!
//! assert!(instance.is_feasible());
//! println!("{}", instance);
//! ```
use std::fmt::{Debug, Display};

use num_traits::PrimInt;
use rand::distributions::uniform::SampleUniform;
use serde::Serialize;

pub mod config;
pub mod error;
pub mod generator;
pub mod instance;
pub mod repair;
pub mod rng;
pub mod window;

pub use config::{Bounds, GenConfig, TimeWindowMode};
pub use error::GenError;
pub use generator::Generator;
pub use instance::{Instance, PeriodRow};
pub use rng::RandomSource;
pub use window::{prune_nested, Window, WindowDemand};

/// Integer quantity used for costs, demands and capacities.
///
/// Any primitive integer qualifies. Sums formed while repairing capacity are checked, so a type
/// too narrow for the sampled values makes generation fail with [GenError::Overflow] instead of
/// wrapping around.
pub trait Quantity: PrimInt + SampleUniform + Debug + Display + Serialize {}

impl<T> Quantity for T where T: PrimInt + SampleUniform + Debug + Display + Serialize {}

/// Sum of `values` or [GenError::Overflow] if it does not fit into `T`.
pub(crate) fn checked_sum<T, I>(values: I) -> Result<T, GenError>
where
    T: Quantity,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .try_fold(T::zero(), |acc, x| acc.checked_add(&x))
        .ok_or(GenError::Overflow)
}

#[inline]
pub(crate) fn checked_add<T: Quantity>(a: T, b: T) -> Result<T, GenError> {
    a.checked_add(&b).ok_or(GenError::Overflow)
}
