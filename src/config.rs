//! # Generator configuration
//! Sampling bounds and problem variant selection.
//!
//! All bounds are *inclusive* integer ranges that are validated at construction, hence a
//! [GenConfig] handed to a [Generator](crate::Generator) can never describe an empty range.
use num_traits::{NumCast, ToPrimitive};
use rand::distributions::Uniform;

use crate::{GenError, Quantity};

/// Problem variant produced by a [Generator](crate::Generator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindowMode {
    /// Base CSILSP with per-period demand
    #[default]
    None,
    /// Customer-specific time windows that may nest arbitrarily
    CustomerSpecific,
    /// Non-customer-specific time windows with strictly nested windows suppressed
    NonCustomerSpecific,
}

impl TimeWindowMode {
    /// True iff demand is attached to time windows rather than to single periods.
    #[inline]
    pub fn has_windows(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// True iff strictly nested windows are pruned before capacity repair.
    #[inline]
    pub fn prunes_nested(&self) -> bool {
        matches!(self, Self::NonCustomerSpecific)
    }
}

/// Inclusive sampling range `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<T> {
    lower: T,
    upper: T,
}

impl<T: Quantity> Bounds<T> {
    /// Create new bounds, failing fast if `lower > upper` or if `lower` is negative.
    ///
    /// ## Example
    /// ```
    /// # extern crate lotsizing;
    /// use lotsizing::Bounds;
    ///
    /// assert!(Bounds::new(1u32, 6).is_ok());
    /// assert!(Bounds::new(6u32, 1).is_err());
    /// assert!(Bounds::new(-1i64, 1).is_err());
    /// ```
    pub fn new(lower: T, upper: T) -> Result<Self, GenError> {
        if lower > upper {
            return Err(GenError::InvalidBounds {
                lower: widen(lower),
                upper: widen(upper),
            });
        }
        if lower < T::zero() {
            return Err(GenError::NegativeBound {
                lower: widen(lower),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Degenerate range `[value, value]`.
    pub fn fixed(value: T) -> Result<Self, GenError> {
        Self::new(value, value)
    }

    #[inline]
    pub fn lower(&self) -> T {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> T {
        self.upper
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Uniform distribution over this range.
    pub(crate) fn distribution(&self) -> Uniform<T> {
        Uniform::new_inclusive(self.lower, self.upper)
    }

    // used for the built-in defaults only, all of which fit into any primitive integer
    fn small(lower: u8, upper: u8) -> Self {
        let cast = |v: u8| <T as NumCast>::from(v).unwrap_or_else(T::zero);
        Self {
            lower: cast(lower),
            upper: cast(upper),
        }
    }
}

// every primitive integer but the upper half of u128 fits
fn widen<T: Quantity>(value: T) -> i128 {
    value.to_i128().unwrap_or(i128::MAX)
}

/// Sampling configuration of a single `generate` call.
///
///  - `bounds` apply to holding, production and setup costs, to capacity and to base-variant
///    demand (default `[1, 6]`)
///  - `window_bounds` apply to time-window demand (default `[0, 4]`) and are ignored by the base
///    variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenConfig<T> {
    pub bounds: Bounds<T>,
    pub window_bounds: Bounds<T>,
}

impl<T: Quantity> GenConfig<T> {
    /// Build and validate a configuration from the raw bound pairs `[a, b]` and `[dw_a, dw_b]`.
    pub fn new(a: T, b: T, dw_a: T, dw_b: T) -> Result<Self, GenError> {
        Ok(Self {
            bounds: Bounds::new(a, b)?,
            window_bounds: Bounds::new(dw_a, dw_b)?,
        })
    }

    /// Replace cost/capacity bounds, keeping the window bounds.
    pub fn with_bounds(self, bounds: Bounds<T>) -> Self {
        Self { bounds, ..self }
    }

    /// Replace window demand bounds, keeping the cost/capacity bounds.
    pub fn with_window_bounds(self, window_bounds: Bounds<T>) -> Self {
        Self {
            window_bounds,
            ..self
        }
    }
}

impl<T: Quantity> Default for GenConfig<T> {
    fn default() -> Self {
        Self {
            bounds: Bounds::small(1, 6),
            window_bounds: Bounds::small(0, 4),
        }
    }
}
