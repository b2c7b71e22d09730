use thiserror::Error;

/// Failures raised while configuring, generating or exporting an instance.
///
/// Bound values are reported widened to `i128`; `u128` values beyond its range saturate.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("planning horizon must contain at least one period")]
    EmptyHorizon,
    #[error("invalid sampling bounds: lower bound {lower} exceeds upper bound {upper}")]
    InvalidBounds { lower: i128, upper: i128 },
    #[error("invalid sampling bounds: lower bound {lower} is negative")]
    NegativeBound { lower: i128 },
    #[error("window [{start}, {end}] is not a window of a horizon of {horizon} periods")]
    InvalidWindow {
        start: usize,
        end: usize,
        horizon: usize,
    },
    #[error("zero-width window [{period}, {period}] cannot carry demand")]
    ZeroWidthDemand { period: usize },
    #[error("quantity overflow: sampled values do not fit into the quantity type")]
    Overflow,
    #[error("no instance has been generated yet")]
    NotGenerated,
    #[error("instance has no time windows")]
    NoTimeWindows,
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
