use log::debug;

use crate::window::prune_nested;
use crate::{
    repair, Bounds, GenConfig, GenError, Instance, Quantity, RandomSource, TimeWindowMode,
    WindowDemand,
};

/// Generator of random, guaranteed-feasible CSILSP instances over a fixed horizon.
///
/// Each call to [generate](Generator::generate) runs the whole pipeline
///  1. sample holding, production and setup costs
///  1. sample demand (base variant) or window demand (time-window variants)
///  1. prune strictly nested windows (non-customer-specific variant only)
///  1. sample capacity and repair it
///  1. aggregate window demand into per-period demand (time-window variants)
///
/// and replaces the previously generated instance only once the pipeline has finished. A run
/// that fails (e.g. with [GenError::Overflow] for a too narrow quantity type) keeps the previous
/// instance.
///
/// ## Example
/// ```
/// # extern crate lotsizing;
/// use lotsizing::{GenConfig, Generator};
///
/// let mut generator = Generator::<u32>::customer_specific(5).expect("valid horizon");
/// generator.seed(Some(42));
///
/// let instance = generator
///     .generate(&GenConfig::default())
///     .expect("valid configuration");
///
/// assert_eq!(instance.horizon(), 5);
/// assert!(instance.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Generator<T = u32> {
    horizon: usize,
    mode: TimeWindowMode,
    source: RandomSource,
    instance: Option<Instance<T>>,
}

impl<T: Quantity> Generator<T> {
    /// New generator for a horizon of `horizon` periods drawing from system entropy.
    pub fn new(horizon: usize, mode: TimeWindowMode) -> Result<Self, GenError> {
        Self::with_source(horizon, mode, RandomSource::from_entropy())
    }

    /// New generator for a horizon of `horizon` periods drawing from given random `source`.
    pub fn with_source(
        horizon: usize,
        mode: TimeWindowMode,
        source: RandomSource,
    ) -> Result<Self, GenError> {
        if horizon == 0 {
            return Err(GenError::EmptyHorizon);
        }
        Ok(Self {
            horizon,
            mode,
            source,
            instance: None,
        })
    }

    /// Generator of base CSILSP instances.
    pub fn base(horizon: usize) -> Result<Self, GenError> {
        Self::new(horizon, TimeWindowMode::None)
    }

    /// Generator of CSILSP instances with customer-specific time windows.
    pub fn customer_specific(horizon: usize) -> Result<Self, GenError> {
        Self::new(horizon, TimeWindowMode::CustomerSpecific)
    }

    /// Generator of CSILSP instances with non-customer-specific time windows.
    pub fn non_customer_specific(horizon: usize) -> Result<Self, GenError> {
        Self::new(horizon, TimeWindowMode::NonCustomerSpecific)
    }

    /// Re-seed the random source iff `seed` is set to a non-zero value.
    #[inline]
    pub fn seed(&mut self, seed: Option<u64>) {
        self.source.seed(seed);
    }

    /// Give up this generator and take over its random source in its current state.
    pub fn into_source(self) -> RandomSource {
        self.source
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    #[inline]
    pub fn mode(&self) -> TimeWindowMode {
        self.mode
    }

    /// Generate a new instance, replacing any previously generated one.
    ///
    /// Fails with [GenError::Overflow] if repaired capacity or aggregated demand does not fit
    /// into `T`, in which case no instance is stored.
    pub fn generate(&mut self, config: &GenConfig<T>) -> Result<&Instance<T>, GenError> {
        let n = self.horizon;
        let bounds = &config.bounds;

        let h = self.source.sample_vec(bounds, n);
        let p = self.source.sample_vec(bounds, n);
        let s = self.source.sample_vec(bounds, n);

        let instance = if self.mode.has_windows() {
            let (d_w, c) = self.windowed_demand_and_capacity(bounds, &config.window_bounds)?;
            Instance {
                mode: self.mode,
                d: d_w.aggregate()?,
                c,
                h,
                p,
                s,
                d_w: Some(d_w),
            }
        } else {
            let d = self.source.sample_vec(bounds, n);
            let mut c = self.source.sample_vec(bounds, n);
            let repairs = repair::pointwise(&mut c, &d)?;
            debug!("base instance with T = {}: {} periods repaired", n, repairs);
            Instance {
                mode: self.mode,
                d,
                c,
                h,
                p,
                s,
                d_w: None,
            }
        };

        Ok(self.instance.insert(instance))
    }

    /// Generate a new instance with [GenConfig::default] bounds.
    pub fn generate_default(&mut self) -> Result<&Instance<T>, GenError> {
        self.generate(&GenConfig::default())
    }

    fn windowed_demand_and_capacity(
        &mut self,
        bounds: &Bounds<T>,
        window_bounds: &Bounds<T>,
    ) -> Result<(WindowDemand<T>, Vec<T>), GenError> {
        let n = self.horizon;

        let mut d_w = WindowDemand::sample(n, window_bounds, &mut self.source);

        let pruned = if self.mode.prunes_nested() {
            prune_nested(&mut d_w).len()
        } else {
            0
        };

        let mut c = self.source.sample_vec(bounds, n);
        let repairs = repair::intervalwise(&mut c, &d_w)?;

        debug!(
            "{:?} instance with T = {}: {} windows pruned, {} intervals repaired",
            self.mode, n, pruned, repairs
        );

        Ok((d_w, c))
    }

    /// Most recently generated instance.
    pub fn instance(&self) -> Result<&Instance<T>, GenError> {
        self.instance.as_ref().ok_or(GenError::NotGenerated)
    }

    /// Aggregate demand `d` of the most recent instance.
    pub fn demand(&self) -> Result<&[T], GenError> {
        self.instance().map(Instance::demand)
    }

    /// Repaired capacity `C` of the most recent instance.
    pub fn capacity(&self) -> Result<&[T], GenError> {
        self.instance().map(Instance::capacity)
    }

    /// Holding cost `h` of the most recent instance.
    pub fn holding_cost(&self) -> Result<&[T], GenError> {
        self.instance().map(Instance::holding_cost)
    }

    /// Unit production cost `p` of the most recent instance.
    pub fn production_cost(&self) -> Result<&[T], GenError> {
        self.instance().map(Instance::production_cost)
    }

    /// Setup cost `s` of the most recent instance.
    pub fn setup_cost(&self) -> Result<&[T], GenError> {
        self.instance().map(Instance::setup_cost)
    }

    /// Window demand of the most recent instance; fails for the base variant.
    pub fn window_demand(&self) -> Result<&WindowDemand<T>, GenError> {
        self.instance()?
            .window_demand()
            .ok_or(GenError::NoTimeWindows)
    }
}
