use std::fmt;
use std::io;

use itertools::izip;
use serde::Serialize;

use crate::{repair, GenError, Quantity, TimeWindowMode, WindowDemand};

/// Generated CSILSP instance.
///
/// All per-period data are indexed by periods `0..T`. Time-window variants additionally carry the
/// window demand `d_w` from which `d` is aggregated. Instances are read-only to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance<T> {
    pub(crate) mode: TimeWindowMode,
    /// aggregate demand `d[t]` to be satisfied by the end of period `t`
    pub(crate) d: Vec<T>,
    /// production/supply capacity `C[t]` in period `t`
    pub(crate) c: Vec<T>,
    /// holding cost `h[t]` per unit in stock at the end of period `t`
    pub(crate) h: Vec<T>,
    /// unit production/supply cost `p[t]` in period `t`
    pub(crate) p: Vec<T>,
    /// fixed setup cost `s[t]` in period `t`
    pub(crate) s: Vec<T>,
    /// window demand `d_w[(i, j)]`, present iff `mode` has time windows
    pub(crate) d_w: Option<WindowDemand<T>>,
}

/// Single row of the tabular view of an [Instance].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodRow<T> {
    #[serde(rename = "T")]
    pub t: usize,
    pub d: T,
    #[serde(rename = "C")]
    pub c: T,
    pub h: T,
    pub p: T,
    pub s: T,
}

#[derive(Debug, Serialize)]
struct WindowRow<T> {
    start: usize,
    end: usize,
    demand: T,
}

impl<T: Quantity> Instance<T> {
    /// Number of periods `T` in the planning horizon.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.d.len()
    }

    #[inline]
    pub fn mode(&self) -> TimeWindowMode {
        self.mode
    }

    #[inline]
    pub fn demand(&self) -> &[T] {
        &self.d
    }

    #[inline]
    pub fn capacity(&self) -> &[T] {
        &self.c
    }

    #[inline]
    pub fn holding_cost(&self) -> &[T] {
        &self.h
    }

    #[inline]
    pub fn production_cost(&self) -> &[T] {
        &self.p
    }

    #[inline]
    pub fn setup_cost(&self) -> &[T] {
        &self.s
    }

    /// Window demand `d_w` or `None` for the base variant.
    #[inline]
    pub fn window_demand(&self) -> Option<&WindowDemand<T>> {
        self.d_w.as_ref()
    }

    /// Check that capacity is sufficient for this instance's variant (point-wise for the base
    /// variant, for every sub-interval otherwise).
    pub fn is_feasible(&self) -> bool {
        match &self.d_w {
            Some(d_w) => repair::is_interval_feasible(&self.c, d_w),
            None => repair::is_pointwise_feasible(&self.c, &self.d),
        }
    }

    /// Per-period rows `(T, d, C, h, p, s)`.
    pub fn rows(&self) -> impl Iterator<Item = PeriodRow<T>> + '_ {
        izip!(&self.d, &self.c, &self.h, &self.p, &self.s)
            .enumerate()
            .map(|(t, (&d, &c, &h, &p, &s))| PeriodRow { t, d, c, h, p, s })
    }

    /// Write per-period rows as CSV with header `T,d,C,h,p,s`.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), GenError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in self.rows() {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write window demand as CSV with header `start,end,demand`, skipping zero-width windows.
    pub fn write_windows_csv<W: io::Write>(&self, writer: W) -> Result<(), GenError> {
        let d_w = self.d_w.as_ref().ok_or(GenError::NoTimeWindows)?;
        let mut wtr = csv::Writer::from_writer(writer);
        for (w, demand) in d_w.iter().filter(|(w, _)| w.start != w.end) {
            wtr.serialize(WindowRow {
                start: w.start,
                end: w.end,
                demand,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl<T: Quantity> fmt::Display for Instance<T> {
    /// Aligned table with one row per period and columns `T d C h p s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn line<'a, I>(f: &mut fmt::Formatter<'_>, row: I, widths: &[usize]) -> fmt::Result
        where
            I: IntoIterator<Item = &'a str>,
        {
            for (i, (cell, &w)) in row.into_iter().zip(widths).enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>w$}", cell, w = w)?;
            }
            writeln!(f)
        }

        let header = ["T", "d", "C", "h", "p", "s"];
        let cells: Vec<[String; 6]> = self
            .rows()
            .map(|r| {
                [
                    r.t.to_string(),
                    r.d.to_string(),
                    r.c.to_string(),
                    r.h.to_string(),
                    r.p.to_string(),
                    r.s.to_string(),
                ]
            })
            .collect();

        let mut widths = header.map(str::len);
        for row in cells.iter() {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }

        line(f, header, &widths)?;
        for row in cells.iter() {
            line(f, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}
