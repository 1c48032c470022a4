use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::ValueExtent;
use crate::core::primitives::{lcm, scaled_integer_to_tick, tick_to_scaled_integer};

/// Upper bound on label precision for very small tick sizes.
pub const MAX_TICK_DECIMALS: u32 = 6;

/// Most gridline intervals a plan may carry.
///
/// Wider observed ranges coarsen `dtick` to an integer multiple of the
/// configured tick so gridlines stay aligned.
pub const MAX_AXIS_INTERVALS: usize = 1_000;

/// Largest tick-unit magnitude at which whole ticks stay exact in `f64`.
const MAX_EXACT_UNITS: f64 = 4_503_599_627_370_496.0;

/// Tolerance, in tick units, for treating a value as sitting on a gridline.
const GRID_EPSILON: f64 = 1e-9;

/// Fixed-spacing axis layout handed to the chart renderer.
///
/// Gridlines sit on `tick0 + k * dtick` and `range` always spans at least
/// two full intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPlan {
    pub dtick: f64,
    pub tick0: f64,
    pub range: [f64; 2],
    pub tick_decimals: u32,
}

impl AxisPlan {
    #[must_use]
    pub fn lo(self) -> f64 {
        self.range[0]
    }

    #[must_use]
    pub fn hi(self) -> f64 {
        self.range[1]
    }

    /// Whole intervals between `lo` and `hi`; `None` when the plan's numbers
    /// do not describe a countable grid.
    #[must_use]
    pub fn interval_count(self) -> Option<usize> {
        ((self.hi() - self.lo()) / self.dtick).round().to_usize()
    }

    /// Gridline values from `lo` to `hi` inclusive.
    ///
    /// Empty when the plan holds more than [`MAX_AXIS_INTERVALS`] intervals,
    /// which only a hand-built or deserialized plan can.
    #[must_use]
    pub fn tick_values(self) -> Vec<f64> {
        match self.interval_count() {
            Some(count) if count <= MAX_AXIS_INTERVALS => (0..=count)
                .map(|index| self.tick0 + index as f64 * self.dtick)
                .collect(),
            count => {
                warn!(?count, dtick = self.dtick, "axis plan has no listable gridlines");
                Vec::new()
            }
        }
    }
}

/// Plans a fixed-spacing axis for one series.
///
/// Returns `None` when `min_tick` is absent or unusable, or when the observed
/// range is not finite; the caller then keeps the renderer's automatic ticks.
/// A flat range still yields a two-interval window around the value.
///
/// A range spanning more than [`MAX_AXIS_INTERVALS`] ticks is laid out on the
/// smallest integer multiple of `min_tick` that fits. `None` is also returned
/// when the values sit too far from zero for whole ticks to be exact.
#[must_use]
pub fn single_axis_plan(
    min_tick: Option<f64>,
    observed_min: f64,
    observed_max: f64,
) -> Option<AxisPlan> {
    let tick = min_tick.filter(|tick| tick.is_finite() && *tick > 0.0)?;
    if !observed_min.is_finite() || !observed_max.is_finite() {
        return None;
    }

    let extent = ValueExtent::new(observed_min, observed_max);
    let dtick = gridline_spacing(tick, extent)?;
    let (min_units, max_units) = (extent.min / dtick, extent.max / dtick);
    if min_units.abs().max(max_units.abs()) >= MAX_EXACT_UNITS {
        warn!(
            dtick,
            min = extent.min,
            max = extent.max,
            "values too far from zero for tick grid"
        );
        return None;
    }

    let (lo_units, hi_units) = aligned_window_units(min_units, max_units);
    let lo = lo_units * dtick;
    let hi = hi_units * dtick;
    trace!(tick, dtick, lo, hi, "planned single axis");

    Some(AxisPlan {
        dtick,
        tick0: lo,
        range: [lo, hi],
        tick_decimals: tick_decimals_for(dtick),
    })
}

/// Plans an axis from a value extent.
#[must_use]
pub fn extent_axis_plan(min_tick: Option<f64>, extent: ValueExtent) -> Option<AxisPlan> {
    single_axis_plan(min_tick, extent.min, extent.max)
}

/// Least common multiple of tick sizes, computed on 6-decimal rationals.
///
/// Unusable sizes (non-positive, non-finite, or zero at 6 decimals) are
/// dropped and the LCM runs over the rest, so `[1.0, 1.5, -1.0]` gives `3.0`.
/// The smallest usable size is returned only when the integer LCM overflows.
/// `None` when nothing usable remains.
#[must_use]
pub fn combined_tick(min_ticks: &[f64]) -> Option<f64> {
    let usable: SmallVec<[(f64, u128); 4]> = min_ticks
        .iter()
        .filter_map(|&tick| match tick_to_scaled_integer(tick) {
            Some(scaled) => Some((tick, scaled)),
            None => {
                warn!(tick, "skipping unusable tick size");
                None
            }
        })
        .collect();

    let smallest = usable.iter().map(|(tick, _)| *tick).reduce(f64::min)?;
    let combined = usable
        .iter()
        .try_fold(1u128, |acc, (_, scaled)| lcm(acc, *scaled))
        .and_then(scaled_integer_to_tick)
        .filter(|tick| tick.is_finite() && *tick > 0.0);

    match combined {
        Some(tick) => Some(tick),
        None => {
            warn!(smallest, "tick lcm overflowed, falling back to smallest tick");
            Some(smallest)
        }
    }
}

/// Plans one axis shared by several series so their gridlines coincide.
///
/// Spacing is the LCM of the tick sizes; the window covers the union of the
/// observed extents.
#[must_use]
pub fn combined_axis_plan(min_ticks: &[f64], extents: &[ValueExtent]) -> Option<AxisPlan> {
    let tick = combined_tick(min_ticks)?;
    let extent = extents.iter().copied().reduce(ValueExtent::union)?;
    single_axis_plan(Some(tick), extent.min, extent.max)
}

/// Digits after the decimal point needed to print multiples of `tick`.
///
/// Follows the tick's order of magnitude only, so ticks with more significant
/// digits than that lose them in labels: `1.5` gets 0 decimals and `0.25`
/// gets 1.
#[must_use]
pub fn tick_decimals_for(tick: f64) -> u32 {
    if !tick.is_finite() || tick <= 0.0 {
        return 0;
    }
    let digits = (-tick.log10() - GRID_EPSILON).ceil();
    digits.clamp(0.0, f64::from(MAX_TICK_DECIMALS)) as u32
}

/// `tick`, or its smallest integer multiple that keeps the aligned window
/// within [`MAX_AXIS_INTERVALS`]. `None` when the spread is not countable.
fn gridline_spacing(tick: f64, extent: ValueExtent) -> Option<f64> {
    let spread_units = (extent.max - extent.min) / tick;
    if !spread_units.is_finite() {
        warn!(tick, "value spread too wide for tick grid");
        return None;
    }
    // Two spare intervals for the enclosing-tick rounding.
    let budget = (MAX_AXIS_INTERVALS - 2) as f64;
    if spread_units <= budget {
        return Some(tick);
    }

    let multiple = (spread_units / budget).ceil();
    let dtick = tick * multiple;
    debug!(tick, multiple, dtick, "coarsened tick for wide value spread");
    dtick.is_finite().then_some(dtick)
}

/// Aligned two-interval window in tick units covering `[min, max]`.
///
/// Starts centered on the tick nearest the midpoint and shifts by whole
/// ticks. A range too wide for two intervals widens to the enclosing ticks.
fn aligned_window_units(min: f64, max: f64) -> (f64, f64) {
    let mid = ((min + max) / 2.0).round();
    let mut lo = mid - 1.0;
    let mut hi = mid + 1.0;

    if max > hi + GRID_EPSILON {
        let shift = (max - hi - GRID_EPSILON).ceil();
        lo += shift;
        hi += shift;
    }
    if min < lo - GRID_EPSILON {
        let shift = (lo - GRID_EPSILON - min).ceil();
        lo -= shift;
        hi -= shift;
    }

    if max > hi + GRID_EPSILON {
        lo = (min + GRID_EPSILON).floor();
        hi = (max - GRID_EPSILON).ceil().max(lo + 2.0);
    }
    (lo, hi)
}
