use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{DataBounds, SpanPreset, SpanPresets, TimeSpan};
use crate::error::{ViewError, ViewResult};

pub const DEFAULT_TAIL_TOLERANCE_SECONDS: f64 = 5.0;
pub const DEFAULT_SLIDE_STEP_FRACTION: f64 = 1.0;

/// Tuning controls for window navigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowTuning {
    /// How close `end` must be to the tail for the view to count as live.
    pub tail_tolerance_seconds: f64,
    /// Fraction of the visible span moved by `back`/`forward`.
    pub slide_step_fraction: f64,
}

impl Default for WindowTuning {
    fn default() -> Self {
        Self {
            tail_tolerance_seconds: DEFAULT_TAIL_TOLERANCE_SECONDS,
            slide_step_fraction: DEFAULT_SLIDE_STEP_FRACTION,
        }
    }
}

impl WindowTuning {
    pub fn validate(self) -> ViewResult<Self> {
        if !self.tail_tolerance_seconds.is_finite() || self.tail_tolerance_seconds < 0.0 {
            return Err(ViewError::InvalidConfig(
                "tail tolerance must be finite and >= 0".to_owned(),
            ));
        }
        if !self.slide_step_fraction.is_finite() || self.slide_step_fraction <= 0.0 {
            return Err(ViewError::InvalidConfig(
                "slide step fraction must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Visible window of one view.
///
/// `follow_tail` pins `end` to the latest sample; otherwise the window sits
/// at an explicit historical position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub preset_index: usize,
    pub start: f64,
    pub end: f64,
    pub follow_tail: bool,
}

impl WindowState {
    #[must_use]
    pub fn span(self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }
}

/// Which navigation controls currently have an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationAvailability {
    pub back: bool,
    pub forward: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub jump_to_tail: bool,
}

/// Fits `[start, end]` inside `[min, max]`.
///
/// The window keeps its length unless the data range is narrower than the
/// window, in which case it collapses to exactly `[min, max]`.
#[must_use]
pub fn clamp_window(start: f64, end: f64, min: f64, max: f64) -> (f64, f64) {
    let (start, end) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    let length = end - start;
    if max - min <= length {
        (min, max)
    } else if start < min {
        (min, min + length)
    } else if end > max {
        (max - length, max)
    } else {
        (start, end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveWindow {
    bounds: DataBounds,
    state: WindowState,
}

/// Owns the visible time window of one view and evolves it under navigation.
///
/// Every bound-dependent operation is a no-op returning `false` while no data
/// bounds are known.
#[derive(Debug, Clone)]
pub struct WindowController {
    presets: SpanPresets,
    tuning: WindowTuning,
    requested_span_seconds: Option<f64>,
    active: Option<ActiveWindow>,
}

impl Default for WindowController {
    fn default() -> Self {
        Self {
            presets: SpanPresets::default(),
            tuning: WindowTuning::default(),
            requested_span_seconds: None,
            active: None,
        }
    }
}

impl WindowController {
    pub fn new(presets: SpanPresets, tuning: WindowTuning) -> ViewResult<Self> {
        Ok(Self {
            presets,
            tuning: tuning.validate()?,
            requested_span_seconds: None,
            active: None,
        })
    }

    #[must_use]
    pub fn presets(&self) -> &SpanPresets {
        &self.presets
    }

    #[must_use]
    pub fn tuning(&self) -> WindowTuning {
        self.tuning
    }

    #[must_use]
    pub fn bounds(&self) -> Option<DataBounds> {
        self.active.map(|active| active.bounds)
    }

    #[must_use]
    pub fn state(&self) -> Option<WindowState> {
        self.active.map(|active| active.state)
    }

    #[must_use]
    pub fn window(&self) -> Option<TimeSpan> {
        self.active.map(|active| active.state.span())
    }

    #[must_use]
    pub fn preset(&self) -> Option<SpanPreset> {
        self.active
            .and_then(|active| self.presets.get(active.state.preset_index))
    }

    /// Opens the view over `bounds`.
    ///
    /// The span snaps to the preset nearest `requested_span_seconds`, or the
    /// default preset when none is requested. The window is pinned to the tail.
    pub fn initialize(
        &mut self,
        bounds: Option<DataBounds>,
        requested_span_seconds: Option<f64>,
    ) -> Option<WindowState> {
        self.requested_span_seconds = requested_span_seconds;
        let Some(bounds) = bounds else {
            debug!("window initialized without data");
            self.active = None;
            return None;
        };

        let preset_index = requested_span_seconds.map_or(self.presets.default_index(), |seconds| {
            self.presets.nearest_index(seconds)
        });
        let state = self.pinned_to_tail(preset_index, bounds);
        debug!(
            preset_index,
            start = state.start,
            end = state.end,
            "window initialized at tail"
        );
        self.active = Some(ActiveWindow { bounds, state });
        Some(state)
    }

    pub fn zoom_in(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match active.state.preset_index.checked_sub(1) {
            Some(target) => self.zoom_to_preset(target),
            None => false,
        }
    }

    pub fn zoom_out(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.zoom_to_preset(active.state.preset_index + 1)
    }

    /// Switches directly to preset `index`.
    ///
    /// Tail-following views stay pinned to the tail; historical views zoom
    /// around their center.
    pub fn select_preset(&mut self, index: usize) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !active.state.follow_tail {
            return self.zoom_to_preset(index);
        }
        if index > self.presets.last_index() || index == active.state.preset_index {
            return false;
        }

        let state = self.pinned_to_tail(index, active.bounds);
        debug!(preset_index = index, "preset selected at tail");
        self.replace_state(active, state)
    }

    /// Moves both edges by `fraction` of the visible span.
    ///
    /// Forward moves stop at the tail and re-enable tail-following. Backward
    /// moves are ignored when the whole dataset already fits in one window.
    pub fn slide(&mut self, fraction: f64) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !fraction.is_finite() || fraction == 0.0 {
            return false;
        }

        let bounds = active.bounds;
        let state = active.state;
        let span = self.presets.length_at(state.preset_index);
        if fraction < 0.0 && bounds.span() <= span {
            trace!("backward slide ignored, data fits one window");
            return false;
        }

        let delta = fraction * (state.end - state.start);
        let next = if fraction > 0.0 && state.end + delta >= bounds.max {
            let (start, end) = clamp_window(bounds.max - span, bounds.max, bounds.min, bounds.max);
            WindowState {
                start,
                end,
                follow_tail: true,
                ..state
            }
        } else {
            let (start, end) = clamp_window(
                state.start + delta,
                state.end + delta,
                bounds.min,
                bounds.max,
            );
            WindowState {
                start,
                end,
                follow_tail: false,
                ..state
            }
        };

        debug!(
            fraction,
            start = next.start,
            end = next.end,
            follow_tail = next.follow_tail,
            "window slid"
        );
        self.replace_state(active, next)
    }

    pub fn back(&mut self) -> bool {
        self.slide(-self.tuning.slide_step_fraction)
    }

    pub fn forward(&mut self) -> bool {
        self.slide(self.tuning.slide_step_fraction)
    }

    /// Pins the window to the latest sample and resumes tail-following.
    pub fn jump_to_tail(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let state = self.pinned_to_tail(active.state.preset_index, active.bounds);
        self.replace_state(active, state)
    }

    /// Records a newly ingested sample timestamp.
    ///
    /// A live view advances to the new tail keeping its span; a view parked
    /// on history is never moved. Returns `true` when the window changed.
    pub fn on_new_sample(&mut self, timestamp: f64) -> bool {
        if !timestamp.is_finite() {
            warn!(timestamp, "ignoring non-finite sample timestamp");
            return false;
        }

        let Some(active) = self.active else {
            let requested = self.requested_span_seconds;
            return self
                .initialize(DataBounds::single(timestamp), requested)
                .is_some();
        };

        let previous_tail = active.bounds.max;
        let bounds = active.bounds.extend_to(timestamp);
        let state = active.state;
        self.active = Some(ActiveWindow { bounds, state });

        if timestamp <= previous_tail {
            return false;
        }
        if !state.follow_tail || (state.end - previous_tail).abs() > self.tuning.tail_tolerance_seconds
        {
            return false;
        }

        let next = self.pinned_to_tail(state.preset_index, bounds);
        trace!(tail = bounds.max, start = next.start, "window advanced to new tail");
        self.active = Some(ActiveWindow {
            bounds,
            state: next,
        });
        next != state
    }

    /// Replaces the known data bounds, e.g. after a retention purge.
    ///
    /// Tail-following views re-pin to the new tail; historical views are
    /// clamped into the new bounds.
    pub fn set_bounds(&mut self, bounds: Option<DataBounds>) -> bool {
        let Some(bounds) = bounds else {
            let had_data = self.active.is_some();
            self.active = None;
            return had_data;
        };
        let Some(active) = self.active else {
            let requested = self.requested_span_seconds;
            return self.initialize(Some(bounds), requested).is_some();
        };

        let state = active.state;
        let next = if state.follow_tail {
            self.pinned_to_tail(state.preset_index, bounds)
        } else {
            let (start, end) = clamp_window(state.start, state.end, bounds.min, bounds.max);
            WindowState {
                start,
                end,
                ..state
            }
        };
        let changed = next != state || bounds != active.bounds;
        self.active = Some(ActiveWindow {
            bounds,
            state: next,
        });
        changed
    }

    /// `true` while the view follows the tail and its end sits on it.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.active.is_some_and(|active| {
            active.state.follow_tail && self.is_at_tail(active.state.end, active.bounds)
        })
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationAvailability {
        let Some(active) = self.active else {
            return NavigationAvailability::default();
        };
        let state = active.state;
        let bounds = active.bounds;
        let span = self.presets.length_at(state.preset_index);

        NavigationAvailability {
            back: bounds.span() > span && state.start > bounds.min,
            forward: state.end < bounds.max,
            zoom_in: state.preset_index > 0,
            zoom_out: state.preset_index < self.presets.last_index(),
            jump_to_tail: !self.is_live(),
        }
    }

    fn zoom_to_preset(&mut self, target: usize) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let state = active.state;
        if target > self.presets.last_index() || target == state.preset_index {
            return false;
        }

        let bounds = active.bounds;
        let half = self.presets.length_at(target) / 2.0;
        let center = state.span().center();
        let (start, end) = clamp_window(center - half, center + half, bounds.min, bounds.max);
        let next = WindowState {
            preset_index: target,
            start,
            end,
            follow_tail: state.follow_tail && self.is_at_tail(end, bounds),
        };
        debug!(
            from = state.preset_index,
            to = target,
            center,
            follow_tail = next.follow_tail,
            "window zoomed"
        );
        self.replace_state(active, next)
    }

    fn pinned_to_tail(&self, preset_index: usize, bounds: DataBounds) -> WindowState {
        let span = self.presets.length_at(preset_index);
        let (start, end) = clamp_window(bounds.max - span, bounds.max, bounds.min, bounds.max);
        WindowState {
            preset_index,
            start,
            end,
            follow_tail: true,
        }
    }

    fn is_at_tail(&self, end: f64, bounds: DataBounds) -> bool {
        (bounds.max - end).abs() <= self.tuning.tail_tolerance_seconds
    }

    fn replace_state(&mut self, active: ActiveWindow, next: WindowState) -> bool {
        self.active = Some(ActiveWindow {
            bounds: active.bounds,
            state: next,
        });
        next != active.state
    }
}
