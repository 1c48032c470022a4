use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    DataBounds, NavigationAvailability, Sample, SpanPreset, TimeSpan, ValueExtent,
    WindowController,
};
use crate::error::ViewResult;

use super::{
    AxisPlan, SeriesConfigSource, SeriesSource, UnitTag, ViewConfig, combined_axis_plan,
    extent_axis_plan, resolve_unit_label, tick_labels,
};

/// Samples loaded for one series of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub series: String,
    pub samples: Vec<Sample>,
    pub extent: Option<ValueExtent>,
}

/// Everything the renderer needs to draw the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    pub window: TimeSpan,
    pub preset: SpanPreset,
    pub live: bool,
    pub navigation: NavigationAvailability,
    pub series: Vec<SeriesFrame>,
    /// `None` keeps the renderer's automatic ticks.
    pub axis: Option<AxisPlan>,
    pub unit_label: String,
    pub tick_labels: Vec<String>,
}

/// Navigation state of one chart surface over one or more series.
///
/// Series listed together share one value axis.
#[derive(Debug, Clone)]
pub struct ViewSession {
    series: SmallVec<[String; 2]>,
    controller: WindowController,
}

impl ViewSession {
    /// Opens a view over the union of the series' bounds.
    pub fn open<S, I, K>(
        source: &S,
        series: I,
        config: &ViewConfig,
        requested_span_seconds: Option<f64>,
    ) -> ViewResult<Self>
    where
        S: SeriesSource + ?Sized,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let series: SmallVec<[String; 2]> = series.into_iter().map(Into::into).collect();
        let mut controller = config.build_controller()?;
        let bounds = union_bounds(source, &series)?;
        controller.initialize(bounds, requested_span_seconds);
        debug!(
            series_count = series.len(),
            has_data = bounds.is_some(),
            "view session opened"
        );
        Ok(Self { series, controller })
    }

    #[must_use]
    pub fn series(&self) -> &[String] {
        &self.series
    }

    #[must_use]
    pub fn controller(&self) -> &WindowController {
        &self.controller
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.controller.is_live()
    }

    pub fn zoom_in(&mut self) -> bool {
        self.controller.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.controller.zoom_out()
    }

    pub fn back(&mut self) -> bool {
        self.controller.back()
    }

    pub fn forward(&mut self) -> bool {
        self.controller.forward()
    }

    pub fn jump_to_tail(&mut self) -> bool {
        self.controller.jump_to_tail()
    }

    pub fn select_preset(&mut self, index: usize) -> bool {
        self.controller.select_preset(index)
    }

    /// Forwards an ingested timestamp; samples for other series are ignored.
    pub fn on_new_sample(&mut self, series: &str, timestamp: f64) -> bool {
        if !self.series.iter().any(|name| name == series) {
            return false;
        }
        self.controller.on_new_sample(timestamp)
    }

    /// Re-reads bounds from `source`, e.g. after a retention purge.
    pub fn refresh_bounds<S>(&mut self, source: &S) -> ViewResult<bool>
    where
        S: SeriesSource + ?Sized,
    {
        let bounds = union_bounds(source, &self.series)?;
        Ok(self.controller.set_bounds(bounds))
    }

    /// Loads the current window and plans its value axis.
    ///
    /// Returns `None` while no data exists for any series.
    pub fn frame<S, C>(&self, source: &S, config: &C) -> ViewResult<Option<ViewFrame>>
    where
        S: SeriesSource + ?Sized,
        C: SeriesConfigSource + ?Sized,
    {
        let (Some(window), Some(preset)) = (self.controller.window(), self.controller.preset())
        else {
            return Ok(None);
        };

        let mut frames = Vec::with_capacity(self.series.len());
        for series in &self.series {
            let samples = source.samples(series, window)?;
            let extent = ValueExtent::from_samples(&samples);
            frames.push(SeriesFrame {
                series: series.clone(),
                samples,
                extent,
            });
        }

        let axis = self.plan_axis(&frames, config);
        let unit_tag = self.series.iter().find_map(|series| {
            config
                .unit_tag(series)
                .filter(|tag| !tag.trim().is_empty())
        });
        let unit_label = resolve_unit_label(unit_tag.as_deref());
        let unit = unit_tag.as_deref().and_then(UnitTag::from_tag);
        let labels = axis
            .map(|plan| tick_labels(plan, unit))
            .unwrap_or_default();

        debug!(
            start = window.start(),
            end = window.end(),
            enforced_ticks = axis.is_some(),
            "view frame built"
        );
        Ok(Some(ViewFrame {
            window,
            preset,
            live: self.controller.is_live(),
            navigation: self.controller.navigation(),
            series: frames,
            axis,
            unit_label,
            tick_labels: labels,
        }))
    }

    fn plan_axis<C>(&self, frames: &[SeriesFrame], config: &C) -> Option<AxisPlan>
    where
        C: SeriesConfigSource + ?Sized,
    {
        if let [frame] = frames {
            let tick = config.tick_config(&frame.series).effective_min_tick();
            return extent_axis_plan(tick, frame.extent?);
        }

        let ticks: SmallVec<[f64; 4]> = frames
            .iter()
            .filter_map(|frame| config.tick_config(&frame.series).effective_min_tick())
            .collect();
        let extents: SmallVec<[ValueExtent; 4]> =
            frames.iter().filter_map(|frame| frame.extent).collect();
        combined_axis_plan(&ticks, &extents)
    }
}

fn union_bounds<S>(source: &S, series: &[String]) -> ViewResult<Option<DataBounds>>
where
    S: SeriesSource + ?Sized,
{
    let mut bounds = Vec::with_capacity(series.len());
    for name in series {
        bounds.push(source.bounds(name)?);
    }
    Ok(DataBounds::union_all(bounds))
}
