use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{DataBounds, Sample, TimeSpan, ordered_samples_in_window};
use crate::error::ViewResult;

use super::TickConfig;

/// Read access to stored samples, keyed by series (topic) name.
pub trait SeriesSource {
    /// Earliest and latest stored timestamps, `None` when the series is empty.
    fn bounds(&self, series: &str) -> ViewResult<Option<DataBounds>>;

    /// Samples inside `window`, ordered by timestamp.
    fn samples(&self, series: &str, window: TimeSpan) -> ViewResult<Vec<Sample>>;
}

/// Read access to per-series display metadata.
pub trait SeriesConfigSource {
    fn tick_config(&self, series: &str) -> TickConfig;

    /// Unit tag exactly as configured, known to [`super::UnitTag`] or not.
    fn unit_tag(&self, series: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
struct SeriesEntry {
    samples: Vec<Sample>,
    tick_config: TickConfig,
    unit_tag: Option<String>,
}

/// In-memory series store implementing both source traits.
///
/// Samples are kept ordered by timestamp; series keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySeriesStore {
    series: IndexMap<String, SeriesEntry>,
}

impl MemorySeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    #[must_use]
    pub fn sample_count(&self, series: &str) -> usize {
        self.series
            .get(series)
            .map_or(0, |entry| entry.samples.len())
    }

    /// Replaces a series' samples, dropping non-finite timestamps.
    pub fn set_samples(&mut self, series: impl Into<String>, samples: Vec<Sample>) {
        let series = series.into();
        let original_count = samples.len();
        let mut samples: Vec<Sample> = samples
            .into_iter()
            .filter(|sample| sample.timestamp.is_finite())
            .collect();
        samples.sort_by(|left, right| left.timestamp.total_cmp(&right.timestamp));
        debug!(
            series = %series,
            original_count,
            stored_count = samples.len(),
            "set series samples"
        );
        self.series.entry(series).or_default().samples = samples;
    }

    /// Stores one sample; returns `false` when its timestamp is not finite.
    pub fn push_sample(&mut self, series: impl Into<String>, sample: Sample) -> bool {
        let series = series.into();
        if !sample.timestamp.is_finite() {
            warn!(series = %series, "dropping sample with non-finite timestamp");
            return false;
        }

        let samples = &mut self.series.entry(series).or_default().samples;
        let out_of_order = samples
            .last()
            .is_some_and(|last| sample.timestamp < last.timestamp);
        if out_of_order {
            let index = samples.partition_point(|s| s.timestamp <= sample.timestamp);
            samples.insert(index, sample);
        } else {
            samples.push(sample);
        }
        true
    }

    pub fn set_tick_config(&mut self, series: impl Into<String>, tick_config: TickConfig) {
        self.series.entry(series.into()).or_default().tick_config = tick_config;
    }

    pub fn set_unit_tag(&mut self, series: impl Into<String>, tag: Option<&str>) {
        self.series.entry(series.into()).or_default().unit_tag = tag.map(str::to_owned);
    }

    /// Drops samples older than `cutoff`, mirroring a retention purge.
    pub fn purge_before(&mut self, series: &str, cutoff: f64) -> usize {
        let Some(entry) = self.series.get_mut(series) else {
            return 0;
        };
        let removed = entry
            .samples
            .partition_point(|sample| sample.timestamp < cutoff);
        entry.samples.drain(..removed);
        removed
    }
}

impl SeriesSource for MemorySeriesStore {
    fn bounds(&self, series: &str) -> ViewResult<Option<DataBounds>> {
        let Some(entry) = self.series.get(series) else {
            return Ok(None);
        };
        Ok(match (entry.samples.first(), entry.samples.last()) {
            (Some(first), Some(last)) => DataBounds::new(first.timestamp, last.timestamp),
            _ => None,
        })
    }

    fn samples(&self, series: &str, window: TimeSpan) -> ViewResult<Vec<Sample>> {
        Ok(self
            .series
            .get(series)
            .map(|entry| ordered_samples_in_window(&entry.samples, window).to_vec())
            .unwrap_or_default())
    }
}

impl SeriesConfigSource for MemorySeriesStore {
    fn tick_config(&self, series: &str) -> TickConfig {
        self.series
            .get(series)
            .map(|entry| entry.tick_config)
            .unwrap_or_default()
    }

    fn unit_tag(&self, series: &str) -> Option<String> {
        self.series
            .get(series)
            .and_then(|entry| entry.unit_tag.clone())
    }
}
