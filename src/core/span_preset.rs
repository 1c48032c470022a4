use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

pub const HOUR_SECONDS: u64 = 3_600;
pub const DAY_SECONDS: u64 = 24 * HOUR_SECONDS;
pub const WEEK_SECONDS: u64 = 7 * DAY_SECONDS;

/// Default preset ladder: 2h, 4h, 8h, 12h, 1d, 3d, 5d, 1w, 2w, 4w.
pub const DEFAULT_SPAN_PRESETS_SECONDS: [u64; 10] = [
    2 * HOUR_SECONDS,
    4 * HOUR_SECONDS,
    8 * HOUR_SECONDS,
    12 * HOUR_SECONDS,
    DAY_SECONDS,
    3 * DAY_SECONDS,
    5 * DAY_SECONDS,
    WEEK_SECONDS,
    2 * WEEK_SECONDS,
    4 * WEEK_SECONDS,
];

/// Index of the preset a freshly opened view starts with (4 hours).
pub const DEFAULT_SPAN_PRESET_INDEX: usize = 1;

/// One supported window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanPreset {
    seconds: u64,
}

impl SpanPreset {
    #[must_use]
    pub fn seconds(self) -> u64 {
        self.seconds
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.seconds as f64
    }

    #[must_use]
    pub fn label(self) -> String {
        format_span_seconds(self.seconds)
    }
}

/// Ascending, immutable sequence of span presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanPresets {
    presets: Vec<SpanPreset>,
    default_index: usize,
}

impl Default for SpanPresets {
    fn default() -> Self {
        Self {
            presets: DEFAULT_SPAN_PRESETS_SECONDS
                .iter()
                .map(|&seconds| SpanPreset { seconds })
                .collect(),
            default_index: DEFAULT_SPAN_PRESET_INDEX,
        }
    }
}

impl SpanPresets {
    pub fn new(seconds: &[u64], default_index: usize) -> ViewResult<Self> {
        if seconds.is_empty() {
            return Err(ViewError::InvalidPresets(
                "preset sequence must not be empty".to_owned(),
            ));
        }
        if seconds.contains(&0) {
            return Err(ViewError::InvalidPresets(
                "preset lengths must be > 0".to_owned(),
            ));
        }
        if seconds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ViewError::InvalidPresets(
                "preset lengths must be strictly ascending".to_owned(),
            ));
        }
        if default_index >= seconds.len() {
            return Err(ViewError::InvalidPresets(format!(
                "default preset index {default_index} out of range for {} presets",
                seconds.len()
            )));
        }

        Ok(Self {
            presets: seconds.iter().map(|&seconds| SpanPreset { seconds }).collect(),
            default_index,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<SpanPreset> {
        self.presets.get(index).copied()
    }

    #[must_use]
    pub fn default_index(&self) -> usize {
        self.default_index
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.presets.len() - 1
    }

    /// Length of preset `index` in seconds, saturating at the last preset.
    #[must_use]
    pub fn length_at(&self, index: usize) -> f64 {
        self.presets[index.min(self.last_index())].length()
    }

    pub fn iter(&self) -> impl Iterator<Item = SpanPreset> + '_ {
        self.presets.iter().copied()
    }

    /// Snaps an arbitrary span to the closest preset index.
    ///
    /// Ties resolve to the shorter preset. Non-finite or non-positive
    /// requests fall back to the default index.
    #[must_use]
    pub fn nearest_index(&self, seconds: f64) -> usize {
        if !seconds.is_finite() || seconds <= 0.0 {
            return self.default_index;
        }

        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (index, preset) in self.presets.iter().enumerate() {
            let distance = (preset.length() - seconds).abs();
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }
}

/// Renders a duration using the largest unit that divides it exactly.
///
/// `7200 -> "2h"`, `86400 -> "1d"`, `5400 -> "90m"`, `45 -> "45s"`.
#[must_use]
pub fn format_span_seconds(seconds: u64) -> String {
    const UNITS: [(u64, &str); 4] = [
        (WEEK_SECONDS, "w"),
        (DAY_SECONDS, "d"),
        (HOUR_SECONDS, "h"),
        (60, "m"),
    ];

    if seconds == 0 {
        return "0s".to_owned();
    }
    for (unit, suffix) in UNITS {
        if seconds % unit == 0 {
            return format!("{}{suffix}", seconds / unit);
        }
    }
    format!("{seconds}s")
}
