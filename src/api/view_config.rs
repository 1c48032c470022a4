use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_SLIDE_STEP_FRACTION, DEFAULT_SPAN_PRESET_INDEX, DEFAULT_SPAN_PRESETS_SECONDS,
    DEFAULT_TAIL_TOLERANCE_SECONDS, SpanPresets, WindowController, WindowTuning,
};
use crate::error::{ViewError, ViewResult};

/// View bootstrap configuration.
///
/// Serializable so hosts can keep view setup next to their other settings
/// without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_span_presets_seconds")]
    pub span_presets_seconds: Vec<u64>,
    #[serde(default = "default_preset_index")]
    pub default_preset_index: usize,
    #[serde(default = "default_tail_tolerance_seconds")]
    pub tail_tolerance_seconds: f64,
    #[serde(default = "default_slide_step_fraction")]
    pub slide_step_fraction: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            span_presets_seconds: default_span_presets_seconds(),
            default_preset_index: default_preset_index(),
            tail_tolerance_seconds: default_tail_tolerance_seconds(),
            slide_step_fraction: default_slide_step_fraction(),
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn with_span_presets(mut self, seconds: Vec<u64>, default_index: usize) -> Self {
        self.span_presets_seconds = seconds;
        self.default_preset_index = default_index;
        self
    }

    #[must_use]
    pub fn with_tail_tolerance_seconds(mut self, seconds: f64) -> Self {
        self.tail_tolerance_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_slide_step_fraction(mut self, fraction: f64) -> Self {
        self.slide_step_fraction = fraction;
        self
    }

    pub fn span_presets(&self) -> ViewResult<SpanPresets> {
        SpanPresets::new(&self.span_presets_seconds, self.default_preset_index)
    }

    pub fn window_tuning(&self) -> ViewResult<WindowTuning> {
        WindowTuning {
            tail_tolerance_seconds: self.tail_tolerance_seconds,
            slide_step_fraction: self.slide_step_fraction,
        }
        .validate()
    }

    pub fn validate(&self) -> ViewResult<()> {
        self.span_presets()?;
        self.window_tuning()?;
        Ok(())
    }

    /// Builds an empty controller for one view.
    pub fn build_controller(&self) -> ViewResult<WindowController> {
        WindowController::new(self.span_presets()?, self.window_tuning()?)
    }

    pub fn from_json_str(input: &str) -> ViewResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ViewError::InvalidConfig(format!("failed to parse view config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ViewResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ViewError::InvalidConfig(format!("failed to serialize view config: {e}"))
        })
    }
}

fn default_span_presets_seconds() -> Vec<u64> {
    DEFAULT_SPAN_PRESETS_SECONDS.to_vec()
}

fn default_preset_index() -> usize {
    DEFAULT_SPAN_PRESET_INDEX
}

fn default_tail_tolerance_seconds() -> f64 {
    DEFAULT_TAIL_TOLERANCE_SECONDS
}

fn default_slide_step_fraction() -> f64 {
    DEFAULT_SLIDE_STEP_FRACTION
}
