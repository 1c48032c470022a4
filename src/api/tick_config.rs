use serde::{Deserialize, Serialize};
use tracing::warn;

/// Per-series minimum tick size, as configured by an administrator.
///
/// Non-positive, non-finite or unparseable sizes behave exactly like an
/// absent size: the axis falls back to automatic ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TickConfig {
    #[serde(default)]
    pub min_tick_size: Option<f64>,
}

impl TickConfig {
    #[must_use]
    pub fn new(min_tick_size: Option<f64>) -> Self {
        Self { min_tick_size }
    }

    #[must_use]
    pub fn with_min_tick(min_tick_size: f64) -> Self {
        Self::new(Some(min_tick_size))
    }

    /// Parses the raw text stored by the config store.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::default();
        }
        match text.parse::<f64>() {
            Ok(value) => Self::new(Some(value)),
            Err(err) => {
                warn!(input = text, error = %err, "unparseable min tick size, ignoring");
                Self::default()
            }
        }
    }

    /// The tick size when it is usable for enforcement.
    #[must_use]
    pub fn effective_min_tick(self) -> Option<f64> {
        self.min_tick_size
            .filter(|tick| tick.is_finite() && *tick > 0.0)
    }
}
