//! mqttplot-view: time-window navigation and axis tick alignment.
//!
//! The crate holds the view logic behind MQTT time-series charts: a clamped,
//! tail-following time window stepped through span presets, and fixed-spacing
//! value axes aligned to configured minimum tick sizes. It performs no I/O;
//! hosts supply data through [`api::SeriesSource`] and render the resulting
//! [`api::ViewFrame`].

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AxisPlan, ViewConfig, ViewSession};
pub use crate::core::{WindowController, WindowState};
pub use error::{ViewError, ViewResult};
