pub mod primitives;
pub mod span_preset;
pub mod types;
pub mod window;
pub mod windowing;

pub use span_preset::{
    DEFAULT_SPAN_PRESET_INDEX, DEFAULT_SPAN_PRESETS_SECONDS, SpanPreset, SpanPresets,
    format_span_seconds,
};
pub use types::{DataBounds, Sample, TimeSpan, ValueExtent};
pub use window::{
    DEFAULT_SLIDE_STEP_FRACTION, DEFAULT_TAIL_TOLERANCE_SECONDS, NavigationAvailability,
    WindowController, WindowState, WindowTuning, clamp_window,
};
pub use windowing::ordered_samples_in_window;
