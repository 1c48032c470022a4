mod axis_label_format;
mod axis_plan;
mod series_source;
mod tick_config;
mod view_config;
mod view_session;

pub use axis_label_format::{
    DEFAULT_VALUE_LABEL, INCHES_PER_METER, UnitTag, format_feet_inches, format_tick_value,
    resolve_unit_label, tick_labels,
};
pub use axis_plan::{
    AxisPlan, MAX_AXIS_INTERVALS, MAX_TICK_DECIMALS, combined_axis_plan, combined_tick,
    extent_axis_plan, single_axis_plan, tick_decimals_for,
};
pub use series_source::{MemorySeriesStore, SeriesConfigSource, SeriesSource};
pub use tick_config::TickConfig;
pub use view_config::ViewConfig;
pub use view_session::{SeriesFrame, ViewFrame, ViewSession};
