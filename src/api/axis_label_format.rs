use serde::{Deserialize, Serialize};

use super::AxisPlan;

pub const DEFAULT_VALUE_LABEL: &str = "Value";
pub const INCHES_PER_METER: f64 = 39.370_078_7;

/// Unit tag attached to a series by the config store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitTag {
    DistanceM,
    DistanceFtIn,
    DistanceFt,
    DistanceIn,
    TempC,
    TempF,
    HumidityPct,
    PressureHpa,
    VoltageV,
    CurrentA,
    PowerW,
    Other,
}

impl UnitTag {
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let unit = match tag.trim() {
            "distance_m" => Self::DistanceM,
            "distance_ft_in" => Self::DistanceFtIn,
            "distance_ft" => Self::DistanceFt,
            "distance_in" => Self::DistanceIn,
            "temp_c" => Self::TempC,
            "temp_f" => Self::TempF,
            "humidity_pct" => Self::HumidityPct,
            "pressure_hpa" => Self::PressureHpa,
            "voltage_v" => Self::VoltageV,
            "current_a" => Self::CurrentA,
            "power_w" => Self::PowerW,
            "other" => Self::Other,
            _ => return None,
        };
        Some(unit)
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::DistanceM => "distance_m",
            Self::DistanceFtIn => "distance_ft_in",
            Self::DistanceFt => "distance_ft",
            Self::DistanceIn => "distance_in",
            Self::TempC => "temp_c",
            Self::TempF => "temp_f",
            Self::HumidityPct => "humidity_pct",
            Self::PressureHpa => "pressure_hpa",
            Self::VoltageV => "voltage_v",
            Self::CurrentA => "current_a",
            Self::PowerW => "power_w",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DistanceM => "Distance (m)",
            Self::DistanceFtIn => "Distance (ft/in)",
            Self::DistanceFt => "Distance (ft)",
            Self::DistanceIn => "Distance (in)",
            Self::TempC => "Temperature (°C)",
            Self::TempF => "Temperature (°F)",
            Self::HumidityPct => "Humidity (%)",
            Self::PressureHpa => "Pressure (hPa)",
            Self::VoltageV => "Voltage (V)",
            Self::CurrentA => "Current (A)",
            Self::PowerW => "Power (W)",
            Self::Other => DEFAULT_VALUE_LABEL,
        }
    }

    /// Values are stored in meters but labelled as feet and inches.
    #[must_use]
    pub fn uses_feet_inches_labels(self) -> bool {
        matches!(self, Self::DistanceFtIn)
    }
}

/// Axis title for a configured unit tag.
///
/// Known tags map to their label, unknown tags are shown as-is, and an
/// absent or blank tag shows `"Value"`.
#[must_use]
pub fn resolve_unit_label(tag: Option<&str>) -> String {
    let Some(tag) = tag.map(str::trim).filter(|tag| !tag.is_empty()) else {
        return DEFAULT_VALUE_LABEL.to_owned();
    };
    match UnitTag::from_tag(tag) {
        Some(unit) => unit.label().to_owned(),
        None => tag.to_owned(),
    }
}

/// Renders a meter value as `F' I"`, rounded to the nearest inch.
#[must_use]
pub fn format_feet_inches(meters: f64) -> String {
    if !meters.is_finite() {
        return "nan".to_owned();
    }
    let total_inches = (meters * INCHES_PER_METER).round() as i64;
    let feet = total_inches.div_euclid(12);
    let inches = total_inches - feet * 12;
    format!("{feet}' {inches}\"")
}

/// Formats a tick value with fixed precision, never printing `-0`.
#[must_use]
pub fn format_tick_value(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let precision = decimals as usize;
    let text = format!("{value:.precision$}");
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_owned(),
        _ => text,
    }
}

/// Labels for every gridline of `plan`.
#[must_use]
pub fn tick_labels(plan: AxisPlan, unit: Option<UnitTag>) -> Vec<String> {
    let feet_inches = unit.is_some_and(UnitTag::uses_feet_inches_labels);
    plan.tick_values()
        .into_iter()
        .map(|value| {
            if feet_inches {
                format_feet_inches(value)
            } else {
                format_tick_value(value, plan.tick_decimals)
            }
        })
        .collect()
}
