use crate::core::{Sample, TimeSpan};

/// Inclusive slice of timestamp-ordered samples inside `window`.
#[must_use]
pub fn ordered_samples_in_window(samples: &[Sample], window: TimeSpan) -> &[Sample] {
    let first = samples.partition_point(|sample| sample.timestamp < window.start());
    let last = samples.partition_point(|sample| sample.timestamp <= window.end());
    &samples[first..last.max(first)]
}
