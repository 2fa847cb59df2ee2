//! Frame state enumeration and export file naming.

use crate::foundation::error::{GaugeError, GaugeResult};
use crate::preset::model::Preset;
use crate::preset::resolve::{continuous_states, segment_count};

/// Number of discrete states exported for `preset`. Always at least 1.
///
/// Segmented gauges export one state per segment plus an empty state when the base track is
/// shown; continuous gauges export the clamped `states` count.
pub fn effective_export_states(preset: &Preset) -> u32 {
    if preset.main.segmented {
        let segments = segment_count(preset.main.segments);
        (segments + u32::from(preset.base.enabled)).max(1)
    } else {
        continuous_states(preset.states)
    }
}

/// Progress value for state `index`.
///
/// Segmented: `index / segments`, so each state fills one more segment. Continuous:
/// `index / (total - 1)`, with a single-state export pinned at full.
pub fn progress_for_state(preset: &Preset, index: u32, total: u32) -> f64 {
    let v = if preset.main.segmented {
        let segments = segment_count(preset.main.segments).max(1);
        f64::from(index) / f64::from(segments)
    } else if total <= 1 {
        1.0
    } else {
        f64::from(index) / f64::from(total - 1)
    };
    v.clamp(0.0, 1.0)
}

/// Digits used for the state index in file names.
pub fn zero_pad_width(total: u32) -> usize {
    if total >= 100 { 3 } else { 2 }
}

/// Check that `prefix` names a file and not a path.
///
/// Archive entry names are built from the prefix, so separators and `..` are rejected.
pub fn validate_prefix(prefix: &str) -> GaugeResult<&str> {
    if prefix.contains(['/', '\\']) || prefix.contains("..") {
        return Err(GaugeError::validation(format!(
            "name prefix {prefix:?} must not contain '/', '\\' or '..'"
        )));
    }
    Ok(prefix)
}

/// `<prefix>_<zero-padded index>.png`.
pub fn state_file_name(prefix: &str, index: u32, total: u32) -> String {
    format!("{prefix}_{index:0width$}.png", width = zero_pad_width(total))
}

/// `<prefix>_states_<total>.zip`.
pub fn archive_file_name(prefix: &str, total: u32) -> String {
    format!("{prefix}_states_{total}.zip")
}

/// `<prefix>_single.png`.
pub fn single_file_name(prefix: &str) -> String {
    format!("{prefix}_single.png")
}
