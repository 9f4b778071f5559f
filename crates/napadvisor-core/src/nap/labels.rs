//! Human-readable labels for inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verbal description of a tiredness rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TirednessLabel {
    WideAwake,
    SlightlyTired,
    ModeratelyTired,
    VeryTired,
    Exhausted,
}

/// Inclusive upper level of each label, ascending.
const TIREDNESS_BANDS: [(u8, TirednessLabel); 4] = [
    (2, TirednessLabel::WideAwake),
    (4, TirednessLabel::SlightlyTired),
    (6, TirednessLabel::ModeratelyTired),
    (8, TirednessLabel::VeryTired),
];

impl TirednessLabel {
    pub fn for_level(level: u8) -> Self {
        TIREDNESS_BANDS
            .iter()
            .find(|(upper, _)| level <= *upper)
            .map_or(TirednessLabel::Exhausted, |(_, label)| *label)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TirednessLabel::WideAwake => "Wide Awake",
            TirednessLabel::SlightlyTired => "Slightly Tired",
            TirednessLabel::ModeratelyTired => "Moderately Tired",
            TirednessLabel::VeryTired => "Very Tired",
            TirednessLabel::Exhausted => "Exhausted",
        }
    }
}

impl fmt::Display for TirednessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 12-hour clock label for an hour of the day, e.g. `"12 AM"` or `"3 PM"`.
pub fn format_hour(hour: u8) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}
