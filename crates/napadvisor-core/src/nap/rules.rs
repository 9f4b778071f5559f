//! Rule tables for the recommendation engine.
//!
//! Both tables are ordered and evaluated first-match-wins, so each band
//! boundary can be audited and tested on its own.

use serde::Serialize;

/// An age band and the base nap length it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBand {
    /// Display name of the group
    pub label: &'static str,
    /// Exclusive upper age bound; `None` for the open-ended last band
    pub below: Option<u32>,
    /// Base nap duration in minutes
    pub base_minutes: u32,
}

impl AgeBand {
    pub fn contains(&self, age: u32) -> bool {
        self.below.map_or(true, |below| age < below)
    }
}

pub const AGE_BANDS: [AgeBand; 7] = [
    AgeBand { label: "Infants", below: Some(2), base_minutes: 90 },
    AgeBand { label: "Toddlers", below: Some(5), base_minutes: 60 },
    AgeBand { label: "Children", below: Some(12), base_minutes: 45 },
    AgeBand { label: "Teens", below: Some(18), base_minutes: 30 },
    AgeBand { label: "Adults", below: Some(40), base_minutes: 20 },
    AgeBand { label: "Middle Age", below: Some(65), base_minutes: 25 },
    AgeBand { label: "Seniors", below: None, base_minutes: 30 },
];

/// First band containing `age`.
pub fn age_band(age: u32) -> &'static AgeBand {
    AGE_BANDS
        .iter()
        .find(|band| band.contains(age))
        .unwrap_or(&AGE_BANDS[AGE_BANDS.len() - 1])
}

/// Base nap duration in minutes for `age`.
pub fn base_duration(age: u32) -> u32 {
    age_band(age).base_minutes
}

/// Tiredness scaling as an integer percentage: 70% plus 6 points per level.
pub fn tiredness_percent(tiredness_level: u8) -> u32 {
    70 + 6 * u32::from(tiredness_level)
}

/// Tiredness scaling factor, `0.7 + level / 10 * 0.6`.
pub fn tiredness_factor(tiredness_level: u8) -> f64 {
    f64::from(tiredness_percent(tiredness_level)) / 100.0
}

/// `round(minutes * percent / 100)` with halves rounded up.
pub fn scale_minutes(minutes: u32, percent: u32) -> u32 {
    (minutes * percent + 50) / 100
}

/// Whether a window permits napping at all, and from which tiredness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum NapGate {
    MinTiredness(u8),
    Never,
}

/// When a window attaches its warning to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum WarningRule {
    None,
    WhenNapping(&'static str),
    Always(&'static str),
}

/// A half-open range of hours `[start, end)` with its decision rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NapWindow {
    pub name: &'static str,
    pub start: u8,
    pub end: u8,
    pub gate: NapGate,
    pub reason_nap: &'static str,
    pub reason_skip: &'static str,
    pub warning: WarningRule,
}

/// Outcome of applying a window's rule to a tiredness level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDecision {
    pub should_nap: bool,
    pub reason: &'static str,
    pub warning: Option<&'static str>,
}

impl NapWindow {
    pub fn contains(&self, hour: u8) -> bool {
        self.start <= hour && hour < self.end
    }

    pub fn decide(&self, tiredness_level: u8) -> WindowDecision {
        let should_nap = match self.gate {
            NapGate::MinTiredness(min) => tiredness_level >= min,
            NapGate::Never => false,
        };
        let warning = match self.warning {
            WarningRule::None => None,
            WarningRule::WhenNapping(text) => should_nap.then_some(text),
            WarningRule::Always(text) => Some(text),
        };
        WindowDecision {
            should_nap,
            reason: if should_nap { self.reason_nap } else { self.reason_skip },
            warning,
        }
    }
}

const TOO_LATE: &str = "Too late for a nap. It will interfere with your nighttime sleep. \
                        Consider going to bed earlier instead.";

pub const NAP_WINDOWS: [NapWindow; 4] = [
    NapWindow {
        name: "Early",
        start: 0,
        end: 11,
        gate: NapGate::MinTiredness(7),
        reason_nap: "You're very tired, but napping too early might affect your sleep schedule.",
        reason_skip: "It's too early for a nap. Try to power through or get some fresh air.",
        warning: WarningRule::WhenNapping("Keep nap under 20 minutes to avoid grogginess."),
    },
    NapWindow {
        name: "Optimal",
        start: 11,
        end: 15,
        gate: NapGate::MinTiredness(4),
        reason_nap: "Perfect time for a nap! You're in the optimal nap window.",
        reason_skip: "You're not tired enough to need a nap right now.",
        warning: WarningRule::None,
    },
    NapWindow {
        name: "Late Afternoon",
        start: 15,
        end: 17,
        gate: NapGate::MinTiredness(6),
        reason_nap: "You can nap, but keep it short to avoid interfering with nighttime sleep.",
        reason_skip: "Too late in the day for a nap unless you're very tired.",
        warning: WarningRule::Always("Keep it under 20 minutes to avoid sleep issues tonight."),
    },
    NapWindow {
        name: "Evening",
        start: 17,
        end: 24,
        gate: NapGate::Never,
        reason_nap: TOO_LATE,
        reason_skip: TOO_LATE,
        warning: WarningRule::Always("Napping now will likely cause insomnia."),
    },
];

/// Window containing `hour`.
pub fn nap_window(hour: u8) -> &'static NapWindow {
    NAP_WINDOWS
        .iter()
        .find(|window| window.contains(hour))
        .unwrap_or(&NAP_WINDOWS[NAP_WINDOWS.len() - 1])
}
