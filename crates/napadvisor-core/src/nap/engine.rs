//! Recommendation engine.
//!
//! A pure function from [`NapInput`] to [`NapRecommendation`]. [`evaluate`]
//! additionally records which rules fired so a result can be explained.

use serde::{Deserialize, Serialize};

use super::input::NapInput;
use super::rules::{self, AgeBand, NapWindow};

/// Durations above this fall into a full sleep cycle.
pub const SLEEP_CYCLE_MINUTES: u32 = 90;
/// Shortest nap worth recommending.
pub const MIN_NAP_MINUTES: u32 = 10;
/// Upper bound for a nap that stays out of deep sleep.
pub const DEEP_SLEEP_ONSET_MINUTES: u32 = 30;
/// Target length of a power nap.
pub const POWER_NAP_MINUTES: u32 = 20;
/// Ceiling for a late-afternoon power nap.
pub const POWER_NAP_CEILING_MINUTES: u32 = 25;
/// From this hour on, naps are cut down to power naps.
pub const POWER_NAP_FROM_HOUR: u8 = 15;
/// Tiredness at which children and seniors may take a full cycle.
pub const EXTENDED_ALLOWANCE_TIREDNESS: u8 = 7;

/// Structured nap advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NapRecommendation {
    pub should_nap: bool,
    pub recommended_duration: u32,
    pub min_duration: u32,
    pub max_duration: u32,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warning: Option<String>,
}

/// Range adjustments, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeAdjustment {
    /// Maximum capped at one sleep cycle.
    SleepInertiaCap,
    /// Late-afternoon nap cut to a power nap.
    PowerNap,
    /// Adolescent/adult nap kept out of deep sleep.
    DeepSleepAvoidance,
    /// Tired children and seniors allowed a full cycle.
    ExtendedAllowance,
    /// Range repaired so that `min <= recommended <= max`.
    Reconciled,
}

impl RangeAdjustment {
    pub fn description(&self) -> &'static str {
        match self {
            RangeAdjustment::SleepInertiaCap => "maximum capped at a 90-minute sleep cycle",
            RangeAdjustment::PowerNap => "late afternoon: cut to a 20-minute power nap, max 25",
            RangeAdjustment::DeepSleepAvoidance => {
                "kept under 30 minutes to avoid deep sleep inertia"
            }
            RangeAdjustment::ExtendedAllowance => "very tired child or senior: up to a full cycle",
            RangeAdjustment::Reconciled => "range reordered so minimum <= recommended <= maximum",
        }
    }
}

/// Raw duration triple before reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationRange {
    pub recommended: u32,
    pub min: u32,
    pub max: u32,
}

impl DurationRange {
    pub fn is_ordered(&self) -> bool {
        self.min <= self.recommended && self.recommended <= self.max
    }
}

/// A recommendation with the intermediate values that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NapEvaluation {
    pub input: NapInput,
    pub age_band: &'static AgeBand,
    pub window: &'static NapWindow,
    pub tiredness_factor: f64,
    pub adjusted_duration: u32,
    /// Range as produced by the rule cascade, before reconciliation.
    pub raw_range: DurationRange,
    pub adjustments: Vec<RangeAdjustment>,
    pub recommendation: NapRecommendation,
}

/// Compute a recommendation.
pub fn recommend(input: &NapInput) -> NapRecommendation {
    evaluate(input).recommendation
}

/// Compute a recommendation and keep the rule trace.
pub fn evaluate(input: &NapInput) -> NapEvaluation {
    let hour = input.current_hour();
    let tiredness = input.tiredness_level();
    let age = input.age();

    let age_band = rules::age_band(age);
    let percent = rules::tiredness_percent(tiredness);
    let adjusted = rules::scale_minutes(age_band.base_minutes, percent);

    let window = rules::nap_window(hour);
    let decision = window.decide(tiredness);

    let mut adjustments = Vec::new();
    let mut range = DurationRange {
        recommended: adjusted,
        min: rules::scale_minutes(adjusted, 70).max(MIN_NAP_MINUTES),
        max: rules::scale_minutes(adjusted, 150),
    };

    if range.max > SLEEP_CYCLE_MINUTES {
        range.max = SLEEP_CYCLE_MINUTES;
        adjustments.push(RangeAdjustment::SleepInertiaCap);
    }

    if hour >= POWER_NAP_FROM_HOUR && decision.should_nap {
        range.recommended = range.recommended.min(POWER_NAP_MINUTES);
        range.max = POWER_NAP_CEILING_MINUTES;
        adjustments.push(RangeAdjustment::PowerNap);
    }

    let adolescent_or_adult = (12..65).contains(&age);
    if adolescent_or_adult
        && range.recommended > DEEP_SLEEP_ONSET_MINUTES
        && range.recommended < SLEEP_CYCLE_MINUTES
    {
        range.max = DEEP_SLEEP_ONSET_MINUTES;
        range.recommended = POWER_NAP_MINUTES;
        adjustments.push(RangeAdjustment::DeepSleepAvoidance);
    }

    if !adolescent_or_adult && tiredness >= EXTENDED_ALLOWANCE_TIREDNESS {
        range.max = SLEEP_CYCLE_MINUTES;
        adjustments.push(RangeAdjustment::ExtendedAllowance);
    }

    let raw_range = range;
    if !range.is_ordered() {
        range.recommended = range.recommended.min(range.max);
        range.min = range.min.min(range.recommended);
        adjustments.push(RangeAdjustment::Reconciled);
    }

    tracing::debug!(
        hour,
        tiredness,
        age,
        band = age_band.label,
        window = window.name,
        adjusted,
        should_nap = decision.should_nap,
        recommended = range.recommended,
        min = range.min,
        max = range.max,
        "evaluated nap recommendation"
    );

    NapEvaluation {
        input: *input,
        age_band,
        window,
        tiredness_factor: rules::tiredness_factor(tiredness),
        adjusted_duration: adjusted,
        raw_range,
        adjustments,
        recommendation: NapRecommendation {
            should_nap: decision.should_nap,
            recommended_duration: range.recommended,
            min_duration: range.min,
            max_duration: range.max,
            reason: decision.reason.to_string(),
            warning: decision.warning.map(str::to_string),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(hour: i64, tiredness: i64, age: i64) -> NapInput {
        NapInput::new(hour, tiredness, age).unwrap()
    }

    #[test]
    fn scenario_optimal_window_adult() {
        let eval = evaluate(&input(12, 5, 25));
        assert_eq!(eval.age_band.base_minutes, 20);
        assert!((eval.tiredness_factor - 1.0).abs() < 1e-9);

        let rec = eval.recommendation;
        assert!(rec.should_nap);
        assert_eq!(rec.recommended_duration, 20);
        assert_eq!(rec.min_duration, 14);
        assert_eq!(rec.max_duration, 30);
        assert!(rec.reason.contains("optimal"));
        assert!(rec.warning.is_none());
    }

    #[test]
    fn scenario_late_afternoon_power_nap() {
        let rec = recommend(&input(16, 7, 30));
        assert!(rec.should_nap);
        assert_eq!(rec.recommended_duration, 20);
        assert_eq!(rec.max_duration, 25);
        assert_eq!(rec.min_duration, 15);
        assert!(rec.warning.is_some());
    }

    #[test]
    fn scenario_too_early() {
        let rec = recommend(&input(9, 3, 25));
        assert!(!rec.should_nap);
        assert!(rec.reason.contains("too early"));
        assert!(rec.warning.is_none());
    }

    #[test]
    fn scenario_evening_is_always_no() {
        let rec = recommend(&input(20, 9, 25));
        assert!(!rec.should_nap);
        assert!(rec.warning.unwrap().contains("insomnia"));
    }

    #[test]
    fn scenario_senior_extended_allowance() {
        let eval = evaluate(&input(13, 8, 70));
        assert_eq!(eval.age_band.base_minutes, 30);
        assert_eq!(eval.adjusted_duration, 35);
        let rec = &eval.recommendation;
        assert!(rec.should_nap);
        assert_eq!(rec.recommended_duration, 35);
        assert_eq!(rec.min_duration, 25);
        assert_eq!(rec.max_duration, 90);
        assert_eq!(eval.adjustments, vec![RangeAdjustment::ExtendedAllowance]);
    }

    #[test]
    fn power_nap_only_when_napping() {
        let eval = evaluate(&input(16, 5, 30));
        assert!(!eval.recommendation.should_nap);
        assert!(!eval.adjustments.contains(&RangeAdjustment::PowerNap));
    }

    #[test]
    fn early_tired_nap_carries_warning() {
        let rec = recommend(&input(8, 7, 25));
        assert!(rec.should_nap);
        assert!(rec.warning.unwrap().contains("20 minutes"));
    }

    #[test]
    fn teen_at_full_tiredness_is_reconciled() {
        // Cascade: adjusted 39, min 27, max 59 -> deep-sleep cap leaves 20 < 27.
        let eval = evaluate(&input(12, 10, 15));
        assert_eq!(
            eval.raw_range,
            DurationRange { recommended: 20, min: 27, max: 30 }
        );
        assert_eq!(
            eval.adjustments,
            vec![RangeAdjustment::DeepSleepAvoidance, RangeAdjustment::Reconciled]
        );
        let rec = eval.recommendation;
        assert_eq!(
            (rec.min_duration, rec.recommended_duration, rec.max_duration),
            (20, 20, 30)
        );
    }

    #[test]
    fn infant_at_full_tiredness_is_reconciled() {
        // Cascade: adjusted 117 exceeds the 90-minute cycle cap.
        let eval = evaluate(&input(12, 10, 1));
        assert_eq!(
            eval.raw_range,
            DurationRange { recommended: 117, min: 82, max: 90 }
        );
        assert_eq!(
            eval.adjustments,
            vec![
                RangeAdjustment::SleepInertiaCap,
                RangeAdjustment::ExtendedAllowance,
                RangeAdjustment::Reconciled,
            ]
        );
        let rec = eval.recommendation;
        assert_eq!(
            (rec.min_duration, rec.recommended_duration, rec.max_duration),
            (82, 90, 90)
        );
    }

    #[test]
    fn infant_power_nap_is_reconciled() {
        // Cascade: adjusted 95, min 67, power nap cuts recommended to 20.
        let eval = evaluate(&input(15, 6, 1));
        assert_eq!(
            eval.raw_range,
            DurationRange { recommended: 20, min: 67, max: 25 }
        );
        let rec = eval.recommendation;
        assert_eq!(
            (rec.min_duration, rec.recommended_duration, rec.max_duration),
            (20, 20, 25)
        );
    }

    #[test]
    fn ordered_ranges_are_not_reconciled() {
        let eval = evaluate(&input(12, 5, 25));
        assert_eq!(eval.raw_range.recommended, eval.recommendation.recommended_duration);
        assert!(!eval.adjustments.contains(&RangeAdjustment::Reconciled));
    }

    #[test]
    fn invariant_holds_across_whole_domain() {
        for hour in 0..=23 {
            for tiredness in 1..=10 {
                for age in 0..=120 {
                    let rec = recommend(&input(hour, tiredness, age));
                    assert!(
                        rec.min_duration <= rec.recommended_duration
                            && rec.recommended_duration <= rec.max_duration,
                        "hour {hour} tiredness {tiredness} age {age}: {rec:?}"
                    );
                    assert!(rec.min_duration >= MIN_NAP_MINUTES.min(rec.recommended_duration));
                    assert!(rec.max_duration <= SLEEP_CYCLE_MINUTES);
                }
            }
        }
    }

    #[test]
    fn recommendation_serializes_camel_case() {
        let json = serde_json::to_value(recommend(&input(12, 5, 25))).unwrap();
        assert_eq!(json["shouldNap"], true);
        assert_eq!(json["recommendedDuration"], 20);
        assert_eq!(json["minDuration"], 14);
        assert_eq!(json["maxDuration"], 30);
        assert!(json.get("warning").is_none());
    }

    proptest! {
        #[test]
        fn recommend_is_idempotent(hour in 0i64..24, tiredness in 1i64..=10, age in 0i64..=120) {
            let nap = input(hour, tiredness, age);
            let first = recommend(&nap);
            let second = recommend(&nap);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }

        #[test]
        fn evening_never_recommends_a_nap(hour in 17i64..24, tiredness in 1i64..=10, age in 0i64..=120) {
            let rec = recommend(&input(hour, tiredness, age));
            prop_assert!(!rec.should_nap);
            prop_assert!(rec.warning.is_some());
        }
    }
}
