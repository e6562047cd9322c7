use std::fmt;
use serde::{Deserialize, Serialize};
use crate::indicators::IndicatorLine;
use crate::windows::DayWindows;

/// Severity of the worst chance of rain, in ascending order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityLevel {
    None,
    Low,
    Medium,
    High,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeverityLevel::None   => write!(f, "None  "),
            SeverityLevel::Low    => write!(f, "Low   "),
            SeverityLevel::Medium => write!(f, "Medium"),
            SeverityLevel::High   => write!(f, "High  "),
        }
    }
}

/// Inclusive upper bounds for each severity level below `High`.
///
/// Anything above `medium` is `High`, with no upper limit.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct SeverityThresholds {
    pub none: f64,
    pub low: f64,
    pub medium: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        SeverityThresholds { none: 0.05, low: 0.33, medium: 0.66 }
    }
}

impl SeverityThresholds {
    /// True if the bounds are finite and strictly ascending
    pub fn is_ascending(&self) -> bool {
        [self.none, self.low, self.medium].iter().all(|b| b.is_finite())
            && self.none < self.low
            && self.low < self.medium
    }
}

/// Chance of rain a window must exceed to raise its alert.
///
/// Kept apart from `SeverityThresholds::none` even though both default to 0.05.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(transparent)]
pub struct AlertThreshold(pub f64);

impl Default for AlertThreshold {
    fn default() -> Self {
        AlertThreshold(0.05)
    }
}

/// All tunables that turn a forecast into an indicator plan
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ForecastPolicy {
    pub windows: DayWindows,
    pub severity: SeverityThresholds,
    pub alert: AlertThreshold,
}

/// Maps a chance of rain to a severity level.
///
/// Bounds are checked in ascending order and the first match wins. Values above
/// the `medium` bound are `High` however large, and NaN is treated as no signal.
///
/// # Arguments
///
/// * 'value' - chance of rain, nominally 0.0-1.0
/// * 'thresholds' - the bounds to classify against
pub fn classify(value: f64, thresholds: &SeverityThresholds) -> SeverityLevel {
    if value.is_nan() || value <= thresholds.none {
        SeverityLevel::None
    } else if value <= thresholds.low {
        SeverityLevel::Low
    } else if value <= thresholds.medium {
        SeverityLevel::Medium
    } else {
        SeverityLevel::High
    }
}

/// Returns true if a window's chance of rain should light its alert
///
/// # Arguments
///
/// * 'value' - worst chance of rain in the window
/// * 'alert' - the alert threshold
pub fn is_alert_worthy(value: f64, alert: AlertThreshold) -> bool {
    value > alert.0
}

/// Which indicators should be on, independent of how they are wired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorPlan {
    pub morning_alert: bool,
    pub evening_alert: bool,
    pub severity: SeverityLevel,
}

impl IndicatorPlan {
    /// Returns the level of every physical indicator line.
    ///
    /// At most one severity line is on, none of them for `SeverityLevel::None`.
    pub fn line_states(&self) -> [(IndicatorLine, bool); 5] {
        [
            (IndicatorLine::MorningAlert, self.morning_alert),
            (IndicatorLine::EveningAlert, self.evening_alert),
            (IndicatorLine::SeverityLow, self.severity == SeverityLevel::Low),
            (IndicatorLine::SeverityMedium, self.severity == SeverityLevel::Medium),
            (IndicatorLine::SeverityHigh, self.severity == SeverityLevel::High),
        ]
    }
}

impl fmt::Display for IndicatorPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let on_off = |b: bool| if b { "On " } else { "Off" };
        write!(f, "Morning: {}, Evening: {}, Severity: {}",
               on_off(self.morning_alert), on_off(self.evening_alert), self.severity)
    }
}

/// Builds the indicator plan from the worst morning and evening chances
///
/// # Arguments
///
/// * 'morning_max' - worst chance of rain in the morning window
/// * 'evening_max' - worst chance of rain in the evening window
/// * 'policy' - thresholds to apply
pub fn build_plan(morning_max: f64, evening_max: f64, policy: &ForecastPolicy) -> IndicatorPlan {
    IndicatorPlan {
        morning_alert: is_alert_worthy(morning_max, policy.alert),
        evening_alert: is_alert_worthy(evening_max, policy.alert),
        severity: classify(morning_max.max(evening_max), &policy.severity),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use super::*;
    use crate::models::forecast::test_support::day_with;

    fn plan_for(overrides: &[(u32, f64)]) -> (f64, f64, IndicatorPlan) {
        let policy = ForecastPolicy::default();
        let (morning, evening) = policy.windows.worst_chances(&day_with(overrides));
        (morning, evening, build_plan(morning, evening, &policy))
    }

    #[test]
    fn bounds_are_inclusive() {
        let t = SeverityThresholds::default();
        assert_eq!(classify(0.05, &t), SeverityLevel::None);
        assert_eq!(classify(0.33, &t), SeverityLevel::Low);
        assert_eq!(classify(0.66, &t), SeverityLevel::Medium);
        assert_eq!(classify(1.1, &t), SeverityLevel::High);
    }

    #[test]
    fn out_of_range_values_are_absorbed() {
        let t = SeverityThresholds::default();
        assert_eq!(classify(-3.0, &t), SeverityLevel::None);
        assert_eq!(classify(1.5, &t), SeverityLevel::High);
        assert_eq!(classify(f64::INFINITY, &t), SeverityLevel::High);
        assert_eq!(classify(f64::NAN, &t), SeverityLevel::None);
        assert!(!is_alert_worthy(f64::NAN, AlertThreshold::default()));
    }

    #[test]
    fn alert_threshold_is_independent_of_severity() {
        let policy = ForecastPolicy { alert: AlertThreshold(0.5), ..ForecastPolicy::default() };
        let plan = build_plan(0.4, 0.0, &policy);
        assert!(!plan.morning_alert);
        assert_eq!(plan.severity, SeverityLevel::Medium);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(SeverityLevel::None < SeverityLevel::Low);
        assert!(SeverityLevel::Low < SeverityLevel::Medium);
        assert!(SeverityLevel::Medium < SeverityLevel::High);
    }

    #[test]
    fn scenario_morning_and_evening_rain() {
        let (morning, evening, plan) = plan_for(&[(9, 0.4), (20, 0.1)]);
        assert_eq!((morning, evening), (0.4, 0.1));
        assert_eq!(plan, IndicatorPlan { morning_alert: true, evening_alert: true, severity: SeverityLevel::Medium });
    }

    #[test]
    fn scenario_dry_day() {
        let (_, _, plan) = plan_for(&[]);
        assert_eq!(plan, IndicatorPlan { morning_alert: false, evening_alert: false, severity: SeverityLevel::None });
    }

    #[test]
    fn scenario_heavy_morning() {
        let (_, _, plan) = plan_for(&[(8, 0.7)]);
        assert_eq!(plan, IndicatorPlan { morning_alert: true, evening_alert: false, severity: SeverityLevel::High });
    }

    #[test]
    fn scenario_rain_outside_windows() {
        let (morning, evening, plan) = plan_for(&[(2, 0.9)]);
        assert_eq!((morning, evening), (0.0, 0.0));
        assert_eq!(plan, IndicatorPlan { morning_alert: false, evening_alert: false, severity: SeverityLevel::None });
    }

    #[test]
    fn line_states_light_one_severity_line() {
        let plan = IndicatorPlan { morning_alert: false, evening_alert: true, severity: SeverityLevel::Medium };
        let states = plan.line_states();
        assert_eq!(states[0], (IndicatorLine::MorningAlert, false));
        assert_eq!(states[1], (IndicatorLine::EveningAlert, true));
        assert_eq!(states[2], (IndicatorLine::SeverityLow, false));
        assert_eq!(states[3], (IndicatorLine::SeverityMedium, true));
        assert_eq!(states[4], (IndicatorLine::SeverityHigh, false));
    }

    #[test]
    fn no_severity_line_for_none() {
        let plan = IndicatorPlan { morning_alert: true, evening_alert: false, severity: SeverityLevel::None };
        assert!(plan.line_states()[2..].iter().all(|(_, on)| !on));
    }

    #[test]
    fn default_thresholds_are_ascending() {
        assert!(SeverityThresholds::default().is_ascending());
        assert!(!SeverityThresholds { none: 0.4, low: 0.3, medium: 0.6 }.is_ascending());
    }

    proptest! {
        #[test]
        fn at_or_below_none_bound(v in -10.0f64..=0.05) {
            prop_assert_eq!(classify(v, &SeverityThresholds::default()), SeverityLevel::None);
            prop_assert!(!is_alert_worthy(v, AlertThreshold::default()));
        }

        #[test]
        fn low_band(v in 0.0501f64..=0.33) {
            prop_assert_eq!(classify(v, &SeverityThresholds::default()), SeverityLevel::Low);
        }

        #[test]
        fn medium_band(v in 0.3301f64..=0.66) {
            prop_assert_eq!(classify(v, &SeverityThresholds::default()), SeverityLevel::Medium);
        }

        #[test]
        fn high_band(v in 0.6601f64..=1.1) {
            prop_assert_eq!(classify(v, &SeverityThresholds::default()), SeverityLevel::High);
        }

        #[test]
        fn classify_is_monotonic(a in -1.0f64..2.0, b in -1.0f64..2.0) {
            let t = SeverityThresholds::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify(lo, &t) <= classify(hi, &t));
        }

        #[test]
        fn severity_follows_worse_window(m in 0.0f64..=1.0, e in 0.0f64..=1.0) {
            let policy = ForecastPolicy::default();
            let plan = build_plan(m, e, &policy);
            prop_assert_eq!(plan.severity, classify(m.max(e), &policy.severity));
        }
    }
}
