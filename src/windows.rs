use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::forecast::ForecastSeries;

/// Whether the last hour of a window belongs to it
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EndBound {
    Inclusive,
    Exclusive,
}

/// A named range of hours of the day.
///
/// The start hour is always part of the window, the end hour only if `end_bound`
/// says so. The two default windows differ on this point: morning stops before
/// 11 while evening includes 23.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimeWindow {
    pub name: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub end_bound: EndBound,
}

impl TimeWindow {
    /// Hours 7 up to but not including 11
    pub fn morning() -> TimeWindow {
        TimeWindow { name: "morning".to_string(), start_hour: 7, end_hour: 11, end_bound: EndBound::Exclusive }
    }

    /// Hours 17 through 23
    pub fn evening() -> TimeWindow {
        TimeWindow { name: "evening".to_string(), start_hour: 17, end_hour: 23, end_bound: EndBound::Inclusive }
    }

    /// Returns true if the given hour of day falls within the window
    ///
    /// # Arguments
    ///
    /// * 'hour' - hour of day, 0-23
    pub fn contains(&self, hour: u32) -> bool {
        if hour < self.start_hour {
            return false;
        }
        match self.end_bound {
            EndBound::Inclusive => hour <= self.end_hour,
            EndBound::Exclusive => hour < self.end_hour,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let close = match self.end_bound {
            EndBound::Inclusive => ']',
            EndBound::Exclusive => ')',
        };
        write!(f, "{} [{:>02},{:>02}{}", self.name, self.start_hour, self.end_hour, close)
    }
}

/// Reduces a forecast series to the worst single-hour chance of rain per window.
///
/// Returns one `(name, chance)` pair per window, in the order of `windows`, so
/// windows sharing a name are still reported apart. Every window starts at
/// 0.0, so a window without samples reports no signal. Samples outside every
/// window are ignored. The series is walked once and need not be sorted.
///
/// Negative chances never beat the 0.0 floor and NaN never wins a comparison,
/// values above 1.0 are passed on as they are.
///
/// # Arguments
///
/// * 'series' - the hourly forecast for the day
/// * 'windows' - the windows to reduce into
pub fn aggregate(series: &ForecastSeries, windows: &[TimeWindow]) -> Vec<(String, f64)> {
    let mut worst = vec![0.0f64; windows.len()];

    for sample in series.iter() {
        let hour = sample.hour();
        for (i, window) in windows.iter().enumerate() {
            if window.contains(hour) && sample.precipitation_chance > worst[i] {
                worst[i] = sample.precipitation_chance;
            }
        }
    }

    windows
        .iter()
        .zip(worst)
        .map(|(w, chance)| (w.name.clone(), chance))
        .collect()
}

/// The two windows a day is judged by
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DayWindows {
    pub morning: TimeWindow,
    pub evening: TimeWindow,
}

impl Default for DayWindows {
    fn default() -> Self {
        DayWindows { morning: TimeWindow::morning(), evening: TimeWindow::evening() }
    }
}

impl DayWindows {
    /// Morning and evening, in that order
    pub fn all(&self) -> [TimeWindow; 2] {
        [self.morning.clone(), self.evening.clone()]
    }

    /// Returns the worst morning and evening chance of rain for the series
    ///
    /// # Arguments
    ///
    /// * 'series' - the hourly forecast for the day
    pub fn worst_chances(&self, series: &ForecastSeries) -> (f64, f64) {
        match aggregate(series, &self.all())[..] {
            [(_, morning), (_, evening)] => (morning, evening),
            _ => (0.0, 0.0),
        }
    }
}
