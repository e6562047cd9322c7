use chrono::{DateTime, FixedOffset, Timelike};

/// One hourly forecast sample
#[derive(Clone, Debug, PartialEq)]
pub struct TimedForecast {
    pub at: DateTime<FixedOffset>,
    /// Probability of rain, nominally between 0 and 1
    pub precipitation_chance: f64,
    /// Amount of rain in millimeters per hour
    pub precipitation_intensity: f64,
}

impl TimedForecast {
    /// Returns the hour of day for the sample, in the offset the sample carries
    pub fn hour(&self) -> u32 {
        self.at.hour()
    }
}

/// The predicted weather for one day, one sample per hour.
///
/// A complete series has 24 samples in chronological order, but nothing here
/// enforces that. Gaps and duplicate hours are carried as-is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForecastSeries {
    pub hourly: Vec<TimedForecast>,
}

impl ForecastSeries {
    pub fn new() -> ForecastSeries {
        ForecastSeries { hourly: Vec::with_capacity(24) }
    }

    pub fn push(&mut self, sample: TimedForecast) {
        self.hourly.push(sample);
    }

    pub fn len(&self) -> usize {
        self.hourly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hourly.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedForecast> {
        self.hourly.iter()
    }
}

impl FromIterator<TimedForecast> for ForecastSeries {
    fn from_iter<I: IntoIterator<Item = TimedForecast>>(iter: I) -> Self {
        ForecastSeries { hourly: iter.into_iter().collect() }
    }
}


#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use super::*;
    use super::test_support::day_with;

    #[test]
    fn hour_follows_sample_offset() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let at = cet.with_ymd_and_hms(2026, 10, 19, 7, 30, 0).unwrap();
        let sample = TimedForecast { at, precipitation_chance: 0.2, precipitation_intensity: 0.1 };
        assert_eq!(sample.hour(), 7);
    }

    #[test]
    fn series_keeps_insertion_order() {
        let series = day_with(&[(3, 0.5)]);
        assert_eq!(series.len(), 24);
        let hours: Vec<u32> = series.iter().map(|s| s.hour()).collect();
        assert_eq!(hours, (0..24).collect::<Vec<u32>>());
        assert_eq!(series.hourly[3].precipitation_chance, 0.5);
    }

    #[test]
    fn new_series_is_empty() {
        assert!(ForecastSeries::new().is_empty());
    }
}
