use chrono::{DateTime, Local};
use thiserror::Error;
use crate::models::forecast::ForecastSeries;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("ForecastError::Fetch: {0}")]
    Fetch(String),
    #[error("ForecastError::Decode: {0}")]
    Decode(String),
    #[error("ForecastError::UpstreamStatus: invalid status code {0}, expected 200")]
    UpstreamStatus(u16),
}
impl From<serde_json::Error> for ForecastError {
    fn from(e: serde_json::Error) -> Self { ForecastError::Decode(e.to_string()) }
}
impl From<ureq::Error> for ForecastError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => ForecastError::UpstreamStatus(code),
            e => ForecastError::Fetch(e.to_string()),
        }
    }
}

/// Anything that can supply the hourly forecast for a day
pub trait Forecaster {
    /// Returns the hourly forecast for the day of the reference time
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location, as given by the user
    /// * 'lon' - longitude of the location, as given by the user
    /// * 'reference' - any time within the day to forecast
    fn forecast(&self, lat: &str, lon: &str, reference: DateTime<Local>) -> Result<ForecastSeries, ForecastError>;
}
