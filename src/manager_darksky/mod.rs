use std::time::Duration;
use chrono::{DateTime, FixedOffset, Local, NaiveTime, TimeZone};
use log::{debug, error};
use ureq::Agent;
use crate::forecaster::{ForecastError, Forecaster};
use crate::models::darksky_forecast::ForecastResponse;
use crate::models::forecast::{ForecastSeries, TimedForecast};

pub const DEFAULT_ROOT_URL: &str = "https://api.darksky.net";

/// Client for the DarkSky forecast API, or any service speaking the same protocol
pub struct DarkSky {
    agent: Agent,
    secret: String,
    root_url: String,
}

impl DarkSky {
    /// Returns a DarkSky struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'secret' - the API secret key
    /// * 'root_url' - base URL of the service, without trailing slash
    /// * 'timeout' - global timeout for one request
    pub fn new(secret: String, root_url: &str, timeout: Duration) -> DarkSky {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();

        let agent = config.into();
        let root_url = root_url.trim_end_matches('/').to_string();

        Self { agent, secret, root_url }
    }

    fn request_url(&self, secret: &str, lat: &str, lon: &str, unix: i64) -> String {
        format!("{}/forecast/{}/{},{},{}", self.root_url, secret, lat, lon, unix)
    }
}

impl Forecaster for DarkSky {
    /// Retrieves the hourly forecast for the day of the given time.
    ///
    /// The time is truncated to the start of its day so that the service returns
    /// all 24 hours of that day.
    fn forecast(&self, lat: &str, lon: &str, reference: DateTime<Local>) -> Result<ForecastSeries, ForecastError> {
        let day_start = start_of_day(&reference)?;

        let url = self.request_url(&self.secret, lat, lon, day_start.timestamp());
        debug!("requesting forecast: {}", self.request_url("<secret>", lat, lon, day_start.timestamp()));

        let json = self.agent
            .get(&url)
            .call()
            .and_then(|mut r| r.body_mut().read_to_string())
            .map_err(|e| {
                error!("error making forecast request to {}: {}", self.request_url("<secret>", lat, lon, day_start.timestamp()), e);
                ForecastError::from(e)
            })?;

        series_from_json(&json).inspect_err(|e| error!("error decoding forecast response: {}", e))
    }
}

/// Returns the first instant of the reference time's calendar day in its own zone.
///
/// Built from the wall clock date rather than by truncating elapsed time, so a
/// day that starts or ends a daylight saving shift still starts at its own
/// midnight. If midnight falls in a skipped hour there is no such instant and an
/// error is returned.
///
/// # Arguments
///
/// * 'reference' - any time within the day
fn start_of_day<Tz: TimeZone>(reference: &DateTime<Tz>) -> Result<DateTime<Tz>, ForecastError> {
    let midnight = reference.date_naive().and_time(NaiveTime::MIN);
    reference.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| ForecastError::Fetch(format!("no local midnight on {}", reference.date_naive())))
}

/// Decodes a forecast response into a series.
///
/// Sample times are placed in the offset the response reports for the location,
/// or in the local offset of this machine if the response has none.
///
/// # Arguments
///
/// * 'json' - the response body
pub fn series_from_json(json: &str) -> Result<ForecastSeries, ForecastError> {
    let response: ForecastResponse = serde_json::from_str(json)?;

    let offset = match response.offset {
        Some(hours) => Some(
            FixedOffset::east_opt((hours * 3600.0).round() as i32)
                .ok_or_else(|| ForecastError::Decode(format!("invalid offset {}", hours)))?,
        ),
        None => None,
    };

    let mut series = ForecastSeries::new();
    for h in &response.hourly.data {
        let utc = DateTime::from_timestamp(h.time, 0)
            .ok_or_else(|| ForecastError::Decode(format!("invalid timestamp {}", h.time)))?;
        let at = match offset {
            Some(o) => utc.with_timezone(&o),
            None => utc.with_timezone(&Local).fixed_offset(),
        };

        series.push(TimedForecast {
            at,
            precipitation_chance: h.precip_probability,
            precipitation_intensity: h.precip_intensity,
        });
    }

    Ok(series)
}
