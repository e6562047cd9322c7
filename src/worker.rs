use chrono::{DateTime, Local};
use log::{debug, info, warn};
use crate::errors::WorkerError;
use crate::forecaster::Forecaster;
use crate::indicators::IndicatorSink;
use crate::initialization::Location;
use crate::severity::{build_plan, ForecastPolicy, IndicatorPlan};

/// Runs the forecast to indicator pipeline once.
///
/// The forecast is fetched first, if that fails nothing is sent to the sink.
///
/// # Arguments
///
/// * 'forecaster' - source of the hourly forecast
/// * 'sink' - where to show the resulting plan
/// * 'location' - location to forecast
/// * 'now' - the day to forecast is the day of this time
/// * 'policy' - windows and thresholds to apply
pub fn run<F: Forecaster, S: IndicatorSink + ?Sized>(
    forecaster: &F,
    sink: &mut S,
    location: &Location,
    now: DateTime<Local>,
    policy: &ForecastPolicy,
) -> Result<IndicatorPlan, WorkerError> {
    let series = forecaster.forecast(&location.lat, &location.lon, now)?;
    if series.is_empty() {
        warn!("forecast has no hourly samples");
    } else if series.len() != 24 {
        warn!("forecast has {} hourly samples, expected 24", series.len());
    }

    for sample in series.iter() {
        debug!("{}: chance {:.2}, intensity {:.2} mm/h",
               sample.at.format("%H:%M"), sample.precipitation_chance, sample.precipitation_intensity);
    }

    let (morning, evening) = policy.windows.worst_chances(&series);
    info!("{} chance of rain: {}", policy.windows.morning.name, morning);
    info!("{} chance of rain: {}", policy.windows.evening.name, evening);

    let plan = build_plan(morning, evening, policy);
    info!("{}", plan);

    sink.apply(&plan)?;

    Ok(plan)
}
