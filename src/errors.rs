use thiserror::Error;
use crate::forecaster::ForecastError;
use crate::indicators::IndicatorLine;

#[derive(Error, Debug)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}

#[derive(Error, Debug)]
pub enum HardwareError {
    #[error("HardwareError::Open: pin {pin}: {reason}")]
    Open { pin: u32, reason: String },
    #[error("HardwareError::Write: {line}: {reason}")]
    Write { line: IndicatorLine, reason: String },
}

/// Errors that stop the process before the forecast is fetched
#[derive(Error, Debug)]
pub enum RainCheckInitError {
    #[error("{0}")]
    Usage(String),
    #[error("no secret key specified, set up the DARKSKY_SECRET_KEY environment variable")]
    MissingSecret,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("error setting up logging: {0}")]
    Logging(String),
}
impl From<log::SetLoggerError> for RainCheckInitError {
    fn from(e: log::SetLoggerError) -> Self { RainCheckInitError::Logging(e.to_string()) }
}
impl From<log4rs::config::runtime::ConfigErrors> for RainCheckInitError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self { RainCheckInitError::Logging(e.to_string()) }
}

/// Errors from one run of the forecast to indicator pipeline
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("forecast failed: {0}")]
    Forecast(#[from] ForecastError),
    #[error("indicator update failed: {0}")]
    Hardware(#[from] HardwareError),
}
