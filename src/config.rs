use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::manager_darksky::DEFAULT_ROOT_URL;
use crate::severity::ForecastPolicy;
use crate::windows::TimeWindow;

#[derive(Deserialize)]
#[serde(default)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        General { log_path: None, log_level: LevelFilter::Info, log_to_stdout: true }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct ProviderParameters {
    pub root_url: String,
    pub timeout_secs: u64,
}

impl Default for ProviderParameters {
    fn default() -> Self {
        ProviderParameters { root_url: DEFAULT_ROOT_URL.to_string(), timeout_secs: 30 }
    }
}

/// BCM pin numbers for each indicator and where to find them in sysfs
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct GpioParameters {
    pub sysfs_root: String,
    /// Added to every pin number, for kernels where the GPIO chip does not start at 0
    pub line_offset: u32,
    pub morning_pin: u32,
    pub evening_pin: u32,
    pub low_pin: u32,
    pub medium_pin: u32,
    pub high_pin: u32,
}

impl Default for GpioParameters {
    fn default() -> Self {
        GpioParameters {
            sysfs_root: "/sys/class/gpio".to_string(),
            line_offset: 0,
            morning_pin: 4,
            evening_pin: 18,
            low_pin: 22,
            medium_pin: 23,
            high_pin: 24,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub provider: ProviderParameters,
    pub policy: ForecastPolicy,
    pub gpio: GpioParameters,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

/// Parses and validates configuration given as a TOML document
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    check_window(&config.policy.windows.morning)?;
    check_window(&config.policy.windows.evening)?;

    if !config.policy.severity.is_ascending() {
        return Err(ConfigError::from("severity thresholds must be finite and ascending"));
    }
    if !config.policy.alert.0.is_finite() {
        return Err(ConfigError::from("alert threshold must be finite"));
    }

    let pins = [
        config.gpio.morning_pin, config.gpio.evening_pin,
        config.gpio.low_pin, config.gpio.medium_pin, config.gpio.high_pin,
    ];
    if pins.iter().enumerate().any(|(i, p)| pins[i + 1..].contains(p)) {
        return Err(ConfigError::from("each indicator needs its own gpio pin"));
    }
    if pins.iter().any(|p| config.gpio.line_offset.checked_add(*p).is_none()) {
        return Err(ConfigError(format!("gpio line offset {} too large for the configured pins", config.gpio.line_offset)));
    }

    Ok(config)
}

fn check_window(window: &TimeWindow) -> Result<(), ConfigError> {
    if window.start_hour > 23 || window.end_hour > 24 || window.start_hour > window.end_hour {
        return Err(ConfigError(format!("invalid time window {}", window)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::EndBound;

    #[test]
    fn empty_document_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.policy, ForecastPolicy::default());
        assert_eq!(config.provider.root_url, "https://api.darksky.net");
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.gpio.morning_pin, 4);
        assert_eq!(config.gpio.high_pin, 24);
        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert!(config.general.log_to_stdout);
        assert!(config.general.log_path.is_none());
    }

    #[test]
    fn partial_sections_override_defaults() {
        let config = parse_config(r#"
            [general]
            log_level = "debug"
            log_path = "/var/log/raincheck.log"

            [provider]
            root_url = "https://api.pirateweather.net"

            [policy]
            alert = 0.1

            [policy.severity]
            medium = 0.7

            [policy.windows.morning]
            name = "commute"
            start_hour = 6
            end_hour = 9
            end_bound = "inclusive"

            [gpio]
            line_offset = 512
        "#).unwrap();

        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert_eq!(config.general.log_path.as_deref(), Some("/var/log/raincheck.log"));
        assert_eq!(config.provider.root_url, "https://api.pirateweather.net");
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.policy.alert.0, 0.1);
        assert_eq!(config.policy.severity.none, 0.05);
        assert_eq!(config.policy.severity.medium, 0.7);
        assert_eq!(config.policy.windows.morning.end_bound, EndBound::Inclusive);
        assert_eq!(config.policy.windows.evening, TimeWindow::evening());
        assert_eq!(config.gpio.line_offset, 512);
    }

    #[test]
    fn rejects_descending_thresholds() {
        let err = parse_config("[policy.severity]\nlow = 0.8\n").err().unwrap();
        assert!(err.to_string().contains("ascending"));
    }

    #[test]
    fn rejects_inverted_window() {
        let doc = r#"
            [policy.windows.evening]
            name = "evening"
            start_hour = 20
            end_hour = 17
            end_bound = "inclusive"
        "#;
        assert!(parse_config(doc).is_err());
    }

    #[test]
    fn rejects_shared_pins() {
        assert!(parse_config("[gpio]\nhigh_pin = 4\n").is_err());
    }

    #[test]
    fn rejects_overflowing_line_offset() {
        let err = parse_config("[gpio]\nline_offset = 4294967295\n").err().unwrap();
        assert!(err.to_string().contains("line offset"));
        assert!(parse_config("[gpio]\nline_offset = 4294967271\n").is_ok());
    }

    #[test]
    fn example_file_matches_defaults() {
        let config = parse_config(include_str!("../config.example.toml")).unwrap();
        assert_eq!(config.policy, ForecastPolicy::default());
        assert_eq!(config.gpio.medium_pin, GpioParameters::default().medium_pin);
    }

    #[test]
    fn missing_file_is_config_error() {
        assert!(load_config("/nonexistent/raincheck.toml").is_err());
    }
}
