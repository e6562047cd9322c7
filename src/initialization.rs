use std::env;
use std::time::Duration;
use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General};
use crate::errors::{ConfigError, RainCheckInitError};
use crate::manager_darksky::DarkSky;

pub const USAGE: &str = "usage: raincheck --lat <latitude> --lon <longitude> [--gpio] [--config <path>]";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {m}{n}";

/// Location to forecast, kept as given on the command line
#[derive(Debug, PartialEq)]
pub struct Location {
    pub lat: String,
    pub lon: String,
}

/// What the command line asks for
#[derive(Debug, PartialEq)]
pub struct Args {
    pub location: Location,
    pub gpio: bool,
    pub config_path: Option<String>,
}

/// Everything a run needs, ready to use
pub struct Mgr {
    pub args: Args,
    pub config: Config,
    pub darksky: DarkSky,
}

/// Parses arguments, loads configuration and sets up logging and the forecast client
///
/// Nothing is fetched here, a failure means the process should stop before any
/// forecast work.
pub fn init() -> Result<Mgr, RainCheckInitError> {
    let args = parse_args(env::args().skip(1))?;

    let secret = match env::var("DARKSKY_SECRET_KEY") {
        Ok(s) if !s.is_empty() => s,
        _ => return Err(RainCheckInitError::MissingSecret),
    };

    let config_path = args.config_path.clone().or_else(|| env::var("RAINCHECK_CONFIG").ok());
    let config = match config_path {
        Some(path) => load_config(&path)?,
        None => Config::default(),
    };

    setup_logger(&config.general)?;
    info!("raincheck version: {}", env!("CARGO_PKG_VERSION"));

    let darksky = DarkSky::new(
        secret,
        &config.provider.root_url,
        Duration::from_secs(config.provider.timeout_secs),
    );

    Ok(Mgr { args, config, darksky })
}

/// Parses command line arguments, the program name excluded
///
/// # Arguments
///
/// * 'args' - the arguments to parse
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args, RainCheckInitError> {
    let mut lat: Option<String> = None;
    let mut lon: Option<String> = None;
    let mut gpio = false;
    let mut config_path: Option<String> = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) => (f.to_string(), Some(v.to_string())),
            None => (arg.clone(), None),
        };

        match flag.trim_start_matches('-') {
            "lat" => lat = inline.or_else(|| args.next()),
            "lon" => lon = inline.or_else(|| args.next()),
            "config" => config_path = inline.or_else(|| args.next()),
            "gpio" => gpio = match inline.as_deref() {
                None | Some("true") => true,
                Some("false") => false,
                Some(v) => return Err(RainCheckInitError::Usage(format!("invalid value for gpio: {}\n{}", v, USAGE))),
            },
            _ => return Err(RainCheckInitError::Usage(format!("unknown argument {}\n{}", flag, USAGE))),
        }
    }

    match (lat.filter(|s| !s.is_empty()), lon.filter(|s| !s.is_empty())) {
        (Some(lat), Some(lon)) => Ok(Args { location: Location { lat, lon }, gpio, config_path }),
        _ => Err(RainCheckInitError::Usage(USAGE.to_string())),
    }
}

/// Sets up log4rs with a console and/or file appender
///
/// # Arguments
///
/// * 'general' - general configuration holding log settings
fn setup_logger(general: &General) -> Result<(), RainCheckInitError> {
    let _ = log4rs::init_config(log_config(general)?)?;

    Ok(())
}

/// Builds the log4rs configuration. The console is used whenever no log file is
/// given, so fatal errors always have somewhere to go.
///
/// # Arguments
///
/// * 'general' - general configuration holding log settings
fn log_config(general: &General) -> Result<LogConfig, RainCheckInitError> {
    let mut builder = LogConfig::builder();
    let mut root = Root::builder();

    if general.log_to_stdout || general.log_path.is_none() {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if let Some(path) = &general.log_path {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(path)
            .map_err(|e| ConfigError(format!("log file {}: {}", path, e)))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    Ok(builder.build(root.build(general.log_level))?)
}
