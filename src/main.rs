use std::process::ExitCode;
use anyhow::{Context, Result};
use chrono::Local;
use log::error;
use crate::indicators::{IndicatorSink, LogIndicators};
use crate::initialization::{init, Mgr};
use crate::manager_gpio::SysfsIndicators;

mod config;
mod errors;
mod forecaster;
mod indicators;
mod initialization;
mod manager_darksky;
mod manager_gpio;
mod models;
mod severity;
mod windows;
mod worker;

fn main() -> ExitCode {
    let mgr = match init() {
        Ok(mgr) => mgr,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(mgr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Fetches today's forecast and drives the indicators, or only logs the plan
/// if GPIO output was not asked for
///
/// # Arguments
///
/// * 'mgr' - initialized configuration and clients
fn run(mgr: Mgr) -> Result<()> {
    let mut sink: Box<dyn IndicatorSink> = if mgr.args.gpio {
        Box::new(SysfsIndicators::new(mgr.config.gpio.clone()))
    } else {
        Box::new(LogIndicators)
    };

    worker::run(&mgr.darksky, sink.as_mut(), &mgr.args.location, Local::now(), &mgr.config.policy)
        .with_context(|| format!("forecast for {},{}", mgr.args.location.lat, mgr.args.location.lon))?;

    Ok(())
}
