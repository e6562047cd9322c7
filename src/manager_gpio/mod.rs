pub mod sysfs;

use std::fmt;
use std::path::Path;
use embedded_hal::digital::{OutputPin, PinState};
use log::debug;
use crate::config::GpioParameters;
use crate::errors::HardwareError;
use crate::indicators::{IndicatorLine, IndicatorSink};
use crate::manager_gpio::sysfs::SysfsPin;
use crate::severity::IndicatorPlan;

/// Five output pins, one per indicator line
pub struct GpioIndicators<P: OutputPin> {
    morning: P,
    evening: P,
    low: P,
    medium: P,
    high: P,
}

impl<P: OutputPin> GpioIndicators<P> {
    pub fn new(morning: P, evening: P, low: P, medium: P, high: P) -> GpioIndicators<P> {
        GpioIndicators { morning, evening, low, medium, high }
    }

    fn pin(&mut self, line: IndicatorLine) -> &mut P {
        match line {
            IndicatorLine::MorningAlert   => &mut self.morning,
            IndicatorLine::EveningAlert   => &mut self.evening,
            IndicatorLine::SeverityLow    => &mut self.low,
            IndicatorLine::SeverityMedium => &mut self.medium,
            IndicatorLine::SeverityHigh   => &mut self.high,
        }
    }
}

impl GpioIndicators<SysfsPin> {
    /// Opens and configures all five lines as outputs
    ///
    /// # Arguments
    ///
    /// * 'params' - pin numbers and sysfs location
    pub fn open_sysfs(params: &GpioParameters) -> Result<GpioIndicators<SysfsPin>, HardwareError> {
        let root = Path::new(&params.sysfs_root);
        let open = |pin: u32| {
            let line = params.line_offset.checked_add(pin)
                .ok_or_else(|| HardwareError::Open { pin, reason: format!("line offset {} out of range", params.line_offset) })?;
            SysfsPin::open(root, line)
                .map_err(|e| HardwareError::Open { pin, reason: e.to_string() })
        };

        Ok(GpioIndicators::new(
            open(params.morning_pin)?,
            open(params.evening_pin)?,
            open(params.low_pin)?,
            open(params.medium_pin)?,
            open(params.high_pin)?,
        ))
    }
}

/// Sysfs backed indicators that open their lines on first use, so that nothing
/// is touched on the hardware before there is a plan to show
pub struct SysfsIndicators {
    params: GpioParameters,
    indicators: Option<GpioIndicators<SysfsPin>>,
}

impl SysfsIndicators {
    pub fn new(params: GpioParameters) -> SysfsIndicators {
        SysfsIndicators { params, indicators: None }
    }
}

impl IndicatorSink for SysfsIndicators {
    fn apply(&mut self, plan: &IndicatorPlan) -> Result<(), HardwareError> {
        let indicators = match self.indicators.take() {
            Some(indicators) => indicators,
            None => GpioIndicators::open_sysfs(&self.params)?,
        };

        self.indicators.insert(indicators).apply(plan)
    }
}

impl<P: OutputPin> IndicatorSink for GpioIndicators<P>
where
    P::Error: fmt::Display,
{
    /// Sets every line, not only those that change, so that any state left over
    /// from an earlier run is overwritten.
    fn apply(&mut self, plan: &IndicatorPlan) -> Result<(), HardwareError> {
        for (line, on) in plan.line_states() {
            debug!("setting {} {}", line, if on { "high" } else { "low" });
            self.pin(line)
                .set_state(PinState::from(on))
                .map_err(|e| HardwareError::Write { line, reason: e.to_string() })?;
        }

        Ok(())
    }
}
