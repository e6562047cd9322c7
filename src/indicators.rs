use std::fmt;
use log::info;
use crate::errors::HardwareError;
use crate::severity::IndicatorPlan;

/// The physical indicator lines a plan drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorLine {
    MorningAlert,
    EveningAlert,
    SeverityLow,
    SeverityMedium,
    SeverityHigh,
}

impl fmt::Display for IndicatorLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IndicatorLine::MorningAlert   => write!(f, "morning alert"),
            IndicatorLine::EveningAlert   => write!(f, "evening alert"),
            IndicatorLine::SeverityLow    => write!(f, "severity low"),
            IndicatorLine::SeverityMedium => write!(f, "severity medium"),
            IndicatorLine::SeverityHigh   => write!(f, "severity high"),
        }
    }
}

/// Something that can show an indicator plan
pub trait IndicatorSink {
    fn apply(&mut self, plan: &IndicatorPlan) -> Result<(), HardwareError>;
}

/// Sink used when no hardware output is requested, it only reports the plan
pub struct LogIndicators;

impl IndicatorSink for LogIndicators {
    fn apply(&mut self, plan: &IndicatorPlan) -> Result<(), HardwareError> {
        info!("indicators (not driven): {}", plan);
        Ok(())
    }
}
