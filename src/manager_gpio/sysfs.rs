use std::{fmt, fs};
use std::io;
use std::path::{Path, PathBuf};
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

#[derive(Debug)]
pub struct SysfsPinError(pub io::Error);

impl fmt::Display for SysfsPinError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "sysfs write failed: {}", self.0)
    }
}

impl embedded_hal::digital::Error for SysfsPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A GPIO line driven through the Linux sysfs interface
pub struct SysfsPin {
    value_path: PathBuf,
}

impl SysfsPin {
    /// Exports the line if needed and configures it as an output
    ///
    /// # Arguments
    ///
    /// * 'sysfs_root' - the gpio class directory, normally /sys/class/gpio
    /// * 'line' - the kernel line number (chip base plus pin number)
    pub fn open(sysfs_root: &Path, line: u32) -> io::Result<SysfsPin> {
        let pin_dir = sysfs_root.join(format!("gpio{}", line));
        if !pin_dir.exists() {
            fs::write(sysfs_root.join("export"), line.to_string())?;
        }
        fs::write(pin_dir.join("direction"), "out")?;

        Ok(SysfsPin { value_path: pin_dir.join("value") })
    }

    fn write(&mut self, value: &str) -> Result<(), SysfsPinError> {
        fs::write(&self.value_path, value).map_err(SysfsPinError)
    }
}

impl ErrorType for SysfsPin {
    type Error = SysfsPinError;
}

impl OutputPin for SysfsPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write("0")
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write("1")
    }
}
