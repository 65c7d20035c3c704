// felica/src/device/builder.rs

//! Session configuration.

use crate::device::handle::Felica;
use crate::driver::Driver;
use crate::Result;

/// Helper to open a `Felica` session with optional configuration.
#[derive(Default)]
pub struct FelicaBuilder {
    device: Option<String>,
    driver: Option<Box<dyn Driver>>,
}

impl FelicaBuilder {
    /// Builder with no selector and the default driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Device selector handed to `pasori_open`.
    pub fn device(mut self, selector: impl Into<String>) -> Self {
        self.device = Some(selector.into());
        self
    }

    /// Provide a driver instance (e.g. `MockDriver`) instead of the linked
    /// felicalib.
    pub fn driver(mut self, driver: Box<dyn Driver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Open and initialize the reader. Without an explicit driver this uses
    /// `NativeDriver`, or fails with `DriverUnavailable` when the `native`
    /// feature is off.
    pub fn open(self) -> Result<Felica> {
        let driver = match self.driver {
            Some(d) => d,
            None => default_driver()?,
        };
        Felica::open(driver, self.device.as_deref())
    }
}

#[cfg(feature = "native")]
fn default_driver() -> Result<Box<dyn Driver>> {
    Ok(Box::new(crate::driver::NativeDriver::new()))
}

#[cfg(not(feature = "native"))]
fn default_driver() -> Result<Box<dyn Driver>> {
    Err(crate::Error::DriverUnavailable)
}
