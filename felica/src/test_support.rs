//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common `MockDriver` setup so tests across the
//! crate and the tests/ directory open sessions the same way.
#![allow(dead_code)]

use crate::device::Felica;
use crate::driver::{MockCard, MockDriver};
use crate::Result;

/// Open a session over a clone of `driver`. The caller keeps `driver` to
/// inspect recorded calls and live handles afterwards.
#[doc(hidden)]
pub fn open_mock(driver: &MockDriver) -> Result<Felica> {
    Felica::open(Box::new(driver.clone()), None)
}

/// Build a `MockDriver` with `card` in the field and open a session on it.
#[doc(hidden)]
pub fn mock_session(card: MockCard) -> Result<(Felica, MockDriver)> {
    let driver = MockDriver::with_card(card);
    let felica = open_mock(&driver)?;
    Ok((felica, driver))
}

/// Open a session and poll it with the wildcard system code.
#[doc(hidden)]
pub fn polled_mock_session(card: MockCard) -> Result<(Felica, MockDriver)> {
    let (mut felica, driver) = mock_session(card)?;
    felica.poll_any()?;
    Ok((felica, driver))
}
