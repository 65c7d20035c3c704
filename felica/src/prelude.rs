// felica/src/prelude.rs

//! Commonly used types.

pub use crate::card::CardInfo;
pub use crate::device::{Felica, FelicaBuilder};
pub use crate::driver::Driver;
#[cfg(feature = "native")]
pub use crate::driver::NativeDriver;
pub use crate::{
    Area, BlockData, EnumerationTarget, Error, Idm, Pmm, Result, ServiceCode, SystemCode,
};

pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, parse_hex};
