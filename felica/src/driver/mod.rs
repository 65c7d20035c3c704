// felica/src/driver/mod.rs

//! Backends that execute felicalib calls.

pub mod mock;
pub mod traits;

#[cfg(feature = "native")]
pub use crate::ffi::native::NativeDriver;
pub use mock::{MockCard, MockDriver};
pub use traits::Driver;
