// felica/src/lib.rs

//! felica
//!
//! Safe Rust binding for felicalib, the FeliCa reader driver library.
//!
//! The C library does all of the talking to the reader; this crate owns the
//! handles it returns, copies its fixed-size records into Rust values and
//! maps its return codes onto [`Error`]. Build with `--features native` to
//! link against felicalib; [`driver::MockDriver`] stands in for it otherwise.
#![warn(missing_docs)]

pub mod card;
pub mod constants;
pub mod device;
pub mod driver;
pub mod error;
pub mod ffi;
pub mod prelude;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
