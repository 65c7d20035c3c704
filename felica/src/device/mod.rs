// felica/src/device/mod.rs

//! Reader sessions and the handles they own.

pub mod builder;
pub mod handle;
mod resources;

pub use builder::FelicaBuilder;
pub use handle::Felica;
