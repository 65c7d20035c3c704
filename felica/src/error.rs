// felica/src/error.rs

//! Error type shared by every fallible operation.

use derive_more::Display;
use thiserror::Error;

/// 列挙の対象
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationTarget {
    /// `felica_enum_systemcode`
    #[display(fmt = "system codes")]
    SystemCodes,
    /// `felica_enum_service`
    #[display(fmt = "service codes")]
    ServiceCodes,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// `pasori_open` returned null
    #[error("reader open failed")]
    DeviceOpen,

    /// `pasori_init` returned a nonzero status
    #[error("could not initialize reader: status={status}")]
    DeviceInit {
        /// status returned by the driver
        status: i32,
    },

    /// `felica_polling` returned null
    #[error("polling failed: no card detected")]
    PollingFailed,

    /// The operation needs a card handle and none is held
    #[error("no polling executed")]
    NotPolled,

    /// The session has been closed
    #[error("reader is not open")]
    NotOpen,

    /// Enumeration returned null or an empty IDm
    #[error("failed to enumerate {0}")]
    Enumeration(EnumerationTarget),

    /// Write payload longer than one block
    #[error("data too long: at most {max} bytes, got {actual}")]
    DataTooLong {
        /// block size
        max: usize,
        /// payload length
        actual: usize,
    },

    /// Device selector contains a NUL byte
    #[error("invalid device selector: {0}")]
    InvalidSelector(#[from] std::ffi::NulError),

    /// Byte slice of the wrong length for an identifier
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// required length
        expected: usize,
        /// given length
        actual: usize,
    },

    /// Malformed hex string
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// No driver was supplied and `native` is disabled
    #[error("no driver available: enable the `native` feature or supply one")]
    DriverUnavailable,
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
