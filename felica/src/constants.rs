// felica/src/constants.rs
//! Sizes and fixed arguments of the felicalib interface

/// IDm / PMm length in bytes
pub const ID_LEN: usize = 8;

/// Size of one FeliCa data block
pub const BLOCK_SIZE: usize = 16;

/// Capacity of the system code array in a felicalib record
pub const MAX_SYSTEM_CODE: usize = 8;

/// Capacity of the area code / end service code arrays
pub const MAX_AREA_CODE: usize = 16;

/// Capacity of the service code array
pub const MAX_SERVICE_CODE: usize = 256;

/// Read mode passed to `felica_read_without_encryption02` (plain read)
pub const READ_MODE_PLAIN: i32 = 0;

/// Polling request code (RFU) and time slot; felicalib expects both zero
pub const POLLING_RFU: u8 = 0;
/// Polling time slot
pub const POLLING_TIME_SLOT: u8 = 0;
