// felica/src/ffi/mod.rs

//! Raw felicalib types.
//!
//! `RawFelica` mirrors `struct strfelica` from `felicalib.h`. felicalib only
//! initializes the first `num_*` entries of each array, so records are never
//! copied as a whole: [`RecordContents::copy_from`] reads the scalar fields
//! one by one and then the clamped prefix of each array.

#[cfg(feature = "native")]
pub mod native;

use std::ptr::NonNull;

use crate::constants::{ID_LEN, MAX_AREA_CODE, MAX_SERVICE_CODE, MAX_SYSTEM_CODE};

/// Opaque `pasori` device handle owned by felicalib.
#[repr(C)]
pub struct Pasori {
    _private: [u8; 0],
}

/// `struct strfelica` (felicalib.h)
#[allow(missing_docs)]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawFelica {
    pub p: *mut Pasori,
    pub systemcode: u16,
    pub idm: [u8; ID_LEN],
    pub pmm: [u8; ID_LEN],

    pub num_system_code: u8,
    pub system_code: [u16; MAX_SYSTEM_CODE],

    pub num_area_code: u8,
    pub area_code: [u16; MAX_AREA_CODE],
    pub end_service_code: [u16; MAX_AREA_CODE],

    pub num_service_code: u8,
    pub service_code: [u16; MAX_SERVICE_CODE],
}

impl RawFelica {
    /// A fully zeroed record.
    pub fn zeroed() -> Self {
        Self {
            p: std::ptr::null_mut(),
            systemcode: 0,
            idm: [0; ID_LEN],
            pmm: [0; ID_LEN],
            num_system_code: 0,
            system_code: [0; MAX_SYSTEM_CODE],
            num_area_code: 0,
            area_code: [0; MAX_AREA_CODE],
            end_service_code: [0; MAX_AREA_CODE],
            num_service_code: 0,
            service_code: [0; MAX_SERVICE_CODE],
        }
    }
}

/// The initialized part of a `strfelica` record, owned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordContents {
    /// `systemcode`
    pub system_code: u16,
    /// System codes as stored by the driver, at most 8.
    pub system_codes: Vec<u16>,
    /// `(area_code, end_service_code)` pairs, at most 16.
    pub areas: Vec<(u16, u16)>,
    /// Service codes as stored by the driver, at most 256.
    pub service_codes: Vec<u16>,
}

impl RecordContents {
    /// Copy the scalar fields and the valid prefix of each array.
    ///
    /// Nothing past `min(count, capacity)` is read.
    ///
    /// # Safety
    ///
    /// `felica` must point to a live, aligned record whose `systemcode` and
    /// count fields are initialized, together with the array entries they
    /// describe.
    pub unsafe fn copy_from(felica: NonNull<RawFelica>) -> Self {
        let rec = felica.as_ptr();
        // SAFETY: every read stays inside the initialized part of `*rec`
        unsafe {
            let num_system_code = (&raw const (*rec).num_system_code).read();
            let num_area_code = (&raw const (*rec).num_area_code).read();
            let num_service_code = (&raw const (*rec).num_service_code).read();

            let systems = clamp("system code", num_system_code, MAX_SYSTEM_CODE);
            let areas = clamp("area code", num_area_code, MAX_AREA_CODE);
            let services = clamp("service code", num_service_code, MAX_SERVICE_CODE);

            let area_codes = prefix(&raw const (*rec).area_code, areas);
            let end_service_codes = prefix(&raw const (*rec).end_service_code, areas);

            Self {
                system_code: (&raw const (*rec).systemcode).read(),
                system_codes: prefix(&raw const (*rec).system_code, systems),
                areas: area_codes.into_iter().zip(end_service_codes).collect(),
                service_codes: prefix(&raw const (*rec).service_code, services),
            }
        }
    }
}

/// Only the first `min(reported, capacity)` entries are valid; the rest is
/// whatever the driver left in the buffer.
fn clamp(what: &str, reported: u8, capacity: usize) -> usize {
    let reported = usize::from(reported);
    if reported > capacity {
        log::warn!(
            "{} count {} exceeds capacity {}, truncating",
            what,
            reported,
            capacity
        );
    }
    reported.min(capacity)
}

/// # Safety
///
/// `array` must be valid for reads and its first `len` entries initialized.
unsafe fn prefix<const N: usize>(array: *const [u16; N], len: usize) -> Vec<u16> {
    let len = len.min(N);
    // SAFETY: upheld by the caller
    unsafe { std::slice::from_raw_parts(array.cast::<u16>(), len) }.to_vec()
}
