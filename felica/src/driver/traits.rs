// felica/src/driver/traits.rs

//! The driver seam.

use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr::NonNull;

use crate::constants::{BLOCK_SIZE, ID_LEN};
use crate::ffi::{Pasori, RawFelica};

/// The felicalib call surface. `NativeDriver` forwards to the C library;
/// `MockDriver` emulates it in memory.
///
/// Null returns from the C functions are mapped to `None`; every other value
/// is passed through untouched.
///
/// # Safety
///
/// `Felica` dereferences the handles a driver hands out, so implementors
/// must guarantee that:
///
/// - a `Pasori` handle returned by `open` stays valid until it is passed to
///   `close`;
/// - a `RawFelica` handle returned by `polling`, `enum_system_code` or
///   `enum_service` points to a live, properly aligned `strfelica` record
///   whose `systemcode` and `num_*` count fields are initialized, together
///   with the first `num_*` entries of each array, until it is passed to
///   `free`;
/// - `get_idm` and `get_pmm` only write to the buffer they are given.
///
/// Callers of the `unsafe` methods in turn must only pass handles returned
/// by this same driver that have not yet been released.
///
/// Implementing the trait without `unsafe impl` is rejected:
///
/// ```compile_fail,E0200
/// use std::ffi::CStr;
/// use std::os::raw::c_int;
/// use std::ptr::NonNull;
/// use felica::driver::Driver;
/// use felica::ffi::{Pasori, RawFelica};
///
/// struct Dangling;
///
/// impl Driver for Dangling {
///     fn open(&mut self, _: Option<&CStr>) -> Option<NonNull<Pasori>> {
///         Some(NonNull::dangling())
///     }
///     unsafe fn close(&mut self, _: NonNull<Pasori>) {}
///     unsafe fn init(&mut self, _: NonNull<Pasori>) -> c_int { 0 }
///     unsafe fn polling(&mut self, _: NonNull<Pasori>, _: u16, _: u8, _: u8) -> Option<NonNull<RawFelica>> {
///         Some(NonNull::dangling())
///     }
///     unsafe fn read_without_encryption(&mut self, _: NonNull<RawFelica>, _: c_int, _: c_int, _: u8, _: &mut [u8; 16]) -> c_int { 0 }
///     unsafe fn write_without_encryption(&mut self, _: NonNull<RawFelica>, _: c_int, _: u8, _: &[u8; 16]) -> c_int { 0 }
///     unsafe fn free(&mut self, _: NonNull<RawFelica>) {}
///     unsafe fn get_idm(&mut self, _: NonNull<RawFelica>, _: &mut [u8; 8]) {}
///     unsafe fn get_pmm(&mut self, _: NonNull<RawFelica>, _: &mut [u8; 8]) {}
///     unsafe fn enum_system_code(&mut self, _: NonNull<Pasori>) -> Option<NonNull<RawFelica>> { None }
///     unsafe fn enum_service(&mut self, _: NonNull<Pasori>, _: u16) -> Option<NonNull<RawFelica>> { None }
/// }
/// ```
pub unsafe trait Driver {
    /// `pasori_open`
    fn open(&mut self, device: Option<&CStr>) -> Option<NonNull<Pasori>>;

    /// `pasori_close`
    unsafe fn close(&mut self, pasori: NonNull<Pasori>);

    /// `pasori_init`; 0 means success
    unsafe fn init(&mut self, pasori: NonNull<Pasori>) -> c_int;

    /// `felica_polling`
    unsafe fn polling(
        &mut self,
        pasori: NonNull<Pasori>,
        system_code: u16,
        rfu: u8,
        time_slot: u8,
    ) -> Option<NonNull<RawFelica>>;

    /// `felica_read_without_encryption02`; 0 means success
    unsafe fn read_without_encryption(
        &mut self,
        felica: NonNull<RawFelica>,
        service_code: c_int,
        mode: c_int,
        addr: u8,
        data: &mut [u8; BLOCK_SIZE],
    ) -> c_int;

    /// `felica_write_without_encryption`; 0 means success
    unsafe fn write_without_encryption(
        &mut self,
        felica: NonNull<RawFelica>,
        service_code: c_int,
        addr: u8,
        data: &[u8; BLOCK_SIZE],
    ) -> c_int;

    /// `felica_free`
    unsafe fn free(&mut self, felica: NonNull<RawFelica>);

    /// `felica_getidm`
    unsafe fn get_idm(&mut self, felica: NonNull<RawFelica>, buf: &mut [u8; ID_LEN]);

    /// `felica_getpmm`
    unsafe fn get_pmm(&mut self, felica: NonNull<RawFelica>, buf: &mut [u8; ID_LEN]);

    /// `felica_enum_systemcode`
    unsafe fn enum_system_code(&mut self, pasori: NonNull<Pasori>) -> Option<NonNull<RawFelica>>;

    /// `felica_enum_service`
    unsafe fn enum_service(
        &mut self,
        pasori: NonNull<Pasori>,
        system_code: u16,
    ) -> Option<NonNull<RawFelica>>;
}
