// felica/src/ffi/native.rs

//! felicalib bindings. Only compiled with `--features native`.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::ptr::{self, NonNull};

use super::{Pasori, RawFelica};
use crate::constants::{BLOCK_SIZE, ID_LEN};
use crate::driver::Driver;

#[link(name = "felicalib")]
unsafe extern "C" {
    fn pasori_open(dummy: *const c_char) -> *mut Pasori;
    fn pasori_close(p: *mut Pasori);
    fn pasori_init(p: *mut Pasori) -> c_int;
    fn felica_polling(p: *mut Pasori, systemcode: u16, rfu: u8, timeslot: u8) -> *mut RawFelica;
    fn felica_read_without_encryption02(
        f: *mut RawFelica,
        servicecode: c_int,
        mode: c_int,
        addr: u8,
        data: *mut u8,
    ) -> c_int;
    fn felica_write_without_encryption(
        f: *mut RawFelica,
        servicecode: c_int,
        addr: u8,
        data: *const u8,
    ) -> c_int;
    fn felica_free(f: *mut RawFelica);
    fn felica_getidm(f: *mut RawFelica, buf: *mut u8);
    fn felica_getpmm(f: *mut RawFelica, buf: *mut u8);
    fn felica_enum_systemcode(p: *mut Pasori) -> *mut RawFelica;
    fn felica_enum_service(p: *mut Pasori, systemcode: u16) -> *mut RawFelica;
}

/// Driver backed by the linked felicalib.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDriver;

impl NativeDriver {
    /// A driver for the linked felicalib; holds no state of its own.
    pub fn new() -> Self {
        Self
    }
}

// SAFETY: every handle comes straight from felicalib, which keeps it valid
// until `pasori_close` / `felica_free`.
unsafe impl Driver for NativeDriver {
    fn open(&mut self, device: Option<&CStr>) -> Option<NonNull<Pasori>> {
        let arg = device.map_or(ptr::null(), CStr::as_ptr);
        // SAFETY: `arg` is null or a NUL-terminated string that outlives the call
        NonNull::new(unsafe { pasori_open(arg) })
    }

    unsafe fn close(&mut self, pasori: NonNull<Pasori>) {
        unsafe { pasori_close(pasori.as_ptr()) }
    }

    unsafe fn init(&mut self, pasori: NonNull<Pasori>) -> c_int {
        unsafe { pasori_init(pasori.as_ptr()) }
    }

    unsafe fn polling(
        &mut self,
        pasori: NonNull<Pasori>,
        system_code: u16,
        rfu: u8,
        time_slot: u8,
    ) -> Option<NonNull<RawFelica>> {
        NonNull::new(unsafe { felica_polling(pasori.as_ptr(), system_code, rfu, time_slot) })
    }

    unsafe fn read_without_encryption(
        &mut self,
        felica: NonNull<RawFelica>,
        service_code: c_int,
        mode: c_int,
        addr: u8,
        data: &mut [u8; BLOCK_SIZE],
    ) -> c_int {
        unsafe {
            felica_read_without_encryption02(
                felica.as_ptr(),
                service_code,
                mode,
                addr,
                data.as_mut_ptr(),
            )
        }
    }

    unsafe fn write_without_encryption(
        &mut self,
        felica: NonNull<RawFelica>,
        service_code: c_int,
        addr: u8,
        data: &[u8; BLOCK_SIZE],
    ) -> c_int {
        unsafe { felica_write_without_encryption(felica.as_ptr(), service_code, addr, data.as_ptr()) }
    }

    unsafe fn free(&mut self, felica: NonNull<RawFelica>) {
        unsafe { felica_free(felica.as_ptr()) }
    }

    unsafe fn get_idm(&mut self, felica: NonNull<RawFelica>, buf: &mut [u8; ID_LEN]) {
        unsafe { felica_getidm(felica.as_ptr(), buf.as_mut_ptr()) }
    }

    unsafe fn get_pmm(&mut self, felica: NonNull<RawFelica>, buf: &mut [u8; ID_LEN]) {
        unsafe { felica_getpmm(felica.as_ptr(), buf.as_mut_ptr()) }
    }

    unsafe fn enum_system_code(&mut self, pasori: NonNull<Pasori>) -> Option<NonNull<RawFelica>> {
        NonNull::new(unsafe { felica_enum_systemcode(pasori.as_ptr()) })
    }

    unsafe fn enum_service(
        &mut self,
        pasori: NonNull<Pasori>,
        system_code: u16,
    ) -> Option<NonNull<RawFelica>> {
        NonNull::new(unsafe { felica_enum_service(pasori.as_ptr(), system_code) })
    }
}
