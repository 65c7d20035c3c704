// felica/src/device/handle.rs

//! The reader session.

use std::ffi::CString;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::ptr::NonNull;

use log::{debug, warn};

use crate::card::CardInfo;
use crate::constants::{BLOCK_SIZE, POLLING_RFU, POLLING_TIME_SLOT, READ_MODE_PLAIN};
use crate::device::resources::{CardState, ReaderHandle};
use crate::driver::Driver;
use crate::error::EnumerationTarget;
use crate::ffi::{Pasori, RawFelica};
use crate::types::{Area, BlockData, Idm, Pmm, ServiceCode, SystemCode};
use crate::{Error, Result};

/// An open reader session.
///
/// The session owns the reader handle and, after a successful polling or
/// enumeration, the card handle returned by it. Each polling or enumeration
/// frees the previous card handle before asking the driver for a new one.
/// Both handles are released by [`Felica::close`] or on drop.
///
/// The session is not thread-safe; it holds raw driver handles and is
/// neither `Send` nor `Sync`.
pub struct Felica {
    driver: Box<dyn Driver>,
    reader: Option<ReaderHandle>,
    card: Option<CardState>,
}

impl Felica {
    /// Open and initialize a reader through `driver`.
    ///
    /// `device` is passed to `pasori_open`; felicalib ignores it on most
    /// platforms, so `None` is the usual choice.
    pub fn open(mut driver: Box<dyn Driver>, device: Option<&str>) -> Result<Self> {
        let selector = device.map(CString::new).transpose()?;

        debug!("pasori_open({:?})", device);
        let pasori = driver
            .open(selector.as_deref())
            .ok_or(Error::DeviceOpen)?;

        let mut session = Self {
            driver,
            reader: Some(ReaderHandle::new(pasori)),
            card: None,
        };

        // SAFETY: `pasori` was just returned by this driver
        let status = unsafe { session.driver.init(pasori) };
        if status != 0 {
            debug!("pasori_init failed: status={}", status);
            session.close();
            return Err(Error::DeviceInit { status });
        }

        Ok(session)
    }

    /// Open the first reader through the linked felicalib.
    #[cfg(feature = "native")]
    pub fn open_native(device: Option<&str>) -> Result<Self> {
        Self::open(Box::new(crate::driver::NativeDriver::new()), device)
    }

    /// Start configuring a session.
    pub fn builder() -> crate::device::FelicaBuilder {
        crate::device::FelicaBuilder::new()
    }

    /// Poll for a card answering `system_code`.
    pub fn polling(&mut self, system_code: SystemCode) -> Result<CardInfo> {
        self.release_card();
        let pasori = self.reader()?;

        debug!("felica_polling(system_code={})", system_code);
        // SAFETY: `pasori` stays live while `self.reader` holds it
        let felica = unsafe {
            self.driver
                .polling(pasori, system_code.as_u16(), POLLING_RFU, POLLING_TIME_SLOT)
        }
        .ok_or(Error::PollingFailed)?;

        Ok(self.adopt(felica).info())
    }

    /// Poll with the wildcard system code.
    pub fn poll_any(&mut self) -> Result<CardInfo> {
        self.polling(SystemCode::ANY)
    }

    /// Read one block without encryption.
    ///
    /// Returns `Ok(None)` when the driver reports a failure, e.g. the block
    /// does not exist in that service. Errors only if no card is held.
    pub fn read_without_encryption(
        &mut self,
        service: ServiceCode,
        addr: u8,
    ) -> Result<Option<BlockData>> {
        let felica = self.card_ptr()?;
        let mut data = [0u8; BLOCK_SIZE];

        // SAFETY: `felica` stays live while `self.card` holds it
        let status = unsafe {
            self.driver.read_without_encryption(
                felica,
                service.as_c_int(),
                READ_MODE_PLAIN,
                addr,
                &mut data,
            )
        };
        if status != 0 {
            debug!(
                "read_without_encryption(service={}, addr={}) failed: status={}",
                service, addr, status
            );
            return Ok(None);
        }

        Ok(Some(BlockData::from_bytes(data)))
    }

    /// Write one block without encryption.
    ///
    /// `data` may be shorter than a block; the remainder is zero-filled.
    /// Returns the driver status untranslated (0 = success).
    pub fn write_without_encryption(
        &mut self,
        service: ServiceCode,
        addr: u8,
        data: &[u8],
    ) -> Result<i32> {
        let block = BlockData::padded(data)?;
        let felica = self.card_ptr()?;

        // SAFETY: `felica` stays live while `self.card` holds it
        let status = unsafe {
            self.driver
                .write_without_encryption(felica, service.as_c_int(), addr, block.as_bytes())
        };
        debug!(
            "write_without_encryption(service={}, addr={}) -> {}",
            service, addr, status
        );
        Ok(status)
    }

    /// Enumerate the system codes on the card in the field (at most 8).
    ///
    /// felicalib keeps the codes in card byte order, so each one is
    /// byte-swapped here. An all-zero IDm means no card answered.
    pub fn enum_system_codes(&mut self) -> Result<Vec<SystemCode>> {
        const TARGET: EnumerationTarget = EnumerationTarget::SystemCodes;

        self.release_card();
        let pasori = self.reader()?;

        debug!("felica_enum_systemcode()");
        // SAFETY: `pasori` stays live while `self.reader` holds it
        let felica = unsafe { self.driver.enum_system_code(pasori) }
            .ok_or(Error::Enumeration(TARGET))?;
        let card = self.adopt_enumeration(felica, TARGET)?;

        Ok(card
            .record
            .system_codes
            .iter()
            .map(|code| SystemCode::new(code.swap_bytes()))
            .collect())
    }

    /// Enumerate the service codes under `system_code` (at most 256).
    ///
    /// The area definitions found along the way are available from
    /// [`Felica::area_codes`] until the next polling or enumeration.
    pub fn enum_service_codes(&mut self, system_code: SystemCode) -> Result<Vec<ServiceCode>> {
        const TARGET: EnumerationTarget = EnumerationTarget::ServiceCodes;

        self.release_card();
        let pasori = self.reader()?;

        debug!("felica_enum_service(system_code={})", system_code);
        // SAFETY: `pasori` stays live while `self.reader` holds it
        let felica = unsafe { self.driver.enum_service(pasori, system_code.as_u16()) }
            .ok_or(Error::Enumeration(TARGET))?;
        let card = self.adopt_enumeration(felica, TARGET)?;

        Ok(card
            .record
            .service_codes
            .iter()
            .copied()
            .map(ServiceCode::new)
            .collect())
    }

    /// Areas reported by the last service enumeration.
    pub fn area_codes(&self) -> Result<Vec<Area>> {
        Ok(self
            .current()?
            .record
            .areas
            .iter()
            .map(|&(code, end_service_code)| Area {
                code,
                end_service_code,
            })
            .collect())
    }

    /// IDm of the current card.
    pub fn idm(&self) -> Result<Idm> {
        self.current().map(|card| card.idm)
    }

    /// PMm of the current card.
    pub fn pmm(&self) -> Result<Pmm> {
        self.current().map(|card| card.pmm)
    }

    /// System code stored in the current card record.
    pub fn system_code(&self) -> Result<SystemCode> {
        self.current()
            .map(|card| SystemCode::new(card.record.system_code))
    }

    /// Identity of the current card, if one is held.
    pub fn card_info(&self) -> Option<CardInfo> {
        self.card.as_ref().map(CardState::info)
    }

    /// Whether the reader handle is still held.
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Whether a card handle is held.
    pub fn is_polled(&self) -> bool {
        self.card.is_some()
    }

    /// Release the card handle, then the reader handle.
    ///
    /// Safe to call any number of times. Failures inside the driver are
    /// logged and swallowed.
    pub fn close(&mut self) {
        if panic::catch_unwind(AssertUnwindSafe(|| self.release_card())).is_err() {
            warn!("felica_free panicked during close; card handle abandoned");
        }

        if let Some(reader) = self.reader.take() {
            debug!("pasori_close()");
            let driver = &mut self.driver;
            // SAFETY: the handle was owned by this session and is closed once
            let closed = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
                driver.close(reader.as_ptr())
            }));
            if closed.is_err() {
                warn!("pasori_close panicked; reader handle abandoned");
            }
        }
    }

    fn reader(&self) -> Result<NonNull<Pasori>> {
        self.reader
            .as_ref()
            .map(ReaderHandle::as_ptr)
            .ok_or(Error::NotOpen)
    }

    fn current(&self) -> Result<&CardState> {
        self.card.as_ref().ok_or(Error::NotPolled)
    }

    fn card_ptr(&self) -> Result<NonNull<RawFelica>> {
        self.current().map(|card| card.handle.as_ptr())
    }

    fn adopt(&mut self, felica: NonNull<RawFelica>) -> &CardState {
        // SAFETY: `felica` was just returned by this driver
        let card = unsafe { CardState::capture(&mut *self.driver, felica) };
        self.card.insert(card)
    }

    fn adopt_enumeration(
        &mut self,
        felica: NonNull<RawFelica>,
        target: EnumerationTarget,
    ) -> Result<&CardState> {
        if self.adopt(felica).idm.is_zero() {
            debug!("enumeration of {} returned an empty IDm", target);
            self.release_card();
            return Err(Error::Enumeration(target));
        }
        self.current()
    }

    fn release_card(&mut self) {
        if let Some(card) = self.card.take() {
            debug!("felica_free()");
            // SAFETY: the handle was owned by this session and is freed once
            unsafe { self.driver.free(card.handle.as_ptr()) }
        }
    }
}

impl Drop for Felica {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Felica {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Felica")
            .field("open", &self.is_open())
            .field("card", &self.card_info())
            .finish()
    }
}
