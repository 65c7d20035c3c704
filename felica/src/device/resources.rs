// felica/src/device/resources.rs

use std::ptr::NonNull;

use crate::card::CardInfo;
use crate::constants::ID_LEN;
use crate::driver::Driver;
use crate::ffi::{Pasori, RawFelica, RecordContents};
use crate::types::{Idm, Pmm, SystemCode};

/// Owned `pasori*`. Not `Clone`: the session takes it out of an `Option`
/// exactly once to close it.
#[derive(Debug)]
pub(crate) struct ReaderHandle(NonNull<Pasori>);

impl ReaderHandle {
    pub(crate) fn new(ptr: NonNull<Pasori>) -> Self {
        Self(ptr)
    }

    pub(crate) fn as_ptr(&self) -> NonNull<Pasori> {
        self.0
    }
}

/// Owned `felica*`, released with `felica_free`.
#[derive(Debug)]
pub(crate) struct CardHandle(NonNull<RawFelica>);

impl CardHandle {
    pub(crate) fn as_ptr(&self) -> NonNull<RawFelica> {
        self.0
    }
}

/// Card handle plus everything copied out of its record at capture time.
#[derive(Debug)]
pub(crate) struct CardState {
    pub(crate) handle: CardHandle,
    pub(crate) idm: Idm,
    pub(crate) pmm: Pmm,
    pub(crate) record: RecordContents,
}

impl CardState {
    /// Take ownership of `felica` and snapshot its contents.
    ///
    /// # Safety
    ///
    /// `felica` must be a live record just returned by `driver`.
    pub(crate) unsafe fn capture(driver: &mut dyn Driver, felica: NonNull<RawFelica>) -> Self {
        let mut idm = [0u8; ID_LEN];
        let mut pmm = [0u8; ID_LEN];
        // SAFETY: upheld by the caller
        let record = unsafe {
            driver.get_idm(felica, &mut idm);
            driver.get_pmm(felica, &mut pmm);
            RecordContents::copy_from(felica)
        };
        log::trace!(
            "captured record: idm={} systems={} areas={} services={}",
            crate::utils::bytes_to_hex(&idm),
            record.system_codes.len(),
            record.areas.len(),
            record.service_codes.len()
        );

        Self {
            handle: CardHandle(felica),
            idm: Idm::from_bytes(idm),
            pmm: Pmm::from_bytes(pmm),
            record,
        }
    }

    pub(crate) fn info(&self) -> CardInfo {
        CardInfo::new(self.idm, self.pmm, SystemCode::new(self.record.system_code))
    }
}
