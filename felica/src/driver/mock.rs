// felica/src/driver/mock.rs

//! In-memory felicalib for tests and demos without a reader.

use std::cell::{RefCell, RefMut};
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr::NonNull;
use std::rc::Rc;

use crate::constants::{BLOCK_SIZE, ID_LEN};
use crate::driver::traits::Driver;
use crate::ffi::{Pasori, RawFelica};

/// Status felicalib returns for a failed read/write.
pub const MOCK_FAILURE: c_int = -1;

/// A recorded driver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `pasori_open` with the selector, if any
    Open(Option<String>),
    /// `pasori_close`
    Close,
    /// `pasori_init`
    Init,
    /// `felica_polling`
    Polling {
        /// requested system code
        system_code: u16,
        /// reserved byte
        rfu: u8,
        /// time slot count
        time_slot: u8,
    },
    /// `felica_read_without_encryption02`
    Read {
        /// service code as passed to C
        service_code: c_int,
        /// read mode
        mode: c_int,
        /// block number
        addr: u8,
    },
    /// `felica_write_without_encryption`
    Write {
        /// service code as passed to C
        service_code: c_int,
        /// block number
        addr: u8,
        /// padded block payload
        data: [u8; BLOCK_SIZE],
    },
    /// `felica_free`
    Free,
    /// `felica_getidm`
    GetIdm,
    /// `felica_getpmm`
    GetPmm,
    /// `felica_enum_systemcode`
    EnumSystemCode,
    /// `felica_enum_service`
    EnumService {
        /// system whose services are listed
        system_code: u16,
    },
}

/// Card placed on the mock reader.
#[derive(Debug, Clone, Default)]
pub struct MockCard {
    /// IDm
    pub idm: [u8; ID_LEN],
    /// PMm
    pub pmm: [u8; ID_LEN],
    /// Primary system code, reported by a wildcard polling
    pub system_code: u16,
    /// Logical system codes; stored byte-swapped in enumeration records the
    /// way felicalib stores the card's big-endian response.
    pub system_codes: Vec<u16>,
    /// `(area_code, end_service_code)` pairs
    pub areas: Vec<(u16, u16)>,
    /// Service codes reported by `enum_service`
    pub service_codes: Vec<u16>,
    /// Block contents keyed by `(service_code, addr)`
    pub blocks: HashMap<(u16, u8), [u8; BLOCK_SIZE]>,
}

impl MockCard {
    /// A card with the given identity and nothing else on it.
    pub fn new(idm: [u8; ID_LEN], pmm: [u8; ID_LEN]) -> Self {
        Self {
            idm,
            pmm,
            ..Self::default()
        }
    }

    /// Set the primary system code.
    pub fn system_code(mut self, code: u16) -> Self {
        self.system_code = code;
        self
    }

    /// Set the codes listed by `enum_system_code`.
    pub fn system_codes(mut self, codes: &[u16]) -> Self {
        self.system_codes = codes.to_vec();
        self
    }

    /// Append one area definition.
    pub fn area(mut self, code: u16, end_service_code: u16) -> Self {
        self.areas.push((code, end_service_code));
        self
    }

    /// Set the codes listed by `enum_service`.
    pub fn service_codes(mut self, codes: &[u16]) -> Self {
        self.service_codes = codes.to_vec();
        self
    }

    /// Store a readable block.
    pub fn block(mut self, service_code: u16, addr: u8, data: [u8; BLOCK_SIZE]) -> Self {
        self.blocks.insert((service_code, addr), data);
        self
    }

    fn answers(&self, system_code: u16) -> bool {
        system_code == 0xffff
            || system_code == self.system_code
            || self.system_codes.contains(&system_code)
    }
}

/// Shared state behind a `MockDriver`. Tests keep a clone of the driver and
/// inspect this after the session has taken ownership.
#[derive(Debug, Default)]
pub struct MockState {
    /// `open` returns null
    pub open_fails: bool,
    /// Status returned by `init`
    pub init_status: c_int,
    /// Card in the field, if any
    pub card: Option<MockCard>,
    /// Return a zero-filled record instead of null when enumerating with no
    /// card present (older felicalib builds do this).
    pub zeroed_enum_without_card: bool,
    /// Overrides `num_system_code` in enumeration records
    pub reported_system_code_count: Option<u8>,
    /// Overrides `num_service_code` in enumeration records
    pub reported_service_code_count: Option<u8>,
    /// Forces every read to return this status
    pub read_status: Option<c_int>,
    /// Status returned by writes; the card is only updated on 0
    pub write_status: c_int,
    /// `close` releases the reader and then panics
    pub close_panics: bool,
    /// `free` releases the record and then panics
    pub free_panics: bool,
    /// Fill array entries past each count with this value, the way a
    /// reused native buffer would look
    pub tail_fill: Option<u16>,

    /// Every call, in order
    pub calls: Vec<Call>,
    /// Releases of handles that were not live (double free or foreign handle)
    pub invalid_releases: usize,
    /// Calls made with a handle that was not live
    pub stale_uses: usize,

    readers: HashSet<usize>,
    cards: HashSet<usize>,
    next_reader_id: u64,
}

impl MockState {
    /// Readers opened and not yet closed.
    pub fn live_readers(&self) -> usize {
        self.readers.len()
    }

    /// Records handed out and not yet freed.
    pub fn live_cards(&self) -> usize {
        self.cards.len()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn card_live(&mut self, felica: NonNull<RawFelica>) -> bool {
        let live = self.cards.contains(&(felica.as_ptr() as usize));
        if !live {
            self.stale_uses += 1;
        }
        live
    }

    fn reader_live(&mut self, pasori: NonNull<Pasori>) -> bool {
        let live = self.readers.contains(&(pasori.as_ptr() as usize));
        if !live {
            self.stale_uses += 1;
        }
        live
    }

    fn alloc_card(&mut self, pasori: NonNull<Pasori>, record: RawFelica) -> NonNull<RawFelica> {
        let mut record = RawFelica {
            p: pasori.as_ptr(),
            ..record
        };
        if let Some(fill) = self.tail_fill {
            fill_tails(&mut record, fill);
        }
        let ptr = NonNull::from(Box::leak(Box::new(record)));
        self.cards.insert(ptr.as_ptr() as usize);
        ptr
    }

    fn identity_record(card: &MockCard) -> RawFelica {
        let mut raw = RawFelica::zeroed();
        raw.systemcode = card.system_code;
        raw.idm = card.idm;
        raw.pmm = card.pmm;
        raw
    }

    fn enumeration_without_card(&mut self, pasori: NonNull<Pasori>) -> Option<NonNull<RawFelica>> {
        if self.zeroed_enum_without_card {
            Some(self.alloc_card(pasori, RawFelica::zeroed()))
        } else {
            None
        }
    }
}

/// In-memory felicalib. Handles are real heap allocations so the session's
/// record copies go through the same pointer reads as with the C library.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Rc<RefCell<MockState>>,
}

impl MockDriver {
    /// A reader with no card in the field.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reader with `card` in the field.
    pub fn with_card(card: MockCard) -> Self {
        let driver = Self::new();
        driver.set_card(Some(card));
        driver
    }

    /// Borrow the shared state. Do not hold the guard across a session call.
    pub fn state(&self) -> RefMut<'_, MockState> {
        self.state.borrow_mut()
    }

    /// Put `card` in the field, or remove it.
    pub fn set_card(&self, card: Option<MockCard>) {
        self.state().card = card;
    }

    /// Snapshot of the call log.
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }
}

// SAFETY: handles are Box allocations tracked in `readers` / `cards`. They
// are only dropped by `close` / `free`, and calls with untracked handles never
// dereference them.
unsafe impl Driver for MockDriver {
    fn open(&mut self, device: Option<&CStr>) -> Option<NonNull<Pasori>> {
        let mut st = self.state();
        st.calls
            .push(Call::Open(device.map(|d| d.to_string_lossy().into_owned())));
        if st.open_fails {
            return None;
        }
        st.next_reader_id += 1;
        let id = Box::leak(Box::new(st.next_reader_id));
        let ptr = NonNull::from(id).cast::<Pasori>();
        st.readers.insert(ptr.as_ptr() as usize);
        Some(ptr)
    }

    unsafe fn close(&mut self, pasori: NonNull<Pasori>) {
        let mut st = self.state();
        st.calls.push(Call::Close);
        if st.readers.remove(&(pasori.as_ptr() as usize)) {
            // SAFETY: allocated by `open` as a Box<u64> and still live
            drop(unsafe { Box::from_raw(pasori.cast::<u64>().as_ptr()) });
        } else {
            st.invalid_releases += 1;
        }
        if st.close_panics {
            drop(st);
            panic!("mock pasori_close failure");
        }
    }

    unsafe fn init(&mut self, pasori: NonNull<Pasori>) -> c_int {
        let mut st = self.state();
        st.calls.push(Call::Init);
        if !st.reader_live(pasori) {
            return MOCK_FAILURE;
        }
        st.init_status
    }

    unsafe fn polling(
        &mut self,
        pasori: NonNull<Pasori>,
        system_code: u16,
        rfu: u8,
        time_slot: u8,
    ) -> Option<NonNull<RawFelica>> {
        let mut st = self.state();
        st.calls.push(Call::Polling {
            system_code,
            rfu,
            time_slot,
        });
        if !st.reader_live(pasori) {
            return None;
        }
        let card = st.card.clone().filter(|c| c.answers(system_code))?;
        let mut raw = MockState::identity_record(&card);
        if system_code != 0xffff {
            raw.systemcode = system_code;
        }
        Some(st.alloc_card(pasori, raw))
    }

    unsafe fn read_without_encryption(
        &mut self,
        felica: NonNull<RawFelica>,
        service_code: c_int,
        mode: c_int,
        addr: u8,
        data: &mut [u8; BLOCK_SIZE],
    ) -> c_int {
        let mut st = self.state();
        st.calls.push(Call::Read {
            service_code,
            mode,
            addr,
        });
        if !st.card_live(felica) {
            return MOCK_FAILURE;
        }
        if let Some(status) = st.read_status {
            return status;
        }
        let block = u16::try_from(service_code).ok().and_then(|svc| {
            st.card
                .as_ref()
                .and_then(|c| c.blocks.get(&(svc, addr)).copied())
        });
        match block {
            Some(block) => {
                *data = block;
                0
            }
            None => MOCK_FAILURE,
        }
    }

    unsafe fn write_without_encryption(
        &mut self,
        felica: NonNull<RawFelica>,
        service_code: c_int,
        addr: u8,
        data: &[u8; BLOCK_SIZE],
    ) -> c_int {
        let mut st = self.state();
        st.calls.push(Call::Write {
            service_code,
            addr,
            data: *data,
        });
        if !st.card_live(felica) {
            return MOCK_FAILURE;
        }
        let status = st.write_status;
        if status == 0 {
            if let (Some(card), Ok(svc)) = (st.card.as_mut(), u16::try_from(service_code)) {
                card.blocks.insert((svc, addr), *data);
            }
        }
        status
    }

    unsafe fn free(&mut self, felica: NonNull<RawFelica>) {
        let mut st = self.state();
        st.calls.push(Call::Free);
        if st.cards.remove(&(felica.as_ptr() as usize)) {
            // SAFETY: allocated by `alloc_card` as a Box<RawFelica> and still live
            drop(unsafe { Box::from_raw(felica.as_ptr()) });
        } else {
            st.invalid_releases += 1;
        }
        if st.free_panics {
            drop(st);
            panic!("mock felica_free failure");
        }
    }

    unsafe fn get_idm(&mut self, felica: NonNull<RawFelica>, buf: &mut [u8; ID_LEN]) {
        let mut st = self.state();
        st.calls.push(Call::GetIdm);
        if st.card_live(felica) {
            // SAFETY: live record owned by this driver
            *buf = unsafe { felica.as_ref() }.idm;
        }
    }

    unsafe fn get_pmm(&mut self, felica: NonNull<RawFelica>, buf: &mut [u8; ID_LEN]) {
        let mut st = self.state();
        st.calls.push(Call::GetPmm);
        if st.card_live(felica) {
            // SAFETY: live record owned by this driver
            *buf = unsafe { felica.as_ref() }.pmm;
        }
    }

    unsafe fn enum_system_code(&mut self, pasori: NonNull<Pasori>) -> Option<NonNull<RawFelica>> {
        let mut st = self.state();
        st.calls.push(Call::EnumSystemCode);
        if !st.reader_live(pasori) {
            return None;
        }
        let Some(card) = st.card.clone() else {
            return st.enumeration_without_card(pasori);
        };

        let mut raw = MockState::identity_record(&card);
        for (slot, code) in raw.system_code.iter_mut().zip(&card.system_codes) {
            *slot = code.swap_bytes();
        }
        raw.num_system_code = st
            .reported_system_code_count
            .unwrap_or(card.system_codes.len() as u8);
        Some(st.alloc_card(pasori, raw))
    }

    unsafe fn enum_service(
        &mut self,
        pasori: NonNull<Pasori>,
        system_code: u16,
    ) -> Option<NonNull<RawFelica>> {
        let mut st = self.state();
        st.calls.push(Call::EnumService { system_code });
        if !st.reader_live(pasori) {
            return None;
        }
        let Some(card) = st.card.clone().filter(|c| c.answers(system_code)) else {
            return st.enumeration_without_card(pasori);
        };

        let mut raw = MockState::identity_record(&card);
        raw.systemcode = system_code;
        for (i, (code, end)) in card.areas.iter().take(raw.area_code.len()).enumerate() {
            raw.area_code[i] = *code;
            raw.end_service_code[i] = *end;
        }
        raw.num_area_code = card.areas.len().min(raw.area_code.len()) as u8;
        for (slot, code) in raw.service_code.iter_mut().zip(&card.service_codes) {
            *slot = *code;
        }
        raw.num_service_code = st
            .reported_service_code_count
            .unwrap_or(card.service_codes.len().min(u8::MAX as usize) as u8);
        Some(st.alloc_card(pasori, raw))
    }
}

fn fill_tails(record: &mut RawFelica, fill: u16) {
    let systems = usize::from(record.num_system_code).min(record.system_code.len());
    let areas = usize::from(record.num_area_code).min(record.area_code.len());
    let services = usize::from(record.num_service_code).min(record.service_code.len());
    record.system_code[systems..].fill(fill);
    record.area_code[areas..].fill(fill);
    record.end_service_code[areas..].fill(fill);
    record.service_code[services..].fill(fill);
}
