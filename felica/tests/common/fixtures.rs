// fixtures.rs — commonly used cards and block payloads

use felica::driver::MockCard;
use felica::types::{Idm, Pmm, ServiceCode, SystemCode};

pub fn sample_idm_bytes() -> [u8; 8] {
    [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
}

pub fn sample_pmm_bytes() -> [u8; 8] {
    [0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10]
}

pub fn sample_idm() -> Idm {
    Idm::from_bytes(sample_idm_bytes())
}

pub fn sample_pmm() -> Pmm {
    Pmm::from_bytes(sample_pmm_bytes())
}

/// Random-access read-only history service
pub fn history_service() -> ServiceCode {
    ServiceCode::new(0x090f)
}

/// Random-access read/write service
pub fn rw_service() -> ServiceCode {
    ServiceCode::new(0x0009)
}

pub fn block_bytes(hex_str: &str) -> [u8; 16] {
    let v = hex::decode(hex_str).unwrap();
    v.try_into().unwrap()
}

pub fn history_block() -> [u8; 16] {
    block_bytes("1601000218a2100026b00000c2a00500")
}

/// A transit-style card: cyberne + common systems, a couple of services
/// and one history block.
pub fn transit_card() -> MockCard {
    MockCard::new(sample_idm_bytes(), sample_pmm_bytes())
        .system_code(SystemCode::CYBERNE.as_u16())
        .system_codes(&[SystemCode::CYBERNE.as_u16(), SystemCode::COMMON.as_u16()])
        .area(0x0000, 0xfffe)
        .area(0x0040, 0x07ff)
        .service_codes(&[0x0009, 0x000b, 0x090f, 0x1008])
        .block(0x090f, 0, history_block())
}

/// Card whose IDm differs from `transit_card`.
pub fn other_card() -> MockCard {
    MockCard::new([0xAA; 8], [0xBB; 8])
        .system_code(SystemCode::QUICPAY.as_u16())
        .system_codes(&[SystemCode::QUICPAY.as_u16()])
}
