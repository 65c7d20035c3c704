#![cfg(feature = "native")]

#[path = "common.rs"]
mod common;

use felica::{Result, ServiceCode};
use serial_test::serial;

// These tests need a PaSoRi reader and felicalib installed, and some need a
// card on the reader. Run manually with:
//
// cargo test -p felica --test hardware --features native -- --ignored

#[test]
#[ignore]
#[serial]
fn open_and_close_reader() -> Result<()> {
    if let Some(mut felica) = common::open_reader()? {
        felica.close();
        felica.close();
        assert!(!felica.is_open());
    }
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn poll_and_read_first_block() -> Result<()> {
    let Some(mut felica) = common::open_reader()? else {
        return Ok(());
    };
    let info = felica.poll_any()?;
    assert!(!info.idm().is_zero());

    // 0x000b is present on most transit cards; absence is not an error
    let _ = felica.read_without_encryption(ServiceCode::new(0x000b), 0)?;
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn enumerate_systems() -> Result<()> {
    let Some(mut felica) = common::open_reader()? else {
        return Ok(());
    };
    let systems = felica.enum_system_codes()?;
    assert!(systems.len() <= 8);
    Ok(())
}
