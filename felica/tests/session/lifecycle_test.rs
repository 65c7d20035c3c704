#[path = "../common/mod.rs"]
mod common;

use felica::driver::mock::Call;
use felica::driver::MockDriver;
use felica::{Error, Felica, ServiceCode, SystemCode};

#[test]
fn open_poll_close_releases_everything() {
    let (mut felica, driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();
    assert_eq!(driver.state().live_readers(), 1);
    assert_eq!(driver.state().live_cards(), 1);

    felica.close();
    assert_eq!(driver.state().live_readers(), 0);
    assert_eq!(driver.state().live_cards(), 0);
    assert_eq!(driver.state().invalid_releases, 0);
}

#[test]
fn drop_releases_handles() {
    let driver = MockDriver::with_card(common::fixtures::transit_card());
    {
        let mut felica = common::open_mock(&driver).unwrap();
        felica.enum_system_codes().unwrap();
    }
    assert_eq!(driver.state().live_readers(), 0);
    assert_eq!(driver.state().live_cards(), 0);
}

#[test]
fn double_close_is_harmless() {
    let (mut felica, driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();
    felica.close();
    felica.close();
    drop(felica);

    let st = driver.state();
    assert_eq!(st.count(|c| *c == Call::Close), 1);
    assert_eq!(st.count(|c| *c == Call::Free), 1);
    assert_eq!(st.invalid_releases, 0);
}

#[test]
fn closed_session_rejects_every_operation() {
    let (mut felica, driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();
    felica.close();

    assert!(matches!(felica.polling(SystemCode::ANY), Err(Error::NotOpen)));
    assert!(matches!(felica.enum_system_codes(), Err(Error::NotOpen)));
    assert!(matches!(
        felica.enum_service_codes(SystemCode::COMMON),
        Err(Error::NotOpen)
    ));
    assert!(matches!(
        felica.read_without_encryption(ServiceCode::new(0x000b), 0),
        Err(Error::NotPolled)
    ));
    assert!(matches!(
        felica.write_without_encryption(ServiceCode::new(0x0009), 0, &[0; 16]),
        Err(Error::NotPolled)
    ));
    assert!(matches!(felica.idm(), Err(Error::NotPolled)));
    assert!(matches!(felica.pmm(), Err(Error::NotPolled)));
    assert!(matches!(felica.area_codes(), Err(Error::NotPolled)));

    // nothing reached the driver with a dead handle
    assert_eq!(driver.state().stale_uses, 0);
}

#[test]
fn failed_init_leaves_no_open_reader() {
    let driver = MockDriver::new();
    driver.state().init_status = 1;

    match common::open_mock(&driver) {
        Err(Error::DeviceInit { status: 1 }) => {}
        other => panic!("expected DeviceInit, got {:?}", other),
    }
    assert_eq!(driver.state().live_readers(), 0);
    assert_eq!(driver.state().count(|c| *c == Call::Close), 1);
}

#[test]
fn builder_opens_with_selector() {
    let driver = MockDriver::new();
    let felica = Felica::builder()
        .device("COM3")
        .driver(Box::new(driver.clone()))
        .open()
        .unwrap();
    assert!(felica.is_open());
    assert!(!felica.is_polled());
    assert_eq!(driver.calls()[0], Call::Open(Some("COM3".to_string())));
}
