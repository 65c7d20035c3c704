#[path = "../common/mod.rs"]
mod common;

use felica::driver::mock::Call;
use felica::{BlockData, Error, ServiceCode};

#[test]
fn read_history_block() {
    let (mut felica, _driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();

    let block = felica
        .read_without_encryption(common::fixtures::history_service(), 0)
        .unwrap()
        .expect("block present");
    assert_eq!(
        hex::encode(block.as_bytes()),
        "1601000218a2100026b00000c2a00500"
    );
}

#[test]
fn missing_block_is_absent_not_error() {
    let (mut felica, _driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();

    let block = felica
        .read_without_encryption(ServiceCode::new(0x000b), 0)
        .unwrap();
    assert!(block.is_none());
}

#[test]
fn wildcard_poll_then_read_by_status() {
    let (mut felica, driver) = common::polled_mock_session(
        common::fixtures::transit_card().block(0x000b, 0, [0x11; 16]),
    )
    .unwrap();

    assert_eq!(
        felica
            .read_without_encryption(ServiceCode::new(0x000b), 0)
            .unwrap(),
        Some(BlockData::from_bytes([0x11; 16]))
    );

    driver.state().read_status = Some(0xa6);
    assert_eq!(
        felica
            .read_without_encryption(ServiceCode::new(0x000b), 0)
            .unwrap(),
        None
    );
}

#[test]
fn write_then_read_back() {
    let (mut felica, _driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();
    let svc = common::fixtures::rw_service();

    let status = felica.write_without_encryption(svc, 3, b"hello").unwrap();
    assert_eq!(status, 0);

    let block = felica.read_without_encryption(svc, 3).unwrap().unwrap();
    assert_eq!(&block.as_bytes()[..5], b"hello");
    assert!(block.as_bytes()[5..].iter().all(|&b| b == 0));
    assert_eq!(block.to_ascii_safe(), "hello...........");
}

#[test]
fn write_status_is_not_translated() {
    let (mut felica, driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();
    driver.state().write_status = -1;

    let status = felica
        .write_without_encryption(common::fixtures::rw_service(), 0, &[0xff; 16])
        .unwrap();
    assert_eq!(status, -1);
}

#[test]
fn write_checks_length_before_polling_state() {
    let (mut felica, driver) = common::mock_session(common::fixtures::transit_card()).unwrap();

    assert!(matches!(
        felica.write_without_encryption(common::fixtures::rw_service(), 0, &[0; 20]),
        Err(Error::DataTooLong { max: 16, actual: 20 })
    ));
    assert!(matches!(
        felica.write_without_encryption(common::fixtures::rw_service(), 0, &[0; 4]),
        Err(Error::NotPolled)
    ));
    assert_eq!(driver.state().count(|c| matches!(c, Call::Write { .. })), 0);
}
