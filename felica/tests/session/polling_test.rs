#[path = "../common/mod.rs"]
mod common;

use felica::driver::mock::Call;
use felica::{Error, SystemCode};

#[test]
fn polling_returns_card_info() {
    let (mut felica, _driver) = common::mock_session(common::fixtures::transit_card()).unwrap();

    let info = felica.polling(SystemCode::SUICA).unwrap();
    assert_eq!(info.idm(), &common::fixtures::sample_idm());
    assert_eq!(info.pmm(), &common::fixtures::sample_pmm());
    assert_eq!(info.system_code(), SystemCode::SUICA);
    assert_eq!(felica.card_info(), Some(info));
    assert_eq!(
        felica.idm().unwrap().to_hex(),
        "0102030405060708"
    );
}

#[test]
fn polling_unknown_system_code_fails() {
    let (mut felica, _driver) = common::mock_session(common::fixtures::transit_card()).unwrap();
    assert!(matches!(
        felica.polling(SystemCode::QUICPAY),
        Err(Error::PollingFailed)
    ));
    assert!(!felica.is_polled());
}

#[test]
fn repolling_frees_previous_card_first() {
    let (mut felica, driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();

    driver.set_card(Some(common::fixtures::other_card()));
    let info = felica.poll_any().unwrap();
    assert_eq!(info.idm().as_bytes(), &[0xAA; 8]);

    let calls = driver.calls();
    let second_poll = calls
        .iter()
        .rposition(|c| matches!(c, Call::Polling { .. }))
        .unwrap();
    assert_eq!(calls[second_poll - 1], Call::Free);
    assert_eq!(driver.state().live_cards(), 1);
}

#[test]
fn failed_repoll_invalidates_old_identity() {
    let (mut felica, driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();
    assert!(felica.idm().is_ok());

    driver.set_card(None);
    assert!(felica.poll_any().is_err());
    assert!(matches!(felica.idm(), Err(Error::NotPolled)));
    assert!(felica.card_info().is_none());
}
