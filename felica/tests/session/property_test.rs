#[path = "../common/mod.rs"]
mod common;

use felica::driver::mock::Call;
use felica::driver::{MockCard, MockDriver};
use felica::{Error, SystemCode};
use proptest::prelude::*;

proptest! {
    #[test]
    fn short_writes_are_zero_padded(data in proptest::collection::vec(any::<u8>(), 0..=16)) {
        let (mut felica, driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();
        felica.write_without_encryption(common::fixtures::rw_service(), 0, &data).unwrap();

        let sent = driver.calls().into_iter().find_map(|c| match c {
            Call::Write { data, .. } => Some(data),
            _ => None,
        }).unwrap();
        prop_assert_eq!(&sent[..data.len()], &data[..]);
        prop_assert!(sent[data.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn long_writes_never_reach_driver(len in 17usize..64) {
        let (mut felica, driver) = common::polled_mock_session(common::fixtures::transit_card()).unwrap();
        let data = vec![0x5a; len];

        let is_too_long = matches!(
            felica.write_without_encryption(common::fixtures::rw_service(), 0, &data),
            Err(Error::DataTooLong { .. })
        );
        prop_assert!(is_too_long);
        prop_assert_eq!(driver.state().count(|c| matches!(c, Call::Write { .. })), 0);
    }

    #[test]
    fn system_code_count_is_clamped(reported in any::<u8>()) {
        let codes: Vec<u16> = (1..=8).collect();
        let driver = MockDriver::with_card(MockCard::new([1; 8], [2; 8]).system_codes(&codes));
        driver.state().reported_system_code_count = Some(reported);
        let mut felica = common::open_mock(&driver).unwrap();

        let systems = felica.enum_system_codes().unwrap();
        prop_assert_eq!(systems.len(), usize::from(reported).min(8));
        for (got, want) in systems.iter().zip(&codes) {
            prop_assert_eq!(*got, SystemCode::new(*want));
        }
    }

    #[test]
    fn service_code_count_is_clamped(reported in any::<u8>()) {
        let codes: Vec<u16> = (0..255).collect();
        let driver = MockDriver::with_card(MockCard::new([1; 8], [2; 8]).service_codes(&codes));
        driver.state().reported_service_code_count = Some(reported);
        let mut felica = common::open_mock(&driver).unwrap();

        let services = felica.enum_service_codes(SystemCode::ANY).unwrap();
        prop_assert!(services.len() <= 256);
        prop_assert_eq!(services.len(), usize::from(reported));
    }
}
