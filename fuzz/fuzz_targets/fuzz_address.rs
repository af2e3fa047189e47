#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(address) = compose_deploy::domain::value_objects::Address::parse(raw) {
            assert_eq!(format!("{}:{}", address.ip(), address.port()), raw);
        }
    }
});
