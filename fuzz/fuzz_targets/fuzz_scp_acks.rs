#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary receiver output - this should never panic
    let _ = compose_deploy::infrastructure::ssh::scp::check_acks(data);
});
