#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Inventory loading must reject bad documents, never panic
    if let Ok(loaded) = compose_deploy::infrastructure::load_inventory(data) {
        let _ = loaded.inventory.validate();
        for host in &loaded.inventory.hosts {
            let _ = loaded.inventory.find_host(&host.name);
        }
    }
});
