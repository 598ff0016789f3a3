#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = deadwood_decay::io::read_mortality_csv_from_bytes(data);
});
