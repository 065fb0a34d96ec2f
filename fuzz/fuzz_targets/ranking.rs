#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    seedselect_fuzz::fuzz_ranking(data);
});
