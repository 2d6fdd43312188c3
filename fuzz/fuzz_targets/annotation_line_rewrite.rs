//! Fuzz target for single-line annotation rewriting.
//!
//! This fuzzer feeds arbitrary UTF-8 lines to the line rewriter,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use yoloremap::remap::rewrite::fuzz_rewrite_line;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_rewrite_line(line);
});
