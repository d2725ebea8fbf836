#![no_main]

use libfuzzer_sys::fuzz_target;

use clui_console::KeyDecoder;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte picks where the input is split into two bursts
    let split = usize::from(data[0]) % data.len();
    let (first, second) = data[1..].split_at(split.min(data.len() - 1));

    let mut decoder = KeyDecoder::new();
    let _ = decoder.feed(first);
    assert!(decoder.pending().len() < 4, "more than a partial character held back");
    let _ = decoder.feed(second);
    assert!(decoder.pending().len() < 4, "more than a partial character held back");

    decoder.reset();
    assert!(decoder.pending().is_empty());
});
