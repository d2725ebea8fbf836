#![no_main]

use libfuzzer_sys::fuzz_target;

use clui_core::container::{distribute_width, min_total_width, Slot};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // Each byte is a slot: high bit scalable, low bits the width
    let slots: Vec<Slot> = data[1..]
        .iter()
        .take(32)
        .map(|&b| {
            let width = usize::from(b & 0x1f) + 1;
            if b & 0x80 != 0 {
                Slot::scalable(width)
            } else {
                Slot::fixed(width)
            }
        })
        .collect();
    let min = min_total_width(&slots);
    let total = min + usize::from(data[0]);

    let widths = distribute_width(total, &slots).expect("total covers the minimum");
    assert_eq!(widths.len(), slots.len());
    for (width, slot) in widths.iter().zip(&slots) {
        if slot.scalable {
            assert!(*width >= slot.min_width);
        } else {
            assert_eq!(*width, slot.width);
        }
    }
    let sum: usize = widths.iter().sum();
    if slots.iter().any(|s| s.scalable) {
        assert_eq!(sum, total);
    } else {
        assert_eq!(sum, min);
    }
    if min > 0 {
        assert!(distribute_width(min - 1, &slots).is_err());
    }
});
