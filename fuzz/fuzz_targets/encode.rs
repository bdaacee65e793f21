#![no_main]
use std::collections::HashMap;
use std::io::Cursor;

use huffpack::{compress, Config, Error};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let mut out = Vec::new();
    let summary = match compress(&mut Cursor::new(&data), &mut out, &Config::default()) {
        Ok(s) => s,
        Err(Error::EmptyInput) => {
            assert!(data.is_empty());
            return;
        }
        Err(e) => panic!("unexpected error: {e}"),
    };

    assert_eq!(out.len() as u64, summary.total_bits.div_ceil(8));

    // Greedy decode with the codebook must give the input back.
    let lookup: HashMap<Vec<bool>, u8> = summary
        .codebook
        .iter()
        .map(|(b, c)| (c.bits().to_vec(), b))
        .collect();
    let mut decoded = Vec::with_capacity(data.len());
    let mut current = Vec::new();
    for bit in out.iter().flat_map(|byte| (0..8).rev().map(move |s| (byte >> s) & 1 == 1)) {
        if decoded.len() == data.len() {
            break;
        }
        current.push(bit);
        if let Some(&sym) = lookup.get(&current) {
            decoded.push(sym);
            current.clear();
        }
    }
    assert_eq!(decoded, data);
});
