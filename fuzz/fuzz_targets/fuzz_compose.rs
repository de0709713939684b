#![no_main]
use libfuzzer_sys::fuzz_target;
use ppc_asm::encoder::{compose, decompose, Field};

fuzz_target!(|data: &[u8]| {
    // Each 9-byte chunk is (width, signed, value as i64 big-endian).
    let fields: Vec<Field> = data
        .chunks_exact(9)
        .map(|chunk| {
            let mut value = [0u8; 8];
            value.copy_from_slice(&chunk[1..9]);
            Field {
                value: i64::from_be_bytes(value),
                width: chunk[0] & 0x3F,
                signed: chunk[0] & 0x80 != 0,
            }
        })
        .collect();

    if let Ok(word) = compose(&fields) {
        let widths: Vec<u8> = fields.iter().map(|f| f.width).collect();
        let parts = decompose(word, &widths).expect("valid layout must decompose");
        for (field, part) in fields.iter().zip(parts) {
            if !field.signed {
                assert_eq!(field.value as u32, part);
            }
        }
    }
});
