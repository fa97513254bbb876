#![no_main]

use bytestream::{ByteReader, ByteSource};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 6;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let _ = reader.read_i16();
            }
            2 => {
                let _ = reader.read_i32();
            }
            3 => {
                let _ = reader.read_i64();
            }
            4 => {
                let len = usize::from(data[idx.saturating_sub(1)] % 64);
                let _ = reader.read_vec(len);
            }
            _ => {
                let len = usize::from(data[idx.saturating_sub(1)] % 64);
                let _ = reader.skip(len);
            }
        }
        assert!(reader.position() <= data.len());
    }
});
