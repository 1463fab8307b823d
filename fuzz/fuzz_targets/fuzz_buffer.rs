#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wirestring::{BufferError, DynamicBuffer, GrowthPolicy};

#[derive(Debug, Arbitrary)]
enum Op {
    Text(Vec<u8>),
    Bytes(Vec<u8>),
    Atomic(Vec<u8>),
    Fill(u8, u16),
    Clear,
    Truncate(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    /// Optional ceiling, in multiples of 64 bytes.
    ceiling: Option<u8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let policy = match input.ceiling {
        Some(units) => GrowthPolicy::with_max_capacity(usize::from(units) * 64),
        None => GrowthPolicy::default(),
    };
    let Ok(mut buf) = DynamicBuffer::with_policy(policy) else {
        // Only a ceiling below the first step can refuse construction.
        assert!(input.ceiling.is_some_and(|units| usize::from(units) * 64 < 128));
        return;
    };
    let mut model: Vec<u8> = Vec::new();

    for op in &input.ops {
        let capacity_before = buf.capacity();
        let size_before = buf.size();
        let result = match op {
            Op::Text(text) => {
                let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
                model.extend_from_slice(&text[..end]);
                buf.append_text(text)
            }
            Op::Bytes(bytes) => {
                model.extend_from_slice(bytes);
                buf.append_bytes(bytes)
            }
            Op::Atomic(bytes) => {
                let result = buf.append_bytes_atomic(bytes);
                if result.is_ok() {
                    model.extend_from_slice(bytes);
                }
                result
            }
            Op::Fill(byte, len) => {
                let bytes = vec![*byte; usize::from(*len)];
                model.extend_from_slice(&bytes);
                buf.append_bytes(&bytes)
            }
            Op::Clear => {
                model.clear();
                buf.clear();
                Ok(())
            }
            Op::Truncate(len) => {
                model.truncate(usize::from(*len));
                buf.truncate(usize::from(*len));
                Ok(())
            }
        };

        match result {
            Ok(()) => assert_eq!(buf.data(), model.as_slice()),
            Err(BufferError::AllocationFailure { committed, .. }) => {
                // Partial writes keep what fit; the model keeps it all.
                assert_eq!(buf.size(), size_before + committed);
                assert!(model.starts_with(buf.data()));
                model.truncate(buf.size());
            }
            Err(err) => panic!("unexpected error {err:?}"),
        }
        assert!(buf.size() <= buf.capacity());
        assert!(buf.capacity() >= capacity_before);
    }
});
