use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::ops::Op;
use crate::{DynamicBuffer, GrowthPolicy};

fn tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}

/// Property: any sequence of appends, clears and truncations leaves the
/// buffer holding exactly what a plain `Vec` model holds, with
/// `size <= capacity` and a never-shrinking capacity that only ever takes
/// values from the growth sequence.
#[test]
fn matches_vec_model_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Op>) -> bool {
        let mut buf = DynamicBuffer::new().unwrap();
        let mut model = Vec::new();
        let mut last_capacity = buf.capacity();

        for op in &ops {
            let size_before = buf.size();
            op.apply(&mut buf);
            op.apply_model(&mut model);

            if buf.data() != model.as_slice() || buf.size() != model.len() {
                return false;
            }
            if buf.size() > buf.capacity() || buf.capacity() < last_capacity {
                return false;
            }
            if buf.capacity() != last_capacity
                && !GrowthPolicy::default()
                    .steps(0)
                    .take_while(|&cap| cap <= buf.capacity())
                    .any(|cap| cap == buf.capacity())
            {
                return false;
            }
            if op.terminates(size_before) && !buf.is_terminated() {
                return false;
            }
            last_capacity = buf.capacity();
        }
        true
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

/// Property: one large append reaches the same capacity as appending the
/// same bytes one at a time.
#[test]
fn bulk_append_matches_bytewise_quickcheck() {
    fn prop(prefix: u16, len: u16) -> bool {
        let prefix = usize::from(prefix % 5000);
        let len = usize::from(len);

        let mut bulk = DynamicBuffer::new().unwrap();
        let mut bytewise = DynamicBuffer::new().unwrap();
        for buf in [&mut bulk, &mut bytewise] {
            buf.append_bytes(&alloc::vec![b'p'; prefix]).unwrap();
        }

        bulk.append_bytes(&alloc::vec![b'q'; len]).unwrap();
        for _ in 0..len {
            bytewise.append_bytes(b"q").unwrap();
        }

        bulk == bytewise && bulk.capacity() == bytewise.capacity()
    }

    QuickCheck::new()
        .tests(tests().min(500))
        .quickcheck(prop as fn(u16, u16) -> bool);
}

/// Property: with a capacity ceiling, a failed append commits exactly the
/// bytes that fit, and the contents stay a prefix of the model.
#[test]
fn ceiling_commits_prefix_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(chunks: Vec<Vec<u8>>) -> bool {
        let policy = GrowthPolicy::with_max_capacity(512);
        let mut buf = DynamicBuffer::with_policy(policy).unwrap();
        let mut model = Vec::new();

        for chunk in &chunks {
            let before = buf.size();
            model.extend_from_slice(chunk);
            match buf.append_bytes(chunk) {
                Ok(()) => {
                    if buf.size() != before + chunk.len() {
                        return false;
                    }
                }
                Err(err) => {
                    return err.committed() == 512 - before
                        && buf.size() == 512
                        && buf.capacity() == 512
                        && model.starts_with(buf.data());
                }
            }
        }
        buf.data() == model.as_slice()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Vec<u8>>) -> bool);
}
