//! The growable byte buffer.
//!
//! Storage is a `Vec<u8>` whose *length* is the allocated capacity; the
//! logical size is tracked separately. Keeping the spare bytes initialized
//! lets the buffer own an exact, policy-driven capacity and write a
//! terminator past the contents without touching uninitialized memory.
//!
//! Invariants
//! - `size <= data.len()`, where `data.len()` is the capacity.
//! - Once constructed, `data.len() >= 1`.
//! - `data.len()` never decreases.
//! - After a text append, clear, or truncate, `data[size] == 0`.

use alloc::vec::Vec;
use core::{ffi::CStr, fmt};

use bstr::{BStr, ByteSlice};

use crate::{
    error::BufferError,
    growth::GrowthPolicy,
    trace::{debug, trace},
};

/// A growable, binary-safe byte buffer that doubles as a NUL-terminated
/// string.
///
/// See the [crate documentation](crate) for the two append modes.
///
/// # Examples
///
/// ```rust
/// use wirestring::DynamicBuffer;
///
/// let mut buf = DynamicBuffer::new()?;
/// buf.append_bytes(&[0x00, 0x41, 0x00])?;
/// assert_eq!(buf.size(), 3);
/// assert_eq!(buf.data(), &[0x00, 0x41, 0x00]);
///
/// buf.clear();
/// assert!(buf.is_empty());
/// assert_eq!(buf.capacity(), 128);
/// # Ok::<(), wirestring::BufferError>(())
/// ```
#[derive(Clone)]
pub struct DynamicBuffer {
    data: Vec<u8>,
    size: usize,
    policy: GrowthPolicy,
}

impl DynamicBuffer {
    /// Creates an empty buffer with the default [`GrowthPolicy`].
    ///
    /// The new buffer holds an empty, NUL-terminated string: its size is 0,
    /// its capacity is 128 and the first allocated byte is a terminator.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailure`] if the initial allocation
    /// fails. Nothing is leaked in that case.
    pub fn new() -> Result<Self, BufferError> {
        Self::with_policy(GrowthPolicy::default())
    }

    /// Creates an empty buffer that grows according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailure`] if the first growth step
    /// fails, including when `policy.max_capacity` is zero.
    pub fn with_policy(policy: GrowthPolicy) -> Result<Self, BufferError> {
        let mut buffer = Self {
            data: Vec::new(),
            size: 0,
            policy,
        };
        // An empty text append allocates and writes the terminator.
        buffer.append_text("")?;
        Ok(buffer)
    }

    /// The policy this buffer grows by.
    #[must_use]
    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// Number of logically valid bytes, excluding any text-mode terminator.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of bytes currently allocated. Never decreases.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Bytes that can still be appended without growing.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.size
    }

    /// The appended bytes, in call order.
    ///
    /// The view is `size()` bytes long and borrows the buffer, so it cannot
    /// outlive the next append, clear or drop.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Mutable view of the appended bytes.
    ///
    /// Writes stay within the current contents; the size is unchanged.
    #[inline]
    #[must_use]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.size]
    }

    /// The contents as a byte string, for display and inspection.
    #[inline]
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.data().as_bstr()
    }

    /// Returns `true` if a terminator byte directly follows the contents.
    ///
    /// Always true after a text append, [`clear`](Self::clear) or
    /// [`truncate`](Self::truncate). After a byte append it reflects whatever
    /// byte happens to follow the contents.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.data.get(self.size) == Some(&0)
    }

    /// The contents as a C string.
    ///
    /// Returns `None` unless the contents are followed by a terminator and
    /// contain no NUL byte themselves.
    #[must_use]
    pub fn as_cstr(&self) -> Option<&CStr> {
        let with_nul = self.data.get(..=self.size)?;
        CStr::from_bytes_with_nul(with_nul).ok()
    }

    /// Consumes the buffer, returning exactly the appended bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        let mut data = self.data;
        data.truncate(self.size);
        data
    }

    /// Resets the buffer to an empty string.
    ///
    /// The size drops to 0 and a terminator is written at offset 0. Capacity
    /// is kept so that clear-and-refill cycles do not reallocate.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shortens the contents to `len` bytes and writes a terminator after
    /// them. Capacity is kept.
    ///
    /// Does nothing if `len` is not less than the current size. Together with
    /// a size snapshot this undoes a partially failed append:
    ///
    /// ```rust
    /// use wirestring::{DynamicBuffer, GrowthPolicy};
    ///
    /// let mut buf = DynamicBuffer::with_policy(GrowthPolicy::with_max_capacity(128))?;
    /// buf.append_text("keep")?;
    ///
    /// let before = buf.size();
    /// let err = buf.append_bytes(&[b'x'; 200]).unwrap_err();
    /// assert_eq!(err.committed(), 124);
    /// buf.truncate(before);
    /// assert_eq!(buf.data(), b"keep");
    /// # Ok::<(), wirestring::BufferError>(())
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len < self.size || len == 0 {
            self.size = len.min(self.size);
            if let Some(slot) = self.data.get_mut(self.size) {
                *slot = 0;
            }
        }
    }

    /// Appends text followed by a single terminator that is not counted in
    /// the size.
    ///
    /// The text ends at its first NUL byte, if any. Consecutive text appends
    /// concatenate: the terminator left by one is overwritten by the next.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailure`] if growing fails. The bytes
    /// written before the failure stay in the buffer and are counted in the
    /// size; no terminator follows them.
    pub fn append_text(&mut self, text: impl AsRef<[u8]>) -> Result<(), BufferError> {
        let text = text.as_ref();
        let text = match text.find_byte(0) {
            Some(end) => &text[..end],
            None => text,
        };
        self.append_chunks(&[text, b"\0".as_slice()])?;
        self.size -= 1;
        Ok(())
    }

    /// Appends a C string followed by a single terminator that is not counted
    /// in the size.
    ///
    /// # Errors
    ///
    /// Same as [`append_text`](Self::append_text).
    pub fn append_cstr(&mut self, text: &CStr) -> Result<(), BufferError> {
        self.append_chunks(&[text.to_bytes_with_nul()])?;
        self.size -= 1;
        Ok(())
    }

    /// Appends `bytes` verbatim, zero bytes included.
    ///
    /// Capacity grows one policy step at a time, exactly when the next byte
    /// would not fit.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailure`] if a growth step fails. The
    /// append stops there and is **not** rolled back: the bytes that fit
    /// remain, the size counts them, and the error's
    /// [`committed`](BufferError::committed) says how many there were. Use
    /// [`append_bytes_atomic`](Self::append_bytes_atomic) for all-or-nothing
    /// appends.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.append_chunks(&[bytes])
    }

    /// Appends `bytes` verbatim, or nothing at all.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailure`] with `committed == 0` if a
    /// growth step fails; the contents are restored to what they were before
    /// the call. Capacity gained by successful steps is kept.
    pub fn append_bytes_atomic(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let before = self.size;
        self.append_bytes(bytes).map_err(|err| {
            self.truncate(before);
            match err {
                BufferError::AllocationFailure { requested, .. } => {
                    BufferError::AllocationFailure {
                        requested,
                        committed: 0,
                    }
                }
                other => other,
            }
        })
    }

    /// Copies `chunks` back to back, growing whenever the buffer is full.
    fn append_chunks(&mut self, chunks: &[&[u8]]) -> Result<(), BufferError> {
        let mut committed = 0;
        for chunk in chunks {
            let mut rest = *chunk;
            while !rest.is_empty() {
                if self.size == self.data.len() {
                    self.grow(committed)?;
                }
                let n = rest.len().min(self.data.len() - self.size);
                let (head, tail) = rest.split_at(n);
                self.data[self.size..self.size + n].copy_from_slice(head);
                self.size += n;
                committed += n;
                rest = tail;
            }
        }
        Ok(())
    }

    /// Performs one growth step.
    fn grow(&mut self, committed: usize) -> Result<(), BufferError> {
        let current = self.data.len();
        let next = self.policy.checked_step(current).map_err(|requested| {
            debug!(current, requested, "growth step refused by policy");
            BufferError::AllocationFailure {
                requested,
                committed,
            }
        })?;
        if self.data.try_reserve_exact(next - current).is_err() {
            debug!(current, requested = next, "allocator refused growth step");
            return Err(BufferError::AllocationFailure {
                requested: next,
                committed,
            });
        }
        trace!(from = current, to = next, "growing buffer");
        self.data.resize(next, 0);
        Ok(())
    }
}

impl fmt::Debug for DynamicBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicBuffer")
            .field("data", &self.as_bstr())
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl AsRef<[u8]> for DynamicBuffer {
    fn as_ref(&self) -> &[u8] {
        self.data()
    }
}

impl AsRef<BStr> for DynamicBuffer {
    fn as_ref(&self) -> &BStr {
        self.as_bstr()
    }
}

impl PartialEq for DynamicBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data()
    }
}

impl Eq for DynamicBuffer {}

impl PartialEq<[u8]> for DynamicBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.data() == other
    }
}

impl PartialEq<&[u8]> for DynamicBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.data() == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for DynamicBuffer {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.data() == other.as_slice()
    }
}

impl PartialEq<str> for DynamicBuffer {
    fn eq(&self, other: &str) -> bool {
        self.data() == other.as_bytes()
    }
}

impl PartialEq<&str> for DynamicBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.data() == other.as_bytes()
    }
}
