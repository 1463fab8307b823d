//! Free functions over optional buffers and sources.
//!
//! These mirror the nullable-handle contract callers ported from C-style APIs
//! expect: every argument may be absent. All functions are defensive.
//! Mutators report [`BufferError::InvalidArgument`] for an absent buffer or
//! source and leave a present buffer untouched; accessors report an empty view
//! or zero for an absent buffer.
//!
//! ```rust
//! use wirestring::{BufferError, handle};
//!
//! let mut buf = handle::create()?;
//! handle::append_text(Some(&mut buf), Some(b"ab"))?;
//! assert!(matches!(
//!     handle::append_text(Some(&mut buf), None),
//!     Err(BufferError::InvalidArgument(_))
//! ));
//! assert_eq!(handle::data(Some(&buf)), b"ab");
//! assert_eq!(handle::size(None), 0);
//! handle::destroy(Some(buf));
//! # Ok::<(), BufferError>(())
//! ```

use crate::{buffer::DynamicBuffer, error::BufferError};

const NO_BUFFER: &str = "buffer is absent";
const NO_SOURCE: &str = "source is absent";

/// Creates an empty, NUL-terminated buffer.
///
/// # Errors
///
/// See [`DynamicBuffer::new`].
pub fn create() -> Result<DynamicBuffer, BufferError> {
    DynamicBuffer::new()
}

/// Releases a buffer. Does nothing for `None`.
#[allow(clippy::needless_pass_by_value)]
pub fn destroy(buffer: Option<DynamicBuffer>) {
    drop(buffer);
}

/// Empties a buffer, keeping its capacity. Does nothing for `None`.
pub fn clear(buffer: Option<&mut DynamicBuffer>) {
    if let Some(buffer) = buffer {
        buffer.clear();
    }
}

/// Appends text in text mode.
///
/// # Errors
///
/// [`BufferError::InvalidArgument`] if either argument is absent, otherwise
/// as [`DynamicBuffer::append_text`].
pub fn append_text(
    buffer: Option<&mut DynamicBuffer>,
    text: Option<&[u8]>,
) -> Result<(), BufferError> {
    let (buffer, text) = present(buffer, text)?;
    buffer.append_text(text)
}

/// Appends bytes verbatim.
///
/// # Errors
///
/// [`BufferError::InvalidArgument`] if either argument is absent, otherwise
/// as [`DynamicBuffer::append_bytes`].
pub fn append_bytes(
    buffer: Option<&mut DynamicBuffer>,
    bytes: Option<&[u8]>,
) -> Result<(), BufferError> {
    let (buffer, bytes) = present(buffer, bytes)?;
    buffer.append_bytes(bytes)
}

/// The buffer's contents, or an empty view for `None`.
#[must_use]
pub fn data(buffer: Option<&DynamicBuffer>) -> &[u8] {
    buffer.map(DynamicBuffer::data).unwrap_or_default()
}

/// The buffer's size, or zero for `None`.
#[must_use]
pub fn size(buffer: Option<&DynamicBuffer>) -> usize {
    buffer.map_or(0, DynamicBuffer::size)
}

/// The buffer's capacity, or zero for `None`.
#[must_use]
pub fn capacity(buffer: Option<&DynamicBuffer>) -> usize {
    buffer.map_or(0, DynamicBuffer::capacity)
}

fn present<'b, 's>(
    buffer: Option<&'b mut DynamicBuffer>,
    source: Option<&'s [u8]>,
) -> Result<(&'b mut DynamicBuffer, &'s [u8]), BufferError> {
    let buffer = buffer.ok_or(BufferError::InvalidArgument(NO_BUFFER))?;
    let source = source.ok_or(BufferError::InvalidArgument(NO_SOURCE))?;
    Ok((buffer, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_buffer_is_rejected() {
        assert_eq!(
            append_text(None, Some(b"x")),
            Err(BufferError::InvalidArgument(NO_BUFFER))
        );
        assert_eq!(
            append_bytes(None, Some(b"x")),
            Err(BufferError::InvalidArgument(NO_BUFFER))
        );
    }

    #[test]
    fn absent_source_leaves_buffer_unchanged() {
        let mut buf = create().unwrap();
        append_text(Some(&mut buf), Some(b"keep")).unwrap();
        let before = buf.clone();

        assert_eq!(
            append_text(Some(&mut buf), None),
            Err(BufferError::InvalidArgument(NO_SOURCE))
        );
        assert_eq!(
            append_bytes(Some(&mut buf), None),
            Err(BufferError::InvalidArgument(NO_SOURCE))
        );
        assert_eq!(buf, before);
        assert_eq!(buf.capacity(), before.capacity());
        assert!(buf.is_terminated());
    }

    #[test]
    fn accessors_tolerate_absent_buffer() {
        assert!(data(None).is_empty());
        assert_eq!(size(None), 0);
        assert_eq!(capacity(None), 0);
        clear(None);
        destroy(None);
    }

    #[test]
    fn present_buffer_round_trip() {
        let mut buf = create().unwrap();
        append_bytes(Some(&mut buf), Some(&[0, 1, 0])).unwrap();
        assert_eq!(data(Some(&buf)), [0, 1, 0]);
        assert_eq!(size(Some(&buf)), 3);
        assert_eq!(capacity(Some(&buf)), 128);

        clear(Some(&mut buf));
        assert_eq!(size(Some(&buf)), 0);
        assert_eq!(capacity(Some(&buf)), 128);
        destroy(Some(buf));
    }
}
