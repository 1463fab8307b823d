//! A growable, binary-safe byte buffer that doubles as a NUL-terminated
//! string.
//!
//! [`DynamicBuffer`] accumulates text or binary payloads of unknown final
//! length. Bytes can be appended in two modes:
//!
//! - **byte mode** ([`DynamicBuffer::append_bytes`]) copies an exact number of
//!   bytes verbatim, embedded zero bytes included;
//! - **text mode** ([`DynamicBuffer::append_text`]) copies text up to its
//!   first NUL and keeps a single terminator after the last byte, excluded
//!   from [`DynamicBuffer::size`], so consecutive text appends concatenate.
//!
//! Capacity grows lazily following a [`GrowthPolicy`]: 128 bytes, doubling up
//! to 4096, then 4096 bytes at a time. It never shrinks.
//!
//! ```rust
//! use wirestring::DynamicBuffer;
//!
//! let mut buf = DynamicBuffer::new()?;
//! buf.append_text("ab")?;
//! buf.append_text("cd")?;
//! assert_eq!(buf.data(), b"abcd");
//! assert_eq!(buf.size(), 4);
//! assert_eq!(buf.capacity(), 128);
//! # Ok::<(), wirestring::BufferError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod error;
mod growth;
pub mod handle;
mod trace;

#[cfg(test)]
mod tests;

pub use buffer::DynamicBuffer;
pub use error::BufferError;
pub use growth::{GrowthPolicy, GrowthSteps};
