use thiserror::Error;

/// Errors reported by the mutating operations of
/// [`DynamicBuffer`](crate::DynamicBuffer).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A growth step could not obtain more memory.
    ///
    /// The append that hit the failure is not rolled back: `committed` bytes
    /// of it were written and are counted in
    /// [`size`](crate::DynamicBuffer::size).
    #[error("failed to grow buffer to {requested} bytes ({committed} bytes committed)")]
    AllocationFailure {
        /// Capacity the failed growth step asked for, saturated at
        /// `usize::MAX` when the step itself overflowed.
        requested: usize,
        /// Bytes of the failing append that were written before the failure.
        committed: usize,
    },
    /// A required handle or data source was absent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl BufferError {
    /// Number of bytes an append wrote before failing. Zero for
    /// [`BufferError::InvalidArgument`].
    #[must_use]
    pub fn committed(&self) -> usize {
        match self {
            BufferError::AllocationFailure { committed, .. } => *committed,
            BufferError::InvalidArgument(_) => 0,
        }
    }
}
