//! Capacity growth policy.
//!
//! Capacity starts at [`GrowthPolicy::initial_capacity`], doubles while it is
//! below [`GrowthPolicy::doubling_limit`] and then grows by
//! [`GrowthPolicy::linear_increment`] per step. With the default policy the
//! sequence is:
//!
//! ```text
//! 128, 256, 512, 1024, 2048, 4096, 8192, 12288, 16384, ...
//! ```
//!
//! Doubling keeps appends amortized O(1) for small buffers while the linear
//! tail bounds over-allocation for large ones.

/// Configuration of the capacity growth steps.
///
/// # Examples
///
/// ```rust
/// use wirestring::GrowthPolicy;
///
/// let policy = GrowthPolicy::default();
/// let caps: Vec<usize> = policy.steps(0).take(8).collect();
/// assert_eq!(caps, [128, 256, 512, 1024, 2048, 4096, 8192, 12288]);
/// ```
///
/// # Default
///
/// `initial_capacity = 128`, `doubling_limit = 4096`,
/// `linear_increment = 4096`, `max_capacity = None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Capacity of the first allocation, made when growing from zero.
    ///
    /// A value of zero is treated as one.
    ///
    /// # Default
    ///
    /// `128`
    pub initial_capacity: usize,

    /// Capacity below which each step doubles.
    ///
    /// # Default
    ///
    /// `4096`
    pub doubling_limit: usize,

    /// Bytes added per step once capacity has reached `doubling_limit`.
    ///
    /// A value of zero is treated as one.
    ///
    /// # Default
    ///
    /// `4096`
    pub linear_increment: usize,

    /// Largest capacity a growth step may produce.
    ///
    /// A step that would exceed the ceiling fails as if the allocator had
    /// refused it, which leaves the buffer in the documented partial-write
    /// state. `None` means no ceiling other than the allocator.
    ///
    /// # Default
    ///
    /// `None`
    pub max_capacity: Option<usize>,
}

impl GrowthPolicy {
    /// First capacity allocated by the default policy.
    pub const INITIAL_CAPACITY: usize = 128;
    /// Capacity at which the default policy stops doubling.
    pub const DOUBLING_LIMIT: usize = 4096;
    /// Per-step increment of the default policy past the doubling limit.
    pub const LINEAR_INCREMENT: usize = 4096;

    /// The default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_capacity: Self::INITIAL_CAPACITY,
            doubling_limit: Self::DOUBLING_LIMIT,
            linear_increment: Self::LINEAR_INCREMENT,
            max_capacity: None,
        }
    }

    /// The default policy with a capacity ceiling.
    #[must_use]
    pub const fn with_max_capacity(max_capacity: usize) -> Self {
        Self {
            max_capacity: Some(max_capacity),
            ..Self::new()
        }
    }

    /// Capacity after one growth step from `current`, ignoring
    /// `max_capacity`.
    ///
    /// Returns `None` if the step overflows `usize`.
    #[must_use]
    pub fn next_capacity(&self, current: usize) -> Option<usize> {
        if current == 0 {
            Some(self.initial_capacity.max(1))
        } else if current < self.doubling_limit {
            current.checked_mul(2)
        } else {
            current.checked_add(self.linear_increment.max(1))
        }
    }

    /// Capacity after one growth step from `current`, or `Err(requested)`
    /// when the step overflows or exceeds `max_capacity`.
    ///
    /// `requested` is the capacity the step asked for, saturated at
    /// `usize::MAX` on overflow.
    pub(crate) fn checked_step(&self, current: usize) -> Result<usize, usize> {
        match self.next_capacity(current) {
            Some(next) if self.max_capacity.is_none_or(|max| next <= max) => Ok(next),
            Some(next) => Err(next),
            None => Err(usize::MAX),
        }
    }

    /// Iterator over the capacities successive growth steps produce, starting
    /// after `from`.
    ///
    /// The iterator ends when a step would overflow or exceed
    /// `max_capacity`.
    #[must_use]
    pub fn steps(&self, from: usize) -> GrowthSteps {
        GrowthSteps {
            policy: *self,
            current: from,
        }
    }

    /// Capacity the buffer ends up with when `required` bytes must fit,
    /// starting from `current`, stepping one growth at a time.
    ///
    /// Returns `current` if it already suffices and `None` if the steps run
    /// out before reaching `required`.
    #[must_use]
    pub fn capacity_for(&self, current: usize, required: usize) -> Option<usize> {
        if required <= current {
            return Some(current);
        }
        self.steps(current).find(|&cap| cap >= required)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`GrowthPolicy::steps`].
#[derive(Debug, Clone)]
pub struct GrowthSteps {
    policy: GrowthPolicy,
    current: usize,
}

impl Iterator for GrowthSteps {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let next = self.policy.checked_step(self.current).ok()?;
        self.current = next;
        Some(next)
    }
}
