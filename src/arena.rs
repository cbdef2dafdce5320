use crate::error::AllocError;

/// The contiguous managed region, standing in for the OS break.
///
/// The vector's length is the current break. Growth happens in fixed
/// increments only; an optional byte limit makes exhaustion observable
/// instead of unbounded.
pub(crate) struct Arena {
    bytes: Vec<u8>,
    increment: usize,
    limit: Option<usize>,
}

impl Arena {
    pub fn new(increment: usize, limit: Option<usize>) -> Self {
        debug_assert!(increment > 0);

        Self {
            bytes: Vec::new(),
            increment,
            limit,
        }
    }

    /// Current break: one past the last managed byte.
    pub fn brk(&self) -> usize {
        self.bytes.len()
    }

    /// Extends the region by one increment.
    pub fn extend(&mut self) -> Result<(), AllocError> {
        let next = self.brk() + self.increment;

        if self.limit.is_some_and(|limit| next > limit) {
            return Err(AllocError::OutOfMemory);
        }

        self.bytes.resize(next, 0);

        Ok(())
    }

    /// Extends until the break covers `end`.
    pub fn grow_until(&mut self, end: usize) -> Result<(), AllocError> {
        while self.brk() < end {
            self.extend()?;
        }

        Ok(())
    }

    pub fn slice(&self, start: usize, len: usize) -> &[u8] {
        &self.bytes[start..start + len]
    }

    pub fn slice_mut(&mut self, start: usize, len: usize) -> &mut [u8] {
        &mut self.bytes[start..start + len]
    }

    pub fn fill_zero(&mut self, start: usize, len: usize) {
        self.bytes[start..start + len].fill(0);
    }

    /// Copies `len` bytes from one payload range to another. The ranges may
    /// overlap.
    pub fn copy(&mut self, src: usize, dst: usize, len: usize) {
        self.bytes.copy_within(src..src + len, dst);
    }
}
