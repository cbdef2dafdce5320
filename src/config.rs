use crate::constants::HEAP_INCREMENT;

/// Tunables for a heap.
///
/// The defaults match the reference behavior. The `limit` exists so tests
/// and embedders can provoke exhaustion deterministically rather than
/// racing the host.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Bytes added to the managed region per growth step. Must be a
    /// multiple of the alignment boundary.
    pub increment: usize,
    /// Upper bound on the managed region, in bytes. `None` leaves growth
    /// limited only by the host allocator.
    pub limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            increment: HEAP_INCREMENT,
            limit: None,
        }
    }
}
