use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The managed region could not be extended far enough to back the
    /// request.
    #[error("out of memory: the managed region cannot grow further")]
    OutOfMemory,
    /// `count * size` overflowed while sizing a zeroed allocation.
    #[error("allocation size overflow")]
    SizeOverflow,
}
