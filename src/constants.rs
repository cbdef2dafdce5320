/// All block sizes are rounded up to a multiple of this boundary.
pub const ALIGN: usize = 16;

/// Bytes reserved in the arena ahead of every payload. One alignment unit,
/// so payload offsets stay aligned.
pub const HEADER_SIZE: usize = 16;

/// The break grows by this many bytes per extension.
pub const HEAP_INCREMENT: usize = 64 * 1024;

/// A split only happens when the leftover exceeds this, otherwise the block
/// stays oversized rather than leaving an unusably small fragment.
pub const MIN_SPLIT: usize = HEADER_SIZE + 1;

/// `None` when rounding would leave the address space.
pub const fn align_up(size: usize) -> Option<usize> {
    match size.checked_add(ALIGN - 1) {
        Some(bumped) => Some(bumped & !(ALIGN - 1)),
        None => None,
    }
}

/// Request size to aligned payload size. A zero-byte request rounds to the
/// minimum block size instead of wrapping.
pub const fn align_request(size: usize) -> Option<usize> {
    if size == 0 {
        Some(ALIGN)
    } else {
        align_up(size)
    }
}
