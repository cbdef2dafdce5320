//! A first-fit free-list allocator over a growable arena.
//!
//! A [`Heap`] manages one contiguous region that grows in fixed increments.
//! Every payload is preceded by a fixed header reservation and tracked in an
//! address-ordered chain of blocks; allocation is a first-fit scan, release
//! coalesces with free neighbors, and resize stays address-stable whenever
//! the block can shrink, grow into a free successor, or widen the trailing
//! wilderness block in place.
//!
//! Payload addresses are byte offsets into the heap's own region, wrapped in
//! [`Ptr`]. Exhaustion is a recoverable [`AllocError`], and an optional
//! [`Observer`] hook reports each completed operation.

mod arena;
mod block;
mod chain;
mod config;
mod constants;
mod error;
mod heap;
mod trace;

pub use block::{BlockInfo, Ptr};
pub use config::Config;
pub use error::AllocError;
pub use heap::Heap;
pub use trace::{LogObserver, Observer, TraceEvent};
