use crate::block::Ptr;

/// One completed public operation, as reported to an [`Observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    Alloc {
        requested: usize,
        /// Aligned request; the placed block may be slightly larger when a
        /// split was not worth a header.
        size: usize,
        ptr: Ptr,
    },
    AllocZeroed {
        count: usize,
        size: usize,
        ptr: Option<Ptr>,
    },
    Free {
        ptr: Option<Ptr>,
        /// Whether the pointer resolved to a live payload.
        released: bool,
    },
    Realloc {
        ptr: Option<Ptr>,
        requested: usize,
        new_ptr: Option<Ptr>,
    },
}

/// Caller-supplied observation hook, invoked once per public operation
/// after it completes. Purely observational: nothing an observer does can
/// alter an allocation decision, and the heap never decides on its own
/// whether to trace.
pub trait Observer {
    fn record(&mut self, event: &TraceEvent);
}

/// Renders each event as a human-readable `log` record under the `heap`
/// target.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LogObserver {
    /// Honors the `HEAP_TRACE` environment toggle: returns an observer only
    /// when the variable is set. Reading the environment stays out here at
    /// the boundary, the heap itself never consults it.
    pub fn from_env() -> Option<Self> {
        std::env::var_os("HEAP_TRACE").map(|_| Self)
    }
}

impl Observer for LogObserver {
    fn record(&mut self, event: &TraceEvent) {
        match *event {
            TraceEvent::Alloc {
                requested,
                size,
                ptr,
            } => {
                log::trace!(
                    target: "heap",
                    "alloc {requested} -> {:#x} ({size} bytes)",
                    ptr.offset()
                );
            }
            TraceEvent::AllocZeroed { count, size, ptr } => {
                log::trace!(
                    target: "heap",
                    "alloc_zeroed {count} x {size} -> {:?}",
                    ptr.map(Ptr::offset)
                );
            }
            TraceEvent::Free { ptr, released } => {
                log::trace!(
                    target: "heap",
                    "free {:?} (released: {released})",
                    ptr.map(Ptr::offset)
                );
            }
            TraceEvent::Realloc {
                ptr,
                requested,
                new_ptr,
            } => {
                log::trace!(
                    target: "heap",
                    "realloc {:?} to {requested} -> {:?}",
                    ptr.map(Ptr::offset),
                    new_ptr.map(Ptr::offset)
                );
            }
        }
    }
}
