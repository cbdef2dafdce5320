use crate::arena::Arena;
use crate::block::{BlockId, BlockInfo, Ptr};
use crate::chain::Chain;
use crate::config::Config;
use crate::constants::{align_request, align_up, ALIGN, HEADER_SIZE};
use crate::error::AllocError;
use crate::trace::{Observer, TraceEvent};

/// A first-fit allocator over one contiguous, incrementally growable
/// region.
///
/// All state lives in the value itself, so independent heaps coexist and
/// `&mut self` gives each operation the exclusivity the chain needs. The
/// heap is `Send`; callers that share one across threads wrap it in a
/// `Mutex`.
pub struct Heap {
    arena: Arena,
    chain: Chain,
    observer: Option<Box<dyn Observer + Send>>,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        debug_assert!(config.increment % ALIGN == 0);

        Self {
            arena: Arena::new(config.increment, config.limit),
            chain: Chain::new(),
            observer: None,
        }
    }

    /// Installs the observation hook, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn Observer + Send>) {
        self.observer = Some(observer);
    }

    /// Allocates `size` usable bytes and returns the payload address. The
    /// size is rounded up to the alignment boundary; a zero-byte request
    /// gets the minimum block size, and a request too large to round is an
    /// error rather than a wraparound.
    pub fn alloc(&mut self, size: usize) -> Result<Ptr, AllocError> {
        let (ptr, asize) = self.alloc_ptr(size)?;

        self.record(TraceEvent::Alloc {
            requested: size,
            size: asize,
            ptr,
        });

        Ok(ptr)
    }

    /// Allocates `count * size` bytes and zero-fills them. A zero total
    /// returns `None` without allocating; an overflowing total is an error.
    pub fn alloc_zeroed(
        &mut self,
        count: usize,
        size: usize,
    ) -> Result<Option<Ptr>, AllocError> {
        let total = count.checked_mul(size).ok_or(AllocError::SizeOverflow)?;

        let ptr = if total == 0 {
            None
        } else {
            let asize = align_up(total).ok_or(AllocError::SizeOverflow)?;
            let id = self.alloc_block(asize)?;
            let start = self.chain.get(id).start;
            self.arena.fill_zero(start, asize);

            Some(Ptr::from_offset(start))
        };

        self.record(TraceEvent::AllocZeroed { count, size, ptr });

        Ok(ptr)
    }

    /// Releases a payload. `None`, offsets outside the managed region, and
    /// offsets landing in a header gap are silent no-ops. Merges with a
    /// free neighbor on either side, restoring the no-adjacent-free
    /// invariant.
    pub fn free(&mut self, ptr: Option<Ptr>) {
        let released = match ptr.and_then(|p| self.chain.find(p.offset())) {
            Some(id) => {
                self.release_block(id);
                true
            }
            None => false,
        };

        self.record(TraceEvent::Free { ptr, released });
    }

    /// Resizes a payload, staying address-stable whenever the block can
    /// shrink in place, grow into a free successor, or widen the
    /// wilderness. Unresolvable pointers behave as a fresh allocation; a
    /// zero size behaves as a release and returns `None`.
    pub fn realloc(
        &mut self,
        ptr: Option<Ptr>,
        new_size: usize,
    ) -> Result<Option<Ptr>, AllocError> {
        let new_ptr = self.realloc_ptr(ptr, new_size)?;

        self.record(TraceEvent::Realloc {
            ptr,
            requested: new_size,
            new_ptr,
        });

        Ok(new_ptr)
    }

    /// Read-only listing of every block in address order, for tests and
    /// diagnostics. The engine itself never consults it.
    pub fn blocks(&self) -> impl Iterator<Item = BlockInfo> + '_ {
        self.chain.iter().map(|block| BlockInfo {
            ptr: Ptr::from_offset(block.start),
            size: block.size,
            free: block.free,
        })
    }

    /// Current break of the managed region.
    pub fn size(&self) -> usize {
        self.arena.brk()
    }

    /// The first `len` bytes of a payload. Panics when the range runs past
    /// the break; offsets inside someone else's payload are the caller's
    /// problem, same trust model as the pointer operations.
    pub fn data(&self, ptr: Ptr, len: usize) -> &[u8] {
        self.arena.slice(ptr.offset(), len)
    }

    pub fn data_mut(&mut self, ptr: Ptr, len: usize) -> &mut [u8] {
        self.arena.slice_mut(ptr.offset(), len)
    }

    fn alloc_ptr(&mut self, size: usize) -> Result<(Ptr, usize), AllocError> {
        let asize = align_request(size).ok_or(AllocError::SizeOverflow)?;
        let id = self.alloc_block(asize)?;

        Ok((Ptr::from_offset(self.chain.get(id).start), asize))
    }

    fn alloc_block(&mut self, asize: usize) -> Result<BlockId, AllocError> {
        let Some(landing) = self.chain.first_fit(asize) else {
            // Very first allocation: anchor the chain at the start of the
            // region, first header included.
            let start = HEADER_SIZE;
            let end = start.checked_add(asize).ok_or(AllocError::OutOfMemory)?;
            self.arena.grow_until(end)?;

            return Ok(self.chain.anchor(start, asize));
        };

        let block = self.chain.get(landing);

        if block.free && block.size >= asize {
            self.chain.split(landing, asize);

            Ok(landing)
        } else {
            // Landed on the wilderness with nothing large enough; a new
            // tail goes in behind it. A payload end past the address space
            // is a region the arena can never cover.
            let start = block.end() + HEADER_SIZE;
            let end = start.checked_add(asize).ok_or(AllocError::OutOfMemory)?;
            self.arena.grow_until(end)?;

            Ok(self.chain.append(landing, asize))
        }
    }

    fn release_block(&mut self, id: BlockId) {
        self.chain.get_mut(id).free = true;

        let mut cur = id;

        if let Some(prev) = self.chain.get(cur).prev {
            if self.chain.get(prev).free {
                self.chain.merge(prev, cur);
                cur = prev;
            }
        }

        if let Some(next) = self.chain.get(cur).next {
            if self.chain.get(next).free {
                self.chain.merge(cur, next);
            }
        }
    }

    fn realloc_ptr(
        &mut self,
        ptr: Option<Ptr>,
        new_size: usize,
    ) -> Result<Option<Ptr>, AllocError> {
        let Some(id) = ptr.and_then(|p| self.chain.find(p.offset())) else {
            // Unresolvable pointers get a fresh allocation.
            return self.alloc_ptr(new_size).map(|(ptr, _)| Some(ptr));
        };

        if new_size == 0 {
            self.release_block(id);

            return Ok(None);
        }

        let asize = align_request(new_size).ok_or(AllocError::SizeOverflow)?;
        let (start, old_size) = {
            let block = self.chain.get(id);
            (block.start, block.size)
        };

        // In-place shrink. The remainder can land directly before an
        // already free successor, so route it through the usual two-sided
        // coalescing.
        if asize <= old_size {
            self.chain.split(id, asize);

            if let Some(rest) = self.chain.get(id).next {
                if self.chain.get(rest).free {
                    self.release_block(rest);
                }
            }

            return Ok(Some(Ptr::from_offset(start)));
        }

        // Grow into a free successor.
        if let Some(next) = self.chain.get(id).next {
            let successor = self.chain.get(next);

            if successor.free && old_size + successor.size + HEADER_SIZE >= asize {
                self.chain.merge(id, next);
                self.chain.split(id, asize);

                return Ok(Some(Ptr::from_offset(start)));
            }
        }

        // The wilderness widens in place.
        if self.chain.get(id).next.is_none() {
            let end = start.checked_add(asize).ok_or(AllocError::OutOfMemory)?;
            self.arena.grow_until(end)?;
            self.chain.get_mut(id).size = asize;

            return Ok(Some(Ptr::from_offset(start)));
        }

        // Move: fresh block, copy what survives, release the old payload.
        let new_id = self.alloc_block(asize)?;
        let new_start = self.chain.get(new_id).start;
        self.arena.copy(start, new_start, old_size.min(asize));
        self.release_block(id);

        Ok(Some(Ptr::from_offset(new_start)))
    }

    fn record(&mut self, event: TraceEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.record(&event);
        }
    }
}
