/// Index of a block record in the chain's slot table. Ids stay stable while
/// neighboring blocks split and merge.
pub(crate) type BlockId = usize;

/// A payload address: the byte offset of a payload's first byte within the
/// heap's managed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ptr(usize);

impl Ptr {
    /// Wraps a raw byte offset. Nothing checks that the offset was ever
    /// issued by an allocation; resolution happens lazily in free and
    /// realloc, which ignore offsets that land outside a live payload.
    pub fn from_offset(offset: usize) -> Self {
        Ptr(offset)
    }

    pub fn offset(self) -> usize {
        self.0
    }
}

/// One block header: a payload range plus its chain links.
#[derive(Debug, Clone)]
pub(crate) struct Block {
    pub start: usize,
    pub size: usize,
    pub free: bool,
    pub prev: Option<BlockId>,
    pub next: Option<BlockId>,
}

impl Block {
    /// One past the payload's last byte.
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }
}

/// One entry of the diagnostic block listing, in address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    pub ptr: Ptr,
    pub size: usize,
    pub free: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_range() {
        let block = Block {
            start: 16,
            size: 64,
            free: false,
            prev: None,
            next: None,
        };

        assert_eq!(block.end(), 80);
        assert!(block.contains(16));
        assert!(block.contains(79));
        assert!(!block.contains(80));
        assert!(!block.contains(15));
    }
}
