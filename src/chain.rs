use crate::block::{Block, BlockId};
use crate::constants::{HEADER_SIZE, MIN_SPLIT};

/// The address-ordered chain of block headers covering the managed region.
///
/// Records live in a slot table and link to their neighbors by slot id, so
/// neighbor navigation is O(1) and ids stay put while the table grows. A
/// merge retires the absorbed slot; retired slots are recycled by later
/// splits. A block is never physically removed from the region itself, its
/// bytes just become part of the survivor's payload.
pub(crate) struct Chain {
    slots: Vec<Block>,
    vacant: Vec<BlockId>,
    head: Option<BlockId>,
    tail: Option<BlockId>,
}

impl Chain {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            head: None,
            tail: None,
        }
    }

    pub fn get(&self, id: BlockId) -> &Block {
        &self.slots[id]
    }

    pub fn get_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.slots[id]
    }

    /// Establishes the very first block. The chain must still be empty.
    pub fn anchor(&mut self, start: usize, size: usize) -> BlockId {
        debug_assert!(self.head.is_none());

        let id = self.insert(Block {
            start,
            size,
            free: false,
            prev: None,
            next: None,
        });

        self.head = Some(id);
        self.tail = Some(id);

        id
    }

    /// Appends a new occupied tail directly behind the wilderness block
    /// `after`, which must currently be the tail.
    pub fn append(&mut self, after: BlockId, size: usize) -> BlockId {
        debug_assert!(self.get(after).next.is_none());

        let start = self.get(after).end() + HEADER_SIZE;
        let id = self.insert(Block {
            start,
            size,
            free: false,
            prev: Some(after),
            next: None,
        });

        self.get_mut(after).next = Some(id);
        self.tail = Some(id);

        id
    }

    /// First-fit scan: advance while the block has a successor and is either
    /// occupied or too small. Lands on the first free block of at least
    /// `size` bytes, or on the wilderness when no block fits. `None` only
    /// when the chain is empty.
    pub fn first_fit(&self, size: usize) -> Option<BlockId> {
        let mut id = self.head?;

        loop {
            let block = self.get(id);

            match block.next {
                Some(next) if !block.free || block.size < size => id = next,
                _ => return Some(id),
            }
        }
    }

    /// Resolves an interior offset to its owning block: scan from the head
    /// while the payload end is still below the offset. Offsets that fall in
    /// a header gap or beyond the chain resolve to nothing. Whether the
    /// offset was ever issued by an allocation is not checked.
    pub fn find(&self, offset: usize) -> Option<BlockId> {
        let mut id = self.head?;

        loop {
            let block = self.get(id);

            if offset < block.end() {
                return block.contains(offset).then_some(id);
            }

            id = block.next?;
        }
    }

    /// Carves `id` down to exactly `size`, splicing the leftover in as a new
    /// free block right after it. A leftover too small to be worth its own
    /// header is left attached, the block simply stays oversized. Always
    /// marks `id` occupied.
    pub fn split(&mut self, id: BlockId, size: usize) {
        let block = self.get(id);
        debug_assert!(size <= block.size);

        let (old_size, start, next) = (block.size, block.start, block.next);

        if old_size - size > MIN_SPLIT {
            let rest_id = self.insert(Block {
                start: start + size + HEADER_SIZE,
                size: old_size - size - HEADER_SIZE,
                free: true,
                prev: Some(id),
                next,
            });

            match next {
                Some(next_id) => self.get_mut(next_id).prev = Some(rest_id),
                None => self.tail = Some(rest_id),
            }

            let block = self.get_mut(id);
            block.size = size;
            block.next = Some(rest_id);
        }

        self.get_mut(id).free = false;
    }

    /// Absorbs `next_id` into `id`, which must be its direct predecessor.
    /// The absorbed header's bytes count toward the survivor's payload.
    pub fn merge(&mut self, id: BlockId, next_id: BlockId) {
        debug_assert_eq!(self.get(id).next, Some(next_id));

        let absorbed = self.get(next_id);
        let (gain, after) = (absorbed.size + HEADER_SIZE, absorbed.next);

        let block = self.get_mut(id);
        block.size += gain;
        block.next = after;

        match after {
            Some(after_id) => self.get_mut(after_id).prev = Some(id),
            None => self.tail = Some(id),
        }

        self.retire(next_id);
    }

    /// Walks the chain in address order.
    pub fn iter(&self) -> Blocks<'_> {
        Blocks {
            chain: self,
            cur: self.head,
        }
    }

    fn insert(&mut self, block: Block) -> BlockId {
        match self.vacant.pop() {
            Some(id) => {
                self.slots[id] = block;
                id
            }
            None => {
                self.slots.push(block);
                self.slots.len() - 1
            }
        }
    }

    fn retire(&mut self, id: BlockId) {
        self.vacant.push(id);
    }
}

pub(crate) struct Blocks<'a> {
    chain: &'a Chain,
    cur: Option<BlockId>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<&'a Block> {
        let id = self.cur?;
        let block = self.chain.get(id);
        self.cur = block.next;

        Some(block)
    }
}
