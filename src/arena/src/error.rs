use thiserror::Error;

/// Errors surfaced by [`crate::BlockAllocator`].
///
/// The allocator has exactly one failure mode: the underlying system
/// allocator refused to hand out more memory.
#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("block allocator failed to reserve {requested} bytes")]
    OutOfMemory { requested: usize },
}
