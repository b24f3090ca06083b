use bumpalo::Bump;

use crate::error::ArenaError;

/// Default chunk size requested from the system allocator, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 20; // 1 MiB

/// Arena for many small, variable-sized records whose lifetime is tied to
/// their owning builder/matcher.
///
/// Backed by [`bumpalo::Bump`]: a handful of large chunks are requested from
/// the system allocator up front (or grown lazily, doubling as needed) and
/// every `get`/`alloc_slice_copy` call is a cheap bump of a chunk-local
/// cursor. Nothing is ever freed individually — [`BlockAllocator::free`]
/// releases every chunk at once.
pub struct BlockAllocator {
    bump: Bump,
}

impl std::fmt::Debug for BlockAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockAllocator")
            .field("allocated_bytes", &self.allocated_bytes())
            .finish()
    }
}

impl BlockAllocator {
    /// Initialize an allocator that will request chunks of `chunk_size` bytes
    /// (or larger, if a single allocation exceeds it) from the system
    /// allocator.
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        Self { bump: Bump::with_capacity(chunk_size) }
    }

    /// Return `n` contiguous, zero-initialized bytes, aligned for any scalar
    /// type. Fails only if the underlying system allocator fails.
    pub fn get(&self, n: usize) -> Result<&mut [u8], ArenaError> {
        self.bump
            .try_alloc_slice_fill_copy(n, 0u8)
            .map_err(|_| ArenaError::OutOfMemory { requested: n })
    }

    /// Copy `data` into arena-owned storage and return a reference to the
    /// copy. This is how [`pattern_map`](../pattern_map) canonicalises an
    /// incoming genotype vector the first time a pattern is seen.
    pub fn alloc_slice_copy<T: Copy>(&self, data: &[T]) -> Result<&[T], ArenaError> {
        self.bump
            .try_alloc_slice_copy(data)
            .map_err(|_| ArenaError::OutOfMemory { requested: std::mem::size_of_val(data) })
    }

    /// Release every chunk at once. No individual allocation returned by
    /// `get`/`alloc_slice_copy` may be used after this call.
    pub fn free(&mut self) {
        self.bump.reset();
    }

    /// Total bytes currently reserved from the system allocator across all
    /// chunks (including unused space within the current chunk).
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for BlockAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}
