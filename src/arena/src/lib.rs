//! Bulk-allocated arena for the small, variable-sized records used by the
//! pattern map and ancestor builder.

mod block_allocator;
mod error;

pub use block_allocator::{BlockAllocator, DEFAULT_CHUNK_SIZE};
pub use error::ArenaError;
