use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternMapError {
    #[error("pattern map failed to allocate storage for a new pattern: {0}")]
    OutOfMemory(#[from] arena::ArenaError),
}
