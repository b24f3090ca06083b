use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefPanelError {
    #[error("num_samples must be >= 1, got {0}")]
    TooFewSamples(u32),

    #[error("num_sites must be >= 1, got {0}")]
    TooFewSites(u32),

    #[error(
        "haplotypes matrix has {actual} entries, expected num_samples * num_sites = {expected}"
    )]
    HaplotypeMatrixShapeMismatch { expected: usize, actual: usize },

    #[error("positions has {actual} entries, expected num_sites = {expected}")]
    PositionsLengthMismatch { expected: usize, actual: usize },

    #[error("positions must be strictly increasing and within [0, sequence_length]")]
    PositionsNotMonotonic,

    #[error("sequence_length must be strictly greater than the last site position")]
    SequenceLengthTooSmall,
}
