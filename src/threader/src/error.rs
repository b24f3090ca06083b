use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThreaderError {
    #[error("failed to allocate a traceback matrix of size {requested}")]
    OutOfMemory { requested: usize },

    #[error("haplotype_index {haplotype_index} out of range for num_haplotypes={num_haplotypes}")]
    HaplotypeIndexOutOfRange { haplotype_index: u32, num_haplotypes: u32 },

    #[error("panel_size must be in 1..=num_haplotypes={num_haplotypes}, got {panel_size}")]
    PanelSizeOutOfRange { panel_size: u32, num_haplotypes: u32 },

    #[error("out_path length {actual} does not match num_sites={expected}")]
    PathLengthMismatch { expected: u32, actual: usize },

    #[error("error_probability must be in (0, 0.5), got {0}")]
    InvalidErrorProbability(f64),

    #[error("recombination_rate must be > 0, got {0}")]
    InvalidRecombinationRate(f64),

    #[error("unsupported algorithm variant {0}; only the default (0) is implemented")]
    UnsupportedAlgorithm(i32),
}
