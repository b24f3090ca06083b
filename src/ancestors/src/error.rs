use thiserror::Error;

#[derive(Error, Debug)]
pub enum AncestorsError {
    #[error("ancestor builder failed to allocate storage: {0}")]
    OutOfMemory(#[from] arena::ArenaError),

    #[error("num_samples must be >= 2, got {0}")]
    TooFewSamples(u32),

    #[error("site_id {site_id} out of range for num_sites={num_sites}")]
    SiteOutOfRange { site_id: u32, num_sites: u32 },

    #[error("frequency {frequency} exceeds num_samples={num_samples}")]
    FrequencyOutOfRange { frequency: u32, num_samples: u32 },

    #[error("genotype entry must be 0 or 1, got {value} for sample {sample}")]
    InvalidAllele { sample: u32, value: u8 },

    #[error("genotypes length {actual} does not match num_samples={expected}")]
    GenotypesLengthMismatch { expected: u32, actual: usize },

    #[error("make_ancestor currently supports exactly one focal site, got {0}")]
    NotSingleFocalSite(usize),

    #[error("out buffer length {actual} does not match num_sites={expected}")]
    OutBufferLengthMismatch { expected: u32, actual: usize },

    #[error("focal site {0} was never added via add_site, or carries frequency < 2")]
    UnknownFocalSite(u32),

    #[error("finalise() must be called before make_ancestor()/descriptors()")]
    NotFinalised,
}

impl From<pattern_map::PatternMapError> for AncestorsError {
    fn from(value: pattern_map::PatternMapError) -> Self {
        match value {
            pattern_map::PatternMapError::OutOfMemory(e) => Self::OutOfMemory(e),
        }
    }
}
