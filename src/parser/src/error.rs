use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("failed to serialize command line arguments: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: std::io::Error },

    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },

    #[error("{0} already exists. Use --overwrite to force.")]
    CannotOverwrite(String),
}
