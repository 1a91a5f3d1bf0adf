use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source unreachable: {0}")]
    SourceUnreachable(String),

    #[error("Source returned no data: {0}")]
    EmptySource(String),

    #[error("Invalid progress data: {0}")]
    InvalidData(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// True for failures that mean no progress tree could be obtained.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Error::SourceUnreachable(_)
                | Error::EmptySource(_)
                | Error::InvalidData(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
