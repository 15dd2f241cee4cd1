use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("chunk {index}: payload of {data_len} bytes exceeds the forced version capacity")]
    CapacityExceeded { index: usize, data_len: usize },

    #[error("chunk {index}: QR encoding failed: {reason}")]
    Encoding { index: usize, reason: String },
}

impl GenerateError {
    /// The chunk this failure belongs to.
    pub fn chunk_index(&self) -> usize {
        match self {
            Self::CapacityExceeded { index, .. } | Self::Encoding { index, .. } => *index,
        }
    }
}

pub type GenerateResult<T> = Result<T, GenerateError>;
