use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("compression pass {pass} failed: {source}")]
    Compression {
        pass: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("decompression pass {pass} failed: {source}")]
    Decompression {
        pass: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("symbol count {symbols} is inconsistent with byte length {byte_len}")]
    LengthMismatch { symbols: usize, byte_len: usize },

    #[error("lossy legacy stream: {dropped} symbol(s) were dropped during encoding")]
    LossyStream { dropped: usize },
}

pub type CodecResult<T> = Result<T, CodecError>;
