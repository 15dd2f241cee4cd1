use thiserror::Error;

/// Errors produced by type constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("symbol value {0} is outside the alphabet [0, 2047]")]
    SymbolOutOfRange(u16),
}

pub type TypeResult<T> = Result<T, TypeError>;
