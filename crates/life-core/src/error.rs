//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::collections::TryReserveError> for Error {
    fn from(err: std::collections::TryReserveError) -> Self {
        Error::AllocationFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidArgument("side length must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid argument: side length must be positive");
    }

    #[test]
    fn test_try_reserve_maps_to_allocation_failure() {
        let mut buf: Vec<u8> = Vec::new();
        let err: Error = buf.try_reserve_exact(usize::MAX).unwrap_err().into();
        assert!(matches!(err, Error::AllocationFailure(_)));
    }
}
