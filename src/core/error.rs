//! Error types for volgrid

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VolGridError {
    #[error("No data available: {0}")]
    NoData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Data error: {0}")]
    Data(String),
}

pub type VolGridResult<T> = Result<T, VolGridError>;

impl VolGridError {
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}
