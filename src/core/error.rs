use thiserror::Error;

use crate::core::types::Money;

#[derive(Error, Debug)]
pub enum CafeError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },

    #[error("table capacity reached: maximum {cap} tables")]
    CapacityExceeded { cap: usize },

    #[error("engine not bootstrapped: catalog and provider pools must load first")]
    NotReady,

    #[error("data load failure: {0}")]
    DataLoad(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CafeError>;
