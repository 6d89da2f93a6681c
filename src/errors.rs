use thiserror::Error;

use crate::decimal::Money;
use crate::types::CardId;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("invalid cycle anchor: {field} is {value}, expected a day between 1 and 31")]
    InvalidCycleAnchor {
        field: &'static str,
        value: u32,
    },

    #[error("invalid reference date: {message}")]
    InvalidReferenceDate {
        message: String,
    },

    #[error("card name must not be empty")]
    InvalidCardName,

    #[error("invalid credit limit: {limit}")]
    InvalidCreditLimit {
        limit: Money,
    },

    #[error("card not found: {id}")]
    CardNotFound {
        id: CardId,
    },

    #[error("storage error: {message}")]
    Storage {
        message: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, CardError>;
