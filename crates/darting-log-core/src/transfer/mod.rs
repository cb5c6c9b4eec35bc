//! Export and import of catalogs and history.
//!
//! Documents are JSON objects with top-level `drugs`, `species` and `history`
//! arrays. Moving the bytes to and from files is left to the caller.

mod csv;
mod export;
mod import;

pub use csv::*;
pub use export::*;
pub use import::*;

use thiserror::Error;

use crate::store::StoreError;

/// Transfer errors.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

pub type TransferResult<T> = Result<T, TransferError>;
