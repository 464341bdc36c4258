use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Corrupt record {id}: {message}")]
    CorruptRecord { id: String, message: String },

    #[cfg(feature = "db")]
    #[error("Database error: {message}")]
    Database { message: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
