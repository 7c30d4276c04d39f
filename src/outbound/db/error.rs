use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("error with sqlx")]
    DatabaseError(#[from] sqlx::Error),

    #[error("stored document could not be decoded")]
    SerializationError(#[from] serde_json::Error),

    #[error("the resource could not be found")]
    NotFound,

    #[error("the resource already exists")]
    OnConflict,
}
