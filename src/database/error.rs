#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Error, thiserror::Error)]
pub enum DatabaseError {
    #[error("failed to open database: {0}")]
    DatabaseAccess(String),

    #[error("failed to open table: {0}")]
    TableAccess(String),

    #[error("failed to read entry: {0}")]
    Read(String),

    #[error("failed to save entry: {0}")]
    Save(String),

    #[error("failed to serialize entry: {0}")]
    Serialization(String),

    #[error("failed to deserialize entry {key}: {error}")]
    Deserialization { key: String, error: String },
}
