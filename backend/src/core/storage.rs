use crate::core::models::Cart;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cart serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(String),
}

/// Repository seam for the persisted cart. `load` on a store that has
/// never been written yields an empty cart; `clear` removes the persisted
/// state outright rather than saving an empty payload.
pub trait CartStore {
    fn load(&self) -> Result<Cart, StorageError>;
    fn save(&self, cart: &Cart) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}
