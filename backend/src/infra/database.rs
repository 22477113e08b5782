use crate::core::models::Cart;
use crate::core::storage::{CartStore, StorageError};
use libsql::{Builder, Connection};
use tokio::runtime::Runtime;

/// The one slot the cart lives under. The whole cart serializes as a
/// single JSON array payload.
const CART_SLOT: &str = "cart";

// ═══════════════════════════════════════════════════════════════
// Database — async-only, no runtime.
// ═══════════════════════════════════════════════════════════════

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Connect to a local SQLite file (async).
    pub async fn local(path: &str) -> Result<Self, StorageError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let conn = db
            .connect()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let storage = Self { conn };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Connect to a remote Turso database (async).
    pub async fn turso(url: &str, token: &str) -> Result<Self, StorageError> {
        let db = Builder::new_remote(url.to_string(), token.to_string())
            .build()
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let conn = db
            .connect()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let storage = Self { conn };
        storage.run_migrations().await?;
        Ok(storage)
    }

    async fn run_migrations(&self) -> Result<(), StorageError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS cart_state (
                    slot    TEXT PRIMARY KEY,
                    payload TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }

    /// Absent slot means an empty cart; so does an unreadable payload,
    /// which is warned about but never fatal.
    pub async fn load_cart(&self) -> Result<Cart, StorageError> {
        let mut rows = self
            .conn
            .query(
                "SELECT payload FROM cart_state WHERE slot = ?1",
                libsql::params![CART_SLOT],
            )
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?
        {
            Some(row) => {
                let payload: String = row
                    .get::<String>(0)
                    .map_err(|e| StorageError::Database(e.to_string()))?;
                match serde_json::from_str(&payload) {
                    Ok(cart) => Ok(cart),
                    Err(e) => {
                        eprintln!("Saved cart is unreadable ({e}); starting empty.");
                        Ok(Cart::default())
                    }
                }
            }
            None => Ok(Cart::default()),
        }
    }

    pub async fn save_cart(&self, cart: &Cart) -> Result<(), StorageError> {
        let payload = serde_json::to_string(cart)?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO cart_state (slot, payload) VALUES (?1, ?2)",
                libsql::params![CART_SLOT, payload],
            )
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }

    pub async fn clear_cart(&self) -> Result<(), StorageError> {
        self.conn
            .execute(
                "DELETE FROM cart_state WHERE slot = ?1",
                libsql::params![CART_SLOT],
            )
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════
// CartDb — sync wrapper for the shop session.  Owns a tokio Runtime.
// ═══════════════════════════════════════════════════════════════

pub struct CartDb {
    db: Database,
    rt: Runtime,
}

impl CartDb {
    pub fn local(path: &str) -> Result<Self, StorageError> {
        let rt = Runtime::new().map_err(|e| StorageError::Database(e.to_string()))?;
        let db = rt.block_on(Database::local(path))?;
        Ok(Self { db, rt })
    }

    pub fn turso(url: &str, token: &str) -> Result<Self, StorageError> {
        let rt = Runtime::new().map_err(|e| StorageError::Database(e.to_string()))?;
        let db = rt.block_on(Database::turso(url, token))?;
        Ok(Self { db, rt })
    }
}

impl CartStore for CartDb {
    fn load(&self) -> Result<Cart, StorageError> {
        self.rt.block_on(self.db.load_cart())
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        self.rt.block_on(self.db.save_cart(cart))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.rt.block_on(self.db.clear_cart())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Movie;

    fn temp_store() -> (tempfile::TempDir, CartDb) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.db");
        let store = CartDb::local(path.to_str().unwrap()).expect("open db");
        (dir, store)
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::default();
        let movie = Movie {
            id: 603,
            title: "The Matrix".to_string(),
            poster_url: Some("https://image.tmdb.org/t/p/w500/m.jpg".to_string()),
            price: Some(14.0),
        };
        cart.add(&movie);
        cart.add(&movie);
        cart
    }

    #[test]
    fn fresh_store_loads_an_empty_cart() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = temp_store();
        let cart = sample_cart();
        store.save(&cart).unwrap();
        assert_eq!(store.load().unwrap(), cart);
    }

    #[test]
    fn save_overwrites_the_previous_payload() {
        let (_dir, store) = temp_store();
        store.save(&sample_cart()).unwrap();

        let mut smaller = store.load().unwrap();
        smaller.remove(603);
        store.save(&smaller).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn clear_removes_the_slot() {
        let (_dir, store) = temp_store();
        store.save(&sample_cart()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn garbage_payload_loads_as_an_empty_cart() {
        let (_dir, store) = temp_store();
        store.save(&sample_cart()).unwrap();

        store
            .rt
            .block_on(store.db.conn.execute(
                "UPDATE cart_state SET payload = 'not json' WHERE slot = ?1",
                libsql::params![CART_SLOT],
            ))
            .expect("corrupt payload");

        assert!(store.load().unwrap().is_empty());
    }
}
