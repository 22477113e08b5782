use serde::{Deserialize, Serialize};

/// Price a movie sells for when the user never set one.
pub const DEFAULT_PRICE: f64 = 10.0;

/// One row of the current catalog page. Transient: rebuilt on every fetch,
/// so a price edit only survives until the next search or page change
/// unless the movie is added to the cart first.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub price: Option<f64>,
}

impl Movie {
    pub fn price_or_default(&self) -> f64 {
        self.price.unwrap_or(DEFAULT_PRICE)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub quantity: u32,
}

/// Quantity-keyed selection, unique by movie id, insertion-ordered.
/// Serializes as a bare JSON array so the persisted payload is just the
/// item list.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Upsert by id: a movie already in the cart gains quantity, a new one
    /// enters with quantity 1 at its effective price.
    pub fn add(&mut self, movie: &Movie) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == movie.id) {
            existing.quantity += 1;
        } else {
            self.items.push(CartItem {
                id: movie.id,
                title: movie.title.clone(),
                price: movie.price_or_default(),
                quantity: 1,
            });
        }
    }

    /// Drops the matching entry. Unknown ids leave the cart unchanged.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|i| i.price * i.quantity as f64).sum()
    }

    /// Tiered on total quantity: more than 5 items takes 20% off, more
    /// than 3 takes 10% off. The higher threshold wins, and both bounds
    /// are exclusive (quantity 5 gets the mid tier, quantity 3 none).
    pub fn discounted_total(&self) -> f64 {
        let subtotal = self.subtotal();
        match self.total_quantity() {
            q if q > 5 => subtotal * 0.8,
            q if q > 3 => subtotal * 0.9,
            _ => subtotal,
        }
    }

    pub fn discount_amount(&self) -> f64 {
        self.subtotal() - self.discounted_total()
    }
}
