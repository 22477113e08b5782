use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::core::catalog::CatalogProvider;
use crate::core::checkout::Checkout;
use crate::core::models::{Cart, Movie};
use crate::core::prompt::{Prompt, PromptSource};
use crate::core::storage::{CartStore, StorageError};

pub struct ShopSession<S: CartStore, P: PromptSource> {
    cart: Cart,
    store: S,
    prompt: Prompt<P>,
    catalog: Option<Box<dyn CatalogProvider>>,
    query: String,
    page: u32,
    total_pages: u32,
    movies: Vec<Movie>,
    dirty: bool,
}

impl<S: CartStore, P: PromptSource> ShopSession<S, P> {
    pub fn new(
        store: S,
        prompt_source: P,
        catalog: Option<Box<dyn CatalogProvider>>,
    ) -> Result<Self, StorageError> {
        let cart = store.load()?;
        Ok(Self {
            cart,
            store,
            prompt: Prompt::new(prompt_source),
            catalog,
            query: String::new(),
            page: 1,
            total_pages: 1,
            movies: Vec::new(),
            dirty: false,
        })
    }

    fn auto_save(&mut self) {
        if self.dirty {
            if let Err(e) = self.store.save(&self.cart) {
                eprintln!("Auto-save failed: {e}");
            }
            self.dirty = false;
        }
    }

    pub fn run(&mut self) {
        println!("== CINECART MOVIE SHOP ==");
        if !self.cart.is_empty() {
            println!("Restored {} item(s) from your saved cart.", self.cart.len());
        }
        self.fetch_current_page();

        loop {
            println!(
                "\n[1] Search  [2] Next Page  [3] Previous Page  [4] Set Price  [5] Add to Cart  \
                 [6] View Cart  [7] Remove Item  [8] Clear Cart  [9] Checkout  [0] Save & Exit"
            );
            let choice = match self.prompt.line("Selection: ") {
                Ok(c) => c,
                Err(_) => break,
            };

            match choice.as_str() {
                "1" => self.search_flow(),
                "2" => self.next_page(),
                "3" => self.previous_page(),
                "4" => self.set_price_flow(),
                "5" => self.add_to_cart_flow(),
                "6" => self.show_cart(),
                "7" => self.remove_flow(),
                "8" => self.clear_cart(),
                "9" => self.checkout_flow(),
                "0" => {
                    match self.store.save(&self.cart) {
                        Ok(()) => println!("Cart saved. Goodbye!"),
                        Err(e) => eprintln!("Save failed: {e}"),
                    }
                    break;
                }
                _ => println!("Invalid selection, please try again."),
            }
        }
    }

    // ── Catalog flows ────────────────────────────────────────────

    /// Fetches the current query/page pair. On failure the page pointer
    /// may have moved but the listing stays as it was.
    fn fetch_current_page(&mut self) {
        let result = match self.catalog.as_deref() {
            Some(catalog) => {
                println!("Loading...");
                catalog
                    .fetch_page(&self.query, self.page)
                    .map_err(|e| format!("{} fetch failed: {e}", catalog.name()))
            }
            None => {
                println!("Catalog search is unavailable.");
                return;
            }
        };

        match result {
            Ok(fetched) => {
                self.movies = fetched.movies;
                self.total_pages = fetched.total_pages.max(1);
                self.list_movies();
            }
            Err(msg) => eprintln!("{msg}"),
        }
    }

    fn search_flow(&mut self) {
        let query = match self.prompt.line("Search (empty for popular): ") {
            Ok(q) => q,
            Err(_) => return,
        };
        self.query = query;
        self.page = 1;
        self.fetch_current_page();
    }

    fn next_page(&mut self) {
        if self.page >= self.total_pages {
            println!("Already on the last page.");
            return;
        }
        self.page += 1;
        self.fetch_current_page();
    }

    fn previous_page(&mut self) {
        if self.page <= 1 {
            println!("Already on the first page.");
            return;
        }
        self.page -= 1;
        self.fetch_current_page();
    }

    fn list_movies(&self) {
        if self.movies.is_empty() {
            println!("No results.");
            return;
        }
        for (i, m) in self.movies.iter().enumerate() {
            println!("  {}. {} - ${:.2}", i + 1, m.title, m.price_or_default());
            if let Some(url) = &m.poster_url {
                println!("     poster: {url}");
            }
        }
        println!("Page {} of {}", self.page, self.total_pages);
    }

    fn select_movie(&mut self, prompt: &str) -> Option<usize> {
        if self.movies.is_empty() {
            println!("No movies on this page. Search first.");
            return None;
        }
        self.list_movies();
        match self.prompt.parse::<usize>(prompt) {
            Ok(v) if v >= 1 && v <= self.movies.len() => Some(v - 1),
            _ => {
                println!("Invalid selection.");
                None
            }
        }
    }

    // ── Cart flows ───────────────────────────────────────────────

    fn set_price_flow(&mut self) {
        let idx = match self.select_movie("Movie #: ") {
            Some(i) => i,
            None => return,
        };
        let price = match self.prompt.price("New price: ") {
            Ok(p) => p,
            Err(e) => {
                println!("{e}");
                return;
            }
        };
        self.movies[idx].price = Some(price);
        println!("'{}' now sells for ${price:.2}.", self.movies[idx].title);
    }

    fn add_to_cart_flow(&mut self) {
        let idx = match self.select_movie("Add movie #: ") {
            Some(i) => i,
            None => return,
        };
        let movie = self.movies[idx].clone();
        self.cart.add(&movie);
        self.dirty = true;
        self.auto_save();

        let quantity = self
            .cart
            .items()
            .iter()
            .find(|i| i.id == movie.id)
            .map(|i| i.quantity)
            .unwrap_or(1);
        println!("Added '{}' (x{quantity}).", movie.title);
    }

    fn show_cart(&self) {
        if self.cart.is_empty() {
            println!("Cart is empty.");
            return;
        }
        println!("\n--- Cart ---");
        for (i, item) in self.cart.items().iter().enumerate() {
            println!(
                "  {}. {} - ${:.2} (Quantity: {})",
                i + 1,
                item.title,
                item.price,
                item.quantity
            );
        }
        println!("Subtotal:          ${:.2}", self.cart.subtotal());
        println!("Amount discounted: ${:.2}", self.cart.discount_amount());
        println!("Total due:         ${:.2}", self.cart.discounted_total());
    }

    fn remove_flow(&mut self) {
        if self.cart.is_empty() {
            println!("Cart is empty.");
            return;
        }
        self.show_cart();
        let idx: usize = match self.prompt.parse::<usize>("Remove item #: ") {
            Ok(v) if v >= 1 && v <= self.cart.len() => v - 1,
            _ => {
                println!("Invalid selection.");
                return;
            }
        };
        let id = self.cart.items()[idx].id;
        let title = self.cart.items()[idx].title.clone();
        self.cart.remove(id);
        self.dirty = true;
        self.auto_save();
        println!("Removed '{title}'.");
    }

    fn clear_cart(&mut self) {
        self.cart.clear();
        self.dirty = false;
        match self.store.clear() {
            Ok(()) => println!("Cart cleared."),
            Err(e) => eprintln!("Failed to clear saved cart: {e}"),
        }
    }

    // ── Checkout ─────────────────────────────────────────────────

    /// Simulated payment window. The cart survives expiry untouched.
    fn checkout_flow(&mut self) {
        let amount_due = self.cart.discounted_total();
        let mut checkout = Checkout::new();
        let order_ref = match checkout.begin(amount_due) {
            Ok(r) => r,
            Err(e) => {
                println!("{e}");
                return;
            }
        };

        println!("\n--- Order Confirmation ---");
        println!("Your order has been placed successfully.");
        println!("Order reference: {order_ref}");
        println!("Payment should be made to bank account 123-456-789.");
        println!("Amount due: ${amount_due:.2}");

        while let Some(remaining) = checkout.remaining_secs() {
            print!("\rTransfer within {remaining:>2} seconds ");
            let _ = std::io::stdout().flush();
            thread::sleep(Duration::from_secs(1));
            checkout.tick();
        }

        println!();
        println!("Time expired. You did not complete the payment in time.");
    }
}
