mod core;
mod infra;

use crate::core::catalog::CatalogProvider;
use crate::core::session::ShopSession;
use infra::database::CartDb;
use infra::terminal::TerminalPrompt;
use infra::tmdb::TmdbCatalog;

fn main() {
    // Load .env (silently ignore if missing — production uses real env vars)
    let _ = dotenvy::dotenv();

    let db_mode = std::env::var("DATABASE_MODE").unwrap_or_else(|_| "local".into());

    let store: CartDb = match db_mode.as_str() {
        "turso" => {
            let url = std::env::var("TURSO_DATABASE_URL")
                .expect("TURSO_DATABASE_URL must be set when DATABASE_MODE=turso");
            let token = std::env::var("TURSO_AUTH_TOKEN")
                .expect("TURSO_AUTH_TOKEN must be set when DATABASE_MODE=turso");
            CartDb::turso(&url, &token).expect("Failed to connect to Turso")
        }
        _ => {
            let path = std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/cinecart.db".into());
            CartDb::local(&path).expect("Failed to open local database")
        }
    };

    let catalog: Option<Box<dyn CatalogProvider>> = match TmdbCatalog::from_env() {
        Some(tmdb) => Some(Box::new(tmdb)),
        None => {
            eprintln!("Note: TMDB_API_KEY not set — movie search disabled.");
            None
        }
    };

    let mut session = match ShopSession::new(store, TerminalPrompt, catalog) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    };

    session.run();
}
