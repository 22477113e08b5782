use crate::core::catalog::{CatalogError, CatalogPage, CatalogProvider, PAGE_SIZE};
use crate::core::models::Movie;
use reqwest::blocking::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

// ── Response types ───────────────────────────────────────────────

#[derive(Deserialize)]
struct PagedResponse {
    results: Vec<MovieRecord>,
    total_pages: u32,
}

#[derive(Deserialize)]
struct MovieRecord {
    id: u64,
    title: String,
    poster_path: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────

pub struct TmdbCatalog {
    client: Client,
    api_key: String,
}

impl TmdbCatalog {
    /// Reads the TMDB Bearer token from the TMDB_API_KEY env var.
    /// Returns None if the env var is not set, so the shop can still run
    /// cart-only without it.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("TMDB_API_KEY").ok()?;
        if key.is_empty() {
            return None;
        }
        Some(Self {
            client: Client::new(),
            api_key: key,
        })
    }

    fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::blocking::Response, CatalogError> {
        let url = format!("{BASE_URL}{path}");
        self.client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .query(&[("include_adult", "false"), ("language", "en-US")])
            .query(params)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))
    }
}

/// Keeps the first PAGE_SIZE records of whatever the API returned for the
/// page and resolves poster paths against the w500 image template.
fn page_from_response(body: PagedResponse) -> CatalogPage {
    let movies = body
        .results
        .into_iter()
        .take(PAGE_SIZE)
        .map(|r| Movie {
            id: r.id,
            title: r.title,
            poster_url: r.poster_path.map(|p| format!("{POSTER_BASE}{p}")),
            price: None,
        })
        .collect();

    CatalogPage {
        movies,
        total_pages: body.total_pages,
    }
}

impl CatalogProvider for TmdbCatalog {
    fn name(&self) -> &str {
        "TMDB"
    }

    fn fetch_page(&self, query: &str, page: u32) -> Result<CatalogPage, CatalogError> {
        let query = query.trim();
        let resp = if query.is_empty() {
            self.get("/movie/popular", &[("page", page.to_string())])?
        } else {
            self.get(
                "/search/movie",
                &[("query", query.to_string()), ("page", page.to_string())],
            )?
        };

        if !resp.status().is_success() {
            return Err(CatalogError::Api(format!("HTTP {}", resp.status())));
        }

        let body: PagedResponse = resp
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(page_from_response(body))
    }
}
