use crate::core::models::Movie;
use thiserror::Error;

/// A catalog page never shows more than this many movies, regardless of
/// how many the API returned for it.
pub const PAGE_SIZE: usize = 5;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub struct CatalogPage {
    pub movies: Vec<Movie>,
    pub total_pages: u32,
}

/// External movie catalog. An empty (or whitespace) query asks for the
/// popular-movies listing instead of a search.
pub trait CatalogProvider {
    fn name(&self) -> &str;
    fn fetch_page(&self, query: &str, page: u32) -> Result<CatalogPage, CatalogError>;
}
