pub mod database;
pub mod terminal;
pub mod tmdb;
