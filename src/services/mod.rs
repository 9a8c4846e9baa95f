pub mod auth;
pub mod catalog;
pub mod compare;
pub mod formatting;
pub mod movies;
pub mod password;

pub use catalog::{MovieCatalog, TmdbClient};
