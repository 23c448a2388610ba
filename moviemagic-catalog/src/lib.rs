pub mod movie;
pub mod catalog;

pub use movie::{Movie, MovieId};
pub use catalog::{CatalogError, MovieCatalog};
