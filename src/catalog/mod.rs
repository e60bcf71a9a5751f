pub mod loader;
pub mod normalizer;
pub mod schema;
pub mod types;

pub use loader::{load_catalog, parse_catalog};
pub use normalizer::normalize;
pub use types::{Catalog, RawCatalog};
