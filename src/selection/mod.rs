pub mod store;

pub use store::{SelectionSnapshot, SelectionStore};
