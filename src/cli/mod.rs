pub mod assess;
pub mod catalog;
pub mod commands;
pub mod context;
pub mod repl;
pub mod serve;
pub mod validate;

pub use commands::{Cli, Commands};
