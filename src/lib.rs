pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod evaluator;
pub mod models;
pub mod reporting;
pub mod repl;
pub mod selection;
pub mod session;
pub mod utils;
