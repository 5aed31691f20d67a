// nl2sql/src/http/mod.rs

pub mod handlers;
pub mod server;

pub use server::{AppState, start_server};
