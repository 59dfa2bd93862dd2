pub mod client;

// Re-export the client for convenient access (e.g. `use crate::iex::IexClient`).
pub use client::IexClient;
