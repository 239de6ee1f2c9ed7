//! Settings models of the HTTP client.

pub mod config;
