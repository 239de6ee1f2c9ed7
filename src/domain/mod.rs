//! Domain model of the vehicle listing.

pub mod filter;
pub mod listing;
pub mod types;
pub mod vehicle;
