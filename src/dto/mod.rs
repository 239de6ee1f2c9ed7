//! DTO modules that bridge the listing engine with a presentation layer.

pub mod listing;
pub mod vehicle;
