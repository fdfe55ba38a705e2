//! Catalog
//!
//! Read-only view of item prices and per-user discount rates. Items and
//! discounts are authored elsewhere.

pub mod errors;
pub mod memory;
pub mod models;
mod repository;

pub use errors::CatalogError;
pub use memory::MemoryCatalog;
pub use models::{Item, ItemUuid};
pub use repository::*;
