//! Carts
//!
//! Cart entries are `(user, item, quantity)` lines. Every mutation is
//! authorized against the calling [`Principal`](crate::auth::Principal),
//! validated, and applied as a single atomic store operation.

pub mod errors;
pub mod guard;
pub mod models;
pub mod results;
pub mod service;
pub mod store;
mod totals;

pub use errors::CartsServiceError;
pub use results::{CartErrorCode, CartMutationResult};
pub use service::*;
