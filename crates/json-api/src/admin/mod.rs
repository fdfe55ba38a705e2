//! Administrator views over every cart.

pub(crate) mod handlers;
pub(crate) mod models;
