//! Users
//!
//! Identities are owned by an external collaborator; this module only reads
//! them back so cart operations can check that a target user exists and
//! which roles it holds.

pub mod errors;
pub mod memory;
pub mod models;
mod repository;
pub mod roles;

pub use errors::UsersError;
pub use memory::MemoryUsers;
pub use models::{User, UserUuid};
pub use repository::*;
pub use roles::{Role, Roles};
