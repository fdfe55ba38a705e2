//! User Models

use crate::{domain::users::roles::Roles, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// User Model
///
/// Discount rates are read through the catalog port, not from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: UserUuid,
    pub roles: Roles,
}
