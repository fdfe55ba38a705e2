//! Auth data models.

use crate::domain::users::{Roles, UserUuid};

/// The authenticated caller of a cart operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user: UserUuid,
    pub roles: Roles,
}

impl Principal {
    #[must_use]
    pub fn new(user: UserUuid, roles: Roles) -> Self {
        Self { user, roles }
    }
}
