//! In-memory users directory.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::users::{
    UsersRepository,
    errors::UsersError,
    models::{User, UserUuid},
};

/// Users held in process memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryUsers {
    users: DashMap<UserUuid, User>,
}

impl MemoryUsers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: User) {
        self.users.insert(user.uuid, user);
    }
}

#[async_trait]
impl UsersRepository for MemoryUsers {
    async fn find_user(&self, user: UserUuid) -> Result<Option<User>, UsersError> {
        Ok(self.users.get(&user).map(|entry| entry.value().clone()))
    }
}
