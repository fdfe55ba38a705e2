//! Roles

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use smallvec::SmallVec;
use thiserror::Error;

/// A role a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Self-service shopper.
    User,

    /// May act on any user's cart.
    Admin,
}

impl Role {
    /// Name used for this role in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The set of roles held by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roles(SmallVec<[Role; 2]>);

impl Roles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role, ignoring duplicates.
    pub fn insert(&mut self, role: Role) {
        if !self.contains(role) {
            self.0.push(role);
        }
    }

    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.contains(Role::Admin)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for Roles {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut roles = Self::new();

        for role in iter {
            roles.insert(role);
        }

        roles
    }
}
