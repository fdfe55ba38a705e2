//! Authorization guard for cart mutations.

use crate::{
    auth::Principal,
    domain::{
        carts::results::CartErrorCode,
        users::{UserUuid, UsersError, UsersRepository},
    },
};

/// Outcome of checking whether a principal may act on a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The resolved target user whose cart may be touched.
    Allowed(UserUuid),

    Denied(CartErrorCode),
}

/// Decide whether `principal` may act on `target`'s cart.
///
/// A missing target means the principal's own cart. Existence is checked
/// before role, so an admin naming an unknown user gets `UserInvalid`.
///
/// # Errors
///
/// Returns an error when the users directory cannot be read.
pub async fn authorize(
    principal: &Principal,
    target: Option<UserUuid>,
    users: &dyn UsersRepository,
) -> Result<Authorization, UsersError> {
    let Some(target) = target else {
        return Ok(Authorization::Allowed(principal.user));
    };

    let Some(user) = users.find_user(target).await? else {
        return Ok(Authorization::Denied(CartErrorCode::UserInvalid));
    };

    if user.uuid != principal.user && !principal.roles.is_admin() {
        return Ok(Authorization::Denied(CartErrorCode::AccessDenied));
    }

    Ok(Authorization::Allowed(user.uuid))
}
