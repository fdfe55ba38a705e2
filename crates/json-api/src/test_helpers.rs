//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        users::{Role, Roles, UserUuid},
    },
};

use crate::state::State;

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// A plain shopper with the fixed test identity.
pub(crate) fn test_principal() -> Principal {
    principal_with(Role::User)
}

pub(crate) fn test_admin() -> Principal {
    principal_with(Role::Admin)
}

fn principal_with(role: Role) -> Principal {
    let mut roles = Roles::new();

    roles.insert(Role::User);
    roles.insert(role);

    Principal::new(TEST_USER_UUID, roles)
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_item_for_user().never();
    carts.expect_increment_item_count().never();
    carts.expect_decrement_item_count().never();
    carts.expect_remove_entry().never();
    carts.expect_shopping_details().never();
    carts.expect_total().never();
    carts.expect_list_entries().never();
    carts.expect_get_entry().never();

    carts
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    State::new(AppContext {
        carts: Arc::new(carts),
        auth: Arc::new(strict_auth_mock()),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::new(AppContext {
        carts: Arc::new(strict_carts_mock()),
        auth: Arc::new(auth),
    })
}

/// Serve `route` as the fixed test shopper.
pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service_as(test_principal(), carts, route)
}

/// Serve `route` as `principal`, bypassing bearer authentication.
///
/// The principal is injected the same way the auth middleware stores it.
pub(crate) fn service_as(principal: Principal, carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .hoop(inject(principal))
            .push(route),
    )
}
