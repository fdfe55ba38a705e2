//! Add Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    carts::{
        errors::into_status_error,
        models::{AddItemRequest, CartMutationResponse},
    },
    extensions::*,
    state::State,
};

/// Add Item Handler
///
/// Adds a new line to the caller's cart, or to `user_uuid`'s cart for
/// administrators. Rule violations are reported in the body with
/// `success: false`.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Mutation result"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Quantity out of range"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.add",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        target_uuid = tracing::field::Empty,
        item_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("item_uuid", tracing::field::display(request.item_uuid));

    if let Some(target) = request.user_uuid {
        span.record("target_uuid", tracing::field::display(target));
    }

    let result = state
        .app
        .carts
        .add_item_for_user(
            principal,
            request.user_uuid.map(Into::into),
            request.item_uuid.into(),
            request.quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::{
        carts::{CartErrorCode, CartMutationResult, CartsServiceError, MockCartsService},
        catalog::ItemUuid,
        users::UserUuid,
    };

    use crate::{
        carts::models::ErrorCode,
        test_helpers::{carts_service, test_principal},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/entries").post(handler))
    }

    #[tokio::test]
    async fn test_add_for_self_returns_success() -> TestResult {
        let item = Uuid::now_v7();
        let caller = test_principal();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item_for_user()
            .once()
            .withf(move |principal, target, i, quantity| {
                *principal == caller
                    && target.is_none()
                    && *i == ItemUuid::from_uuid(item)
                    && *quantity == 2
            })
            .return_once(|_, _, _, _| Ok(CartMutationResult::ok()));

        let mut res = TestClient::post("http://example.com/cart/entries")
            .json(&json!({ "item_uuid": item, "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: CartMutationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert!(body.error_codes.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_rejection_is_200_with_codes() -> TestResult {
        let target = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item_for_user()
            .once()
            .withf(move |_, t, _, _| *t == Some(UserUuid::from_uuid(target)))
            .return_once(|_, _, _, _| {
                Ok(CartMutationResult::rejected(CartErrorCode::AccessDenied))
            });

        let mut res = TestClient::post("http://example.com/cart/entries")
            .json(&json!({ "user_uuid": target, "item_uuid": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body,
            json!({ "success": false, "error_codes": ["ACCESS_DENIED"] })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_entry_code_is_reported() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item_for_user()
            .once()
            .return_once(|_, _, _, _| {
                Ok(CartMutationResult::rejected(CartErrorCode::DuplicateEntry))
            });

        let mut res = TestClient::post("http://example.com/cart/entries")
            .json(&json!({ "item_uuid": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        let body: CartMutationResponse = res.take_json().await?;

        assert!(!body.success);
        assert_eq!(body.error_codes, [ErrorCode::DuplicateEntry]);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_item_returns_404() -> TestResult {
        let item = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item_for_user()
            .once()
            .return_once(move |_, _, _, _| {
                Err(CartsServiceError::UnknownItem(ItemUuid::from_uuid(item)))
            });

        let res = TestClient::post("http://example.com/cart/entries")
            .json(&json!({ "item_uuid": item, "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item_for_user().never();

        let res = TestClient::post("http://example.com/cart/entries")
            .json(&json!({ "item_uuid": "not-a-uuid", "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
