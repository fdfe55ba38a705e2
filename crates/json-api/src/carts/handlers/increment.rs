//! Increment Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartMutationResponse, QuantityStepRequest},
    },
    extensions::*,
    state::State,
};

/// Increment Item Handler
///
/// Raises an existing line's quantity by one.
#[endpoint(
    tags("carts"),
    summary = "Increment Item Count",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Mutation result"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Too much contention"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.increment",
    skip(json, depot),
    fields(item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<QuantityStepRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    tracing::Span::current().record("item_uuid", tracing::field::display(request.item_uuid));

    let result = state
        .app
        .carts
        .increment_item_count(
            principal,
            request.user_uuid.map(Into::into),
            request.item_uuid.into(),
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
    };

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("cart/entries/increment").post(handler),
        )
    }

    #[tokio::test]
    async fn test_increment_success() -> TestResult {
        let item = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_increment_item_count()
            .once()
            .withf(move |_, target, i| target.is_none() && *i == ItemUuid::from_uuid(item))
            .return_once(|_, _, _| Ok(CartMutationResult::ok()));

        let mut res = TestClient::post("http://example.com/cart/entries/increment")
            .json(&json!({ "item_uuid": item }))
            .send(&make_service(carts))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body, json!({ "success": true, "error_codes": [] }));

        Ok(())
    }

    #[tokio::test]
    async fn test_increment_missing_line_reports_code() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_increment_item_count()
            .once()
            .return_once(|_, _, _| {
                Ok(CartMutationResult::rejected(CartErrorCode::CartItemNotFound))
            });

        let mut res = TestClient::post("http://example.com/cart/entries/increment")
            .json(&json!({ "item_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(
            body,
            json!({ "success": false, "error_codes": ["CART_ITEM_NOT_FOUND"] })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_contention_returns_503() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_increment_item_count()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::Contention));

        let res = TestClient::post("http://example.com/cart/entries/increment")
            .json(&json!({ "item_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
