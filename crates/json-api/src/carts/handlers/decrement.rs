//! Decrement Item Handler

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

/// Decrement Item Handler
///
/// Lowers an existing line's quantity by one. A line at one is left alone
/// and `COUNT_BELOW_MINIMUM` is reported; use the delete endpoint instead.
#[endpoint(
    tags("carts"),
    summary = "Decrement Item Count",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Mutation result"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Too much contention"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.decrement",
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
        .decrement_item_count(
            principal,
            request.user_uuid.map(Into::into),
            request.item_uuid.into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(result.into()))
}
