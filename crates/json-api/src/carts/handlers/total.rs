//! Cart Total Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartTotalResponse},
    extensions::*,
    state::State,
};

/// Cart Total Handler
///
/// Discounted total of the caller's own cart, rounded to two places.
#[endpoint(
    tags("carts"),
    summary = "Get Cart Total",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart total"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "carts.total", skip(depot), fields(total = tracing::field::Empty), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartTotalResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let total = state
        .app
        .carts
        .total(principal)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("total", tracing::field::display(total));

    Ok(Json(CartTotalResponse {
        total: total.to_string(),
    }))
}
