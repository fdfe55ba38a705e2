//! Get Cart Entry Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    admin::models::AdminCartEntryResponse, carts::errors::into_status_error, extensions::*,
    state::State,
};

/// Get Cart Entry Handler
#[endpoint(
    tags("admin"),
    summary = "Get Cart Entry",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart entry"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart entry not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    entry: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AdminCartEntryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let entry = state
        .app
        .carts
        .get_entry(principal, entry.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(entry.into()))
}
