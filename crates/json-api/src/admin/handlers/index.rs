//! List Cart Entries Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::models::AdminCartEntryResponse, carts::errors::into_status_error, extensions::*,
    state::State,
};

/// List Cart Entries Handler
///
/// Every line of every cart. Requires the admin role.
#[endpoint(
    tags("admin"),
    summary = "List Cart Entries",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart entries"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<AdminCartEntryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let entries = state
        .app
        .carts
        .list_entries(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
