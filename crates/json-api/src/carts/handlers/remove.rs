//! Remove Entry Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Remove Entry Handler
///
/// Deletes one of the caller's cart lines whatever its quantity.
/// Administrators may delete any line.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Entry",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Entry removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart entry not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.remove",
    skip(entry, depot),
    fields(entry_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    entry: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let entry = entry.into_inner();

    tracing::Span::current().record("entry_uuid", tracing::field::display(entry));

    state
        .app
        .carts
        .remove_entry(principal, entry.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
