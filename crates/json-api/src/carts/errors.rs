//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart entry not found"),
        CartsServiceError::AccessDenied => {
            StatusError::forbidden().brief("Administrator role required")
        }
        CartsServiceError::UnknownItem(item) => {
            StatusError::not_found().brief(format!("Item {item} not found"))
        }
        CartsServiceError::QuantityOutOfRange => {
            StatusError::unprocessable_entity().brief("Quantity out of range")
        }
        CartsServiceError::Contention => {
            warn!("cart update abandoned after repeated conflicts");

            StatusError::service_unavailable().brief("Cart is busy, try again")
        }
        CartsServiceError::MissingCatalogItem(item) => {
            error!(item_uuid = %item, "cart references item missing from catalog");

            StatusError::internal_server_error()
        }
        CartsServiceError::Storage(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Catalog(source) => {
            error!("catalog failure: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Users(source) => {
            error!("users directory failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
