//! App Router

use salvo::Router;

use crate::{admin, auth, carts};

/// Every authenticated route.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::handlers::details::handler)
                .push(Router::with_path("total").get(carts::handlers::total::handler))
                .push(
                    Router::with_path("entries")
                        .post(carts::handlers::add::handler)
                        .push(
                            Router::with_path("increment")
                                .post(carts::handlers::increment::handler),
                        )
                        .push(
                            Router::with_path("decrement")
                                .post(carts::handlers::decrement::handler),
                        )
                        .push(
                            Router::with_path("{entry}").delete(carts::handlers::remove::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("admin/cart-entries")
                .get(admin::handlers::index::handler)
                .push(Router::with_path("{entry}").get(admin::handlers::get::handler)),
        )
}
