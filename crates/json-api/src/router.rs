//! App Router

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};

use crate::{
    healthcheck,
    observability::{metrics_handler, request_logging},
    products,
    state::State,
};

/// Every documented API route. Middleware and state are attached by
/// [`root_router`].
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(products::get::handler)
                        .patch(products::update::handler)
                        .put(products::replace::handler)
                        .delete(products::delete::handler),
                ),
        )
}

/// The served router: API routes plus metrics, wrapped in the request
/// middleware stack.
pub(crate) fn root_router(state: Arc<State>) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(state))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(app_router())
}
