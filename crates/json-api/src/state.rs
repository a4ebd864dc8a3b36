//! Handler state.

use std::sync::Arc;

use catalog_app::context::AppContext;

/// Injected into every request's depot; handlers fetch it as `Arc<State>`.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl From<AppContext> for State {
    fn from(app: AppContext) -> Self {
        Self { app }
    }
}

impl State {
    #[must_use]
    pub(crate) fn shared(app: AppContext) -> Arc<Self> {
        Arc::new(app.into())
    }
}
