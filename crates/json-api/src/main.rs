//! Catalog JSON API Server

use std::process;

use salvo::{
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
};
use tracing::{error, info};

use catalog_app::context::AppContext;

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod config;
mod extensions;
mod healthcheck;
mod observability;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// Catalog JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|source| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialised yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {source}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|source| {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so tracing has no output"
        )]
        {
            eprintln!("Observability error: {source}");
        }

        process::exit(1);
    });

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.database_max_connections,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialise app context: {init_error}");
            observability.shutdown();

            process::exit(1);
        }
    };

    let router = router::root_router(State::shared(app));

    let doc = OpenApi::new("Catalog API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router(OPENAPI_PATH))
        .push(SwaggerUi::new(OPENAPI_PATH).into_router("docs"));

    let addr = config.socket_addr();

    info!("starting server on {addr}");

    let server = Server::new(TcpListener::new(addr).bind().await);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(source) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {source}");
        }
    });

    server.serve(router).await;

    info!("server stopped");

    observability.shutdown();
}
