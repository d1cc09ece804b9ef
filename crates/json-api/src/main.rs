//! Roost JSON API Server

use std::{process, time::Duration};

use jiff::Timestamp;
use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use roost_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod availability;
mod bookings;
mod config;
mod extensions;
mod healthcheck;
mod rooms;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Roost JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level));

    if config.logging.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.booking.settings(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    // Optional reaper: physically expires stale holds. Correctness never
    // depends on it; reads apply lazy expiry regardless.
    if config.booking.reaper_interval_seconds > 0 {
        let reaper_app = app.clone();
        let interval = Duration::from_secs(config.booking.reaper_interval_seconds);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            loop {
                ticker.tick().await;

                match reaper_app.bookings.reap_expired(Timestamp::now()).await {
                    Ok(0) => {}
                    Ok(reaped) => info!("expired {reaped} stale holds"),
                    Err(reap_error) => error!("failed to reap expired holds: {reap_error}"),
                }
            }
        });
    }

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("rooms")
                        .get(rooms::handlers::index::handler)
                        .post(rooms::handlers::create::handler)
                        .push(
                            Router::with_path("{room}")
                                .get(rooms::handlers::get::handler)
                                .put(rooms::handlers::update::handler)
                                .delete(rooms::handlers::delete::handler)
                                .push(
                                    Router::with_path("availability")
                                        .get(availability::handlers::check::handler),
                                )
                                .push(
                                    Router::with_path("quote")
                                        .get(bookings::handlers::quote::handler),
                                )
                                .push(
                                    Router::with_path("windows")
                                        .get(availability::handlers::index::handler)
                                        .post(availability::handlers::create::handler)
                                        .push(
                                            Router::with_path("{window}")
                                                .delete(availability::handlers::delete::handler),
                                        ),
                                ),
                        ),
                )
                .push(
                    Router::with_path("bookings")
                        .post(bookings::handlers::create::handler)
                        .push(Router::with_path("my").get(bookings::handlers::my::handler))
                        .push(
                            Router::with_path("admin/all")
                                .get(bookings::handlers::admin_index::handler),
                        )
                        .push(
                            Router::with_path("confirm")
                                .post(bookings::handlers::confirm::handler),
                        )
                        .push(
                            Router::with_path("{booking}")
                                .get(bookings::handlers::get::handler)
                                .delete(bookings::handlers::cancel::handler),
                        ),
                ),
        );

    let doc = OpenApi::new("Roost API", "0.1.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
