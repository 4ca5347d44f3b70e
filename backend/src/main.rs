//! Backend entry-point: wires REST endpoints, health probes, and OpenAPI docs.

use actix_web::{App, HttpServer, web};
use std::env;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::configure_api;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::token::TokenSettings;
use backend::server::{ServerConfig, build_http_state};

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Load the token signing secret from `AUTH_SECRET_FILE`.
///
/// Falls back to an ephemeral secret in debug builds (or when explicitly
/// allowed) so development runs work out of the box; release builds refuse
/// to start without a real secret.
fn load_token_secret() -> std::io::Result<Vec<u8>> {
    let secret_path = env_or("AUTH_SECRET_FILE", "/var/run/secrets/token_key");
    match std::fs::read(&secret_path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            let allow_dev = env::var("AUTH_ALLOW_EPHEMERAL_SECRET").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %secret_path, error = %e, "using ephemeral token secret (dev only)");
                let mut secret = Uuid::new_v4().into_bytes().to_vec();
                secret.extend_from_slice(&Uuid::new_v4().into_bytes());
                Ok(secret)
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read token secret at {secret_path}: {e}"
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = env_or("BIND_ADDR", "0.0.0.0:8080")
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;
    let token_settings = TokenSettings::new(
        load_token_secret()?,
        env_or("AUTH_TOKEN_ISSUER", "city-guide-backend"),
        env_or("AUTH_TOKEN_AUDIENCE", "city-guide-clients"),
    );

    let mut config = ServerConfig::new(bind_addr, token_settings);
    if let Ok(database_url) = env::var("DATABASE_URL") {
        config = config.with_database_url(database_url);
    }

    let state = build_http_state(&config, Arc::new(mockable::DefaultClock))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build http state: {e}")))?;
    let state = web::Data::new(state);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr())?;

    health_state.mark_ready();
    server.run().await
}

fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .app_data(health_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
