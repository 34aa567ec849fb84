use actix_web::{web, App, HttpServer};
use storefront::config::db::database_url;
use storefront::config::{env_lookup, parse_var, RuntimeEnv};
use storefront::infra::state::build_state;
use storefront::middleware::cors::{cors_middleware, parse_allowed_origins};
use storefront::middleware::{RequestTrace, StructuredLogger};
use storefront::routes;
use storefront::state::security_config::SecurityConfig;
use storefront::AppError;
use tracing::{error, info};

mod telemetry;

struct ServerConfig {
    host: String,
    port: u16,
    db_url: String,
    seed: bool,
    cors_origins: Vec<String>,
    security: SecurityConfig,
}

/// Read every setting once, up front; any problem aborts startup.
fn load_config() -> Result<ServerConfig, AppError> {
    let env = RuntimeEnv::from_env()?;
    Ok(ServerConfig {
        host: env_lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
        port: parse_var::<u16, _>(&env_lookup, "BACKEND_PORT")?.unwrap_or(3000),
        db_url: database_url(env, env_lookup)?,
        seed: parse_var::<bool, _>(&env_lookup, "SEED_TEST_DATA")?.unwrap_or(!env.is_prod()),
        cors_origins: parse_allowed_origins(env_lookup("CORS_ALLOWED_ORIGINS").as_deref()),
        security: SecurityConfig::from_lookup(env, env_lookup)?,
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db_url(config.db_url)
        .with_security(config.security)
        .with_seed_data(config.seed)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);
    let cors_origins = config.cors_origins;

    info!(host = %config.host, port = config.port, "storefront listening");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
