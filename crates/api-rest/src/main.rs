use api_rest::startup::{cors_layer, service_from_env, DEFAULT_REST_ADDR};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the standalone ASM REST API server
///
/// # Environment Variables
/// - `ASM_REST_ADDR`: listen address (default: "127.0.0.1:8000")
/// - `ASM_DATA_DIR`: reference data directory (default: bundled `crates/core/data`)
/// - `ASM_STRICT_DATA`: refuse to start when reference data has integrity issues
/// - `ASM_CORS_ORIGINS`: comma-separated allowed origins (default: any)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the reference data cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("asm_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ASM_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let service = service_from_env()?;
    let cors = cors_layer(std::env::var("ASM_CORS_ORIGINS").ok())?;
    let app = api_rest::router(service, cors);

    tracing::info!("-- Starting ASM REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
