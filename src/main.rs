use api_rest::startup::{DEFAULT_REST_ADDR, cors_layer, service_from_env};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the ASM application
///
/// Loads the reference data once, reports any integrity issues, and serves the REST API
/// until interrupted with Ctrl-C.
///
/// # Environment Variables
/// - `ASM_REST_ADDR`: REST server address (default: "127.0.0.1:8000")
/// - `ASM_DATA_DIR`: reference data directory (default: bundled `crates/core/data`)
/// - `ASM_STRICT_DATA`: refuse to start when reference data has integrity issues
/// - `ASM_CORS_ORIGINS`: comma-separated allowed origins (default: any)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("asm_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("asm_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ASM_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let service = service_from_env()?;
    let data = service.reference_data();
    tracing::info!(
        "reference data ready: {} combinations, {} drugs, {} integrity issue(s)",
        data.baseline().len(),
        data.drugs().len(),
        data.issues().len()
    );

    let cors = cors_layer(std::env::var("ASM_CORS_ORIGINS").ok())?;
    let rest_app = api_rest::router(service, cors);

    tracing::info!("++ Starting ASM REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- ASM REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
