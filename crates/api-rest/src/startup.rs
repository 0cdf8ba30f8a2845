//! Process startup helpers shared by the REST binaries.
//!
//! Environment variables are read here, once, and turned into typed values before any
//! request is served.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use asm_core::config::{resolve_data_dir, strict_from_env_value};
use asm_core::{load_reference_data, AsmService, CoreConfig};
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Default REST listen address when `ASM_REST_ADDR` is unset.
pub const DEFAULT_REST_ADDR: &str = "127.0.0.1:8000";

/// Build the CORS policy from a comma-separated origin list.
///
/// `None` or a blank value yields a permissive policy.
///
/// # Errors
/// Returns an error if any listed origin is not a valid header value.
pub fn cors_layer(origins: Option<String>) -> anyhow::Result<CorsLayer> {
    let origins = origins.filter(|value| !value.trim().is_empty());
    let Some(origins) = origins else {
        return Ok(CorsLayer::permissive());
    };

    let allowed = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin in ASM_CORS_ORIGINS: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!("CORS restricted to {} origin(s)", allowed.len());
    Ok(CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Load reference data using `ASM_DATA_DIR` and `ASM_STRICT_DATA` and wrap it in a service.
///
/// # Errors
/// Returns an error if:
/// - the data directory cannot be located,
/// - `ASM_STRICT_DATA` is not a recognised boolean, or
/// - the reference data fails to load (or, in strict mode, has integrity issues).
pub fn service_from_env() -> anyhow::Result<AsmService> {
    let data_override = std::env::var("ASM_DATA_DIR").ok().map(PathBuf::from);
    let data_dir = resolve_data_dir(data_override)?;
    let strict = strict_from_env_value(std::env::var("ASM_STRICT_DATA").ok())?;

    let cfg = CoreConfig::new(data_dir, strict)?;
    if strict {
        tracing::info!("strict reference data mode enabled");
    }
    let data = load_reference_data(&cfg).context("failed to load ASM reference data")?;

    Ok(AsmService::new(Arc::new(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_origins_are_permissive() {
        assert!(cors_layer(None).is_ok());
        assert!(cors_layer(Some("  ".into())).is_ok());
    }

    #[test]
    fn origin_list_is_accepted() {
        let layer = cors_layer(Some(
            "http://localhost:3000, https://clinic.example.org".into(),
        ));
        assert!(layer.is_ok());
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let err = cors_layer(Some("http://ok.example,bad\norigin".into())).unwrap_err();
        assert!(err.to_string().contains("ASM_CORS_ORIGINS"));
    }
}
