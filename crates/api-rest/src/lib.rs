//! # API REST
//!
//! REST API implementation for ASM recommendations.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `asm-core` for the recommendation pipeline.

#![warn(rust_2018_idioms)]

pub mod startup;

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::Json, routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    DrugRes, ErrorRes, HealthRes, HealthService, OptionRes, PatientGender, PatientSnapshotRes,
    SelectionReq, SelectionRes,
};
use asm_core::{AsmError, AsmService};

/// Route prefix for the versioned ASM endpoints.
pub const ASM_API_PREFIX: &str = "/api/v1/asm";

/// Application state shared across REST API handlers
///
/// Holds the recommendation service. The service only carries an `Arc` to immutable
/// reference data, so cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub service: AsmService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_seizure_types, list_modifiers, list_drugs, select),
    components(schemas(
        HealthRes,
        OptionRes,
        DrugRes,
        PatientGender,
        SelectionReq,
        SelectionRes,
        PatientSnapshotRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Build the application router.
///
/// # Arguments
/// * `service` - Recommendation service backed by loaded reference data
/// * `cors` - CORS policy applied to every route
pub fn router(service: AsmService, cors: CorsLayer) -> Router {
    let asm_routes = Router::new()
        .route("/seizure-types", get(list_seizure_types))
        .route("/modifiers", get(list_modifiers))
        .route("/drugs", get(list_drugs))
        .route("/selection", post(select));

    Router::new()
        .route("/health", get(health))
        .nest(ASM_API_PREFIX, asm_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(AppState { service })
}

/// Map a core error onto an HTTP status and JSON body.
///
/// Caller mistakes and unknown combinations are expected outcomes and are not logged as
/// server faults.
pub fn error_response(err: AsmError) -> ApiError {
    let status = match &err {
        AsmError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AsmError::UnknownSeizureCombination(_) => StatusCode::NOT_FOUND,
        AsmError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("selection error: {:?}", err);
    } else {
        tracing::debug!("selection rejected: {}", err);
    }

    let message = match err {
        AsmError::UnknownSeizureCombination(key) => {
            format!("no recommendation available for this combination: {key}")
        }
        AsmError::InvalidInput(msg) => msg,
        AsmError::DataUnavailable(_) => "reference data unavailable".to_string(),
        _ => "internal error".to_string(),
    };
    (status, Json(ErrorRes { error: message }))
}

/// Map an unparseable request body onto a 422 with the usual `{ error }` body.
fn rejection_response(rejection: JsonRejection) -> ApiError {
    let error = rejection.body_text();
    tracing::debug!("selection body rejected: {}", error);
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorRes { error }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/v1/asm/seizure-types",
    responses(
        (status = 200, description = "Selectable seizure types", body = [OptionRes])
    )
)]
/// List the seizure types a client may submit
#[axum::debug_handler]
async fn list_seizure_types(State(state): State<AppState>) -> Json<Vec<OptionRes>> {
    Json(state.service.seizure_types().iter().map(OptionRes::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/asm/modifiers",
    responses(
        (status = 200, description = "Selectable patient modifiers", body = [OptionRes])
    )
)]
/// List the patient modifiers a client may submit
#[axum::debug_handler]
async fn list_modifiers(State(state): State<AppState>) -> Json<Vec<OptionRes>> {
    Json(state.service.modifiers().iter().map(OptionRes::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/asm/drugs",
    responses(
        (status = 200, description = "Drug catalog", body = [DrugRes])
    )
)]
#[axum::debug_handler]
async fn list_drugs(State(state): State<AppState>) -> Json<Vec<DrugRes>> {
    Json(state.service.drugs().map(DrugRes::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/asm/selection",
    request_body = SelectionReq,
    responses(
        (status = 200, description = "Tiered recommendation", body = SelectionRes),
        (status = 404, description = "No recommendation for this seizure combination", body = ErrorRes),
        (status = 422, description = "Invalid request", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Recommend anti-seizure medications for a patient
///
/// Combines the baseline ranking for the submitted seizure types with the patient's
/// modifiers and returns the non-empty tiers.
///
/// # Returns
/// * `Ok(Json<SelectionRes>)` - Tiers plus the echoed patient snapshot
/// * `Err((StatusCode, Json<ErrorRes>))` - See [`error_response`]
#[axum::debug_handler]
async fn select(
    State(state): State<AppState>,
    body: Result<Json<SelectionReq>, JsonRejection>,
) -> Result<Json<SelectionRes>, ApiError> {
    let Json(req) = body.map_err(rejection_response)?;
    let request = req.into_request().map_err(error_response)?;
    let recommendation = state.service.select(&request).map_err(error_response)?;
    Ok(Json(recommendation.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use asm_core::config::resolve_data_dir;
    use asm_core::{load_reference_data, CoreConfig};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let cfg = CoreConfig::new(resolve_data_dir(None).unwrap(), true).unwrap();
        let data = load_reference_data(&cfg).unwrap();
        router(AsmService::new(Arc::new(data)), CorsLayer::permissive())
    }

    async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_selection(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/asm/selection")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn selection_returns_camel_case_tiers() {
        let (status, body) = send(post_selection(serde_json::json!({
            "gender": "female",
            "age": 22,
            "weight": 45.5,
            "seizureTypes": ["gtc", "myoclonic", "absence"],
            "modifiers": ["oral-contraceptive", "migraine", "female-fertile"]
        })))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "tiers": {
                    "tier_1": ["LEV", "LTG"],
                    "tier_2": ["VPA"],
                    "tier_3": ["CLB", "CLN", "TPM", "ZNS"]
                },
                "patientSnapshot": {"gender": "female", "age": 22, "weight": 45.5}
            })
        );
    }

    #[tokio::test]
    async fn unknown_combination_is_not_found() {
        let (status, body) = send(post_selection(serde_json::json!({
            "gender": "male",
            "age": 40,
            "weight": 80.0,
            "seizureTypes": ["focal", "absence"],
            "modifiers": []
        })))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("no recommendation available"));
        assert!(message.contains("absence+focal"));
    }

    #[tokio::test]
    async fn empty_seizure_types_are_unprocessable() {
        let (status, body) = send(post_selection(serde_json::json!({
            "gender": "male",
            "age": 40,
            "weight": 80.0,
            "seizureTypes": [],
            "modifiers": ["diabetes"]
        })))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("seizure type"));
    }

    #[tokio::test]
    async fn malformed_modifier_is_unprocessable() {
        let (status, _) = send(post_selection(serde_json::json!({
            "gender": "male",
            "age": 40,
            "weight": 80.0,
            "seizureTypes": ["focal"],
            "modifiers": ["not a modifier"]
        })))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unparseable_bodies_keep_the_error_shape() {
        let bodies = [
            serde_json::json!({
                "gender": "other",
                "age": 40,
                "weight": 80.0,
                "seizureTypes": ["focal"]
            }),
            serde_json::json!({
                "gender": "male",
                "age": -1,
                "weight": 80.0,
                "seizureTypes": ["focal"]
            }),
            serde_json::json!({"gender": "male", "age": 40, "weight": 80.0}),
        ];

        for body in bodies {
            let (status, body) = send(post_selection(body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["error"].is_string(), "unexpected body: {body}");
        }
    }

    #[tokio::test]
    async fn non_json_body_keeps_the_error_shape() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/asm/selection")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn lists_reference_options() {
        let (status, body) = send(get("/api/v1/asm/seizure-types")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|option| option["value"] == "gtc" && option["label"].is_string()));

        let (status, body) = send(get("/api/v1/asm/modifiers")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|option| option["value"] == "diabetes"));

        let (status, body) = send(get("/api/v1/asm/drugs")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|drug| drug["code"] == "VPA" && drug["name"] == "Valproate"));
    }

    #[test]
    fn error_mapping() {
        let (status, _) = error_response(AsmError::DataUnavailable("gone".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, Json(body)) = error_response(AsmError::DataIntegrity("dup".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "internal error");
    }
}
