use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: Vec<String>,
}

/// Service banner listing the entry points
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service info", body = IndexResponse)
    )
))]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Bank API running".to_string(),
        endpoints: ["/health", "/banks", "/branches"]
            .into_iter()
            .map(String::from)
            .collect(),
    })
}

/// Liveness probe
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
))]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
