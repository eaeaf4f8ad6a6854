use utoipa::OpenApi;

use crate::api::handlers::{HealthResponse, IndexResponse};
use domain::models::{
    Bank, BankBranchesResponse, BankListResponse, BranchDetail, BranchSearchItem,
    BranchSearchResponse, BranchSummary,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "IFSC API",
        version = "1.0.0"
    ),
    tags(
        (name = "health", description = "Service status endpoints"),
        (name = "banks", description = "Bank listing endpoints"),
        (name = "branches", description = "Branch lookup and search endpoints")
    ),
    components(schemas(
        HealthResponse,
        IndexResponse,
        Bank,
        BankListResponse,
        BranchSummary,
        BankBranchesResponse,
        BranchDetail,
        BranchSearchItem,
        BranchSearchResponse
    ))
)]
pub struct ApiDoc;
