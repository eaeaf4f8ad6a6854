use axum::{extract::State, Json};
use domain::models::{BranchDetail, BranchSearchQuery, BranchSearchResponse};

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

/// Get a branch by IFSC code
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/branches/{ifsc}",
    tag = "branches",
    params(
        ("ifsc" = String, Path, description = "IFSC code (exact match)")
    ),
    responses(
        (status = 200, description = "Branch with its bank", body = BranchDetail),
        (status = 404, description = "IFSC not found")
    )
))]
pub async fn get_branch(
    State(state): State<AppState>,
    ApiPath(ifsc): ApiPath<String>,
) -> AppResult<Json<BranchDetail>> {
    let branch = state.directory.get_branch(&ifsc).await?;
    Ok(Json(branch))
}

/// Search branches by IFSC, bank name, city and free text
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/branches",
    tag = "branches",
    params(BranchSearchQuery),
    responses(
        (status = 200, description = "Page of matching branches ordered by branch name", body = BranchSearchResponse),
        (status = 400, description = "Non-integer limit or offset")
    )
))]
pub async fn search_branches(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BranchSearchQuery>,
) -> AppResult<Json<BranchSearchResponse>> {
    let branches = state.directory.search_branches(&query).await?;
    Ok(Json(branches))
}
