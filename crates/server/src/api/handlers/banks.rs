use axum::{extract::State, Json};
use domain::models::{BankBranchesQuery, BankBranchesResponse, BankListQuery, BankListResponse};

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

/// List banks, optionally filtered by name
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/banks",
    tag = "banks",
    params(BankListQuery),
    responses(
        (status = 200, description = "Page of banks ordered by name", body = BankListResponse),
        (status = 400, description = "Non-integer limit or offset")
    )
))]
pub async fn list_banks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BankListQuery>,
) -> AppResult<Json<BankListResponse>> {
    let banks = state.directory.list_banks(&query).await?;
    Ok(Json(banks))
}

/// List the branches of one bank
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/banks/{bank_id}/branches",
    tag = "banks",
    params(
        ("bank_id" = i64, Path, description = "Bank ID"),
        BankBranchesQuery
    ),
    responses(
        (status = 200, description = "Page of branches ordered by branch name", body = BankBranchesResponse),
        (status = 400, description = "Non-integer bank_id, limit or offset")
    )
))]
pub async fn list_bank_branches(
    State(state): State<AppState>,
    ApiPath(bank_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<BankBranchesQuery>,
) -> AppResult<Json<BankBranchesResponse>> {
    let branches = state.directory.list_bank_branches(bank_id, &query).await?;
    Ok(Json(branches))
}
