use serde::{Deserialize, Serialize};

/// A bank, deduplicated by name during import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Bank {
    pub id: i64,
    pub name: String,
}

/// Query parameters for the bank listing
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct BankListQuery {
    /// Case-insensitive substring of the bank name
    pub q: Option<String>,
    /// Page size (default: 100, max: 1000)
    pub limit: Option<i64>,
    /// Number of matching banks to skip
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BankListResponse {
    /// Number of banks matching the filter, before pagination
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
    pub banks: Vec<Bank>,
}
