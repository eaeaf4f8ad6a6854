use serde::{Deserialize, Serialize};

use super::Bank;

/// A branch row as stored, including the owning bank id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub ifsc: String,
    pub bank_id: i64,
    pub branch: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub micr: String,
}

/// What a batch insert does with an IFSC that already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Roll back the batch and return the constraint error
    #[default]
    Fail,
    /// Leave the existing row in place and drop the incoming one
    Skip,
}

/// Branch fields listed under a bank (bank identity implied by the path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BranchSummary {
    pub ifsc: String,
    pub branch: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub micr: String,
}

impl From<Branch> for BranchSummary {
    fn from(b: Branch) -> Self {
        Self {
            ifsc: b.ifsc,
            branch: b.branch,
            address: b.address,
            city: b.city,
            district: b.district,
            state: b.state,
            micr: b.micr,
        }
    }
}

/// Single branch lookup result with its owning bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BranchDetail {
    pub ifsc: String,
    pub branch: String,
    pub bank: Bank,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub micr: String,
}

impl BranchDetail {
    pub fn new(branch: Branch, bank: Bank) -> Self {
        Self {
            ifsc: branch.ifsc,
            branch: branch.branch,
            bank,
            address: branch.address,
            city: branch.city,
            district: branch.district,
            state: branch.state,
            micr: branch.micr,
        }
    }
}

/// Search hit carrying the owning bank's name instead of its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BranchSearchItem {
    pub ifsc: String,
    pub branch: String,
    /// Owning bank name; null when the bank row cannot be resolved
    pub bank: Option<String>,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub micr: String,
}

/// Query parameters for branches of one bank
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct BankBranchesQuery {
    /// Case-insensitive substring of the branch name
    pub q: Option<String>,
    /// Page size (default: 100, max: 1000)
    pub limit: Option<i64>,
    /// Number of matching branches to skip
    pub offset: Option<i64>,
}

/// Query parameters for the general branch search.
/// All supplied filters must match.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct BranchSearchQuery {
    /// Exact IFSC code
    pub ifsc: Option<String>,
    /// Case-insensitive substring of the owning bank's name
    pub bank_name: Option<String>,
    /// Case-insensitive substring of the city
    pub city: Option<String>,
    /// Case-insensitive substring of the branch name or the address
    pub q: Option<String>,
    /// Page size (default: 50, max: 1000)
    pub limit: Option<i64>,
    /// Number of matching branches to skip
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BankBranchesResponse {
    /// Number of branches matching the filter, before pagination
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
    pub branches: Vec<BranchSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BranchSearchResponse {
    /// Number of branches matching the filters, before pagination
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
    pub branches: Vec<BranchSearchItem>,
}
