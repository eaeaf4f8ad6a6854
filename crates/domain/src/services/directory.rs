use sqlx::SqlitePool;

use crate::error::{Result, ServiceError};
use crate::models::{
    non_blank, BankBranchesQuery, BankBranchesResponse, BankListQuery, BankListResponse,
    BranchDetail, BranchSearchItem, BranchSearchQuery, BranchSearchResponse, Page,
    DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT,
};
use crate::repositories::{BankRepository, BranchFilter, BranchRepository, BranchWithBankName};

/// Read-only views over banks and their branches
pub struct DirectoryService {
    db: SqlitePool,
}

impl DirectoryService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Banks whose name contains `q`, ordered by name
    pub async fn list_banks(&self, query: &BankListQuery) -> Result<BankListResponse> {
        let page = Page::resolve(query.limit, query.offset, DEFAULT_LIST_LIMIT);
        let q = non_blank(query.q.as_deref());

        let total = BankRepository::count(&self.db, q).await?;
        let banks = BankRepository::list(&self.db, q, page).await?;

        Ok(BankListResponse {
            total,
            offset: page.offset,
            limit: page.limit,
            banks,
        })
    }

    /// Branches of one bank, optionally narrowed by branch name.
    ///
    /// An unknown `bank_id` is an empty listing, not an error.
    pub async fn list_bank_branches(
        &self,
        bank_id: i64,
        query: &BankBranchesQuery,
    ) -> Result<BankBranchesResponse> {
        let page = Page::resolve(query.limit, query.offset, DEFAULT_LIST_LIMIT);
        let filter = BranchFilter {
            bank_id: Some(bank_id),
            branch: non_blank(query.q.as_deref()).map(str::to_string),
            ..Default::default()
        };

        let total = BranchRepository::count(&self.db, &filter).await?;
        let branches = BranchRepository::search(&self.db, &filter, page)
            .await?
            .into_iter()
            .map(|hit| hit.branch.into())
            .collect();

        Ok(BankBranchesResponse {
            total,
            offset: page.offset,
            limit: page.limit,
            branches,
        })
    }

    /// Exact IFSC lookup with the owning bank resolved
    pub async fn get_branch(&self, ifsc: &str) -> Result<BranchDetail> {
        let branch = BranchRepository::get_by_ifsc(&self.db, ifsc)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("IFSC {} not found", ifsc)))?;

        let bank = BankRepository::get_by_id(&self.db, branch.bank_id)
            .await?
            .ok_or_else(|| {
                ServiceError::Integrity(format!(
                    "branch {} references missing bank {}",
                    branch.ifsc, branch.bank_id
                ))
            })?;

        Ok(BranchDetail::new(branch, bank))
    }

    /// Branch search; every supplied filter must match
    pub async fn search_branches(&self, query: &BranchSearchQuery) -> Result<BranchSearchResponse> {
        let page = Page::resolve(query.limit, query.offset, DEFAULT_SEARCH_LIMIT);
        let filter = BranchFilter {
            ifsc: non_blank(query.ifsc.as_deref()).map(str::to_string),
            bank_name: non_blank(query.bank_name.as_deref()).map(str::to_string),
            city: non_blank(query.city.as_deref()).map(str::to_string),
            text: non_blank(query.q.as_deref()).map(str::to_string),
            ..Default::default()
        };

        let total = BranchRepository::count(&self.db, &filter).await?;
        let branches = BranchRepository::search(&self.db, &filter, page)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(BranchSearchResponse {
            total,
            offset: page.offset,
            limit: page.limit,
            branches,
        })
    }
}

impl From<BranchWithBankName> for BranchSearchItem {
    fn from(hit: BranchWithBankName) -> Self {
        let b = hit.branch;
        Self {
            ifsc: b.ifsc,
            branch: b.branch,
            bank: hit.bank_name,
            address: b.address,
            city: b.city,
            district: b.district,
            state: b.state,
            micr: b.micr,
        }
    }
}
