use sqlx::{SqliteConnection, SqlitePool};

use super::contains_pattern;
use crate::models::{Branch, ConflictPolicy, Page};

/// Branch columns joined with the owning bank's name
const SELECT_BRANCH: &str = r#"
    SELECT
        br.ifsc, br.bank_id, br.branch, br.address,
        br.city, br.district, br.state, br.micr,
        b.name AS bank_name
    FROM branches br
    LEFT JOIN banks b ON b.id = br.bank_id
"#;

const COUNT_BRANCH: &str = r#"
    SELECT COUNT(*)
    FROM branches br
    LEFT JOIN banks b ON b.id = br.bank_id
"#;

/// Composable branch filter; every populated field must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchFilter {
    /// Owning bank id, exact
    pub bank_id: Option<i64>,
    /// IFSC code, exact
    pub ifsc: Option<String>,
    /// Substring of the owning bank's name
    pub bank_name: Option<String>,
    /// Substring of the city
    pub city: Option<String>,
    /// Substring of the branch name
    pub branch: Option<String>,
    /// Substring of either the branch name or the address
    pub text: Option<String>,
}

/// Bind value collected while building a WHERE clause
#[derive(Debug)]
enum Param {
    Int(i64),
    Text(String),
}

impl BranchFilter {
    /// Render the WHERE clause with `$n` placeholders and the values to bind
    fn to_sql(&self) -> (String, Vec<Param>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut params = Vec::new();

        if let Some(bank_id) = self.bank_id {
            params.push(Param::Int(bank_id));
            conditions.push(format!("br.bank_id = ${}", params.len()));
        }
        if let Some(ifsc) = &self.ifsc {
            params.push(Param::Text(ifsc.clone()));
            conditions.push(format!("br.ifsc = ${}", params.len()));
        }
        if let Some(city) = &self.city {
            params.push(Param::Text(contains_pattern(city)));
            conditions.push(format!(r"br.city LIKE ${} ESCAPE '\'", params.len()));
        }
        if let Some(bank_name) = &self.bank_name {
            params.push(Param::Text(contains_pattern(bank_name)));
            conditions.push(format!(r"b.name LIKE ${} ESCAPE '\'", params.len()));
        }
        if let Some(branch) = &self.branch {
            params.push(Param::Text(contains_pattern(branch)));
            conditions.push(format!(r"br.branch LIKE ${} ESCAPE '\'", params.len()));
        }
        if let Some(text) = &self.text {
            params.push(Param::Text(contains_pattern(text)));
            let n = params.len();
            conditions.push(format!(
                r"(br.branch LIKE ${n} ESCAPE '\' OR br.address LIKE ${n} ESCAPE '\')"
            ));
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

/// A branch with the owning bank's name, `None` when the bank row is missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchWithBankName {
    pub branch: Branch,
    pub bank_name: Option<String>,
}

pub struct BranchRepository;

impl BranchRepository {
    /// Insert one batch inside a single transaction.
    ///
    /// Returns the number of rows written. With `ConflictPolicy::Fail` a
    /// duplicate IFSC rolls the whole batch back and the error is returned.
    pub async fn insert_batch(
        pool: &SqlitePool,
        rows: &[Branch],
        on_conflict: ConflictPolicy,
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let inserted = Self::insert_rows(&mut tx, rows, on_conflict).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    /// Insert rows on a connection the caller controls (usually an open
    /// transaction). Returns the number of rows written.
    pub async fn insert_rows(
        conn: &mut SqliteConnection,
        rows: &[Branch],
        on_conflict: ConflictPolicy,
    ) -> Result<u64, sqlx::Error> {
        let statement = match on_conflict {
            ConflictPolicy::Fail => {
                r#"
                INSERT INTO branches (ifsc, bank_id, branch, address, city, district, state, micr)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#
            }
            ConflictPolicy::Skip => {
                r#"
                INSERT INTO branches (ifsc, bank_id, branch, address, city, district, state, micr)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT(ifsc) DO NOTHING
                "#
            }
        };

        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(statement)
                .bind(&row.ifsc)
                .bind(row.bank_id)
                .bind(&row.branch)
                .bind(&row.address)
                .bind(&row.city)
                .bind(&row.district)
                .bind(&row.state)
                .bind(&row.micr)
                .execute(&mut *conn)
                .await?;

            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    /// Get a branch by its exact IFSC code
    pub async fn get_by_ifsc(pool: &SqlitePool, ifsc: &str) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!("{} WHERE br.ifsc = $1", SELECT_BRANCH);
        let row = sqlx::query_as::<_, BranchRow>(&query)
            .bind(ifsc)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| BranchWithBankName::from(r).branch))
    }

    /// Count branches matching the filter
    pub async fn count(pool: &SqlitePool, filter: &BranchFilter) -> Result<i64, sqlx::Error> {
        let (where_sql, params) = filter.to_sql();
        let query = format!("{}{}", COUNT_BRANCH, where_sql);

        let mut count = sqlx::query_scalar::<_, i64>(&query);
        for param in &params {
            count = match param {
                Param::Int(v) => count.bind(*v),
                Param::Text(v) => count.bind(v.as_str()),
            };
        }

        count.fetch_one(pool).await
    }

    /// List branches matching the filter, ordered by branch name
    pub async fn search(
        pool: &SqlitePool,
        filter: &BranchFilter,
        page: Page,
    ) -> Result<Vec<BranchWithBankName>, sqlx::Error> {
        let (where_sql, params) = filter.to_sql();
        let query = format!(
            "{}{} ORDER BY br.branch, br.ifsc LIMIT ${} OFFSET ${}",
            SELECT_BRANCH,
            where_sql,
            params.len() + 1,
            params.len() + 2
        );

        let mut select = sqlx::query_as::<_, BranchRow>(&query);
        for param in &params {
            select = match param {
                Param::Int(v) => select.bind(*v),
                Param::Text(v) => select.bind(v.as_str()),
            };
        }

        let rows = select
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
struct BranchRow {
    ifsc: String,
    bank_id: i64,
    branch: String,
    address: String,
    city: String,
    district: String,
    state: String,
    micr: String,
    bank_name: Option<String>,
}

impl From<BranchRow> for BranchWithBankName {
    fn from(row: BranchRow) -> Self {
        Self {
            branch: Branch {
                ifsc: row.ifsc,
                bank_id: row.bank_id,
                branch: row.branch,
                address: row.address,
                city: row.city,
                district: row.district,
                state: row.state,
                micr: row.micr,
            },
            bank_name: row.bank_name,
        }
    }
}
