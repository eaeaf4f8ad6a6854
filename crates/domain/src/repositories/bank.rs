use sqlx::{SqliteExecutor, SqlitePool};

use super::contains_pattern;
use crate::models::{Bank, Page};

/// Common SELECT fields for bank queries
const SELECT_BANK: &str = r#"
    SELECT
        id, name
    FROM banks
"#;

const NAME_FILTER: &str = r#" WHERE name LIKE $1 ESCAPE '\'"#;

pub struct BankRepository;

impl BankRepository {
    /// Create a bank and return its assigned id
    pub async fn create<'e>(
        executor: impl SqliteExecutor<'e>,
        name: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO banks (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(sqlx::Row::get(&result, "id"))
    }

    /// Get a bank by ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Bank>, sqlx::Error> {
        let query = format!("{} WHERE id = $1", SELECT_BANK);
        let row = sqlx::query_as::<_, BankRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Look up a bank id by its exact name
    pub async fn find_id_by_name<'e>(
        executor: impl SqliteExecutor<'e>,
        name: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM banks WHERE name = $1")
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Count banks, optionally restricted to names containing `q`
    pub async fn count(pool: &SqlitePool, q: Option<&str>) -> Result<i64, sqlx::Error> {
        match q {
            Some(q) => {
                let query = format!("SELECT COUNT(*) FROM banks{}", NAME_FILTER);
                sqlx::query_scalar(&query)
                    .bind(contains_pattern(q))
                    .fetch_one(pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM banks")
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// List banks ordered by name, optionally restricted to names containing `q`
    pub async fn list(
        pool: &SqlitePool,
        q: Option<&str>,
        page: Page,
    ) -> Result<Vec<Bank>, sqlx::Error> {
        let rows = match q {
            Some(q) => {
                let query = format!(
                    "{}{} ORDER BY name, id LIMIT $2 OFFSET $3",
                    SELECT_BANK, NAME_FILTER
                );
                sqlx::query_as::<_, BankRow>(&query)
                    .bind(contains_pattern(q))
                    .bind(page.limit)
                    .bind(page.offset)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!("{} ORDER BY name, id LIMIT $1 OFFSET $2", SELECT_BANK);
                sqlx::query_as::<_, BankRow>(&query)
                    .bind(page.limit)
                    .bind(page.offset)
                    .fetch_all(pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
struct BankRow {
    id: i64,
    name: String,
}

impl From<BankRow> for Bank {
    fn from(row: BankRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    async fn seeded_pool() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        for name in ["State Bank", "Axis Bank", "Bank of 100% Trust", "Canara"] {
            BankRepository::create(&pool, name).await.unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let pool = seeded_pool().await;
        let page = Page::resolve(None, None, 100);
        let names: Vec<_> = BankRepository::list(&pool, None, page)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();

        assert_eq!(names, ["Axis Bank", "Bank of 100% Trust", "Canara", "State Bank"]);
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive_literal_substring() {
        let pool = seeded_pool().await;
        let page = Page::resolve(None, None, 100);

        assert_eq!(BankRepository::count(&pool, Some("BANK")).await.unwrap(), 3);
        assert_eq!(BankRepository::count(&pool, Some("100%")).await.unwrap(), 1);
        assert_eq!(BankRepository::count(&pool, Some("0%_")).await.unwrap(), 0);

        let banks = BankRepository::list(&pool, Some("axis"), page).await.unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].name, "Axis Bank");
    }

    #[tokio::test]
    async fn test_name_is_unique() {
        let pool = seeded_pool().await;
        assert!(BankRepository::create(&pool, "Canara").await.is_err());
        let id = BankRepository::find_id_by_name(&pool, "Canara").await.unwrap();
        assert!(id.is_some());
        assert_eq!(
            BankRepository::get_by_id(&pool, id.unwrap()).await.unwrap().unwrap().name,
            "Canara"
        );
        assert!(BankRepository::find_id_by_name(&pool, "canara").await.unwrap().is_none());
    }
}
