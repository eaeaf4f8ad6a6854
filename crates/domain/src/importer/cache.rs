use std::collections::HashMap;

use sqlx::SqliteConnection;

use crate::repositories::BankRepository;

/// Bank name to id mapping for one import run.
///
/// The store's unique constraint on `banks.name` stays the source of truth;
/// the cache only saves round-trips for names already seen. Ids resolved
/// inside an open batch transaction are held as pending until the batch
/// commits, so a rolled-back batch leaves no stale entries behind.
#[derive(Debug, Default)]
pub struct BankCache {
    ids: HashMap<String, i64>,
    pending: HashMap<String, i64>,
    created: usize,
    pending_created: usize,
}

impl BankCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed id for `name`
    pub fn get(&self, name: &str) -> Option<i64> {
        self.ids.get(name).copied()
    }

    /// Number of committed banks this cache had to create
    pub fn created(&self) -> usize {
        self.created
    }

    /// Get-or-create on `conn`: cache, then store lookup, then insert.
    ///
    /// The result is pending until [`BankCache::commit`].
    pub async fn resolve(
        &mut self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<i64, sqlx::Error> {
        if let Some(id) = self.get(name).or_else(|| self.pending.get(name).copied()) {
            return Ok(id);
        }

        let id = match BankRepository::find_id_by_name(&mut *conn, name).await? {
            Some(id) => id,
            None => {
                let id = BankRepository::create(&mut *conn, name).await?;
                self.pending_created += 1;
                tracing::debug!("Created bank {:?} (id {})", name, id);
                id
            }
        };

        self.pending.insert(name.to_string(), id);
        Ok(id)
    }

    /// Keep pending entries once their transaction has committed
    pub fn commit(&mut self) {
        self.ids.extend(self.pending.drain());
        self.created += self.pending_created;
        self.pending_created = 0;
    }

    /// Forget pending entries after their transaction rolled back
    pub fn discard(&mut self) {
        self.pending.clear();
        self.pending_created = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn test_resolve_creates_once() {
        let pool = create_memory_pool().await.unwrap();
        let mut cache = BankCache::new();
        let mut conn = pool.acquire().await.unwrap();

        let first = cache.resolve(&mut conn, "Test Bank").await.unwrap();
        let second = cache.resolve(&mut conn, "Test Bank").await.unwrap();
        assert_eq!(first, second);
        drop(conn);

        cache.commit();
        assert_eq!(cache.created(), 1);
        assert_eq!(cache.get("Test Bank"), Some(first));
        assert_eq!(BankRepository::count(&pool, None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_resolve_reuses_stored_bank() {
        let pool = create_memory_pool().await.unwrap();
        let existing = BankRepository::create(&pool, "Old Bank").await.unwrap();

        let mut cache = BankCache::new();
        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(cache.resolve(&mut conn, "Old Bank").await.unwrap(), existing);
        cache.commit();
        assert_eq!(cache.created(), 0);
        assert_eq!(cache.get("Old Bank"), Some(existing));
    }

    #[tokio::test]
    async fn test_rolled_back_banks_are_forgotten() {
        let pool = create_memory_pool().await.unwrap();
        let mut cache = BankCache::new();

        let mut tx = pool.begin().await.unwrap();
        cache.resolve(&mut tx, "Ghost Bank").await.unwrap();
        tx.rollback().await.unwrap();
        cache.discard();

        assert_eq!(cache.get("Ghost Bank"), None);
        assert_eq!(cache.created(), 0);
        assert_eq!(BankRepository::count(&pool, None).await.unwrap(), 0);

        // A later batch recreates it instead of reusing a dead id
        let mut tx = pool.begin().await.unwrap();
        let id = cache.resolve(&mut tx, "Ghost Bank").await.unwrap();
        tx.commit().await.unwrap();
        cache.commit();
        assert_eq!(cache.get("Ghost Bank"), Some(id));
        assert_eq!(cache.created(), 1);
    }
}
