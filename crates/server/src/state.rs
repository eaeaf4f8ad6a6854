use std::sync::Arc;

use domain::DirectoryService;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryService>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            directory: Arc::new(DirectoryService::new(db)),
        }
    }
}
