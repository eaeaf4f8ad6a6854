//! Banks and branches keyed by IFSC: storage, read-only queries, and the
//! bulk importer that populates them.

pub mod config;
pub mod db;
pub mod error;
pub mod importer;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::{default_data_path, Config};
pub use db::{create_memory_pool, create_pool, DatabaseError};
pub use error::ServiceError;
pub use services::DirectoryService;
