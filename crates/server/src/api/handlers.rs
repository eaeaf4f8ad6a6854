mod banks;
mod branches;
mod health;

// Re-export all handlers
pub use banks::{list_bank_branches, list_banks};
pub use branches::{get_branch, search_branches};
pub use health::{health, index, HealthResponse, IndexResponse};

// Re-export utoipa path structs for OpenAPI routing
#[cfg(feature = "openapi")]
#[doc(hidden)]
pub use banks::{__path_list_bank_branches, __path_list_banks};
#[cfg(feature = "openapi")]
#[doc(hidden)]
pub use branches::{__path_get_branch, __path_search_branches};
#[cfg(feature = "openapi")]
#[doc(hidden)]
pub use health::{__path_health, __path_index};
