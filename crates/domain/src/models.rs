mod bank;
mod branch;
mod pagination;

pub use bank::*;
pub use branch::*;
pub use pagination::*;

/// Trim filter text; a value that is blank after trimming counts as absent
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
