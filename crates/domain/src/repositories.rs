mod bank;
mod branch;

pub use bank::BankRepository;
pub use branch::{BranchFilter, BranchRepository, BranchWithBankName};

/// Build a `LIKE` pattern matching `needle` as a literal substring.
/// Pair with `ESCAPE '\'` in the SQL.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
