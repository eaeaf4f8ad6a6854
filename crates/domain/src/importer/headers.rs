//! Header normalization for branch source files
//!
//! Source files name their columns inconsistently ("Bank Name", "BANK",
//! "IFSC Code", "branch_name", ...). Each header is normalized and then run
//! through an ordered rule list; the first matching rule decides which
//! canonical field the column feeds.

/// Canonical fields an import row is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BankName,
    Ifsc,
    Branch,
    Address,
    City,
    District,
    State,
    Micr,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::BankName,
        Field::Ifsc,
        Field::Branch,
        Field::Address,
        Field::City,
        Field::District,
        Field::State,
        Field::Micr,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

struct HeaderRule {
    matches: fn(&str) -> bool,
    field: Field,
}

/// Evaluated top to bottom, first match wins
const HEADER_RULES: &[HeaderRule] = &[
    HeaderRule {
        matches: |k| k.contains("bank") && k.contains("name"),
        field: Field::BankName,
    },
    HeaderRule {
        matches: |k| matches!(k, "bank" | "bankname" | "bank_name"),
        field: Field::BankName,
    },
    HeaderRule {
        matches: |k| k.contains("ifsc"),
        field: Field::Ifsc,
    },
    HeaderRule {
        matches: |k| k == "branch" || k.contains("branchname") || k.contains("branch_name"),
        field: Field::Branch,
    },
    HeaderRule {
        matches: |k| k.contains("address"),
        field: Field::Address,
    },
    HeaderRule {
        matches: |k| k.contains("city"),
        field: Field::City,
    },
    HeaderRule {
        matches: |k| k.contains("district"),
        field: Field::District,
    },
    HeaderRule {
        matches: |k| k.contains("state"),
        field: Field::State,
    },
    HeaderRule {
        matches: |k| k.contains("micr"),
        field: Field::Micr,
    },
];

/// Lowercase, trim, drop a BOM, and fold whitespace / hyphen runs into `_`
pub fn normalize_header(header: &str) -> String {
    let header = header.trim_start_matches('\u{feff}').trim().to_lowercase();
    let mut key = String::with_capacity(header.len());
    let mut pending_sep = false;

    for c in header.chars() {
        if c.is_whitespace() || c == '-' {
            pending_sep = true;
            continue;
        }
        if pending_sep {
            key.push('_');
            pending_sep = false;
        }
        key.push(c);
    }

    key
}

/// Canonical field for a raw header, if any rule accepts it
pub fn classify(header: &str) -> Option<Field> {
    let key = normalize_header(header);
    HEADER_RULES
        .iter()
        .find(|rule| (rule.matches)(&key))
        .map(|rule| rule.field)
}

/// Column index of each canonical field in the source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: [Option<usize>; Field::ALL.len()],
}

impl HeaderMap {
    /// Map headers to fields. A later header mapping to an already-mapped
    /// field replaces the earlier one.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut map = Self::default();
        for (index, header) in headers.iter().enumerate() {
            if let Some(field) = classify(header.as_ref()) {
                map.columns[field.index()] = Some(index);
            }
        }
        map
    }

    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns[field.index()]
    }

    pub fn has(&self, field: Field) -> bool {
        self.column(field).is_some()
    }

    /// Trimmed value of `field` in `record`; empty when the field has no
    /// column or the row is too short.
    pub fn value(&self, record: &csv::ByteRecord, field: Field) -> String {
        self.column(field)
            .and_then(|index| record.get(index))
            .map(|raw| String::from_utf8_lossy(raw).trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Bank Name "), "bank_name");
        assert_eq!(normalize_header("IFSC  Code"), "ifsc_code");
        assert_eq!(normalize_header("\u{feff}Branch-Name"), "branch_name");
        assert_eq!(normalize_header("MICR"), "micr");
    }

    #[test]
    fn test_classify_synonyms() {
        assert_eq!(classify("Bank Name"), Some(Field::BankName));
        assert_eq!(classify("BANK"), Some(Field::BankName));
        assert_eq!(classify("bankname"), Some(Field::BankName));
        assert_eq!(classify("IFSC Code"), Some(Field::Ifsc));
        assert_eq!(classify("ifsc"), Some(Field::Ifsc));
        assert_eq!(classify("Branch"), Some(Field::Branch));
        assert_eq!(classify("Branch Name"), Some(Field::Branch));
        assert_eq!(classify("Address"), Some(Field::Address));
        assert_eq!(classify("CITY"), Some(Field::City));
        assert_eq!(classify("District"), Some(Field::District));
        assert_eq!(classify("State"), Some(Field::State));
        assert_eq!(classify("MICR Code"), Some(Field::Micr));
    }

    #[test]
    fn test_rule_order_is_deterministic() {
        // "bank" rules come before "branch", "ifsc" before everything else
        assert_eq!(classify("Bank Branch Name"), Some(Field::BankName));
        assert_eq!(classify("Branch IFSC"), Some(Field::Ifsc));
        assert_eq!(classify("BANKCODE"), None);
        assert_eq!(classify("Branch Code"), None);
        assert_eq!(classify("Phone"), None);
    }

    #[test]
    fn test_header_map_columns() {
        let map = HeaderMap::from_headers(&["Bank Name", "IFSC Code", "Branch", "City"]);
        assert_eq!(map.column(Field::BankName), Some(0));
        assert_eq!(map.column(Field::Ifsc), Some(1));
        assert_eq!(map.column(Field::Branch), Some(2));
        assert_eq!(map.column(Field::City), Some(3));
        assert!(!map.has(Field::Micr));
    }

    #[test]
    fn test_later_header_replaces_earlier() {
        let map = HeaderMap::from_headers(&["ifsc", "bank", "IFSC Code"]);
        assert_eq!(map.column(Field::Ifsc), Some(2));
    }

    #[test]
    fn test_value_defaults_to_empty() {
        let map = HeaderMap::from_headers(&["IFSC", "City", "State"]);
        let record = csv::ByteRecord::from(vec!["  ABCD0001 ", "  "]);

        assert_eq!(map.value(&record, Field::Ifsc), "ABCD0001");
        assert_eq!(map.value(&record, Field::City), "");
        assert_eq!(map.value(&record, Field::State), "");
        assert_eq!(map.value(&record, Field::Micr), "");
    }
}
