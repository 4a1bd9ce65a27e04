//! Sample classifier.
//!
//! Refines ambiguous catalog types by looking at a handful of sampled rows.
//! A column belongs to a subtype when every examined value parses as that
//! subtype and at least one value was examined. NULLs are never examined.

use std::sync::LazyLock;

use regex_lite::Regex;
use schemaport_schema::SampleProbe;
use serde_json::{Map, Value};
use uuid::Uuid;

/// One sampled row, keyed by column name.
pub type SampleRow = Map<String, Value>;

const ADDR_SPEC: &str = concat!(
    r"(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
    r#"|"[^"\\]*")"#,
    r"@",
    r"(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*",
    r"|\[[^\[\]\\]*\])",
);

static MAILBOX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let pattern = format!(r"^(?:{addr}|[^<>]*<{addr}>)$", addr = ADDR_SPEC);
    Regex::new(&pattern).ok()
});

/// Check if a value is an email address, bare or as `Name <addr>`.
pub fn is_email_value(value: &str) -> bool {
    MAILBOX
        .as_ref()
        .is_some_and(|re| re.is_match(value.trim()))
}

/// Check if a value is a non-nil UUID.
pub fn is_uuid_value(value: &str) -> bool {
    Uuid::parse_str(value).is_ok_and(|u| !u.is_nil())
}

/// Check if a value is an absolute URL with a host.
pub fn is_url_value(value: &str) -> bool {
    url::Url::parse(value).is_ok_and(|u| u.has_host())
}

/// Sampled rows of one table.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    rows: Vec<SampleRow>,
}

impl SampleSet {
    /// Create a new sample set.
    pub fn new(rows: Vec<SampleRow>) -> Self {
        Self { rows }
    }

    /// Number of sampled rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows were sampled.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply `check` to every non-null string value of `column`.
    fn all_strings(&self, column: &str, check: impl Fn(&str) -> bool) -> bool {
        let mut examined = 0usize;
        for value in self.rows.iter().filter_map(|r| r.get(column)) {
            if let Value::String(s) = value {
                if !check(s) {
                    return false;
                }
                examined += 1;
            }
        }
        examined > 0
    }
}

impl SampleProbe for SampleSet {
    fn is_uuid(&self, column: &str) -> bool {
        self.all_strings(column, is_uuid_value)
    }

    fn is_email(&self, column: &str) -> bool {
        self.all_strings(column, is_email_value)
    }

    fn is_url(&self, column: &str) -> bool {
        self.all_strings(column, is_url_value)
    }

    fn is_json_array(&self, column: &str) -> bool {
        let mut examined = 0usize;
        for value in self.rows.iter().filter_map(|r| r.get(column)) {
            let is_array = match value {
                Value::Null => continue,
                Value::Array(_) => true,
                Value::String(s) => {
                    matches!(serde_json::from_str::<Value>(s), Ok(Value::Array(_)))
                }
                _ => false,
            };
            if !is_array {
                return false;
            }
            examined += 1;
        }
        examined > 0
    }
}
