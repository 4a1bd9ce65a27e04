//! Renderable actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// One kind of SQL artifact produced for a set of entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// `CREATE TABLE` statements with keys, indexes and foreign keys.
    Create,
    /// Parameterized `INSERT` per entity.
    Insert,
    /// Parameterized `UPDATE` by primary key per entity.
    Update,
    /// Parameterized `DELETE` by primary key per entity.
    Delete,
    /// Lookup by primary key per entity.
    SelectSimple,
    /// Lookups through one plain index.
    SelectIndexedSimple,
    /// Lookups through combinations of plain indexes.
    SelectIndexedCombined,
}

impl Action {
    /// Every action, in rendering order.
    pub const ALL: [Action; 7] = [
        Action::Create,
        Action::Insert,
        Action::Update,
        Action::Delete,
        Action::SelectSimple,
        Action::SelectIndexedSimple,
        Action::SelectIndexedCombined,
    ];

    /// Name used in requests and output file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::SelectSimple => "select_simple",
            Self::SelectIndexedSimple => "select_indexed_simple",
            Self::SelectIndexedCombined => "select_indexed_combined",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| GenerateError::invalid_request(format!("unknown action `{}`", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_str() {
        assert_eq!("create".parse::<Action>().unwrap(), Action::Create);
        assert_eq!(
            "select-indexed-combined".parse::<Action>().unwrap(),
            Action::SelectIndexedCombined
        );
        assert!("truncate".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_serde() {
        let json = serde_json::to_string(&Action::SelectIndexedSimple).unwrap();
        assert_eq!(json, "\"select_indexed_simple\"");
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Action::SelectIndexedSimple);
    }
}
