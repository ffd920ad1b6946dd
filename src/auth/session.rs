use std::collections::HashMap;

use serde::Serialize;

/// Who is looking at the dashboard: a role and the branches selected as
/// the active viewing scope. Both are opaque strings supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Viewer {
    pub role: String,
    pub branch_ids: Vec<String>,
}

/// Split a comma-separated list, dropping blanks.
pub fn split_csv(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Viewer {
    /// An absent branch list and an empty one both mean "no branch scope".
    /// The role is kept verbatim; it only ever matches by exact string.
    pub fn from_params(role: Option<&str>, branches: Option<&str>) -> Self {
        Viewer {
            role: role.unwrap_or_default().to_string(),
            branch_ids: branches.map(split_csv).unwrap_or_default(),
        }
    }

    /// Read `role` and `branches` from request query parameters.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        Self::from_params(
            query.get("role").map(String::as_str),
            query.get("branches").map(String::as_str),
        )
    }
}
