use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Identifier assigned by the store; starts at 1 and is never reused.
pub type UserId = u64;

/// A user record. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), created_at: Utc::now() }
    }
}

/// Trim surrounding whitespace and require something to remain.
pub fn normalize_name(raw: &str) -> Result<String, ModelError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ModelError::Validation("name is required".into()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_name("  Ada  ").unwrap(), "Ada");
        assert_eq!(normalize_name("Grace Hopper").unwrap(), "Grace Hopper");
    }

    #[test]
    fn normalize_rejects_blank() {
        assert_eq!(
            normalize_name(" \t\n "),
            Err(ModelError::Validation("name is required".into()))
        );
        assert!(normalize_name("").is_err());
    }

    #[test]
    fn serializes_with_camel_case_timestamp() {
        let u = User::new(7, "Ada");
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["name"], "Ada");
        let ts = v["createdAt"].as_str().unwrap();
        assert!(ts.ends_with('Z'), "expected UTC RFC3339 timestamp, got {ts}");
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
        assert!(v.get("created_at").is_none());
    }
}
