//! Versioned JSON schema for trick-set documents.
//!
//! A `TrickSet` is the on-the-wire shape the external data-access layer
//! hands to the engine: a version gate, a fetch timestamp, and the ordered
//! entity collection (already filtered to published tricks).

use crate::model::Entity;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CURRENT_VERSION: &str = "1.2.0";

/// A versioned document carrying the entity collection for one fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrickSet {
    pub version: String,
    pub fetched_at: DateTime<Utc>,
    pub tricks: Vec<Entity>,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("trick set version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
}

impl TrickSet {
    pub fn new(tricks: Vec<Entity>) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            fetched_at: Utc::now(),
            tricks,
        }
    }
}

/// Validate a trick set's schema version.
pub fn validate_version(set: &TrickSet) -> Result<(), SchemaError> {
    if set.version != CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION.to_string(),
            found: set.version.clone(),
        });
    }
    Ok(())
}

/// Serialize a trick set to a pretty-printed JSON string.
pub fn to_json(set: &TrickSet) -> Result<String> {
    serde_json::to_string_pretty(set).context("failed to serialize trick set to JSON")
}

/// Deserialize a trick set from a JSON string, rejecting unknown versions.
pub fn from_json(json: &str) -> Result<TrickSet> {
    let set: TrickSet =
        serde_json::from_str(json).context("failed to deserialize trick set from JSON")?;
    validate_version(&set)?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrickSet {
        TrickSet::new(vec![Entity {
            id: "t1".to_string(),
            name: "Safety Roll".to_string(),
            prerequisite_refs: Vec::new(),
            difficulty: 1,
            category_id: "rolls".to_string(),
        }])
    }

    #[test]
    fn test_round_trip() {
        let set = sample();
        let json = to_json(&set).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(back.version, CURRENT_VERSION);
        assert_eq!(back.tricks.len(), 1);
        assert_eq!(back.tricks[0].name, "Safety Roll");
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut set = sample();
        set.version = "0.9.0".to_string();
        let json = serde_json::to_string(&set).unwrap();
        let err = from_json(&json).unwrap_err();
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(from_json("{not json").is_err());
    }
}
