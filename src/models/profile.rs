//! Current-user profile as supplied by the session provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::document::Document;

/// Dashboard role. Drives which aggregation runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Faculty,
    Student,
}

/// Read-only profile of the signed-in user.
///
/// Student-only fields are optional; faculty profiles simply omit them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub uid: String,
    pub role: Role,
    #[serde(default)]
    pub experiments_completed: Option<Vec<Value>>,
    /// Question id -> score. Scores are opaque here; only keys are counted.
    #[serde(default)]
    pub viva_scores: Option<BTreeMap<String, Value>>,
}

impl Profile {
    pub fn faculty(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            role: Role::Faculty,
            experiments_completed: None,
            viva_scores: None,
        }
    }

    pub fn student(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            role: Role::Student,
            experiments_completed: None,
            viva_scores: None,
        }
    }

    /// Decode a `users` document. The document id is the uid unless the
    /// document carries its own `uid` field.
    pub fn from_document(doc: &Document) -> Result<Self, serde_json::Error> {
        let mut profile: Profile = doc.decode()?;
        if profile.uid.is_empty() {
            profile.uid = doc.id.clone();
        }
        Ok(profile)
    }

    pub fn experiments_completed_count(&self) -> u64 {
        self.experiments_completed
            .as_ref()
            .map_or(0, |list| list.len() as u64)
    }

    pub fn viva_attempt_count(&self) -> u64 {
        self.viva_scores.as_ref().map_or(0, |scores| scores.len() as u64)
    }
}
