//! Schemaless documents and the typed records decoded from them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Section label used when a student record has no section.
pub const UNKNOWN_SECTION: &str = "Unknown";

/// A stored document: identifier plus a JSON field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a document from a JSON object. Returns `None` for non-objects.
    pub fn from_value(id: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(id, fields)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Decode the field mapping into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}

/// Student enrolment as seen from a faculty dashboard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub experiments_completed: Option<Vec<Value>>,
}

impl StudentRecord {
    pub fn from_document(doc: &Document) -> Result<Self, serde_json::Error> {
        doc.decode()
    }

    /// Section label, with missing or empty sections grouped as "Unknown".
    pub fn section_label(&self) -> &str {
        match self.section.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => UNKNOWN_SECTION,
        }
    }

    pub fn completed_count(&self) -> u64 {
        self.experiments_completed
            .as_ref()
            .map_or(0, |list| list.len() as u64)
    }
}

/// Experiment owned by a faculty member. Only counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentRecord {
    pub id: String,
}

impl From<&Document> for ExperimentRecord {
    fn from(doc: &Document) -> Self {
        Self { id: doc.id.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(Document::from_value("a", json!([1, 2])).is_none());
        assert!(Document::from_value("a", json!({})).is_some());
    }

    #[test]
    fn student_without_section_is_unknown() {
        let doc = Document::from_value("s1", json!({ "experimentsCompleted": ["e1"] })).unwrap();
        let student = StudentRecord::from_document(&doc).unwrap();
        assert_eq!(student.section_label(), UNKNOWN_SECTION);
        assert_eq!(student.completed_count(), 1);
    }

    #[test]
    fn empty_and_null_sections_are_unknown() {
        let empty = StudentRecord {
            section: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty.section_label(), "Unknown");

        let doc = Document::from_value("s2", json!({ "section": null })).unwrap();
        let null = StudentRecord::from_document(&doc).unwrap();
        assert_eq!(null.section_label(), "Unknown");
        assert_eq!(null.completed_count(), 0);
    }

    #[test]
    fn malformed_completion_list_is_a_decode_error() {
        let doc = Document::from_value("s3", json!({ "experimentsCompleted": 4 })).unwrap();
        assert!(StudentRecord::from_document(&doc).is_err());
    }

    #[test]
    fn unrelated_fields_are_ignored() {
        let doc = Document::from_value(
            "s4",
            json!({ "section": "B", "facultyId": "f1", "name": "Ada" }),
        )
        .unwrap();
        let student = StudentRecord::from_document(&doc).unwrap();
        assert_eq!(student.section_label(), "B");
    }
}
