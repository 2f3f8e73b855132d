//! Document store seam: equality-filtered collection queries.
//!
//! The dashboard only ever reads. Two backends exist: PostgreSQL (JSONB
//! documents) for deployments and an in-process map for tests and local
//! development. [`Documents`] dispatches between them so Axum state stays
//! a concrete type.

pub mod memory;
pub mod postgres;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::AppError;
use crate::models::document::Document;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Collection holding one profile document per user, keyed by uid.
pub const USERS: &str = "users";
/// Collection of enrolled students.
pub const STUDENTS: &str = "students";
/// Collection of experiments.
pub const EXPERIMENTS: &str = "experiments";

/// `field == value` predicate on a document's top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        doc.get(&self.field) == Some(&self.value)
    }
}

/// Read access to a document database.
///
/// Results preserve insertion order; aggregations depend on it for
/// group-discovery order.
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` matching `filter`.
    fn query(
        &self,
        collection: &str,
        filter: &FieldFilter,
    ) -> impl Future<Output = Result<Vec<Document>, AppError>> + Send;

    /// A single document by id.
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>, AppError>> + Send;
}

/// Configured document backend.
#[derive(Debug, Clone)]
pub enum Documents {
    Postgres(PgDocumentStore),
    Memory(Arc<MemoryDocumentStore>),
}

impl Documents {
    /// Connectivity check for the readiness endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        match self {
            Documents::Postgres(store) => store.ping().await,
            Documents::Memory(_) => Ok(()),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Documents::Postgres(_) => "postgres",
            Documents::Memory(_) => "memory",
        }
    }
}

impl DocumentStore for Documents {
    async fn query(
        &self,
        collection: &str,
        filter: &FieldFilter,
    ) -> Result<Vec<Document>, AppError> {
        match self {
            Documents::Postgres(store) => store.query(collection, filter).await,
            Documents::Memory(store) => store.query(collection, filter).await,
        }
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        match self {
            Documents::Postgres(store) => store.get(collection, id).await,
            Documents::Memory(store) => store.get(collection, id).await,
        }
    }
}
