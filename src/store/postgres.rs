//! PostgreSQL-backed document store (one JSONB row per document).

use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::document::Document;
use crate::store::{DocumentStore, FieldFilter};

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

/// Raw `documents` row.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Value>,
}

impl DocumentRow {
    fn into_document(self) -> Result<Document, AppError> {
        let id = self.id;
        Document::from_value(id.clone(), self.data.0)
            .ok_or_else(|| AppError::Internal(format!("Document {id} is not a JSON object")))
    }
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert or replace a document. Used by the seed binary.
    pub async fn upsert(&self, collection: &str, doc: &Document) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(collection)
        .bind(&doc.id)
        .bind(Json(Value::Object(doc.fields.clone())))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

impl DocumentStore for PgDocumentStore {
    async fn query(
        &self,
        collection: &str,
        filter: &FieldFilter,
    ) -> Result<Vec<Document>, AppError> {
        // Containment lets the GIN index on `data` narrow the scan; the `->`
        // comparison keeps exact equality for non-scalar values. `seq`
        // preserves insertion order.
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1
              AND data @> jsonb_build_object($2::text, $3::jsonb)
              AND data -> $2::text = $3::jsonb
            ORDER BY seq
            "#,
        )
        .bind(collection)
        .bind(&filter.field)
        .bind(Json(&filter.value))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            collection,
            field = %filter.field,
            rows = rows.len(),
            "Document query"
        );

        rows.into_iter().map(DocumentRow::into_document).collect()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DocumentRow::into_document).transpose()
    }
}
