use sqlx::PgConnection;

use crate::utils::errors::{db_error, AppError, AppResult};

/// Counters behind generated document numbers (`document_sequences`).
pub struct SequenceRepository;

impl SequenceRepository {
    /// Increments the named counter and returns the new value.
    ///
    /// Must run inside the transaction that stores the numbered document: the
    /// row lock serializes concurrent creators and a rollback gives the value
    /// back.
    pub async fn next_value(conn: &mut PgConnection, name: &str) -> AppResult<i64> {
        let value: Option<(i64,)> = sqlx::query_as(
            "UPDATE document_sequences SET last_value = last_value + 1 WHERE name = $1 RETURNING last_value",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("Error advancing document sequence"))?;

        value
            .map(|(v,)| v)
            .ok_or_else(|| AppError::Internal(format!("Document sequence '{}' is missing", name)))
    }
}
