//! Repository for the `history_entries` table.

use sqlx::{PgConnection, PgPool};

use crate::models::history::{CreateHistoryEntry, HistoryEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, entry_type, user_id, diff, snapshot, \"values\", comment, \
     created_at, updated_at";

/// Provides insert and read operations for history entries.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Record a history entry. Missing documents are stored as NULL.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHistoryEntry,
    ) -> Result<HistoryEntry, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::create_in(&mut conn, input).await
    }

    /// Record a history entry on an open connection (used inside transactions).
    pub(crate) async fn create_in(
        conn: &mut PgConnection,
        input: &CreateHistoryEntry,
    ) -> Result<HistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO history_entries (key, entry_type, user_id, diff, snapshot, \"values\", comment)
             VALUES ($1, COALESCE($2, 1), $3, $4, $5, $6, COALESCE($7, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(&input.key)
            .bind(input.entry_type)
            .bind(input.user_id)
            .bind(&input.diff)
            .bind(&input.snapshot)
            .bind(&input.values)
            .bind(&input.comment)
            .fetch_one(conn)
            .await
    }

    /// List the entries recorded under `key`, newest first.
    pub async fn list_by_key(pool: &PgPool, key: &str) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history_entries WHERE key = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(key)
            .fetch_all(pool)
            .await
    }
}
