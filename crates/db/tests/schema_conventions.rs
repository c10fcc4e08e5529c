use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table (except _sqlx_migrations) must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(&format!(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = '{table}'
                   AND column_name = '{col}'"
            ))
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// No character varying columns; TEXT is used throughout.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "Found varchar columns: {rows:?}");
}

/// History documents are nullable JSONB with no non-null default.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_documents_are_nullable_jsonb(pool: PgPool) {
    for col in ["diff", "snapshot", "values"] {
        let (data_type, is_nullable, default): (String, String, Option<String>) = sqlx::query_as(
            "SELECT data_type, is_nullable, column_default
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = 'history_entries'
               AND column_name = $1",
        )
        .bind(col)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(data_type, "jsonb", "history_entries.{col} should be jsonb");
        assert_eq!(is_nullable, "YES", "history_entries.{col} should be nullable");
        assert!(
            default.is_none_or(|d| d.starts_with("NULL")),
            "history_entries.{col} should default to NULL"
        );
    }
}

/// Every option table enforces a unique name per project.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_option_tables_have_name_constraint(pool: PgPool) {
    for kind in taskboard_core::validation::OptionKind::ALL {
        let constraint = format!("uq_{}_project_name", kind.table());
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM information_schema.table_constraints
                 WHERE constraint_name = $1 AND constraint_type = 'UNIQUE'
             )",
        )
        .bind(&constraint)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(found, "missing constraint {constraint}");
    }
}
