use crate::constants::PREDICTION_TABLE;
use crate::storage::entity::{patient_data, prediction_history};
use crate::PtbResult;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Schema,
    Statement,
};
use std::time::Duration;

/// Opens the database and creates the PTB tables if they are missing.
///
/// In-memory SQLite databases live inside a single connection, so their pool is pinned to one.
pub async fn establish_connection(db_url: &str) -> PtbResult<DatabaseConnection> {
    let in_memory = is_in_memory(db_url);

    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);
    if in_memory {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(10).min_connections(1);
    }

    let db = Database::connect(opt).await?;
    let backend = db.get_database_backend();

    if backend == DatabaseBackend::Sqlite && !in_memory {
        db.execute(Statement::from_string(
            backend,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;
    }

    let schema = Schema::new(backend);

    let stmt = backend.build(
        schema
            .create_table_from_entity(patient_data::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = backend.build(
        schema
            .create_table_from_entity(prediction_history::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    // Recent-history reads order by date.
    db.execute(Statement::from_string(
        backend,
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_date ON {table}(prediction_date);",
            table = PREDICTION_TABLE
        ),
    ))
    .await?;

    tracing::info!(in_memory, "database ready");

    Ok(db)
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:ptb?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://ptb.db?mode=rwc"));
    }

    #[tokio::test]
    async fn creates_tables_on_a_file_database() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("ptb.db").display());

        let db = establish_connection(&url).await.expect("connect should succeed");
        // Reconnecting must not fail on existing tables.
        drop(db);
        let db = establish_connection(&url).await.expect("reconnect should succeed");

        let rows = db
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|row| row.try_get::<String>("", "name").unwrap())
            .collect();
        assert!(names.contains(&"patient_data".to_string()));
        assert!(names.contains(&"prediction_history".to_string()));
    }
}
