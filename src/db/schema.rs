//! Table bootstrap for the patients database.

use sqlx::SqlitePool;
use tracing::debug;

/// DDL for the `patients` table.
pub const CREATE_PATIENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      VARCHAR(80)  NOT NULL,
    age       INTEGER      NOT NULL,
    address   VARCHAR(120) NOT NULL,
    admission VARCHAR(120) NOT NULL,
    phone     INTEGER      NOT NULL
)
"#;

/// Create the `patients` table if it does not exist yet. Safe to call on every start.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PATIENTS_TABLE).execute(pool).await?;
    debug!("patients schema ready");
    Ok(())
}
