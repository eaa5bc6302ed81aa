//! Patient database operations.

use sqlx::SqlitePool;
use tracing::{info, instrument};

use super::{create_pool, ensure_schema};
use crate::config::Config;
use crate::models::{NewPatient, Patient, PatientChanges};

const SELECT_PATIENT: &str = "SELECT id, name, age, address, admission, phone FROM patients";

/// Persistence context for patient records, shared by every request handler.
#[derive(Debug, Clone)]
pub struct PatientStore {
    pool: SqlitePool,
}

impl PatientStore {
    /// Wrap an existing pool. The schema must already exist.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the configured database and make sure the table exists.
    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = create_pool(config).await?;
        ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to check the database is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Every patient, in insertion order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Patient>, sqlx::Error> {
        sqlx::query_as::<_, Patient>(&format!("{SELECT_PATIENT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
    }

    /// A single patient by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Patient>, sqlx::Error> {
        sqlx::query_as::<_, Patient>(&format!("{SELECT_PATIENT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a new patient and return it with its assigned id.
    #[instrument(skip(self, patient), fields(name = %patient.name))]
    pub async fn insert(&self, patient: NewPatient) -> Result<Patient, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO patients (name, age, address, admission, phone)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&patient.name)
        .bind(patient.age)
        .bind(&patient.address)
        .bind(&patient.admission)
        .bind(patient.phone)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(id, "patient created");

        Ok(Patient {
            id,
            name: patient.name,
            age: patient.age,
            address: patient.address,
            admission: patient.admission,
            phone: patient.phone,
        })
    }

    /// Apply a partial update to an existing patient.
    ///
    /// Returns `None` when no patient has this id. The read and the write share
    /// one transaction.
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: i64,
        changes: PatientChanges,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Patient>(&format!("{SELECT_PATIENT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut patient) = existing else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(patient));
        }

        patient.apply(changes);

        sqlx::query("UPDATE patients SET phone = ?, address = ?, admission = ? WHERE id = ?")
            .bind(patient.phone)
            .bind(&patient.address)
            .bind(&patient.admission)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(id, "patient updated");

        Ok(Some(patient))
    }

    /// Case-insensitive substring search on the patient name.
    ///
    /// SQLite `LIKE` and `lower()` only fold ASCII, so names are folded in Rust.
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Patient>, sqlx::Error> {
        let needle = term.to_lowercase();
        let patients = self.list().await?;

        Ok(patients
            .into_iter()
            .filter(|patient| name_contains(&patient.name, &needle))
            .collect())
    }
}

/// Whether `name` contains the already-lowercased `needle`, ignoring case.
fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}
