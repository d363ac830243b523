//! Persistence for cycle and symptom logs.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{CycleEntry, NewCycleEntry, NewSymptom, SymptomLog};

#[async_trait]
pub trait CycleStore: Send + Sync {
    /// A user's cycle entries, most recent `start_date` first.
    async fn list_cycles(&self, user_id: Uuid) -> Result<Vec<CycleEntry>, StoreError>;

    async fn insert_cycle(&self, entry: NewCycleEntry) -> Result<CycleEntry, StoreError>;

    /// A user's symptom logs, most recent `date` first.
    async fn list_symptoms(&self, user_id: Uuid) -> Result<Vec<SymptomLog>, StoreError>;

    async fn insert_symptom(&self, symptom: NewSymptom) -> Result<SymptomLog, StoreError>;

    /// Returns the number of rows removed.
    async fn delete_symptoms(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        symptom_type: &str,
    ) -> Result<u64, StoreError>;
}

#[derive(sqlx::FromRow)]
struct CycleRow {
    id: Uuid,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    flow_intensity: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CycleRow> for CycleEntry {
    type Error = StoreError;

    fn try_from(row: CycleRow) -> Result<Self, Self::Error> {
        let flow_intensity = row
            .flow_intensity
            .parse()
            .map_err(|e| StoreError::InvalidRow(format!("cycle {}: {}", row.id, e)))?;
        Ok(CycleEntry {
            id: row.id,
            user_id: row.user_id,
            start_date: row.start_date,
            end_date: row.end_date,
            flow_intensity,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SymptomRow {
    id: Uuid,
    user_id: Uuid,
    date: NaiveDate,
    symptom_type: String,
    intensity: i32,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SymptomRow> for SymptomLog {
    fn from(row: SymptomRow) -> Self {
        SymptomLog {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            symptom_type: row.symptom_type,
            intensity: row.intensity,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CycleStore for PgStore {
    async fn list_cycles(&self, user_id: Uuid) -> Result<Vec<CycleEntry>, StoreError> {
        let rows = sqlx::query_as::<_, CycleRow>(
            "SELECT id, user_id, start_date, end_date, flow_intensity, notes, created_at
             FROM cycle_logs
             WHERE user_id = $1
             ORDER BY start_date DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CycleEntry::try_from).collect()
    }

    async fn insert_cycle(&self, entry: NewCycleEntry) -> Result<CycleEntry, StoreError> {
        let row = sqlx::query_as::<_, CycleRow>(
            "INSERT INTO cycle_logs (id, user_id, start_date, end_date, flow_intensity, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, user_id, start_date, end_date, flow_intensity, notes, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.start_date)
        .bind(entry.end_date)
        .bind(entry.flow_intensity.as_str())
        .bind(entry.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(log_insert_failure)?;

        row.try_into()
    }

    async fn list_symptoms(&self, user_id: Uuid) -> Result<Vec<SymptomLog>, StoreError> {
        let rows = sqlx::query_as::<_, SymptomRow>(
            "SELECT id, user_id, date, symptom_type, intensity, notes, created_at
             FROM symptom_logs
             WHERE user_id = $1
             ORDER BY date DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SymptomLog::from).collect())
    }

    async fn insert_symptom(&self, symptom: NewSymptom) -> Result<SymptomLog, StoreError> {
        let row = sqlx::query_as::<_, SymptomRow>(
            "INSERT INTO symptom_logs (id, user_id, date, symptom_type, intensity, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, user_id, date, symptom_type, intensity, notes, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(symptom.user_id)
        .bind(symptom.date)
        .bind(symptom.symptom_type.trim())
        .bind(symptom.intensity)
        .bind(symptom.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(log_insert_failure)?;

        Ok(row.into())
    }

    async fn delete_symptoms(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        symptom_type: &str,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "DELETE FROM symptom_logs WHERE user_id = $1 AND date = $2 AND symptom_type = $3",
        )
        .bind(user_id)
        .bind(date)
        .bind(symptom_type)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

fn log_insert_failure(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        tracing::error!("❌ DB insert failed: {}", db_err.message());

        if let Some(code) = db_err.code() {
            tracing::info!("ℹ️ SQLSTATE code: {}", code);
        }

        if let Some(constraint) = db_err.constraint() {
            tracing::info!("🔒 Constraint violated: {}", constraint);
        }
    }
    StoreError::Database(e)
}
