use async_trait::async_trait;
use fleet_sync_core::{SyncError, SyncResult};
use fleet_sync_domain::{DriverRecord, DriverRepository};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, error, info};

/// Insert-or-update persistence for the drivers table.
///
/// One connection is acquired per run and released on every exit path. Each
/// record is its own statement: a failure partway leaves earlier records
/// durably written, and a failed record is logged and skipped so the rest of
/// the roster still lands.
pub struct PostgresDriverRepository {
    pool: PgPool,
}

impl PostgresDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // hired_on is absent from the update set: the original hire date is
    // written once and never overwritten by a later sync.
    async fn upsert_one(conn: &mut PgConnection, record: &DriverRecord) -> SyncResult<()> {
        sqlx::query(
            r#"
            INSERT INTO drivers (
                driver_id, status, first_name, last_name, truck_id, phone_number,
                email, hired_on, updated_on, company_id, dispatcher,
                first_language, second_language,
                global_dnd, safety_call, safety_message, hos_support,
                maintainance_call, maintainance_message,
                dispatch_call, dispatch_message,
                account_call, account_message
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23
            )
            ON CONFLICT (driver_id) DO UPDATE SET
                status = EXCLUDED.status,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                truck_id = EXCLUDED.truck_id,
                phone_number = EXCLUDED.phone_number,
                email = EXCLUDED.email,
                updated_on = EXCLUDED.updated_on,
                company_id = EXCLUDED.company_id,
                dispatcher = EXCLUDED.dispatcher,
                first_language = EXCLUDED.first_language,
                second_language = EXCLUDED.second_language,
                global_dnd = EXCLUDED.global_dnd,
                safety_call = EXCLUDED.safety_call,
                safety_message = EXCLUDED.safety_message,
                hos_support = EXCLUDED.hos_support,
                maintainance_call = EXCLUDED.maintainance_call,
                maintainance_message = EXCLUDED.maintainance_message,
                dispatch_call = EXCLUDED.dispatch_call,
                dispatch_message = EXCLUDED.dispatch_message,
                account_call = EXCLUDED.account_call,
                account_message = EXCLUDED.account_message
            "#,
        )
        .bind(&record.driver_id)
        .bind(&record.status)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.truck_id)
        .bind(&record.phone_number)
        .bind(&record.email)
        .bind(record.hired_on)
        .bind(record.updated_on)
        .bind(&record.company_id)
        .bind(&record.dispatcher)
        .bind(&record.first_language)
        .bind(&record.second_language)
        .bind(record.global_dnd)
        .bind(record.safety_call)
        .bind(record.safety_message)
        .bind(record.hos_support)
        .bind(record.maintainance_call)
        .bind(record.maintainance_message)
        .bind(record.dispatch_call)
        .bind(record.dispatch_message)
        .bind(record.account_call)
        .bind(record.account_message)
        .execute(&mut *conn)
        .await
        .map_err(SyncError::Database)?;

        Ok(())
    }
}

#[async_trait]
impl DriverRepository for PostgresDriverRepository {
    async fn upsert_all(&self, records: &[DriverRecord]) -> SyncResult<usize> {
        let mut conn = self.pool.acquire().await.map_err(SyncError::Database)?;
        debug!("database connection acquired");

        let mut written = 0usize;
        for record in records {
            match Self::upsert_one(&mut conn, record).await {
                Ok(()) => {
                    written += 1;
                    debug!(driver_id = %record.driver_id, "driver upserted");
                }
                Err(e) => {
                    // One bad record must not block the rest of the roster.
                    error!(driver_id = %record.driver_id, "driver upsert failed, continuing: {e}");
                }
            }
        }

        info!(written, total = records.len(), "upsert pass complete");
        Ok(written)
    }
}
