//! Record store - insert-one and find-by-id over the permit collection.
//!
//! The store is the component that assigns identifiers and enforces the
//! schema typing declared by the record model; handlers only see the trait.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::permit::models::{PermitTransit, SubmissionError, SubmitPermitForm};

/// Errors surfaced by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("submitted data failed schema typing: {0}")]
    Schema(#[from] SubmissionError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence handle for permit-transit records.
#[async_trait]
pub trait PermitStore {
    /// Persist a submission. The store assigns the identifier and returns
    /// the record as stored.
    async fn insert_permit(
        &self,
        submission: SubmitPermitForm,
    ) -> Result<PermitTransit, StoreError>;

    /// Fetch a record by its identifier.
    async fn find_permit(&self, id: &Uuid) -> Result<Option<PermitTransit>, StoreError>;
}

const PERMIT_COLUMNS: &str = "id, permit_number, module, validity_from, validity_till, \
     time_from, time_till, items, quantity, \"value\", mmca_name, name, address, mobile, \
     division, \"range\", kist, etp_number, transit_module, transit_item, transit_quantity, \
     mahal, destination, valid_from_date, valid_from_time, valid_to_date, valid_to_time, \
     vehicle_number, driver_info, transit_division, transit_range, transit_permit_number, status";

/// PostgreSQL-backed store over the `permit_transits` table.
pub struct PgPermitStore {
    pool: PgPool,
}

impl PgPermitStore {
    /// Establish the connection pool. Called once at process start.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(100)
            .min_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(900))
            .max_lifetime(std::time::Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool, for callers that manage their own connection.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermitStore for PgPermitStore {
    async fn insert_permit(
        &self,
        submission: SubmitPermitForm,
    ) -> Result<PermitTransit, StoreError> {
        let permit = submission.into_permit(Uuid::new_v4())?;

        let insert_sql = format!(
            "INSERT INTO permit_transits ({PERMIT_COLUMNS}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
              $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, $33)"
        );

        sqlx::query(&insert_sql)
            .bind(permit.id)
            .bind(&permit.permit_number)
            .bind(&permit.module)
            .bind(permit.validity_from)
            .bind(permit.validity_till)
            .bind(&permit.time_from)
            .bind(&permit.time_till)
            .bind(&permit.items)
            .bind(permit.quantity)
            .bind(&permit.value)
            .bind(&permit.mmca_name)
            .bind(&permit.name)
            .bind(&permit.address)
            .bind(&permit.mobile)
            .bind(&permit.division)
            .bind(&permit.range)
            .bind(&permit.kist)
            .bind(&permit.etp_number)
            .bind(&permit.transit_module)
            .bind(&permit.transit_item)
            .bind(permit.transit_quantity)
            .bind(&permit.mahal)
            .bind(&permit.destination)
            .bind(permit.valid_from_date)
            .bind(&permit.valid_from_time)
            .bind(permit.valid_to_date)
            .bind(&permit.valid_to_time)
            .bind(&permit.vehicle_number)
            .bind(&permit.driver_info)
            .bind(&permit.transit_division)
            .bind(&permit.transit_range)
            .bind(&permit.transit_permit_number)
            .bind(&permit.status)
            .execute(&self.pool)
            .await?;

        Ok(permit)
    }

    async fn find_permit(&self, id: &Uuid) -> Result<Option<PermitTransit>, StoreError> {
        let select_sql = format!("SELECT {PERMIT_COLUMNS} FROM permit_transits WHERE id = $1");

        let permit = sqlx::query_as::<_, PermitTransit>(&select_sql)
            .bind(*id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(permit)
    }
}
