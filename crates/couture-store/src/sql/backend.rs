//! SQL record store.

use async_trait::async_trait;
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Row};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::error::StoreError;
use crate::id::IdGenerator;
use crate::record::{ClientPatch, ClientRecord, NewClient, SpecificMeasurements};
use crate::traits::ClientStore;

use super::config::SqlStoreConfig;
use super::queries;

/// Inserts tried before giving up on finding an unused id.
const MAX_INSERT_ATTEMPTS: usize = 100;

/// Database type enum for query selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// PostgreSQL database.
    PostgreSQL,
    /// MySQL/MariaDB database.
    MySQL,
    /// SQLite database.
    SQLite,
}

impl DatabaseType {
    /// Detect database type from URL.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::PostgreSQL)
        } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            Some(Self::MySQL)
        } else if url.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else {
            None
        }
    }

    fn pick(self, pg: &'static str, other: &'static str) -> &'static str {
        match self {
            Self::PostgreSQL => pg,
            Self::MySQL | Self::SQLite => other,
        }
    }
}

/// SQL-backed record store.
///
/// Supports PostgreSQL, MySQL, and SQLite through SQLx. Partial updates are
/// merged in Rust inside a transaction (read row, apply patch, write row), so
/// fields absent from a patch keep their stored values on every database.
pub struct SqlStore {
    pool: AnyPool,
    db_type: DatabaseType,
    ids: IdGenerator,
    config: SqlStoreConfig,
}

impl SqlStore {
    /// Connect to database and create the store.
    ///
    /// An in-memory SQLite URL is pinned to a single long-lived connection,
    /// whatever the pool settings say.
    pub async fn connect(config: SqlStoreConfig) -> Result<Self, StoreError> {
        let config = config.single_connection_if_in_memory();

        // Install database drivers for the "any" pool
        sqlx::any::install_default_drivers();

        let db_type = DatabaseType::from_url(&config.database_url)
            .ok_or_else(|| StoreError::InvalidLocation(config.database_url.clone()))?;

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(&config.database_url)
            .await?;

        Ok(Self {
            pool,
            db_type,
            ids: IdGenerator::new(),
            config,
        })
    }

    /// Create the `clients` table if it does not exist.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        let ddl = match self.db_type {
            DatabaseType::PostgreSQL => queries::CREATE_TABLE_PG,
            DatabaseType::MySQL => queries::CREATE_TABLE_MYSQL,
            DatabaseType::SQLite => queries::CREATE_TABLE_SQLITE,
        };
        sqlx::query(ddl).execute(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool (for advanced usage).
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Get database type.
    pub fn database_type(&self) -> DatabaseType {
        self.db_type
    }

    /// Parse a client row from AnyRow.
    fn parse_row(row: &AnyRow) -> Result<ClientRecord, StoreError> {
        let specific_measurements = row
            .try_get::<Option<String>, _>("specific_measurements")?
            .filter(|s| !s.is_empty())
            .map(|s| serde_json::from_str::<SpecificMeasurements>(&s))
            .transpose()?;
        let date: String = row.try_get("date")?;
        let date = OffsetDateTime::parse(&date, &Rfc3339)
            .map_err(|e| StoreError::Database(format!("bad date {date:?}: {e}")))?;

        Ok(ClientRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            description: row.try_get("description")?,
            measurements: row.try_get("measurements")?,
            specific_measurements,
            price: row.try_get("price")?,
            fabric_photo: row.try_get("fabric_photo")?,
            date,
            delivered: get_bool(row, "delivered")?,
            archived: get_bool(row, "archived")?,
        })
    }
}

/// SQLite and MySQL store booleans as integers, so try each width.
fn get_bool(row: &AnyRow, column: &str) -> Result<bool, StoreError> {
    let value = row
        .try_get::<bool, _>(column)
        .or_else(|_| row.try_get::<i64, _>(column).map(|v| v != 0))
        .or_else(|_| row.try_get::<i32, _>(column).map(|v| v != 0))
        .or_else(|_| row.try_get::<i16, _>(column).map(|v| v != 0))?;
    Ok(value)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_unique_violation())
}

fn encode_specific(m: &Option<SpecificMeasurements>) -> Result<Option<String>, StoreError> {
    Ok(match m {
        Some(m) => Some(serde_json::to_string(m)?),
        None => None,
    })
}

#[async_trait]
impl ClientStore for SqlStore {
    async fn load_all(&self) -> Result<Vec<ClientRecord>, StoreError> {
        let rows = sqlx::query(queries::SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::parse_row).collect()
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        let query = self
            .db_type
            .pick(queries::SELECT_ONE_PG, queries::SELECT_ONE_MYSQL);
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::parse_row).transpose()
    }

    async fn create_one(&self, client: NewClient) -> Result<ClientRecord, StoreError> {
        let mut record = client.into_record(String::new(), OffsetDateTime::now_utc());
        let date = record.date.format(&Rfc3339).map_err(StoreError::backend)?;
        let specific = encode_specific(&record.specific_measurements)?;
        let query = self.db_type.pick(queries::INSERT_PG, queries::INSERT_MYSQL);

        // Another writer may hold the same timestamp id; take the next one.
        for _ in 0..MAX_INSERT_ATTEMPTS {
            record.id = self.ids.next();
            let result = sqlx::query(query)
                .bind(&record.id)
                .bind(&record.name)
                .bind(&record.phone)
                .bind(&record.description)
                .bind(&record.measurements)
                .bind(specific.clone())
                .bind(record.price)
                .bind(record.fabric_photo.clone())
                .bind(date.clone())
                .bind(record.delivered)
                .bind(record.archived)
                .execute(&self.pool)
                .await;

            match result {
                Ok(_) => {
                    debug!(id = %record.id, "inserted client row");
                    return Ok(record);
                }
                Err(e) if is_unique_violation(&e) => {
                    debug!(id = %record.id, "client id taken, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(StoreError::Database(format!(
            "no free client id after {MAX_INSERT_ATTEMPTS} attempts"
        )))
    }

    async fn replace_fields(
        &self,
        id: &str,
        patch: ClientPatch,
    ) -> Result<Option<ClientRecord>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let select = self
            .db_type
            .pick(queries::SELECT_ONE_PG, queries::SELECT_ONE_MYSQL);
        let Some(row) = sqlx::query(select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        let mut record = Self::parse_row(&row)?;
        record.apply(patch);

        let update = self.db_type.pick(queries::UPDATE_PG, queries::UPDATE_MYSQL);
        sqlx::query(update)
            .bind(&record.name)
            .bind(&record.phone)
            .bind(&record.description)
            .bind(&record.measurements)
            .bind(encode_specific(&record.specific_measurements)?)
            .bind(record.price)
            .bind(record.fabric_photo.clone())
            .bind(record.delivered)
            .bind(record.archived)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(%id, "updated client row");
        Ok(Some(record))
    }

    async fn delete_one(&self, id: &str) -> Result<bool, StoreError> {
        let query = self.db_type.pick(queries::DELETE_PG, queries::DELETE_MYSQL);
        let result = sqlx::query(query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

// Debug implementation (don't leak credentials)
impl std::fmt::Debug for SqlStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlStore")
            .field("db_type", &self.db_type)
            .field("max_connections", &self.config.max_connections)
            .finish_non_exhaustive()
    }
}
