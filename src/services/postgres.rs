use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{Investor, Island, Lead, Priority, Property, PropertyStatus, Strategy};
use crate::services::store::{CatalogStore, StoreError};

const PROPERTY_COLUMNS: &str = r#"
    id, address, city, estimated_value, amount_owed, property_type,
    days_until_auction, auction_date, priority, status
"#;

const INVESTOR_COLUMNS: &str = r#"
    id, name, email, company, preferred_islands, property_types,
    min_budget, max_budget, strategies
"#;

/// Read-only catalog backed by the CRM's PostgreSQL database
///
/// The schema is owned by the CRM; this client only issues SELECTs against
/// the `properties`, `investors` and `leads` tables.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new catalog client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new catalog client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL catalog");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalog {
    async fn get_lead(&self, id: i32) -> Result<Option<Lead>, StoreError> {
        let row = sqlx::query("SELECT id, property_id FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(lead_from_row).transpose()
    }

    async fn get_property(&self, id: i32) -> Result<Option<Property>, StoreError> {
        let query = format!("SELECT {} FROM properties WHERE id = $1", PROPERTY_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(property_from_row).transpose()
    }

    async fn get_investor(&self, id: i32) -> Result<Option<Investor>, StoreError> {
        let query = format!("SELECT {} FROM investors WHERE id = $1", INVESTOR_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(investor_from_row).transpose()
    }

    async fn list_leads(&self, limit: usize) -> Result<Vec<Lead>, StoreError> {
        let rows = sqlx::query("SELECT id, property_id FROM leads ORDER BY id LIMIT $1")
            .bind(sql_limit(limit)?)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(lead_from_row).collect()
    }

    async fn list_properties(&self, limit: usize) -> Result<Vec<Property>, StoreError> {
        let query = format!("SELECT {} FROM properties ORDER BY id LIMIT $1", PROPERTY_COLUMNS);
        let rows = sqlx::query(&query)
            .bind(sql_limit(limit)?)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(property_from_row).collect()
    }

    async fn list_investors(&self, limit: usize) -> Result<Vec<Investor>, StoreError> {
        let query = format!("SELECT {} FROM investors ORDER BY id LIMIT $1", INVESTOR_COLUMNS);
        let rows = sqlx::query(&query)
            .bind(sql_limit(limit)?)
            .fetch_all(&self.pool)
            .await?;

        let investors: Vec<Investor> = rows
            .iter()
            .map(investor_from_row)
            .collect::<Result<_, _>>()?;

        tracing::debug!("Loaded {} investors", investors.len());
        Ok(investors)
    }
}

/// Postgres takes a BIGINT for LIMIT
fn sql_limit(limit: usize) -> Result<i64, StoreError> {
    i64::try_from(limit)
        .map_err(|_| StoreError::InvalidData(format!("listing limit {} exceeds BIGINT", limit)))
}

fn lead_from_row(row: &PgRow) -> Result<Lead, StoreError> {
    Ok(Lead {
        id: row.try_get("id")?,
        property_id: row.try_get("property_id")?,
    })
}

fn property_from_row(row: &PgRow) -> Result<Property, StoreError> {
    let id: i32 = row.try_get("id")?;
    let priority: String = row.try_get("priority")?;
    let status: String = row.try_get("status")?;

    let priority = Priority::from_label(&priority).unwrap_or_else(|| {
        tracing::warn!("Property {} has unknown priority {:?}, treating as low", id, priority);
        Priority::Low
    });

    Ok(Property {
        id,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        estimated_value: row.try_get("estimated_value")?,
        amount_owed: row.try_get("amount_owed")?,
        property_type: row.try_get("property_type")?,
        days_until_auction: row.try_get("days_until_auction")?,
        auction_date: row.try_get("auction_date")?,
        priority,
        status: PropertyStatus::from_label(&status),
    })
}

fn investor_from_row(row: &PgRow) -> Result<Investor, StoreError> {
    let id: i32 = row.try_get("id")?;
    let islands: Option<Vec<String>> = row.try_get("preferred_islands")?;
    let strategies: Option<Vec<String>> = row.try_get("strategies")?;

    Ok(Investor {
        id,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        company: row.try_get("company")?,
        preferred_islands: parse_labels(id, "island", islands.unwrap_or_default(), Island::from_label),
        property_types: row.try_get("property_types")?,
        min_budget: row.try_get("min_budget")?,
        max_budget: row.try_get("max_budget")?,
        strategies: parse_labels(id, "strategy", strategies.unwrap_or_default(), Strategy::from_label),
    })
}

/// Convert stored labels into closed enum values, skipping unknown ones
fn parse_labels<T>(
    investor_id: i32,
    kind: &str,
    labels: Vec<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Vec<T> {
    labels
        .into_iter()
        .filter_map(|label| {
            let parsed = parse(&label);
            if parsed.is_none() {
                tracing::warn!("Investor {} has unknown {} {:?}, skipping", investor_id, kind, label);
            }
            parsed
        })
        .collect()
}
