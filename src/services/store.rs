use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Investor, Lead, Property};

/// Errors raised while reading the property, investor and lead catalogs
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Read access to the Property, Investor and Lead stores
///
/// Lookups return `Ok(None)` for unknown ids; `Err` is reserved for I/O and
/// decoding failures. Listing calls return at most `limit` records.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_lead(&self, id: i32) -> Result<Option<Lead>, StoreError>;

    async fn get_property(&self, id: i32) -> Result<Option<Property>, StoreError>;

    async fn get_investor(&self, id: i32) -> Result<Option<Investor>, StoreError>;

    async fn list_leads(&self, limit: usize) -> Result<Vec<Lead>, StoreError>;

    async fn list_properties(&self, limit: usize) -> Result<Vec<Property>, StoreError>;

    async fn list_investors(&self, limit: usize) -> Result<Vec<Investor>, StoreError>;
}

/// Catalog held entirely in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    properties: Vec<Property>,
    investors: Vec<Investor>,
    leads: Vec<Lead>,
}

impl InMemoryCatalog {
    pub fn new(properties: Vec<Property>, investors: Vec<Investor>, leads: Vec<Lead>) -> Self {
        Self {
            properties,
            investors,
            leads,
        }
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_investor(mut self, investor: Investor) -> Self {
        self.investors.push(investor);
        self
    }

    pub fn with_lead(mut self, lead: Lead) -> Self {
        self.leads.push(lead);
        self
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get_lead(&self, id: i32) -> Result<Option<Lead>, StoreError> {
        Ok(self.leads.iter().find(|l| l.id == id).cloned())
    }

    async fn get_property(&self, id: i32) -> Result<Option<Property>, StoreError> {
        Ok(self.properties.iter().find(|p| p.id == id).cloned())
    }

    async fn get_investor(&self, id: i32) -> Result<Option<Investor>, StoreError> {
        Ok(self.investors.iter().find(|i| i.id == id).cloned())
    }

    async fn list_leads(&self, limit: usize) -> Result<Vec<Lead>, StoreError> {
        Ok(self.leads.iter().take(limit).cloned().collect())
    }

    async fn list_properties(&self, limit: usize) -> Result<Vec<Property>, StoreError> {
        Ok(self.properties.iter().take(limit).cloned().collect())
    }

    async fn list_investors(&self, limit: usize) -> Result<Vec<Investor>, StoreError> {
        Ok(self.investors.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_lookup_and_limit() {
        let catalog = InMemoryCatalog::default()
            .with_lead(Lead { id: 1, property_id: 10 })
            .with_lead(Lead { id: 2, property_id: 11 })
            .with_lead(Lead { id: 3, property_id: 12 });

        assert_eq!(catalog.get_lead(2).await.unwrap().map(|l| l.property_id), Some(11));
        assert!(catalog.get_lead(99).await.unwrap().is_none());
        assert_eq!(catalog.list_leads(2).await.unwrap().len(), 2);
        assert!(catalog.list_properties(10).await.unwrap().is_empty());
    }
}
