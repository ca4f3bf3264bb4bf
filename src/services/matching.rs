use std::sync::Arc;

use crate::core::{rank, summarize, Matcher};
use crate::models::{MatchResult, MatchingStats, PropertyStatus};
use crate::services::store::{CatalogStore, StoreError};

/// Default cap on records fetched per catalog listing
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Statuses scanned when matching from the investor side
pub const DEFAULT_INVESTOR_STATUSES: [PropertyStatus; 4] = [
    PropertyStatus::Foreclosure,
    PropertyStatus::TaxDelinquent,
    PropertyStatus::Auction,
    PropertyStatus::Wholesale,
];

/// Matching queries over a catalog store
///
/// Every call fetches fresh collections and recomputes all scores; nothing is
/// cached between calls. Unknown leads, properties and investors produce an
/// empty result rather than an error.
#[derive(Clone)]
pub struct MatchingService {
    store: Arc<dyn CatalogStore>,
    matcher: Matcher,
    page_size: usize,
    investor_statuses: Vec<PropertyStatus>,
}

impl MatchingService {
    pub fn new(store: Arc<dyn CatalogStore>, matcher: Matcher) -> Self {
        Self {
            store,
            matcher,
            page_size: DEFAULT_PAGE_SIZE,
            investor_statuses: DEFAULT_INVESTOR_STATUSES.to_vec(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_investor_statuses(mut self, statuses: Vec<PropertyStatus>) -> Self {
        self.investor_statuses = statuses;
        self
    }

    /// Rank every investor against the property behind `lead_id`
    pub async fn find_matches_for_lead(&self, lead_id: i32) -> Result<Vec<MatchResult>, StoreError> {
        let Some(lead) = self.store.get_lead(lead_id).await? else {
            tracing::debug!("Lead {} not found", lead_id);
            return Ok(vec![]);
        };
        let Some(property) = self.store.get_property(lead.property_id).await? else {
            tracing::debug!("Property {} for lead {} not found", lead.property_id, lead_id);
            return Ok(vec![]);
        };

        let investors = self.store.list_investors(self.page_size).await?;
        let matches = self.matcher.matches_for_lead(&lead, &property, &investors);

        tracing::debug!(
            "Lead {} matched {} of {} investors",
            lead_id,
            matches.len(),
            investors.len()
        );

        Ok(matches)
    }

    /// Ranked union of the matches of every lead
    pub async fn find_matches_for_all_leads(&self) -> Result<Vec<MatchResult>, StoreError> {
        let leads = self.store.list_leads(self.page_size).await?;
        let mut all_matches = Vec::new();

        for lead in &leads {
            all_matches.extend(self.find_matches_for_lead(lead.id).await?);
        }

        tracing::info!("Found {} matches across {} leads", all_matches.len(), leads.len());

        Ok(rank(all_matches))
    }

    /// Rank the pursued properties for one investor
    pub async fn find_matches_for_investor(
        &self,
        investor_id: i32,
    ) -> Result<Vec<MatchResult>, StoreError> {
        let Some(investor) = self.store.get_investor(investor_id).await? else {
            tracing::debug!("Investor {} not found", investor_id);
            return Ok(vec![]);
        };

        let properties: Vec<_> = self
            .store
            .list_properties(self.page_size)
            .await?
            .into_iter()
            .filter(|p| self.investor_statuses.contains(&p.status))
            .collect();
        let leads = self.store.list_leads(self.page_size).await?;

        let matches = self.matcher.matches_for_investor(&investor, &properties, &leads);

        tracing::info!(
            "Investor {} matched {} of {} properties",
            investor_id,
            matches.len(),
            properties.len()
        );

        Ok(matches)
    }

    /// Totals and per-entity counts over all lead matches
    pub async fn get_matching_stats(&self) -> Result<MatchingStats, StoreError> {
        let matches = self.find_matches_for_all_leads().await?;
        Ok(summarize(&matches))
    }
}
