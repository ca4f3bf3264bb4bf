// Service exports
pub mod matching;
pub mod postgres;
pub mod store;

pub use matching::{MatchingService, DEFAULT_INVESTOR_STATUSES, DEFAULT_PAGE_SIZE};
pub use postgres::PostgresCatalog;
pub use store::{CatalogStore, InMemoryCatalog, StoreError};
