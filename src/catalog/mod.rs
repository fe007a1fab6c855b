//! Crop catalog provider: remote catalog when configured, static data otherwise.

pub mod cache;
pub mod fetcher;

pub use cache::TtlCache;
pub use fetcher::{extract_items, normalize_catalog, CatalogFetcher};

use crate::config::CatalogConfig;
use crate::data::static_catalog;
use crate::error::Result;
use crate::models::CropRequirement;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CatalogSource {
    Remote,
    Static,
}

/// Immutable catalog view shared by every recommendation made from it.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub crops: Arc<Vec<CropRequirement>>,
    pub source: CatalogSource,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    fn new(crops: Vec<CropRequirement>, source: CatalogSource) -> Self {
        Self {
            crops: Arc::new(crops),
            source,
            fetched_at: Utc::now(),
        }
    }
}

pub struct CatalogProvider {
    fetcher: Option<CatalogFetcher>,
    defaults: Vec<CropRequirement>,
    ttl: Duration,
    cache: TtlCache<CatalogSnapshot>,
}

impl CatalogProvider {
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let fetcher = if config.is_remote() {
            Some(CatalogFetcher::new(config)?)
        } else {
            None
        };

        Ok(Self {
            fetcher,
            defaults: static_catalog(),
            ttl: config.cache_ttl(),
            cache: TtlCache::new(),
        })
    }

    pub fn static_only() -> Self {
        Self {
            fetcher: None,
            defaults: static_catalog(),
            ttl: Duration::MAX,
            cache: TtlCache::new(),
        }
    }

    pub fn is_remote(&self) -> bool {
        self.fetcher.is_some()
    }

    /// Current catalog. Never fails: fetch errors fall back to the static
    /// catalog, which is then cached like a remote result.
    pub async fn snapshot(&self, force_refresh: bool) -> CatalogSnapshot {
        self.cache
            .get_or_refresh(self.ttl, force_refresh, || self.load())
            .await
    }

    async fn load(&self) -> CatalogSnapshot {
        let Some(fetcher) = &self.fetcher else {
            return CatalogSnapshot::new(self.defaults.clone(), CatalogSource::Static);
        };

        match fetcher.fetch(&self.defaults).await {
            Ok(crops) => {
                info!("Loaded {} crops from remote catalog", crops.len());
                CatalogSnapshot::new(crops, CatalogSource::Remote)
            }
            Err(e) => {
                warn!(
                    "Failed to fetch crop catalog from {}: {}. Using static catalog",
                    fetcher.api_url(),
                    e
                );
                CatalogSnapshot::new(self.defaults.clone(), CatalogSource::Static)
            }
        }
    }
}
