//! Translation bundle store.
//!
//! Loads one locale's bundle at a time from a [`BundleSource`]. Loads are
//! all-or-nothing: a bundle is either fully parsed and returned, or the load
//! fails and nothing is cached. Bundles are immutable, so a successful load
//! may be cached for the lifetime of the store.

use crate::i18n::{BundleMetrics, BundleSource, I18nError, Locale, TranslationBundle};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub struct BundleStore {
    source: Arc<dyn BundleSource>,
    cache: Option<RwLock<HashMap<Locale, Arc<TranslationBundle>>>>,
    metrics: Arc<BundleMetrics>,
}

impl BundleStore {
    /// Create a caching store over `source`.
    pub fn new(source: Arc<dyn BundleSource>) -> Self {
        Self {
            source,
            cache: Some(RwLock::new(HashMap::new())),
            metrics: Arc::new(BundleMetrics::new()),
        }
    }

    /// Fetch from the source on every load.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn metrics(&self) -> &Arc<BundleMetrics> {
        &self.metrics
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Load the bundle for `locale`.
    ///
    /// Only `locale` is fetched; no other locale is touched.
    pub async fn load(&self, locale: Locale) -> Result<Arc<TranslationBundle>, I18nError> {
        if let Some(cache) = &self.cache {
            if let Some(bundle) = cache.read().await.get(&locale) {
                self.metrics.record_cache_hit();
                debug!("Bundle cache hit for {}", locale);
                return Ok(Arc::clone(bundle));
            }
            self.metrics.record_cache_miss();
        }

        let bundle = match self.fetch_and_parse(locale).await {
            Ok(bundle) => Arc::new(bundle),
            Err(e) => {
                self.metrics.record_load_failure();
                warn!("Failed to load {} bundle: {}", locale.name(), e);
                return Err(e);
            }
        };

        if let Some(cache) = &self.cache {
            cache.write().await.insert(locale, Arc::clone(&bundle));
        }

        info!(
            "Loaded {} bundle from {}",
            locale.name(),
            self.source.describe()
        );
        Ok(bundle)
    }

    /// Load every supported locale concurrently.
    pub async fn preload_all(&self) -> Vec<(Locale, Result<Arc<TranslationBundle>, I18nError>)> {
        let results = join_all(Locale::ALL.iter().map(|&locale| self.load(locale))).await;
        Locale::ALL.into_iter().zip(results).collect()
    }

    async fn fetch_and_parse(&self, locale: Locale) -> Result<TranslationBundle, I18nError> {
        self.metrics.record_source_fetch();
        let raw = self.source.fetch(locale).await?;
        TranslationBundle::from_json(locale, &raw)
    }
}
