//! Locale resolver: path to locale, route and loaded bundle.
//!
//! Strict by construction: a path without a supported locale segment, or
//! whose bundle fails to load, is not found. There is no default locale.

use crate::i18n::{BundleStore, Locale, LocaleContext};
use crate::routing::{decompose, RouteError, RoutePath};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Resolver {
    store: Arc<BundleStore>,
}

impl Resolver {
    pub fn new(store: Arc<BundleStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<BundleStore> {
        &self.store
    }

    /// Resolve `path` into a context for its locale.
    pub async fn resolve(&self, path: &str) -> Result<LocaleContext, RouteError> {
        let (locale, route_path) = decompose(path).inspect_err(|e| self.reject(path, e))?;
        self.load(locale, route_path)
            .await
            .inspect_err(|e| self.reject(path, e))
    }

    /// Load the bundle for an already validated locale.
    pub(crate) async fn load(
        &self,
        locale: Locale,
        route_path: RoutePath,
    ) -> Result<LocaleContext, RouteError> {
        let bundle = self
            .store
            .load(locale)
            .await
            .map_err(|source| RouteError::BundleLoadFailure { locale, source })?;

        Ok(LocaleContext::new(locale, route_path, bundle))
    }

    pub(crate) fn reject(&self, path: &str, error: &RouteError) {
        self.store.metrics().record_not_found();
        debug!("Not found: {} ({})", path, error.kind());
    }
}
