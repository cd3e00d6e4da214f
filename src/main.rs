use anyhow::Result;
use metalworks_site::config::Config;
use metalworks_site::i18n::{BundleStore, BundleValidator, Locale};
use metalworks_site::routing::Resolver;
use metalworks_site::server::{self, AppState, Shell};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("metalworks_site=info".parse()?)
        )
        .init();

    info!("Starting site server");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Step 1: Warm the bundle store
    let store = Arc::new(config.build_store());
    info!("Loading translation bundles from {}", store.source_description());
    check_bundles(&store).await;

    // Step 2: Build the HTML shell
    let shell = Shell::new(config.site_title.clone())?;

    // Step 3: Serve
    let state = AppState::new(Resolver::new(store), shell);
    server::serve(&config, state).await
}

/// Preload every bundle and compare each against the canonical one.
///
/// Problems are logged, not fatal: a locale whose bundle fails to load is
/// served as not found until it loads.
async fn check_bundles(store: &BundleStore) {
    let mut loaded = Vec::new();
    for (locale, result) in store.preload_all().await {
        match result {
            Ok(bundle) => loaded.push(bundle),
            Err(e) => error!("Bundle for {} failed to load: {}", locale, e),
        }
    }
    info!("Loaded {}/{} translation bundles", loaded.len(), Locale::ALL.len());

    let Some(canonical) = loaded.iter().find(|b| b.locale().is_canonical()) else {
        warn!("Canonical bundle unavailable, skipping bundle validation");
        return;
    };

    for bundle in loaded.iter().filter(|b| !b.locale().is_canonical()) {
        let report = BundleValidator::validate(canonical, bundle);
        for issue in &report.errors {
            error!("[{}] {}", bundle.locale(), issue);
        }
        for issue in &report.warnings {
            warn!("[{}] {}", bundle.locale(), issue);
        }
        if report.is_clean() {
            info!("Bundle for {} matches {}", bundle.locale(), canonical.locale());
        }
    }
}
