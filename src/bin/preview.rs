//! Preview binary - replays navigations and prints what each one resolves to
//!
//! Usage:
//!   cargo run --bin preview -- /en/services switch:ar /ar/contact#form
//!   cargo run --bin preview -- --concurrent /en /ar /en/about
//!
//! Arguments are page paths, or `switch:<code>` to switch the last navigated
//! path to another locale. With `--concurrent` every navigation is started
//! before any is awaited, so only the last one commits.
//!
//! Bundles come from the same environment as the server (MESSAGES_DIR,
//! MESSAGES_URL, BUNDLE_CACHE).

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use metalworks_site::config::Config;
use metalworks_site::i18n::{Locale, LocaleContext};
use metalworks_site::routing::{switch_to, NavigationOutcome, Navigator, Resolver};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

enum Step {
    Navigate(String),
    Switch(Locale),
}

fn parse_step(arg: &str) -> Result<Step> {
    match arg.strip_prefix("switch:") {
        Some(code) => {
            let locale = Locale::from_code(code).with_context(|| format!("Invalid step '{}'", arg))?;
            Ok(Step::Switch(locale))
        }
        None => Ok(Step::Navigate(arg.to_string())),
    }
}

fn describe(path: &str, outcome: &NavigationOutcome) -> String {
    match outcome {
        NavigationOutcome::Resolved(ctx) => format!(
            "{:<24} {} {} {}",
            path,
            ctx.locale(),
            ctx.direction(),
            ctx.t("metadata.title").unwrap_or("<missing metadata.title>")
        ),
        NavigationOutcome::NotFound(e) => format!("{:<24} not found ({})", path, e),
        NavigationOutcome::Superseded => format!("{:<24} superseded", path),
    }
}

/// Print the active page if a navigation committed since the last call.
fn report_active(active: &mut watch::Receiver<Option<Arc<LocaleContext>>>) -> Result<()> {
    if !active.has_changed()? {
        println!("{:<24} (active page unchanged)", "");
        return Ok(());
    }
    match active.borrow_and_update().as_deref() {
        Some(ctx) => println!("{:<24} active: {}", "", ctx.path()),
        None => println!("{:<24} active: none", ""),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("metalworks_site=warn".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let concurrent = args.iter().any(|arg| arg == "--concurrent");
    let steps = args
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .map(|arg| parse_step(arg))
        .collect::<Result<Vec<_>>>()?;

    if steps.is_empty() {
        bail!("Usage: preview [--concurrent] <path | switch:<code>>...");
    }

    let config = Config::from_env()?;
    let store = Arc::new(config.build_store());
    info!("Bundles from {}", store.source_description());
    let navigator = Navigator::new(Resolver::new(Arc::clone(&store)));
    let mut active = navigator.subscribe();

    println!();
    if concurrent {
        let mut pending = Vec::new();
        for step in steps {
            match step {
                Step::Navigate(path) => pending.push(navigator.start(path)),
                Step::Switch(_) => bail!("switch steps need a resolved page, drop --concurrent"),
            }
        }
        let paths: Vec<String> = pending.iter().map(|nav| nav.path().to_string()).collect();
        let outcomes = join_all(pending.into_iter().map(|nav| nav.run())).await;
        for (path, outcome) in paths.iter().zip(&outcomes) {
            println!("{}", describe(path, outcome));
        }
        report_active(&mut active)?;
    } else {
        let mut current: Option<String> = None;
        for step in steps {
            let (path, outcome) = match step {
                Step::Navigate(path) => {
                    let outcome = navigator.navigate(path.clone()).await;
                    (path, outcome)
                }
                Step::Switch(target) => {
                    let Some(from) = current.as_deref() else {
                        bail!("switch:{} has no page to switch from", target);
                    };
                    let path = switch_to(from, target)?;
                    let outcome = navigator.switch_locale(from, target).await?;
                    (path, outcome)
                }
            };
            println!("{}", describe(&path, &outcome));
            report_active(&mut active)?;
            current = Some(path);
        }
    }

    let report = store.metrics().report();
    println!();
    println!(
        "Active: {}",
        navigator
            .active()
            .map(|ctx| ctx.path())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "Cache: {} hits / {} misses, {} not found, {} superseded",
        report.cache_hits, report.cache_misses, report.not_found, report.superseded
    );
    println!();

    Ok(())
}
