//! Navigation: the per-navigation state machine and the active locale.
//!
//! Every navigation is a fresh [`PendingNavigation`]:
//!
//! ```text
//! Unresolved ──> Resolving ──> Resolved
//!      │             │
//!      └─────────────┴──────> NotFound
//! ```
//!
//! Navigations are numbered when they start. A result is only published if no
//! newer navigation has started since; otherwise it is discarded as
//! superseded. The load itself is not cancelled.

use crate::i18n::{Locale, LocaleContext};
use crate::routing::{decompose, switch_to, Resolver, RouteError};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info};

/// State of one navigation.
#[derive(Debug, Clone)]
pub enum NavigationState {
    Unresolved,
    /// Locale validated, bundle load in flight
    Resolving { locale: Locale },
    Resolved(Arc<LocaleContext>),
    NotFound { reason: &'static str },
}

impl NavigationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NavigationState::Resolved(_) | NavigationState::NotFound { .. })
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: &NavigationState) -> bool {
        use NavigationState::*;
        matches!(
            (self, next),
            (Unresolved, Resolving { .. })
                | (Unresolved, NotFound { .. })
                | (Resolving { .. }, Resolved(_))
                | (Resolving { .. }, NotFound { .. })
        )
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationState::Unresolved => write!(f, "unresolved"),
            NavigationState::Resolving { locale } => write!(f, "resolving({})", locale),
            NavigationState::Resolved(ctx) => write!(f, "resolved({})", ctx.locale()),
            NavigationState::NotFound { reason } => write!(f, "not_found({})", reason),
        }
    }
}

/// What a finished navigation produced.
#[derive(Debug)]
pub enum NavigationOutcome {
    /// Resolved and published as the active context.
    Resolved(Arc<LocaleContext>),
    /// Rejected; the active context was cleared.
    NotFound(RouteError),
    /// A newer navigation started first; the result was discarded.
    Superseded,
}

impl NavigationOutcome {
    pub fn context(&self) -> Option<&Arc<LocaleContext>> {
        match self {
            NavigationOutcome::Resolved(ctx) => Some(ctx),
            _ => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, NavigationOutcome::Superseded)
    }
}

struct Shared {
    /// Number of the most recently started navigation
    latest: Mutex<u64>,
    active: watch::Sender<Option<Arc<LocaleContext>>>,
}

impl Shared {
    fn next_id(&self) -> u64 {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *latest += 1;
        *latest
    }

    /// Publish `context` if navigation `id` is still the latest.
    fn commit(&self, id: u64, context: Option<Arc<LocaleContext>>) -> bool {
        let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if *latest != id {
            return false;
        }
        self.active.send_replace(context);
        true
    }
}

/// Holds the active locale context and runs navigations against it.
#[derive(Clone)]
pub struct Navigator {
    resolver: Resolver,
    shared: Arc<Shared>,
}

impl Navigator {
    pub fn new(resolver: Resolver) -> Self {
        let (active, _) = watch::channel(None);
        Self {
            resolver,
            shared: Arc::new(Shared {
                latest: Mutex::new(0),
                active,
            }),
        }
    }

    /// The context of the last committed navigation, if it resolved.
    pub fn active(&self) -> Option<Arc<LocaleContext>> {
        self.shared.active.borrow().clone()
    }

    /// Watch the active context; content consumers re-read on change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<LocaleContext>>> {
        self.shared.active.subscribe()
    }

    /// Start a navigation. Any navigation started earlier is superseded from
    /// this point on, even if it finishes later.
    pub fn start(&self, path: impl Into<String>) -> PendingNavigation {
        PendingNavigation {
            id: self.shared.next_id(),
            path: path.into(),
            state: NavigationState::Unresolved,
            resolver: self.resolver.clone(),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Start and run a navigation to `path`.
    pub async fn navigate(&self, path: impl Into<String>) -> NavigationOutcome {
        self.start(path).run().await
    }

    /// Switch the current page to `target` and navigate there.
    ///
    /// The new path is fully computed before the single navigation starts.
    pub async fn switch_locale(
        &self,
        current_path: &str,
        target: Locale,
    ) -> Result<NavigationOutcome, RouteError> {
        let new_path = switch_to(current_path, target)?;
        info!("Switching locale: {} -> {}", current_path, new_path);
        Ok(self.navigate(new_path).await)
    }
}

/// One navigation, from start to a terminal state.
pub struct PendingNavigation {
    id: u64,
    path: String,
    state: NavigationState,
    resolver: Resolver,
    shared: Arc<Shared>,
}

impl PendingNavigation {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Resolve the path and publish the result unless superseded.
    pub async fn run(mut self) -> NavigationOutcome {
        let result = match decompose(&self.path) {
            Ok((locale, route_path)) => {
                self.transition(NavigationState::Resolving { locale });
                self.resolver.load(locale, route_path).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(context) => {
                let context = Arc::new(context);
                self.transition(NavigationState::Resolved(Arc::clone(&context)));
                self.finish(Some(Arc::clone(&context)), NavigationOutcome::Resolved(context))
            }
            Err(e) => {
                self.resolver.reject(&self.path, &e);
                self.transition(NavigationState::NotFound { reason: e.kind() });
                self.finish(None, NavigationOutcome::NotFound(e))
            }
        }
    }

    fn transition(&mut self, next: NavigationState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "illegal navigation transition {} -> {}",
            self.state,
            next
        );
        debug!("Navigation #{} {}: {} -> {}", self.id, self.path, self.state, next);
        self.state = next;
    }

    fn finish(
        &self,
        context: Option<Arc<LocaleContext>>,
        outcome: NavigationOutcome,
    ) -> NavigationOutcome {
        debug_assert!(self.state.is_terminal(), "navigation finished in {}", self.state);
        if self.shared.commit(self.id, context) {
            return outcome;
        }

        self.resolver.store().metrics().record_superseded();
        debug!(
            "Navigation #{} {} superseded, discarding {}",
            self.id, self.path, self.state
        );
        NavigationOutcome::Superseded
    }
}
