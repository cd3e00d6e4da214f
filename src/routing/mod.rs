//! Locale routing: from a path to a resolved locale context, and back.
//!
//! - `path`: Splits `/{locale}{rest}` paths; shared by resolver and switcher
//! - `resolver`: Validates the locale segment and loads its bundle
//! - `switcher`: Rewrites a path to another locale, keeping the route
//! - `navigation`: Per-navigation state machine and supersession of stale results

mod error;
mod navigation;
mod path;
mod resolver;
mod switcher;

pub use error::RouteError;
pub use navigation::{NavigationOutcome, NavigationState, Navigator, PendingNavigation};
pub use path::{decompose, split_locale, RoutePath};
pub use resolver::Resolver;
pub use switcher::switch_to;
