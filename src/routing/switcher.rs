use crate::i18n::Locale;
use crate::routing::{decompose, RouteError};

/// Compute the path of the current page under `target`.
///
/// Only the locale segment changes; sub-path, query and anchor are carried
/// over unchanged. Fails if `current_path` has no supported locale segment.
pub fn switch_to(current_path: &str, target: Locale) -> Result<String, RouteError> {
    let (_, route_path) = decompose(current_path)?;
    Ok(route_path.with_locale(target))
}
