//! Locale resolution and routing for a bilingual English/Arabic site.
//!
//! - `i18n`: Locales, direction, translation bundles and their store
//! - `routing`: Path resolution, locale switching and navigation supersession
//! - `server`: HTTP surface and HTML shell
//! - `config`: Environment-driven configuration

pub mod config;
pub mod i18n;
pub mod retry;
pub mod routing;
pub mod server;
