//! Internationalization (i18n) module for the bilingual site.
//!
//! This module owns everything that depends on the active locale: which
//! locales exist, their text direction, and the translated content bundles.
//!
//! # Architecture
//!
//! - `locale`: The closed `Locale` enum and the `is_supported` validator
//! - `registry`: Display metadata for each locale (names, switch labels, fonts)
//! - `direction`: Locale to text direction mapping
//! - `bundle`: Immutable translation tree with typed, dotted-key lookups
//! - `source`: Where raw bundle content comes from (embedded, directory, HTTP)
//! - `store`: Per-locale, all-or-nothing bundle loading with caching
//! - `context`: The per-navigation `LocaleContext` handed to content consumers
//! - `strings`: Shell strings that render without a bundle
//! - `validator`: Bundle completeness checks against the canonical locale
//! - `metrics`: Load and routing counters
//!
//! # Example
//!
//! ```rust,ignore
//! use metalworks_site::i18n::{BundleStore, EmbeddedSource, Locale};
//!
//! let store = BundleStore::new(Arc::new(EmbeddedSource));
//! let bundle = store.load(Locale::Arabic).await?;
//! let title = bundle.text("hero.titleLine1")?;
//! ```

mod bundle;
mod context;
mod direction;
mod error;
mod locale;
mod metrics;
mod registry;
mod source;
mod store;
mod strings;
mod validator;

pub use bundle::TranslationBundle;
pub use context::LocaleContext;
pub use direction::{direction_of, script_font, TextDirection};
pub use error::I18nError;
pub use locale::{is_supported, Locale, UnsupportedLocale};
pub use metrics::{BundleMetrics, MetricsReport};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use source::{BundleSource, DirectorySource, EmbeddedSource, HttpSource, MemorySource};
pub use store::BundleStore;
pub use strings::LocaleStrings;
pub use validator::{BundleValidator, ValidationReport};
