//! Bundle sources: where the raw JSON for a locale comes from.
//!
//! The store only depends on [`BundleSource::fetch`]; whether content lives in
//! the binary, on disk or behind HTTP is decided by configuration.

use crate::i18n::{I18nError, Locale};
use crate::retry::{with_retry_if, RetryConfig};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Raw content provider for translation bundles.
#[async_trait]
pub trait BundleSource: Send + Sync {
    /// Fetch the raw JSON for `locale`.
    ///
    /// Returns `I18nError::SourceNotFound` when the source has no content for
    /// the locale, and `I18nError::Source` for any other failure.
    async fn fetch(&self, locale: Locale) -> Result<String, I18nError>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}

// ==================== Embedded ====================

const EMBEDDED_EN: &str = include_str!("../../messages/en.json");
const EMBEDDED_AR: &str = include_str!("../../messages/ar.json");

/// Bundles compiled into the binary from `messages/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSource;

#[async_trait]
impl BundleSource for EmbeddedSource {
    async fn fetch(&self, locale: Locale) -> Result<String, I18nError> {
        let raw = match locale {
            Locale::English => EMBEDDED_EN,
            Locale::Arabic => EMBEDDED_AR,
        };
        Ok(raw.to_string())
    }

    fn describe(&self) -> String {
        "embedded messages".to_string()
    }
}

// ==================== Directory ====================

/// Bundles read from `{dir}/{code}.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, locale: Locale) -> PathBuf {
        self.dir.join(format!("{}.json", locale.code()))
    }
}

#[async_trait]
impl BundleSource for DirectorySource {
    async fn fetch(&self, locale: Locale) -> Result<String, I18nError> {
        let path = self.path_for(locale);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => I18nError::SourceNotFound { locale },
                _ => I18nError::Source {
                    locale,
                    message: format!("failed to read {}: {}", path.display(), e),
                },
            })
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}

// ==================== HTTP ====================

/// Bundles fetched from `{base_url}/{code}.json`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

#[derive(Debug)]
enum FetchError {
    NotFound,
    Status(StatusCode),
    Network(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound => write!(f, "bundle not found"),
            FetchError::Status(status) => write!(f, "unexpected status {}", status),
            FetchError::Network(e) => write!(f, "request failed: {}", e),
        }
    }
}

/// Server errors, rate limiting and network failures are transient; a
/// missing bundle or any other client error is final.
fn is_retryable(error: &FetchError) -> bool {
    match error {
        FetchError::NotFound => false,
        FetchError::Status(status) => {
            status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
        }
        FetchError::Network(_) => true,
    }
}

impl HttpSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            retry: RetryConfig::bundle_fetch(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn url_for(&self, locale: Locale) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), locale.code())
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.text().await.map_err(FetchError::Network)
    }
}

#[async_trait]
impl BundleSource for HttpSource {
    async fn fetch(&self, locale: Locale) -> Result<String, I18nError> {
        let url = self.url_for(locale);
        with_retry_if(
            &self.retry,
            &format!("Fetch {} bundle", locale.name()),
            || self.fetch_once(&url),
            is_retryable,
        )
        .await
        .map_err(|e| match e {
            FetchError::NotFound => I18nError::SourceNotFound { locale },
            other => I18nError::Source {
                locale,
                message: format!("{}: {}", url, other),
            },
        })
    }

    fn describe(&self) -> String {
        format!("remote {}", self.base_url)
    }
}

// ==================== Memory ====================

/// In-memory bundles; locales without an entry are not found.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    bundles: HashMap<Locale, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locale: Locale, raw: impl Into<String>) -> Self {
        self.bundles.insert(locale, raw.into());
        self
    }
}

#[async_trait]
impl BundleSource for MemorySource {
    async fn fetch(&self, locale: Locale) -> Result<String, I18nError> {
        self.bundles
            .get(&locale)
            .cloned()
            .ok_or(I18nError::SourceNotFound { locale })
    }

    fn describe(&self) -> String {
        format!("memory ({} bundles)", self.bundles.len())
    }
}
