use crate::i18n::{BundleSource, BundleStore, DirectorySource, EmbeddedSource, HttpSource};
use anyhow::{bail, Context, Result};
use std::sync::Arc;

/// Where translation bundles are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagesSource {
    /// Bundles compiled into the binary
    Embedded,
    /// `{dir}/{locale}.json` on disk
    Directory(String),
    /// `{url}/{locale}.json` over HTTP
    Remote(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_addr: String,
    pub port: u16,

    // Bundles
    pub messages: MessagesSource,
    pub bundle_cache: bool,

    // Shell
    pub site_title: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // MESSAGES_URL wins over MESSAGES_DIR; neither means embedded bundles
        let messages = match (non_empty(lookup("MESSAGES_URL")), non_empty(lookup("MESSAGES_DIR"))) {
            (Some(url), _) => MessagesSource::Remote(url),
            (None, Some(dir)) => MessagesSource::Directory(dir),
            (None, None) => MessagesSource::Embedded,
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match lookup("PORT") {
                Some(value) => value
                    .trim()
                    .parse()
                    .with_context(|| format!("PORT must be a port number, got '{}'", value))?,
                None => 8080,
            },

            messages,
            bundle_cache: match lookup("BUNDLE_CACHE") {
                Some(value) => parse_bool(&value).context("BUNDLE_CACHE must be true or false")?,
                None => true,
            },

            site_title: lookup("SITE_TITLE").unwrap_or_else(|| "Egyptian Metal Works".to_string()),
        })
    }

    /// Socket address the server listens on.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn bundle_source(&self) -> Arc<dyn BundleSource> {
        match &self.messages {
            MessagesSource::Embedded => Arc::new(EmbeddedSource),
            MessagesSource::Directory(dir) => Arc::new(DirectorySource::new(dir)),
            MessagesSource::Remote(url) => Arc::new(HttpSource::new(reqwest::Client::new(), url)),
        }
    }

    pub fn build_store(&self) -> BundleStore {
        let store = BundleStore::new(self.bundle_source());
        if self.bundle_cache {
            store
        } else {
            store.without_cache()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{}'", other),
    }
}
