// sprinkler-console/src/store.rs

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use tracing::debug;

use crate::document::Configuration;
use crate::error::{Error, Result};

/// Default endpoint of the controller's configuration resource.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8088/configuration";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Where configuration documents live. The session only ever talks to this
/// boundary, so swapping the HTTP backend for an in-memory one is a
/// constructor argument, not a code change.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self) -> Result<Configuration>;
    async fn put(&self, document: &Configuration) -> Result<()>;
}

/// GET/PUT client for the controller's JSON configuration resource.
pub struct HttpStore {
    client: reqwest::Client,
    url: String,
}

impl HttpStore {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| Error::Connection(format!("failed to build http client: {err}")))?;
        Ok(Self { client, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConfigStore for HttpStore {
    async fn get(&self) -> Result<Configuration> {
        debug!("fetching configuration from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| Error::Connection(format!("GET {}: {err}", self.url)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Connection(format!("GET {} returned {status}", self.url)));
        }
        response
            .json::<Configuration>()
            .await
            .map_err(|err| Error::Connection(format!("GET {}: invalid body: {err}", self.url)))
    }

    async fn put(&self, document: &Configuration) -> Result<()> {
        debug!("writing configuration to {}", self.url);
        let response = self
            .client
            .put(&self.url)
            .json(document)
            .send()
            .await
            .map_err(|err| Error::Connection(format!("PUT {}: {err}", self.url)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Connection(format!("PUT {} returned {status}", self.url)));
        }
        Ok(())
    }
}

/// Process-local store for demos and tests. `put` replaces the held document
/// wholesale, mirroring the backend.
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Configuration>,
}

impl MemoryStore {
    pub fn new(initial: Configuration) -> Self {
        Self { document: Mutex::new(initial) }
    }

    pub fn document(&self) -> Configuration {
        self.document.lock().clone()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self) -> Result<Configuration> {
        Ok(self.document.lock().clone())
    }

    async fn put(&self, document: &Configuration) -> Result<()> {
        *self.document.lock() = document.clone();
        Ok(())
    }
}
