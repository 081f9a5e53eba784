//! Shared HTTP plumbing for the provider adapters.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use pulse_core::{Capability, ProviderConfig, PulseError};

/// Credential sent when none is configured; public demo keys of the providers.
pub const DEMO_CREDENTIAL: &str = "demo";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Client, base URL and credential of one adapter.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    name: &'static str,
    client: reqwest::Client,
    base_url: Url,
    credential: String,
    timeout: Duration,
    batch_concurrency: usize,
}

impl Endpoint {
    pub(crate) fn new(
        name: &'static str,
        default_base_url: &str,
        default_concurrency: usize,
        cfg: &ProviderConfig,
        default_timeout: Duration,
    ) -> Result<Self, PulseError> {
        let timeout = cfg.timeout.unwrap_or(default_timeout);
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| PulseError::InvalidArg(format!("{name}: http client: {e}")))?;
        let raw = cfg.base_url.as_deref().unwrap_or(default_base_url);
        let base_url = Url::parse(raw)
            .map_err(|e| PulseError::InvalidArg(format!("{name}: base URL {raw:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PulseError::InvalidArg(format!(
                "{name}: base URL {raw:?} cannot hold a path"
            )));
        }
        Ok(Self {
            name,
            client,
            base_url,
            credential: cfg
                .credential
                .clone()
                .unwrap_or_else(|| DEMO_CREDENTIAL.to_string()),
            timeout,
            batch_concurrency: cfg.batch_concurrency.unwrap_or(default_concurrency).max(1),
        })
    }

    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn credential(&self) -> &str {
        &self.credential
    }

    pub(crate) const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) const fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    /// `base_url` with `segments` appended, each percent-encoded as one path
    /// segment.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, PulseError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PulseError::InvalidArg(format!("{}: base URL cannot hold a path", self.name)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `base_url` + `segments` and decode the JSON body.
    ///
    /// Transport failures and non-2xx statuses map to `ProviderUnavailable`
    /// (or `ProviderTimeout` for `capability`), undecodable bodies to
    /// `ProviderMalformed`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        capability: Capability,
    ) -> Result<T, PulseError> {
        let url = self.url(segments)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(connector = self.name, %url, "provider request");

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PulseError::provider_timeout(self.name, capability.as_str())
                } else {
                    PulseError::unavailable(self.name, format!("request failed: {e}"))
                }
            })?;

        check_status(self.name, resp.status())?;

        let body = resp
            .bytes()
            .await
            .map_err(|e| PulseError::unavailable(self.name, format!("read body: {e}")))?;
        serde_json::from_slice(&body)
            .map_err(|e| PulseError::malformed(self.name, format!("decode body: {e}")))
    }
}

pub(crate) fn check_status(name: &str, status: StatusCode) -> Result<(), PulseError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(PulseError::unavailable(name, "rate limited (HTTP 429)"));
    }
    if !status.is_success() {
        return Err(PulseError::unavailable(name, format!("HTTP {status}")));
    }
    Ok(())
}

/// Parse a numeric field that a provider ships as a string.
pub(crate) fn parse_num(name: &str, field: &str, raw: Option<&String>) -> Result<f64, PulseError> {
    let raw = raw.ok_or_else(|| PulseError::malformed(name, format!("missing field {field:?}")))?;
    raw.trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| PulseError::malformed(name, format!("field {field:?} is not a number: {raw:?}")))
}

/// Implements `BatchQuoteProvider` for an adapter by fanning out single-symbol
/// calls over the engine's worker pool.
macro_rules! fan_out_batch {
    ($ty:ty) => {
        #[async_trait::async_trait]
        impl pulse_core::BatchQuoteProvider for $ty {
            async fn quotes(
                &self,
                symbols: &[String],
                pool: &pulse_core::WorkerPool,
            ) -> Result<std::collections::HashMap<String, pulse_core::Quote>, pulse_core::PulseError>
            {
                Ok(pulse_core::fan_out_quotes(
                    self.endpoint.name(),
                    self,
                    symbols,
                    pool,
                    self.endpoint.batch_concurrency(),
                    self.endpoint.timeout(),
                )
                .await)
            }
        }
    };
}

pub(crate) use fan_out_batch;
