//! Resilient acquisition of the raw export payload.
//!
//! A fresh fetch goes through the configured [`Transport`] under a deadline. Success writes the
//! payload through to the [`CacheStore`]; failure falls back to the last cached payload for the
//! same configuration, tagged stale.

pub mod cache;
pub mod config;
pub mod transport;

use chrono::{DateTime, Utc};

use crate::foundation::error::{GardenError, GardenResult, TransportFailure};
use crate::normalize::validate_payload;

use cache::{CacheStore, ExportCacheEntry};
use config::AcquireConfig;
use transport::{CancelToken, Transport};

/// Marker used in [`Acquired::fetched_from`] when the payload came from the cache.
pub const FROM_CACHE: &str = "(cache)";

/// Raw payload plus where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Acquired {
    /// The export body exactly as parsed, before normalization.
    pub payload: serde_json::Value,
    /// `true` when the payload is a cached copy standing in for a failed fetch.
    pub stale: bool,
    /// When the cached copy was written; `None` for fresh payloads.
    pub saved_at: Option<DateTime<Utc>>,
    /// The failure the cached copy stands in for, as displayed by [`GardenError`]. Carries the
    /// server's reason for `ok:false` payloads and the body excerpt for non-JSON bodies. `None`
    /// for fresh payloads.
    pub fallback_cause: Option<String>,
    /// Request URL for fresh payloads, [`FROM_CACHE`] otherwise.
    pub fetched_from: String,
    /// When this result was produced.
    pub fetched_at: DateTime<Utc>,
}

/// Fetch the export for `config`, falling back to the cache when allowed.
#[tracing::instrument(skip_all, fields(endpoint = config.endpoint(), bot = config.bot().as_str()))]
pub async fn acquire(
    config: &AcquireConfig,
    client: &reqwest::Client,
    cache: &dyn CacheStore,
    cancel: &CancelToken,
) -> GardenResult<Acquired> {
    let key = config.cache_key();
    tracing::debug!(%key, "acquire");

    match fetch_fresh(config, client, cancel).await {
        Ok((url, payload)) => {
            let fetched_at = Utc::now();
            if config.cache_enabled() {
                let entry = ExportCacheEntry {
                    key,
                    saved_at: fetched_at,
                    rows: payload.clone(),
                };
                if let Err(e) = cache.save(&entry) {
                    tracing::warn!(error = %e, "cache write failed");
                }
            }
            tracing::info!(url = %url, "export loaded");
            Ok(Acquired {
                payload,
                stale: false,
                saved_at: None,
                fallback_cause: None,
                fetched_from: url,
                fetched_at,
            })
        }
        Err(err) if err.allows_cache_fallback() && config.cache_enabled() => {
            match cache.load(&key) {
                Ok(Some(entry)) => {
                    tracing::warn!(error = %err, saved_at = %entry.saved_at, "fetch failed, using cache");
                    Ok(Acquired {
                        payload: entry.rows,
                        stale: true,
                        saved_at: Some(entry.saved_at),
                        fallback_cause: Some(err.to_string()),
                        fetched_from: FROM_CACHE.to_owned(),
                        fetched_at: Utc::now(),
                    })
                }
                Ok(None) => Err(err),
                Err(cache_err) => {
                    tracing::warn!(error = %cache_err, "cache read failed");
                    Err(err)
                }
            }
        }
        Err(err) => Err(err),
    }
}

async fn fetch_fresh(
    config: &AcquireConfig,
    client: &reqwest::Client,
    cancel: &CancelToken,
) -> GardenResult<(String, serde_json::Value)> {
    let transport = Transport::for_kind(config.transport());
    let url = config.request_url(Utc::now().timestamp_millis(), transport.callback())?;
    tracing::debug!(url = %url, transport = config.transport().as_str(), "GET");

    let deadline = config.timeout();
    let payload = tokio::select! {
        res = tokio::time::timeout(deadline, transport.fetch(client, &url)) => match res {
            Ok(inner) => inner?,
            Err(_) => {
                return Err(GardenError::transport(
                    TransportFailure::Timeout,
                    format!("no response within {} ms", deadline.as_millis()),
                ));
            }
        },
        _ = cancel.cancelled() => {
            return Err(GardenError::transport(TransportFailure::Cancelled, "superseded by a newer request"));
        }
    };

    validate_payload(&payload)?;
    Ok((url.to_string(), payload))
}
