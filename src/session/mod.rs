//! Long-lived loader state: configuration, cache, last good records, and reload bookkeeping.
//!
//! Each reload is stamped with a generation. Starting a new reload cancels the previous one, and
//! a completion whose generation is behind the session's is discarded without touching state, so
//! a late response can never overwrite a newer one.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::acquire::cache::CacheStore;
use crate::acquire::config::AcquireConfig;
use crate::acquire::transport::{CancelToken, http_client};
use crate::acquire::{Acquired, acquire};
use crate::config::GardenConfig;
use crate::foundation::error::{GardenError, GardenResult};
use crate::normalize::DayRecord;
use crate::pipeline::GardenPipeline;
use crate::render::{SvgMount, render};
use crate::scene::SceneSpec;

/// Outcome of the most recent completed reload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadStatus {
    /// No reload has completed yet.
    #[default]
    Idle,
    /// Records come from a successful fetch.
    Fresh {
        /// When the fetch completed.
        fetched_at: DateTime<Utc>,
    },
    /// Fresh fetch failed; records come from a cache entry written at `saved_at`.
    Stale {
        /// When the cache entry was written.
        saved_at: DateTime<Utc>,
        /// Display form of the failure that forced the fallback.
        cause: String,
    },
    /// No fresh data and no cache; the scene is the placeholder.
    Failed(String),
}

impl LoadStatus {
    /// `true` for [`LoadStatus::Stale`].
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    /// One-line notice for scenes built from cached data; `None` otherwise.
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Stale { saved_at, .. } => Some(format!(
                "Showing cached data from {}",
                saved_at.format("%Y-%m-%d %H:%M UTC")
            )),
            _ => None,
        }
    }
}

/// One generation-stamped acquisition, detached from the session so it can run while the
/// session keeps serving scenes.
#[derive(Debug)]
pub struct ReloadRequest {
    generation: u64,
    config: AcquireConfig,
    client: reqwest::Client,
    cache: Arc<dyn CacheStore>,
    cancel: CancelToken,
}

/// Result of [`ReloadRequest::run`], handed back to [`GardenSession::complete`].
#[derive(Debug)]
pub struct ReloadOutcome {
    /// Generation of the request that produced this outcome.
    pub generation: u64,
    /// What acquisition returned.
    pub result: GardenResult<Acquired>,
}

impl ReloadRequest {
    /// Generation this request was stamped with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token a newer reload trips to abort this one.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Run acquisition to completion, including cache fallback.
    pub async fn run(self) -> ReloadOutcome {
        let result = acquire(&self.config, &self.client, self.cache.as_ref(), &self.cancel).await;
        ReloadOutcome {
            generation: self.generation,
            result,
        }
    }
}

/// Loader state that outlives individual reloads.
///
/// Reloads go through [`GardenSession::begin_reload`], [`ReloadRequest::run`] and
/// [`GardenSession::complete`], or [`GardenSession::reload`] for all three in one call. Only the
/// two ends need `&mut self`, so the network wait can happen elsewhere.
#[derive(Debug)]
pub struct GardenSession {
    config: GardenConfig,
    pipeline: GardenPipeline,
    cache: Arc<dyn CacheStore>,
    client: reqwest::Client,
    generation: u64,
    in_flight: Option<CancelToken>,
    records: Vec<DayRecord>,
    status: LoadStatus,
    last: Option<Acquired>,
}

impl GardenSession {
    /// Session with the crate's default HTTP client.
    pub fn new(config: GardenConfig, cache: Arc<dyn CacheStore>) -> GardenResult<Self> {
        Self::with_client(config, cache, http_client()?)
    }

    /// Session over a caller-built client. Fails when `config` does not validate.
    pub fn with_client(
        config: GardenConfig,
        cache: Arc<dyn CacheStore>,
        client: reqwest::Client,
    ) -> GardenResult<Self> {
        config.validate()?;
        let pipeline = GardenPipeline::new(config.render.clone(), config.viewport);
        Ok(Self {
            config,
            pipeline,
            cache,
            client,
            generation: 0,
            in_flight: None,
            records: Vec::new(),
            status: LoadStatus::Idle,
            last: None,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next reload and scene build.
    pub fn set_config(&mut self, config: GardenConfig) -> GardenResult<()> {
        config.validate()?;
        self.pipeline = GardenPipeline::new(config.render.clone(), config.viewport);
        self.config = config;
        Ok(())
    }

    /// Generation of the most recently started reload; 0 before the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Outcome of the most recent applied reload.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Records behind the current scene.
    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    /// The acquisition behind the current records, if any.
    pub fn last_acquired(&self) -> Option<&Acquired> {
        self.last.as_ref()
    }

    /// A reload has begun and not yet been completed.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a new reload, cancelling whatever was in flight.
    pub fn begin_reload(&mut self) -> ReloadRequest {
        if let Some(prev) = self.in_flight.take() {
            tracing::debug!(generation = self.generation, "cancelling superseded reload");
            prev.cancel();
        }
        self.generation += 1;
        let cancel = CancelToken::new();
        self.in_flight = Some(cancel.clone());
        ReloadRequest {
            generation: self.generation,
            config: self.config.acquire.clone(),
            client: self.client.clone(),
            cache: Arc::clone(&self.cache),
            cancel,
        }
    }

    /// Apply a finished reload. Outcomes from superseded generations are discarded with
    /// [`GardenError::Superseded`] and leave the session untouched.
    pub fn complete(&mut self, outcome: ReloadOutcome) -> GardenResult<LoadStatus> {
        if outcome.generation != self.generation {
            tracing::warn!(
                generation = outcome.generation,
                current = self.generation,
                "discarding stale reload completion"
            );
            return Err(GardenError::Superseded {
                generation: outcome.generation,
                current: self.generation,
            });
        }
        self.in_flight = None;

        match outcome.result {
            Ok(acquired) => {
                let report =
                    crate::normalize::normalize_with(&acquired.payload, &self.config.render.theme);
                self.records = report.records;
                self.status = match acquired.saved_at {
                    Some(saved_at) if acquired.stale => LoadStatus::Stale {
                        saved_at,
                        cause: acquired.fallback_cause.clone().unwrap_or_default(),
                    },
                    _ => LoadStatus::Fresh {
                        fetched_at: acquired.fetched_at,
                    },
                };
                tracing::info!(
                    records = self.records.len(),
                    degraded = report.degraded,
                    stale = acquired.stale,
                    "reload complete"
                );
                self.last = Some(acquired);
                Ok(self.status.clone())
            }
            Err(err) => {
                tracing::warn!(error = %err, "reload failed; showing placeholder");
                self.records.clear();
                self.last = None;
                self.status = LoadStatus::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Begin, run and complete one reload.
    pub async fn reload(&mut self) -> GardenResult<LoadStatus> {
        let request = self.begin_reload();
        let outcome = request.run().await;
        self.complete(outcome)
    }

    /// Scene for the current records; the placeholder when there are none. Scenes built from a
    /// cache fallback carry [`LoadStatus::notice`].
    pub fn build_scene(&self) -> SceneSpec {
        let notice = self.status.notice();
        self.pipeline.build_with_notice(&self.records, notice.as_deref())
    }

    /// Build and swap the current scene into `mount`.
    pub fn render_into(&self, mount: Option<&mut SvgMount>) -> bool {
        render(&self.build_scene(), mount)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
