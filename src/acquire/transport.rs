//! Transport strategies, the cancellation token, and body decoding.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use tokio::sync::Notify;
use url::Url;

use crate::acquire::config::TransportKind;
use crate::foundation::error::{GardenError, GardenResult, TransportFailure};

const BODY_EXCERPT_CHARS: usize = 400;

/// Shared cancellation flag for one in-flight acquisition.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    /// Untripped token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the token and wake every waiter. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// `true` once [`CancelToken::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`CancelToken::cancel`] has been called.
    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        let mut notified = std::pin::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// One transport strategy, resolved for a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transport {
    /// Plain GET; the body is the JSON payload.
    Direct,
    /// The body must be `callback(<json>)` for exactly this callback name.
    ScriptInjection {
        /// Name the endpoint is asked to call.
        callback: String,
    },
}

static CALLBACK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Process-unique callback name for a script-injection request.
pub fn unique_callback_name() -> String {
    let n = CALLBACK_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("__lifelog_garden_cb_{}_{n}", std::process::id())
}

impl Transport {
    /// Resolve `kind` for one request. Script injection gets a fresh callback name.
    pub fn for_kind(kind: TransportKind) -> Self {
        match kind {
            TransportKind::Direct => Self::Direct,
            TransportKind::ScriptInjection => Self::ScriptInjection {
                callback: unique_callback_name(),
            },
        }
    }

    /// Callback name the body must invoke, for script injection.
    pub fn callback(&self) -> Option<&str> {
        match self {
            Self::Direct => None,
            Self::ScriptInjection { callback } => Some(callback),
        }
    }

    /// Issue the request and decode its body. No deadline is applied here; dropping the future
    /// aborts the request.
    pub async fn fetch(&self, client: &reqwest::Client, url: &Url) -> GardenResult<serde_json::Value> {
        let response = client
            .get(url.as_str())
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| GardenError::transport(TransportFailure::LoadError, e.to_string()))?;

        let status = response.status();
        tracing::debug!(%status, "export response");
        let body = response
            .text()
            .await
            .map_err(|e| GardenError::transport(TransportFailure::LoadError, e.to_string()))?;

        if !status.is_success() {
            return Err(GardenError::transport(
                TransportFailure::HttpStatus(status.as_u16()),
                format!("{status}; body: {}", excerpt(&body)),
            ));
        }

        match self {
            Self::Direct => parse_json_body(&body),
            Self::ScriptInjection { callback } => parse_callback_body(&body, callback),
        }
    }
}

/// HTTP client for export requests. Deadlines are applied per request by the caller.
pub fn http_client() -> GardenResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("lifelog-garden/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| GardenError::config(format!("http client init failed: {e}")))
}

/// Parse a JSON body, tolerating a byte-order mark and surrounding whitespace.
pub fn parse_json_body(body: &str) -> GardenResult<serde_json::Value> {
    serde_json::from_str(body)
        .or_else(|_| serde_json::from_str(body.trim_start_matches('\u{feff}').trim()))
        .map_err(|e| {
            GardenError::format(format!(
                "response was not valid JSON ({e}); first {BODY_EXCERPT_CHARS} chars: {}",
                excerpt(body)
            ))
        })
}

/// Extract the argument of `callback(...)` from a script body.
pub fn parse_callback_body(body: &str, callback: &str) -> GardenResult<serde_json::Value> {
    let needle = format!("{callback}(");
    let Some(start) = body.find(&needle) else {
        return Err(GardenError::transport(
            TransportFailure::LoadError,
            format!("callback {callback} was never invoked"),
        ));
    };
    let rest = body[start + needle.len()..].trim_end();
    let rest = rest.trim_end_matches(';').trim_end();
    let Some(arg) = rest.strip_suffix(')') else {
        return Err(GardenError::transport(
            TransportFailure::ParseError,
            format!("unterminated call to {callback}"),
        ));
    };
    serde_json::from_str(arg.trim()).map_err(|e| {
        GardenError::transport(
            TransportFailure::ParseError,
            format!("callback argument is not JSON: {e}"),
        )
    })
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/transport.rs"]
mod tests;
