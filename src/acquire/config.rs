//! Acquisition settings and the request URL and cache key derived from them.

use std::time::Duration;

use url::Url;

use crate::foundation::error::{GardenError, GardenResult};

/// Row limit used when none is given or the given text is not a number.
pub const DEFAULT_LIMIT: u32 = 40;
/// Smallest accepted row limit.
pub const LIMIT_MIN: u32 = 1;
/// Largest accepted row limit.
pub const LIMIT_MAX: u32 = 500;
/// Request deadline used when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 12_000;

/// Route value the export endpoint dispatches on when [`RouteMode::R`] is selected.
pub const EXPORT_ROUTE: &str = "api_garden_export";
const CACHE_NAMESPACE: &str = "LifeLogGardenExport";

/// Which bot's export to request.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Bot {
    /// `bot=winston`
    #[default]
    Winston,
    /// `bot=alfred`
    Alfred,
}

impl Bot {
    /// Query-string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Winston => "winston",
            Self::Alfred => "alfred",
        }
    }

    /// Anything that is not `alfred` selects the default bot.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("alfred") {
            Self::Alfred
        } else {
            Self::Winston
        }
    }
}

/// How the request is routed on the export endpoint.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum RouteMode {
    /// `?r=api_garden_export&bot=...`
    #[default]
    #[serde(rename = "r")]
    R,
    /// Selector parameters only.
    #[serde(rename = "direct")]
    Direct,
}

impl RouteMode {
    /// Config-file form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::Direct => "direct",
        }
    }
}

/// Transport strategy used to reach the endpoint.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    /// Plain HTTP GET returning JSON.
    #[default]
    Direct,
    /// JSONP-style: the endpoint wraps the JSON in a call to a named callback.
    ScriptInjection,
}

impl TransportKind {
    /// Config-file and cache-key form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::ScriptInjection => "script-injection",
        }
    }
}

/// Acquisition settings supplied by the surrounding UI.
///
/// Fields are private so every write goes through the normalizing setters; the serde
/// representation is routed through the same setters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "AcquireConfigRepr", into = "AcquireConfigRepr")]
pub struct AcquireConfig {
    endpoint: String,
    bot: Bot,
    limit: u32,
    transport: TransportKind,
    route: RouteMode,
    cache_enabled: bool,
    timeout_ms: u64,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            bot: Bot::default(),
            limit: DEFAULT_LIMIT,
            transport: TransportKind::default(),
            route: RouteMode::default(),
            cache_enabled: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AcquireConfig {
    /// Base URL without trailing slashes; empty when unset.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Set the endpoint; surrounding whitespace and trailing slashes are dropped.
    ///
    /// An empty value clears the endpoint. A non-empty value must be an absolute http(s) URL.
    pub fn set_endpoint(&mut self, endpoint: &str) -> GardenResult<()> {
        let trimmed = endpoint.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            let url = Url::parse(trimmed)
                .map_err(|e| GardenError::config(format!("invalid endpoint \"{trimmed}\": {e}")))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(GardenError::config(format!(
                    "endpoint must be http or https, got \"{}\"",
                    url.scheme()
                )));
            }
        }
        self.endpoint = trimmed.to_owned();
        Ok(())
    }

    /// Bot whose export is requested.
    pub fn bot(&self) -> Bot {
        self.bot
    }

    /// Select the bot.
    pub fn set_bot(&mut self, bot: Bot) {
        self.bot = bot;
    }

    /// Row limit, always within `LIMIT_MIN..=LIMIT_MAX`.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Clamp into `LIMIT_MIN..=LIMIT_MAX`.
    pub fn set_limit(&mut self, limit: i64) {
        self.limit = limit.clamp(i64::from(LIMIT_MIN), i64::from(LIMIT_MAX)) as u32;
    }

    /// Set the limit from free text; non-numeric input restores the default.
    pub fn set_limit_text(&mut self, text: &str) {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => self.set_limit(v.trunc().clamp(-1.0e12, 1.0e12) as i64),
            _ => self.limit = DEFAULT_LIMIT,
        }
    }

    /// Transport strategy.
    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    /// Select the transport strategy.
    pub fn set_transport(&mut self, transport: TransportKind) {
        self.transport = transport;
    }

    /// Routing mode.
    pub fn route(&self) -> RouteMode {
        self.route
    }

    /// Select the routing mode.
    pub fn set_route(&mut self, route: RouteMode) {
        self.route = route;
    }

    /// Whether fresh payloads are written to, and failures fall back to, the cache.
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Turn cache read and write-through on or off.
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.cache_enabled = enabled;
    }

    /// Deadline for one fresh fetch.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Set the request deadline; zero is raised to one millisecond.
    pub fn set_timeout_ms(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms.max(1);
    }

    /// Namespaced cache key; distinct (endpoint, bot, route, transport) combinations never collide.
    pub fn cache_key(&self) -> String {
        format!(
            "{CACHE_NAMESPACE}:{}:{}:{}:{}",
            self.endpoint,
            self.bot.as_str(),
            self.route.as_str(),
            self.transport.as_str()
        )
    }

    /// Build the request URL with a `_ts` cache-buster and an optional JSONP callback name.
    pub fn request_url(&self, ts_millis: i64, callback: Option<&str>) -> GardenResult<Url> {
        if self.endpoint.is_empty() {
            return Err(GardenError::config("endpoint is not set"));
        }
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| GardenError::config(format!("invalid endpoint: {e}")))?;
        {
            let mut q = url.query_pairs_mut();
            if self.route == RouteMode::R {
                q.append_pair("r", EXPORT_ROUTE);
            }
            q.append_pair("bot", self.bot.as_str());
            q.append_pair("limit", &self.limit.to_string());
            if let Some(cb) = callback {
                q.append_pair("callback", cb);
            }
            q.append_pair("_ts", &ts_millis.to_string());
        }
        Ok(url)
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AcquireConfigRepr {
    endpoint: String,
    bot: String,
    limit: serde_json::Value,
    transport: TransportKind,
    route: RouteMode,
    cache_enabled: bool,
    timeout_ms: u64,
}

impl Default for AcquireConfigRepr {
    fn default() -> Self {
        AcquireConfig::default().into()
    }
}

impl From<AcquireConfig> for AcquireConfigRepr {
    fn from(c: AcquireConfig) -> Self {
        Self {
            endpoint: c.endpoint,
            bot: c.bot.as_str().to_owned(),
            limit: serde_json::Value::from(c.limit),
            transport: c.transport,
            route: c.route,
            cache_enabled: c.cache_enabled,
            timeout_ms: c.timeout_ms,
        }
    }
}

impl TryFrom<AcquireConfigRepr> for AcquireConfig {
    type Error = GardenError;

    fn try_from(r: AcquireConfigRepr) -> Result<Self, Self::Error> {
        let mut c = AcquireConfig::default();
        c.set_endpoint(&r.endpoint)?;
        c.set_bot(Bot::parse_lenient(&r.bot));
        match &r.limit {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) => c.set_limit_text(&v.to_string()),
                None => c.limit = DEFAULT_LIMIT,
            },
            serde_json::Value::String(s) => c.set_limit_text(s),
            _ => c.limit = DEFAULT_LIMIT,
        }
        c.set_transport(r.transport);
        c.set_route(r.route);
        c.set_cache_enabled(r.cache_enabled);
        c.set_timeout_ms(r.timeout_ms);
        Ok(c)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/config.rs"]
mod tests;
