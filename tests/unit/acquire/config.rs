use super::*;

fn configured(endpoint: &str) -> AcquireConfig {
    let mut c = AcquireConfig::default();
    c.set_endpoint(endpoint).unwrap();
    c
}

#[test]
fn defaults_match_export_contract() {
    let c = AcquireConfig::default();
    assert_eq!(c.endpoint(), "");
    assert_eq!(c.bot(), Bot::Winston);
    assert_eq!(c.limit(), 40);
    assert_eq!(c.transport(), TransportKind::Direct);
    assert_eq!(c.route(), RouteMode::R);
    assert!(c.cache_enabled());
    assert_eq!(c.timeout(), Duration::from_secs(12));
}

#[test]
fn endpoint_is_trimmed_and_validated() {
    let c = configured("  https://example.com/macros/exec///  ");
    assert_eq!(c.endpoint(), "https://example.com/macros/exec");

    let mut c = AcquireConfig::default();
    assert!(c.set_endpoint("not a url").is_err());
    assert!(c.set_endpoint("ftp://example.com/x").is_err());
    assert_eq!(c.endpoint(), "");
    c.set_endpoint("   ").unwrap();
    assert_eq!(c.endpoint(), "");
}

#[test]
fn limit_is_clamped_into_range() {
    let mut c = AcquireConfig::default();
    c.set_limit(0);
    assert_eq!(c.limit(), LIMIT_MIN);
    c.set_limit(-20);
    assert_eq!(c.limit(), LIMIT_MIN);
    c.set_limit(10_000);
    assert_eq!(c.limit(), LIMIT_MAX);
    c.set_limit(77);
    assert_eq!(c.limit(), 77);
}

#[test]
fn limit_text_falls_back_to_default() {
    let mut c = AcquireConfig::default();
    c.set_limit_text("12.9");
    assert_eq!(c.limit(), 12);
    c.set_limit_text("many");
    assert_eq!(c.limit(), DEFAULT_LIMIT);
    c.set_limit_text("1e9");
    assert_eq!(c.limit(), LIMIT_MAX);
}

#[test]
fn bot_parsing_is_lenient() {
    assert_eq!(Bot::parse_lenient("alfred"), Bot::Alfred);
    assert_eq!(Bot::parse_lenient(" ALFRED "), Bot::Alfred);
    assert_eq!(Bot::parse_lenient("jeeves"), Bot::Winston);
}

#[test]
fn cache_keys_separate_configurations() {
    let a = configured("https://example.com/exec");
    let mut b = a.clone();
    b.set_bot(Bot::Alfred);
    let mut c = a.clone();
    c.set_route(RouteMode::Direct);
    let mut d = a.clone();
    d.set_transport(TransportKind::ScriptInjection);
    let keys = [a.cache_key(), b.cache_key(), c.cache_key(), d.cache_key()];
    for i in 0..keys.len() {
        for j in (i + 1)..keys.len() {
            assert_ne!(keys[i], keys[j]);
        }
    }
    assert_eq!(
        a.cache_key(),
        "LifeLogGardenExport:https://example.com/exec:winston:r:direct"
    );
}

#[test]
fn request_url_carries_route_selector_and_cache_buster() {
    let c = configured("https://example.com/exec");
    let url = c.request_url(1234, None).unwrap();
    assert_eq!(
        url.as_str(),
        "https://example.com/exec?r=api_garden_export&bot=winston&limit=40&_ts=1234"
    );

    let mut c = c;
    c.set_route(RouteMode::Direct);
    let url = c.request_url(5, Some("__cb_1")).unwrap();
    assert_eq!(
        url.as_str(),
        "https://example.com/exec?bot=winston&limit=40&callback=__cb_1&_ts=5"
    );
}

#[test]
fn request_url_requires_endpoint() {
    let err = AcquireConfig::default().request_url(0, None).unwrap_err();
    assert!(matches!(err, GardenError::Config(_)));
}

#[test]
fn serde_routes_through_setters() {
    let c: AcquireConfig = serde_json::from_value(serde_json::json!({
        "endpoint": "https://example.com/exec/",
        "bot": "Alfred",
        "limit": 9000,
        "transport": "script-injection",
        "route": "direct",
        "cacheEnabled": false
    }))
    .unwrap();
    assert_eq!(c.endpoint(), "https://example.com/exec");
    assert_eq!(c.bot(), Bot::Alfred);
    assert_eq!(c.limit(), LIMIT_MAX);
    assert_eq!(c.transport(), TransportKind::ScriptInjection);
    assert_eq!(c.route(), RouteMode::Direct);
    assert!(!c.cache_enabled());
    assert_eq!(c.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));

    let back: AcquireConfig =
        serde_json::from_value(serde_json::to_value(&c).unwrap()).unwrap();
    assert_eq!(back, c);

    assert!(
        serde_json::from_value::<AcquireConfig>(serde_json::json!({ "endpoint": "nope" })).is_err()
    );
}
