use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GardenError::transport(TransportFailure::Timeout, "x")
            .to_string()
            .contains("transport error: timeout")
    );
    assert!(GardenError::format("x").to_string().contains("format error:"));
    assert!(
        GardenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GardenError::config("x").to_string().contains("config error:"));
    assert!(GardenError::cache("x").to_string().contains("cache error:"));
}

#[test]
fn transport_reasons_render_as_tags() {
    assert_eq!(TransportFailure::Timeout.to_string(), "timeout");
    assert_eq!(TransportFailure::HttpStatus(503).to_string(), "http-status:503");
    assert_eq!(TransportFailure::LoadError.to_string(), "load-error");
    assert_eq!(TransportFailure::ParseError.to_string(), "parse-error");
}

#[test]
fn cancellation_never_falls_back_to_cache() {
    assert!(!GardenError::transport(TransportFailure::Cancelled, "newer reload").allows_cache_fallback());
    assert!(GardenError::transport(TransportFailure::Timeout, "12s").allows_cache_fallback());
    assert!(GardenError::format("<html>").allows_cache_fallback());
    assert!(GardenError::validation("ok:false").allows_cache_fallback());
    assert!(!GardenError::config("endpoint not set").allows_cache_fallback());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GardenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
