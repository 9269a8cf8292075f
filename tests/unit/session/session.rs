use super::*;
use crate::acquire::FROM_CACHE;
use crate::acquire::cache::MemoryCache;
use crate::foundation::error::TransportFailure;
use crate::scene::{FOREGROUND_LAYER, Paint, SceneNode};
use serde_json::json;

fn session() -> GardenSession {
    GardenSession::with_client(
        GardenConfig::default(),
        Arc::new(MemoryCache::new()),
        reqwest::Client::new(),
    )
    .expect("session")
}

fn acquired(rows: serde_json::Value, stale: bool) -> Acquired {
    let now = Utc::now();
    Acquired {
        payload: json!({ "ok": true, "rows": rows }),
        stale,
        saved_at: stale.then_some(now),
        fallback_cause: stale.then(|| "validation error: bad bot".to_owned()),
        fetched_from: if stale { FROM_CACHE.to_owned() } else { "http://x/".to_owned() },
        fetched_at: now,
    }
}

#[test]
fn idle_session_shows_placeholder() {
    let s = session();
    assert_eq!(s.status(), &LoadStatus::Idle);
    assert!(s.build_scene().placeholder);
}

#[test]
fn new_reload_cancels_previous() {
    let mut s = session();
    let first = s.begin_reload();
    let second = s.begin_reload();
    assert!(first.cancel_token().is_cancelled());
    assert!(!second.cancel_token().is_cancelled());
    assert_eq!((first.generation(), second.generation()), (1, 2));
    assert!(s.is_loading());
}

#[test]
fn late_completion_is_discarded() {
    let mut s = session();
    let old = s.begin_reload();
    let new = s.begin_reload();

    let status = s
        .complete(ReloadOutcome {
            generation: new.generation(),
            result: Ok(acquired(json!([{ "DateKey": "2024-03-01" }]), false)),
        })
        .expect("current generation applies");
    assert!(matches!(status, LoadStatus::Fresh { .. }));

    let err = s
        .complete(ReloadOutcome {
            generation: old.generation(),
            result: Ok(acquired(json!([{ "DateKey": "a" }, { "DateKey": "b" }]), false)),
        })
        .expect_err("older generation is discarded");
    assert!(matches!(
        err,
        GardenError::Superseded {
            generation: 1,
            current: 2
        }
    ));
    assert_eq!(s.records().len(), 1);
    assert_eq!(s.records()[0].identity_key, "2024-03-01");
}

#[test]
fn stale_results_are_flagged() {
    let mut s = session();
    let req = s.begin_reload();
    let status = s
        .complete(ReloadOutcome {
            generation: req.generation(),
            result: Ok(acquired(json!([{ "DateKey": "2024-03-01" }]), true)),
        })
        .expect("complete");
    assert!(status.is_stale());
    assert!(matches!(&status, LoadStatus::Stale { cause, .. } if cause.contains("bad bot")));
    assert!(s.last_acquired().is_some_and(|a| a.stale));
    assert!(!s.is_loading());

    let scene = s.build_scene();
    assert!(!scene.placeholder);
    let notice = status.notice().expect("stale status has a notice");
    assert!(notice.starts_with("Showing cached data from "));
    let shown = match scene.layer(FOREGROUND_LAYER) {
        Some(SceneNode::Group { children, .. }) => children.iter().any(|n| {
            matches!(n, SceneNode::Text { content, .. } if *content == notice)
        }),
        _ => false,
    };
    assert!(shown);
}

#[test]
fn fresh_results_carry_no_notice() {
    let mut s = session();
    let req = s.begin_reload();
    let status = s
        .complete(ReloadOutcome {
            generation: req.generation(),
            result: Ok(acquired(json!([{ "DateKey": "2024-03-01" }]), false)),
        })
        .expect("complete");
    assert_eq!(status.notice(), None);
    assert!(s.last_acquired().is_some_and(|a| a.fallback_cause.is_none()));
    let scene = s.build_scene();
    let translucent = match scene.layer(FOREGROUND_LAYER) {
        Some(SceneNode::Group { children, .. }) => children
            .iter()
            .filter(|n| {
                matches!(n, SceneNode::Rect { style, .. }
                    if matches!(style.fill, Paint::Translucent(..)))
            })
            .count(),
        _ => usize::MAX,
    };
    assert_eq!(translucent, 0);
}

#[test]
fn total_failure_falls_back_to_placeholder() {
    let mut s = session();
    let req = s.begin_reload();
    s.complete(ReloadOutcome {
        generation: req.generation(),
        result: Ok(acquired(json!([{ "DateKey": "2024-03-01" }]), false)),
    })
    .expect("first load");

    let req = s.begin_reload();
    let err = s
        .complete(ReloadOutcome {
            generation: req.generation(),
            result: Err(GardenError::transport(TransportFailure::Timeout, "slow")),
        })
        .expect_err("failure surfaces");
    assert!(err.to_string().contains("timeout"));
    assert!(matches!(s.status(), LoadStatus::Failed(msg) if msg.contains("timeout")));
    assert!(s.records().is_empty());
    assert!(s.build_scene().placeholder);
}

#[tokio::test]
async fn unset_endpoint_fails_without_network() {
    let mut s = session();
    let err = s.reload().await.expect_err("no endpoint");
    assert!(matches!(err, GardenError::Config(_)));
    assert!(matches!(s.status(), LoadStatus::Failed(_)));

    let mut mount = SvgMount::default();
    assert!(s.render_into(Some(&mut mount)));
    assert!(mount.attached().is_some_and(|scene| scene.placeholder));
}

#[test]
fn invalid_config_is_rejected() {
    let mut s = session();
    let mut cfg = GardenConfig::default();
    cfg.render.columns = 0;
    assert!(s.set_config(cfg).is_err());
    assert_eq!(s.config().render.columns, 10);
}
