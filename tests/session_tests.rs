use std::time::Duration;

use pretty_assertions::assert_eq;
use uiforge::session::{EvictionPolicy, SessionTracker};

#[test]
fn tracks_tools_in_order() {
    let tracker = SessionTracker::new();
    tracker.start_session("id");
    tracker.track_tool("id", "a");
    tracker.track_tool("id", "b");

    let metrics = tracker.get_metrics("id").unwrap();

    assert_eq!(metrics.tools_used_count, 2);
    assert_eq!(metrics.tool_names, vec!["a".to_string(), "b".to_string()]);
    assert!(metrics.average_tool_time_ms.unwrap() >= 0.0);
}

#[test]
fn zero_tools_has_no_average() {
    let tracker = SessionTracker::new();
    tracker.start_session("idle");

    let metrics = tracker.get_metrics("idle").unwrap();

    assert_eq!(metrics.tools_used_count, 0);
    assert_eq!(metrics.average_tool_time_ms, None);
    let json = serde_json::to_value(&metrics).unwrap();
    assert!(json["averageToolTimeMs"].is_null());
}

#[test]
fn history_never_shrinks_while_session_lives() {
    let tracker = SessionTracker::new();
    tracker.start_session("grow");
    let mut last = 0;

    for i in 0..20 {
        tracker.track_tool("grow", &format!("tool-{i}"));
        let count = tracker.get_metrics("grow").unwrap().tools_used_count;
        assert!(count > last);
        last = count;
    }
}

#[test]
fn duration_grows_over_time() {
    let tracker = SessionTracker::new();
    tracker.start_session("timed");
    std::thread::sleep(Duration::from_millis(5));

    let metrics = tracker.get_metrics("timed").unwrap();

    assert!(metrics.duration_ms >= 5);
}

#[test]
fn capacity_bound_holds_under_many_sessions() {
    let tracker = SessionTracker::with_policy(EvictionPolicy {
        max_sessions: 16,
        max_age: Duration::from_secs(3600),
    });

    for _ in 0..100 {
        tracker.start_session(&SessionTracker::new_session_id());
    }

    assert_eq!(tracker.active_count(), 16);
}

#[test]
fn session_ids_are_unique() {
    let a = SessionTracker::new_session_id();
    let b = SessionTracker::new_session_id();
    assert_ne!(a, b);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tracking_is_not_lost() {
    let tracker = SessionTracker::new();
    tracker.start_session("busy");

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let tracker = tracker.clone();
            tokio::spawn(async move {
                for i in 0..25 {
                    tracker.track_tool("busy", &format!("w{worker}-{i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(tracker.get_metrics("busy").unwrap().tools_used_count, 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn racing_first_calls_keep_every_tool() {
    for round in 0..200 {
        let tracker = SessionTracker::new();
        let id = format!("shared-{round}");

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let tracker = tracker.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    tracker.ensure_session(&id);
                    tracker.track_tool(&id, &format!("tool-{worker}"));
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(tracker.get_metrics(&id).unwrap().tools_used_count, 8);
    }
}

#[test]
fn ensure_session_never_resets_history() {
    let tracker = SessionTracker::new();
    tracker.ensure_session("kept");
    tracker.track_tool("kept", "a");

    tracker.ensure_session("kept");

    assert_eq!(tracker.get_metrics("kept").unwrap().tool_names, vec!["a".to_string()]);
}
