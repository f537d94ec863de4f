use crate::{MetricKey, Segment};
use std::collections::HashMap;

#[test]
fn test_equal_keys_match() {
    let a = MetricKey::new(["svc", "latency"], "mean");
    let b = MetricKey::new(["svc", "latency"], "mean");
    assert_eq!(a, b);

    let mut table = HashMap::new();
    table.insert(a, 1);
    assert_eq!(table.get(&b), Some(&1));
}

#[test]
fn test_datapoint_distinguishes_keys() {
    let mean = MetricKey::new(["svc", "latency"], "mean");
    let count = MetricKey::new(["svc", "latency"], "count");
    assert_ne!(mean, count);
}

#[test]
fn test_segment_sequence_distinguishes_keys() {
    let a = MetricKey::new(["svc", "latency"], "mean");
    let b = MetricKey::new(["latency", "svc"], "mean");
    assert_ne!(a, b);
}

#[test]
fn test_integer_segments_render_decimal() {
    let key = MetricKey::new(
        [Segment::from("worker"), Segment::from(7_i64)],
        "count",
    );
    assert_eq!(key.flatten('_'), "worker_7_count");
}

#[test]
fn test_flatten_separators() {
    let key = MetricKey::new(["svc", "latency"], "mean");
    assert_eq!(key.flatten('_'), "svc_latency_mean");
    assert_eq!(key.flatten('.'), "svc.latency.mean");
}

#[test]
fn test_flatten_empty_path() {
    let key = MetricKey::new(Vec::<Segment>::new(), "count");
    assert_eq!(key.flatten('_'), "count");
}

#[test]
fn test_keys_are_ordered() {
    let mut keys = vec![
        MetricKey::new(["b"], "mean"),
        MetricKey::new(["a"], "mean"),
        MetricKey::new(["a"], "count"),
    ];
    keys.sort();
    assert_eq!(keys[0], MetricKey::new(["a"], "count"));
    assert_eq!(keys[2], MetricKey::new(["b"], "mean"));
}

#[test]
fn test_display_uses_dotted_path() {
    let key = MetricKey::new(["svc", "latency"], "mean");
    assert_eq!(key.to_string(), "svc.latency.mean");
}
