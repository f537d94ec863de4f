use crate::{CollectdContext, MetricKey, Value, collectd_line, graphite_line};

fn context() -> CollectdContext {
    CollectdContext {
        host: "h".to_string(),
        plugin: "exometer".to_string(),
        instance: "node1".to_string(),
        type_name: "gauge".to_string(),
    }
}

#[test]
fn test_collectd_line_exact() {
    let key = MetricKey::new(["svc", "latency"], "mean");
    let line = collectd_line(&context(), &key, Value::Int(42), 1_000_000_000);
    assert_eq!(
        line,
        "PUTVAL h/exometer-node1/gauge-svc_latency_mean 1000000000:42\n"
    );
}

#[test]
fn test_collectd_line_float() {
    let key = MetricKey::new(["svc"], "mean");
    let line = collectd_line(&context(), &key, Value::Float(1.25), 1000);
    assert_eq!(line, "PUTVAL h/exometer-node1/gauge-svc_mean 1000:1.250000\n");
}

#[test]
fn test_collectd_line_non_numeric_degrades() {
    let key = MetricKey::new(["svc"], "mean");
    let line = collectd_line(&context(), &key, Value::Undefined, 1000);
    assert_eq!(line, "PUTVAL h/exometer-node1/gauge-svc_mean 1000:0\n");
}

#[test]
fn test_graphite_line_with_prefix() {
    let key = MetricKey::new(["svc", "latency"], "mean");
    let line = graphite_line("key1", Some("prod"), &key, Value::Int(42), 1_000_000_000);
    assert_eq!(line, "key1.prod.svc.latency.mean 42 1000000000\n");
}

#[test]
fn test_graphite_line_without_prefix() {
    let key = MetricKey::new(["svc", "latency"], "mean");
    let line = graphite_line("key1", None, &key, Value::Int(42), 1_000_000_000);
    assert_eq!(line, "key1.svc.latency.mean 42 1000000000\n");
}

#[test]
fn test_graphite_line_empty_prefix_omitted() {
    let key = MetricKey::new(["svc"], "count");
    let line = graphite_line("key1", Some(""), &key, Value::Int(1), 7);
    assert_eq!(line, "key1.svc.count 1 7\n");
}
