use super::*;
use statbridge_config::{CollectdConfig, GraphiteConfig};

fn collectd_config() -> CollectdConfig {
    CollectdConfig {
        path: "/run/cd.sock".into(),
        ..Default::default()
    }
}

fn graphite_config() -> GraphiteConfig {
    GraphiteConfig {
        host: "carbon".to_string(),
        api_key: "key1".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_collectd_defaults() {
    let profile = Profile::collectd(collectd_config());
    assert_eq!(profile.name(), "collectd");
    assert!(profile.expects_reply());
    assert_eq!(
        profile.target(),
        &Target::Unix {
            path: "/run/cd.sock".into()
        }
    );

    let key = MetricKey::new(["svc", "latency"], "mean");
    let line = profile.encode(&key, Value::Int(42), 1_000_000_000);
    assert_eq!(
        line,
        "PUTVAL localhost/exometer-localhost/gauge-svc_latency_mean 1000000000:42\n"
    );
}

#[test]
fn test_collectd_instance_defaults_to_short_hostname() {
    let config = CollectdConfig {
        hostname: Some("web01.example.com".to_string()),
        ..collectd_config()
    };
    let profile = Profile::collectd(config);

    let key = MetricKey::new(["svc"], "count");
    let line = profile.encode(&key, Value::Int(1), 1000);
    assert_eq!(
        line,
        "PUTVAL web01.example.com/exometer-web01/gauge-svc_count 1000:1\n"
    );
}

#[test]
fn test_collectd_type_always_gauge() {
    let config = CollectdConfig {
        type_spec: Some("counter".to_string()),
        ..collectd_config()
    };
    let profile = Profile::collectd(config);

    let key = MetricKey::new(["svc"], "count");
    let line = profile.encode(&key, Value::Int(1), 1000);
    assert!(line.contains("/gauge-svc_count "));
}

#[test]
fn test_graphite_profile() {
    let profile = Profile::graphite(graphite_config());
    assert_eq!(profile.name(), "graphite");
    assert!(!profile.expects_reply());
    assert_eq!(
        profile.target(),
        &Target::Tcp {
            host: "carbon".to_string(),
            port: 2003
        }
    );

    let key = MetricKey::new(["svc", "latency"], "mean");
    let line = profile.encode(&key, Value::Int(42), 1_000_000_000);
    assert_eq!(line, "key1.svc.latency.mean 42 1000000000\n");
}

#[test]
fn test_graphite_prefix_in_path() {
    let config = GraphiteConfig {
        prefix: Some("prod".to_string()),
        ..graphite_config()
    };
    let profile = Profile::graphite(config);

    let key = MetricKey::new(["svc"], "count");
    let line = profile.encode(&key, Value::Int(7), 1000);
    assert_eq!(line, "key1.prod.svc.count 7 1000\n");
}

#[test]
fn test_graphite_keepalive_follows_config() {
    let enabled = Profile::graphite(graphite_config());
    assert!(enabled.connect_options().tcp_keepalive.is_some());

    let config = GraphiteConfig {
        tcp_keepalive: false,
        ..graphite_config()
    };
    let disabled = Profile::graphite(config);
    assert!(disabled.connect_options().tcp_keepalive.is_none());
}
