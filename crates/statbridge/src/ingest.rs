//! Stdin ingest
//!
//! Line protocol for feeding the bridge from a supervising process:
//!
//! ```text
//! put <dotted.metric.path> <datapoint> <value>
//! del <dotted.metric.path> <datapoint>
//! ```
//!
//! Path segments that parse as integers become integer key segments,
//! everything else stays symbolic. Blank lines and `#` comments are
//! ignored; malformed lines are logged and skipped.

use anyhow::{Result, bail};
use statbridge_protocol::{MetricKey, Segment, Value};
use statbridge_reporter::ReporterHandle;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One parsed ingest line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Report a value and keep it refreshed
    Put { key: MetricKey, value: Value },
    /// Stop refreshing a metric
    Del { key: MetricKey },
}

/// Parse one ingest line into a command
pub fn parse_line(line: &str) -> Result<Command> {
    let mut fields = line.split_whitespace();

    let verb = match fields.next() {
        Some(verb) => verb,
        None => bail!("empty line"),
    };

    match verb {
        "put" => {
            let (Some(path), Some(datapoint), Some(value)) =
                (fields.next(), fields.next(), fields.next())
            else {
                bail!("usage: put <path> <datapoint> <value>");
            };
            if fields.next().is_some() {
                bail!("trailing fields after value");
            }
            Ok(Command::Put {
                key: parse_key(path, datapoint),
                value: parse_value(value),
            })
        }
        "del" => {
            let (Some(path), Some(datapoint)) = (fields.next(), fields.next()) else {
                bail!("usage: del <path> <datapoint>");
            };
            if fields.next().is_some() {
                bail!("trailing fields after datapoint");
            }
            Ok(Command::Del {
                key: parse_key(path, datapoint),
            })
        }
        other => bail!("unknown verb: {other}"),
    }
}

fn parse_key(path: &str, datapoint: &str) -> MetricKey {
    let segments = path.split('.').map(|part| match part.parse::<i64>() {
        Ok(n) => Segment::Int(n),
        Err(_) => Segment::Text(part.to_string()),
    });
    MetricKey::new(segments, datapoint)
}

fn parse_value(field: &str) -> Value {
    if let Ok(n) = field.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(f) = field.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Undefined
}

/// Read ingest commands from stdin and fan them out to every reporter.
///
/// Returns when stdin closes or `cancel` fires.
pub async fn run(handles: Vec<ReporterHandle>, cancel: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("stdin closed, ingest finished");
                break;
            }
            Err(e) => {
                warn!(error = %e, "stdin read failed, ingest finished");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command = match parse_line(trimmed) {
            Ok(command) => command,
            Err(e) => {
                warn!(line = %trimmed, error = %e, "ignoring malformed ingest line");
                continue;
            }
        };

        for handle in &handles {
            let result = match &command {
                Command::Put { key, value } => handle.report(key.clone(), *value).await,
                Command::Del { key } => handle.unsubscribe(key.clone()).await,
            };
            if result.is_err() {
                // Reporter gone; shutdown is in progress
                return;
            }
        }
    }
}
