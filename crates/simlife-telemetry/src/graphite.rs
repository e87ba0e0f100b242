//! Periodic Graphite reporting.
//!
//! [`GraphiteReporter`] renders the metrics registry, converts every sample
//! to the Graphite plaintext protocol (`path value timestamp`) and pushes the
//! batch over TCP. [`GraphiteReporter::start`] repeats this on a fixed period
//! in a background task until the returned [`GraphiteHandle`] is stopped.
//!
//! Label pairs become path segments and durations recorded in seconds are
//! reported in milliseconds. Histogram buckets keep their counts; only the
//! `le` bound is converted:
//!
//! ```text
//! simlife_request_duration_seconds_sum{uri="/api"} 0.25
//!   -> simlifeApplication.simlife_request_duration_milliseconds_sum.uri._api 250 1700000000
//! simlife_request_duration_seconds_bucket{le="0.5"} 3
//!   -> simlifeApplication.simlife_request_duration_milliseconds_bucket.le.500 3 1700000000
//! ```
//!
//! Counters are sent as totals and, from the second report on, as a
//! per-second rate over the time since the previous report
//! (`simlife_jobs_total` -> `simlife_jobs_rate`).

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::TelemetryError;
use crate::metrics::MetricsRegistry;
use crate::TelemetryResult;

/// Default reporting period.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

/// Where and how often to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphiteConfig {
    /// Graphite host.
    pub host: String,

    /// Plaintext protocol port.
    pub port: u16,

    /// Prefix prepended to every metric path. May be empty.
    pub prefix: String,

    /// Time between two reports.
    pub period: Duration,
}

impl GraphiteConfig {
    /// Creates a configuration reporting to `host:port` every minute.
    #[must_use]
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            prefix: String::new(),
            period: DEFAULT_PERIOD,
        }
    }

    /// Sets the metric path prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Sets the reporting period.
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Returns `host:port`.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Pushes registry snapshots to Graphite.
#[derive(Debug, Clone)]
pub struct GraphiteReporter {
    config: GraphiteConfig,
    registry: MetricsRegistry,
    rates: CounterRates,
    last_report: Option<Instant>,
}

impl GraphiteReporter {
    /// Creates a reporter over `registry`.
    #[must_use]
    pub fn new(config: GraphiteConfig, registry: MetricsRegistry) -> Self {
        Self {
            config,
            registry,
            rates: CounterRates::default(),
            last_report: None,
        }
    }

    /// Returns the reporter configuration.
    #[must_use]
    pub fn config(&self) -> &GraphiteConfig {
        &self.config
    }

    /// Sends one snapshot and returns the number of lines written.
    ///
    /// Nothing is sent, and no connection is opened, when the registry is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::GraphiteReport` if the server cannot be
    /// reached or the write fails.
    pub async fn report(&mut self) -> TelemetryResult<usize> {
        let samples = parse_exposition(&self.registry.render());
        if samples.is_empty() {
            return Ok(0);
        }

        let timestamp = unix_timestamp();
        let now = Instant::now();
        let elapsed = self
            .last_report
            .replace(now)
            .map(|last| now.duration_since(last).as_secs_f64());

        let prefix = &self.config.prefix;
        let mut lines: Vec<String> = samples
            .iter()
            .map(|sample| sample.line(prefix, &sample.name, sample.value, timestamp))
            .collect();
        lines.extend(self.rates.lines(prefix, &samples, elapsed, timestamp));

        let addr = self.config.addr();
        let io_error = |source| TelemetryError::GraphiteReport {
            addr: addr.clone(),
            source,
        };

        let mut payload = lines.join("\n");
        payload.push('\n');

        let mut stream = TcpStream::connect(&addr).await.map_err(io_error)?;
        stream.write_all(payload.as_bytes()).await.map_err(io_error)?;
        stream.shutdown().await.map_err(io_error)?;

        tracing::trace!(addr = %addr, lines = lines.len(), "Reported metrics to Graphite");
        Ok(lines.len())
    }

    /// Starts reporting every [`GraphiteConfig::period`] on the current
    /// tokio runtime. The first report is sent one period from now.
    ///
    /// Failed reports are logged and retried on the next tick.
    #[must_use]
    pub fn start(self) -> GraphiteHandle {
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let period = self.config.period;
        let mut reporter = self;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut cancel_rx => break,
                    _ = ticker.tick() => {
                        if let Err(e) = reporter.report().await {
                            tracing::warn!(error = %e, "Graphite report failed");
                        }
                    }
                }
            }

            tracing::debug!("Graphite reporter stopped");
        });

        GraphiteHandle {
            handle,
            cancel_tx: Some(cancel_tx),
        }
    }
}

/// Handle to a running [`GraphiteReporter`].
#[derive(Debug)]
pub struct GraphiteHandle {
    handle: JoinHandle<()>,
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl GraphiteHandle {
    /// Check if the reporter task is finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops reporting after the report in progress, if any, completes.
    pub async fn stop(mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            tracing::warn!(error = %e, "Graphite reporter ended abnormally");
        }
    }
}

/// Last reported total of every counter series, keyed by Graphite path.
#[derive(Debug, Clone, Default)]
struct CounterRates {
    previous: HashMap<String, f64>,
}

impl CounterRates {
    // A series needs a previous total and must not have been reset
    fn lines(
        &mut self,
        prefix: &str,
        samples: &[Sample],
        elapsed_secs: Option<f64>,
        timestamp: u64,
    ) -> Vec<String> {
        let mut lines = Vec::new();

        for sample in samples.iter().filter(|s| s.counter) {
            let key = sample.path(prefix, &sample.name);
            let previous = self.previous.insert(key, sample.value);

            let (Some(previous), Some(elapsed)) = (previous, elapsed_secs) else {
                continue;
            };
            if elapsed > 0.0 && sample.value >= previous {
                let rate = (sample.value - previous) / elapsed;
                lines.push(sample.line(prefix, &sample.rate_name(), rate, timestamp));
            }
        }

        lines
    }
}

/// Converts Prometheus text exposition to Graphite plaintext lines.
///
/// Comment lines and non-finite samples are skipped.
#[must_use]
pub fn to_plaintext(prefix: &str, exposition: &str, timestamp: u64) -> Vec<String> {
    parse_exposition(exposition)
        .iter()
        .map(|sample| sample.line(prefix, &sample.name, sample.value, timestamp))
        .collect()
}

/// One exposition sample, durations already in milliseconds.
#[derive(Debug, Clone, PartialEq)]
struct Sample {
    name: String,
    labels: Vec<(String, String)>,
    value: f64,
    counter: bool,
}

impl Sample {
    fn parse(line: &str) -> Option<Self> {
        let (name, labels, rest) = match line.find('{') {
            Some(open) => {
                let close = line.rfind('}')?;
                (&line[..open], &line[open + 1..close], &line[close + 1..])
            }
            None => {
                let (name, rest) = line.split_once(char::is_whitespace)?;
                (name, "", rest)
            }
        };

        let value: f64 = rest.split_whitespace().next()?.parse().ok()?;
        if !value.is_finite() {
            return None;
        }

        Some(Self {
            name: name.trim().to_string(),
            labels: parse_labels(labels),
            value,
            counter: false,
        })
    }

    // `_count` series and bucket counts are not durations
    fn into_milliseconds(mut self) -> Self {
        if let Some(base) = self.name.strip_suffix("_seconds_bucket") {
            self.name = format!("{base}_milliseconds_bucket");
            for (key, bound) in &mut self.labels {
                if key == "le" {
                    if let Some(seconds) = bound.parse::<f64>().ok().filter(|b| b.is_finite()) {
                        *bound = (seconds * 1000.0).to_string();
                    }
                }
            }
        } else if let Some(base) = self.name.strip_suffix("_seconds_sum") {
            self.name = format!("{base}_milliseconds_sum");
            self.value *= 1000.0;
        } else if let Some(base) = self.name.strip_suffix("_seconds") {
            self.name = format!("{base}_milliseconds");
            self.value *= 1000.0;
        }
        self
    }

    fn rate_name(&self) -> String {
        let base = self.name.strip_suffix("_total").unwrap_or(&self.name);
        format!("{base}_rate")
    }

    fn path(&self, prefix: &str, name: &str) -> String {
        let mut path = Vec::with_capacity(2 + self.labels.len() * 2);
        if !prefix.is_empty() {
            path.push(prefix.to_string());
        }
        path.push(name.to_string());
        for (key, value) in &self.labels {
            path.push(sanitize(key));
            path.push(sanitize(value));
        }
        path.join(".")
    }

    fn line(&self, prefix: &str, name: &str, value: f64, timestamp: u64) -> String {
        format!("{} {} {}", self.path(prefix, name), value, timestamp)
    }
}

fn parse_exposition(exposition: &str) -> Vec<Sample> {
    let mut counters = Vec::new();
    let mut samples = Vec::new();

    for line in exposition.lines().map(str::trim) {
        if let Some(comment) = line.strip_prefix('#') {
            let mut words = comment.split_whitespace();
            if let (Some("TYPE"), Some(name), Some("counter")) =
                (words.next(), words.next(), words.next())
            {
                counters.push(name.to_string());
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }

        if let Some(mut sample) = Sample::parse(line) {
            sample.counter = counters.iter().any(|c| *c == sample.name);
            samples.push(sample.into_milliseconds());
        }
    }

    samples
}

fn parse_labels(labels: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut rest = labels;

    while let Some((key, after)) = rest.split_once("=\"") {
        let mut escaped = false;
        let mut end = None;
        for (idx, c) in after.char_indices() {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => {
                    end = Some(idx);
                    break;
                }
                _ => escaped = false,
            }
        }
        let Some(end) = end else { break };

        pairs.push((
            key.trim_start_matches(',').trim().to_string(),
            after[..end].to_string(),
        ));
        rest = &after[end + 1..];
    }

    pairs
}

// Graphite treats '.' as a separator and ' ' as the end of the path
fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
