//! In-process metrics registry.
//!
//! Instruments are registered once (by name + label set) and the returned
//! handles are cloned into whoever updates them; request paths never touch
//! the registry maps. Families are stored in a `DashMap` keyed by name, and
//! each series is keyed by its sorted label vector so ordering is
//! deterministic. Histogram samples are accumulated in microseconds and
//! rendered in seconds.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use probedemo_core::error::{ProbeError, Result};

type LabelKey = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn series_name(name: &str, labels: &str) -> String {
    if labels.is_empty() {
        name.to_string()
    } else {
        format!("{name}{{{labels}}}")
    }
}

/// Monotonic counter handle.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicU64>);

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    pub fn add(&self, v: u64) {
        self.0.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

// Upper bounds in microseconds: 5ms .. 10s
const BUCKETS_MICROS: [u64; 11] = [
    5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000, 2_500_000, 5_000_000,
    10_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

/// Duration histogram handle.
#[derive(Clone, Default)]
pub struct Timer(Arc<AtomicHistogram>);

impl Timer {
    /// Record one completed operation and bump every bucket it fits in.
    pub fn record(&self, d: Duration) {
        let micros = u64::try_from(d.as_micros()).unwrap_or(u64::MAX);
        let h = &self.0;
        h.count.fetch_add(1, Ordering::Relaxed);
        h.sum_micros.fetch_add(micros, Ordering::Relaxed);
        for (bucket, &le) in h.buckets.iter().zip(BUCKETS_MICROS.iter()) {
            if micros <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.0.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> Duration {
        Duration::from_micros(self.0.sum_micros.load(Ordering::Relaxed))
    }
}

/// Callback sampled at render time.
pub type GaugeFn = Arc<dyn Fn() -> f64 + Send + Sync>;

#[derive(Clone)]
enum Series {
    Counter(Counter),
    Histogram(Timer),
    Gauge(GaugeFn),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Counter,
    Histogram,
    Gauge,
}

impl Kind {
    fn as_str(self) -> &'static str {
        match self {
            Kind::Counter => "counter",
            Kind::Histogram => "histogram",
            Kind::Gauge => "gauge",
        }
    }
}

struct Family {
    help: &'static str,
    kind: Kind,
    series: DashMap<LabelKey, Series>,
}

/// Registry of named instrument families.
#[derive(Default)]
pub struct MetricsRegistry {
    families: DashMap<&'static str, Family>,
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("families", &self.families.len())
            .field("series", &self.series_count())
            .finish()
    }
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or look up) a counter. Idempotent per (name, labels).
    pub fn counter(
        &self,
        name: &'static str,
        help: &'static str,
        labels: &[(&str, &str)],
    ) -> Result<Counter> {
        let series = self.get_or_insert(name, help, Kind::Counter, labels, || {
            Series::Counter(Counter::default())
        })?;
        match series {
            Series::Counter(c) => Ok(c),
            _ => Err(kind_mismatch(name)),
        }
    }

    /// Register (or look up) a duration histogram.
    pub fn timer(
        &self,
        name: &'static str,
        help: &'static str,
        labels: &[(&str, &str)],
    ) -> Result<Timer> {
        let series = self.get_or_insert(name, help, Kind::Histogram, labels, || {
            Series::Histogram(Timer::default())
        })?;
        match series {
            Series::Histogram(t) => Ok(t),
            _ => Err(kind_mismatch(name)),
        }
    }

    /// Bind a gauge to a callback. A second registration for the same
    /// (name, labels) keeps the first callback.
    pub fn gauge_fn<F>(
        &self,
        name: &'static str,
        help: &'static str,
        labels: &[(&str, &str)],
        f: F,
    ) -> Result<()>
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        self.get_or_insert(name, help, Kind::Gauge, labels, || Series::Gauge(Arc::new(f)))?;
        Ok(())
    }

    pub fn series_count(&self) -> usize {
        self.families.iter().map(|f| f.series.len()).sum()
    }

    fn get_or_insert(
        &self,
        name: &'static str,
        help: &'static str,
        kind: Kind,
        labels: &[(&str, &str)],
        make: impl FnOnce() -> Series,
    ) -> Result<Series> {
        let family = self.families.entry(name).or_insert_with(|| Family {
            help,
            kind,
            series: DashMap::new(),
        });
        if family.kind != kind {
            return Err(kind_mismatch(name));
        }
        let series = family
            .series
            .entry(label_key(labels))
            .or_insert_with(make)
            .value()
            .clone();
        Ok(series)
    }

    /// Render in Prometheus text exposition format (0.0.4).
    pub fn render(&self) -> String {
        let mut names: Vec<&'static str> = self.families.iter().map(|f| *f.key()).collect();
        names.sort_unstable();

        let mut out = String::new();
        for name in names {
            let Some(family) = self.families.get(name) else {
                continue;
            };
            let _ = writeln!(out, "# HELP {} {}", name, family.help);
            let _ = writeln!(out, "# TYPE {} {}", name, family.kind.as_str());

            let mut series: Vec<(LabelKey, Series)> = family
                .series
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect();
            series.sort_by(|a, b| a.0.cmp(&b.0));

            for (key, s) in series {
                let labels = label_str(&key);
                match s {
                    Series::Counter(c) => {
                        let _ = writeln!(out, "{} {}", series_name(name, &labels), c.get());
                    }
                    Series::Gauge(f) => {
                        let _ = writeln!(out, "{} {}", series_name(name, &labels), f());
                    }
                    Series::Histogram(t) => render_histogram(name, &labels, &t, &mut out),
                }
            }
        }
        out
    }
}

fn render_histogram(name: &str, labels: &str, t: &Timer, out: &mut String) {
    let prefix = if labels.is_empty() {
        String::new()
    } else {
        format!("{labels},")
    };
    for (bucket, &le) in t.0.buckets.iter().zip(BUCKETS_MICROS.iter()) {
        let le_secs = le as f64 / 1_000_000.0;
        let _ = writeln!(
            out,
            "{}_bucket{{{}le=\"{}\"}} {}",
            name,
            prefix,
            le_secs,
            bucket.load(Ordering::Relaxed)
        );
    }
    let count = t.count();
    let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);
    let _ = writeln!(
        out,
        "{} {}",
        series_name(&format!("{name}_sum"), labels),
        t.sum().as_secs_f64()
    );
    let _ = writeln!(out, "{} {}", series_name(&format!("{name}_count"), labels), count);
}

fn kind_mismatch(name: &str) -> ProbeError {
    ProbeError::Internal(format!("metric {name} already registered with another type"))
}
