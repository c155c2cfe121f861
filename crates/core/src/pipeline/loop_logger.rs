use std::collections::HashMap;
use std::time::Instant;

/// Observer for main-loop timings and metrics.
///
/// Keeps the use case free of any particular output mechanism.
pub trait LoopLogger {
    /// Marks the end of one capture/detect/display/report iteration.
    fn iteration(&mut self, index: usize);

    /// Record how long a named stage took in the current iteration.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces in the current frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Emit an end-of-loop summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event. Used by tests where logger output is irrelevant.
pub struct NullLoopLogger;

impl LoopLogger for NullLoopLogger {
    fn iteration(&mut self, _index: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
}

/// Aggregates per-stage timings and metrics and logs a summary when the
/// loop stops.
///
/// A heartbeat is logged at debug level every `heartbeat_iterations`.
pub struct SummaryLoopLogger {
    heartbeat_iterations: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    iterations: usize,
}

impl SummaryLoopLogger {
    pub fn new(heartbeat_iterations: usize) -> Self {
        Self {
            heartbeat_iterations: heartbeat_iterations.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            iterations: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let iterations = self.iterations;
        let mut lines = vec![format!(
            "Loop summary ({iterations} iterations, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = average(durations);
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: avg {:.1}", average(&self.metrics[name])));
        }

        if iterations > 0 && elapsed_ms > 0.0 {
            let fps = iterations as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for SummaryLoopLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl LoopLogger for SummaryLoopLogger {
    fn iteration(&mut self, index: usize) {
        self.iterations = index + 1;
        if self.iterations % self.heartbeat_iterations == 0 {
            log::debug!("Processed {} frames", self.iterations);
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
