use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::process_transcript;

/// Median and 95th-percentile wall-clock latency of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyReport {
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub n: usize,
}

/// Run [`process_transcript`] `iterations` times and summarise the timings.
pub fn measure_pipeline_latency(transcript: &str, iterations: usize) -> LatencyReport {
    let mut samples: Vec<f64> = (0..iterations)
        .map(|_| {
            let start = Instant::now();
            let anchored = process_transcript(transcript);
            let elapsed = start.elapsed();
            std::hint::black_box(anchored);
            elapsed.as_secs_f64() * 1000.0
        })
        .collect();
    samples.sort_by(f64::total_cmp);

    let report = LatencyReport {
        p50_ms: percentile(&samples, 0.50),
        p95_ms: percentile(&samples, 0.95),
        n: samples.len(),
    };
    tracing::info!(p50_ms = report.p50_ms, p95_ms = report.p95_ms, n = report.n, "Pipeline latency");
    report
}

/// Linear-interpolated percentile over ascending samples; 0.0 when empty.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let rank = q.clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}
