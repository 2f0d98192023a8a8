//! Metrics and observability utilities
//!
//! Provides Prometheus-compatible metrics with SLO-aligned histograms
//! and standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};

/// Metrics prefix for all actuaria metrics
pub const METRICS_PREFIX: &str = "actuaria";

/// SLO-aligned histogram buckets for routing latency (in seconds)
/// Targets: P50 < 50ms, P99 < 250ms (collaborator calls dominate)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.010, // 10ms
    0.025, // 25ms
    0.050, // 50ms - P50 target
    0.100, // 100ms
    0.250, // 250ms - P99 target
    0.500, // 500ms
    1.000, // 1s
    2.500, // 2.5s
    5.000, // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_queries_routed_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of queries routed, by classification"
    );

    describe_histogram!(
        format!("{}_route_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "End-to-end routing latency in seconds"
    );

    describe_counter!(
        format!("{}_engine_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Total collaborator failures, by engine"
    );

    describe_counter!(
        format!("{}_graph_lookups_total", METRICS_PREFIX),
        Unit::Count,
        "Total concept-graph lookups issued"
    );

    describe_gauge!(
        format!("{}_graph_nodes_returned", METRICS_PREFIX),
        Unit::Count,
        "Number of nodes returned by the last concept query"
    );

    describe_gauge!(
        format!("{}_route_step_count", METRICS_PREFIX),
        Unit::Count,
        "Number of derivation steps in the last routed response"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record a completed routing pass
pub fn record_route(duration_secs: f64, query_type: &str, step_count: usize) {
    counter!(
        format!("{}_queries_routed_total", METRICS_PREFIX),
        "query_type" => query_type.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_route_duration_seconds", METRICS_PREFIX),
        "query_type" => query_type.to_string()
    )
    .record(duration_secs);

    gauge!(
        format!("{}_route_step_count", METRICS_PREFIX),
        "query_type" => query_type.to_string()
    )
    .set(step_count as f64);
}

/// Helper to record a concept-graph lookup
pub fn record_graph_lookup(node_count: usize) {
    counter!(format!("{}_graph_lookups_total", METRICS_PREFIX)).increment(1);

    gauge!(format!("{}_graph_nodes_returned", METRICS_PREFIX)).set(node_count as f64);
}

/// Helper to record a collaborator failure
pub fn record_engine_failure(engine: &str) {
    counter!(
        format!("{}_engine_failures_total", METRICS_PREFIX),
        "engine" => engine.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets() {
        // Verify buckets are sorted and contain SLO targets
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }

        // P50 target (50ms) should be in buckets
        assert!(LATENCY_BUCKETS.contains(&0.050));
        // P99 target (250ms) should be in buckets
        assert!(LATENCY_BUCKETS.contains(&0.250));
    }

    #[test]
    fn test_record_helpers() {
        record_route(0.012, "COMPUTATIONAL", 2);
        record_graph_lookup(4);
        record_engine_failure("Symbolic Derivation Engine");
        // Just verify they run without panic
    }
}
