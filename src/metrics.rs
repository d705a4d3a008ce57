use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
///
/// Fails if a global recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "rent_analyzer_requests_total",
        "Total number of API requests by endpoint"
    );
    describe_counter!(
        "rent_analyzer_errors_total",
        "Total number of failed API requests"
    );
    describe_histogram!(
        "rent_analyzer_prediction_duration_seconds",
        "Time spent producing a cost prediction"
    );
    describe_gauge!(
        "rent_analyzer_info",
        "Service version information"
    );

    gauge!("rent_analyzer_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a request
pub fn record_request(endpoint: &'static str) {
    counter!("rent_analyzer_requests_total", "endpoint" => endpoint).increment(1);
}

/// Record an error response
pub fn record_error(error_type: &'static str) {
    counter!("rent_analyzer_errors_total", "error_type" => error_type).increment(1);
}

/// Record prediction latency, including the configured pacing delay
pub fn record_prediction_duration(duration: Duration) {
    histogram!("rent_analyzer_prediction_duration_seconds").record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            init_metric_descriptions();
            record_request("/heatmap");
            record_request("/heatmap");
            record_error("invalid_input");
            record_prediction_duration(Duration::from_millis(120));
        });

        let rendered = handle.render();
        assert!(rendered.contains("rent_analyzer_requests_total{endpoint=\"/heatmap\"} 2"));
        assert!(rendered.contains("rent_analyzer_errors_total"));
        assert!(rendered.contains("rent_analyzer_prediction_duration_seconds"));
    }
}
