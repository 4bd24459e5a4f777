//! Prometheus metrics for the feed service

use std::time::Duration;

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, Encoder, Histogram,
    HistogramVec, IntCounterVec, TextEncoder,
};

static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_service_http_requests_total",
        "Total HTTP requests handled by feed-service",
        &["method", "path", "status"]
    )
    .expect("Failed to register feed_service_http_requests_total")
});

static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "feed_service_http_request_duration_seconds",
        "HTTP request latency for feed-service",
        &["method", "path", "status"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("Failed to register feed_service_http_request_duration_seconds")
});

static FEED_KEYWORDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "feed_personalized_keywords",
        "Size of the keyword set built per personalized feed request",
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]
    )
    .expect("Failed to register feed_personalized_keywords")
});

static FEED_CANDIDATES: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "feed_personalized_candidates",
        "Number of candidate notes ranked per personalized feed request",
        vec![0.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0]
    )
    .expect("Failed to register feed_personalized_candidates")
});

static FEED_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_personalized_requests_total",
        "Personalized feed builds by mode (ranked/cold_start) and status",
        &["mode", "status"]
    )
    .expect("Failed to register feed_personalized_requests_total")
});

/// Path label for requests that matched no route
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Route template used as the `path` label, keeping label cardinality bounded
pub fn route_label(match_pattern: Option<String>) -> String {
    match_pattern.unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

pub fn observe_http_request(method: &str, path: &str, status: u16, elapsed: Duration) {
    let status_label = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status_label])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path, &status_label])
        .observe(elapsed.as_secs_f64());
}

/// Record the shape of one ranking pass
pub fn observe_feed_ranking(keyword_count: usize, candidate_count: usize) {
    FEED_KEYWORDS.observe(keyword_count as f64);
    FEED_CANDIDATES.observe(candidate_count as f64);
}

/// Record a finished feed build ("ranked" or "cold_start", "success" or "error")
pub fn record_feed_request(mode: &str, status: &str) {
    FEED_REQUESTS_TOTAL.with_label_values(&[mode, status]).inc();
}

pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_label_uses_template() {
        assert_eq!(
            route_label(Some("/feed/personalizedfeed/{user_id}".to_string())),
            "/feed/personalizedfeed/{user_id}"
        );
    }

    #[test]
    fn test_unmatched_requests_share_one_label() {
        assert_eq!(route_label(None), UNMATCHED_ROUTE);
    }
}
