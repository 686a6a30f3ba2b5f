use metrics::{counter, histogram};
use std::time::Instant;

pub fn increment_blog_created() {
    counter!("blogs_created_total").increment(1);
}

pub fn increment_blog_deleted() {
    counter!("blogs_deleted_total").increment(1);
}

pub fn increment_user_created() {
    counter!("users_created_total").increment(1);
}

/// Track HTTP request latency, labelled by route, method and status.
pub fn track_http_request(start: Instant, path: &str, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "path" => path.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
    counter!("http_requests_total", "method" => method.to_string(), "status" => status.to_string())
        .increment(1);
}
