use axum::http::HeaderMap;

/// Extract a trace id for problem responses: `x-request-id` first, then `x-trace-id`.
pub fn extract_trace_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .or_else(|| headers.get("x-trace-id"))
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn prefers_request_id() {
        let mut h = HeaderMap::new();
        h.insert("x-trace-id", HeaderValue::from_static("t-1"));
        assert_eq!(extract_trace_id(&h).as_deref(), Some("t-1"));
        h.insert("x-request-id", HeaderValue::from_static("r-1"));
        assert_eq!(extract_trace_id(&h).as_deref(), Some("r-1"));
    }

    #[test]
    fn missing_headers_yield_none() {
        assert!(extract_trace_id(&HeaderMap::new()).is_none());
    }
}
