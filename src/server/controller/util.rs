use axum::http::HeaderMap;

/// Extracts the client's source address from the forwarding header, falling
/// back to "unknown" so rate limit keys always exist.
///
/// Only the first (client-most) entry of a comma-separated list counts.
pub fn client_addr(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}
