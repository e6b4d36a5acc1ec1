//! Client address extraction from HTTP request headers.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the client IP for a request.
///
/// Precedence:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. IP of the peer socket address
///
/// Header values are trimmed; blank or non-UTF-8 values are skipped.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = client_ip(&headers, "127.0.0.1:5000".parse().unwrap());
/// assert_eq!(ip, "203.0.113.7");
/// ```
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    header_value(headers, X_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header_value(headers, X_REAL_IP))
        .map(String::from)
        .unwrap_or_else(|| peer.ip().to_string())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
