//! Client identity resolution.
//!
//! # Responsibilities
//! - Extract the caller address from trusted proxy headers
//! - Reduce it to a stable pseudonymous hash for logging and counters
//!
//! # Design Decisions
//! - Header precedence is fixed; the first address wins when a header
//!   chains several
//! - The hash is a pseudonymization convenience, not a security control

use axum::http::HeaderMap;

/// Proxy headers consulted for the caller address, in trust order.
const ADDRESS_HEADERS: [&str; 3] = ["cf-connecting-ip", "x-real-ip", "x-forwarded-for"];

/// Resolve the client address from proxy headers, or `"unknown"`.
pub fn client_ip(headers: &HeaderMap) -> String {
    for name in ADDRESS_HEADERS {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }
    "unknown".to_string()
}

/// Stable one-way hash of an address, rendered as lowercase hex.
///
/// 32-bit rolling hash (h = h*31 + c). Collisions are acceptable: the
/// value only keys rate-limit windows and pseudonymizes logs.
pub fn hash_ip(ip: &str) -> String {
    let mut hash: i32 = 0;
    for c in ip.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as i32);
    }
    format!("{:x}", (hash as i64).abs())
}
