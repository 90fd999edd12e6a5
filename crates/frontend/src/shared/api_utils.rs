//! API utilities for frontend-backend communication
//!
//! The backend address is taken from the `BASE_URL` environment variable at
//! build time. Without it, the current window location is used with port 3000.

use once_cell::sync::Lazy;

static API_BASE: Lazy<String> = Lazy::new(|| match option_env!("BASE_URL") {
    Some(base) if !base.trim().is_empty() => normalize_base(base),
    _ => normalize_base(&location_base()),
});

fn location_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// Get the base URL for API requests, without a trailing slash.
pub fn api_base() -> &'static str {
    API_BASE.as_str()
}

/// Build a full API URL from a path such as `/expense?page=1&limit=10`.
pub fn api_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", api_base(), path)
    } else {
        format!("{}/{}", api_base(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(" https://api.clinic.test/ "), "https://api.clinic.test");
        assert_eq!(normalize_base("http://localhost:3000"), "http://localhost:3000");
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(api_url("https://other.test/x"), "https://other.test/x");
    }
}
