//! Cookie Management Infrastructure
//!
//! Parsing helpers for the raw `Cookie` header string an authenticated
//! browser session exports (`name=value; name2=value2; ...`).

/// Device identity cookie issued by the live site
pub const DEVICE_ID_COOKIE: &str = "LIVE_BUVID";

/// CSRF token cookie, echoed back in form bodies as `csrf` / `csrf_token`
pub const CSRF_COOKIE: &str = "bili_jct";

/// Extract a cookie value from a raw cookie string
///
/// Whitespace around each pair is ignored. The first pair with a matching
/// name wins.
pub fn extract_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let (key, value) = cookie.trim().split_once('=')?;

        if key.trim() == name {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

/// Extract the device identity (`LIVE_BUVID`) cookie
pub fn extract_device_id(cookies: &str) -> Option<String> {
    extract_cookie(cookies, DEVICE_ID_COOKIE).filter(|value| !value.is_empty())
}

/// Extract the CSRF token (`bili_jct`) cookie
pub fn extract_csrf(cookies: &str) -> Option<String> {
    extract_cookie(cookies, CSRF_COOKIE).filter(|value| !value.is_empty())
}
