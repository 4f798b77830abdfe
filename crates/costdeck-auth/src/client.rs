//! Client label derivation from the User-Agent header.

/// Derives a coarse browser family label from a User-Agent string.
///
/// Order matters: Chrome-family agents also advertise "safari", and Edge
/// and Opera also advertise "chrome".
pub fn client_label(user_agent: Option<&str>) -> &'static str {
    let Some(ua) = user_agent else {
        return "Unknown";
    };
    let ua = ua.to_lowercase();

    if ua.contains("firefox") {
        "Firefox"
    } else if ua.contains("edg") {
        "Edge"
    } else if ua.contains("opera") || ua.contains("opr") {
        "Opera"
    } else if ua.contains("chrome") {
        "Chrome"
    } else if ua.contains("safari") {
        "Safari"
    } else {
        "Unknown"
    }
}
