//! User-Agent classification for visit analytics.

/// Browser family for a User-Agent string.
///
/// Checked in priority order, so Chromium-based agents that also mention Safari
/// are reported as `Chrome`.
pub fn classify_browser(user_agent: &str) -> &'static str {
    if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "Unknown"
    }
}

/// `Mobile` if the agent says so, `Desktop` otherwise.
pub fn classify_device(user_agent: &str) -> &'static str {
    if user_agent.contains("Mobile") {
        "Mobile"
    } else {
        "Desktop"
    }
}
