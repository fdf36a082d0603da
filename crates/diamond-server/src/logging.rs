use tracing_subscriber::EnvFilter;

/// Map a `LOG_LEVEL` value onto a tracing level directive.
///
/// Accepts tracing's names as well as the conventional `WARNING`, `CRITICAL`,
/// `FATAL` and `NOTSET`, case-insensitively. Returns `None` for anything else.
pub fn level_directive(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" | "notset" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" | "critical" | "fatal" => Some("error"),
        "off" => Some("off"),
        _ => None,
    }
}

/// Filter for our crates and `tower_http` at `level` (a value from [`level_directive`]).
pub fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("diamond={level},tower_http={level}"))
}
