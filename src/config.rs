/// Application-level constants
pub const APP_NAME: &str = "Labsense";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tracing filter used when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "labsense=info"
}
