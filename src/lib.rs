#[macro_use]
extern crate tracing;

pub mod grid;
pub mod locator;
pub mod parsing;
pub mod particles;
pub mod prelude;
pub mod profile;
pub mod report;
pub mod sweep;

/// Floating point type used for grid points and particle positions.
pub type Float = f64;

pub fn parse_log_level(level: &str, default: tracing::Level) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "trace" => tracing::Level::TRACE,
        "error" => tracing::Level::ERROR,
        "debug" => tracing::Level::DEBUG,
        _ => default,
    }
}

pub fn init_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
