//! Tracing subscriber setup.
//!
//! Library crates only emit events; the subscriber is installed once, here, by
//! the binary.

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default directives when `RUST_LOG` is not set.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("cc_core={level}"),
        format!("cc_app={level}"),
        format!("cc_infra={level}"),
    ]
}

/// Install the global subscriber: an env filter and one stdout fmt layer.
///
/// Returns `Err` when a subscriber is already registered. Call this once from
/// `main` before anything logs.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_development()).join(",")));

    let stdout_layer = fmt::layer()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)));

    registry().with(env_filter).with(stdout_layer).try_init()?;

    Ok(())
}
