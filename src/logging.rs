//! Tracing setup for the command-line binary
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary (or to whatever embeds the library).

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Default filter when `RUST_LOG` is not set.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "foam_agent_mcp=debug,foam_agent_config=debug,foam_agent_runner=debug,info"
    } else {
        "foam_agent_mcp=info,warn"
    }
}

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbose`. Stdout is left alone so it
/// only ever carries the job log or JSON report.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .compact();

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_target(true).with_span_events(FmtSpan::CLOSE))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_target(false))
            .try_init()?;
    }

    Ok(())
}
