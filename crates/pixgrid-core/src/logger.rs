//! Logging setup.
//!
//! `init_with_level` installs a stderr logger that prefixes every record with
//! the time since installation, the level and the emitting module:
//! `[  0.012s  INFO pixgrid_lines::detector] ...`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Only the first call installs the logger; later calls are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Output flavour for [`init_tracing`].
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceFormat {
    #[default]
    Pretty,
    Json,
}

/// Install a `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise records up to `default_level` pass.
/// Span close events carry timing for the instrumented pipeline stages, and
/// `log` records are forwarded into the subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing(format: TraceFormat, default_level: LevelFilter) {
    let filter = tracing_filter(default_level);
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let _ = match format {
        TraceFormat::Json => builder.json().flatten_event(true).finish().try_init(),
        TraceFormat::Pretty => builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init(),
    };
    // No-op when the subscriber already installed the bridge.
    let _ = tracing_log::LogTracer::init();
}

#[cfg(feature = "tracing")]
fn tracing_filter(default_level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_ascii_lowercase()))
}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;

    #[test]
    fn filter_falls_back_to_the_requested_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(tracing_filter(LevelFilter::Debug).to_string(), "debug");
        assert_eq!(tracing_filter(LevelFilter::Info).to_string(), "info");
    }
}
