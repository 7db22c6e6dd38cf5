//! Logging setup
//!
//! CLI mode logs to stderr. The TUI owns the terminal, so it logs to a
//! daily-rotated file under the data directory instead.

use anyhow::Result;
use std::io;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Directory for `blip.log.<date>` files
    File(PathBuf),
}

/// Default log directory (~/.local/share/blip)
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("blip"))
}

/// Filter directive for the given verbosity
///
/// 0 = info, 1 = debug (hyper noise suppressed), 2+ = trace, quiet = error
pub fn filter_directive(verbose_level: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose_level {
        0 => "info",
        1 => "debug,hyper::proto::h1=warn,hyper_util::client=warn",
        _ => "trace",
    }
}

pub fn init(verbose_level: u8, quiet: bool, target: LogTarget) -> Result<()> {
    // RUST_LOG wins unless the user asked for something explicit
    let filter = if quiet || verbose_level > 0 {
        EnvFilter::new(filter_directive(verbose_level, quiet))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(0, false)))
    };

    let registry = Registry::default().with(filter);

    match target {
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(io::stderr);
            registry.with(layer).try_init()?;
        }
        LogTarget::File(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, &dir, "blip.log");
            let layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(appender);
            registry.with(layer).try_init()?;
        }
    }

    Ok(())
}
