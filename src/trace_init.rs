//! JSON-lines sink for engine spans, compiled in with the `trace` feature.

use std::io;
use std::path::{Path, PathBuf};

/// Name of the trace file inside the log directory.
pub const TRACE_FILE: &str = "ac-trace.jsonl";

/// File that [`init_tracing`] appends to for `log_dir`.
pub fn trace_file(log_dir: &Path) -> PathBuf {
    log_dir.join(TRACE_FILE)
}

#[cfg(feature = "trace")]
mod sink {
    use std::io;
    use std::path::Path;
    use std::sync::OnceLock;

    use tracing_appender::non_blocking::WorkerGuard;
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    const DEFAULT_FILTER: &str = "ac_engine=debug,ac_core=debug";

    // Held for the life of the process so the writer thread keeps flushing.
    static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

    pub(super) fn install(log_dir: &Path) -> io::Result<()> {
        if GUARD.get().is_some() {
            return Ok(());
        }
        std::fs::create_dir_all(log_dir)?;
        let appender = tracing_appender::rolling::never(log_dir, super::TRACE_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init()
            .map_err(io::Error::other)?;
        let _ = GUARD.set(guard);
        Ok(())
    }
}

/// Routes engine spans and events to [`trace_file`]`(log_dir)`.
///
/// The first successful call installs the global subscriber; later calls are
/// no-ops. `RUST_LOG` overrides the default filter. Fails if the directory
/// cannot be created or another global subscriber is already set. Without
/// the `trace` feature this does nothing.
pub fn init_tracing(log_dir: &Path) -> io::Result<()> {
    #[cfg(feature = "trace")]
    {
        sink::install(log_dir)
    }
    #[cfg(not(feature = "trace"))]
    {
        let _ = log_dir;
        Ok(())
    }
}
