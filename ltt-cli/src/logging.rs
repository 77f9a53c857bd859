use anyhow::{Context, Result, anyhow};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

// --- Formatter ---

/// `<local time> <LEVEL> <file:line> <fields>`, coloured when ANSI is on.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        if ansi {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
        } else {
            write!(writer, "{timestamp} ")?;
        }

        let colour = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        if ansi {
            write!(writer, "{colour}{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{:>5} ", meta.level())?;
        }

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file
                .rsplit_once("src/")
                .or_else(|| file.rsplit_once("src\\"))
                .map_or(file, |(_, rest)| rest);
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

/// A MakeWriter whose target file can be swapped after initialization.
/// While no file is set, records are discarded.
#[derive(Clone, Default)]
struct FileSlot(Arc<Mutex<Option<File>>>);

impl FileSlot {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.lock())
    }
}

// --- Public API ---

/// Controls for the installed subscriber.
pub struct LoggingHandle {
    level: reload::Handle<EnvFilter, Registry>,
    file: FileSlot,
}

impl LoggingHandle {
    /// Changes the active filter. Accepts a bare level ("warn") or any
    /// `EnvFilter` directive.
    pub fn set_level(
        &self,
        level: &str,
    ) -> Result<()> {
        let filter = EnvFilter::try_new(level)
            .map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;
        self.level
            .reload(filter)
            .map_err(|e| anyhow!("filter reload failed: {e}"))
    }

    /// Starts appending records to `path`, replacing any open log file.
    /// The directory must already exist.
    pub fn enable_file_logging(
        &self,
        path: &Path,
    ) -> Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;
        *self.file.lock() = Some(file);
        Ok(())
    }

    /// Closes the current log file, if any.
    pub fn disable_file_logging(&self) {
        *self.file.lock() = None;
    }
}

/// Picks the filter: an explicit override, then `RUST_LOG`, then the
/// configured level.
fn make_filter(
    override_level: Option<&str>,
    configured: &str,
) -> Result<EnvFilter> {
    if let Some(level) = override_level {
        return EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"));
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(configured).map_err(|e| anyhow!("invalid log level '{configured}': {e}"))
}

/// Installs the global subscriber. Call once at startup.
///
/// - Console: stderr, coloured when attached to a terminal.
/// - File: opened from `config.file` if set, otherwise inactive until
///   [`LoggingHandle::enable_file_logging`] is called.
/// - Level: `override_level`, else `RUST_LOG`, else `config.level`.
pub fn init_logging(
    config: &LoggingConfig,
    override_level: Option<&str>,
) -> Result<LoggingHandle> {
    let (level_filter, level) = reload::Layer::new(make_filter(override_level, &config.level)?);
    let file = FileSlot::default();

    let console_layer = config.console.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(LocalFmt)
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(file.clone());

    tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("logging already initialized: {e}"))?;

    let handle = LoggingHandle { level, file };
    if let Some(path) = &config.file {
        handle.enable_file_logging(path)?;
    }
    Ok(handle)
}
