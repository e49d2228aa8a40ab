//! Rolling File Logger
//!
//! A `tracing` subscriber that writes to a size-capped log file, moves full
//! files aside under a timestamped name and keeps the latest lines in a
//! circular buffer so the app can show them without touching the disk.
//!
//! `log` records are bridged through `tracing-subscriber`, so callers can use
//! either `log::info!` or the helpers in this crate.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::MakeWriter;

/// Active file is rotated once it would grow past this size
pub const DEFAULT_MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;
/// Number of rotated files kept next to the active one
pub const DEFAULT_MAX_ARCHIVES: usize = 5;
/// Lines kept in the in-memory ring buffer
pub const DEFAULT_BUFFER_LINES: usize = 500;

static SINK: OnceLock<LogSink> = OnceLock::new();

/// Tuning knobs for the sink
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub max_file_bytes: u64,
    pub max_archives: usize,
    pub buffer_lines: usize,
    /// Mirror every line to stderr (useful in `tauri dev`)
    pub echo_stderr: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_archives: DEFAULT_MAX_ARCHIVES,
            buffer_lines: DEFAULT_BUFFER_LINES,
            echo_stderr: cfg!(debug_assertions),
        }
    }
}

/// Shared handle to the log file and ring buffer
#[derive(Clone)]
pub struct LogSink {
    inner: Arc<Mutex<SinkInner>>,
}

struct SinkInner {
    dir: PathBuf,
    app_name: String,
    file: File,
    written: u64,
    pending: Vec<u8>,
    recent: VecDeque<String>,
    options: LoggerOptions,
}

impl LogSink {
    /// Open (or append to) `<dir>/<app_name>.log`
    pub fn open(dir: impl AsRef<Path>, app_name: &str, options: LoggerOptions) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(SinkInner {
                dir,
                app_name: app_name.to_string(),
                file,
                written,
                pending: Vec::new(),
                recent: VecDeque::with_capacity(options.buffer_lines),
                options,
            })),
        })
    }

    /// Path of the file currently being written
    pub fn log_path(&self) -> PathBuf {
        match self.inner.lock() {
            Ok(inner) => inner.active_path(),
            Err(poisoned) => poisoned.into_inner().active_path(),
        }
    }

    /// Snapshot of the most recent complete lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(inner) => inner.recent.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log sink poisoned"))?;
        inner.write_bytes(buf)
    }

    fn flush(&self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log sink poisoned"))?;
        inner.file.flush()
    }
}

impl SinkInner {
    fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.options.max_file_bytes {
            self.rotate()?;
        }

        self.file.write_all(buf)?;
        self.written += buf.len() as u64;

        if self.options.echo_stderr {
            let _ = io::stderr().write_all(buf);
        }

        self.remember(buf);
        Ok(())
    }

    /// Split incoming bytes into lines for the ring buffer
    fn remember(&mut self, buf: &[u8]) {
        if self.options.buffer_lines == 0 {
            return;
        }

        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();

            if self.recent.len() == self.options.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(text);
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        let archived = self.dir.join(format!("{}.{}.log", self.app_name, stamp));
        fs::rename(self.active_path(), &archived)?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path())?;
        self.written = 0;

        self.prune_archives()
    }

    /// Archive names embed a sortable timestamp, so lexical order is age order
    fn prune_archives(&self) -> io::Result<()> {
        let prefix = format!("{}.", self.app_name);
        let active = format!("{}.log", self.app_name);

        let mut archives: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| {
                        name != active && name.starts_with(&prefix) && name.ends_with(".log")
                    })
            })
            .collect();
        archives.sort();

        while archives.len() > self.options.max_archives {
            fs::remove_file(archives.remove(0))?;
        }
        Ok(())
    }
}

/// Per-event writer handed out to `tracing-subscriber`
pub struct SinkWriter {
    sink: LogSink,
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter { sink: self.clone() }
    }
}

/// Install the global subscriber with default options
pub fn init_logger(dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    init_logger_with(dir, app_name, LoggerOptions::default())
}

/// Install the global subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_logger_with(
    dir: impl AsRef<Path>,
    app_name: &str,
    options: LoggerOptions,
) -> Result<(), String> {
    let sink = LogSink::open(dir, app_name, options)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    subscriber_builder(sink.clone())
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    SINK.set(sink)
        .map_err(|_| "Logger already initialized".to_string())
}

/// Line format shared by the global subscriber and scoped ones
fn subscriber_builder(
    sink: LogSink,
) -> tracing_subscriber::fmt::SubscriberBuilder<
    tracing_subscriber::fmt::format::DefaultFields,
    tracing_subscriber::fmt::format::Format,
    tracing::level_filters::LevelFilter,
    LogSink,
> {
    tracing_subscriber::fmt()
        .with_writer(sink)
        .with_ansi(false)
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
}

fn emit(level: tracing::Level, message: &str) {
    match level {
        tracing::Level::ERROR => tracing::error!("{}", message),
        tracing::Level::WARN => tracing::warn!("{}", message),
        _ => tracing::info!("{}", message),
    }
}

pub fn info(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    emit(tracing::Level::INFO, message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    emit(tracing::Level::WARN, message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    emit(tracing::Level::ERROR, message);
    Ok(())
}

/// Path of the active log file, if the logger is running
pub fn log_path() -> Option<PathBuf> {
    SINK.get().map(LogSink::log_path)
}

fn ensure_initialized() -> Result<(), String> {
    if SINK.get().is_some() {
        Ok(())
    } else {
        Err("Logger not initialized".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(max_file_bytes: u64, max_archives: usize, buffer_lines: usize) -> LoggerOptions {
        LoggerOptions {
            max_file_bytes,
            max_archives,
            buffer_lines,
            echo_stderr: false,
        }
    }

    #[test]
    fn test_ring_buffer_keeps_latest_lines() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::open(dir.path(), "Pantry", quiet(1024 * 1024, 2, 3)).unwrap();
        let mut writer = sink.make_writer();

        for i in 0..5 {
            writeln!(writer, "line {}", i).unwrap();
        }

        assert_eq!(sink.recent_lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_partial_lines_wait_for_newline() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::open(dir.path(), "Pantry", quiet(1024 * 1024, 2, 10)).unwrap();
        let mut writer = sink.make_writer();

        write!(writer, "half").unwrap();
        assert!(sink.recent_lines().is_empty());

        writeln!(writer, " done").unwrap();
        assert_eq!(sink.recent_lines(), vec!["half done"]);
    }

    #[test]
    fn test_rotation_and_pruning() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::open(dir.path(), "Pantry", quiet(16, 2, 10)).unwrap();
        let mut writer = sink.make_writer();

        for i in 0..6 {
            writeln!(writer, "entry number {}", i).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let active = std::fs::read_to_string(sink.log_path()).unwrap();
        assert_eq!(active, "entry number 5\n");

        let archives = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy() != "Pantry.log")
            .count();
        assert!(archives <= 2, "expected at most 2 archives, found {}", archives);
        assert!(archives >= 1);
    }

    #[test]
    fn test_events_land_in_owned_sink() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::open(dir.path(), "Pantry", quiet(1024 * 1024, 2, 10)).unwrap();
        let subscriber = subscriber_builder(sink.clone()).finish();

        tracing::subscriber::with_default(subscriber, || {
            emit(tracing::Level::INFO, "database ready");
            emit(tracing::Level::WARN, "slow query");
            emit(tracing::Level::ERROR, "open failed");
            tracing::debug!("below the level filter");
        });

        let lines = sink.recent_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("INFO") && lines[0].ends_with("database ready"));
        assert!(lines[1].contains("WARN") && lines[1].ends_with("slow query"));
        assert!(lines[2].contains("ERROR") && lines[2].ends_with("open failed"));

        let on_disk = std::fs::read_to_string(sink.log_path()).unwrap();
        assert_eq!(on_disk.lines().count(), 3);
    }

    // Nothing in this test binary installs the global logger
    #[test]
    fn test_helpers_fail_before_init() {
        assert_eq!(info("not yet"), Err("Logger not initialized".to_string()));
        assert!(warn("not yet").is_err());
        assert!(error("not yet").is_err());
        assert!(log_path().is_none());
    }
}
