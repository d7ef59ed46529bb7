//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start rolling file logs once per process.
//! - Capture panics as sanitized log events before the default hook runs.
//!
//! # Invariants
//! - Repeated init with identical arguments is a no-op.
//! - Re-init with a different level or directory is rejected, never applied.
//! - Init never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "swipedeck";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: LogLevel,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Supported log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a case-insensitive level name; `warning` is accepted for `warn`.
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LoggingError::UnsupportedLevel(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging bootstrap failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyDir,
    RelativeDir(String),
    CreateDir { dir: PathBuf, reason: String },
    Backend(String),
    LevelConflict { active: LogLevel, requested: LogLevel },
    DirConflict { active: PathBuf, requested: PathBuf },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeDir(value) => {
                write!(f, "log_dir must be an absolute path, got `{value}`")
            }
            Self::CreateDir { dir, reason } => write!(
                f,
                "failed to create log directory `{}`: {reason}",
                dir.display()
            ),
            Self::Backend(reason) => write!(f, "failed to start logger: {reason}"),
            Self::LevelConflict { active, requested } => write!(
                f,
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                active.as_str(),
                requested.as_str()
            ),
            Self::DirConflict { active, requested } => write!(
                f,
                "logging already initialized at `{}`; refusing to switch to `{}`",
                active.display(),
                requested.display()
            ),
        }
    }
}

impl Error for LoggingError {}

/// Initializes file logging at `log_dir` with `level`.
///
/// # Errors
/// - Unsupported level, empty or relative directory.
/// - Directory creation or logger backend failure.
/// - A previous successful init used a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let level = LogLevel::parse(level)?;
    let dir = parse_log_dir(log_dir)?;

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(level, &dir))?;
    if active.dir != dir {
        return Err(LoggingError::DirConflict {
            active: active.dir.clone(),
            requested: dir,
        });
    }
    if active.level != level {
        return Err(LoggingError::LevelConflict {
            active: active.level,
            requested: level,
        });
    }
    Ok(())
}

/// Returns `(level, dir)` of the active logger, if any.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.level.as_str(), active.dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        LogLevel::Debug.as_str()
    } else {
        LogLevel::Info.as_str()
    }
}

fn start_logger(level: LogLevel, dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|err| LoggingError::CreateDir {
        dir: dir.to_path_buf(),
        reason: err.to_string(),
    })?;

    let handle = Logger::try_with_str(level.as_str())
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();
    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={}",
        level.as_str(),
        dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

fn parse_log_dir(raw: &str) -> Result<PathBuf, LoggingError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::EmptyDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::RelativeDir(trimmed.to_string()));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location,
            sanitize(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous(info);
    }));
}

/// Flattens newlines and caps length so one panic is one log line.
fn sanitize(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    let mut out: String = flat.chars().take(max_chars).collect();
    if flat.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, parse_log_dir, sanitize, LogLevel, LoggingError};

    #[test]
    fn level_parse_is_case_insensitive_with_warning_alias() {
        assert_eq!(LogLevel::parse("INFO"), Ok(LogLevel::Info));
        assert_eq!(LogLevel::parse(" warning "), Ok(LogLevel::Warn));
        assert!(matches!(
            LogLevel::parse("verbose"),
            Err(LoggingError::UnsupportedLevel(_))
        ));
    }

    #[test]
    fn log_dir_must_be_absolute_and_non_empty() {
        assert_eq!(parse_log_dir("  "), Err(LoggingError::EmptyDir));
        assert!(matches!(
            parse_log_dir("logs/dev"),
            Err(LoggingError::RelativeDir(_))
        ));
    }

    #[test]
    fn sanitize_flattens_and_truncates() {
        let out = sanitize("line1\nline2\rline3", 8);
        assert!(!out.contains('\n'));
        assert!(!out.contains('\r'));
        assert!(out.ends_with("..."));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let first = tempfile::tempdir().expect("temp dir");
        let second = tempfile::tempdir().expect("temp dir");
        let first_dir = first.path().to_str().expect("utf-8 temp dir").to_string();
        let second_dir = second.path().to_str().expect("utf-8 temp dir").to_string();

        init_logging("info", &first_dir).expect("first init");
        init_logging("INFO", &first_dir).expect("same config is idempotent");

        let err = init_logging("debug", &first_dir).expect_err("level conflict");
        assert!(matches!(err, LoggingError::LevelConflict { .. }));
        let err = init_logging("info", &second_dir).expect_err("dir conflict");
        assert!(err.to_string().contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging active");
        assert_eq!(level, "info");
        assert_eq!(dir, first.path());
    }
}
