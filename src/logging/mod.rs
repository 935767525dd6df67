//! Output and diagnostics for the `holidaze` binary.
//!
//! Command results are printed to stdout and problems to stderr, so listings
//! can be piped. With file logging on, each run appends to its own
//! `holidaze-<stamp>.log` under the log directory. That file is opened on the
//! first file-targeted line, so runs that log nothing leave no file behind.


use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;

const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub enum LogTarget {
    /// Feedback that only matters to whoever is at the terminal.
    ConsoleOnly,
    #[default]
    ConsoleAndFile,
    /// Request traces, skipped records and rejected stays.
    FileOnly,
}

enum Console {
    Terminal,
    Capture(Mutex<Vec<(LogLevel, String)>>),
}

impl Console {
    fn write(&self, level: LogLevel, line: &str) {
        match self {
            Console::Terminal if level == LogLevel::Info => println!("{line}"),
            Console::Terminal => eprintln!("{line}"),
            Console::Capture(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push((level, line.to_string()));
                }
            }
        }
    }
}

enum FileState {
    Pending,
    Open { file: File, path: PathBuf },
    Unavailable,
}

struct LogFile {
    dir: PathBuf,
    state: FileState,
}

impl LogFile {
    fn in_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            state: FileState::Pending,
        }
    }

    fn open(dir: &Path) -> io::Result<(File, PathBuf)> {
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("holidaze-{stamp}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok((file, path))
    }

    fn append(&mut self, level: LogLevel, message: &str) {
        if matches!(self.state, FileState::Pending) {
            self.state = match Self::open(&self.dir) {
                Ok((file, path)) => FileState::Open { file, path },
                Err(err) => {
                    eprintln!("WARN: File logging unavailable; continuing without a log file. ({err})");
                    FileState::Unavailable
                }
            };
        }
        if let FileState::Open { file, .. } = &mut self.state {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(file, "[{stamp}] {level:<5} {message}");
        }
    }

    fn path(&self) -> Option<PathBuf> {
        match &self.state {
            FileState::Open { path, .. } => Some(path.clone()),
            _ => None,
        }
    }
}

/// Shared by the context, the session, the API client and observers.
/// Clones write to the same console and the same log file.
#[derive(Clone)]
pub struct Logger {
    console: Arc<Console>,
    file: Arc<Mutex<LogFile>>,
    file_enabled: Arc<AtomicBool>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::console()
    }
}

impl Logger {
    fn build(console: Console, dir: PathBuf, file_enabled: bool) -> Self {
        Self {
            console: Arc::new(console),
            file: Arc::new(Mutex::new(LogFile::in_dir(dir))),
            file_enabled: Arc::new(AtomicBool::new(file_enabled)),
        }
    }

    /// Terminal output only. Used before a configuration is loaded.
    pub fn console() -> Self {
        Self::build(Console::Terminal, PathBuf::from(DEFAULT_LOG_DIR), false)
    }

    /// Terminal output plus a run log under `dir`.
    pub fn with_log_dir(dir: impl AsRef<Path>, file_enabled: bool) -> Self {
        Self::build(Console::Terminal, dir.as_ref().to_path_buf(), file_enabled)
    }

    /// Keeps console lines in memory for `captured()`. File logging starts off.
    pub fn capturing() -> Self {
        Self::build(
            Console::Capture(Mutex::new(Vec::new())),
            PathBuf::from(DEFAULT_LOG_DIR),
            false,
        )
    }

    fn log(&self, level: LogLevel, message: &str, target: LogTarget) {
        if matches!(target, LogTarget::ConsoleOnly | LogTarget::ConsoleAndFile) {
            self.console.write(level, message);
        }
        if matches!(target, LogTarget::ConsoleAndFile | LogTarget::FileOnly)
            && self.file_enabled.load(Ordering::SeqCst)
        {
            if let Ok(mut file) = self.file.lock() {
                file.append(level, message);
            }
        }
    }

    pub fn info(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Info, message.as_ref(), target);
    }

    pub fn warn(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Warn, message.as_ref(), target);
    }

    pub fn error(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Error, message.as_ref(), target);
    }

    /// Follows FILE_LOGGING_ENABLED; can be flipped mid-run by `config`.
    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.file_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Ignored once the log file has been opened.
    pub fn set_log_dir(&self, dir: impl AsRef<Path>) {
        if let Ok(mut file) = self.file.lock() {
            if matches!(file.state, FileState::Pending) {
                file.dir = dir.as_ref().to_path_buf();
            }
        }
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.file.lock().ok().map(|f| f.dir.clone())
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.file.lock().ok().and_then(|f| f.path())
    }

    /// Console lines seen by a `capturing()` logger, oldest first.
    pub fn captured(&self) -> Vec<(LogLevel, String)> {
        match self.console.as_ref() {
            Console::Capture(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
            Console::Terminal => Vec::new(),
        }
    }

    pub fn captured_text(&self) -> String {
        self.captured()
            .into_iter()
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("log_path", &self.log_path())
            .finish()
    }
}
