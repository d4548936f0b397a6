use crate::{
    config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
    error::{QrError, Result},
};
use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

static CONSOLE_LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);
static INSTALLED: OnceCell<()> = OnceCell::new();

pub fn init() -> Result<()> {
    init_with_config(LoggerConfig::default())
}

/// Installs the console logger, or reconfigures it if already installed.
pub fn init_with_config(config: LoggerConfig) -> Result<()> {
    let max_level = config.min_level.to_level_filter();
    CONSOLE_LOGGER.configure(config)?;

    INSTALLED.get_or_try_init(|| {
        log::set_logger(&*CONSOLE_LOGGER)
            .map_err(|e| QrError::ConfigError(format!("Failed to set logger: {}", e)))
    })?;

    log::set_max_level(max_level);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐛",
            LogLevel::Info => "💡",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }

    fn admits(&self, level: Level) -> bool {
        level <= self.to_level_filter()
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

/// One rendered log line, also the JSON shape of `output_json` mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub target: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl LogEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level: record.level().into(),
            message: record.args().to_string(),
            target: record.target().to_string(),
            file: record.file().map(str::to_string),
            line: record.line(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_emojis: bool,
    pub show_target: bool,
    pub show_location: bool,
    pub timestamp_format: String,
    pub output_json: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_emojis: true,
            show_target: true,
            show_location: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
            log_file: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn with_file_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn production() -> Self {
        Self {
            show_colors: false,
            show_emojis: false,
            output_json: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_location: true,
            ..Default::default()
        }
    }
}

struct LoggerState {
    config: LoggerConfig,
    file: Option<File>,
}

pub struct ConsoleLogger {
    state: Mutex<LoggerState>,
}

impl ConsoleLogger {
    fn new() -> Self {
        Self {
            state: Mutex::new(LoggerState {
                config: LoggerConfig::default(),
                file: None,
            }),
        }
    }

    fn configure(&self, config: LoggerConfig) -> Result<()> {
        let file = match &config.log_file {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
            None => None,
        };

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.config = config;
        state.file = file;
        Ok(())
    }
}

fn format_line(entry: &LogEntry, config: &LoggerConfig) -> String {
    let mut line = String::new();

    let timestamp = entry.timestamp.format(&config.timestamp_format).to_string();
    if config.show_colors {
        line.push_str(&format!("{} ", timestamp.bright_black()));
    } else {
        line.push_str(&format!("{} ", timestamp));
    }

    let level = if config.show_emojis {
        format!("{} {}", entry.level.emoji(), entry.level.as_str())
    } else {
        entry.level.as_str().to_string()
    };
    if config.show_colors {
        line.push_str(&format!("[{}] ", level.color(entry.level.color()).bold()));
    } else {
        line.push_str(&format!("[{}] ", level));
    }

    if config.show_target && !entry.target.is_empty() {
        if config.show_colors {
            line.push_str(&format!("{}: ", entry.target.bright_blue()));
        } else {
            line.push_str(&format!("{}: ", entry.target));
        }
    }

    line.push_str(&entry.message);

    if config.show_location {
        if let (Some(file), Some(number)) = (&entry.file, entry.line) {
            let location = format!("({}:{})", file, number);
            if config.show_colors {
                line.push_str(&format!(" {}", location.bright_black()));
            } else {
                line.push_str(&format!(" {}", location));
            }
        }
    }

    line
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.state.lock() {
            Ok(state) => state.config.min_level.admits(metadata.level()),
            Err(_) => true,
        }
    }

    fn log(&self, record: &Record) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if !state.config.min_level.admits(record.level()) {
            return;
        }

        let entry = LogEntry::from_record(record);
        let rendered = if state.config.output_json {
            serde_json::to_string(&entry).unwrap_or_default()
        } else {
            format_line(&entry, &state.config)
        };

        // stderr keeps stdout free for command output
        eprintln!("{}", rendered);

        if state.file.is_some() {
            let plain = if state.config.output_json {
                rendered
            } else {
                format_line(&entry, &state.config.clone().with_colors(false))
            };
            if let Some(file) = state.file.as_mut() {
                let _ = writeln!(file, "{}", plain);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Ok(mut state) = self.state.lock() {
            if let Some(file) = state.file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Logs how long a named operation took when dropped.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("⏱️  Started: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::debug!(
            "⏱️  Finished: {} in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}

pub fn log_config_info(config: &ClientConfig) {
    log::info!("⚙️  Configuration loaded:");
    log::info!(
        "   Backend: {}",
        config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    );
    log::info!(
        "   Timeout: {}s",
        config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    );
    log::info!(
        "   Retries: {} (backoff {}ms)",
        config.max_retries.unwrap_or(0),
        config.retry_backoff().as_millis()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            id: "id".to_string(),
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            target: "rqrgen::generator".to_string(),
            file: Some("src/generator.rs".to_string()),
            line: Some(42),
        }
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Error.emoji(), "❌");
        assert_eq!(LogLevel::Debug.color(), Color::Blue);
        assert_eq!(LogLevel::from_name("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from(Level::Trace), LogLevel::Trace);
        assert!(LogLevel::Info.admits(Level::Error));
        assert!(!LogLevel::Info.admits(Level::Debug));
    }

    #[test]
    fn test_logger_config_presets() {
        let config = LoggerConfig::development();
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.show_colors);

        let prod_config = LoggerConfig::production();
        assert!(!prod_config.show_colors);
        assert!(prod_config.output_json);
    }

    #[test]
    fn test_plain_line_format() {
        let config = LoggerConfig::new()
            .with_colors(false)
            .with_level(LogLevel::Debug);
        let config = LoggerConfig {
            show_emojis: false,
            show_location: true,
            ..config
        };

        let line = format_line(&entry(LogLevel::Warn, "upload retry"), &config);
        assert!(line.contains("[WARN] rqrgen::generator: upload retry"));
        assert!(line.ends_with("(src/generator.rs:42)"));
    }

    #[test]
    fn test_init_is_repeatable() {
        assert!(init_with_config(LoggerConfig::development()).is_ok());
        assert!(init_with_config(LoggerConfig::production()).is_ok());
    }

    #[test]
    fn test_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.log");
        let logger = ConsoleLogger::new();
        logger
            .configure(LoggerConfig::new().with_colors(false).with_file_output(&path))
            .unwrap();

        log::Log::log(
            &logger,
            &Record::builder()
                .level(Level::Info)
                .target("rqrgen")
                .args(format_args!("preview saved"))
                .build(),
        );
        log::Log::flush(&logger);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("preview saved"));
    }
}
