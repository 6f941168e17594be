//! ロギングシステム
//!
//! `log` ファサードのバックエンド。端末は TUI が占有するため、出力先はファイルのみ。
//! 出力先が未指定の場合はロガーを登録せず、ログは破棄される。

use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }

    fn tag(level: log::Level) -> &'static str {
        match level {
            log::Level::Trace => "TRACE",
            log::Level::Debug => "DEBUG",
            log::Level::Info => "INFO",
            log::Level::Warn => "WARNING",
            log::Level::Error => "ERROR",
        }
    }
}

/// ファイル追記型ロガー
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
    path: PathBuf,
    file: Mutex<File>,
}

impl Logger {
    /// 出力先ファイルを開いてロガーを作成（親ディレクトリは必要なら作成）
    pub fn new(path: impl Into<PathBuf>, level: LogLevel) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            level,
            path,
            file: Mutex::new(file),
        })
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(record: &log::Record<'_>) -> String {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|dur| dur.as_millis())
            .unwrap_or_default();
        format!(
            "{} {} {}: {}",
            ts,
            LogLevel::tag(record.level()),
            record.target(),
            record.args()
        )
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.to_level_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// グローバルロガーを登録
///
/// `path` が `None` ならログを無効化する
pub fn init(path: Option<&Path>, level: LogLevel) -> anyhow::Result<()> {
    let Some(path) = path else {
        log::set_max_level(log::LevelFilter::Off);
        return Ok(());
    };

    let logger = Logger::new(path, level)?;
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| anyhow::anyhow!("logger already installed: {}", e))?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn logger_respects_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path().join("ke.log"), LogLevel::Info).unwrap();

        let debug = log::Metadata::builder().level(log::Level::Debug).build();
        let warn = log::Metadata::builder().level(log::Level::Warn).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));
    }

    #[test]
    fn logger_appends_formatted_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ke.log");
        let logger = Logger::new(&path, LogLevel::Debug).unwrap();

        logger.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .target("ke::app")
                .args(format_args!("saved {}", "a.txt"))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Trace)
                .target("ke::app")
                .args(format_args!("dropped"))
                .build(),
        );
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("INFO ke::app: saved a.txt"));
        assert!(!content.contains("dropped"));
    }
}
