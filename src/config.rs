//! 設定
//!
//! セッション開始時に一度だけ読み込む。容量上限はセッション中に変更しない。
//! 設定ファイルは JSON で、未指定の項目は既定値になる。

use crate::buffer::{Limits, DEFAULT_MAX_LINES, DEFAULT_MAX_LINE_LENGTH};
use crate::error::{ConfigError, Result};
use crate::file::LineEnding;
use crate::logging::LogLevel;
use crate::ui::viewport::ScrollPolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 保存時の行区切りの決め方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingMode {
    /// 読み込んだファイルから検出し、検出できなければ CRLF
    Auto,
    Lf,
    #[default]
    Crlf,
}

impl LineEndingMode {
    pub fn resolve(self, detected: Option<LineEnding>) -> LineEnding {
        match self {
            LineEndingMode::Lf => LineEnding::Lf,
            LineEndingMode::Crlf => LineEnding::Crlf,
            LineEndingMode::Auto => detected.unwrap_or(LineEnding::Crlf),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 最大行数
    pub max_lines: usize,
    /// 1行あたりの最大文字数
    pub max_line_length: usize,
    /// 保存時の行区切り
    pub line_ending: LineEndingMode,
    /// スクロール方針
    pub scroll_policy: ScrollPolicy,
    /// 通知の表示時間（ミリ秒）
    pub status_timeout_ms: u64,
    /// ログ出力先（未指定ならログ無効）
    pub log_file: Option<PathBuf>,
    /// ログレベル
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            line_ending: LineEndingMode::default(),
            scroll_policy: ScrollPolicy::default(),
            status_timeout_ms: 3000,
            log_file: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// 設定を読み込む
    ///
    /// 明示パスがあればそれを必須として読み、なければ既定の場所を探す
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// JSON ファイルから読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        let label = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::InvalidFile {
            path: label.clone(),
            message: e.to_string(),
        })?;
        Self::parse(&content, label)
    }

    /// JSON 文字列から読み込む
    pub fn from_json(content: &str) -> Result<Self> {
        Self::parse(content, "<inline>".to_string())
    }

    fn parse(content: &str, label: String) -> Result<Self> {
        let config: Config = serde_json::from_str(content).map_err(|e| ConfigError::InvalidFile {
            path: label,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 値の範囲を検証
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_lines".to_string(),
                value: self.max_lines.to_string(),
            }
            .into());
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_line_length".to_string(),
                value: self.max_line_length.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits::new(self.max_lines, self.max_line_length)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }
}

/// 既定の設定ファイルの場所（`<config_dir>/ke/config.json`）
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ke").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeError;
    use std::io::Write;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.limits(), Limits::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(
            r#"{ "max_lines": 50, "line_ending": "lf", "scroll_policy": "center", "log_level": "debug" }"#,
        )
        .unwrap();
        assert_eq!(config.limits(), Limits::new(50, DEFAULT_MAX_LINE_LENGTH));
        assert_eq!(config.line_ending, LineEndingMode::Lf);
        assert_eq!(config.scroll_policy, ScrollPolicy::Center);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let err = Config::from_json(r#"{ "max_line_length": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            KeError::Config(ConfigError::InvalidValue { ref key, .. }) if key == "max_line_length"
        ));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        match err {
            KeError::Config(ConfigError::InvalidFile { path, .. }) => {
                assert_eq!(path, file.path().display().to_string());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.json"))).is_err());
    }

    #[test]
    fn test_line_ending_resolution() {
        assert_eq!(LineEndingMode::Auto.resolve(None), LineEnding::Crlf);
        assert_eq!(
            LineEndingMode::Auto.resolve(Some(LineEnding::Lf)),
            LineEnding::Lf
        );
        assert_eq!(
            LineEndingMode::Crlf.resolve(Some(LineEnding::Lf)),
            LineEnding::Crlf
        );
    }
}
