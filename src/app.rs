//! 編集セッション
//!
//! 1つのファイルに対する編集セッションの状態（ファイルパス、実行状態、
//! 文書、カーソル・ビューポート、通知）をまとめて保持し、コマンドを1つずつ実行する

use crate::buffer::{CursorMovement, CursorPosition, Document};
use crate::config::Config;
use crate::editor::Coordinator;
use crate::error::{Result, StatusMessage};
use crate::file::{self, LineEnding};
use crate::input::{Command, CommandOutcome};
use crate::ui::{ViewSnapshot, Viewport};
use std::path::{Path, PathBuf};

/// 保存成功時の通知
const SAVED_MESSAGE: &str = "saved";

/// 編集セッション
pub struct App {
    /// 編集対象のファイル
    file_path: PathBuf,
    /// 実行中かどうか
    running: bool,
    /// 設定（セッション中は固定）
    config: Config,
    /// 文書
    document: Document,
    /// カーソル・ビューポート
    coordinator: Coordinator,
    /// 保存時の行区切り
    line_ending: LineEnding,
    /// 未保存の変更があるか
    modified: bool,
    /// 最下行の通知
    status: Option<StatusMessage>,
}

impl App {
    /// ファイルを開いてセッションを作成
    pub fn open(path: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let file_path = path.into();
        let loaded = file::load_document(&file_path, config.limits())?;
        let line_ending = config.line_ending.resolve(loaded.line_ending);

        log::info!(
            "opened {} ({} rows, existed: {}, line ending: {:?})",
            file_path.display(),
            loaded.document.row_count(),
            loaded.existed,
            line_ending
        );
        Ok(Self::with_document(file_path, loaded.document, line_ending, config))
    }

    /// 既存の文書でセッションを作成
    pub fn with_document(
        file_path: impl Into<PathBuf>,
        document: Document,
        line_ending: LineEnding,
        config: Config,
    ) -> Self {
        let coordinator = Coordinator::new(80, 24, config.scroll_policy);
        Self {
            file_path: file_path.into(),
            running: true,
            config,
            document,
            coordinator,
            line_ending,
            modified: false,
            status: None,
        }
    }

    /// コマンドを1つ実行
    ///
    /// 境界ヒットやバッファエラーは `BoundaryHit` として返し、状態は変えない
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        self.status = None;

        let document = &mut self.document;
        let coordinator = &mut self.coordinator;
        let result = match command {
            Command::MoveUp => coordinator.move_cursor(document, CursorMovement::Up),
            Command::MoveDown => coordinator.move_cursor(document, CursorMovement::Down),
            Command::MoveLeft => coordinator.move_cursor(document, CursorMovement::Left),
            Command::MoveRight => coordinator.move_cursor(document, CursorMovement::Right),
            Command::InsertChar(ch) => coordinator.insert_char(document, ch),
            Command::InsertNewline => coordinator.insert_newline(document),
            Command::DeleteBackward => coordinator.delete_backward(document),
            Command::Save => return self.save_outcome(),
            Command::Quit => {
                self.shutdown();
                return CommandOutcome::Quit;
            }
        };

        match result {
            Ok(()) if command.is_edit() => {
                self.modified = true;
                CommandOutcome::Edited
            }
            Ok(()) => CommandOutcome::Moved,
            Err(err) => {
                log::trace!("boundary hit on {:?} at {}: {}", command, self.cursor(), err);
                CommandOutcome::BoundaryHit
            }
        }
    }

    fn save_outcome(&mut self) -> CommandOutcome {
        match self.save() {
            Ok(bytes) => CommandOutcome::Saved { bytes },
            Err(err) => {
                let status = StatusMessage::error(&err, self.config.status_timeout());
                let message = status.message.clone();
                self.status = Some(status);
                CommandOutcome::SaveFailed { message }
            }
        }
    }

    /// 文書をファイルへ保存し、書き込んだバイト数を返す
    pub fn save(&mut self) -> Result<usize> {
        match file::save_document(&self.file_path, &self.document, self.line_ending) {
            Ok(bytes) => {
                self.modified = false;
                self.status = Some(StatusMessage::info(
                    SAVED_MESSAGE,
                    self.config.status_timeout(),
                ));
                Ok(bytes)
            }
            Err(err) => {
                log::warn!("save to {} failed: {}", self.file_path.display(), err);
                Err(err)
            }
        }
    }

    /// 画面サイズの変更
    pub fn resize(&mut self, width: usize, height: usize) {
        log::debug!("resize to {}x{}", width, height);
        self.coordinator.resize(width, height);
    }

    /// ビューポートを補正して描画内容を作る
    pub fn view(&mut self) -> ViewSnapshot {
        self.coordinator.scroll();
        if self.status.as_ref().is_some_and(StatusMessage::is_expired) {
            self.status = None;
        }
        ViewSnapshot::capture(
            &self.document,
            self.coordinator.viewport(),
            self.coordinator.cursor(),
            self.status.as_ref(),
        )
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> CursorPosition {
        self.coordinator.cursor()
    }

    pub fn viewport(&self) -> &Viewport {
        self.coordinator.viewport()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// 未保存の変更があるか
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// アプリケーションが実行中かどうかを確認
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        if self.modified {
            log::info!("quitting with unsaved changes to {}", self.file_path.display());
        }
        self.running = false;
    }
}
