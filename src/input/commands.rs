//! コマンドシステム
//!
//! 入力ディスパッチからセッションへ渡す離散コマンドと、その実行結果

/// エディタコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// 文字を挿入
    InsertChar(char),
    /// 改行（行分割）
    InsertNewline,
    /// カーソル前の文字を削除（行頭では行結合）
    DeleteBackward,
    /// ファイルへ保存
    Save,
    /// 終了
    Quit,
}

impl Command {
    /// 文書を変更しうるコマンドか
    pub fn is_edit(self) -> bool {
        matches!(
            self,
            Command::InsertChar(_) | Command::InsertNewline | Command::DeleteBackward
        )
    }
}

/// コマンド実行の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// カーソルが移動した
    Moved,
    /// 文書が変更された
    Edited,
    /// 境界ヒット（状態変化なし）
    BoundaryHit,
    /// 保存成功（書き込みバイト数）
    Saved { bytes: usize },
    /// 保存失敗（表示用メッセージ）
    SaveFailed { message: String },
    /// 終了要求
    Quit,
}

impl CommandOutcome {
    /// ベルを鳴らすべきか
    pub fn should_beep(&self) -> bool {
        matches!(
            self,
            CommandOutcome::BoundaryHit | CommandOutcome::SaveFailed { .. }
        )
    }
}
