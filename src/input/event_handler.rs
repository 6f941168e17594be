//! イベントハンドリング
//!
//! ターミナルイベントをエディタコマンドへ変換する

use super::Command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// 入力処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// コマンドへ変換された
    Command(Command),
    /// ターミナルサイズ変更
    Resize { cols: u16, rows: u16 },
    /// 無視（未割り当てキー、マウス等）
    Ignored,
}

/// ターミナルイベントを変換
pub fn translate_event(event: Event) -> InputResult {
    match event {
        Event::Key(key_event) => translate_key(&key_event)
            .map(InputResult::Command)
            .unwrap_or(InputResult::Ignored),
        Event::Resize(cols, rows) => InputResult::Resize { cols, rows },
        Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {
            InputResult::Ignored
        }
    }
}

/// キーイベントをコマンドへ変換
pub fn translate_key(key_event: &KeyEvent) -> Option<Command> {
    // キー離しは無視（Windows のみ報告される）
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') if ctrl => Some(Command::Quit),
        KeyCode::Char('s') | KeyCode::Char('S') if ctrl => Some(Command::Save),
        KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Enter => Some(Command::InsertNewline),
        KeyCode::Backspace => Some(Command::DeleteBackward),
        KeyCode::Tab => Some(Command::InsertChar('\t')),
        KeyCode::Char(ch) if is_character_input(key_event) => Some(Command::InsertChar(ch)),
        _ => None,
    }
}

/// 修飾キーなし、またはShiftのみの文字入力か
fn is_character_input(key_event: &KeyEvent) -> bool {
    !key_event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
