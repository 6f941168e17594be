//! ターミナルフロントエンド
//!
//! crossterm で端末を raw モード・代替画面に切り替え、
//! 描画とキー入力の繰り返しで `App` を駆動する

use crate::app::App;
use crate::error::{KeError, Result, UiError};
use crate::input::{translate_event, InputResult};
use crate::ui::Renderer;
use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Write};
use std::time::Duration;

/// 通知の期限切れを拾うための入力待ち間隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 端末ベル
const BELL: &[u8] = b"\x07";

pub struct TuiApplication {
    renderer: Renderer,
}

impl TuiApplication {
    pub fn new() -> Self {
        Self {
            renderer: Renderer::new(),
        }
    }

    /// セッションが終了するまで描画・入力ループを回す
    pub fn run(&mut self, app: &mut App) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = leave_terminal();
                return Err(init_error(err));
            }
        };

        let loop_result = self.event_loop(&mut terminal, app);
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        app: &mut App,
    ) -> Result<()> {
        let size = terminal
            .size()
            .map_err(|err| terminal_error("terminal size", err))?;
        app.resize(size.width as usize, size.height as usize);

        while app.is_running() {
            let snapshot = app.view();
            terminal
                .draw(|frame| self.renderer.render(frame, &snapshot))
                .map_err(|err| terminal_error("render", err))?;

            if !event::poll(POLL_INTERVAL).map_err(|err| terminal_error("event poll", err))? {
                continue;
            }

            let event = event::read().map_err(|err| terminal_error("event read", err))?;
            match translate_event(event) {
                InputResult::Command(command) => {
                    let outcome = app.execute(command);
                    if outcome.should_beep() {
                        ring_bell()?;
                    }
                }
                InputResult::Resize { cols, rows } => app.resize(cols as usize, rows as usize),
                InputResult::Ignored => {}
            }
        }

        Ok(())
    }
}

impl Default for TuiApplication {
    fn default() -> Self {
        Self::new()
    }
}

/// 端末を通常モードへ戻す（パニック時にも呼ばれる）
pub fn restore_terminal() {
    let _ = leave_terminal();
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(init_error)?;
    let mut out = stdout();
    if let Err(err) = execute!(out, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(init_error(err));
    }
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn ring_bell() -> Result<()> {
    let mut out = stdout();
    out.write_all(BELL)
        .and_then(|_| out.flush())
        .map_err(|err| terminal_error("bell", err))
}

fn init_error(err: impl std::fmt::Display) -> KeError {
    KeError::Ui(UiError::TerminalInit {
        message: err.to_string(),
    })
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> KeError {
    KeError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
