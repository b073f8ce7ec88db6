use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::player::Player;
use crate::surface::InputEvent;
use crate::ui::{self, TerminalSurface};

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Input(InputEvent),
    Quit,
    None,
}

/// Main terminal event loop: ticks the player, draws the surface and feeds
/// input back. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    player: &mut Player<TerminalSurface>,
    frame: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Err(e) = player.tick(Instant::now()) {
            warn!(error = %e, "player tick failed");
        }

        terminal.draw(|f| ui::draw(f, player.surface_mut()))?;

        if !event::poll(frame)? {
            continue;
        }

        let input = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match map_key(key, player.surface_mut()) {
                    Action::Quit => break,
                    Action::Input(input) => Some(input),
                    Action::None => None,
                }
            }
            Event::Mouse(mouse) => map_mouse(mouse, player.surface()),
            _ => None,
        };

        if let Some(input) = input {
            if let Err(e) = player.handle_input(input) {
                warn!(?input, error = %e, "input rejected");
            }
        }
    }

    Ok(())
}

/// Translate a key press. Cursor movement is applied to `surface` directly.
pub fn map_key(key: KeyEvent, surface: &mut TerminalSurface) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::Input(InputEvent::TogglePlay),
        KeyCode::Char('h') | KeyCode::Left => Action::Input(InputEvent::SkipPrev),
        KeyCode::Char('l') | KeyCode::Right => Action::Input(InputEvent::SkipNext),
        KeyCode::Char('j') | KeyCode::Down => {
            surface.move_cursor(1);
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            surface.move_cursor(-1);
            Action::None
        }
        KeyCode::Enter => surface
            .cursor_row()
            .map_or(Action::None, |id| Action::Input(InputEvent::SelectRow(id))),
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(tenths) => Action::Input(InputEvent::SeekAt(f64::from(tenths) / 10.0)),
            None => Action::None,
        },
        _ => Action::None,
    }
}

/// A left click on the gauge seeks; on a list row it selects the row.
pub fn map_mouse(mouse: MouseEvent, surface: &TerminalSurface) -> Option<InputEvent> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    if let Some(fraction) = surface.fraction_at(mouse.column, mouse.row) {
        return Some(InputEvent::SeekAt(fraction));
    }
    surface
        .row_at(mouse.column, mouse.row)
        .map(InputEvent::SelectRow)
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::surface::{RenderSurface, TrackRow};

    fn surface() -> TerminalSurface {
        let rows: Vec<TrackRow> = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(id, name)| TrackRow {
                id,
                name: name.to_string(),
                artist: None,
                playable: true,
            })
            .collect();
        let mut surface = TerminalSurface::new("test");
        surface.mount("srr-player");
        surface.render_player(&rows, "a");
        surface
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_map_to_player_input() {
        let mut s = surface();
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), &mut s),
            Action::Input(InputEvent::TogglePlay)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('p')), &mut s),
            Action::Input(InputEvent::TogglePlay)
        );
        assert_eq!(
            map_key(press(KeyCode::Left), &mut s),
            Action::Input(InputEvent::SkipPrev)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('l')), &mut s),
            Action::Input(InputEvent::SkipNext)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('3')), &mut s),
            Action::Input(InputEvent::SeekAt(0.3))
        );
        assert_eq!(map_key(press(KeyCode::Char('x')), &mut s), Action::None);
        assert_eq!(map_key(press(KeyCode::Char('q')), &mut s), Action::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut s),
            Action::Quit
        );
    }

    #[test]
    fn cursor_keys_move_then_enter_selects() {
        let mut s = surface();
        assert_eq!(map_key(press(KeyCode::Char('j')), &mut s), Action::None);
        assert_eq!(map_key(press(KeyCode::Down), &mut s), Action::None);
        assert_eq!(
            map_key(press(KeyCode::Enter), &mut s),
            Action::Input(InputEvent::SelectRow(2))
        );
        map_key(press(KeyCode::Char('k')), &mut s);
        assert_eq!(
            map_key(press(KeyCode::Enter), &mut s),
            Action::Input(InputEvent::SelectRow(1))
        );
    }

    #[test]
    fn clicks_seek_on_the_gauge_and_select_on_rows() {
        let mut s = surface();
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        terminal.draw(|f| ui::draw(f, &mut s)).unwrap();

        // 40 columns: the gauge spans columns 1..39 on line 5.
        assert_eq!(map_mouse(click(1, 5), &s), Some(InputEvent::SeekAt(0.0)));
        assert_eq!(map_mouse(click(20, 5), &s), Some(InputEvent::SeekAt(0.5)));

        // The track list starts on line 8.
        assert_eq!(map_mouse(click(3, 9), &s), Some(InputEvent::SelectRow(1)));
        assert_eq!(map_mouse(click(0, 0), &s), None);

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..click(20, 5)
        };
        assert_eq!(map_mouse(scroll, &s), None);
    }
}
