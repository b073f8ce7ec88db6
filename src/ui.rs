//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

mod surface;

pub use surface::{TerminalSurface, ViewMode};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::surface::{ControlState, TrackRow};

const CONTROLS: &[(&str, &str)] = &[
    ("space/p", "play/pause"),
    ("h/l", "prev/next"),
    ("j/k", "up/down"),
    ("enter", "play selected"),
    ("0-9", "seek"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text(mode: ViewMode) -> String {
    CONTROLS
        .iter()
        .filter(|(key, _)| mode == ViewMode::Player || matches!(*key, "j/k" | "q"))
        .map(|(key, action)| format!("[{key}] {action}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn row_text(row: &TrackRow) -> String {
    match row.artist.as_deref().map(str::trim) {
        Some(a) if !a.is_empty() => format!("{} - {}", a, row.name),
        _ => row.name.clone(),
    }
}

fn control_symbol(state: ControlState) -> &'static str {
    match state {
        ControlState::Playing => "▶",
        ControlState::Idle => "■",
    }
}

/// Render the surface into `frame` and remember where the gauge and the
/// track list ended up, for mouse hit-testing.
pub fn draw(frame: &mut Frame, surface: &mut TerminalSurface) {
    match surface.mode {
        ViewMode::Player => draw_player(frame, surface),
        ViewMode::Listing => draw_listing(frame, surface),
        ViewMode::Blank => {
            surface.gauge_area = None;
            surface.list_area = None;
        }
    }
}

fn header(surface: &TerminalSurface) -> Paragraph<'_> {
    let title = format!(" {} ", surface.container.as_deref().unwrap_or("reprise"));
    Paragraph::new(surface.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Center),
        )
}

fn footer(mode: ViewMode) -> Paragraph<'static> {
    Paragraph::new(controls_text(mode))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true })
}

fn draw_player(frame: &mut Frame, surface: &mut TerminalSurface) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    frame.render_widget(header(surface), chunks[0]);

    // Now playing: title line above the progress gauge.
    let block = Block::bordered().title(" now playing ");
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let title = Line::from(vec![
        Span::raw(format!(" {} ", control_symbol(surface.control))),
        Span::raw(surface.title.as_str()).bold(),
    ]);
    frame.render_widget(Paragraph::new(title), parts[0]);

    let gauge = Gauge::default()
        .ratio(surface.progress / 100.0)
        .label(surface.elapsed.as_str());
    frame.render_widget(gauge, parts[1]);
    surface.gauge_area = Some(parts[1]);

    let items: Vec<ListItem> = surface
        .rows
        .iter()
        .map(|row| {
            let marker = if surface.row_state(row.id) == ControlState::Playing {
                "▶ "
            } else {
                "  "
            };
            let item = ListItem::new(format!("{marker}{}", row_text(row)));
            if row.playable {
                item
            } else {
                item.style(Style::default().add_modifier(Modifier::DIM))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[2], &mut surface.list_state);
    surface.list_area = Some(inner_list_area(chunks[2]));

    frame.render_widget(footer(surface.mode), chunks[3]);
}

fn draw_listing(frame: &mut Frame, surface: &mut TerminalSurface) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    frame.render_widget(header(surface), chunks[0]);

    let items: Vec<ListItem> = surface
        .rows
        .iter()
        .enumerate()
        .map(|(n, row)| ListItem::new(format!("{:>3}. {}", n + 1, row_text(row))))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" listing "));
    frame.render_stateful_widget(list, chunks[1], &mut surface.list_state);

    surface.gauge_area = None;
    surface.list_area = None;

    frame.render_widget(footer(surface.mode), chunks[2]);
}

// List content area inside its border.
fn inner_list_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}
