//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{App, StatusKind};
use crate::config::Settings;
use crate::player::{PlaybackState, PlayerView};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("space/p".to_string(), "play".to_string());
    map.insert("a".to_string(), "pause".to_string());
    map.insert("x".to_string(), "stop".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L is filled dynamically from config.
    map.insert("+/-".to_string(), "volume".to_string());
    map.insert("r".to_string(), "loop".to_string());
    map.insert("s".to_string(), "random".to_string());
    map.insert("tab".to_string(), "next playlist".to_string());
    map.insert("R".to_string(), "reload".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    let order = [
        "space/p", "a", "x", "h/l", "H/L", "+/-", "r", "s", "tab", "R", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}s", seek_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Colour of the transport indicators next to the current song.
fn state_color(state: PlaybackState) -> Color {
    match state {
        PlaybackState::Playing => Color::Green,
        PlaybackState::Paused => Color::Yellow,
        PlaybackState::Stopped => Color::Red,
    }
}

/// Title of the now-playing box. A bound track that has not reported output
/// yet shows as buffering.
fn transport_title(view: &PlayerView<'_>) -> String {
    if view.state == PlaybackState::Playing && !view.media_started {
        format!(" {} (buffering) ", view.state)
    } else {
        format!(" {} ", view.state)
    }
}

fn flag(name: &str, on: bool) -> Span<'static> {
    let style = if on {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("{name}: {}", if on { "ON" } else { "OFF" }), style)
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    view: &PlayerView<'_>,
    position: Option<Duration>,
    settings: &Settings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Previous / current / next
    {
        let labels = app.now_playing.borrow();
        let dim = Style::default().fg(Color::DarkGray);
        let indicator = Style::default()
            .fg(state_color(view.state))
            .add_modifier(Modifier::BOLD);
        let current = labels.current.as_deref().unwrap_or("no songs");

        let mut current_line = vec![
            Span::styled("> ", indicator),
            Span::styled(current.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" <", indicator),
        ];
        if let Some(pos) = position {
            current_line.push(Span::raw(format!("  [{}]", format_mmss(pos))));
        }

        let lines = vec![
            Line::from(Span::styled(labels.previous.clone().unwrap_or_default(), dim)),
            Line::from(current_line),
            Line::from(Span::styled(labels.next.clone().unwrap_or_default(), dim)),
        ];
        let songs = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(transport_title(view)));
        frame.render_widget(songs, chunks[1]);
    }

    // Modes and volume
    {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        let modes = Paragraph::new(Line::from(vec![
            flag("LOOP", view.modes.looping),
            Span::raw(" • "),
            flag("RANDOM", view.modes.random),
        ]))
        .block(Block::bordered().padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        }));
        frame.render_widget(modes, row[0]);

        let volume = Gauge::default()
            .block(Block::bordered().title(" volume "))
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(u16::from(view.modes.volume));
        frame.render_widget(volume, row[1]);
    }

    // Track list, centred on the cursor when it does not fit.
    {
        let total = view.tracks.len();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, view.cursor)
        } else {
            let half = list_height / 2;
            let mut start = view.cursor.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, view.cursor - start)
        };

        let visible_items: Vec<ListItem> = view.tracks[start..end]
            .iter()
            .map(|t| {
                if view.bound == Some(t.id) {
                    ListItem::new(t.title.as_str()).fg(state_color(view.state))
                } else {
                    ListItem::new(t.title.as_str())
                }
            })
            .collect();

        let title = if app.is_loading() {
            format!(" {} (loading) ", view.playlist_name)
        } else {
            format!(" {} ({}) ", view.playlist_name, total)
        };
        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let status = match &app.status {
        Some(s) if s.kind == StatusKind::Error => {
            Paragraph::new(s.text.as_str()).fg(Color::Red)
        }
        Some(s) => Paragraph::new(s.text.as_str()),
        None => Paragraph::new(format!(
            "playlist {}/{}: {}",
            app.catalog.selected() + 1,
            app.catalog.len(),
            app.catalog.current().folder.display()
        )),
    };
    frame.render_widget(
        status.block(Block::bordered().title(" status ")),
        chunks[4],
    );

    let footer = Paragraph::new(controls_text(settings.playback.seek_seconds))
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
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
        assert_eq!(format_mmss(Duration::from_millis(599_999)), "09:59");
    }

    fn view(state: PlaybackState, media_started: bool) -> PlayerView<'static> {
        PlayerView {
            playlist_name: "songs",
            tracks: &[],
            cursor: 0,
            state,
            modes: Default::default(),
            bound: None,
            media_started,
        }
    }

    #[test]
    fn transport_title_marks_unconfirmed_output_as_buffering() {
        assert_eq!(transport_title(&view(PlaybackState::Playing, false)), " playing (buffering) ");
        assert_eq!(transport_title(&view(PlaybackState::Playing, true)), " playing ");
        assert_eq!(transport_title(&view(PlaybackState::Paused, false)), " paused ");
    }

    #[test]
    fn controls_text_lists_seek_step() {
        let text = controls_text(7);
        assert!(text.contains("[H/L] seek -/+7s"));
        assert!(text.starts_with("[space/p] play"));
        assert!(text.ends_with("[q] quit"));
    }
}
