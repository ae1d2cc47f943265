//! Overlay rendering (track modal, lyrics popout, error notification, help popup)

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{LyricsStatus, MediaStatus, ModalSnapshot, ModalVisibility, TrackView, UiState};
use super::utils::centered_rect;

pub fn render_track_modal(frame: &mut Frame, modal: &ModalSnapshot) {
    let Some(view) = &modal.view else {
        return;
    };
    let popup_area = centered_rect(frame.area(), 72, 22);
    frame.render_widget(Clear, popup_area);

    // Opening and Closing are drawn dimmed
    let border_color = match modal.visibility {
        ModalVisibility::Open => Color::Cyan,
        _ => Color::DarkGray,
    };

    let lines = track_lines(view, &modal.media);
    let position = modal
        .position
        .map(|(index, len)| format!(" {}/{} ", index + 1, len))
        .unwrap_or_default();

    let play_hint = if modal.media.ready_uri().is_some() { "Enter Play | " } else { "" };
    let lyrics_hint = if view.lyrics == LyricsStatus::Available { "L Lyrics | " } else { "" };
    let hints = format!(" ←/→ Prev/Next | {}{}Esc Close ", play_hint, lyrics_hint);

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(position)
                .title_bottom(Line::from(hints).right_aligned())
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(body, popup_area);
}

fn track_lines(view: &TrackView, media: &MediaStatus) -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(
        view.heading.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))];
    let subtitle = view.subtitle();
    if !subtitle.is_empty() {
        lines.push(Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))));
    }
    lines.push(Line::from(""));

    let media_line = match media {
        MediaStatus::Probing => Span::styled("Locating media…", Style::default().fg(Color::Yellow)),
        MediaStatus::Ready(uri) => Span::styled(format!("♪ {}", uri), Style::default().fg(Color::Green)),
        MediaStatus::Unavailable => Span::styled("Media unavailable", Style::default().fg(Color::Red)),
    };
    lines.push(Line::from(media_line));

    if let Some(notice) = view.lyrics.notice() {
        lines.push(Line::from(Span::styled(notice, Style::default().fg(Color::DarkGray))));
    }

    if let Some(bio) = &view.bio {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("About", heading)));
        lines.push(Line::from(bio.clone()));
    }

    if !view.related.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Related", heading)));
        for related in &view.related {
            let mut spans = vec![Span::styled(
                format!("  {}", related.title),
                Style::default().fg(Color::Green),
            )];
            if let Some(reason) = &related.reason {
                spans.push(Span::styled(
                    format!(" — {}", reason),
                    Style::default().fg(Color::Gray),
                ));
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}

pub fn render_lyrics_popout(frame: &mut Frame, modal: &ModalSnapshot) {
    let Some(view) = &modal.view else {
        return;
    };
    let popup_area = centered_rect(frame.area(), 56, 26);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = view
        .lyric_lines
        .iter()
        .map(|line| Line::from(line.clone()))
        .collect();

    let lyrics = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((modal.lyrics_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(format!(" {} ", view.title))
                .title_bottom(Line::from(" ↑↓ Scroll | Esc Close ").right_aligned())
                .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(lyrics, popup_area);
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count = error_msg.chars().count().div_ceil(inner_width) as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_area = centered_rect(area, popup_width, 2 + error_line_count.max(1));

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Browsing ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Open album, artist or track"),
        ("Backspace / Esc", "Go back"),
        ("", ""),
        ("", "── Track ──"),
        ("← / →", "Previous / next track"),
        ("Enter / Space", "Play in default player"),
        ("L", "Show lyrics"),
        ("Esc", "Close lyrics, then track"),
        ("", ""),
        ("", "── General ──"),
        ("S", "Shuffle play"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_area = centered_rect(area, 62, keybindings.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    // Create help text lines
    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
