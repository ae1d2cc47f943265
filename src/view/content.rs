//! Main content area rendering (home sections, album and artist detail views)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{AlbumDetail, Card, ContentState, ContentView, HomeCards, UiState};
use crate::model::views::ArtistView;
use super::utils::{border_style, calculate_num_width, item_style, render_scrollable_list, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    cards: &HomeCards,
    now_playing_key: Option<&str>,
    is_focused: bool,
) {
    if content_state.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Content ")
                    .border_style(border_style(is_focused)),
            );
        frame.render_widget(loading, area);
        return;
    }

    match &content_state.view {
        ContentView::Home => {
            let section = ui_state.active_section;
            render_card_list(
                frame,
                area,
                &format!(" {} ", section.title()),
                &cards[section.index()],
                ui_state.selected_in(section),
                is_focused,
                now_playing_key,
            );
        }
        ContentView::AlbumDetail { detail, selected_index } => {
            render_album_detail(frame, area, detail, *selected_index, is_focused, now_playing_key);
        }
        ContentView::ArtistDetail { detail, scroll } => {
            render_artist_detail(frame, area, detail, *scroll, is_focused);
        }
    }
}

fn render_card_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    cards: &[Card],
    selected_index: usize,
    is_focused: bool,
    now_playing_key: Option<&str>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    if cards.is_empty() {
        let empty = Paragraph::new("Nothing here yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let title_width = (content_width * 45) / 100;
    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let playing = now_playing_key == Some(card.key.as_str());
            let marker = if playing { "▶ " } else { "  " };
            let mut spans = vec![
                Span::raw(marker),
                Span::styled(
                    truncate_string(&card.title, title_width),
                    item_style(i == selected_index, is_focused),
                ),
                Span::raw("  "),
                Span::styled(card.subtitle.clone(), Style::default().fg(Color::Gray)),
            ];
            if let Some(image) = &card.image {
                spans.push(Span::styled(
                    format!("  [{}]", image),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    render_scrollable_list(frame, area, items, selected_index, block);
}

fn render_album_detail(
    frame: &mut Frame,
    area: Rect,
    detail: &AlbumDetail,
    selected_index: usize,
    is_focused: bool,
    now_playing_key: Option<&str>,
) {
    let album = &detail.view;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Header
            Constraint::Min(0),    // Tracks
        ])
        .split(area);

    let mut header_lines = vec![
        Line::from(Span::styled(
            format!("💿 {}", album.title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} | Released: {}", album.artist, album.released)),
        Line::from(Span::styled(
            format!("Cover: {}", album.cover),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(description) = &album.description {
        header_lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    let header = Paragraph::new(header_lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .padding(Padding::horizontal(1))
                .borders(Borders::ALL)
                .title(" Enter: Open track | Backspace: Go back ")
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(header, chunks[0]);

    let tracks_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tracks ({}) ", detail.tracks.len()))
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    let notice = if detail.loading_tracks {
        Some("Loading tracks…")
    } else if detail.tracks.is_empty() {
        Some("No tracks found.")
    } else {
        None
    };
    if let Some(notice) = notice {
        let notice = Paragraph::new(notice)
            .style(Style::default().fg(Color::DarkGray))
            .block(tracks_block);
        frame.render_widget(notice, chunks[1]);
        return;
    }

    let num_width = calculate_num_width(detail.tracks.len());
    let items: Vec<ListItem> = detail
        .tracks
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let playing = now_playing_key == Some(entry.key.as_str());
            let number = if playing {
                format!("{:>width$}", "▶", width = num_width)
            } else {
                format!("{:>width$}", i + 1, width = num_width)
            };
            let length_text = entry
                .doc
                .length
                .as_deref()
                .map(|length| format!("  {}", length))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(number, Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(entry.doc.title.clone(), item_style(i == selected_index, is_focused)),
                Span::styled(length_text, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    render_scrollable_list(frame, chunks[1], items, selected_index, tracks_block);
}

fn render_artist_detail(frame: &mut Frame, area: Rect, detail: &ArtistView, scroll: u16, is_focused: bool) {
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("🎤 {}", detail.name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(bio) = &detail.bio {
        lines.push(Line::from(bio.clone()));
        lines.push(Line::from(""));
    }

    if !detail.links.is_empty() {
        lines.push(Line::from(Span::styled("Links", heading)));
        for (platform, url) in &detail.links {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", platform), Style::default().fg(Color::Green)),
                Span::raw(" — "),
                Span::raw(url.clone()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !detail.gallery.is_empty() {
        lines.push(Line::from(Span::styled("Gallery", heading)));
        for image in &detail.gallery {
            lines.push(Line::from(Span::styled(
                format!("  {}", image),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ↑↓: Scroll | Backspace: Go back ")
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(body, area);
}
