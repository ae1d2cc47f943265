//! Layout rendering (top bar, sidebar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{HomeCards, Section, SiteInfo, UiState};
use super::utils::item_style;

pub fn render_top_bar(frame: &mut Frame, area: Rect, site: &SiteInfo, is_loading: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Title + tagline
            Constraint::Length(16), // Load status
        ])
        .split(area);

    let mut spans = vec![Span::styled(
        site.title.clone(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    if let Some(tagline) = site.tagline.as_deref().filter(|t| !t.is_empty()) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(tagline.to_string(), Style::default().fg(Color::DarkGray)));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(title, chunks[0]);

    let (status, color) = if is_loading {
        ("Loading…", Color::Yellow)
    } else {
        ("Ready", Color::Cyan)
    };
    let status = Paragraph::new(status)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(status, chunks[1]);
}

pub fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    cards: &HomeCards,
    site: &SiteInfo,
    at_home: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Sections (4 items + 2 borderlines)
            Constraint::Min(0),    // About (fills remaining space)
        ])
        .split(area);

    let section_items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|section| {
            let is_active = *section == ui_state.active_section;
            let count = cards[section.index()].len();
            ListItem::new(format!("{} ({})", section.title(), count))
                .style(item_style(is_active, at_home))
        })
        .collect();

    let sections_border_style = if at_home {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let sections = List::new(section_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Browse ")
            .padding(Padding::horizontal(1))
            .border_style(sections_border_style),
    );
    frame.render_widget(sections, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(bio) = site.bio.as_deref().filter(|b| !b.is_empty()) {
        lines.push(Line::from(bio.to_string()));
        lines.push(Line::from(""));
    }
    for event in &site.timeline {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>6} ", event.year.to_string()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(event.event.clone()),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Press H for help",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let about = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" About ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(about, chunks[1]);
}
