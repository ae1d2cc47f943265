//! Now-playing bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::PlaybackInfo;

pub fn render_now_playing_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = playback.status_text();
    let style = if playback.now_playing.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let elapsed = playback.elapsed_text();
    let location = playback
        .now_playing
        .as_ref()
        .map(|track| format!(" {} ", track.location))
        .unwrap_or_default();

    let bar = Paragraph::new(Line::from(elapsed).right_aligned())
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status_text))
                .title_bottom(Line::from(location).right_aligned()),
        );

    frame.render_widget(bar, area);
}
