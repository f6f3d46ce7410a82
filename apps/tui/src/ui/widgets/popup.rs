use crate::app::{App, Dialog, DialogKind};

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    horizontal_layout[1]
}

pub fn render_dialog(dialog: &Dialog, f: &mut Frame<'_>) {
    let area = centered_rect(70, 50, f.area());
    f.render_widget(Clear, area);

    let accent = match dialog.kind {
        DialogKind::Error => Color::Red,
        DialogKind::Info => Color::Cyan,
    };

    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    f.render_widget(block, area);

    let inner = area.inner(Margin::new(2, 1));
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(Text::from(
        dialog
            .message
            .lines()
            .map(|line| TextLine::from(line.to_string()))
            .collect::<Vec<_>>(),
    ))
    .style(Style::default().fg(Color::White))
    .wrap(Wrap { trim: false });
    f.render_widget(message, layout[0]);

    let hint = TextLine::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": OK"),
    ]);
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), layout[1]);
}

pub fn render_lookup_progress(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    let popup = Rect {
        x: area.width.saturating_sub(36) / 2,
        y: area.height.saturating_sub(3) / 2,
        width: 36.min(area.width),
        height: 3.min(area.height),
    };
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(block, popup);

    let throbber = Throbber::default()
        .label("Looking up precinct...")
        .style(Style::default().fg(Color::White))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(BRAILLE_SIX);
    let mut state = app.throbber_state.clone();
    f.render_stateful_widget(throbber, popup.inner(Margin::new(1, 1)), &mut state);
}
