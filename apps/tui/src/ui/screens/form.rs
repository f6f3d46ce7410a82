use crate::app::{App, FormFocus};
use crate::domain::AddressField;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const LABEL_WIDTH: u16 = 18;

pub fn render_form(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(15),   // Form area
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_section(f, main_layout[0]);
    render_fields(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);
}

fn render_title_section(f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Precinct ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Lookup",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_fields(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    for field in AddressField::ALL {
        render_field(app, f, field, rows[field.index()]);
    }

    render_button(app, f, rows[AddressField::ALL.len()]);
}

fn render_field(app: &App, f: &mut Frame<'_>, field: AddressField, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(LABEL_WIDTH),
            Constraint::Length(field.width() + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let label = Paragraph::new(Text::from(vec![
        TextLine::from(""),
        TextLine::from(Span::styled(field.label(), Style::default().fg(Color::Gray))),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(label, columns[0]);

    let focused = app.focus == FormFocus::Field(field);
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value = app.form.get(field);
    let mut spans = vec![Span::styled(value, Style::default().fg(Color::White))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    // Keep the tail visible once the text outgrows the box
    let visible = usize::from(field.width().saturating_sub(1));
    let scroll = u16::try_from(value.chars().count().saturating_sub(visible)).unwrap_or(0);

    let input = Paragraph::new(TextLine::from(spans))
        .scroll((0, scroll))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    f.render_widget(input, columns[1]);
}

fn render_button(app: &App, f: &mut Frame<'_>, area: Rect) {
    let style = if app.focus == FormFocus::Button {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };

    let width = 21.min(area.width);
    let button_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y,
        width,
        height: area.height,
    };

    let button = Paragraph::new(Span::styled("Lookup Precinct", style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(button, button_area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_text = if app.status_message.is_empty() {
        "Fill in all four fields, then press Enter"
    } else {
        app.status_message.as_str()
    };

    let status = Paragraph::new(Text::from(status_text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .title(" Status ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    f.render_widget(status, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let hint = TextLine::from(vec![
        Span::styled("Tab/↓", key_style),
        Span::raw(": Next   "),
        Span::styled("Shift-Tab/↑", key_style),
        Span::raw(": Previous   "),
        Span::styled("Enter", key_style),
        Span::raw(": Lookup   "),
        Span::styled("Esc", key_style),
        Span::raw(": Quit"),
    ]);
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), area);
}
