use ratatui::{prelude::*, widgets::*};

use crate::models::{Account, OperationOutcome};

/// Renders a text input field; focused fields get a yellow border
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool) -> Paragraph<'a> {
    let style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// One list row: status, name, balance and currency
pub fn account_line(account: &Account) -> Line<'static> {
    let (badge, color) = status_badge(account.is_active);
    Line::from(vec![
        Span::styled(format!("{:<10}", badge), Style::default().fg(color).bold()),
        Span::raw(format!("{:<24}", account.name)),
        Span::styled(
            format!("{:>14} ", account.balance),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(account.currency.clone(), Style::default().fg(Color::Cyan)),
    ])
}

/// Active flag label and color
pub fn status_badge(is_active: bool) -> (&'static str, Color) {
    if is_active {
        ("[active]", Color::Green)
    } else {
        ("[closed]", Color::DarkGray)
    }
}

/// Toast color: green for success, red for failure
pub fn outcome_style(outcome: &OperationOutcome) -> Style {
    match outcome {
        OperationOutcome::Success(_) => Style::default().fg(Color::Green).bold(),
        OperationOutcome::Failure(_) => Style::default().fg(Color::Red).bold(),
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
