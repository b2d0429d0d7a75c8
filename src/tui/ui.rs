//! Stateless UI rendering for the card grid.

use super::app::{CardFace, TerminalApp};
use crate::games::pairs::Visibility;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const CELL_WIDTH: u16 = 10;
const CELL_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &TerminalApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Score panel
            Constraint::Min(12),   // Grid
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Strictly Pairs - Memory")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_score_panel(frame, chunks[1], app);
    draw_grid(frame, chunks[2], app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    if app.summary().is_some() {
        draw_summary(frame, area, app);
    }
}

fn draw_score_panel(frame: &mut Frame, area: Rect, app: &TerminalApp) {
    let filled = usize::from(app.stars());
    let empty = usize::from(app.max_stars().saturating_sub(app.stars()));
    let stars = format!("{}{}", "★ ".repeat(filled), "☆ ".repeat(empty));

    let line = Line::from(vec![
        Span::styled(stars, Style::default().fg(Color::Yellow)),
        Span::raw("   "),
        Span::raw(format!("{} Moves", app.moves())),
        Span::raw("   "),
        Span::styled(app.clock().to_string(), Style::default().fg(Color::Green)),
    ]);

    let panel = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn draw_grid(frame: &mut Frame, area: Rect, app: &TerminalApp) {
    let columns = app.columns();
    let rows = app.cards().len().div_ceil(columns);
    if rows == 0 {
        return;
    }

    let width = CELL_WIDTH * columns as u16;
    let height = CELL_HEIGHT * rows as u16;
    let grid_area = center_rect(area, width, height);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); rows])
        .split(grid_area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); columns])
            .split(*row_area);

        for (column, cell_area) in cells.iter().enumerate() {
            let index = row * columns + column;
            if let Some(face) = app.cards().get(index) {
                draw_cell(frame, *cell_area, face, index == app.cursor());
            }
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, face: &CardFace, selected: bool) {
    let (text, base_style) = match face.visibility {
        Visibility::Hidden => (" ".to_string(), Style::default().fg(Color::DarkGray)),
        Visibility::Revealed => (
            face.symbol.glyph().to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Visibility::Matched => (
            face.symbol.glyph().to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let border_style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cell = Paragraph::new(Line::from(Span::styled(text, base_style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(cell, area);
}

fn draw_summary(frame: &mut Frame, area: Rect, app: &TerminalApp) {
    let Some(summary) = app.summary() else {
        return;
    };
    let popup = center_rect(area, 40, 7);

    let text = vec![
        Line::from(Span::styled(
            "Congratulations! You won!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} moves and {} stars in {}",
            summary.moves,
            summary.stars,
            summary.clock()
        )),
        Line::from(""),
        Line::from("Press 'r' to play again"),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().title("Game Over").borders(Borders::ALL));
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
