//! Terminal rendering of the market table

use crate::app::{App, SPINNER_FRAMES};
use crate::types::CoinRecord;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

/// Column widths matching the ten table columns
const COLUMN_WIDTHS: [Constraint; 10] = [
    Constraint::Length(6),  // Rank
    Constraint::Length(20), // Name
    Constraint::Length(10), // Symbol
    Constraint::Length(15), // Price (USD)
    Constraint::Length(8),  // 1h
    Constraint::Length(8),  // 24h
    Constraint::Length(8),  // 7d
    Constraint::Length(15), // Market Cap
    Constraint::Length(15), // Volume (24h)
    Constraint::Length(15), // Total Supply
];

/// Draws one frame: the table (or spinner while loading) plus a status line
pub fn draw(frame: &mut Frame, app: &App, status: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    if app.loading {
        draw_spinner(frame, app, chunks[0]);
    } else {
        draw_table(frame, app, chunks[0]);
    }

    let hint = status.unwrap_or("q quit | \u{2190}/\u{2192} page | r n p 1 2 7 m a t sort");
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

fn draw_spinner(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        "{} Loading...",
        SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()]
    );
    frame.render_widget(Paragraph::new(text), area);
}

fn draw_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(
        app.view
            .column_titles()
            .into_iter()
            .map(|t| Cell::from(t).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .bottom_margin(1);

    let rows = app
        .view
        .visible()
        .into_iter()
        .map(|(rank, record)| market_row(rank, record));

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Rgb(255, 255, 175))
                .bg(Color::Rgb(95, 0, 215)),
        );

    let mut state = TableState::default();
    if app.focused && !app.view.visible().is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn market_row(rank: usize, record: &CoinRecord) -> Row<'static> {
    Row::new(vec![
        Cell::from(rank.to_string()),
        Cell::from(record.name.clone()),
        Cell::from(record.symbol.to_uppercase()),
        Cell::from(format!("${:.2}", record.price_usd)),
        change_cell(record.change_1h),
        change_cell(record.change_24h),
        change_cell(record.change_7d),
        Cell::from(format!("${:.2}M", record.market_cap / 1e6)),
        Cell::from(format!("${:.2}M", record.volume_24h / 1e6)),
        Cell::from(format!("{:.2}M", record.total_supply / 1e6)),
    ])
}

/// Percentage cell, red for losses and green otherwise
fn change_cell(change: f64) -> Cell<'static> {
    let color = if change < 0.0 { Color::Red } else { Color::Green };
    Cell::from(format!("{:.2}%", change)).style(Style::default().fg(color))
}
