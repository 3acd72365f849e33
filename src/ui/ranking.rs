// ============================================================================
// Rendu des pages de classement (annuel et trimestriel)
// ============================================================================
// Même disposition pour les deux pages :
// - rangée de boutons de métriques (curseur + sélection)
// - rangée d'années / trimestres, visible une fois une métrique choisie
// - tableau 순위 / 종목명 / métrique, ou le message d'erreur
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::metric::{QUARTERS, YEARS};
use crate::models::RankingMetric;
use crate::pages::{AnnualRankingPage, QuarterlyRankingPage, RankingView};
use crate::ui::table::render_ranking_table;

pub fn render_annual_page(frame: &mut Frame, page: &AnnualRankingPage, area: Rect) {
    let chunks = split(area);

    // PER / PBR : la flèche indique le sens de tri
    let buttons: Vec<(String, bool)> = RankingMetric::ANNUAL
        .iter()
        .map(|metric| {
            let label = if metric.has_direction() {
                format!("{} {}", metric.label(), page.direction(*metric).arrow())
            } else {
                metric.label().to_string()
            };
            (label, page.metric == Some(*metric))
        })
        .collect();
    render_buttons(frame, " 항목 [h/l] [Enter] ", &buttons, page.cursor, chunks[0]);

    let periods = page.show_years.then_some(&YEARS[..]);
    render_periods(frame, " 연도 [ [ / ] ] ", periods, page.year.as_deref(), chunks[1]);

    let column = page.metric.map(|m| m.label().to_string());
    render_view(frame, &page.view, column.as_deref(), chunks[2]);
}

pub fn render_quarterly_page(frame: &mut Frame, page: &QuarterlyRankingPage, area: Rect) {
    let chunks = split(area);

    let buttons: Vec<(String, bool)> = RankingMetric::QUARTERLY
        .iter()
        .map(|metric| (metric.label().to_string(), page.metric == Some(*metric)))
        .collect();
    render_buttons(frame, " 항목 [h/l] [Enter] ", &buttons, page.cursor, chunks[0]);

    let periods = page.show_quarters.then_some(&QUARTERS[..]);
    render_periods(frame, " 분기 [ [ / ] ] ", periods, page.quarter.as_deref(), chunks[1]);

    let column = page.column_title();
    render_view(frame, &page.view, column.as_deref(), chunks[2]);
}

fn split(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Métriques
            Constraint::Length(3), // Périodes
            Constraint::Min(0),    // Tableau
        ])
        .split(area)
        .to_vec()
}

/// Rangée de boutons : sélection en cyan, curseur souligné
fn render_buttons(frame: &mut Frame, title: &str, buttons: &[(String, bool)], cursor: usize, area: Rect) {
    let spans: Vec<Span> = buttons
        .iter()
        .enumerate()
        .flat_map(|(index, (label, selected))| {
            let mut style = if *selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            if index == cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            [Span::styled(format!(" {} ", label), style), Span::raw(" ")]
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title.to_string()),
    );
    frame.render_widget(paragraph, area);
}

fn render_periods(frame: &mut Frame, title: &str, periods: Option<&[&str]>, current: Option<&str>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title.to_string());

    let line = match periods {
        Some(periods) => Line::from(
            periods
                .iter()
                .flat_map(|period| {
                    let style = if current == Some(*period) {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    [Span::styled(format!(" {} ", period), style), Span::raw(" ")]
                })
                .collect::<Vec<_>>(),
        ),
        None => Line::from(Span::styled("-", Style::default().fg(Color::DarkGray))),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Tableau, ou erreur / invitation à choisir une métrique
fn render_view(frame: &mut Frame, view: &RankingView, column: Option<&str>, area: Rect) {
    let (text, color) = match (&view.error, column) {
        (Some(error), _) => (error.as_str(), Color::Red),
        (None, Some(column)) => {
            render_ranking_table(frame, &view.stocks, column, view.selected_row, area);
            return;
        }
        (None, None) => ("항목을 선택하세요.", Color::Gray),
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(color)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}
