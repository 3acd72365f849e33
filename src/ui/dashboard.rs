// ============================================================================
// Dashboard - Cadre de l'interface
// ============================================================================
// Dessine le cadre commun à toutes les pages :
// - header avec le nom de l'application
// - barre de navigation (Tabs) : remplace le routeur d'URL
// - contenu de la page active
// - footer : raccourcis ou confirmation de sortie
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Tabs : onglets avec un index sélectionné
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Page};
use crate::ui::ranking::{render_annual_page, render_quarterly_page};
use crate::ui::search::render_search_page;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Une seule page active, le compilateur force à gérer toutes les pages
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0]);
    render_navbar(frame, app, chunks[1]);

    match app.current_page {
        Page::Search => render_search_page(frame, &app.search, chunks[2]),
        Page::AnnualRanking => render_annual_page(frame, &app.annual, chunks[2]),
        Page::QuarterlyRanking => render_quarterly_page(frame, &app.quarterly, chunks[2]),
    }

    render_footer(frame, app, chunks[3]);
}

/// Header, navigation, contenu, footer
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Navigation
            Constraint::Min(0),    // Page
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Stockter",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

fn render_navbar(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(index, page)| Line::from(format!("{} {}", index + 1, page.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(app.current_page.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

// ============================================================================
// Footer : raccourcis clavier
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = |text: &'static str| {
        Span::styled(text, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    };

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        // CONCEPT : Style avec BLINK pour attirer l'attention
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if app.is_editing() {
        Line::from(vec![
            key("[Enter]"),
            Span::raw(" 검색  "),
            key("[↑↓]"),
            Span::raw(" 추천 종목  "),
            key("[Esc]"),
            Span::raw(" 취소"),
        ])
    } else {
        let mut spans = vec![
            key("[q]"),
            Span::raw(" Quit  "),
            key("[Tab / 1-3]"),
            Span::raw(" Page  "),
        ];
        match app.current_page {
            Page::Search => spans.extend([
                key("[/]"),
                Span::raw(" 검색  "),
                key("[r]"),
                Span::raw(" 초기화"),
            ]),
            Page::AnnualRanking | Page::QuarterlyRanking => spans.extend([
                key("[↑↓ / j k]"),
                Span::raw(" Navigate"),
            ]),
        }
        if app.is_loading() {
            spans.push(Span::styled("  로딩 중...", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
