// ============================================================================
// Rendu de la page 종목검색
// ============================================================================
//  ┌ 검색 ──────────────────────────────────────────────────────┐
//  │ > 삼성█                                                    │
//  ├ 종목 정보 ───────────────┬ 매출액 영업이익 ... ─────────────┤
//  ├ 재무제표 ────────────────┤ 연간 (graphique)                 │
//  │                          │ 분기별 (graphique)               │
//  │                          │ 최신 뉴스                        │
//  └──────────────────────────┴──────────────────────────────────┘
// La liste de suggestions est dessinée par-dessus, sous la saisie.
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::models::format::MISSING;
use crate::models::stock::value_to_text;
use crate::models::{SeriesMetric, StockRecord};
use crate::pages::SearchPage;
use crate::ui::bar_chart::render_series_panel;
use crate::ui::table::render_statement_table;

/// Champs de la fiche de l'action mise en avant
const INFO_KEYS: [&str; 5] = ["시장", "종목코드", "종목명", "업종명", "시가총액"];

pub fn render_search_page(frame: &mut Frame, page: &SearchPage, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_input(frame, page, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(columns[0]);

    render_stock_info(frame, page.highlighted.as_ref(), left[0]);
    render_statement_table(frame, page.highlighted.as_ref(), left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    render_metric_buttons(frame, page, right[0]);
    render_series_panel(frame, &page.annual, right[1]);
    render_series_panel(frame, &page.quarterly, right[2]);
    render_news(frame, page, right[3]);

    // Dessiné en dernier pour passer au-dessus du reste
    if page.editing && page.dropdown_open {
        render_suggestions(frame, page, rows[0], area);
    }
}

// ============================================================================
// Saisie
// ============================================================================

fn render_input(frame: &mut Frame, page: &SearchPage, area: Rect) {
    let border_color = if page.editing { Color::Green } else { Color::Cyan };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" 종목 검색 ");

    let mut input = vec![
        Span::styled("> ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(page.query.as_str(), Style::default().fg(Color::White)),
    ];
    if page.editing {
        input.push(Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ));
    } else if page.query.is_empty() {
        input.push(Span::styled(
            "종목명 또는 종목코드 ([/] 입력)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let status = match &page.error {
        Some(error) => Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
        None if !page.stocks.is_empty() => Line::from(Span::styled(
            format!("검색 결과 {}건", page.stocks.len()),
            Style::default().fg(Color::Gray),
        )),
        None => Line::from(""),
    };

    let paragraph = Paragraph::new(vec![Line::from(input), status]).block(block);
    frame.render_widget(paragraph, area);
}

/// Liste déroulante sous la saisie
fn render_suggestions(frame: &mut Frame, page: &SearchPage, input: Rect, page_area: Rect) {
    let height = (page.suggestions.len().max(1) as u16 + 2).min(12);
    let bottom = page_area.y + page_area.height;
    let y = input.y + input.height;
    if y >= bottom {
        return;
    }
    let area = Rect {
        x: input.x + 2,
        y,
        width: input.width.saturating_sub(4).min(50),
        height: height.min(bottom - y),
    };

    let items: Vec<ListItem> = if page.suggestions.is_empty() {
        vec![ListItem::new("검색 결과가 없습니다.").style(Style::default().fg(Color::Gray))]
    } else {
        page.suggestions
            .iter()
            .enumerate()
            .map(|(index, stock)| {
                let line = format!(
                    "{} ({})",
                    stock.name().unwrap_or_else(|| MISSING.to_string()),
                    stock.code().unwrap_or_else(|| MISSING.to_string())
                );
                let style = if page.suggestion_cursor == Some(index) {
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(list, area);
}

// ============================================================================
// Fiche et boutons
// ============================================================================

/// Lignes "clé: valeur" de la fiche, N/A quand la valeur manque
pub fn stock_info_lines(stock: &StockRecord) -> Vec<(&'static str, String)> {
    INFO_KEYS
        .iter()
        .map(|key| {
            let value = stock
                .get(key)
                .and_then(value_to_text)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| MISSING.to_string());
            (*key, value)
        })
        .collect()
}

fn render_stock_info(frame: &mut Frame, stock: Option<&StockRecord>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 종목 정보 ");

    let lines: Vec<Line> = match stock {
        Some(stock) => stock_info_lines(stock)
            .into_iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::styled(format!("{:<6}", key), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::raw(value),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "종목을 검색하세요.",
            Style::default().fg(Color::Gray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_metric_buttons(frame: &mut Frame, page: &SearchPage, area: Rect) {
    let focused = page.focused_metric();

    let mut spans: Vec<Span> = SeriesMetric::ALL
        .iter()
        .flat_map(|metric| {
            let style = if *metric == focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            [Span::styled(format!(" {} ", metric.label()), style), Span::raw(" ")]
        })
        .collect();

    if page.annual.loading || page.quarterly.loading {
        spans.push(Span::styled("로딩 중...", Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" [h/l] 선택  [y] 연간  [u] 분기별 "),
    );
    frame.render_widget(paragraph, area);
}

fn render_news(frame: &mut Frame, page: &SearchPage, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 최신 뉴스 [n] ");

    let news = &page.news;
    let lines: Vec<Line> = if news.loading {
        vec![Line::from(Span::styled("로딩 중...", Style::default().fg(Color::Yellow)))]
    } else if let Some(error) = &news.error {
        vec![Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))]
    } else {
        news.items
            .iter()
            .flat_map(|item| {
                [
                    Line::from(vec![
                        Span::styled(item.date.as_str(), Style::default().fg(Color::Gray)),
                        Span::raw(" "),
                        Span::styled(item.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(Span::raw(item.summary.as_str())),
                    Line::from(Span::styled(item.link.as_str(), Style::default().fg(Color::Blue))),
                ]
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stock_info_missing_fields() {
        let stock = StockRecord::from_value(json!({
            "종목명": "카카오",
            "종목코드": "035720",
            "시장": "",
        }))
        .unwrap();

        let lines = stock_info_lines(&stock);
        assert_eq!(lines[0], ("시장", "N/A".to_string()));
        assert_eq!(lines[1], ("종목코드", "035720".to_string()));
        assert_eq!(lines[2], ("종목명", "카카오".to_string()));
        assert_eq!(lines[4], ("시가총액", "N/A".to_string()));
    }
}
