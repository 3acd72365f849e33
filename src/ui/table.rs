// ============================================================================
// Tableaux : états financiers d'une action et classements
// ============================================================================
// Les fonctions de construction des cellules sont séparées du rendu pour
// pouvoir être testées sans terminal.
// ============================================================================

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::format::{format_statement_value, MISSING};
use crate::models::metric::YEARS;
use crate::models::stock::value_to_text;
use crate::models::StockRecord;

/// Lignes du tableau financier (une par clé)
const STATEMENT_KEYS: [&str; 9] = [
    "매출액",
    "영업이익",
    "영업이익률",
    "순이익률",
    "EPS",
    "PER",
    "PBR",
    "주당배당금",
    "시가배당률",
];

/// Message quand aucune action n'est affichée
pub const NO_DATA: &str = "표시할 데이터가 없습니다.";

/// Cellule absente d'un classement
pub const MISSING_CELL: &str = "데이터 없음";

/// Suffixe d'unité dans le nom des colonnes du serveur ("2023.12 EPS(원)")
fn unit_suffix(key: &str) -> &'static str {
    match key {
        "EPS" | "주당배당금" => "(원)",
        "PER" | "PBR" => "(배)",
        "시가배당률" | "영업이익률" | "순이익률" => "(%)",
        _ => "",
    }
}

/// Valeur d'une clé pour une année : avec unité d'abord, puis sans
pub fn statement_cell(stock: &StockRecord, year: &str, key: &str) -> String {
    let with_unit = format!("{}.12 {}{}", year, key, unit_suffix(key));
    let without_unit = format!("{}.12 {}", year, key);
    let value = stock.get(&with_unit).or_else(|| stock.get(&without_unit));
    format_statement_value(key, value)
}

/// Tableau complet : (clé, une valeur par année)
pub fn statement_rows(stock: &StockRecord) -> Vec<(&'static str, Vec<String>)> {
    STATEMENT_KEYS
        .iter()
        .map(|key| {
            let cells = YEARS.iter().map(|year| statement_cell(stock, year, key)).collect();
            (*key, cells)
        })
        .collect()
}

/// Cellule de la colonne de métrique d'un classement
pub fn ranking_cell(stock: &StockRecord, column: &str) -> String {
    stock
        .get(column)
        .and_then(value_to_text)
        .unwrap_or_else(|| MISSING_CELL.to_string())
}

// ============================================================================
// Rendu
// ============================================================================

/// Dessine le tableau financier de l'action mise en avant
pub fn render_statement_table(frame: &mut Frame, stock: Option<&StockRecord>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 재무제표 ");

    let stock = match stock {
        Some(stock) => stock,
        None => {
            let paragraph = Paragraph::new(NO_DATA)
                .style(Style::default().fg(Color::Gray))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let header = Row::new(
        std::iter::once("항목")
            .chain(YEARS.iter().copied())
            .map(|title| Cell::from(title).style(header_style())),
    );

    let rows: Vec<Row> = statement_rows(stock)
        .into_iter()
        .map(|(key, cells)| {
            let style = |text: &str| {
                if text == MISSING {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                }
            };
            let mut row = vec![Cell::from(key).style(Style::default().fg(Color::Yellow))];
            row.extend(cells.into_iter().map(|text| {
                let s = style(&text);
                Cell::from(text).style(s)
            }));
            Row::new(row)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Dessine un tableau de classement (순위, 종목명, métrique)
pub fn render_ranking_table(
    frame: &mut Frame,
    stocks: &[StockRecord],
    column: &str,
    selected_row: usize,
    area: Rect,
) {
    let header = Row::new(vec![
        Cell::from("순위").style(header_style()),
        Cell::from("종목명").style(header_style()),
        Cell::from(column.to_string()).style(header_style()),
    ]);

    let rows: Vec<Row> = stocks
        .iter()
        .enumerate()
        .map(|(index, stock)| {
            Row::new(vec![
                Cell::from((index + 1).to_string()),
                Cell::from(stock.name().unwrap_or_else(|| MISSING_CELL.to_string())),
                Cell::from(ranking_cell(stock, column)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(45),
        Constraint::Percentage(45),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", column)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED),
        );

    // CONCEPT RATATUI : StatefulWidget
    // - TableState porte la ligne sélectionnée et le défilement
    let mut state = TableState::default().with_selected(Some(selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}

fn header_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}
