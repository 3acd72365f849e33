// ============================================================================
// Graphique à barres d'une série financière
// ============================================================================
// CONCEPTS RATATUI :
// 1. BarChart : hauteurs entières (u64), on met donc les valeurs à l'échelle
// 2. Bar::text_value : texte affiché dans la barre, indépendant de la hauteur
// 3. BarGroup : un seul groupe, une barre par période
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::models::format::{format_axis_value, MISSING};
use crate::models::series::series_points;
use crate::models::SeriesMetric;
use crate::pages::search::SeriesPanel;

/// Facteur d'échelle des pourcentages (garde une décimale dans la hauteur)
const PERCENT_SCALE: f64 = 10.0;

/// Largeur d'une barre en colonnes
const BAR_WIDTH: u16 = 9;

/// Hauteur d'une barre ; les valeurs négatives ou absentes donnent 0
pub fn bar_height(value: Option<f64>, percentage: bool) -> u64 {
    let scale = if percentage { PERCENT_SCALE } else { 1.0 };
    match value {
        Some(v) if v.is_finite() && v > 0.0 => (v * scale).round() as u64,
        _ => 0,
    }
}

/// Texte d'une barre ("12.3%", "1,234억" ou "N/A")
pub fn bar_text(value: Option<f64>, percentage: bool) -> String {
    match value {
        Some(v) => format_axis_value(v, percentage),
        None => MISSING.to_string(),
    }
}

/// Titre du graphique : "{종목명} 연간 {m}" ou "{종목명} 분기별 {m}"
///
/// Le nom vient du panneau : c'est l'action pour laquelle la série a été demandée.
pub fn chart_title(panel: &SeriesPanel, metric: SeriesMetric) -> String {
    format!(
        "{} {} {}",
        panel.stock_name().unwrap_or_default(),
        panel.period.title(),
        metric.label()
    )
}

/// Dessine un panneau de série : chargement, erreur ou graphique
pub fn render_series_panel(frame: &mut Frame, panel: &SeriesPanel, area: Rect) {
    let title = match panel.selected {
        Some(metric) => format!(" {} ({}) ", chart_title(panel, metric), metric.unit()),
        None => format!(" {} ", panel.period.title()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    if panel.loading {
        let paragraph = Paragraph::new("로딩 중...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(error) = &panel.error {
        let paragraph = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let metric = match panel.selected {
        Some(metric) if !panel.data.is_empty() => metric,
        _ => {
            frame.render_widget(block, area);
            return;
        }
    };

    let percentage = metric.is_percentage();
    let bars: Vec<Bar> = series_points(&panel.data, metric)
        .into_iter()
        .map(|point| {
            let color = match point.value {
                Some(v) if v < 0.0 => Color::Red,
                _ => Color::Green,
            };
            Bar::default()
                .value(bar_height(point.value, percentage))
                .text_value(bar_text(point.value, percentage))
                .label(Line::from(point.label))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(1);

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::search::SearchPage;
    use serde_json::json;

    fn stock(name: &str) -> crate::models::StockRecord {
        crate::models::StockRecord::from_value(json!({"종목명": name})).unwrap()
    }

    #[test]
    fn test_title_names_the_requested_stock() {
        let mut page = SearchPage::new();
        page.set_query("삼성");
        page.submit_search();
        page.apply_search("삼성", Ok(vec![stock("삼성전자")]));
        page.request_annual("매출액");

        // Une nouvelle recherche change l'action affichée, pas le graphique
        page.set_query("카카오");
        page.submit_search();
        page.apply_search("카카오", Ok(vec![stock("카카오")]));

        assert_eq!(chart_title(&page.annual, SeriesMetric::Sales), "삼성전자 연간 매출액");
    }

    #[test]
    fn test_bar_height_scales_percentages() {
        assert_eq!(bar_height(Some(9.84), true), 98);
        assert_eq!(bar_height(Some(2589.6), false), 2590);
    }

    #[test]
    fn test_negative_and_missing_bars_are_flat() {
        assert_eq!(bar_height(Some(-120.0), false), 0);
        assert_eq!(bar_height(None, false), 0);
        assert_eq!(bar_text(None, true), "N/A");
        assert_eq!(bar_text(Some(-1500.0), false), "-1,500억");
    }

    #[test]
    fn test_percentage_text() {
        assert_eq!(bar_text(Some(12.34), true), "12.3%");
    }
}
