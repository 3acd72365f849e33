// ============================================================================
// Page : 분기별 재무 top100 (classement trimestriel)
// ============================================================================
// Même principe que le classement annuel, avec des trimestres et un seul
// endpoint (/quarterly-financial) qui reçoit la métrique en paramètre.
// ============================================================================

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::dispatcher::Command;
use crate::models::metric::{DEFAULT_QUARTER, QUARTERS};
use crate::models::{QuarterlySelection, RankingMetric, StockRecord};
use crate::pages::{unsupported_metric_message, RankingView, CONNECTION_ERROR};

/// État du classement trimestriel
#[derive(Debug, Clone, Default)]
pub struct QuarterlyRankingPage {
    pub metric: Option<RankingMetric>,
    pub quarter: Option<String>,
    /// La rangée de trimestres est visible
    pub show_quarters: bool,
    /// Bouton sous le curseur
    pub cursor: usize,
    pub view: RankingView,
}

impl QuarterlyRankingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<QuarterlySelection> {
        Some(QuarterlySelection {
            metric: self.metric?,
            quarter: self.quarter.clone()?,
        })
    }

    /// Bouton de métrique : affiche les trimestres, revient sur 2024-Q1
    pub fn select_metric(&mut self, metric: RankingMetric) -> Option<Command> {
        if !RankingMetric::QUARTERLY.contains(&metric) {
            return self.reject(metric.label());
        }

        self.metric = Some(metric);
        self.show_quarters = true;
        self.quarter = Some(DEFAULT_QUARTER.to_string());
        if let Some(index) = RankingMetric::QUARTERLY.iter().position(|m| *m == metric) {
            self.cursor = index;
        }

        info!(metric = metric.label(), quarter = DEFAULT_QUARTER, "Quarterly ranking metric selected");
        self.request()
    }

    pub fn select_metric_label(&mut self, label: &str) -> Option<Command> {
        match RankingMetric::from_label(label) {
            Some(metric) => self.select_metric(metric),
            None => self.reject(label),
        }
    }

    fn reject(&mut self, label: &str) -> Option<Command> {
        warn!(label, "Unsupported quarterly metric");
        self.view.fail(unsupported_metric_message(label));
        None
    }

    /// Bouton de trimestre
    pub fn select_quarter(&mut self, quarter: &str) -> Option<Command> {
        if !self.show_quarters {
            debug!(quarter, "No metric selected yet");
            return None;
        }
        self.quarter = Some(quarter.to_string());
        self.request()
    }

    pub fn next_quarter(&mut self) -> Option<Command> {
        let next = self
            .quarter_index()
            .map_or(0, |i| (i + 1).min(QUARTERS.len() - 1));
        self.select_quarter(QUARTERS[next])
    }

    pub fn previous_quarter(&mut self) -> Option<Command> {
        let previous = self.quarter_index().map_or(0, |i| i.saturating_sub(1));
        self.select_quarter(QUARTERS[previous])
    }

    fn quarter_index(&self) -> Option<usize> {
        let quarter = self.quarter.as_deref()?;
        QUARTERS.iter().position(|q| *q == quarter)
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(RankingMetric::QUARTERLY.len() - 1);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_cursor(&mut self) -> Option<Command> {
        let metric = RankingMetric::QUARTERLY[self.cursor.min(RankingMetric::QUARTERLY.len() - 1)];
        self.select_metric(metric)
    }

    /// "매출액 (2024-Q1)" : titre de colonne et clé de la valeur
    pub fn column_title(&self) -> Option<String> {
        self.selection().map(|s| s.column_title())
    }

    fn request(&self) -> Option<Command> {
        self.selection().map(Command::QuarterlyRanking)
    }

    pub fn apply(&mut self, selection: &QuarterlySelection, result: Result<Vec<StockRecord>, ApiError>) {
        if self.selection().as_ref() != Some(selection) {
            debug!(?selection, "Dropping stale quarterly outcome");
            return;
        }

        match result {
            Ok(stocks) => {
                info!(metric = selection.metric.label(), quarter = %selection.quarter, rows = stocks.len(), "Quarterly ranking loaded");
                self.view.show(stocks);
            }
            Err(e) if e.is_no_data() => {
                self.view.fail(format!("{} 데이터가 없습니다.", selection.metric.label()));
            }
            Err(e) => {
                warn!(error = %e, "Failed to load quarterly ranking");
                self.view.fail(CONNECTION_ERROR);
            }
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_metric_defaults_to_first_quarter_of_2024() {
        let mut page = QuarterlyRankingPage::new();
        assert_eq!(page.select_quarter("2023-Q3"), None);

        let request = page.select_metric(RankingMetric::Roe).unwrap().request();
        assert_eq!(request.path, "quarterly-financial");
        assert_eq!(request.param_value("quarter"), Some("2024-Q1"));
        assert_eq!(request.param_value("metric"), Some("ROE"));
        assert_eq!(page.column_title().as_deref(), Some("ROE (2024-Q1)"));
    }

    #[test]
    fn test_quarter_change_reissues_request() {
        let mut page = QuarterlyRankingPage::new();
        page.select_metric(RankingMetric::Per);
        let request = page.select_quarter("2023-Q4").unwrap().request();
        assert_eq!(request.param_value("quarter"), Some("2023-Q4"));
        assert_eq!(request.param_value("metric"), Some("PER"));

        page.next_quarter();
        assert_eq!(page.quarter.as_deref(), Some("2024-Q1"));
        // Nouvelle métrique : retour au trimestre par défaut
        page.select_quarter("2024-Q4");
        page.select_metric(RankingMetric::Eps);
        assert_eq!(page.quarter.as_deref(), Some("2024-Q1"));
    }

    #[test]
    fn test_market_cap_is_unsupported() {
        let mut page = QuarterlyRankingPage::new();
        assert_eq!(page.select_metric(RankingMetric::MarketCap), None);
        assert_eq!(
            page.view.error.as_deref(),
            Some("\"시가총액\" 기능은 아직 구현되지 않았습니다.")
        );
    }

    #[test]
    fn test_outcomes() {
        let mut page = QuarterlyRankingPage::new();
        page.select_metric(RankingMetric::Revenue);
        let selection = page.selection().unwrap();

        let stocks = vec![StockRecord::from_value(json!({"종목명": "삼성전자", "매출액 (2024-Q1)": 791_000})).unwrap()];
        page.apply(&selection, Ok(stocks.clone()));
        assert_eq!(page.view.stocks, stocks);

        page.apply(&selection, Err(ApiError::Empty));
        assert!(page.view.stocks.is_empty());
        assert_eq!(page.view.error.as_deref(), Some("매출액 데이터가 없습니다."));
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut page = QuarterlyRankingPage::new();
        page.select_metric(RankingMetric::Revenue);
        let old = page.selection().unwrap();
        page.previous_quarter();
        page.apply(&old, Err(ApiError::Empty));
        assert!(page.view.error.is_none());
    }
}
