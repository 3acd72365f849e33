// ============================================================================
// Module : pages
// ============================================================================
// Une structure d'état par page. Les pages ne partagent rien : chacune
// produit ses Commands et applique ses propres Outcomes.
// ============================================================================

pub mod annual;    // 연간 재무 top100
pub mod quarterly; // 분기별 재무 top100
pub mod search;    // 종목검색

pub use annual::AnnualRankingPage;
pub use quarterly::QuarterlyRankingPage;
pub use search::SearchPage;

use crate::models::StockRecord;

/// Message affiché quand le serveur est injoignable
pub const CONNECTION_ERROR: &str = "서버와 연결할 수 없습니다.";

/// Message pour une métrique sans endpoint
pub fn unsupported_metric_message(label: &str) -> String {
    format!("\"{}\" 기능은 아직 구현되지 않았습니다.", label)
}

/// Lignes et erreur d'une page de classement
///
/// Invariant : une erreur affichée implique un tableau vide.
#[derive(Debug, Clone, Default)]
pub struct RankingView {
    pub stocks: Vec<StockRecord>,
    pub error: Option<String>,
    /// Ligne sous le curseur du tableau
    pub selected_row: usize,
}

impl RankingView {
    /// Remplace les lignes et efface l'erreur
    pub fn show(&mut self, stocks: Vec<StockRecord>) {
        self.stocks = stocks;
        self.error = None;
        self.selected_row = 0;
    }

    /// Affiche l'erreur et vide le tableau
    pub fn fail(&mut self, message: impl Into<String>) {
        self.stocks.clear();
        self.error = Some(message.into());
        self.selected_row = 0;
    }

    pub fn row_down(&mut self) {
        let max_index = self.stocks.len().saturating_sub(1);
        self.selected_row = (self.selected_row + 1).min(max_index);
    }

    pub fn row_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fail_clears_rows() {
        let mut view = RankingView::default();
        view.show(vec![StockRecord::from_value(json!({"종목명": "LG"})).unwrap()]);
        view.row_down();
        assert_eq!(view.selected_row, 0);

        view.fail(CONNECTION_ERROR);
        assert!(view.stocks.is_empty());
        assert_eq!(view.error.as_deref(), Some(CONNECTION_ERROR));
    }
}
