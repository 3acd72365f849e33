// ============================================================================
// Page : 종목검색 (recherche d'action)
// ============================================================================
// État de la page de recherche :
// - saisie + autocomplétion
// - résultats et action mise en avant (highlighted)
// - deux panneaux de séries (annuelle / trimestrielle) et les actualités
//
// Chaque méthode d'action renvoie Option<Command> : Some si une requête doit
// partir. Les méthodes apply_* reçoivent la réponse et mettent l'état à jour.
// ============================================================================

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::dispatcher::Command;
use crate::models::suggestion::rank_suggestions;
use crate::models::{NewsItem, SeriesMetric, StockRecord};
use crate::pages::CONNECTION_ERROR;

/// Message quand la recherche est vide
pub const EMPTY_QUERY: &str = "검색어를 입력하세요.";

/// Message quand la recherche ne renvoie rien
pub const NO_RESULTS: &str = "검색 결과가 없습니다.";

/// Message quand on demande des données sans action sélectionnée
pub const NO_STOCK_SELECTED: &str = "종목을 선택하지 않았습니다. 검색 후 선택해주세요.";

/// Période d'un panneau de série
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Annual,
    Quarterly,
}

impl Period {
    /// Préfixe des messages ("" ou " 분기별")
    fn qualifier(&self) -> &'static str {
        match self {
            Period::Annual => "",
            Period::Quarterly => " 분기별",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Period::Annual => "연간",
            Period::Quarterly => "분기별",
        }
    }
}

// ============================================================================
// Panneaux de données liées à l'action sélectionnée
// ============================================================================

/// Série financière affichée en graphique
#[derive(Debug, Clone)]
pub struct SeriesPanel {
    pub period: Period,
    pub data: Vec<StockRecord>,
    pub loading: bool,
    pub error: Option<String>,
    /// Métrique du dernier bouton pressé
    pub selected: Option<SeriesMetric>,
    /// Action pour laquelle la requête est partie
    stock_name: Option<String>,
}

impl SeriesPanel {
    fn new(period: Period) -> Self {
        Self {
            period,
            data: Vec::new(),
            loading: false,
            error: None,
            selected: None,
            stock_name: None,
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.period);
    }

    /// Action des données affichées (ou en cours de chargement)
    pub fn stock_name(&self) -> Option<&str> {
        self.stock_name.as_deref()
    }

    /// Démarre une requête pour la métrique donnée
    fn request(&mut self, label: &str, highlighted: Option<&StockRecord>) -> Option<Command> {
        if self.loading {
            warn!(period = ?self.period, "Series already loading, ignoring request");
            return None;
        }

        let stock_name = match highlighted.and_then(StockRecord::name) {
            Some(name) => name,
            None => {
                self.error = Some(NO_STOCK_SELECTED.to_string());
                return None;
            }
        };

        let metric = match SeriesMetric::from_label(label) {
            Some(metric) => metric,
            None => {
                warn!(label, period = ?self.period, "Unsupported series metric");
                return None;
            }
        };

        self.loading = true;
        self.error = None;
        self.data.clear();
        self.selected = Some(metric);
        self.stock_name = Some(stock_name.clone());

        Some(match self.period {
            Period::Annual => Command::AnnualSeries { stock_name, metric },
            Period::Quarterly => Command::QuarterlySeries { stock_name, metric },
        })
    }

    /// Applique la réponse si elle correspond à la requête en cours
    fn apply(
        &mut self,
        stock_name: &str,
        metric: SeriesMetric,
        result: Result<Vec<StockRecord>, ApiError>,
    ) {
        if !self.loading
            || self.selected != Some(metric)
            || self.stock_name.as_deref() != Some(stock_name)
        {
            debug!(stock_name, metric = metric.label(), "Dropping stale series outcome");
            return;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                info!(stock_name, metric = metric.label(), points = data.len(), "Series loaded");
                self.data = data;
            }
            Err(e) if e.is_no_data() => {
                self.error = Some(format!("{}{} 데이터가 없습니다.", metric.label(), self.period.qualifier()));
            }
            Err(e) => {
                warn!(error = %e, "Failed to load series");
                self.error = Some(format!(
                    "{}{} 데이터를 가져오는 중 오류가 발생했습니다.",
                    metric.label(),
                    self.period.qualifier()
                ));
            }
        }
    }
}

/// Dernières actualités
#[derive(Debug, Clone, Default)]
pub struct NewsPanel {
    pub items: Vec<NewsItem>,
    pub loading: bool,
    pub error: Option<String>,
    stock_name: Option<String>,
}

// ============================================================================
// Structure : SearchPage
// ============================================================================

/// État de la page de recherche
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// Texte saisi
    pub query: String,

    /// La saisie capture le clavier
    pub editing: bool,

    /// Résultats de la dernière recherche (nettoyés)
    pub stocks: Vec<StockRecord>,

    /// Action affichée en détail
    pub highlighted: Option<StockRecord>,

    /// Message d'erreur de la recherche
    pub error: Option<String>,

    /// Suggestions d'autocomplétion
    pub suggestions: Vec<StockRecord>,

    /// Liste déroulante visible
    pub dropdown_open: bool,

    /// Suggestion sous le curseur
    pub suggestion_cursor: Option<usize>,

    /// Métrique sous le curseur pour les boutons de séries
    pub metric_cursor: usize,

    pub annual: SeriesPanel,
    pub quarterly: SeriesPanel,
    pub news: NewsPanel,

    /// Recherche partie et pas encore appliquée
    pending_search: Option<String>,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchPage {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            editing: false,
            stocks: Vec::new(),
            highlighted: None,
            error: None,
            suggestions: Vec::new(),
            dropdown_open: false,
            suggestion_cursor: None,
            metric_cursor: 0,
            annual: SeriesPanel::new(Period::Annual),
            quarterly: SeriesPanel::new(Period::Quarterly),
            news: NewsPanel::default(),
            pending_search: None,
        }
    }

    // ========================================================================
    // Saisie et autocomplétion
    // ========================================================================

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
        self.close_dropdown();
    }

    /// Remplace la saisie ; demande des suggestions si elle n'est pas vide
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<Command> {
        self.query = query.into();

        if self.query.trim().is_empty() {
            self.suggestions.clear();
            self.close_dropdown();
            return None;
        }

        Some(Command::Suggest {
            query: self.query.clone(),
        })
    }

    pub fn push_char(&mut self, c: char) -> Option<Command> {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query)
    }

    pub fn pop_char(&mut self) -> Option<Command> {
        let mut query = self.query.clone();
        query.pop();
        self.set_query(query)
    }

    pub fn suggestion_down(&mut self) {
        if !self.dropdown_open || self.suggestions.is_empty() {
            return;
        }
        let max_index = self.suggestions.len() - 1;
        self.suggestion_cursor = Some(match self.suggestion_cursor {
            Some(index) => (index + 1).min(max_index),
            None => 0,
        });
    }

    pub fn suggestion_up(&mut self) {
        self.suggestion_cursor = match self.suggestion_cursor {
            Some(0) | None => None,
            Some(index) => Some(index - 1),
        };
    }

    fn close_dropdown(&mut self) {
        self.dropdown_open = false;
        self.suggestion_cursor = None;
    }

    /// Enter dans la saisie : suggestion sous le curseur, sinon recherche
    pub fn confirm(&mut self) -> Option<Command> {
        let command = match self.suggestion_cursor {
            Some(index) if self.dropdown_open => self.select_suggestion(index),
            _ => self.submit_search(),
        };
        self.editing = false;
        command
    }

    /// Lance la recherche avec la saisie courante
    pub fn submit_search(&mut self) -> Option<Command> {
        let query = self.query.clone();
        self.search(query)
    }

    fn search(&mut self, query: String) -> Option<Command> {
        if query.trim().is_empty() {
            self.error = Some(EMPTY_QUERY.to_string());
            return None;
        }

        self.error = None;
        self.suggestions.clear();
        self.close_dropdown();
        self.pending_search = Some(query.clone());
        Some(Command::Search { query })
    }

    /// Choisit une suggestion : elle devient l'action affichée et on la recherche
    pub fn select_suggestion(&mut self, index: usize) -> Option<Command> {
        let stock = self.suggestions.get(index)?.clone();
        let name = stock.name().unwrap_or_default();
        info!(stock_name = %name, "Suggestion selected");

        self.query = name.clone();
        self.highlighted = Some(stock);
        self.close_dropdown();
        self.search(name)
    }

    /// Remet la page dans son état initial
    pub fn reset(&mut self) {
        let metric_cursor = self.metric_cursor;
        *self = Self::new();
        self.metric_cursor = metric_cursor;
    }

    // ========================================================================
    // Boutons de séries et actualités
    // ========================================================================

    pub fn focused_metric(&self) -> SeriesMetric {
        SeriesMetric::ALL[self.metric_cursor % SeriesMetric::ALL.len()]
    }

    pub fn next_metric(&mut self) {
        self.metric_cursor = (self.metric_cursor + 1) % SeriesMetric::ALL.len();
    }

    pub fn previous_metric(&mut self) {
        let len = SeriesMetric::ALL.len();
        self.metric_cursor = (self.metric_cursor + len - 1) % len;
    }

    /// Bouton de série annuelle, par libellé
    pub fn request_annual(&mut self, label: &str) -> Option<Command> {
        self.annual.request(label, self.highlighted.as_ref())
    }

    /// Bouton de série trimestrielle, par libellé
    pub fn request_quarterly(&mut self, label: &str) -> Option<Command> {
        self.quarterly.request(label, self.highlighted.as_ref())
    }

    /// Bouton "최신 뉴스 가져오기"
    pub fn request_news(&mut self) -> Option<Command> {
        if self.news.loading {
            warn!("News already loading, ignoring request");
            return None;
        }
        let stock_name = match self.highlighted.as_ref().and_then(StockRecord::name) {
            Some(name) => name,
            None => {
                self.news.error = Some(NO_STOCK_SELECTED.to_string());
                return None;
            }
        };

        self.news.loading = true;
        self.news.error = None;
        self.news.items.clear();
        self.news.stock_name = Some(stock_name.clone());
        Some(Command::LatestNews { stock_name })
    }

    // ========================================================================
    // Réponses
    // ========================================================================

    /// Résultat d'une recherche validée ; seule la dernière recherche partie compte
    pub fn apply_search(&mut self, query: &str, result: Result<Vec<StockRecord>, ApiError>) {
        if self.pending_search.as_deref() != Some(query) {
            debug!(query, pending = ?self.pending_search, "Dropping stale search outcome");
            return;
        }
        self.pending_search = None;

        match result {
            Ok(records) => {
                let stocks: Vec<StockRecord> =
                    records.into_iter().map(StockRecord::cleaned).collect();
                info!(query, count = stocks.len(), "Search results received");
                self.highlighted = stocks.first().cloned();
                self.stocks = stocks;
                self.error = None;
            }
            Err(e) => {
                let message = if e.is_no_data() {
                    NO_RESULTS
                } else {
                    warn!(query, error = %e, "Search failed");
                    CONNECTION_ERROR
                };
                self.error = Some(message.to_string());
                self.stocks.clear();
                self.highlighted = None;
            }
        }
    }

    /// Résultat d'autocomplétion ; ignoré si la saisie a changé depuis
    pub fn apply_suggestions(&mut self, query: &str, result: Result<Vec<StockRecord>, ApiError>) {
        if query != self.query || !self.editing {
            debug!(query, current = %self.query, "Dropping stale suggestions");
            return;
        }

        match result {
            Ok(records) => {
                self.suggestions = rank_suggestions(records, query);
                self.dropdown_open = true;
                self.suggestion_cursor = None;
            }
            Err(ApiError::Empty) => {
                self.suggestions.clear();
                self.dropdown_open = true;
                self.suggestion_cursor = None;
            }
            Err(e) => {
                warn!(query, error = %e, "Autocomplete request failed");
            }
        }
    }

    pub fn apply_annual(
        &mut self,
        stock_name: &str,
        metric: SeriesMetric,
        result: Result<Vec<StockRecord>, ApiError>,
    ) {
        self.annual.apply(stock_name, metric, result);
    }

    pub fn apply_quarterly(
        &mut self,
        stock_name: &str,
        metric: SeriesMetric,
        result: Result<Vec<StockRecord>, ApiError>,
    ) {
        self.quarterly.apply(stock_name, metric, result);
    }

    pub fn apply_news(&mut self, stock_name: &str, result: Result<Vec<NewsItem>, ApiError>) {
        if !self.news.loading || self.news.stock_name.as_deref() != Some(stock_name) {
            debug!(stock_name, "Dropping stale news outcome");
            return;
        }

        self.news.loading = false;
        match result {
            Ok(items) => self.news.items = items,
            Err(e) if e.is_no_data() => {
                self.news.error = Some("최신 뉴스 데이터가 없습니다.".to_string());
            }
            Err(e) => {
                warn!(error = %e, "Failed to load latest news");
                self.news.error = Some("최신 뉴스 데이터를 가져오는 중 오류가 발생했습니다.".to_string());
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
    use reqwest::StatusCode;
    use serde_json::json;

    fn stock(name: &str, code: &str) -> StockRecord {
        StockRecord::from_value(json!({"종목명": name, "종목코드": code, "매출액": "1,000"})).unwrap()
    }

    /// Saisie + Enter, comme au clavier
    fn submit(page: &mut SearchPage, query: &str) {
        page.set_query(query);
        page.submit_search();
    }

    fn page_with_result() -> SearchPage {
        let mut page = SearchPage::new();
        submit(&mut page, "삼성");
        page.apply_search("삼성", Ok(vec![stock("삼성전자", "005930"), stock("삼성SDI", "006400")]));
        page
    }

    #[test]
    fn test_blank_query_sets_error_without_request() {
        let mut page = SearchPage::new();
        page.set_query("   ");
        assert_eq!(page.submit_search(), None);
        assert_eq!(page.error.as_deref(), Some(EMPTY_QUERY));
    }

    #[test]
    fn test_submit_issues_search() {
        let mut page = SearchPage::new();
        page.set_query("카카오");
        let command = page.submit_search().unwrap();
        assert_eq!(command, Command::Search { query: "카카오".into() });
        assert_eq!(command.request().param_value("query"), Some("카카오"));
    }

    #[test]
    fn test_success_replaces_rows_and_highlights_first() {
        let page = page_with_result();
        assert_eq!(page.stocks.len(), 2);
        assert_eq!(page.highlighted.as_ref().and_then(StockRecord::name).as_deref(), Some("삼성전자"));
        assert_eq!(page.stocks[0].get("매출액"), Some(&json!("1000")));
        assert!(page.error.is_none());
    }

    #[test]
    fn test_empty_result_clears_rows() {
        let mut page = page_with_result();
        submit(&mut page, "없는종목");
        page.apply_search("없는종목", Err(ApiError::Empty));
        assert!(page.stocks.is_empty());
        assert!(page.highlighted.is_none());
        assert_eq!(page.error.as_deref(), Some(NO_RESULTS));
    }

    #[test]
    fn test_transport_failure_shows_connection_error() {
        let mut page = page_with_result();
        submit(&mut page, "삼성");
        page.apply_search("삼성", Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert_eq!(page.error.as_deref(), Some(CONNECTION_ERROR));
        assert!(page.stocks.is_empty());
    }

    #[test]
    fn test_search_reply_after_reset_is_dropped() {
        let mut page = SearchPage::new();
        submit(&mut page, "삼성");
        page.reset();
        page.apply_search("삼성", Ok(vec![stock("삼성전자", "005930")]));
        assert!(page.stocks.is_empty());
        assert!(page.highlighted.is_none());
        assert!(page.error.is_none());
    }

    #[test]
    fn test_older_search_reply_is_dropped() {
        let mut page = SearchPage::new();
        submit(&mut page, "삼성");
        submit(&mut page, "카카오");

        page.apply_search("카카오", Ok(vec![stock("카카오", "035720")]));
        // La réponse de la première recherche arrive en retard
        page.apply_search("삼성", Ok(vec![stock("삼성전자", "005930")]));

        assert_eq!(page.stocks.len(), 1);
        assert_eq!(page.highlighted.as_ref().and_then(StockRecord::name).as_deref(), Some("카카오"));
    }

    #[test]
    fn test_series_panel_keeps_requested_stock() {
        let mut page = page_with_result();
        page.request_annual("매출액");
        page.apply_annual("삼성전자", SeriesMetric::Sales, Ok(vec![stock("x", "1")]));

        submit(&mut page, "카카오");
        page.apply_search("카카오", Ok(vec![stock("카카오", "035720")]));

        assert_eq!(page.annual.stock_name(), Some("삼성전자"));
        assert_eq!(page.quarterly.stock_name(), None);
    }

    #[test]
    fn test_typing_requests_suggestions() {
        let mut page = SearchPage::new();
        page.start_editing();
        assert_eq!(page.push_char('삼'), Some(Command::Suggest { query: "삼".into() }));
        assert_eq!(page.pop_char(), None);
        assert!(!page.dropdown_open);
    }

    #[test]
    fn test_stale_suggestions_are_dropped() {
        let mut page = SearchPage::new();
        page.start_editing();
        page.set_query("삼성");
        page.apply_suggestions("삼", Ok(vec![stock("삼양", "1")]));
        assert!(page.suggestions.is_empty());

        page.apply_suggestions("삼성", Ok(vec![stock("삼성전자", "005930")]));
        assert_eq!(page.suggestions.len(), 1);
        assert!(page.dropdown_open);
    }

    #[test]
    fn test_confirm_selects_suggestion_under_cursor() {
        let mut page = SearchPage::new();
        page.start_editing();
        page.set_query("삼성");
        page.apply_suggestions("삼성", Ok(vec![stock("삼성전자", "005930"), stock("삼성SDI", "006400")]));
        page.suggestion_down();
        page.suggestion_down();

        let command = page.confirm();
        assert_eq!(command, Some(Command::Search { query: "삼성SDI".into() }));
        assert_eq!(page.query, "삼성SDI");
        assert!(!page.editing);
        assert!(!page.dropdown_open);
    }

    #[test]
    fn test_series_requires_highlighted_stock() {
        let mut page = SearchPage::new();
        assert_eq!(page.request_annual("매출액"), None);
        assert_eq!(page.annual.error.as_deref(), Some(NO_STOCK_SELECTED));
        assert_eq!(page.request_news(), None);
        assert_eq!(page.news.error.as_deref(), Some(NO_STOCK_SELECTED));
    }

    #[test]
    fn test_series_request_and_loading_guard() {
        let mut page = page_with_result();
        let command = page.request_quarterly("영업이익").unwrap();
        assert_eq!(
            command,
            Command::QuarterlySeries {
                stock_name: "삼성전자".into(),
                metric: SeriesMetric::OperatingProfit,
            }
        );
        assert!(page.quarterly.loading);
        // Un deuxième clic pendant le chargement est ignoré
        assert_eq!(page.request_quarterly("매출액"), None);
    }

    #[test]
    fn test_unsupported_series_metric() {
        let mut page = page_with_result();
        assert_eq!(page.request_annual("PER"), None);
        assert!(!page.annual.loading);
    }

    #[test]
    fn test_series_outcomes() {
        let mut page = page_with_result();
        page.request_annual("순이익");
        page.apply_annual("삼성전자", SeriesMetric::NetIncome, Err(ApiError::Empty));
        assert_eq!(page.annual.error.as_deref(), Some("순이익 데이터가 없습니다."));
        assert!(!page.annual.loading);

        page.request_quarterly("부채비율");
        page.apply_quarterly(
            "삼성전자",
            SeriesMetric::DebtRatio,
            Err(ApiError::Status(StatusCode::BAD_GATEWAY)),
        );
        assert_eq!(
            page.quarterly.error.as_deref(),
            Some("부채비율 분기별 데이터를 가져오는 중 오류가 발생했습니다.")
        );

        page.request_annual("매출액");
        let data = vec![StockRecord::from_value(json!({"연도": "2023", "매출액": 10})).unwrap()];
        page.apply_annual("삼성전자", SeriesMetric::Sales, Ok(data));
        assert_eq!(page.annual.data.len(), 1);
        assert!(page.annual.error.is_none());
    }

    #[test]
    fn test_outcome_after_reset_is_dropped() {
        let mut page = page_with_result();
        page.request_annual("매출액");
        page.reset();
        page.apply_annual("삼성전자", SeriesMetric::Sales, Ok(vec![stock("x", "1")]));
        assert!(page.annual.data.is_empty());
        assert!(page.stocks.is_empty());
    }

    #[test]
    fn test_news_outcomes() {
        let mut page = page_with_result();
        page.request_news().unwrap();
        page.apply_news("삼성전자", Err(ApiError::Empty));
        assert_eq!(page.news.error.as_deref(), Some("최신 뉴스 데이터가 없습니다."));

        page.request_news().unwrap();
        let item = NewsItem {
            title: "실적 발표".into(),
            ..NewsItem::default()
        };
        page.apply_news("삼성전자", Ok(vec![item]));
        assert_eq!(page.news.items.len(), 1);
        assert!(!page.news.loading);
    }

    #[test]
    fn test_metric_cursor_wraps() {
        let mut page = SearchPage::new();
        page.previous_metric();
        assert_eq!(page.focused_metric(), SeriesMetric::DebtRatio);
        page.next_metric();
        assert_eq!(page.focused_metric(), SeriesMetric::Sales);
    }
}
