// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App (ou des pages)
// - Seul le thread UI possède App : les réponses réseau arrivent sous forme
//   d'Outcome et sont appliquées ici
// ============================================================================

use tracing::{debug, info};

use crate::dispatcher::Outcome;
use crate::pages::{AnnualRankingPage, QuarterlyRankingPage, SearchPage};

// ============================================================================
// Enum : Page
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Remplace le routeur d'URL : une seule page active à la fois
// - La barre de navigation affiche les trois
// ============================================================================

/// Pages de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// 종목검색
    #[default]
    Search,

    /// 연간 재무 top100
    AnnualRanking,

    /// 분기별 재무 top100
    QuarterlyRanking,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Search, Page::AnnualRanking, Page::QuarterlyRanking];

    /// Titre dans la barre de navigation
    pub fn title(&self) -> &'static str {
        match self {
            Page::Search => "종목검색",
            Page::AnnualRanking => "연간 재무 top100",
            Page::QuarterlyRanking => "분기별 재무 top100",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Page::Search => 0,
            Page::AnnualRanking => 1,
            Page::QuarterlyRanking => 2,
        }
    }

    pub fn next(&self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn previous(&self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Page affichée
    pub current_page: Page,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false
    /// - N'importe quelle autre touche : annulation
    pub confirm_quit: bool,

    pub search: SearchPage,
    pub annual: AnnualRankingPage,
    pub quarterly: QuarterlyRankingPage,
}

impl App {
    pub fn new() -> Self {
        Self::with_page(Page::default())
    }

    /// Démarre sur une page donnée (option --page)
    pub fn with_page(page: Page) -> Self {
        Self {
            running: true,
            current_page: page,
            confirm_quit: false,
            search: SearchPage::new(),
            annual: AnnualRankingPage::new(),
            quarterly: QuarterlyRankingPage::new(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Navigation entre pages
    // ========================================================================

    pub fn show_page(&mut self, page: Page) {
        if self.current_page != page {
            info!(page = page.title(), "Switching page");
        }
        self.current_page = page;
    }

    pub fn next_page(&mut self) {
        self.show_page(self.current_page.next());
    }

    pub fn previous_page(&mut self) {
        self.show_page(self.current_page.previous());
    }

    /// La saisie de recherche capture toutes les touches
    pub fn is_editing(&self) -> bool {
        self.current_page == Page::Search && self.search.editing
    }

    /// Vrai si au moins une requête attend une réponse sur la page courante
    pub fn is_loading(&self) -> bool {
        match self.current_page {
            Page::Search => {
                self.search.annual.loading || self.search.quarterly.loading || self.search.news.loading
            }
            _ => false,
        }
    }

    // ========================================================================
    // Confirmation de sortie
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Réponses réseau
    // ========================================================================

    /// Route une réponse vers la page qui l'a demandée
    ///
    /// CONCEPT RUST : match exhaustif sur enum avec données
    /// - Chaque variant est déstructuré et passé à la bonne page
    /// - Un nouveau type de requête ne compile pas tant qu'il n'est pas routé
    pub fn apply(&mut self, outcome: Outcome) {
        debug!("Applying outcome");
        match outcome {
            Outcome::Search { query, result } => self.search.apply_search(&query, result),
            Outcome::Suggest { query, result } => self.search.apply_suggestions(&query, result),
            Outcome::Ranking { selection, result } => self.annual.apply(&selection, result),
            Outcome::QuarterlyRanking { selection, result } => {
                self.quarterly.apply(&selection, result)
            }
            Outcome::AnnualSeries {
                stock_name,
                metric,
                result,
            } => self.search.apply_annual(&stock_name, metric, result),
            Outcome::QuarterlySeries {
                stock_name,
                metric,
                result,
            } => self.search.apply_quarterly(&stock_name, metric, result),
            Outcome::LatestNews { stock_name, result } => {
                self.search.apply_news(&stock_name, result)
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::{RankingMetric, StockRecord};
    use serde_json::json;

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert_eq!(app.current_page, Page::Search);
        assert!(!app.is_editing());
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::new();
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_page_cycle() {
        let mut app = App::with_page(Page::QuarterlyRanking);
        app.next_page();
        assert_eq!(app.current_page, Page::Search);
        app.previous_page();
        assert_eq!(app.current_page, Page::QuarterlyRanking);
        app.previous_page();
        assert_eq!(app.current_page, Page::AnnualRanking);
    }

    #[test]
    fn test_outcome_is_routed_to_its_page() {
        let mut app = App::new();
        app.annual.select_metric(RankingMetric::Eps);
        let selection = app.annual.selection().unwrap();
        let stocks = vec![StockRecord::from_value(json!({"종목명": "HMM", "EPS": 3000})).unwrap()];

        app.apply(Outcome::Ranking {
            selection,
            result: Ok(stocks),
        });
        assert_eq!(app.annual.view.stocks.len(), 1);
        assert!(app.quarterly.view.stocks.is_empty());

        app.search.set_query("HMM");
        app.search.submit_search();
        app.apply(Outcome::Search {
            query: "HMM".into(),
            result: Err(ApiError::Empty),
        });
        assert!(app.search.error.is_some());
    }
}
