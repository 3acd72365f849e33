// ============================================================================
// Page : 연간 재무 top100 (classement annuel)
// ============================================================================
// Une rangée de boutons de métriques, une rangée d'années, un tableau.
//
// Règles de sélection :
// - PER / PBR pressé à nouveau alors qu'il est déjà sélectionné : le sens
//   de tri s'inverse (top <-> bottom) ; sélectionné depuis une autre
//   métrique : il repart sur top
// - toute métrique sauf 시가총액 remet l'année à 2024 et affiche les années
// - 시가총액 n'a pas d'année
// Chaque changement de sélection déclenche une requête.
// ============================================================================

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::dispatcher::Command;
use crate::models::metric::{DEFAULT_YEAR, YEARS};
use crate::models::{RankingMetric, RankingSelection, SortDirection, StockRecord};
use crate::pages::{unsupported_metric_message, RankingView, CONNECTION_ERROR};

/// État du classement annuel
#[derive(Debug, Clone, Default)]
pub struct AnnualRankingPage {
    /// Métrique sélectionnée
    pub metric: Option<RankingMetric>,

    /// Année sélectionnée (None pour 시가총액)
    pub year: Option<String>,

    /// La rangée d'années est visible
    pub show_years: bool,

    pub per_direction: SortDirection,
    pub pbr_direction: SortDirection,

    /// Bouton sous le curseur
    pub cursor: usize,

    pub view: RankingView,
}

impl AnnualRankingPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sélection courante, telle qu'envoyée au serveur
    pub fn selection(&self) -> Option<RankingSelection> {
        let metric = self.metric?;
        Some(RankingSelection {
            metric,
            year: self.year.clone(),
            direction: self.direction(metric),
        })
    }

    /// Sens de tri d'une métrique (Top pour celles qui n'en ont pas)
    pub fn direction(&self, metric: RankingMetric) -> SortDirection {
        match metric {
            RankingMetric::Per => self.per_direction,
            RankingMetric::Pbr => self.pbr_direction,
            _ => SortDirection::Top,
        }
    }

    /// Bouton de métrique pressé
    pub fn select_metric(&mut self, metric: RankingMetric) -> Option<Command> {
        let reselected = self.metric == Some(metric);
        match metric {
            RankingMetric::Per => {
                self.per_direction = if reselected {
                    self.per_direction.toggle()
                } else {
                    SortDirection::Top
                };
            }
            RankingMetric::Pbr => {
                self.pbr_direction = if reselected {
                    self.pbr_direction.toggle()
                } else {
                    SortDirection::Top
                };
            }
            _ => {}
        }

        self.metric = Some(metric);
        if metric.needs_year() {
            self.show_years = true;
            self.year = Some(DEFAULT_YEAR.to_string());
        } else {
            self.show_years = false;
            self.year = None;
        }

        if let Some(index) = RankingMetric::ANNUAL.iter().position(|m| *m == metric) {
            self.cursor = index;
        }

        info!(metric = metric.label(), year = ?self.year, direction = ?self.direction(metric), "Annual ranking metric selected");
        self.request()
    }

    /// Sélection par libellé ; un libellé inconnu affiche un message statique
    pub fn select_metric_label(&mut self, label: &str) -> Option<Command> {
        match RankingMetric::from_label(label) {
            Some(metric) => self.select_metric(metric),
            None => {
                warn!(label, "Unsupported ranking metric");
                self.view.fail(unsupported_metric_message(label));
                None
            }
        }
    }

    /// Bouton d'année pressé
    pub fn select_year(&mut self, year: &str) -> Option<Command> {
        if !self.show_years {
            debug!(year, "No year selector for current metric");
            return None;
        }
        self.year = Some(year.to_string());
        self.request()
    }

    /// Année suivante dans la rangée (bornée)
    pub fn next_year(&mut self) -> Option<Command> {
        let next = self.year_index().map_or(0, |i| (i + 1).min(YEARS.len() - 1));
        self.select_year(YEARS[next])
    }

    /// Année précédente dans la rangée (bornée)
    pub fn previous_year(&mut self) -> Option<Command> {
        let previous = self.year_index().map_or(0, |i| i.saturating_sub(1));
        self.select_year(YEARS[previous])
    }

    fn year_index(&self) -> Option<usize> {
        let year = self.year.as_deref()?;
        YEARS.iter().position(|y| *y == year)
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(RankingMetric::ANNUAL.len() - 1);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Enter sur le bouton sous le curseur
    pub fn select_cursor(&mut self) -> Option<Command> {
        let metric = RankingMetric::ANNUAL[self.cursor.min(RankingMetric::ANNUAL.len() - 1)];
        self.select_metric(metric)
    }

    /// Titre de la colonne de valeur, aussi clé de lecture dans chaque ligne
    pub fn column_title(&self) -> Option<&'static str> {
        self.metric.map(|m| m.label())
    }

    fn request(&self) -> Option<Command> {
        self.selection().map(Command::Ranking)
    }

    /// Applique une réponse si elle correspond encore à la sélection
    pub fn apply(&mut self, selection: &RankingSelection, result: Result<Vec<StockRecord>, ApiError>) {
        if self.selection().as_ref() != Some(selection) {
            debug!(?selection, "Dropping stale ranking outcome");
            return;
        }

        match result {
            Ok(stocks) => {
                info!(metric = selection.metric.label(), rows = stocks.len(), "Ranking loaded");
                self.view.show(stocks);
            }
            Err(e) if e.is_no_data() => {
                self.view.fail(format!("{} 데이터가 없습니다.", selection.metric.label()));
            }
            Err(e) => {
                warn!(error = %e, "Failed to load ranking");
                self.view.fail(CONNECTION_ERROR);
            }
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
