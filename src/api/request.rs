// ============================================================================
// Structure : ApiRequest
// ============================================================================
// Décrit une requête GET : chemin, paramètres de query string, et clé sous
// laquelle le serveur range la liste dans sa réponse.
//
// Séparer la description de l'exécution permet de tester "quelle requête
// part pour quelle sélection" sans réseau.
// ============================================================================

use crate::models::{QuarterlySelection, RankingSelection, SeriesMetric};

/// Clé de liste des endpoints de recherche et de classement
pub const STOCKS_KEY: &str = "stocks";

/// Clé de liste de /latest-news
pub const NEWS_KEY: &str = "latest_news";

/// Requête GET vers l'API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Chemin relatif à l'URL de base (sans "/" initial)
    pub path: &'static str,

    /// Paramètres de la query string
    pub params: Vec<(&'static str, String)>,

    /// Clé de la liste dans l'objet JSON de réponse
    pub list_key: &'static str,
}

impl ApiRequest {
    fn new(path: &'static str, list_key: &'static str) -> Self {
        Self {
            path,
            params: Vec::new(),
            list_key,
        }
    }

    fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Recherche et autocomplétion : /data?query=
    pub fn search(query: &str) -> Self {
        Self::new("data", STOCKS_KEY).param("query", query)
    }

    /// Classement annuel : /top-*?year= (ou /bottom-per, /bottom-pbr)
    pub fn ranking(selection: &RankingSelection) -> Self {
        let request = Self::new(
            selection.metric.annual_endpoint(selection.direction),
            STOCKS_KEY,
        );
        match &selection.year {
            Some(year) if selection.metric.needs_year() => request.param("year", year.as_str()),
            _ => request,
        }
    }

    /// Classement trimestriel : /quarterly-financial?quarter=&metric=
    pub fn quarterly_ranking(selection: &QuarterlySelection) -> Self {
        Self::new("quarterly-financial", STOCKS_KEY)
            .param("quarter", selection.quarter.as_str())
            .param("metric", selection.metric.label())
    }

    /// Série annuelle d'une action
    pub fn annual_series(metric: SeriesMetric, stock_name: &str) -> Self {
        Self::new(metric.annual_endpoint(), metric.annual_key()).param("stock_name", stock_name)
    }

    /// Série trimestrielle d'une action
    pub fn quarterly_series(metric: SeriesMetric, stock_name: &str) -> Self {
        Self::new(metric.quarterly_endpoint(), metric.quarterly_key())
            .param("stock_name", stock_name)
    }

    /// Dernières actualités d'une action
    pub fn latest_news(stock_name: &str) -> Self {
        Self::new("latest-news", NEWS_KEY).param("stock_name", stock_name)
    }

    /// Valeur d'un paramètre
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
