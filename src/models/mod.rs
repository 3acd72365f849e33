// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application : enregistrements du serveur,
// métriques sélectionnables et formatage des valeurs
// ============================================================================

pub mod format;     // Unités 조/억, %, 원, 배
pub mod metric;     // Métriques, années, trimestres, sélections
pub mod news;       // Articles "최신 뉴스"
pub mod series;     // Points des graphiques à barres
pub mod stock;      // Enregistrement plat renvoyé par le serveur
pub mod suggestion; // Autocomplétion de la recherche

pub use metric::{
    QuarterlySelection, RankingMetric, RankingSelection, SeriesMetric, SortDirection,
};
pub use news::NewsItem;
pub use stock::StockRecord;
