// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod dashboard; // Cadre : header, navigation, footer
pub mod search;    // Page 종목검색
pub mod ranking;   // Pages de classement
pub mod table;     // Tableaux financiers et classements
pub mod bar_chart; // Graphiques à barres des séries

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use dashboard::render;
