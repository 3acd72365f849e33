// ============================================================================
// Stockter - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod api;        // Client HTTP du serveur Stockter
pub mod app;        // État de l'application
pub mod config;     // Fichier TOML + variables STOCKTER_*
pub mod dispatcher; // Exécution des requêtes en arrière-plan
pub mod handler;    // Touches → actions
pub mod models;     // Structures de données
pub mod pages;      // État de chaque page
pub mod ui;         // Interface utilisateur
