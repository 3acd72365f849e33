// ============================================================================
// Erreurs de l'API Stockter
// ============================================================================
// CONCEPT RUST : thiserror
// - #[derive(Error)] implémente std::error::Error et Display
// - #[from] génère la conversion pour l'opérateur ?
// ============================================================================

use reqwest::StatusCode;
use thiserror::Error;

/// Échec d'une requête vers l'API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connexion impossible, délai dépassé, etc.
    #[error("requête HTTP échouée : {0}")]
    Transport(#[from] reqwest::Error),

    /// Statut HTTP hors 2xx
    #[error("le serveur a répondu HTTP {0}")]
    Status(StatusCode),

    /// Corps de réponse illisible
    #[error("réponse JSON invalide : {0}")]
    Decode(String),

    /// Champ "error" renseigné par le serveur
    #[error("le serveur a signalé une erreur : {0}")]
    Server(String),

    /// Liste absente ou vide
    #[error("aucune donnée")]
    Empty,
}

impl ApiError {
    /// Le serveur a répondu mais sans données exploitables
    ///
    /// Les pages affichent alors "... 데이터가 없습니다." au lieu du message
    /// de connexion.
    pub fn is_no_data(&self) -> bool {
        matches!(self, ApiError::Server(_) | ApiError::Empty)
    }
}
