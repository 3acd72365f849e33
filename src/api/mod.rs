// ============================================================================
// Module : api
// ============================================================================
// Client de l'API Stockter : description des requêtes, exécution, erreurs
// ============================================================================

pub mod client;  // Exécution des GET (reqwest)
pub mod error;   // ApiError
pub mod request; // Chemins, paramètres et clés de liste

pub use client::ApiClient;
pub use error::ApiError;
pub use request::ApiRequest;
