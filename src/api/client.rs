// ============================================================================
// API Client : Stockter
// ============================================================================
// Exécute les requêtes GET décrites par ApiRequest et extrait la liste
// d'enregistrements de la réponse.
//
// Contrat du serveur : un objet JSON avec une liste sous une clé connue
// ("stocks", "annual_sales", "latest_news", ...) et un champ "error"
// optionnel. Pas de retry, pas de cache : chaque appel part sur le réseau.
// ============================================================================

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::api::error::ApiError;
use crate::api::request::ApiRequest;
use crate::config::ApiConfig;
use crate::models::{NewsItem, StockRecord};

/// Client HTTP de l'API Stockter
///
/// CONCEPT RUST : Clone bon marché
/// - reqwest::Client contient un Arc interne (pool de connexions partagé)
/// - Cloner le client pour chaque tâche async ne recrée pas de connexions
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Crée le client à partir de la configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    /// URL complète d'un chemin relatif
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Exécute la requête et renvoie la liste brute (jamais vide)
    #[instrument(skip(self, request), fields(path = %request.path))]
    pub async fn fetch_list(&self, request: &ApiRequest) -> Result<Vec<Value>, ApiError> {
        let url = self.endpoint_url(request.path);
        debug!(url = %url, params = ?request.params, "Sending GET request");

        let response = self.http.get(&url).query(&request.params).send().await?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");
        if !status.is_success() {
            warn!(status = %status, "Server returned error status");
            return Err(ApiError::Status(status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let items = extract_list(body, request.list_key)?;
        info!(count = items.len(), "Fetched records");
        Ok(items)
    }

    /// Enregistrements plats (recherche, classements, séries)
    pub async fn fetch_records(&self, request: &ApiRequest) -> Result<Vec<StockRecord>, ApiError> {
        let records: Vec<StockRecord> = self
            .fetch_list(request)
            .await?
            .into_iter()
            .filter_map(StockRecord::from_value)
            .collect();

        if records.is_empty() {
            return Err(ApiError::Empty);
        }
        Ok(records)
    }

    /// Articles de /latest-news
    pub async fn fetch_news(&self, request: &ApiRequest) -> Result<Vec<NewsItem>, ApiError> {
        self.fetch_list(request)
            .await?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| ApiError::Decode(e.to_string())))
            .collect()
    }
}

/// Extrait la liste rangée sous `key`
///
/// - "error" non vide : ApiError::Server
/// - clé absente, pas un tableau, ou tableau vide : ApiError::Empty
fn extract_list(body: Value, key: &str) -> Result<Vec<Value>, ApiError> {
    let mut object = match body {
        Value::Object(object) => object,
        other => {
            return Err(ApiError::Decode(format!(
                "objet JSON attendu, reçu {}",
                json_kind(&other)
            )))
        }
    };

    if let Some(message) = object.get("error").and_then(error_message) {
        warn!(error = %message, "Server reported an error");
        return Err(ApiError::Server(message));
    }

    match object.remove(key) {
        Some(Value::Array(items)) if !items.is_empty() => Ok(items),
        _ => Err(ApiError::Empty),
    }
}

/// Message d'un champ "error" renseigné (null, false et "" n'en sont pas)
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booléen",
        Value::Number(_) => "un nombre",
        Value::String(_) => "une chaîne",
        Value::Array(_) => "un tableau",
        Value::Object(_) => "un objet",
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// Les appels HTTP réels sont testés dans tests/api_client.rs (wiremock)
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_list() {
        let items = extract_list(json!({"stocks": [{"종목명": "삼성전자"}]}), "stocks").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extract_list_empty_or_missing() {
        assert!(matches!(extract_list(json!({"stocks": []}), "stocks"), Err(ApiError::Empty)));
        assert!(matches!(extract_list(json!({}), "stocks"), Err(ApiError::Empty)));
        assert!(matches!(extract_list(json!({"stocks": "x"}), "stocks"), Err(ApiError::Empty)));
    }

    #[test]
    fn test_extract_list_server_error() {
        let result = extract_list(json!({"error": "no such stock", "stocks": []}), "stocks");
        assert!(matches!(result, Err(ApiError::Server(msg)) if msg == "no such stock"));

        // Un champ error vide n'est pas une erreur
        let items = extract_list(json!({"error": null, "net_income": [1]}), "net_income").unwrap();
        assert_eq!(items, vec![json!(1)]);
    }

    #[test]
    fn test_extract_list_requires_object() {
        assert!(matches!(extract_list(json!([1, 2]), "stocks"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_endpoint_url() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.endpoint_url("top-per"), "http://localhost:8000/top-per");
    }
}
