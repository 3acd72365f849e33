// ============================================================================
// Structure : StockRecord
// ============================================================================
// Un enregistrement renvoyé tel quel par l'API Stockter
//
// Le serveur renvoie des objets JSON plats dont les clés sont des libellés
// coréens ("종목명", "매출액", "2023.12 PER(배)", ...). Le client ne valide
// rien : il affiche ce que le serveur a envoyé.
//
// CONCEPT RUST : #[serde(transparent)]
// - Le newtype se (dé)sérialise exactement comme le champ qu'il enveloppe
// - On garde la Map JSON brute, mais avec des méthodes typées autour
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Clé du nom de l'action
pub const NAME_KEY: &str = "종목명";

/// Clé du code de l'action
pub const CODE_KEY: &str = "종목코드";

/// Champs nettoyés après une recherche : (clé cible, clé source)
///
/// "시가배당률" est rempli depuis "시가배당률(%)", les autres depuis eux-mêmes.
const CLEANED_SEARCH_FIELDS: [(&str, &str); 5] = [
    ("매출액", "매출액"),
    ("영업이익", "영업이익"),
    ("영업이익률", "영업이익률"),
    ("시가배당률", "시가배당률(%)"),
    ("부채비율", "부채비율"),
];

/// Enregistrement plat renvoyé par le serveur
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockRecord(Map<String, Value>);

impl StockRecord {
    /// Convertit une valeur JSON en enregistrement (uniquement les objets)
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Valeur brute d'un champ
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Vérifie la présence d'un champ (même null)
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Valeur d'un champ rendue en texte (None si absent ou null)
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_to_text)
    }

    /// Nom de l'action ("종목명")
    pub fn name(&self) -> Option<String> {
        self.text(NAME_KEY)
    }

    /// Code de l'action ("종목코드")
    pub fn code(&self) -> Option<String> {
        self.text(CODE_KEY)
    }

    /// Remplace ou ajoute un champ
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Applique le nettoyage des résultats de recherche
    ///
    /// CONCEPT RUST : self par valeur
    /// - Consomme l'enregistrement et en renvoie une version modifiée
    /// - Pratique dans une chaîne .into_iter().map(StockRecord::cleaned)
    pub fn cleaned(mut self) -> Self {
        for (target, source) in CLEANED_SEARCH_FIELDS {
            let value = clean_value(self.get(source));
            self.insert(target, value);
        }
        self
    }
}

/// Rend une valeur JSON en texte
///
/// - String : tel quel
/// - Number : représentation la plus courte ("12.5", "1000")
/// - Null : None
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Lit une valeur JSON comme nombre ("1,234.5" et 1234.5 donnent 1234.5)
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => strip_separators(s).parse().ok(),
        _ => None,
    }
}

/// Nettoie une valeur : retire espaces et virgules des chaînes, "N/A" si absente
pub fn clean_value(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::String("N/A".to_string()),
        Some(Value::String(s)) => Value::String(strip_separators(s)),
        Some(other) => other.clone(),
    }
}

/// Retire les espaces et les virgules d'une chaîne
pub fn strip_separators(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> StockRecord {
        StockRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(StockRecord::from_value(json!([1, 2])).is_none());
        assert!(StockRecord::from_value(json!("삼성전자")).is_none());
    }

    #[test]
    fn test_name_and_code() {
        let stock = record(json!({"종목명": "삼성전자", "종목코드": 5930}));
        assert_eq!(stock.name().as_deref(), Some("삼성전자"));
        assert_eq!(stock.code().as_deref(), Some("5930"));
    }

    #[test]
    fn test_text_of_null_is_none() {
        let stock = record(json!({"업종명": null}));
        assert!(stock.contains("업종명"));
        assert_eq!(stock.text("업종명"), None);
    }

    #[test]
    fn test_cleaned_strips_commas_and_whitespace() {
        let stock = record(json!({
            "매출액": " 2,589,355 ",
            "영업이익": "65,670",
            "영업이익률": 2.54,
            "시가배당률(%)": "2.1 ",
        }))
        .cleaned();

        assert_eq!(stock.get("매출액"), Some(&json!("2589355")));
        assert_eq!(stock.get("영업이익"), Some(&json!("65670")));
        assert_eq!(stock.get("영업이익률"), Some(&json!(2.54)));
        assert_eq!(stock.get("시가배당률"), Some(&json!("2.1")));
        // Absent du serveur : "N/A"
        assert_eq!(stock.get("부채비율"), Some(&json!("N/A")));
    }

    #[test]
    fn test_value_to_f64() {
        assert_eq!(value_to_f64(&json!("1,234.5")), Some(1234.5));
        assert_eq!(value_to_f64(&json!(-12)), Some(-12.0));
        assert_eq!(value_to_f64(&json!("-")), None);
        assert_eq!(value_to_f64(&Value::Null), None);
    }
}
