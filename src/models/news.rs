// ============================================================================
// Structure : NewsItem
// ============================================================================
// Un article de la liste "최신 뉴스" renvoyée par /latest-news
// ============================================================================

use serde::{Deserialize, Serialize};

/// Article de presse lié à une action
///
/// CONCEPT RUST : #[serde(default)]
/// - Un champ absent du JSON prend la valeur Default (chaîne vide)
/// - Le serveur n'a pas de contrat strict, on accepte les articles partiels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub date: String,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_article() {
        let item: NewsItem =
            serde_json::from_str(r#"{"title": "삼성전자 실적 발표", "link": "https://news"}"#).unwrap();
        assert_eq!(item.title, "삼성전자 실적 발표");
        assert_eq!(item.summary, "");
        assert_eq!(item.date, "");
    }
}
