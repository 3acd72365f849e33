// ============================================================================
// Structure : SeriesPoint
// ============================================================================
// Un point d'une série financière (une barre du graphique)
//
// Chaque élément renvoyé par les endpoints financial-* est un objet plat :
//   {"연도": "2023", "매출액": 2589355}
//   {"분기": "2024.Q1", "영업이익률": 9.8}
// ============================================================================

use crate::models::format::MISSING;
use crate::models::metric::SeriesMetric;
use crate::models::stock::{value_to_f64, value_to_text, StockRecord};

/// Clés possibles pour l'étiquette d'un point, par ordre de priorité
const LABEL_KEYS: [&str; 3] = ["연도", "분기", "label"];

/// Une barre : étiquette de période et valeur
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Période ("2023", "2024.Q1", ou "N/A")
    pub label: String,

    /// Valeur numérique (None si absente ou illisible)
    pub value: Option<f64>,
}

impl SeriesPoint {
    /// Extrait le point d'un enregistrement pour la métrique donnée
    pub fn from_record(record: &StockRecord, metric: SeriesMetric) -> Self {
        let label = LABEL_KEYS
            .iter()
            .filter_map(|key| record.get(key).and_then(value_to_text))
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| MISSING.to_string());

        let value = record.get(metric.label()).and_then(value_to_f64);

        Self { label, value }
    }
}

/// Convertit une série complète
pub fn series_points(records: &[StockRecord], metric: SeriesMetric) -> Vec<SeriesPoint> {
    records
        .iter()
        .map(|record| SeriesPoint::from_record(record, metric))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> StockRecord {
        StockRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_annual_point() {
        let point = SeriesPoint::from_record(
            &record(json!({"연도": "2023", "매출액": "2,589,355"})),
            SeriesMetric::Sales,
        );
        assert_eq!(point.label, "2023");
        assert_eq!(point.value, Some(2_589_355.0));
    }

    #[test]
    fn test_quarterly_point_and_fallbacks() {
        let points = series_points(
            &[
                record(json!({"분기": "2024.Q1", "부채비율": 25.4})),
                record(json!({"label": "TTM", "부채비율": "-"})),
                record(json!({"부채비율": 1})),
            ],
            SeriesMetric::DebtRatio,
        );
        assert_eq!(points[0].label, "2024.Q1");
        assert_eq!(points[0].value, Some(25.4));
        assert_eq!(points[1].label, "TTM");
        assert_eq!(points[1].value, None);
        assert_eq!(points[2].label, "N/A");
    }
}
