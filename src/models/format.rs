// ============================================================================
// Formatage des valeurs financières
// ============================================================================
// Transforme les valeurs brutes du serveur en texte lisible avec unités :
// - 매출액 / 영업이익 en 조 / 억 (1조 = 10000억)
// - ratios en %, montants par action en 원, multiples en 배
// ============================================================================

use serde_json::Value;

use crate::models::stock::value_to_text;

/// Texte affiché quand une valeur manque
pub const MISSING: &str = "N/A";

/// Nombre de 억 dans un 조
const EOK_PER_JO: f64 = 10_000.0;

/// Formate une cellule du tableau financier d'une action
///
/// CONCEPT RUST : match sur &str
/// - On matche directement sur la clé (pas besoin d'enum ici, les clés
///   viennent du serveur)
pub fn format_statement_value(key: &str, value: Option<&Value>) -> String {
    let text = match value.and_then(value_to_text) {
        Some(text) => text,
        None => return MISSING.to_string(),
    };

    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == MISSING {
        return MISSING.to_string();
    }

    let without_commas = trimmed.replace(',', "");
    let number: f64 = match without_commas.parse() {
        Ok(n) => n,
        Err(_) => return without_commas,
    };

    match key {
        "매출액" | "영업이익" => format_eok(number),
        "영업이익률" | "순이익률" | "시가배당률" => format!("{}%", format_number(number)),
        "EPS" | "주당배당금" => format!("{}원", format_number(number)),
        "PER" | "PBR" => format!("{}배", format_number(number)),
        _ => without_commas,
    }
}

/// Formate un montant exprimé en 억 ("12조 3456억" ou "3456억")
///
/// Le signe porte sur la partie de tête : -25000 donne "-2조 5000억".
pub fn format_eok(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    // Arrondi avant le découpage : 19999.999 donne "2조 0억"
    let magnitude = round_to(amount.abs(), 2);
    let jo = (magnitude / EOK_PER_JO).floor();
    let eok = round_to(magnitude - jo * EOK_PER_JO, 2);

    if jo > 0.0 {
        format!("{}{}조 {}억", sign, format_number(jo), format_number(eok))
    } else {
        format!("{}{}억", sign, format_number(eok))
    }
}

/// Formate une graduation de l'axe des valeurs d'un graphique
pub fn format_axis_value(value: f64, percentage: bool) -> String {
    if percentage {
        format!("{:.1}%", value)
    } else {
        format!("{}억", group_thousands(value))
    }
}

/// Sépare les milliers par des virgules, au plus 3 décimales ("1,234.5")
pub fn group_thousands(value: f64) -> String {
    let rounded = round_to(value, 3);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format_number(rounded.abs());

    let (integer, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Représentation la plus courte d'un nombre ("12", "12.5")
pub fn format_number(value: f64) -> String {
    // -0 s'affiche "-0" avec Display
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eok_rounding_carries_into_jo() {
        assert_eq!(format_eok(19_999.999), "2조 0억");
        assert_eq!(format_eok(9_999.996), "1조 0억");
        assert_eq!(format_eok(12_345.678), "1조 2345.68억");
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(format_statement_value("PER", None), "N/A");
        assert_eq!(format_statement_value("PER", Some(&Value::Null)), "N/A");
        assert_eq!(format_statement_value("PER", Some(&json!("-"))), "N/A");
        assert_eq!(format_statement_value("PER", Some(&json!(""))), "N/A");
        assert_eq!(format_statement_value("PER", Some(&json!("N/A"))), "N/A");
    }

    #[test]
    fn test_revenue_in_jo_and_eok() {
        assert_eq!(format_statement_value("매출액", Some(&json!("2,589,355"))), "258조 9355억");
        assert_eq!(format_statement_value("영업이익", Some(&json!(6567))), "6567억");
        assert_eq!(format_eok(-25_000.0), "-2조 5000억");
        assert_eq!(format_eok(20_000.0), "2조 0억");
    }

    #[test]
    fn test_units() {
        assert_eq!(format_statement_value("영업이익률", Some(&json!("2.54"))), "2.54%");
        assert_eq!(format_statement_value("EPS", Some(&json!("2,131"))), "2131원");
        assert_eq!(format_statement_value("PBR", Some(&json!(1.1))), "1.1배");
        assert_eq!(format_statement_value("ROE", Some(&json!("1,5"))), "15");
    }

    #[test]
    fn test_non_numeric_text_is_kept() {
        assert_eq!(format_statement_value("PER", Some(&json!("적자,"))), "적자");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(1_234_567.0), "1,234,567");
        assert_eq!(group_thousands(-1_234.5), "-1,234.5");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(0.1234), "0.123");
    }

    #[test]
    fn test_axis_value() {
        assert_eq!(format_axis_value(12.34, true), "12.3%");
        assert_eq!(format_axis_value(25_000.0, false), "25,000억");
    }
}
