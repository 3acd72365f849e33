// ============================================================================
// Autocomplétion de la recherche
// ============================================================================
// Filtre et ordonne les résultats de /data pendant la saisie :
// 1. garde les actions dont le code ou le nom contient la saisie
// 2. celles qui COMMENCENT par la saisie passent en premier
// 3. au plus MAX_SUGGESTIONS résultats
// ============================================================================

use crate::models::stock::StockRecord;

/// Nombre maximum de suggestions affichées
pub const MAX_SUGGESTIONS: usize = 10;

/// Ordonne les suggestions pour une saisie donnée
///
/// CONCEPT RUST : partition()
/// - Sépare un itérateur en deux collections selon un prédicat
/// - L'ordre relatif du serveur est conservé dans chaque groupe
pub fn rank_suggestions(records: Vec<StockRecord>, input: &str) -> Vec<StockRecord> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let (starts, others): (Vec<_>, Vec<_>) = records
        .into_iter()
        .filter(|record| searchable_fields(record).any(|field| field.contains(&needle)))
        .partition(|record| searchable_fields(record).any(|field| field.starts_with(&needle)));

    starts
        .into_iter()
        .chain(others)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Code et nom en minuscules
fn searchable_fields(record: &StockRecord) -> impl Iterator<Item = String> {
    [record.code(), record.name()]
        .into_iter()
        .flatten()
        .map(|field| field.to_lowercase())
}
