use crate::core::{normalize::normalize, similarity::similarity};
use crate::models::{Record, ScoredRecord};

/// Added to a record's score when the query appears inside its name or brand
pub const SUBSTRING_BONUS: f64 = 0.3;

/// Minimum final score for a record to be returned
pub const SCORE_THRESHOLD: f64 = 0.4;

/// Rank inventory records against a free-text query.
///
/// # Pipeline
/// 1. Empty (after trimming) query: search is inactive, nothing is returned
/// 2. Normalize the query once, then each record's name and brand
/// 3. Score = best positional similarity of name or brand, plus
///    [`SUBSTRING_BONUS`] when either contains the query
/// 4. Keep scores at or above [`SCORE_THRESHOLD`]
/// 5. Sort by score, descending. The sort is stable, so equal scores keep
///    the order the records were given in
///
/// Pure: reads the snapshot, stores nothing, never fails. A record with an
/// empty name or brand simply scores 0 on that field.
pub fn search(query: &str, records: &[Record]) -> Vec<ScoredRecord> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let query = normalize(query);

    let mut results: Vec<ScoredRecord> = records
        .iter()
        .filter_map(|record| {
            let score = score_record(&query, record);
            (score >= SCORE_THRESHOLD).then(|| ScoredRecord {
                record: record.clone(),
                score,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results
}

/// Score one record against an already-normalized query
#[inline]
pub fn score_record(normalized_query: &str, record: &Record) -> f64 {
    let name = normalize(&record.name);
    let brand = normalize(record.brand_or_empty());

    let best = similarity(&name, normalized_query).max(similarity(&brand, normalized_query));
    let contains = name.contains(normalized_query) || brand.contains(normalized_query);

    best + if contains { SUBSTRING_BONUS } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShelfType;

    fn create_record(id: &str, name: &str, brand: Option<&str>, quantity: u32) -> Record {
        Record {
            id: id.to_string(),
            name: name.to_string(),
            brand: brand.map(str::to_string),
            quantity,
            location: "A-1-A".to_string(),
            shelf_type: ShelfType::A,
            registered_at: None,
        }
    }

    fn filters() -> Vec<Record> {
        vec![
            create_record("1", "Filtro de aceite", Some("Bosch"), 5),
            create_record("2", "Filtro de aire", Some("Mann"), 20),
        ]
    }

    #[test]
    fn test_blank_query_is_inactive() {
        assert!(search("", &filters()).is_empty());
        assert!(search("   \t", &filters()).is_empty());
    }

    #[test]
    fn test_substring_matches_both() {
        let results = search("filtro", &filters());

        assert_eq!(results.len(), 2);
        // Shorter name shares the same prefix over fewer chars
        assert_eq!(results[0].record.id, "2");
        assert!((results[0].score - (6.0 / 14.0 + SUBSTRING_BONUS)).abs() < 1e-12);
        assert!((results[1].score - (6.0 / 16.0 + SUBSTRING_BONUS)).abs() < 1e-12);
    }

    #[test]
    fn test_brand_match() {
        let results = search("bosch", &filters());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.id, "1");
        assert!((results[0].score - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_no_match() {
        assert!(search("xyz123", &filters()).is_empty());
    }

    #[test]
    fn test_query_is_normalized() {
        let records = vec![create_record("1", "Válvula", None, 3)];

        let results = search("  VALVULA ", &records);

        assert_eq!(results.len(), 1);
        assert!((results[0].score - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_missing_name_does_not_fail_pass() {
        let records = vec![
            create_record("1", "", None, 1),
            create_record("2", "Bujia", Some("NGK"), 9),
        ];

        let results = search("bujia", &records);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.id, "2");
    }

    #[test]
    fn test_positional_only_without_substring() {
        // Typo: 4 of 5 positions line up, no substring, 0.8 passes on its own
        let records = vec![create_record("1", "Bujia", None, 1)];
        let results = search("bujja", &records);
        assert_eq!(results.len(), 1);
        assert!((results[0].score - 0.8).abs() < 1e-12);

        // Same letters shifted by one position: nothing lines up, no substring
        let records = vec![create_record("1", "xbosch", None, 1)];
        assert!(search("boschx", &records).is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            create_record("a", "Correa", None, 1),
            create_record("b", "Correa", None, 2),
            create_record("c", "Correa", None, 3),
        ];

        let ids: Vec<_> = search("correa", &records)
            .into_iter()
            .map(|r| r.record.id)
            .collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sorted_descending() {
        let records = vec![
            create_record("1", "Amortiguador trasero", None, 1),
            create_record("2", "Amortiguador", None, 1),
            create_record("3", "Amortiguador delantero izquierdo", None, 1),
        ];

        let results = search("amortiguador", &records);

        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(results[0].record.id, "2");
    }
}
