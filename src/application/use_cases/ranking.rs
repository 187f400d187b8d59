use crate::domain::country::{NumericField, StructuredCountryRecord};

/// The `limit` records with the largest `field` values, largest first.
/// Equal values keep their input order.
pub fn top_by_field(
    records: &[StructuredCountryRecord],
    field: NumericField,
    limit: usize,
) -> Vec<StructuredCountryRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.value_of(field).total_cmp(&a.value_of(field)));
    ranked.truncate(limit);
    ranked
}

/// Chart axes for a ranking: names on x, field values on y
pub fn chart_series(
    records: &[StructuredCountryRecord],
    field: NumericField,
) -> (Vec<String>, Vec<f64>) {
    records
        .iter()
        .map(|record| (record.name().to_string(), record.value_of(field)))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_by_population() {
        let records = vec![
            StructuredCountryRecord::with_counts("Small", 10, 1.0),
            StructuredCountryRecord::with_counts("Big", 1000, 1.0),
            StructuredCountryRecord::with_counts("Mid", 100, 1.0),
            StructuredCountryRecord::with_counts("AlsoMid", 100, 1.0),
        ];

        let top = top_by_field(&records, NumericField::Population, 3);
        let names: Vec<&str> = top.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Big", "Mid", "AlsoMid"]);
    }

    #[test]
    fn test_limit_larger_than_input() {
        let records = vec![StructuredCountryRecord::with_counts("Only", 1, 1.0)];
        assert_eq!(top_by_field(&records, NumericField::AreaKm2, 10).len(), 1);
    }

    #[test]
    fn test_chart_series() {
        let records = vec![
            StructuredCountryRecord::with_counts("A", 10, 2.0),
            StructuredCountryRecord::with_counts("B", 30, 3.0),
        ];
        let (x, y) = chart_series(&records, NumericField::Density);
        assert_eq!(x, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(y, vec![5.0, 10.0]);
    }
}
