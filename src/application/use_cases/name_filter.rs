use fancy_regex::RegexBuilder;

use crate::domain::country::StructuredCountryRecord;
use crate::domain::error::{AppError, Result};

/// Records whose name contains a match of `pattern`, case-insensitively.
///
/// Lookaround and backreferences are supported. Returns a new list in input
/// order. An unparsable pattern, or one that exceeds the backtracking limit
/// on some name, is a `PatternError`; callers treat it as an empty selection.
pub fn filter_by_name(
    records: &[StructuredCountryRecord],
    pattern: &str,
) -> Result<Vec<StructuredCountryRecord>> {
    let invalid = |e: fancy_regex::Error| {
        AppError::PatternError(format!("Invalid pattern '{}': {}", pattern, e))
    };

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(invalid)?;

    let mut matched = Vec::new();
    for record in records {
        if regex.is_match(record.name()).map_err(invalid)? {
            matched.push(record.clone());
        }
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<StructuredCountryRecord> {
        names
            .iter()
            .map(|name| StructuredCountryRecord::with_counts(name, 1, 1.0))
            .collect()
    }

    fn names(records: &[StructuredCountryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_prefix_pattern_is_case_insensitive() {
        let all = records(&["Argentina", "albania", "Brazil", "Canada", "Austria"]);
        let matched = filter_by_name(&all, "^A").unwrap();
        assert_eq!(names(&matched), vec!["Argentina", "albania", "Austria"]);
    }

    #[test]
    fn test_partial_match_anywhere_in_name() {
        let all = records(&["Finland", "Iceland", "Landia", "Chile"]);
        let matched = filter_by_name(&all, "land$").unwrap();
        assert_eq!(names(&matched), vec!["Finland", "Iceland"]);

        let matched = filter_by_name(&all, "LAN").unwrap();
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn test_lookahead_and_backreference() {
        let all = records(&["Greece", "Morocco", "Chile", "Austria", "Argentina"]);

        let matched = filter_by_name(&all, "^a(?!u)").unwrap();
        assert_eq!(names(&matched), vec!["Argentina"]);

        let matched = filter_by_name(&all, r"(.)\1").unwrap();
        assert_eq!(names(&matched), vec!["Greece", "Morocco"]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let all = records(&["Chile", "Peru"]);
        assert!(filter_by_name(&all, "[0-9]").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern_reports_error() {
        let all = records(&["Chile"]);
        let err = filter_by_name(&all, "[unclosed").unwrap_err();
        assert!(matches!(err, AppError::PatternError(_)));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let all = records(&["Chile", "Peru"]);
        let _ = filter_by_name(&all, "^P").unwrap();
        assert_eq!(all.len(), 2);
    }
}
