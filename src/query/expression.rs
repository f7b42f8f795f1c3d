//! Query string parsing

/// A parsed query expression
///
/// Search terms are lowercased at parse time; matching is done against
/// lowercased record fields, so every mode is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Empty query: the whole corpus
    All,

    /// `name:` prefix match on the faculty name
    Name(String),

    /// `vidwan:` exact match on the Vidwan identifier
    Vidwan(String),

    /// Comma-separated keywords, scored against expertise and page body
    Keywords(Vec<String>),
}

impl SearchQuery {
    /// Parses a raw query string into a query expression
    ///
    /// The mode prefixes are recognized case-insensitively. The term after
    /// a prefix is taken verbatim (lowercased, not trimmed); keywords are
    /// split on commas, trimmed, and blanks dropped.
    ///
    /// # Arguments
    ///
    /// * `raw` - The query string, if any
    ///
    /// # Example
    ///
    /// ```
    /// use irins_harvest::query::SearchQuery;
    ///
    /// assert_eq!(SearchQuery::parse(None), SearchQuery::All);
    /// assert_eq!(
    ///     SearchQuery::parse(Some("name:Ada")),
    ///     SearchQuery::Name("ada".to_string())
    /// );
    /// assert_eq!(
    ///     SearchQuery::parse(Some("Machine Learning, robotics")),
    ///     SearchQuery::Keywords(vec!["machine learning".to_string(), "robotics".to_string()])
    /// );
    /// ```
    pub fn parse(raw: Option<&str>) -> SearchQuery {
        let trimmed = match raw {
            Some(raw) => raw.trim(),
            None => return SearchQuery::All,
        };
        if trimmed.is_empty() {
            return SearchQuery::All;
        }

        let lower = trimmed.to_lowercase();
        if lower.starts_with("name:") {
            return SearchQuery::Name(term_after_colon(trimmed));
        }
        if lower.starts_with("vidwan:") {
            return SearchQuery::Vidwan(term_after_colon(trimmed));
        }

        let keywords = trimmed
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        SearchQuery::Keywords(keywords)
    }
}

/// Everything after the first colon, lowercased
fn term_after_colon(raw: &str) -> String {
    raw.splitn(2, ':').nth(1).unwrap_or("").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_is_all() {
        assert_eq!(SearchQuery::parse(None), SearchQuery::All);
    }

    #[test]
    fn test_blank_query_is_all() {
        assert_eq!(SearchQuery::parse(Some("")), SearchQuery::All);
        assert_eq!(SearchQuery::parse(Some("   ")), SearchQuery::All);
    }

    #[test]
    fn test_name_prefix() {
        assert_eq!(
            SearchQuery::parse(Some("name:Ada")),
            SearchQuery::Name("ada".to_string())
        );
    }

    #[test]
    fn test_name_prefix_is_case_insensitive() {
        assert_eq!(
            SearchQuery::parse(Some("NAME:Ada")),
            SearchQuery::Name("ada".to_string())
        );
    }

    #[test]
    fn test_name_term_is_not_trimmed() {
        // The remainder after the colon is taken verbatim
        assert_eq!(
            SearchQuery::parse(Some("name: Ada")),
            SearchQuery::Name(" ada".to_string())
        );
    }

    #[test]
    fn test_vidwan_prefix() {
        assert_eq!(
            SearchQuery::parse(Some("vidwan:57123")),
            SearchQuery::Vidwan("57123".to_string())
        );
    }

    #[test]
    fn test_keywords_split_trim_lowercase() {
        assert_eq!(
            SearchQuery::parse(Some("Machine Learning , Robotics")),
            SearchQuery::Keywords(vec![
                "machine learning".to_string(),
                "robotics".to_string()
            ])
        );
    }

    #[test]
    fn test_keywords_drop_blanks() {
        assert_eq!(
            SearchQuery::parse(Some("ml,,")),
            SearchQuery::Keywords(vec!["ml".to_string()])
        );
    }

    #[test]
    fn test_only_commas_is_empty_keyword_list() {
        assert_eq!(SearchQuery::parse(Some(",,,")), SearchQuery::Keywords(vec![]));
    }

    #[test]
    fn test_colon_in_keyword_position_is_not_a_mode() {
        // Unknown prefixes fall through to keyword search
        assert_eq!(
            SearchQuery::parse(Some("dept:physics")),
            SearchQuery::Keywords(vec!["dept:physics".to_string()])
        );
    }
}
