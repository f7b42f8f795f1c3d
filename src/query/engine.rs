//! Query evaluation and keyword scoring

use crate::profile::{ProfileRecord, ProfileSummary};
use crate::query::SearchQuery;
use tracing::debug;

/// Evaluates a query against the corpus
///
/// Name and Vidwan matches keep corpus order. Keyword matches are ranked:
/// each keyword scores 2 when found in a record's expertise, else 1 when
/// found in its raw page body, else 0; records scoring 0 are dropped and
/// the rest sort by descending score, corpus order within equal scores.
///
/// # Arguments
///
/// * `corpus` - The harvested records
/// * `query` - The parsed query expression
/// * `institution` - Restrict results to one institution code, exact match
///
/// # Returns
///
/// Matching records as public summaries, raw page bodies stripped
pub fn search(
    corpus: &[ProfileRecord],
    query: &SearchQuery,
    institution: Option<&str>,
) -> Vec<ProfileSummary> {
    let matched: Vec<ProfileSummary> = match query {
        SearchQuery::All => corpus.iter().map(ProfileSummary::from).collect(),

        SearchQuery::Name(term) => corpus
            .iter()
            .filter(|record| record.name.to_lowercase().starts_with(term.as_str()))
            .map(ProfileSummary::from)
            .collect(),

        SearchQuery::Vidwan(term) => corpus
            .iter()
            .filter(|record| record.vidwan_id.to_lowercase() == *term)
            .map(ProfileSummary::from)
            .collect(),

        SearchQuery::Keywords(keywords) => score_keywords(corpus, keywords),
    };

    let results = match institution {
        Some(code) => matched
            .into_iter()
            .filter(|summary| summary.institution == code)
            .collect(),
        None => matched,
    };

    debug!(results = results.len(), "query evaluated");
    results
}

/// Ranks records by keyword relevance
///
/// Each keyword contributes at most once per record: 2 for an expertise
/// hit, otherwise 1 for a body hit. The sort is stable, so ties keep
/// their corpus order.
fn score_keywords(corpus: &[ProfileRecord], keywords: &[String]) -> Vec<ProfileSummary> {
    let mut scored: Vec<(u32, ProfileSummary)> = Vec::new();

    for record in corpus {
        let expertise = record.expertise.to_lowercase();
        let body = record.raw_html.to_lowercase();

        let mut score = 0u32;
        for keyword in keywords {
            if expertise.contains(keyword.as_str()) {
                score += 2;
            } else if body.contains(keyword.as_str()) {
                score += 1;
            }
        }

        if score > 0 {
            scored.push((score, ProfileSummary::from(record)));
        }
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, summary)| summary).collect()
}
