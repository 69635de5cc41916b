//! Resolving a user-typed reference to a single prompt
//!
//! The CLI accepts either an id or a title. Lookup is tiered: exact id, then
//! case-insensitive title, then fuzzy matching over titles with a score boost
//! for prefix and word-boundary hits.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::prompt::Prompt;

/// Maximum suggestions listed for an ambiguous reference
const MAX_SUGGESTIONS: usize = 8;

/// Score lead the best fuzzy hit needs over the runner-up to win outright
const CLEAR_WINNER_MARGIN: i64 = 1000;

pub struct Matcher<'a> {
    prompts: &'a [Prompt],
    fuzzy: SkimMatcherV2,
}

impl<'a> Matcher<'a> {
    pub fn new(prompts: &'a [Prompt]) -> Self {
        Self {
            prompts,
            fuzzy: SkimMatcherV2::default(),
        }
    }

    /// Find the prompt `query` refers to
    pub fn find(&self, query: &str) -> MatchResult<'a> {
        let query = query.trim();
        if query.is_empty() {
            return MatchResult::None;
        }

        if let Some(prompt) = self.prompts.iter().find(|p| p.id == query) {
            return MatchResult::Exact(prompt);
        }

        let query_lower = query.to_lowercase();
        let titled: Vec<&Prompt> = self
            .prompts
            .iter()
            .filter(|p| p.title.to_lowercase() == query_lower)
            .collect();
        match titled.len() {
            0 => {}
            1 => return MatchResult::Exact(titled[0]),
            _ => return MatchResult::Multiple(titled),
        }

        let mut matches: Vec<(&Prompt, i64)> = self
            .prompts
            .iter()
            .filter_map(|prompt| {
                let fuzzy_score = self.fuzzy.fuzzy_match(&prompt.title, query)?;
                Some((prompt, enhanced_score(&prompt.title, query, fuzzy_score)))
            })
            .collect();

        // Stable, so equal scores keep store order
        matches.sort_by(|a, b| b.1.cmp(&a.1));

        match matches.len() {
            0 => MatchResult::None,
            1 => MatchResult::Exact(matches[0].0),
            _ if matches[0].1 > matches[1].1 + CLEAR_WINNER_MARGIN => MatchResult::Exact(matches[0].0),
            _ => MatchResult::Multiple(
                matches
                    .into_iter()
                    .map(|(p, _)| p)
                    .take(MAX_SUGGESTIONS)
                    .collect(),
            ),
        }
    }
}

/// Resolve a reference against `prompts` with a one-off matcher
pub fn resolve<'a>(prompts: &'a [Prompt], query: &str) -> MatchResult<'a> {
    Matcher::new(prompts).find(query)
}

fn enhanced_score(title: &str, query: &str, fuzzy_score: i64) -> i64 {
    let mut score = fuzzy_score;
    let title_lower = title.to_lowercase();
    let query_lower = query.to_lowercase();

    if title_lower.starts_with(&query_lower) {
        score += 2000;
    }

    if title_lower
        .split(['-', '_', ' '])
        .any(|word| word.starts_with(&query_lower))
    {
        score += 1000;
    }

    if title.len() < 20 {
        score += 300;
    }

    score
}

#[derive(Debug)]
pub enum MatchResult<'a> {
    Exact(&'a Prompt),
    /// Ranked candidates when the reference is ambiguous
    Multiple(Vec<&'a Prompt>),
    None,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_prompts;

    #[test]
    fn test_exact_id_match() {
        let prompts = sample_prompts();
        match Matcher::new(&prompts).find("prompt-4") {
            MatchResult::Exact(p) => assert_eq!(p.title, "Academic Research Helper"),
            other => panic!("Expected exact match, got {:?}", other),
        }
    }

    #[test]
    fn test_title_match_ignores_case() {
        let prompts = sample_prompts();
        match Matcher::new(&prompts).find("code refactoring guide") {
            MatchResult::Exact(p) => assert_eq!(p.id, "prompt-6"),
            other => panic!("Expected exact match, got {:?}", other),
        }
    }

    #[test]
    fn test_title_match_folds_non_ascii_case() {
        let mut prompts = sample_prompts();
        let mut accented = prompts[0].clone();
        accented.id = "prompt-7".to_string();
        accented.title = "Éclair Résumé".to_string();
        prompts.push(accented);

        match Matcher::new(&prompts).find("éclair résumé") {
            MatchResult::Exact(p) => assert_eq!(p.id, "prompt-7"),
            other => panic!("Expected exact match, got {:?}", other),
        }
    }

    #[test]
    fn test_fuzzy_prefix_wins_outright() {
        let prompts = sample_prompts();
        match Matcher::new(&prompts).find("Website") {
            MatchResult::Exact(p) => assert_eq!(p.id, "prompt-1"),
            other => panic!("Expected exact match, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_titles_are_ambiguous() {
        let mut prompts = sample_prompts();
        let mut copy = prompts[0].clone();
        copy.id = "prompt-7".to_string();
        prompts.push(copy);

        match Matcher::new(&prompts).find("Website Redesign Expert") {
            MatchResult::Multiple(matches) => assert_eq!(matches.len(), 2),
            other => panic!("Expected multiple matches, got {:?}", other),
        }
    }

    #[test]
    fn test_no_match() {
        let prompts = sample_prompts();
        assert!(matches!(
            Matcher::new(&prompts).find("qqqqzzzz"),
            MatchResult::None
        ));
        assert!(matches!(Matcher::new(&prompts).find("  "), MatchResult::None));
    }
}
