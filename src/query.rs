//! Query pipeline: selection state in, ordered visible prompts out
//!
//! The pipeline is a pure function of the record list and the current
//! selection. Stages run in a fixed order: tag filter, view filter, search,
//! then a stable sort.

use clap::ValueEnum;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::prompt::Prompt;

/// Tag filter value that disables tag filtering
pub const ALL_TAGS: &str = "All";

/// Top-level scope selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewTab {
    #[default]
    #[value(name = "all")]
    AllPrompts,
    #[value(name = "favorites")]
    Favorites,
}

impl ViewTab {
    pub fn label(&self) -> &'static str {
        match self {
            ViewTab::AllPrompts => "All Prompts",
            ViewTab::Favorites => "Favorites",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewTab::AllPrompts => ViewTab::Favorites,
            ViewTab::Favorites => ViewTab::AllPrompts,
        }
    }
}

impl fmt::Display for ViewTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    /// Most recently created first
    #[default]
    #[value(name = "newest")]
    Newest,
    #[value(name = "oldest")]
    Oldest,
    /// Alphabetical by title
    #[value(name = "a-z")]
    AToZ,
    #[value(name = "most-used")]
    MostUsed,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::AToZ,
        SortKey::MostUsed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::AToZ => "a-z",
            SortKey::MostUsed => "most-used",
        }
    }

    /// Next key in menu order, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

/// Ephemeral UI selection; resets to defaults on every start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub tag: String,
    pub view: ViewTab,
    pub sort: SortKey,
    pub search: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            tag: ALL_TAGS.to_string(),
            view: ViewTab::default(),
            sort: SortKey::default(),
            search: String::new(),
        }
    }
}

/// Compare two titles the way a browser's default `localeCompare` orders Latin
/// text: base letters first, then accents, then lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = base_letters(a).cmp(base_letters(b));
    if primary != Ordering::Equal {
        return primary;
    }

    // Unaccented before accented
    let accents = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if accents != Ordering::Equal {
        return accents;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            return match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => ca.cmp(&cb),
            };
        }
    }

    a.len().cmp(&b.len())
}

/// Decomposed, mark-free and case-folded: "Éclair" yields "eclair"
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Run the pipeline and return references into `prompts`
pub fn visible<'a>(prompts: &'a [Prompt], selection: &Selection) -> Vec<&'a Prompt> {
    let needle = selection.search.trim().to_lowercase();

    let mut result: Vec<&Prompt> = prompts
        .iter()
        .filter(|p| selection.tag == ALL_TAGS || p.has_tag(&selection.tag))
        .filter(|p| selection.view == ViewTab::AllPrompts || p.favorite)
        .filter(|p| needle.is_empty() || p.matches_lowercase(&needle))
        .collect();

    // slice::sort_by is stable, ties keep store order
    match selection.sort {
        SortKey::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::AToZ => result.sort_by(|a, b| locale_cmp(&a.title, &b.title)),
        SortKey::MostUsed => result.sort_by(|a, b| b.use_count.cmp(&a.use_count)),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_prompts;

    fn ids<'a>(prompts: &[&'a Prompt]) -> Vec<&'a str> {
        prompts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_selection_sorts_newest_first() {
        let prompts = sample_prompts();
        let result = visible(&prompts, &Selection::default());
        assert_eq!(
            ids(&result),
            vec!["prompt-6", "prompt-5", "prompt-4", "prompt-3", "prompt-2", "prompt-1"]
        );
    }

    #[test]
    fn test_favorites_view_on_seed_data() {
        let prompts = sample_prompts();
        let selection = Selection {
            view: ViewTab::Favorites,
            ..Selection::default()
        };
        assert_eq!(ids(&visible(&prompts, &selection)), vec!["prompt-6", "prompt-3"]);
    }

    #[test]
    fn test_tag_filter_is_case_sensitive() {
        let prompts = sample_prompts();
        let exact = Selection {
            tag: "Coding".to_string(),
            sort: SortKey::Oldest,
            ..Selection::default()
        };
        assert_eq!(ids(&visible(&prompts, &exact)), vec!["prompt-2", "prompt-6"]);

        let lower = Selection {
            tag: "coding".to_string(),
            ..Selection::default()
        };
        assert!(visible(&prompts, &lower).is_empty());
    }

    #[test]
    fn test_search_matches_tag_only() {
        let mut prompts = sample_prompts();
        prompts[0].tags.push("Zebra".to_string());
        let selection = Selection {
            search: "zeb".to_string(),
            ..Selection::default()
        };
        assert_eq!(ids(&visible(&prompts, &selection)), vec!["prompt-1"]);
    }

    #[test]
    fn test_search_matches_description() {
        let prompts = sample_prompts();
        let selection = Selection {
            search: "conversion optimization".to_string(),
            ..Selection::default()
        };
        assert_eq!(ids(&visible(&prompts, &selection)), vec!["prompt-1"]);
    }

    #[test]
    fn test_whitespace_search_is_no_filter() {
        let prompts = sample_prompts();
        let selection = Selection {
            search: "   ".to_string(),
            ..Selection::default()
        };
        assert_eq!(visible(&prompts, &selection).len(), 6);
    }

    #[test]
    fn test_stages_compose() {
        let prompts = sample_prompts();
        let selection = Selection {
            tag: "Coding".to_string(),
            view: ViewTab::Favorites,
            sort: SortKey::Newest,
            search: "REFACTOR".to_string(),
        };
        assert_eq!(ids(&visible(&prompts, &selection)), vec!["prompt-6"]);
    }

    #[test]
    fn test_most_used_sort_is_stable() {
        let mut prompts = sample_prompts();
        prompts[1].use_count = 9; // ties with prompt-5
        let selection = Selection {
            sort: SortKey::MostUsed,
            ..Selection::default()
        };
        assert_eq!(
            ids(&visible(&prompts, &selection)),
            vec!["prompt-3", "prompt-6", "prompt-2", "prompt-5", "prompt-1", "prompt-4"]
        );
    }

    #[test]
    fn test_equal_timestamps_keep_store_order() {
        let mut prompts = sample_prompts();
        let stamp = prompts[0].created_at;
        for prompt in prompts.iter_mut() {
            prompt.created_at = stamp;
        }

        for sort in [SortKey::Newest, SortKey::Oldest] {
            let selection = Selection {
                sort,
                ..Selection::default()
            };
            assert_eq!(
                ids(&visible(&prompts, &selection)),
                vec!["prompt-1", "prompt-2", "prompt-3", "prompt-4", "prompt-5", "prompt-6"]
            );
        }
    }

    #[test]
    fn test_a_z_sort() {
        let prompts = sample_prompts();
        let selection = Selection {
            sort: SortKey::AToZ,
            ..Selection::default()
        };
        assert_eq!(
            ids(&visible(&prompts, &selection)),
            vec!["prompt-4", "prompt-6", "prompt-3", "prompt-5", "prompt-2", "prompt-1"]
        );
    }

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zoo", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_sorts_accented_letters_with_their_base() {
        assert_eq!(locale_cmp("Éclair", "Zebra"), Ordering::Less);
        assert_eq!(locale_cmp("éclair", "ecrire"), Ordering::Less);
        assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_cmp("Résumé", "résumé"), Ordering::Greater);

        let mut titles = vec!["Zebra", "Éclair", "apple", "Ärger"];
        titles.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(titles, vec!["apple", "Ärger", "Éclair", "Zebra"]);
    }

    #[test]
    fn test_a_z_sort_places_accented_title_among_latin_titles() {
        let mut prompts = sample_prompts();
        prompts[0].title = "Édition Checklist".to_string();
        let selection = Selection {
            sort: SortKey::AToZ,
            ..Selection::default()
        };
        assert_eq!(
            ids(&visible(&prompts, &selection)),
            vec!["prompt-4", "prompt-6", "prompt-3", "prompt-1", "prompt-5", "prompt-2"]
        );
    }

    #[test]
    fn test_sort_key_round_trips_labels() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("alphabetical".parse::<SortKey>().is_err());
        assert_eq!(SortKey::MostUsed.next(), SortKey::Newest);
    }
}
