use std::collections::HashMap;

use crate::ids::ProfileId;

/// Per-profile genre interest scores.
///
/// Scores only ever grow through the tracker's atomic-increment contract;
/// key order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenrePreferences {
    pub profile_id: Option<ProfileId>,
    pub scores: HashMap<String, i64>,
}

impl GenrePreferences {
    pub fn new(profile_id: ProfileId) -> Self {
        Self {
            profile_id: Some(profile_id),
            scores: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The `n` highest-scored genre labels, best first. Ties break
    /// alphabetically so the result is deterministic.
    pub fn top_genres(&self, n: usize) -> Vec<&str> {
        let mut ranked: Vec<(&str, i64)> = self
            .scores
            .iter()
            .map(|(genre, score)| (genre.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().take(n).map(|(genre, _)| genre).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_genres_ranks_by_score_then_label() {
        let mut prefs = GenrePreferences::new(ProfileId::new());
        prefs.scores.insert("Drama".to_string(), 4);
        prefs.scores.insert("Action".to_string(), 9);
        prefs.scores.insert("Comedy".to_string(), 4);

        assert_eq!(prefs.top_genres(2), vec!["Action", "Comedy"]);
        assert_eq!(prefs.top_genres(10).len(), 3);
    }
}
