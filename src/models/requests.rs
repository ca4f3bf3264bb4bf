use serde::{Deserialize, Serialize};
use validator::Validate;

/// Optional narrowing applied to ranked match lists
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MatchListQuery {
    #[serde(alias = "min_score", rename = "minScore", default)]
    #[validate(range(min = 0, max = 1000))]
    pub min_score: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<usize>,
}

impl MatchListQuery {
    /// Drop matches under `min_score`, then truncate to `limit`.
    /// Ranking order is preserved.
    pub fn apply<T, F>(&self, mut matches: Vec<T>, score: F) -> Vec<T>
    where
        F: Fn(&T) -> i32,
    {
        if let Some(min_score) = self.min_score {
            matches.retain(|m| score(m) >= min_score);
        }
        if let Some(limit) = self.limit {
            matches.truncate(limit);
        }
        matches
    }
}
