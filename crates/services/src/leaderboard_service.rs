use std::sync::Arc;

use prep_core::model::{LeaderboardEntry, UserId};
use storage::repository::LeaderboardRepository;

use crate::error::LeaderboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    #[must_use]
    pub fn for_position(position: u32) -> Option<Self> {
        match position {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub entry: LeaderboardEntry,
    pub medal: Option<Medal>,
    pub is_current_user: bool,
}

/// Global rankings with search and current-user highlighting.
#[derive(Clone)]
pub struct LeaderboardService {
    entries: Arc<dyn LeaderboardRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(entries: Arc<dyn LeaderboardRepository>) -> Self {
        Self { entries }
    }

    /// Standings ordered by position, filtered by a case-insensitive
    /// substring of the user name. A blank search matches everyone.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError::Storage` if the leaderboard cannot be read.
    pub async fn standings(
        &self,
        current_user: Option<UserId>,
        search: &str,
    ) -> Result<Vec<Standing>, LeaderboardError> {
        let needle = search.trim().to_lowercase();
        let mut entries = self.entries.list_entries().await?;
        entries.sort_by_key(|e| e.position);

        Ok(entries
            .into_iter()
            .filter(|e| needle.is_empty() || e.user_name.to_lowercase().contains(&needle))
            .map(|entry| Standing {
                medal: Medal::for_position(entry.position),
                is_current_user: current_user == Some(entry.user_id),
                entry,
            })
            .collect())
    }

    /// The first `count` entries by position.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError::Storage` if the leaderboard cannot be read.
    pub async fn top_achievers(&self, count: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut entries = self.entries.list_entries().await?;
        entries.sort_by_key(|e| e.position);
        entries.truncate(count);
        Ok(entries)
    }
}
