use serde::Serialize;
use services::{Medal, Standing};

#[must_use]
pub fn medal_glyph(medal: Medal) -> &'static str {
    match medal {
        Medal::Gold => "🏆",
        Medal::Silver => "🥈",
        Medal::Bronze => "🥉",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeaderboardRowVm {
    pub rank: String,
    pub name: String,
    pub initials: String,
    pub avatar: Option<String>,
    pub score: u32,
    pub interviews: u32,
    pub best_category: String,
    pub highlighted: bool,
}

impl From<&Standing> for LeaderboardRowVm {
    fn from(standing: &Standing) -> Self {
        let entry = &standing.entry;
        let rank = standing
            .medal
            .map_or_else(|| entry.position.to_string(), |m| medal_glyph(m).to_owned());
        let name = if standing.is_current_user {
            format!("{} (You)", entry.user_name)
        } else {
            entry.user_name.clone()
        };
        Self {
            rank,
            name,
            initials: entry.user_name.chars().take(2).collect(),
            avatar: entry.user_avatar.clone(),
            score: entry.score,
            interviews: entry.interviews_completed,
            best_category: entry.best_category.clone(),
            highlighted: standing.is_current_user,
        }
    }
}

#[must_use]
pub fn map_standings(standings: &[Standing]) -> Vec<LeaderboardRowVm> {
    standings.iter().map(LeaderboardRowVm::from).collect()
}
