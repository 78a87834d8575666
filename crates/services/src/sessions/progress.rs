use super::controller::{SessionSnapshot, SessionStatus};

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of questions handed in, 0–100.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        u32::try_from(self.answered * 100 / self.total).unwrap_or(100)
    }
}

impl From<&SessionSnapshot> for SessionProgress {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            total: snapshot.total,
            answered: snapshot.answered,
            remaining: snapshot.total.saturating_sub(snapshot.answered),
            is_complete: snapshot.status == SessionStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_answered_questions() {
        let progress = SessionProgress {
            total: 5,
            answered: 2,
            remaining: 3,
            is_complete: false,
        };
        assert_eq!(progress.percent(), 40);
    }
}
