use async_trait::async_trait;
use prep_core::model::{
    Answer, AnswerId, Interview, InterviewId, LeaderboardEntry, PerformanceHistory, Question,
    QuestionId, User, UserId,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::fixtures;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("invalid fixture data: {0}")]
    Fixture(#[from] prep_core::Error),
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Read access to the question bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// All questions in their canonical order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the questions cannot be read.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError>;
}

#[async_trait]
pub trait InterviewRepository: Send + Sync {
    /// Store a new interview, assigning the next free id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the interview cannot be stored.
    async fn insert_interview(&self, interview: Interview) -> Result<Interview, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_interview(&self, id: InterviewId) -> Result<Interview, StorageError>;

    /// Interviews of one user, most recent date first (newest id breaks ties).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the interviews cannot be read.
    async fn list_interviews(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<Interview>, StorageError>;
}

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Store a new answer, assigning the next free id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the answer cannot be stored.
    async fn insert_answer(&self, answer: Answer) -> Result<Answer, StorageError>;

    /// Answers of one interview in the order they were given.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the answers cannot be read.
    async fn list_answers(&self, interview_id: InterviewId) -> Result<Vec<Answer>, StorageError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_user(&self, id: UserId) -> Result<User, StorageError>;

    /// Look a user up by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the users cannot be read.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Store a new user, assigning the next free id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_user(&self, user: User) -> Result<User, StorageError>;
}

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the leaderboard cannot be read.
    async fn list_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError>;
}

#[async_trait]
pub trait PerformanceRepository: Send + Sync {
    /// Performance data for a user; empty when nothing has been recorded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data cannot be read.
    async fn performance(&self, user_id: UserId) -> Result<PerformanceHistory, StorageError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    questions: Vec<Question>,
    interviews: BTreeMap<InterviewId, Interview>,
    answers: BTreeMap<AnswerId, Answer>,
    leaderboard: Vec<LeaderboardEntry>,
    performance: BTreeMap<UserId, PerformanceHistory>,
}

/// Map-backed repository used by the app and tests.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository preloaded with the bundled sample data.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Fixture` if the sample data fails validation.
    pub fn seeded() -> Result<Self, StorageError> {
        let set = fixtures::load()?;
        let tables = Tables {
            users: set.users.into_iter().map(|u| (u.id(), u)).collect(),
            questions: set.questions,
            interviews: set.interviews.into_iter().map(|i| (i.id(), i)).collect(),
            answers: set.answers.into_iter().map(|a| (a.id, a)).collect(),
            leaderboard: set.leaderboard,
            performance: set.performance.into_iter().collect(),
        };
        Ok(Self {
            tables: Arc::new(Mutex::new(tables)),
        })
    }

    /// Empty repository holding only the given question bank.
    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables {
                questions,
                ..Tables::default()
            })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StorageError> {
        self.tables
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

fn next_key<K, V>(map: &BTreeMap<K, V>, value: impl Fn(&K) -> u64) -> u64 {
    map.keys().next_back().map_or(1, |k| value(k) + 1)
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(self.lock()?.questions.clone())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError> {
        let guard = self.lock()?;
        guard
            .questions
            .iter()
            .find(|q| q.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl InterviewRepository for InMemoryRepository {
    async fn insert_interview(&self, interview: Interview) -> Result<Interview, StorageError> {
        let mut guard = self.lock()?;
        let id = InterviewId::new(next_key(&guard.interviews, InterviewId::value));
        let interview = interview.with_id(id);
        guard.interviews.insert(id, interview.clone());
        Ok(interview)
    }

    async fn get_interview(&self, id: InterviewId) -> Result<Interview, StorageError> {
        let guard = self.lock()?;
        guard.interviews.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_interviews(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<Interview>, StorageError> {
        let guard = self.lock()?;
        let mut interviews: Vec<Interview> = guard
            .interviews
            .values()
            .filter(|i| i.user_id() == user_id)
            .cloned()
            .collect();
        interviews.sort_by(|a, b| b.date().cmp(&a.date()).then(b.id().cmp(&a.id())));
        interviews.truncate(limit);
        Ok(interviews)
    }
}

#[async_trait]
impl AnswerRepository for InMemoryRepository {
    async fn insert_answer(&self, answer: Answer) -> Result<Answer, StorageError> {
        let mut guard = self.lock()?;
        if !guard.interviews.contains_key(&answer.interview_id) {
            return Err(StorageError::NotFound);
        }
        let id = AnswerId::new(next_key(&guard.answers, AnswerId::value));
        let answer = answer.with_id(id);
        guard.answers.insert(id, answer.clone());
        Ok(answer)
    }

    async fn list_answers(&self, interview_id: InterviewId) -> Result<Vec<Answer>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .answers
            .values()
            .filter(|a| a.interview_id == interview_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: UserId) -> Result<User, StorageError> {
        let guard = self.lock()?;
        guard.users.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let guard = self.lock()?;
        let email = email.trim().to_lowercase();
        Ok(guard.users.values().find(|u| u.email() == email).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<User, StorageError> {
        let mut guard = self.lock()?;
        if guard.users.values().any(|u| u.email() == user.email()) {
            return Err(StorageError::Conflict);
        }
        let id = UserId::new(next_key(&guard.users, UserId::value));
        let user = user.with_id(id);
        guard.users.insert(id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryRepository {
    async fn list_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        Ok(self.lock()?.leaderboard.clone())
    }
}

#[async_trait]
impl PerformanceRepository for InMemoryRepository {
    async fn performance(&self, user_id: UserId) -> Result<PerformanceHistory, StorageError> {
        let guard = self.lock()?;
        Ok(guard.performance.get(&user_id).cloned().unwrap_or_default())
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub interviews: Arc<dyn InterviewRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pub users: Arc<dyn UserRepository>,
    pub leaderboard: Arc<dyn LeaderboardRepository>,
    pub performance: Arc<dyn PerformanceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Storage backed by the bundled sample data.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Fixture` if the sample data fails validation.
    pub fn seeded() -> Result<Self, StorageError> {
        Ok(Self::from_repository(InMemoryRepository::seeded()?))
    }

    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        Self {
            questions: Arc::new(repo.clone()),
            interviews: Arc::new(repo.clone()),
            answers: Arc::new(repo.clone()),
            users: Arc::new(repo.clone()),
            leaderboard: Arc::new(repo.clone()),
            performance: Arc::new(repo),
        }
    }
}
