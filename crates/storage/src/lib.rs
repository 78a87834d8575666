#![forbid(unsafe_code)]

pub mod fixtures;
pub mod repository;

pub use repository::{
    AnswerRepository, InMemoryRepository, InterviewRepository, LeaderboardRepository,
    PerformanceRepository, QuestionRepository, Storage, StorageError, UserRepository,
};
