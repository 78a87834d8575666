//! Sample data the app ships with in place of a backend.

use chrono::NaiveDate;
use prep_core::Error;
use prep_core::model::{
    Answer, AnswerId, CategoryScore, Difficulty, Evaluation, Interview, InterviewId,
    InterviewStatus, LeaderboardEntry, PerformanceHistory, Question, QuestionId, ScorePoint, User,
    UserId,
};

/// Id of the demo account every fixture belongs to.
pub const DEMO_USER_ID: UserId = UserId::new(1);
pub const DEMO_USER_EMAIL: &str = "alex@example.com";

/// Everything `InMemoryRepository::seeded` loads.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub users: Vec<User>,
    pub questions: Vec<Question>,
    pub interviews: Vec<Interview>,
    pub answers: Vec<Answer>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub performance: Vec<(UserId, PerformanceHistory)>,
}

/// Build the full fixture set.
///
/// # Errors
///
/// Returns a domain validation error if any fixture is malformed.
pub fn load() -> Result<FixtureSet, Error> {
    Ok(FixtureSet {
        users: vec![demo_user()?],
        questions: questions()?,
        interviews: recent_interviews()?,
        answers: answers()?,
        leaderboard: leaderboard(),
        performance: vec![(DEMO_USER_ID, performance()?)],
    })
}

fn day(year: i32, month: u32, day: u32) -> Result<NaiveDate, Error> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::InvalidDate { year, month, day })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// # Errors
///
/// Returns a validation error if the fixture user is malformed.
pub fn demo_user() -> Result<User, Error> {
    Ok(User::new(
        DEMO_USER_ID,
        "Alex Johnson",
        DEMO_USER_EMAIL,
        Some("https://i.pravatar.cc/150?img=68".to_owned()),
    )?)
}

/// The five questions of the sample software engineering interview, in order.
///
/// # Errors
///
/// Returns a validation error if a fixture question is malformed.
pub fn questions() -> Result<Vec<Question>, Error> {
    let rows = [
        (
            1,
            "Describe a challenging problem you faced in a project and how you resolved it.",
            "Problem Solving",
            Difficulty::Medium,
        ),
        (
            2,
            "How do you handle conflicts within a team?",
            "Teamwork",
            Difficulty::Medium,
        ),
        (
            3,
            "Explain a complex technical concept in simple terms.",
            "Communication",
            Difficulty::Hard,
        ),
        (
            4,
            "What are your long-term career goals?",
            "Career Planning",
            Difficulty::Easy,
        ),
        (
            5,
            "How do you prioritize your work when managing multiple projects?",
            "Time Management",
            Difficulty::Medium,
        ),
    ];
    rows.into_iter()
        .map(|(id, text, category, difficulty)| {
            Question::new(QuestionId::new(id), text, category, difficulty).map_err(Error::from)
        })
        .collect()
}

/// # Errors
///
/// Returns a validation error if a fixture interview is malformed.
pub fn recent_interviews() -> Result<Vec<Interview>, Error> {
    Ok(vec![
        Interview::new(
            InterviewId::new(1),
            DEMO_USER_ID,
            "Software Engineering Interview",
            day(2023, 10, 15)?,
            InterviewStatus::Completed,
            Some(87),
            Some(45),
        )?,
        Interview::new(
            InterviewId::new(2),
            DEMO_USER_ID,
            "Product Management Interview",
            day(2023, 10, 20)?,
            InterviewStatus::Completed,
            Some(92),
            Some(52),
        )?,
        Interview::new(
            InterviewId::new(3),
            DEMO_USER_ID,
            "Data Science Interview",
            day(2023, 10, 28)?,
            InterviewStatus::Scheduled,
            None,
            None,
        )?,
        Interview::new(
            InterviewId::new(4),
            DEMO_USER_ID,
            "UX Design Interview",
            day(2023, 10, 30)?,
            InterviewStatus::InProgress,
            None,
            None,
        )?,
    ])
}

/// Canned evaluations keyed by question, reused by the fixture evaluator.
///
/// # Errors
///
/// Returns a validation error if a fixture evaluation is malformed.
pub fn evaluations() -> Result<Vec<(QuestionId, Evaluation)>, Error> {
    Ok(vec![
        (
            QuestionId::new(1),
            Evaluation::new(
                92,
                "Strong answer with specific details and measurable results.",
                strings(&[
                    "Clearly identified the problem",
                    "Demonstrated technical knowledge",
                    "Provided quantifiable results",
                    "Showed initiative in implementing additional solutions",
                ]),
                strings(&[
                    "Could mention collaboration with team members",
                    "Consider adding how you documented the solution for future reference",
                ]),
            )?,
        ),
        (
            QuestionId::new(2),
            Evaluation::new(
                85,
                "Good approach to conflict resolution with a concrete example.",
                strings(&[
                    "Emphasized communication",
                    "Took initiative to facilitate resolution",
                    "Found a compromise solution",
                    "Remained neutral in the process",
                ]),
                strings(&[
                    "Could elaborate on preventing similar conflicts in the future",
                    "Consider discussing how you follow up after conflict resolution",
                ]),
            )?,
        ),
    ])
}

/// Evaluation handed out for questions without a canned one.
///
/// # Errors
///
/// Returns a validation error if the fixture evaluation is malformed.
pub fn generic_evaluation() -> Result<Evaluation, Error> {
    Ok(Evaluation::new(
        80,
        "Clear answer that addresses the question with a relevant example.",
        strings(&[
            "Answered the question directly",
            "Kept the structure easy to follow",
        ]),
        strings(&[
            "Use the STAR method to frame the example",
            "Quantify the outcome where possible",
        ]),
    )?)
}

/// # Errors
///
/// Returns a validation error if a fixture answer is malformed.
pub fn answers() -> Result<Vec<Answer>, Error> {
    let texts = [
        (
            1,
            "In my last project, we faced a critical performance issue with our database queries that was causing timeouts. I analyzed the query execution plans, identified inefficient joins, and implemented indexing strategies that reduced query time by 80%. I also introduced caching for frequently accessed data which further improved performance.",
            135,
        ),
        (
            2,
            "I believe open communication is key to resolving conflicts. In one instance, two team members had different approaches to a project. I organized a meeting where each person could express their ideas, facilitated a discussion of pros and cons, and helped the team reach a compromise that incorporated the best elements of both approaches.",
            110,
        ),
    ];
    let mut evaluations = evaluations()?.into_iter();
    texts
        .into_iter()
        .map(|(id, text, elapsed)| {
            let evaluation = evaluations.next().map(|(_, evaluation)| evaluation);
            Answer::new(
                AnswerId::new(id),
                InterviewId::new(1),
                QuestionId::new(id),
                text,
                Some(elapsed),
                evaluation,
            )
            .map_err(Error::from)
        })
        .collect()
}

#[must_use]
pub fn leaderboard() -> Vec<LeaderboardEntry> {
    let rows = [
        (2, "Emma Rodriguez", 5, 95, 12, "Technical Skills"),
        (3, "Michael Chen", 8, 93, 10, "Problem Solving"),
        (1, "Alex Johnson", 68, 91, 8, "Communication"),
        (4, "Sarah Williams", 10, 89, 9, "Leadership"),
        (5, "James Brown", 12, 87, 7, "Teamwork"),
        (6, "Olivia Martinez", 16, 85, 6, "Critical Thinking"),
        (7, "Daniel Lee", 3, 84, 8, "Adaptability"),
        (8, "Sophia Miller", 20, 82, 5, "Time Management"),
    ];
    rows.into_iter()
        .zip(1..)
        .map(
            |((user, name, avatar, score, completed, category), position)| LeaderboardEntry {
                user_id: UserId::new(user),
                user_name: name.to_owned(),
                user_avatar: Some(format!("https://i.pravatar.cc/150?img={avatar}")),
                position,
                score,
                interviews_completed: completed,
                best_category: category.to_owned(),
            },
        )
        .collect()
}

/// # Errors
///
/// Returns an error if a fixture date is invalid.
pub fn performance() -> Result<PerformanceHistory, Error> {
    let categories = [
        ("Communication", 85),
        ("Problem Solving", 92),
        ("Technical Knowledge", 78),
        ("Leadership", 70),
        ("Time Management", 88),
    ]
    .into_iter()
    .map(|(name, score)| CategoryScore {
        name: name.to_owned(),
        score,
    })
    .collect();

    let progression = [
        ((2023, 8, 1), 65),
        ((2023, 8, 15), 72),
        ((2023, 9, 1), 78),
        ((2023, 9, 15), 82),
        ((2023, 10, 1), 87),
        ((2023, 10, 15), 91),
    ]
    .into_iter()
    .map(|((y, m, d), score)| Ok(ScorePoint { date: day(y, m, d)?, score }))
    .collect::<Result<Vec<_>, Error>>()?;

    Ok(PerformanceHistory {
        categories,
        progression,
    })
}
