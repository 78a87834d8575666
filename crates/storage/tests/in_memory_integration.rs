use chrono::NaiveDate;
use prep_core::model::{
    Answer, AnswerId, Interview, InterviewId, InterviewStatus, QuestionId, User, UserId,
};
use storage::Storage;
use storage::fixtures::{DEMO_USER_EMAIL, DEMO_USER_ID};

#[tokio::test]
async fn seeded_storage_serves_sample_data() {
    let storage = Storage::seeded().expect("seed");

    let questions = storage.questions.list_questions().await.unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0].category(), "Problem Solving");

    let user = storage
        .users
        .find_user_by_email(" Alex@Example.com ")
        .await
        .unwrap()
        .expect("demo user");
    assert_eq!(user.id(), DEMO_USER_ID);
    assert_eq!(user.email(), DEMO_USER_EMAIL);

    let leaderboard = storage.leaderboard.list_entries().await.unwrap();
    assert_eq!(leaderboard[0].user_name, "Emma Rodriguez");

    let history = storage.performance.performance(DEMO_USER_ID).await.unwrap();
    assert_eq!(history.latest().map(|p| p.score), Some(91));
}

#[tokio::test]
async fn recorded_interview_is_listed_first_with_its_answers() {
    let storage = Storage::seeded().expect("seed");

    let interview = Interview::new(
        InterviewId::new(0),
        DEMO_USER_ID,
        "Software Engineering Interview",
        NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
        InterviewStatus::Completed,
        Some(88),
        Some(4),
    )
    .unwrap();
    let stored = storage.interviews.insert_interview(interview).await.unwrap();
    assert_eq!(stored.id(), InterviewId::new(5));

    for (question, text) in [(1, "first answer"), (2, "second answer")] {
        let answer = Answer::new(
            AnswerId::new(0),
            stored.id(),
            QuestionId::new(question),
            text,
            Some(30),
            None,
        )
        .unwrap();
        storage.answers.insert_answer(answer).await.unwrap();
    }

    let recent = storage.interviews.list_interviews(DEMO_USER_ID, 1).await.unwrap();
    assert_eq!(recent[0].id(), stored.id());

    let answers = storage.answers.list_answers(stored.id()).await.unwrap();
    let texts: Vec<&str> = answers.iter().map(Answer::text).collect();
    assert_eq!(texts, ["first answer", "second answer"]);
    assert_eq!(answers[0].id, AnswerId::new(3));
}

#[tokio::test]
async fn registered_user_gets_next_id() {
    let storage = Storage::seeded().expect("seed");
    let user = User::new(UserId::new(0), "Jamie Doe", "jamie@example.com", None).unwrap();
    let stored = storage.users.insert_user(user).await.unwrap();
    assert_eq!(stored.id(), UserId::new(2));
    assert_eq!(storage.users.get_user(stored.id()).await.unwrap().name(), "Jamie Doe");
}
