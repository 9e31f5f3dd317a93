use super::*;

async fn seeded_db() -> Database {
    let db = Database::in_memory().await.expect("in-memory database");
    let questions = db.questions();

    for (i, difficulty) in [
        Difficulty::Easy,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Medium,
        Difficulty::Medium,
        Difficulty::Hard,
    ]
    .into_iter()
    .enumerate()
    {
        questions
            .insert(&NewQuestion::new(
                format!("math question {}", i),
                format!("answer {}", i),
                difficulty,
                "math",
            ))
            .await
            .unwrap();
    }

    questions
        .insert(&NewQuestion::new(
            "What is the capital of France?",
            "Paris",
            Difficulty::Easy,
            "Geography",
        ))
        .await
        .unwrap();

    db
}

fn sample_result(question: &str, is_correct: bool, similarity: f32) -> NewResult {
    NewResult {
        question_text: question.to_string(),
        candidate_text: "candidate".to_string(),
        reference_text: "reference".to_string(),
        is_correct,
        similarity,
    }
}

#[test]
fn test_difficulty_parse_case_insensitive() {
    assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
    assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
    assert_eq!(" Hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);

    let err = "extreme".parse::<Difficulty>().unwrap_err();
    assert_eq!(err.value, "extreme");
}

#[test]
fn test_difficulty_serde() {
    assert_eq!(serde_json::to_value(Difficulty::Hard).unwrap(), "hard");
    let parsed: Difficulty = serde_json::from_value(serde_json::json!("Easy")).unwrap();
    assert_eq!(parsed, Difficulty::Easy);
    assert!(serde_json::from_value::<Difficulty>(serde_json::json!("expert")).is_err());
}

#[test]
fn test_new_result_accepts_camel_case() {
    let json = serde_json::json!({
        "question": "2 + 2?",
        "userAnswer": "four",
        "correctAnswer": "4",
        "isCorrect": true,
        "similarity": 0.81
    });

    let result: NewResult = serde_json::from_value(json).unwrap();

    assert_eq!(result.candidate_text, "four");
    assert_eq!(result.reference_text, "4");
    assert!(result.is_correct);
}

#[test]
fn test_new_result_accepts_snake_case() {
    let json = serde_json::json!({
        "question": "2 + 2?",
        "user_answer": "four",
        "correct_answer": "4",
        "is_correct": false,
        "similarity": 0.3
    });

    let result: NewResult = serde_json::from_value(json).unwrap();
    assert_eq!(result.candidate_text, "four");
    assert!(!result.is_correct);
}

#[test]
fn test_new_question_validate() {
    assert!(NewQuestion::new("q", "a", Difficulty::Easy, "math").validate().is_ok());

    let err = NewQuestion::new("q", "  ", Difficulty::Easy, "math")
        .validate()
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput { .. }));
    assert!(err.to_string().contains("answer"));
}

#[test]
fn test_counts_from_signed_rejects_negative() {
    let err = DifficultyCounts::from_signed(1, -2, 0).unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput { .. }));
    assert!(err.to_string().contains("medium_count"));

    let counts = DifficultyCounts::from_signed(1, 2, 0).unwrap();
    assert_eq!(counts, DifficultyCounts::new(1, 2, 0));
    assert_eq!(counts.total(), 3);
    assert_eq!(
        counts.requested().collect::<Vec<_>>(),
        vec![(Difficulty::Easy, 1), (Difficulty::Medium, 2)]
    );
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let db = Database::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db.migrate().await.unwrap();
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_question_crud() {
    let db = Database::in_memory().await.unwrap();
    let questions = db.questions();

    let id = questions
        .insert(&NewQuestion::new("2 + 2?", "4", Difficulty::Easy, "math"))
        .await
        .unwrap();

    let record = questions.get(id).await.unwrap();
    assert_eq!(record.question_text, "2 + 2?");
    assert_eq!(record.difficulty, Difficulty::Easy);

    questions
        .update(id, &NewQuestion::new("3 + 3?", "6", Difficulty::Medium, "math"))
        .await
        .unwrap();
    let record = questions.get(id).await.unwrap();
    assert_eq!(record.answer_text, "6");
    assert_eq!(record.difficulty, Difficulty::Medium);

    questions.delete(id).await.unwrap();
    assert!(matches!(
        questions.get(id).await,
        Err(StoreError::NotFound { id: missing }) if missing == id
    ));
}

#[tokio::test]
async fn test_update_and_delete_missing_is_not_found() {
    let db = Database::in_memory().await.unwrap();
    let questions = db.questions();

    let err = questions
        .update(42, &NewQuestion::new("q", "a", Difficulty::Hard, "math"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 42 }));

    let err = questions.delete(42).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 42 }));
}

#[tokio::test]
async fn test_list_with_filters() {
    let db = seeded_db().await;
    let questions = db.questions();

    assert_eq!(questions.list(&QuestionFilter::default()).await.unwrap().len(), 7);

    let math = questions
        .list(&QuestionFilter {
            subject: Some("MATH".to_string()),
            difficulty: None,
        })
        .await
        .unwrap();
    assert_eq!(math.len(), 6);
    assert!(math.windows(2).all(|w| w[0].id < w[1].id));

    let medium = questions
        .list(&QuestionFilter {
            subject: Some("math".to_string()),
            difficulty: Some(Difficulty::Medium),
        })
        .await
        .unwrap();
    assert_eq!(medium.len(), 3);
}

#[tokio::test]
async fn test_random_respects_limit_and_bucket() {
    let db = seeded_db().await;
    let questions = db.questions();

    let rows = questions.random("Math", Difficulty::Medium, 2).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|q| q.difficulty == Difficulty::Medium));
    assert_ne!(rows[0].id, rows[1].id);

    let rows = questions.random("math", Difficulty::Hard, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_sample_caps_at_bank_size() {
    let db = seeded_db().await;
    let questions = db.questions();

    assert_eq!(questions.sample(3).await.unwrap().len(), 3);
    assert_eq!(questions.sample(100).await.unwrap().len(), 7);
    assert_eq!(questions.count().await.unwrap(), 7);
}

#[tokio::test]
async fn test_select_questions_from_store() {
    let db = seeded_db().await;
    let questions = db.questions();

    let selected = select_questions(&questions, "math", DifficultyCounts::new(2, 3, 1))
        .await
        .unwrap();

    assert_eq!(selected.len(), 6);
    assert_eq!(
        selected
            .iter()
            .filter(|q| q.difficulty == Difficulty::Medium)
            .count(),
        3
    );
}

#[tokio::test]
async fn test_select_questions_insufficient_is_atomic() {
    let db = seeded_db().await;
    let questions = db.questions();

    let err = select_questions(&questions, "math", DifficultyCounts::new(3, 0, 0))
        .await
        .unwrap_err();

    match err {
        StoreError::InsufficientQuestions {
            subject,
            difficulty,
            requested,
            available,
        } => {
            assert_eq!(subject, "math");
            assert_eq!(difficulty, Difficulty::Easy);
            assert_eq!(requested, 3);
            assert_eq!(available, 2);
        }
        other => panic!("expected InsufficientQuestions, got {:?}", other),
    }
}

#[tokio::test]
async fn test_select_questions_repeated_cardinality() {
    let source = MockQuestionSource::default()
        .with_generated("science", Difficulty::Easy, 10)
        .with_generated("science", Difficulty::Hard, 4);
    let counts = DifficultyCounts::new(3, 0, 2);

    for _ in 0..10 {
        let selected = select_questions(&source, "science", counts).await.unwrap();
        assert_eq!(selected.len(), 5);
    }
}

#[tokio::test]
async fn test_select_questions_stops_at_first_short_bucket() {
    let source = MockQuestionSource::default()
        .with_generated("science", Difficulty::Easy, 1)
        .with_generated("science", Difficulty::Hard, 5);

    let err = select_questions(&source, "science", DifficultyCounts::new(2, 0, 2))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::InsufficientQuestions {
            difficulty: Difficulty::Easy,
            ..
        }
    ));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_select_questions_rejects_bad_requests() {
    let source = MockQuestionSource::default().with_generated("math", Difficulty::Easy, 3);

    let err = select_questions(&source, "math", DifficultyCounts::default())
        .await
        .unwrap_err();
    assert!(err.is_input_error());

    let err = select_questions(&source, "  ", DifficultyCounts::new(1, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput { .. }));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_select_questions_propagates_store_failure() {
    let source = MockQuestionSource::failing();

    let err = select_questions(&source, "math", DifficultyCounts::new(1, 0, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Database(_)));
    assert!(!err.is_input_error());
}

#[tokio::test]
async fn test_results_batch_and_list_in_order() {
    let db = Database::in_memory().await.unwrap();
    let results = db.results();

    let saved = results
        .insert_batch(&[
            sample_result("first", true, 0.91),
            sample_result("second", false, 0.12),
        ])
        .await
        .unwrap();
    assert_eq!(saved, 2);
    results.insert(&sample_result("third", true, 1.0)).await.unwrap();

    let rows = results.list().await.unwrap();
    let questions: Vec<_> = rows.iter().map(|r| r.question_text.as_str()).collect();
    assert_eq!(questions, vec!["first", "second", "third"]);
    assert!(rows[0].is_correct);
    assert!(!rows[1].is_correct);
    assert!((rows[0].similarity - 0.91).abs() < 1e-6);
}

#[tokio::test]
async fn test_results_batch_rejects_whole_batch() {
    let db = Database::in_memory().await.unwrap();
    let results = db.results();

    let err = results
        .insert_batch(&[
            sample_result("ok", true, 0.9),
            sample_result("bad", true, f32::NAN),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput { .. }));
    assert!(results.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_persisted_result_serializes_camel_case() {
    let db = Database::in_memory().await.unwrap();
    let results = db.results();
    results.insert(&sample_result("q", true, 0.75)).await.unwrap();

    let rows = results.list().await.unwrap();
    let json = serde_json::to_value(&rows[0]).unwrap();

    assert_eq!(json["question"], "q");
    assert_eq!(json["userAnswer"], "candidate");
    assert_eq!(json["correctAnswer"], "reference");
    assert_eq!(json["isCorrect"], true);
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("quiz.db").display());

    let db = Database::connect(&url).await.unwrap();
    let id = db
        .questions()
        .insert(&NewQuestion::new("q", "a", Difficulty::Easy, "math"))
        .await
        .unwrap();
    db.close().await;

    let db = Database::connect(&url).await.unwrap();
    assert_eq!(db.questions().get(id).await.unwrap().answer_text, "a");
    db.close().await;
}
