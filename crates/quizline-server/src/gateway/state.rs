use std::sync::Arc;

use quizline::embedding::EmbeddingProvider;
use quizline::store::{Database, QuestionStore, ResultStore};
use quizline::validation::AnswerValidator;

/// Shared handles injected into every handler.
pub struct HandlerState<E: EmbeddingProvider + 'static> {
    pub validator: Arc<AnswerValidator<E>>,

    pub database: Database,

    pub questions: QuestionStore,

    pub results: ResultStore,
}

impl<E: EmbeddingProvider + 'static> HandlerState<E> {
    pub fn new(validator: AnswerValidator<E>, database: Database) -> Self {
        Self::with_shared_validator(Arc::new(validator), database)
    }

    pub fn with_shared_validator(validator: Arc<AnswerValidator<E>>, database: Database) -> Self {
        Self {
            validator,
            questions: database.questions(),
            results: database.results(),
            database,
        }
    }
}

impl<E: EmbeddingProvider + 'static> Clone for HandlerState<E> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
            database: self.database.clone(),
            questions: self.questions.clone(),
            results: self.results.clone(),
        }
    }
}
