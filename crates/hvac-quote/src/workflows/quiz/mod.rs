//! Quiz wizard sequencing and answer validation.

mod flow;
pub mod steps;

pub use flow::{QuizAnswers, QuizError, QuizFlow, QuizProgress};
pub use steps::{QuizOption, QuizStep, StepKind, QUIZ_STEPS};

use axum::{routing::get, Json, Router};

/// Router serving the step catalog to the front end.
pub fn quiz_router() -> Router {
    Router::new().route("/api/quiz/steps", get(steps_handler))
}

async fn steps_handler() -> Json<&'static [QuizStep]> {
    Json(&QUIZ_STEPS)
}
