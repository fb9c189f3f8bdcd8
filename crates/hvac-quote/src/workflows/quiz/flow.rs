use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::steps::{QuizStep, HEATING_SOURCE, HOUSE_TYPE, ISSUE, PRIORITY, QUIZ_STEPS, REBATE, SIZE, SYSTEM_TYPE};
use crate::workflows::pricing::{Priority, QuoteRequest, SizeClass, SystemType};

/// Completed quiz, validated into the fields pricing and lead follow-up need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    pub system_type: SystemType,
    pub size: SizeClass,
    pub priority: Priority,
    pub house_type: Option<String>,
    pub heating_source: Option<String>,
    pub replacement_reason: Option<String>,
    pub promo_code: Option<String>,
}

impl QuizAnswers {
    /// Validates a raw question-id to option-id mapping. Pricing inputs are
    /// required; the descriptive answers and promo code are optional.
    pub fn from_answers<K, V>(answers: &BTreeMap<K, V>) -> Result<Self, QuizError>
    where
        K: Borrow<str> + Ord,
        V: AsRef<str>,
    {
        let lookup = |key: &str| {
            answers
                .get(key)
                .map(|value| value.as_ref().trim())
                .filter(|value| !value.is_empty())
        };
        let required = |key: &'static str| lookup(key).ok_or(QuizError::MissingAnswer(key));
        let invalid = |step: &'static str, value: &str| QuizError::InvalidOption {
            step,
            value: value.to_string(),
        };

        let raw_system = required(SYSTEM_TYPE)?;
        let system_type = SystemType::parse(raw_system).ok_or_else(|| invalid(SYSTEM_TYPE, raw_system))?;
        let raw_size = required(SIZE)?;
        let size = SizeClass::parse(raw_size).ok_or_else(|| invalid(SIZE, raw_size))?;
        let raw_priority = required(PRIORITY)?;
        let priority = Priority::parse(raw_priority).ok_or_else(|| invalid(PRIORITY, raw_priority))?;

        Ok(Self {
            system_type,
            size,
            priority,
            house_type: lookup(HOUSE_TYPE).map(str::to_string),
            heating_source: lookup(HEATING_SOURCE).map(str::to_string),
            replacement_reason: lookup(ISSUE).map(str::to_string),
            promo_code: lookup(REBATE).map(str::to_string),
        })
    }

    pub fn quote_request(&self) -> QuoteRequest {
        QuoteRequest::new(self.priority, self.size, self.system_type)
    }
}

/// Result of answering the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizProgress {
    Next(&'static QuizStep),
    Complete(QuizAnswers),
}

/// Walks a homeowner through the fixed step sequence.
#[derive(Debug, Clone, Default)]
pub struct QuizFlow {
    position: usize,
    answers: BTreeMap<&'static str, String>,
    finished: bool,
}

impl QuizFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> Option<&'static QuizStep> {
        if self.finished {
            return None;
        }
        QUIZ_STEPS.get(self.position)
    }

    /// One-based step number and total, for progress indicators.
    pub fn progress(&self) -> (usize, usize) {
        ((self.position + 1).min(QUIZ_STEPS.len()), QUIZ_STEPS.len())
    }

    pub fn answers(&self) -> &BTreeMap<&'static str, String> {
        &self.answers
    }

    pub fn submit_answer(&mut self, question_id: &str, value: &str) -> Result<QuizProgress, QuizError> {
        let step = self.current_step().ok_or(QuizError::AlreadyComplete)?;
        if step.id != question_id {
            return Err(QuizError::UnexpectedStep {
                expected: step.id,
                received: question_id.to_string(),
            });
        }

        let value = value.trim();
        if !step.accepts(value) {
            return Err(QuizError::InvalidOption {
                step: step.id,
                value: value.to_string(),
            });
        }

        self.answers.insert(step.id, value.to_string());
        debug!(step = step.id, position = self.position, "quiz answer recorded");

        match QUIZ_STEPS.get(self.position + 1) {
            Some(next) => {
                self.position += 1;
                Ok(QuizProgress::Next(next))
            }
            None => {
                let answers = QuizAnswers::from_answers(&self.answers)?;
                self.finished = true;
                Ok(QuizProgress::Complete(answers))
            }
        }
    }

    /// Returns to the previous step, keeping earlier answers.
    pub fn back(&mut self) -> Option<&'static QuizStep> {
        if self.finished {
            self.finished = false;
        } else if self.position > 0 {
            self.position -= 1;
        }
        self.current_step()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("expected an answer for '{expected}' but received '{received}'")]
    UnexpectedStep { expected: &'static str, received: String },
    #[error("'{value}' is not an option for '{step}'")]
    InvalidOption { step: &'static str, value: String },
    #[error("quiz is missing an answer for '{0}'")]
    MissingAnswer(&'static str),
    #[error("quiz already completed")]
    AlreadyComplete,
}
