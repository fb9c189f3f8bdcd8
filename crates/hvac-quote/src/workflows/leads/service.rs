use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{Lead, LeadSubmission, LeadValidationError};
use super::repository::LeadRepository;
use crate::workflows::promotions::RepositoryError;

pub struct LeadService<R> {
    repository: Arc<R>,
}

impl<R> LeadService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn submit(&self, submission: LeadSubmission) -> Result<Lead, LeadError> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &self,
        submission: LeadSubmission,
        received_at: DateTime<Utc>,
    ) -> Result<Lead, LeadError> {
        let draft = submission.validate(received_at)?;
        let lead = self.repository.insert(draft)?;
        info!(
            id = %lead.id,
            tier = ?lead.tier,
            "lead captured"
        );
        Ok(lead)
    }

    pub fn list(&self) -> Result<Vec<Lead>, LeadError> {
        Ok(self.repository.list()?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error(transparent)]
    Invalid(#[from] LeadValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
