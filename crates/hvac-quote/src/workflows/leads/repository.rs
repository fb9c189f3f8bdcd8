use super::domain::{Lead, LeadDraft};
use crate::workflows::promotions::RepositoryError;

/// Storage for captured leads.
pub trait LeadRepository: Send + Sync {
    /// Persists a validated lead under the next identifier.
    fn insert(&self, draft: LeadDraft) -> Result<Lead, RepositoryError>;
    /// Every lead, oldest first.
    fn list(&self) -> Result<Vec<Lead>, RepositoryError>;
}
