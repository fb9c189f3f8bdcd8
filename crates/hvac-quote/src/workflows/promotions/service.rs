use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    default_promo_codes, normalize_code, validate_amount, AmountError, NewPromoCode, PromoCode,
    PromoCodeDraft, PromoCodeId, PromoCodeUpdate,
};
use super::repository::{PromoCodeRepository, RepositoryError};
use crate::workflows::pricing::{RebateAmount, RebateLookup};

/// Admin operations over the promo code store, plus quiz-time rebate resolution.
pub struct PromoCodeService<R> {
    repository: Arc<R>,
}

impl<R> PromoCodeService<R>
where
    R: PromoCodeRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<PromoCode>, PromoCodeError> {
        Ok(self.repository.list()?)
    }

    pub fn get(&self, id: PromoCodeId) -> Result<PromoCode, PromoCodeError> {
        self.repository.fetch(id)?.ok_or(PromoCodeError::NotFound(id))
    }

    /// Active record matching `code` after normalization.
    pub fn find_active(&self, code: &str) -> Result<Option<PromoCode>, PromoCodeError> {
        if normalize_code(code).is_empty() {
            return Ok(None);
        }
        let record = self.repository.find_by_code(code)?;
        Ok(record.filter(|promo| promo.is_active))
    }

    pub fn create(&self, request: NewPromoCode) -> Result<PromoCode, PromoCodeError> {
        let code = request.code.trim().to_string();
        if normalize_code(&code).is_empty() {
            return Err(PromoCodeError::InvalidCode);
        }
        let amount = validate_amount(request.amount)?;

        if self.repository.find_by_code(&code)?.is_some() {
            return Err(PromoCodeError::Conflict(code));
        }

        let draft = PromoCodeDraft {
            code,
            amount,
            description: request.description.unwrap_or_default(),
            is_active: request.is_active.unwrap_or(true),
        };
        let stored = match self.repository.insert(draft) {
            Ok(stored) => stored,
            Err(RepositoryError::Conflict) => {
                return Err(PromoCodeError::Conflict(request.code.trim().to_string()))
            }
            Err(other) => return Err(other.into()),
        };

        info!(id = %stored.id, code = %stored.code, amount = stored.amount, "promo code created");
        Ok(stored)
    }

    /// Applies a partial update. Validation runs before anything is written.
    pub fn update(&self, id: PromoCodeId, update: PromoCodeUpdate) -> Result<PromoCode, PromoCodeError> {
        let amount = update.amount.map(validate_amount).transpose()?;
        let code = match update.code {
            Some(code) => {
                let code = code.trim().to_string();
                if normalize_code(&code).is_empty() {
                    return Err(PromoCodeError::InvalidCode);
                }
                Some(code)
            }
            None => None,
        };

        let mut record = self.get(id)?;

        if let Some(code) = code {
            if let Some(existing) = self.repository.find_by_code(&code)? {
                if existing.id != id {
                    return Err(PromoCodeError::Conflict(code));
                }
            }
            record.code = code;
        }
        if let Some(amount) = amount {
            record.amount = amount;
        }
        if let Some(description) = update.description {
            record.description = description;
        }
        if let Some(is_active) = update.is_active {
            record.is_active = is_active;
        }

        self.repository.update(record.clone()).map_err(|err| match err {
            RepositoryError::NotFound => PromoCodeError::NotFound(id),
            RepositoryError::Conflict => PromoCodeError::Conflict(record.code.clone()),
            other => PromoCodeError::Repository(other),
        })?;

        info!(id = %id, code = %record.code, active = record.is_active, "promo code updated");
        Ok(record)
    }

    pub fn delete(&self, id: PromoCodeId) -> Result<(), PromoCodeError> {
        if self.repository.delete(id)? {
            info!(id = %id, "promo code deleted");
            Ok(())
        } else {
            Err(PromoCodeError::NotFound(id))
        }
    }

    /// Inserts the launch codes that are not already stored.
    pub fn seed_defaults(&self) -> Result<usize, PromoCodeError> {
        let mut created = 0;
        for promo in default_promo_codes() {
            match self.create(promo) {
                Ok(_) => created += 1,
                Err(PromoCodeError::Conflict(_)) => {}
                Err(other) => return Err(other),
            }
        }
        Ok(created)
    }
}

impl<R> RebateLookup for PromoCodeService<R>
where
    R: PromoCodeRepository + 'static,
{
    fn rebate_for(&self, code: &str) -> RebateAmount {
        match self.find_active(code) {
            Ok(Some(promo)) => RebateAmount(promo.amount),
            Ok(None) => RebateAmount::NONE,
            Err(err) => {
                warn!(error = %err, "promo code lookup failed, pricing without rebate");
                RebateAmount::NONE
            }
        }
    }
}

/// Error raised by the promo code service.
#[derive(Debug, thiserror::Error)]
pub enum PromoCodeError {
    #[error("promo code must not be empty")]
    InvalidCode,
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error("promo code '{0}' already exists")]
    Conflict(String),
    #[error("promo code {0} not found")]
    NotFound(PromoCodeId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
