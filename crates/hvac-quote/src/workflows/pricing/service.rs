use std::sync::Arc;

use super::engine::{PricingEngine, QuoteSheet};
use super::request::QuoteRequest;
use super::retail::RebateAmount;
use crate::workflows::quiz::QuizAnswers;

/// Read-only view of the promo code store the quote flow depends on.
pub trait RebateLookup: Send + Sync {
    /// Rebate granted by `code`, or zero when it is unknown or inactive.
    fn rebate_for(&self, code: &str) -> RebateAmount;
}

impl<T: RebateLookup + ?Sized> RebateLookup for Arc<T> {
    fn rebate_for(&self, code: &str) -> RebateAmount {
        (**self).rebate_for(code)
    }
}

/// Composes promo code resolution with the pricing engine.
pub struct QuoteService<L> {
    engine: Arc<PricingEngine>,
    lookup: Arc<L>,
}

impl<L> QuoteService<L>
where
    L: RebateLookup + 'static,
{
    pub fn new(engine: Arc<PricingEngine>, lookup: Arc<L>) -> Self {
        Self { engine, lookup }
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn resolve_rebate(&self, promo_code: Option<&str>) -> RebateAmount {
        match promo_code.map(str::trim).filter(|code| !code.is_empty()) {
            Some(code) => self.lookup.rebate_for(code),
            None => RebateAmount::NONE,
        }
    }

    pub fn quote(&self, request: &QuoteRequest, promo_code: Option<&str>) -> QuoteSheet {
        let rebate = self.resolve_rebate(promo_code);
        self.engine.compute_quotes(request, rebate)
    }

    /// Prices a completed quiz.
    pub fn quote_answers(&self, answers: &QuizAnswers) -> QuoteSheet {
        self.quote(&answers.quote_request(), answers.promo_code.as_deref())
    }
}
