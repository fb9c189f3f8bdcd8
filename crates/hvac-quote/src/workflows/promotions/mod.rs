//! Promo code administration and rebate resolution.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    default_promo_codes, normalize_code, AmountError, NewPromoCode, PromoCode, PromoCodeDraft,
    PromoCodeId, PromoCodeUpdate,
};
pub use repository::{PromoCodeRepository, RepositoryError};
pub use router::promo_code_router;
pub use service::{PromoCodeError, PromoCodeService};
