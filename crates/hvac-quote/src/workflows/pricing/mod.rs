//! Tiered quote pricing: dealer cost lookup, margin markup, tier offsets and
//! promo code rebates.

pub mod catalog;
mod engine;
pub mod format;
mod request;
pub mod retail;
pub mod router;
mod service;
mod tiers;

pub use catalog::{Brand, CostFallback, CostTableError, DealerCost, DealerCostTable, SizeClass, SystemType};
pub use engine::{
    PlatinumPolicy, PriceRange, PricingEngine, PricingPolicy, PricingSelection, QuoteSheet, TierDisplay,
    TierQuote,
};
pub use request::{Priority, QuoteRequest};
pub use retail::{apply_rebate, calculate_retail, RebateAmount, MAX_REBATE};
pub use router::quote_router;
pub use service::{QuoteService, RebateLookup};
pub use tiers::{Tier, TierProfile};
