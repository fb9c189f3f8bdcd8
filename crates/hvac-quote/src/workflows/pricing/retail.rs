use super::catalog::SizeClass;
use serde::{Deserialize, Serialize};

/// Largest rebate any promo code can take off a single price.
pub const MAX_REBATE: u32 = 1000;

/// Target gross margin, in basis points.
pub const MARGIN_BPS: u32 = 5500;

const BPS: u64 = 10_000;
const ROUND_TO: u64 = 100;

/// Rebate in whole dollars as resolved from a promo code, before capping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RebateAmount(pub u32);

impl RebateAmount {
    pub const NONE: RebateAmount = RebateAmount(0);

    /// The amount actually deducted from a price.
    pub fn capped(self) -> u32 {
        self.0.min(MAX_REBATE)
    }
}

/// Retail price for a configuration: dealer cost plus labor, marked up to the
/// target margin, rounded up to the next hundred dollars.
pub fn calculate_retail(dealer_cost: u32, size: SizeClass) -> u32 {
    calculate_retail_with_margin(dealer_cost, size, MARGIN_BPS)
}

pub(crate) fn calculate_retail_with_margin(dealer_cost: u32, size: SizeClass, margin_bps: u32) -> u32 {
    let basis = u64::from(dealer_cost) + u64::from(size.labor_overhead());
    let keep_bps = BPS.saturating_sub(u64::from(margin_bps)).max(1);
    let hundreds = (basis * BPS).div_ceil(keep_bps * ROUND_TO);
    saturate(hundreds * ROUND_TO)
}

/// Deducts the capped rebate from `price` without going below `dealer_cost`.
pub fn apply_rebate(price: u32, rebate: RebateAmount, dealer_cost: u32) -> u32 {
    price.saturating_sub(rebate.capped()).max(dealer_cost)
}

/// Financing estimate: 1.5% of the price, rounded half up.
pub fn monthly_estimate(price: u32) -> u32 {
    saturate((u64::from(price) * 15 + 500) / 1000)
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
