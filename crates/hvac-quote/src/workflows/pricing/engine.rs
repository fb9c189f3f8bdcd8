use super::catalog::{Brand, CostFallback, DealerCostTable, SizeClass, SystemType};
use super::format::{format_monthly, format_range};
use super::request::QuoteRequest;
use super::retail::{apply_rebate, calculate_retail_with_margin, monthly_estimate, RebateAmount, MARGIN_BPS};
use super::tiers::{Tier, TierProfile};
use serde::Serialize;
use tracing::{debug, warn};

const SILVER_SPREAD: u32 = 500;
const GOLD_OFFSET: (u32, u32) = (1500, 2000);
const PLATINUM_OFFSET: (u32, u32) = (3000, 4000);
const PLATINUM_MULTIPLIER_PERCENT: u64 = 125;

/// How the Platinum tier is derived from the base price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatinumPolicy {
    /// Base retail plus a fixed $3,000 to $4,000 offset.
    #[default]
    Additive,
    /// 125% of the rebated Silver price.
    Multiplier,
}

impl PlatinumPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "additive" | "offset" => Some(Self::Additive),
            "multiplier" | "multiplicative" => Some(Self::Multiplier),
            _ => None,
        }
    }
}

/// Numeric policy applied on top of the dealer cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub margin_bps: u32,
    pub platinum: PlatinumPolicy,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            margin_bps: MARGIN_BPS,
            platinum: PlatinumPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub low: u32,
    pub high: u32,
}

/// Display strings rendered the same way the results page shows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierDisplay {
    pub range: String,
    pub monthly: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierQuote {
    pub tier: Tier,
    pub price: PriceRange,
    pub monthly: u32,
    pub display: TierDisplay,
    #[serde(flatten)]
    pub profile: &'static TierProfile,
}

impl TierQuote {
    fn new(tier: Tier, price: PriceRange) -> Self {
        let monthly = monthly_estimate(price.low);
        Self {
            tier,
            price,
            monthly,
            display: TierDisplay {
                range: format_range(price.low, price.high),
                monthly: format_monthly(monthly),
            },
            profile: tier.profile(),
        }
    }
}

/// The configuration that was actually priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSelection {
    pub brand: Brand,
    pub manufacturer: &'static str,
    pub system_type: SystemType,
    pub size: SizeClass,
    #[serde(skip)]
    pub dealer_cost: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<CostFallback>,
    pub platinum_policy: PlatinumPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSheet {
    pub silver: TierQuote,
    pub gold: TierQuote,
    pub platinum: TierQuote,
    pub applied_rebate: u32,
    pub selection: PricingSelection,
}

impl QuoteSheet {
    pub fn tier(&self, tier: Tier) -> &TierQuote {
        match tier {
            Tier::Silver => &self.silver,
            Tier::Gold => &self.gold,
            Tier::Platinum => &self.platinum,
        }
    }

    pub fn tiers(&self) -> [&TierQuote; 3] {
        [&self.silver, &self.gold, &self.platinum]
    }
}

/// Converts normalized quiz answers and a rebate into the three tier quotes.
///
/// The engine holds no mutable state; identical inputs always produce the
/// same sheet.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    table: DealerCostTable,
    policy: PricingPolicy,
}

impl PricingEngine {
    pub fn new(table: DealerCostTable, policy: PricingPolicy) -> Self {
        Self { table, policy }
    }

    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }

    pub fn table(&self) -> &DealerCostTable {
        &self.table
    }

    /// Prices loosely typed answers, applying the same defaults as the quiz.
    pub fn compute_quotes_raw(
        &self,
        priority: Option<&str>,
        size: Option<&str>,
        system_type: Option<&str>,
        rebate: RebateAmount,
    ) -> QuoteSheet {
        let request = QuoteRequest::from_raw(priority, size, system_type);
        self.compute_quotes(&request, rebate)
    }

    pub fn compute_quotes(&self, request: &QuoteRequest, rebate: RebateAmount) -> QuoteSheet {
        let brand = request.brand();
        let resolution = self.table.resolve(brand, request.system_type, request.size);

        if let Some(fallback) = resolution.fallback {
            warn!(
                brand = brand.manufacturer(),
                requested_system_type = fallback.requested_system_type.key(),
                requested_size = fallback.requested_size.key(),
                system_type = fallback.system_type.key(),
                size = fallback.size.key(),
                "pricing data missing, using fallback configuration"
            );
        }

        let dealer_cost = resolution.dealer_cost.cost;
        let base = calculate_retail_with_margin(dealer_cost, resolution.size, self.policy.margin_bps);
        let adjust = |price: u32| apply_rebate(price, rebate, dealer_cost);

        let silver_low = adjust(base);
        let silver = PriceRange {
            low: silver_low,
            high: silver_low.saturating_add(SILVER_SPREAD),
        };
        let gold = PriceRange {
            low: adjust(base.saturating_add(GOLD_OFFSET.0)),
            high: adjust(base.saturating_add(GOLD_OFFSET.1)),
        };
        let platinum = match self.policy.platinum {
            PlatinumPolicy::Additive => PriceRange {
                low: adjust(base.saturating_add(PLATINUM_OFFSET.0)),
                high: adjust(base.saturating_add(PLATINUM_OFFSET.1)),
            },
            PlatinumPolicy::Multiplier => {
                let low = scale_percent(silver_low, PLATINUM_MULTIPLIER_PERCENT);
                PriceRange {
                    low,
                    high: low.saturating_add(SILVER_SPREAD),
                }
            }
        };

        debug!(
            brand = brand.manufacturer(),
            system_type = resolution.system_type.key(),
            size = resolution.size.key(),
            base,
            rebate = rebate.capped(),
            "computed tier quotes"
        );

        QuoteSheet {
            silver: TierQuote::new(Tier::Silver, silver),
            gold: TierQuote::new(Tier::Gold, gold),
            platinum: TierQuote::new(Tier::Platinum, platinum),
            applied_rebate: rebate.capped(),
            selection: PricingSelection {
                brand,
                manufacturer: brand.manufacturer(),
                system_type: resolution.system_type,
                size: resolution.size,
                dealer_cost,
                sku: resolution.dealer_cost.sku.clone(),
                fallback: resolution.fallback,
                platinum_policy: self.policy.platinum,
            },
        }
    }
}

fn scale_percent(price: u32, percent: u64) -> u32 {
    let scaled = (u64::from(price) * percent + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
