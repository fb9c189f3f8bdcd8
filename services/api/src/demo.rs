use crate::infra::{parse_platinum_policy, InMemoryPromoCodeRepository};
use clap::Args;
use hvac_quote::config::AppConfig;
use hvac_quote::error::AppError;
use hvac_quote::workflows::pricing::{PlatinumPolicy, QuoteRequest, QuoteService, QuoteSheet};
use hvac_quote::workflows::promotions::PromoCodeService;
use std::fmt;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct QuoteArgs {
    /// Customer priority: budget, value or performance
    #[arg(long)]
    pub(crate) priority: Option<String>,
    /// System size: 2ton, 3ton, 4ton or 5ton
    #[arg(long)]
    pub(crate) size: Option<String>,
    /// System type: split, package or gaspack
    #[arg(long)]
    pub(crate) system_type: Option<String>,
    /// Promo code to apply (launch codes are always available here)
    #[arg(long)]
    pub(crate) promo_code: Option<String>,
    /// Override PRICING_PLATINUM_POLICY for this quote
    #[arg(long, value_parser = parse_platinum_policy)]
    pub(crate) platinum_policy: Option<PlatinumPolicy>,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        priority,
        size,
        system_type,
        promo_code,
        platinum_policy,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(policy) = platinum_policy {
        config.pricing.platinum_policy = policy;
    }

    let engine = Arc::new(config.pricing.build_engine()?);
    let promotions = Arc::new(PromoCodeService::new(Arc::new(
        InMemoryPromoCodeRepository::default(),
    )));
    promotions.seed_defaults()?;

    let service = QuoteService::new(engine, promotions);
    let request = QuoteRequest::from_raw(priority.as_deref(), size.as_deref(), system_type.as_deref());
    let sheet = service.quote(&request, promo_code.as_deref());

    let view = QuoteSheetView {
        request: &request,
        promo_code: promo_code.as_deref(),
        sheet: &sheet,
    };
    print!("{view}");
    Ok(())
}

/// Terminal rendering of a quote sheet.
pub(crate) struct QuoteSheetView<'a> {
    pub(crate) request: &'a QuoteRequest,
    pub(crate) promo_code: Option<&'a str>,
    pub(crate) sheet: &'a QuoteSheet,
}

impl fmt::Display for QuoteSheetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sheet = self.sheet;
        let selection = &sheet.selection;

        writeln!(
            f,
            "Quote for a {} {} ({} priority)",
            selection.size.label(),
            selection.system_type.label(),
            self.request.priority.label()
        )?;
        writeln!(f, "Equipment: {}", selection.manufacturer)?;
        if let Some(fallback) = &selection.fallback {
            writeln!(
                f,
                "Note: no pricing for {} {}, priced as {} {}",
                fallback.requested_size.label(),
                fallback.requested_system_type.label(),
                fallback.size.label(),
                fallback.system_type.label()
            )?;
        }
        match self.promo_code.map(str::trim) {
            Some(code) if sheet.applied_rebate > 0 => {
                writeln!(f, "Promo {code}: ${} rebate applied", sheet.applied_rebate)?;
            }
            Some(code) if !code.is_empty() => {
                writeln!(f, "Promo {code}: not recognized, no rebate applied")?;
            }
            _ => {}
        }

        for quote in sheet.tiers() {
            let profile = quote.profile;
            let marker = if profile.recommended { " (recommended)" } else { "" };
            writeln!(f, "\n{}{}", profile.name, marker)?;
            writeln!(f, "  {}", profile.tagline)?;
            writeln!(f, "  {} | est. {}", quote.display.range, quote.display.monthly)?;
            writeln!(f, "  {} | {}", profile.efficiency, profile.warranty)?;
            for feature in profile.features {
                writeln!(f, "  - {feature}")?;
            }
        }
        Ok(())
    }
}
