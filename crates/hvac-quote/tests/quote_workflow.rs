//! End-to-end quoting through the public facade: quiz answers, promo code
//! resolution, and the three-tier sheet.

use std::sync::Arc;

use hvac_quote::workflows::pricing::{
    Brand, DealerCostTable, PlatinumPolicy, PricingEngine, PricingPolicy, QuoteRequest, QuoteService,
    RebateAmount, SizeClass, SystemType, Tier,
};
use hvac_quote::workflows::promotions::{
    NewPromoCode, PromoCode, PromoCodeDraft, PromoCodeId, PromoCodeRepository, PromoCodeService,
    PromoCodeUpdate, RepositoryError,
};
use hvac_quote::workflows::quiz::{QuizError, QuizFlow, QuizProgress};

mod common {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(super) struct VecRepository {
        records: Mutex<Vec<PromoCode>>,
    }

    impl PromoCodeRepository for VecRepository {
        fn list(&self) -> Result<Vec<PromoCode>, RepositoryError> {
            Ok(self.records.lock().expect("mutex").clone())
        }

        fn fetch(&self, id: PromoCodeId) -> Result<Option<PromoCode>, RepositoryError> {
            let guard = self.records.lock().expect("mutex");
            Ok(guard.iter().find(|record| record.id == id).cloned())
        }

        fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, RepositoryError> {
            let guard = self.records.lock().expect("mutex");
            Ok(guard.iter().find(|record| record.matches(code)).cloned())
        }

        fn insert(&self, draft: PromoCodeDraft) -> Result<PromoCode, RepositoryError> {
            let mut guard = self.records.lock().expect("mutex");
            let record = draft.into_record(PromoCodeId(guard.len() as u64 + 1));
            guard.push(record.clone());
            Ok(record)
        }

        fn update(&self, record: PromoCode) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("mutex");
            let slot = guard
                .iter_mut()
                .find(|existing| existing.id == record.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = record;
            Ok(())
        }

        fn delete(&self, id: PromoCodeId) -> Result<bool, RepositoryError> {
            let mut guard = self.records.lock().expect("mutex");
            let before = guard.len();
            guard.retain(|record| record.id != id);
            Ok(guard.len() != before)
        }
    }

    pub(super) fn quote_service(
        policy: PlatinumPolicy,
    ) -> (
        QuoteService<PromoCodeService<VecRepository>>,
        Arc<PromoCodeService<VecRepository>>,
    ) {
        let promotions = Arc::new(PromoCodeService::new(Arc::new(VecRepository::default())));
        promotions.seed_defaults().expect("seed defaults");
        let engine = PricingEngine::new(
            DealerCostTable::standard(),
            PricingPolicy {
                platinum: policy,
                ..PricingPolicy::default()
            },
        );
        (QuoteService::new(Arc::new(engine), promotions.clone()), promotions)
    }

    pub(super) fn complete_quiz(answers: [(&str, &str); 7]) -> QuizProgress {
        let mut flow = QuizFlow::new();
        let mut last = None;
        for (step, value) in answers {
            last = Some(flow.submit_answer(step, value).expect("answer accepted"));
        }
        last.expect("quiz answered")
    }
}

use common::*;

const BUDGET_SPLIT_3TON: [(&str, &str); 7] = [
    ("systemType", "split"),
    ("type", "ranch"),
    ("size", "3ton"),
    ("currentSystem", "furnace"),
    ("issue", "old"),
    ("priority", "budget"),
    ("rebate", ""),
];

#[test]
fn completed_quiz_prices_the_budget_split_system() {
    let (service, _) = quote_service(PlatinumPolicy::Additive);

    let QuizProgress::Complete(answers) = complete_quiz(BUDGET_SPLIT_3TON) else {
        panic!("quiz should be complete after the final step");
    };
    assert!(answers.promo_code.is_none());

    let sheet = service.quote_answers(&answers);
    assert_eq!(sheet.selection.brand, Brand::Budget);
    assert_eq!(sheet.selection.dealer_cost, 3768);
    assert_eq!(sheet.silver.price.low, 10_600);
    assert_eq!(sheet.gold.price.low, 12_100);
    assert_eq!(sheet.platinum.price.low, 13_600);
    assert_eq!(sheet.silver.display.range, "$10,600 - $11,100");
    assert_eq!(sheet.silver.display.monthly, "$159/mo");
    assert!(sheet.tier(Tier::Gold).profile.recommended);
}

#[test]
fn promo_code_from_the_quiz_lowers_every_tier() {
    let (service, _) = quote_service(PlatinumPolicy::Additive);
    let mut answers = BUDGET_SPLIT_3TON;
    answers[6] = ("rebate", "full system");

    let QuizProgress::Complete(answers) = complete_quiz(answers) else {
        panic!("quiz should be complete");
    };
    let sheet = service.quote_answers(&answers);

    assert_eq!(sheet.applied_rebate, 1000);
    assert_eq!(sheet.silver.price.low, 9_600);
    assert_eq!(sheet.gold.price.low, 11_100);
    assert_eq!(sheet.platinum.price.low, 12_600);
}

#[test]
fn deactivated_code_stops_discounting() {
    let (service, promotions) = quote_service(PlatinumPolicy::Additive);
    let promo = promotions
        .create(NewPromoCode::new("Summer25", 250))
        .expect("created");
    let baseline = service
        .engine()
        .compute_quotes_raw(Some("value"), None, None, RebateAmount::NONE);
    let full_price = baseline.silver.price.low;

    let discounted = service.quote(&QuoteRequest::default(), Some("summer25"));
    assert_eq!(discounted.silver.price.low, full_price - 250);

    promotions
        .update(
            promo.id,
            PromoCodeUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .expect("deactivated");
    let undiscounted = service.quote(&QuoteRequest::default(), Some("summer25"));
    assert_eq!(undiscounted.silver.price.low, full_price);
}

#[test]
fn multiplier_policy_scales_the_silver_price() {
    let (service, _) = quote_service(PlatinumPolicy::Multiplier);
    let QuizProgress::Complete(answers) = complete_quiz(BUDGET_SPLIT_3TON) else {
        panic!("quiz should be complete");
    };

    let sheet = service.quote_answers(&answers);
    assert_eq!(sheet.platinum.price.low, 13_250);
    assert_eq!(sheet.platinum.price.high, 13_750);
    assert_eq!(sheet.selection.platinum_policy, PlatinumPolicy::Multiplier);
}

#[test]
fn quiz_rejects_out_of_order_and_unknown_answers() {
    let mut flow = QuizFlow::new();
    assert!(matches!(
        flow.submit_answer("size", "3ton"),
        Err(QuizError::UnexpectedStep { expected: "systemType", .. })
    ));
    assert!(matches!(
        flow.submit_answer("systemType", "geothermal"),
        Err(QuizError::InvalidOption { .. })
    ));
}

#[test]
fn csv_table_with_missing_entries_falls_back_to_anchor() {
    let csv = "brand,system_type,size,cost,sku\n\
ameristar,split,3ton,4000,AM-SPLIT-3\n\
amstd,split,3ton,6000,\n\
amstd,gaspack,5ton,9100,AS-GP-5\n";
    let table = DealerCostTable::from_reader(csv.as_bytes()).expect("table loads");

    let resolution = table.resolve(Brand::Budget, SystemType::GasPack, SizeClass::FiveTon);
    assert_eq!(resolution.dealer_cost.cost, 4000);
    assert_eq!(resolution.system_type, SystemType::Split);
    assert_eq!(resolution.size, SizeClass::ThreeTon);
    assert!(resolution.fallback.is_some());

    let exact = table.resolve(Brand::Premium, SystemType::GasPack, SizeClass::FiveTon);
    assert_eq!(exact.dealer_cost.sku.as_deref(), Some("AS-GP-5"));
    assert!(exact.fallback.is_none());
}
