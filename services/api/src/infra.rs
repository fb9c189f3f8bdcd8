use hvac_quote::workflows::leads::{Lead, LeadDraft, LeadId, LeadRepository};
use hvac_quote::workflows::pricing::PlatinumPolicy;
use hvac_quote::workflows::promotions::{
    normalize_code, PromoCode, PromoCodeDraft, PromoCodeId, PromoCodeRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handles for the operational endpoints.
#[derive(Clone)]
pub struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

impl AppState {
    pub fn new(metrics: PrometheusHandle) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
        }
    }

    pub fn mark_ready(&self) {
        self.readiness.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.load(Ordering::Acquire)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store lock poisoned".to_string()))
}

#[derive(Default)]
struct PromoCodeTable {
    records: BTreeMap<PromoCodeId, PromoCode>,
    next_id: u64,
}

/// Process-local promo code store. Ids are never reused, even after deletes.
#[derive(Default, Clone)]
pub struct InMemoryPromoCodeRepository {
    table: Arc<Mutex<PromoCodeTable>>,
}

impl PromoCodeRepository for InMemoryPromoCodeRepository {
    fn list(&self) -> Result<Vec<PromoCode>, RepositoryError> {
        let guard = lock(&self.table)?;
        Ok(guard.records.values().cloned().collect())
    }

    fn fetch(&self, id: PromoCodeId) -> Result<Option<PromoCode>, RepositoryError> {
        let guard = lock(&self.table)?;
        Ok(guard.records.get(&id).cloned())
    }

    fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, RepositoryError> {
        let needle = normalize_code(code);
        let guard = lock(&self.table)?;
        Ok(guard
            .records
            .values()
            .find(|record| record.normalized_code() == needle)
            .cloned())
    }

    fn insert(&self, draft: PromoCodeDraft) -> Result<PromoCode, RepositoryError> {
        let mut guard = lock(&self.table)?;
        let needle = normalize_code(&draft.code);
        if guard
            .records
            .values()
            .any(|record| record.normalized_code() == needle)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.next_id += 1;
        let record = draft.into_record(PromoCodeId(guard.next_id));
        guard.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: PromoCode) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.table)?;
        let needle = record.normalized_code();
        if guard
            .records
            .values()
            .any(|other| other.id != record.id && other.normalized_code() == needle)
        {
            return Err(RepositoryError::Conflict);
        }
        match guard.records.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: PromoCodeId) -> Result<bool, RepositoryError> {
        let mut guard = lock(&self.table)?;
        Ok(guard.records.remove(&id).is_some())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryLeadRepository {
    leads: Arc<Mutex<Vec<Lead>>>,
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, draft: LeadDraft) -> Result<Lead, RepositoryError> {
        let mut guard = lock(&self.leads)?;
        let lead = draft.into_lead(LeadId(guard.len() as u64 + 1));
        guard.push(lead.clone());
        Ok(lead)
    }

    fn list(&self) -> Result<Vec<Lead>, RepositoryError> {
        Ok(lock(&self.leads)?.clone())
    }
}

pub(crate) fn parse_platinum_policy(raw: &str) -> Result<PlatinumPolicy, String> {
    PlatinumPolicy::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not a platinum policy (additive or multiplier)"))
}
