use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::promotions::domain::{PromoCode, PromoCodeDraft, PromoCodeId};
use crate::workflows::promotions::repository::{PromoCodeRepository, RepositoryError};
use crate::workflows::promotions::{normalize_code, promo_code_router, PromoCodeService};

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<BTreeMap<PromoCodeId, PromoCode>>>,
}

impl PromoCodeRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<PromoCode>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: PromoCodeId) -> Result<Option<PromoCode>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, RepositoryError> {
        let needle = normalize_code(code);
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.normalized_code() == needle)
            .cloned())
    }

    fn insert(&self, draft: PromoCodeDraft) -> Result<PromoCode, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let next = guard.keys().next_back().map_or(1, |id| id.0 + 1);
        let record = draft.into_record(PromoCodeId(next));
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: PromoCode) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id, record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete(&self, id: PromoCodeId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.remove(&id).is_some())
    }
}

pub(super) struct UnavailableRepository;

impl PromoCodeRepository for UnavailableRepository {
    fn list(&self) -> Result<Vec<PromoCode>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: PromoCodeId) -> Result<Option<PromoCode>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_code(&self, _code: &str) -> Result<Option<PromoCode>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _draft: PromoCodeDraft) -> Result<PromoCode, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: PromoCode) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: PromoCodeId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (PromoCodeService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PromoCodeService::new(repository.clone());
    (service, repository)
}

pub(super) fn seeded_service() -> (PromoCodeService<MemoryRepository>, Arc<MemoryRepository>) {
    let (service, repository) = build_service();
    service.seed_defaults().expect("defaults seed");
    (service, repository)
}

pub(super) fn seeded_router() -> axum::Router {
    let (service, _) = seeded_service();
    promo_code_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
