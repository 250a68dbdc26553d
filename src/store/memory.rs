//! Implementaciones en memoria de los colaboradores externos.
//!
//! Pensadas para tests y para la demo: clonables (estado compartido vía
//! `Arc`) para poder inspeccionarlas después de inyectarlas en la sesión.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::StoreError;
use crate::model::{CacheRecord, CacheToken, DrugIdentity};
use crate::store::{AnalysisRequest, CacheStore, DrugSearch, JobSubmitter};

struct StoredRecord {
    record: CacheRecord,
    /// El registro se vuelve visible cuando `get` se haya invocado al menos
    /// este número de veces (simula al trabajo externo terminando "tras n
    /// sondeos").
    visible_after: u64,
}

#[derive(Default)]
struct CacheInner {
    records: Mutex<HashMap<String, StoredRecord>>,
    lookups: AtomicU64,
    fail_next: AtomicU64,
}

/// Caché de veredictos en memoria.
#[derive(Clone, Default)]
pub struct InMemoryCacheStore {
    inner: Arc<CacheInner>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta un registro visible de inmediato.
    pub fn insert(&self, token: CacheToken, record: CacheRecord) {
        self.insert_visible_after(token, record, 0);
    }

    /// Inserta un registro que sólo aparece a partir de la consulta número
    /// `lookups` (contando todas las consultas del store, no por token).
    pub fn insert_visible_after(&self, token: CacheToken, record: CacheRecord, lookups: u64) {
        let mut map = self.inner.records.lock().expect("cache store lock poisoned");
        map.insert(
            token.as_str().to_string(),
            StoredRecord {
                record,
                visible_after: lookups,
            },
        );
    }

    /// Las próximas `n` consultas fallan con un error transitorio inyectado.
    pub fn fail_next(&self, n: u64) {
        self.inner.fail_next.store(n, Ordering::SeqCst);
    }

    /// Total de consultas recibidas (incluidas las fallidas).
    pub fn lookups(&self) -> u64 {
        self.inner.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, token: &CacheToken) -> Result<Option<CacheRecord>, StoreError> {
        let n = self.inner.lookups.fetch_add(1, Ordering::SeqCst) + 1;

        loop {
            let pending = self.inner.fail_next.load(Ordering::SeqCst);
            if pending == 0 {
                break;
            }
            if self
                .inner
                .fail_next
                .compare_exchange(pending, pending - 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return Err(StoreError::Backend("injected transient failure".into()));
            }
        }

        let map = self.inner.records.lock().expect("cache store lock poisoned");
        Ok(map
            .get(token.as_str())
            .and_then(|stored| (stored.visible_after <= n).then(|| stored.record.clone())))
    }
}

enum SubmitMode {
    Accept,
    Reject,
    Fail,
}

struct SubmitterInner {
    mode: SubmitMode,
    requests: Mutex<Vec<AnalysisRequest>>,
}

/// Disparador de trabajos simulado con comportamiento fijo.
#[derive(Clone)]
pub struct MockJobSubmitter {
    inner: Arc<SubmitterInner>,
}

impl MockJobSubmitter {
    fn with_mode(mode: SubmitMode) -> Self {
        Self {
            inner: Arc::new(SubmitterInner {
                mode,
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Acepta toda solicitud.
    pub fn accepting() -> Self {
        Self::with_mode(SubmitMode::Accept)
    }

    /// Responde pero rechaza toda solicitud.
    pub fn rejecting() -> Self {
        Self::with_mode(SubmitMode::Reject)
    }

    /// Falla en el transporte.
    pub fn failing() -> Self {
        Self::with_mode(SubmitMode::Fail)
    }

    /// Número de solicitudes recibidas (intentos, no sólo aceptadas).
    pub fn submissions(&self) -> usize {
        self.inner.requests.lock().expect("submitter lock poisoned").len()
    }

    /// Última solicitud recibida, si hubo alguna.
    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.inner
            .requests
            .lock()
            .expect("submitter lock poisoned")
            .last()
            .cloned()
    }
}

#[async_trait]
impl JobSubmitter for MockJobSubmitter {
    async fn submit(&self, request: &AnalysisRequest) -> Result<bool, StoreError> {
        self.inner
            .requests
            .lock()
            .expect("submitter lock poisoned")
            .push(request.clone());
        // Mismo cuerpo JSON que mandaría el webhook real.
        if let Ok(body) = serde_json::to_string(request) {
            log::debug!("[submit] payload={body}");
        }
        match self.inner.mode {
            SubmitMode::Accept => Ok(true),
            SubmitMode::Reject => Ok(false),
            SubmitMode::Fail => Err(StoreError::Transport("injected submit failure".into())),
        }
    }
}

struct CatalogInner {
    drugs: Vec<DrugIdentity>,
    searches: AtomicU64,
}

/// Catálogo de medicamentos en memoria con búsqueda por prefijo.
#[derive(Clone)]
pub struct InMemoryDrugCatalog {
    inner: Arc<CatalogInner>,
}

impl InMemoryDrugCatalog {
    pub fn new(drugs: Vec<DrugIdentity>) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                drugs,
                searches: AtomicU64::new(0),
            }),
        }
    }

    /// Número de búsquedas atendidas (para verificar el debounce).
    pub fn search_count(&self) -> u64 {
        self.inner.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DrugSearch for InMemoryDrugCatalog {
    async fn search(&self, prefix: &str, limit: usize) -> Result<Vec<DrugIdentity>, StoreError> {
        self.inner.searches.fetch_add(1, Ordering::SeqCst);
        let needle = prefix.trim().to_lowercase();
        Ok(self
            .inner
            .drugs
            .iter()
            .filter(|d| {
                d.commercial_name.to_lowercase().starts_with(&needle)
                    || d.mnn_name.to_lowercase().starts_with(&needle)
            })
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::derive_token;

    fn token() -> CacheToken {
        let a = DrugIdentity::new("A", "", "LP-1", "x");
        let b = DrugIdentity::new("B", "", "LP-2", "y");
        derive_token(&a, &b)
    }

    #[tokio::test]
    async fn record_hidden_until_lookup_threshold() {
        let store = InMemoryCacheStore::new();
        let t = token();
        store.insert_visible_after(t.clone(), CacheRecord::new(vec![], vec![], vec![]), 2);

        assert!(store.get(&t).await.expect("get").is_none());
        assert!(store.get(&t).await.expect("get").is_some());
        assert_eq!(store.lookups(), 2);
    }

    #[test]
    fn injected_failures_are_consumed_in_order() {
        tokio_test::block_on(async {
            let store = InMemoryCacheStore::new();
            let t = token();
            store.insert(t.clone(), CacheRecord::new(vec![], vec![], vec![]));
            store.fail_next(1);

            assert!(store.get(&t).await.is_err());
            assert!(store.get(&t).await.expect("get").is_some());
        });
    }

    #[tokio::test]
    async fn mock_submitter_records_requests() {
        let submitter = MockJobSubmitter::rejecting();
        let a = DrugIdentity::new("A", "", "LP-1", "x");
        let b = DrugIdentity::new("B", "", "LP-2", "y");
        let accepted = submitter
            .submit(&AnalysisRequest::new(&a, &b))
            .await
            .expect("submit");
        assert!(!accepted);
        assert_eq!(submitter.submissions(), 1);
        assert_eq!(submitter.last_request().expect("request").drug_a.name, "A");
    }
}
