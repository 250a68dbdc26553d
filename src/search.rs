//! Búsqueda incremental de medicamentos con debounce.
//!
//! Misma disciplina que la sesión: una tarea viva como máximo, y la
//! consulta vigente como guarda de generación para que una respuesta
//! tardía de un prefijo ya reemplazado no pise los resultados nuevos.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::constants::{SEARCH_DEBOUNCE_MS, SEARCH_MIN_QUERY_LEN, SEARCH_RESULT_LIMIT};
use crate::model::DrugIdentity;
use crate::store::DrugSearch;

/// Resultados publicados hacia la interfaz.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResults {
    /// Consulta (ya recortada) a la que corresponden los candidatos.
    pub query: String,
    pub candidates: Vec<DrugIdentity>,
}

/// Acumula tecleo y consulta el catálogo sólo cuando el usuario pausa.
pub struct SearchDebouncer<P> {
    provider: Arc<P>,
    results_tx: watch::Sender<SearchResults>,
    worker: Option<JoinHandle<()>>,
    debounce_ms: u64,
    limit: usize,
}

impl<P> SearchDebouncer<P>
where
    P: DrugSearch + 'static,
{
    pub fn new(provider: P) -> Self {
        Self::with_debounce(provider, SEARCH_DEBOUNCE_MS, SEARCH_RESULT_LIMIT)
    }

    pub fn with_debounce(provider: P, debounce_ms: u64, limit: usize) -> Self {
        let (results_tx, _) = watch::channel(SearchResults::default());
        Self {
            provider: Arc::new(provider),
            results_tx,
            worker: None,
            debounce_ms,
            limit,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.results_tx.subscribe()
    }

    pub fn results(&self) -> SearchResults {
        self.results_tx.borrow().clone()
    }

    /// Registra la entrada actual del usuario.
    ///
    /// Consultas por debajo del mínimo limpian los candidatos de inmediato
    /// sin tocar el almacén. Cada tecleo reinicia el debounce: ráfagas de
    /// reescritura colapsan en una sola consulta.
    pub fn on_input(&mut self, text: &str) {
        if let Some(handle) = self.worker.take() {
            handle.abort();
        }

        let query = text.trim().to_string();
        if query.chars().count() < SEARCH_MIN_QUERY_LEN {
            self.results_tx.send_replace(SearchResults {
                query,
                candidates: Vec::new(),
            });
            return;
        }

        // Publica la consulta pendiente ya, con los candidatos vacíos; la
        // tarea sólo rellena si su consulta sigue siendo la publicada.
        self.results_tx.send_replace(SearchResults {
            query: query.clone(),
            candidates: Vec::new(),
        });

        let provider = Arc::clone(&self.provider);
        let tx = self.results_tx.clone();
        let debounce = Duration::from_millis(self.debounce_ms);
        let limit = self.limit;
        self.worker = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            match provider.search(&query, limit).await {
                Ok(candidates) => {
                    tx.send_if_modified(|results| {
                        if results.query != query {
                            return false;
                        }
                        results.candidates = candidates;
                        true
                    });
                }
                Err(e) => log::warn!("[search] lookup failed for {query:?}: {e}"),
            }
        }));
    }
}

impl<P> Drop for SearchDebouncer<P> {
    fn drop(&mut self) {
        if let Some(handle) = self.worker.take() {
            handle.abort();
        }
    }
}
