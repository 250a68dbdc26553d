//! Orquestador de la sesión de interacción.
//! Se encarga de:
//! - Derivar el token del par seleccionado y hacer la consulta puntual
//!   inicial a la caché (camino rápido).
//! - Disparar el trabajo externo cuando no hay registro y sondear la caché
//!   en intervalo fijo hasta que aparezca.
//! - Conducir el estimador de progreso y el timeout de la sesión en el
//!   mismo bucle de tarea, de modo que cancelar la tarea desmonta los tres
//!   temporizadores de una vez.
//! - Garantizar que una sesión invalidada por una nueva selección nunca
//!   pise el estado de la siguiente: cada `start` genera un id de sesión
//!   nuevo que actúa como guarda de generación, además de abortar la tarea
//!   anterior de forma síncrona.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::SessionTiming;
use crate::constants::{MSG_CACHE_ERROR, MSG_SELECT_BOTH, MSG_SUBMIT_ERROR, MSG_TIMEOUT};
use crate::errors::SessionError;
use crate::model::{CacheRecord, CacheToken, DrugIdentity, SubstancePairing};
use crate::session::phase::SessionPhase;
use crate::session::progress::ProgressPlan;
use crate::store::{AnalysisRequest, CacheStore, JobSubmitter};
use crate::token::derive_token;

/// Estado observable de la sesión, publicado por un canal `watch`.
///
/// `session_id` cambia en cada `start`; la interfaz lo usa para reiniciar
/// juntas la barra continua y las etiquetas por escalones, y el propio
/// orquestador lo usa como guarda contra aplicaciones tardías.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub total_pair_count: usize,
    /// Índice del par vigente, base 1 para presentación.
    pub current_pair_index: usize,
    pub current_pair_label: String,
    /// Duración total de la simulación de progreso.
    pub total_ms: u64,
    /// Mensaje de estado orientado al usuario, si lo hay.
    pub message: Option<String>,
}

impl SessionState {
    fn idle() -> Self {
        Self {
            session_id: Uuid::nil(),
            phase: SessionPhase::Idle,
            total_pair_count: 0,
            current_pair_index: 0,
            current_pair_label: String::new(),
            total_ms: 0,
            message: None,
        }
    }
}

/// Resultado inmediato de `start`.
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// La consulta inicial ya encontró el registro; no se disparó trabajo.
    ResolvedFromCache(CacheRecord),
    /// Trabajo aceptado; la sesión queda sondeando.
    JobStarted {
        token: CacheToken,
        total_pairs: usize,
    },
}

/// Máquina de estados cliente que une caché, webhook y progreso.
///
/// A lo sumo una tarea de sondeo viva por instancia: `start` desmonta la
/// anterior antes de tocar ningún estado nuevo.
pub struct InteractionSession<S, J> {
    store: Arc<S>,
    submitter: Arc<J>,
    timing: SessionTiming,
    state_tx: watch::Sender<SessionState>,
    worker: Option<JoinHandle<()>>,
}

impl<S, J> InteractionSession<S, J>
where
    S: CacheStore + 'static,
    J: JobSubmitter + 'static,
{
    pub fn new(store: S, submitter: J) -> Self {
        Self::with_timing(store, submitter, SessionTiming::default())
    }

    pub fn with_timing(store: S, submitter: J, timing: SessionTiming) -> Self {
        let (state_tx, _) = watch::channel(SessionState::idle());
        Self {
            store: Arc::new(store),
            submitter: Arc::new(submitter),
            timing,
            state_tx,
            worker: None,
        }
    }

    /// Receptor del estado para la interfaz.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Instantánea del estado vigente.
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Cancela la sesión vigente y vuelve a `Idle` (selección borrada,
    /// navegación fuera de la vista).
    pub fn reset(&mut self) {
        self.teardown();
        self.state_tx.send_replace(SessionState::idle());
    }

    /// Inicia una sesión para el par seleccionado.
    ///
    /// Guarda de entrada: ambos medicamentos deben estar seleccionados; si
    /// no, se publica el mensaje de validación y la fase se queda en
    /// `Idle`. Cualquier sesión previa muere aquí, antes de tocar estado.
    pub async fn start(
        &mut self,
        drug_a: Option<&DrugIdentity>,
        drug_b: Option<&DrugIdentity>,
    ) -> Result<StartOutcome, SessionError> {
        self.teardown();

        let (Some(a), Some(b)) = (drug_a, drug_b) else {
            self.state_tx.send_replace(SessionState {
                message: Some(MSG_SELECT_BOTH.to_string()),
                ..SessionState::idle()
            });
            return Err(SessionError::Validation);
        };

        let session_id = Uuid::new_v4();
        let token = derive_token(a, b);
        let pairing = SubstancePairing::build(a, b);
        let plan = ProgressPlan::for_pairs(pairing.len());
        // El payload se arma antes de consultar, pero sólo viaja en caso de
        // miss (escenario de caché poblada: cero envíos).
        let request = AnalysisRequest::new(a, b);

        self.state_tx.send_replace(SessionState {
            session_id,
            phase: SessionPhase::Submitting,
            total_pair_count: plan.pair_count(),
            current_pair_index: 1,
            current_pair_label: pairing.label_at(0).unwrap_or_default().to_string(),
            total_ms: plan.total_ms(),
            message: None,
        });

        // Consulta puntual inicial: aquí un error sí es fatal, a diferencia
        // del sondeo posterior.
        match self.store.get(&token).await {
            Err(e) => {
                self.fail(session_id, MSG_CACHE_ERROR);
                return Err(SessionError::Store(e));
            }
            Ok(Some(record)) => {
                apply_if_current(&self.state_tx, session_id, |s| {
                    s.phase = SessionPhase::Resolved {
                        record: record.clone(),
                        from_cache: true,
                    };
                });
                return Ok(StartOutcome::ResolvedFromCache(record));
            }
            Ok(None) => {}
        }

        match self.submitter.submit(&request).await {
            Err(e) => {
                self.fail(session_id, MSG_SUBMIT_ERROR);
                return Err(SessionError::Submission(e.to_string()));
            }
            Ok(false) => {
                self.fail(session_id, MSG_SUBMIT_ERROR);
                return Err(SessionError::Rejected);
            }
            Ok(true) => {}
        }

        apply_if_current(&self.state_tx, session_id, |s| {
            s.phase = SessionPhase::AwaitingJob;
        });

        let total_pairs = plan.pair_count();
        self.worker = Some(tokio::spawn(poll_until_resolved(
            Arc::clone(&self.store),
            self.state_tx.clone(),
            session_id,
            token.clone(),
            pairing,
            plan,
            self.timing.clone(),
        )));

        Ok(StartOutcome::JobStarted { token, total_pairs })
    }

    fn fail(&self, session_id: Uuid, message: &str) {
        apply_if_current(&self.state_tx, session_id, |s| {
            s.phase = SessionPhase::Failed {
                message: message.to_string(),
            };
            s.message = Some(message.to_string());
        });
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.worker.take() {
            handle.abort();
        }
    }
}

impl<S, J> Drop for InteractionSession<S, J> {
    fn drop(&mut self) {
        if let Some(handle) = self.worker.take() {
            handle.abort();
        }
    }
}

/// Aplica una mutación sólo si la sesión publicada sigue siendo la que
/// originó el resultado. Sustituye al locking que no necesitamos: los
/// resultados de consultas supersedidas se descartan en vez de aplicarse.
fn apply_if_current(
    tx: &watch::Sender<SessionState>,
    session_id: Uuid,
    mutate: impl FnOnce(&mut SessionState),
) -> bool {
    tx.send_if_modified(|state| {
        if state.session_id != session_id {
            return false;
        }
        mutate(state);
        true
    })
}

/// Bucle de fondo de una sesión en `AwaitingJob`.
///
/// Un solo `select!` sesgado une los tres temporizadores: el deadline va
/// primero para que, si sondeo y timeout caen en el mismo instante, gane el
/// timeout de forma determinista. Los errores de consulta se registran y se
/// tragan; un hipo transitorio del almacén no aborta un trabajo en vuelo.
async fn poll_until_resolved<S: CacheStore>(
    store: Arc<S>,
    tx: watch::Sender<SessionState>,
    session_id: Uuid,
    token: CacheToken,
    pairing: SubstancePairing,
    plan: ProgressPlan,
    timing: SessionTiming,
) {
    let started = tokio::time::Instant::now();
    let deadline = tokio::time::sleep(Duration::from_millis(timing.timeout_ms));
    tokio::pin!(deadline);

    let poll_period = Duration::from_millis(timing.poll_interval_ms);
    let mut poll = tokio::time::interval_at(started + poll_period, poll_period);
    let tick_period = Duration::from_millis(timing.progress_tick_ms);
    let mut progress = tokio::time::interval_at(started + tick_period, tick_period);

    let mut elapsed_ms: u64 = 0;
    let mut pair_idx: usize = 0;

    loop {
        tokio::select! {
            biased;

            _ = &mut deadline => {
                log::info!("[session] timed out after {} ms, token={token}", timing.timeout_ms);
                apply_if_current(&tx, session_id, |s| {
                    s.phase = SessionPhase::TimedOut;
                    s.message = Some(MSG_TIMEOUT.to_string());
                });
                break;
            }

            _ = poll.tick() => {
                match store.get(&token).await {
                    Err(e) => log::warn!("[poll] cache lookup failed, will retry: {e}"),
                    Ok(Some(record)) => {
                        apply_if_current(&tx, session_id, |s| {
                            s.phase = SessionPhase::Resolved { record, from_cache: false };
                        });
                        break;
                    }
                    Ok(None) => {}
                }
            }

            _ = progress.tick() => {
                elapsed_ms += timing.progress_tick_ms;
                let idx = plan.pair_index_at(elapsed_ms);
                if idx != pair_idx {
                    pair_idx = idx;
                    let label = pairing
                        .label_at(idx)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Pair {}", idx + 1));
                    apply_if_current(&tx, session_id, |s| {
                        s.current_pair_index = idx + 1;
                        s.current_pair_label = label;
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_session_updates_are_discarded() {
        let current = Uuid::new_v4();
        let stale = Uuid::new_v4();
        let (tx, _rx) = watch::channel(SessionState {
            session_id: current,
            ..SessionState::idle()
        });

        let applied = apply_if_current(&tx, stale, |s| {
            s.phase = SessionPhase::TimedOut;
        });
        assert!(!applied);
        assert_eq!(tx.borrow().phase, SessionPhase::Idle);

        let applied = apply_if_current(&tx, current, |s| {
            s.phase = SessionPhase::AwaitingJob;
        });
        assert!(applied);
        assert_eq!(tx.borrow().phase, SessionPhase::AwaitingJob);
    }

    #[test]
    fn idle_state_has_nil_session() {
        let s = SessionState::idle();
        assert_eq!(s.session_id, Uuid::nil());
        assert_eq!(s.phase, SessionPhase::Idle);
        assert_eq!(s.total_pair_count, 0);
    }
}
