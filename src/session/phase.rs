//! Fase de una sesión de interacción.

use crate::model::CacheRecord;

/// Fase observable de la sesión.
///
/// Transiciones válidas:
/// - `Idle` -> `Submitting`
/// - `Submitting` -> `Resolved` (registro ya en caché) | `AwaitingJob` | `Failed`
/// - `AwaitingJob` -> `Resolved` | `TimedOut`
///
/// Los errores de consulta durante `AwaitingJob` no transicionan: se
/// registran y el sondeo continúa. `TimedOut` y `Failed` son equivalentes
/// a `Idle` a efectos de reintento: `start` es válido desde cualquier fase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Sin sesión activa.
    Idle,
    /// Derivando token, consultando la caché y, si hace falta, disparando
    /// el trabajo externo.
    Submitting,
    /// Trabajo disparado; sondeando la caché hasta que aparezca el registro.
    AwaitingJob,
    /// Registro entregado a la interfaz.
    Resolved {
        record: CacheRecord,
        /// `true` si la consulta inicial ya lo encontró (sin disparo de trabajo).
        from_cache: bool,
    },
    /// Error fatal de esta sesión; el usuario debe reintentar.
    Failed { message: String },
    /// Se agotó la ventana de espera sin registro.
    TimedOut,
}

impl SessionPhase {
    /// La sesión sigue esperando actividad (sondeo o consulta en vuelo).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Submitting | Self::AwaitingJob)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}
