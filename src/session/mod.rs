//! Sesión de interacción: fases, estimador de progreso y orquestador.

pub mod orchestrator;
pub mod phase;
pub mod progress;

pub use orchestrator::{InteractionSession, SessionState, StartOutcome};
pub use phase::SessionPhase;
pub use progress::ProgressPlan;
