//! medinteract-core: núcleo de consulta de interacciones medicamentosas.
//!
//! Dos piezas cooperan:
//! - `token`: derivación simétrica e insensible a duplicados del token de
//!   caché que liga un par de medicamentos a su veredicto.
//! - `session`: máquina de estados cliente que consulta la caché, dispara
//!   el trabajo externo en caso de miss y sondea hasta que el resultado
//!   aparezca, conduciendo de paso un progreso simulado.
//!
//! El resto (`store`, `search`) son los contratos de los colaboradores
//! externos y la búsqueda incremental que alimenta la selección.

pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod search;
pub mod session;
pub mod store;
pub mod token;

pub use config::{AppConfig, SessionTiming, CONFIG};
pub use errors::{SessionError, StoreError};
pub use model::{parse_substances, CacheRecord, CacheToken, DrugIdentity, SubstancePairing};
pub use search::{SearchDebouncer, SearchResults};
pub use session::{InteractionSession, ProgressPlan, SessionPhase, SessionState, StartOutcome};
pub use store::memory::{InMemoryCacheStore, InMemoryDrugCatalog, MockJobSubmitter};
pub use store::{AnalysisDrug, AnalysisRequest, CacheStore, DrugSearch, JobSubmitter};
pub use token::derive_token;
