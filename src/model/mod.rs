//! Modelo de datos del núcleo: identidad de medicamento, token/registro de
//! caché y emparejamiento de principios activos.

pub mod drug;
pub mod pairing;
pub mod record;

pub use drug::{parse_substances, DrugIdentity};
pub use pairing::SubstancePairing;
pub use record::{CacheRecord, CacheToken};
