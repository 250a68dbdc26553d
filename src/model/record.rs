//! Token y registro de caché.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clave de búsqueda derivada de un par de medicamentos.
///
/// Cadena hex opaca de longitud fija. Simétrica respecto al orden de los
/// medicamentos e insensible a principios activos duplicados; ver
/// `token::derive_token`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheToken(String);

impl CacheToken {
    pub(crate) fn new(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resultado precomputado de un análisis de interacción.
///
/// Lo produce exclusivamente el trabajo externo; el núcleo sólo lo lee.
/// Los tres vectores van alineados por índice con el orden de
/// emparejamiento (`SubstancePairing`); `explanations` puede venir más
/// corto que `verdicts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Veredicto por par de sustancias.
    pub verdicts: Vec<String>,
    /// Explicación por par, cuando existe.
    pub explanations: Vec<String>,
    /// Etiquetas "sustanciaA + sustanciaB" en orden de emparejamiento.
    pub pair_labels: Vec<String>,
    /// Metadato de la fila del almacén; nunca participa en el token.
    pub created_at: Option<DateTime<Utc>>,
}

impl CacheRecord {
    pub fn new(verdicts: Vec<String>, explanations: Vec<String>, pair_labels: Vec<String>) -> Self {
        Self {
            verdicts,
            explanations,
            pair_labels,
            created_at: None,
        }
    }
}
