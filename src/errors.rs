//! Errores del núcleo (taxonomía de la sesión, simple por ahora).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallo al hablar con un colaborador externo (almacén o webhook).
///
/// Distinto de "no encontrado": un `get` que no halla registro devuelve
/// `Ok(None)`, nunca una variante de este enum.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Errores observables de una sesión de interacción.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionError {
    /// Falta seleccionar uno o ambos medicamentos. Recuperable: el usuario
    /// corrige la selección y reintenta.
    #[error("both drugs must be selected")]
    Validation,
    /// La consulta inicial a la caché falló. Fatal para esta sesión; los
    /// fallos durante el sondeo se tragan y reintentan.
    #[error("cache lookup failed: {0}")]
    Store(#[from] StoreError),
    /// El disparo del trabajo externo falló en el transporte.
    #[error("job submission failed: {0}")]
    Submission(String),
    /// El webhook respondió pero no aceptó la solicitud.
    #[error("job submission rejected")]
    Rejected,
    /// Ningún registro apareció dentro de la ventana de la sesión.
    #[error("no result within the session timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_formats() {
        let e = StoreError::Transport("conn refused".into());
        assert_eq!(e.to_string(), "transport failure: conn refused");
    }

    #[test]
    fn session_error_from_store_error() {
        let e: SessionError = StoreError::Backend("500".into()).into();
        assert_eq!(e.to_string(), "cache lookup failed: backend failure: 500");
    }
}
