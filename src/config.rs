//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`). Los tiempos de la sesión también pueden construirse a mano
//! e inyectarse, que es lo que hacen los tests.

use once_cell::sync::Lazy;
use std::env;

use crate::constants::{POLL_INTERVAL_MS, POLL_TIMEOUT_MS, PROGRESS_TICK_MS};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

/// Tiempos que consume el orquestador de la sesión.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTiming {
    /// Intervalo entre sondeos de la caché.
    pub poll_interval_ms: u64,
    /// Ventana máxima de espera de la sesión.
    pub timeout_ms: u64,
    /// Paso del cursor de progreso.
    pub progress_tick_ms: u64,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_MS,
            timeout_ms: POLL_TIMEOUT_MS,
            progress_tick_ms: PROGRESS_TICK_MS,
        }
    }
}

impl SessionTiming {
    /// Lee overrides opcionales del entorno; todo lo no definido cae en los
    /// valores compilados.
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let read = |key: &str, default: u64| {
            env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };
        Self {
            poll_interval_ms: read("POLL_INTERVAL_MS", POLL_INTERVAL_MS),
            timeout_ms: read("POLL_TIMEOUT_MS", POLL_TIMEOUT_MS),
            progress_tick_ms: read("PROGRESS_TICK_MS", PROGRESS_TICK_MS),
        }
    }
}

/// Configuración global de la aplicación (extensible para más secciones).
pub struct AppConfig {
    pub timing: SessionTiming,
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| AppConfig {
    timing: SessionTiming::from_env(),
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_matches_constants() {
        let t = SessionTiming::default();
        assert_eq!(t.poll_interval_ms, 2_000);
        assert_eq!(t.timeout_ms, 300_000);
        assert_eq!(t.progress_tick_ms, 200);
    }
}
