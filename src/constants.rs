//! Constantes del núcleo de interacciones.
//!
//! Este módulo agrupa los valores estáticos que participan en la derivación
//! del token de caché y en los tiempos de la sesión. Cambios en los
//! marcadores de espacio de nombres invalidan todos los tokens ya
//! almacenados: el trabajo externo deriva el mismo token con las mismas
//! reglas, así que ambos lados deben moverse juntos.

/// Marcador del camino basado en principios activos (esquema canónico).
pub const SUBSTANCE_TOKEN_NAMESPACE: &str = "substances:";
/// Marcador del camino de reserva basado en los nombres comerciales.
pub const NAME_TOKEN_NAMESPACE: &str = "names:";
/// Separador de elementos dentro de la preimagen del token.
pub const TOKEN_JOIN_SEPARATOR: &str = "+";

/// Intervalo entre sondeos de la caché mientras el trabajo externo corre.
pub const POLL_INTERVAL_MS: u64 = 2_000;
/// Tiempo máximo de espera de la sesión (5 minutos).
pub const POLL_TIMEOUT_MS: u64 = 300_000;
/// Paso del cursor del estimador de progreso.
pub const PROGRESS_TICK_MS: u64 = 200;
/// Duración nominal asignada a cada par de sustancias salvo el último.
pub const PAIR_DURATION_MS: u64 = 7_000;
/// Duración nominal del último par (alarga la recta final a propósito).
pub const LAST_PAIR_DURATION_MS: u64 = 10_000;

/// Retardo de la búsqueda incremental antes de consultar el almacén.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
/// Longitud mínima de la consulta de búsqueda.
pub const SEARCH_MIN_QUERY_LEN: usize = 2;
/// Máximo de candidatos devueltos por búsqueda.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Mensajes de estado orientados al usuario.
pub const MSG_SELECT_BOTH: &str = "Please select both drugs from the list.";
pub const MSG_CACHE_ERROR: &str = "Could not check the cache. Please try again.";
pub const MSG_SUBMIT_ERROR: &str = "Could not submit the analysis request. Please try again.";
pub const MSG_TIMEOUT: &str = "The analysis timed out. Please try again.";
