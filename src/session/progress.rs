//! Estimador de progreso simulado.
//!
//! El trabajo externo no publica avance intermedio: el almacén sólo informa
//! el resultado final. El estimador produce por tanto una línea de tiempo
//! nominal, no medida: cada par recibe 7000 ms salvo el último, que recibe
//! 10000 ms (suaviza la recta final; es una decisión de presentación, no
//! una distribución de tiempos de servicio). La barra visual se llena de 0
//! a 100 % en una sola transición continua de `total_ms`, mientras que la
//! etiqueta del par avanza por escalones con `pair_index_at`; ambas
//! presentaciones comparten la misma duración total y se reinician juntas
//! con cada nuevo id de sesión.

use crate::constants::{LAST_PAIR_DURATION_MS, PAIR_DURATION_MS};

/// Línea de tiempo nominal para `n` pares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressPlan {
    durations_ms: Vec<u64>,
    total_ms: u64,
}

impl ProgressPlan {
    /// Construye el plan para `pair_count` pares; cero se trata como uno
    /// (siempre hay un par de reserva).
    pub fn for_pairs(pair_count: usize) -> Self {
        let n = pair_count.max(1);
        let durations_ms: Vec<u64> = (0..n)
            .map(|i| {
                if i == n - 1 {
                    LAST_PAIR_DURATION_MS
                } else {
                    PAIR_DURATION_MS
                }
            })
            .collect();
        let total_ms = durations_ms.iter().sum();
        Self { durations_ms, total_ms }
    }

    /// Duración total de la simulación (también la de la barra continua).
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn pair_count(&self) -> usize {
        self.durations_ms.len()
    }

    /// Índice (base 0) del par vigente a los `elapsed_ms` de simulación.
    /// Se queda en el último par una vez agotada la duración total.
    pub fn pair_index_at(&self, elapsed_ms: u64) -> usize {
        let mut boundary = 0u64;
        for (i, d) in self.durations_ms.iter().enumerate() {
            boundary += d;
            if elapsed_ms < boundary {
                return i;
            }
        }
        self.durations_ms.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_follows_the_nominal_formula() {
        // total = 7000*(n-1) + 10000 para n >= 1
        assert_eq!(ProgressPlan::for_pairs(1).total_ms(), 10_000);
        assert_eq!(ProgressPlan::for_pairs(2).total_ms(), 17_000);
        assert_eq!(ProgressPlan::for_pairs(5).total_ms(), 38_000);
    }

    #[test]
    fn zero_pairs_treated_as_one() {
        let plan = ProgressPlan::for_pairs(0);
        assert_eq!(plan.pair_count(), 1);
        assert_eq!(plan.total_ms(), 10_000);
    }

    #[test]
    fn cursor_steps_at_pair_boundaries() {
        let plan = ProgressPlan::for_pairs(3); // 7000 + 7000 + 10000
        assert_eq!(plan.pair_index_at(0), 0);
        assert_eq!(plan.pair_index_at(6_999), 0);
        assert_eq!(plan.pair_index_at(7_000), 1);
        assert_eq!(plan.pair_index_at(13_999), 1);
        assert_eq!(plan.pair_index_at(14_000), 2);
    }

    #[test]
    fn cursor_clamps_to_last_pair() {
        let plan = ProgressPlan::for_pairs(2);
        assert_eq!(plan.pair_index_at(999_999), 1);
    }
}
