//! Hash helpers – abstracción para poder cambiar de algoritmo sin tocar el
//! resto del núcleo. SHA-256 da sobra de margen contra colisiones
//! accidentales para el corpus esperado (decenas de miles de medicamentos);
//! el token es una clave de deduplicación, no una frontera de seguridad.

use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Hashea un string y devuelve hex en minúsculas (64 caracteres).
pub fn hash_str(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::hash_str;

    #[test]
    fn fixed_length_hex() {
        let h = hash_str("paracetamol+ibuprofen");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn deterministic_across_calls() {
        assert_eq!(hash_str("abc"), hash_str("abc"));
        assert_ne!(hash_str("abc"), hash_str("abd"));
    }
}
