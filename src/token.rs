//! Derivación del token de caché.
//!
//! Dos caminos mutuamente excluyentes:
//! - Camino canónico por principios activos: el conjunto combinado de
//!   sustancias de ambos medicamentos, en minúsculas, deduplicado y
//!   ordenado lexicográficamente.
//! - Camino de reserva por nombres: el par de nombres a mostrar, en
//!   minúsculas y ordenado, sólo cuando ningún lado parsea sustancias.
//!
//! Cada camino lleva su marcador de espacio de nombres en la preimagen, de
//! modo que un token de sustancias nunca puede chocar con uno de nombres
//! aunque las cadenas unidas coincidan. El trabajo externo debe derivar el
//! token con exactamente estas reglas; no hay id de correlación que lo
//! verifique.

use std::collections::BTreeSet;

use crate::constants::{NAME_TOKEN_NAMESPACE, SUBSTANCE_TOKEN_NAMESPACE, TOKEN_JOIN_SEPARATOR};
use crate::hashing::hash_str;
use crate::model::{CacheToken, DrugIdentity};

/// Deriva el token para un par de medicamentos.
///
/// Garantías: `derive_token(a, b) == derive_token(b, a)`; sustancias
/// duplicadas dentro o entre identidades no cambian el resultado; misma
/// entrada semántica produce el mismo token en cualquier proceso.
pub fn derive_token(drug_a: &DrugIdentity, drug_b: &DrugIdentity) -> CacheToken {
    // BTreeSet da deduplicación y orden lexicográfico a la vez.
    let combined: BTreeSet<String> = drug_a
        .substances()
        .iter()
        .chain(drug_b.substances().iter())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let preimage = if combined.is_empty() {
        let mut names = [
            drug_a.display_name().trim().to_lowercase(),
            drug_b.display_name().trim().to_lowercase(),
        ];
        names.sort();
        format!(
            "{NAME_TOKEN_NAMESPACE}{}",
            names.join(TOKEN_JOIN_SEPARATOR)
        )
    } else {
        format!(
            "{SUBSTANCE_TOKEN_NAMESPACE}{}",
            combined.into_iter().collect::<Vec<_>>().join(TOKEN_JOIN_SEPARATOR)
        )
    };

    CacheToken::new(hash_str(&preimage))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drug(name: &str, raw: &str) -> DrugIdentity {
        DrugIdentity::new(name, "", "LP-0", raw)
    }

    #[test]
    fn symmetric_under_input_order() {
        let a = drug("Panadol", "Paracetamol");
        let b = drug("Nurofen", "Ibuprofen + Codeine");
        assert_eq!(derive_token(&a, &b), derive_token(&b, &a));

        // También en el camino de reserva por nombres.
        let a = drug("Panadol", "");
        let b = drug("Nurofen", "");
        assert_eq!(derive_token(&a, &b), derive_token(&b, &a));
    }

    #[test]
    fn duplicate_substances_do_not_change_token() {
        let a = drug("A", "paracetamol");
        let b = drug("B", "ibuprofen");
        let base = derive_token(&a, &b);

        let a_dup = drug("A", "paracetamol + paracetamol");
        assert_eq!(derive_token(&a_dup, &b), base);

        // Duplicado cruzado entre identidades.
        let b_dup = drug("B", "ibuprofen, paracetamol");
        let a_short = drug("A", "paracetamol");
        assert_eq!(derive_token(&a_short, &b_dup), base);
    }

    #[test]
    fn case_and_whitespace_folded() {
        let a = drug("A", " Paracetamol ");
        let b = drug("B", "IBUPROFEN");
        let c = drug("A", "paracetamol");
        let d = drug("B", "ibuprofen");
        assert_eq!(derive_token(&a, &b), derive_token(&c, &d));
    }

    #[test]
    fn namespace_separates_substance_and_name_paths() {
        // Preimágenes que unirían la misma cadena "a+b" en ambos caminos.
        let by_substances = derive_token(&drug("X", "a+b"), &drug("Y", ""));
        let by_names = derive_token(&drug("a", ""), &drug("b", ""));
        assert_ne!(by_substances, by_names);
    }

    #[test]
    fn one_parsed_substance_routes_to_substance_path() {
        // Con sustancias en un solo lado, el nombre del otro lado no
        // participa en el token.
        let a = drug("A", "paracetamol");
        let b1 = drug("NombreUno", "");
        let b2 = drug("NombreDos", "");
        assert_eq!(derive_token(&a, &b1), derive_token(&a, &b2));
    }

    #[test]
    fn empty_inputs_yield_a_defined_token() {
        let t1 = derive_token(&drug("", ""), &drug("", ""));
        let t2 = derive_token(&drug("", ""), &drug("", ""));
        assert_eq!(t1, t2);
        assert_eq!(t1.as_str().len(), 64);
    }
}
