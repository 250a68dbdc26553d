//! Emparejamiento de principios activos.
//!
//! Producto cartesiano de las sustancias de A por las de B, con bucle
//! externo sobre A y bucle interno sobre B. Este orden fija tanto la
//! cardinalidad esperada de veredictos como las etiquetas de progreso, y
//! debe coincidir con el orden que usa el trabajo externo (contrato
//! implícito que el núcleo no controla pero asume).

use crate::model::DrugIdentity;

/// Lista ordenada de pares "sustanciaA + sustanciaB".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstancePairing {
    labels: Vec<String>,
}

impl SubstancePairing {
    /// Construye el emparejamiento para dos identidades seleccionadas.
    ///
    /// Si un lado no parsea ninguna sustancia se usa su nombre a mostrar
    /// como elemento único de reserva, de modo que siempre hay al menos un
    /// par.
    pub fn build(drug_a: &DrugIdentity, drug_b: &DrugIdentity) -> Self {
        let left = effective_side(drug_a, "Drug 1");
        let right = effective_side(drug_b, "Drug 2");

        let mut labels = Vec::with_capacity(left.len() * right.len());
        for l in &left {
            for r in &right {
                labels.push(format!("{l} + {r}"));
            }
        }
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn effective_side(drug: &DrugIdentity, placeholder: &str) -> Vec<String> {
    let parsed = drug.substances();
    if !parsed.is_empty() {
        return parsed;
    }
    let name = drug.display_name().trim();
    if name.is_empty() {
        vec![placeholder.to_string()]
    } else {
        vec![name.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drug(name: &str, raw: &str) -> DrugIdentity {
        DrugIdentity::new(name, "", "LP-0", raw)
    }

    #[test]
    fn cartesian_product_in_stable_order() {
        let a = drug("A", "x + y");
        let b = drug("B", "u, v");
        let p = SubstancePairing::build(&a, &b);
        assert_eq!(p.len(), 4);
        assert_eq!(p.labels(), ["x + u", "x + v", "y + u", "y + v"]);
    }

    #[test]
    fn fallback_to_display_name_when_side_has_no_substances() {
        let a = drug("Nurofen", "");
        let b = drug("B", "u + v");
        let p = SubstancePairing::build(&a, &b);
        assert_eq!(p.labels(), ["Nurofen + u", "Nurofen + v"]);
    }

    #[test]
    fn both_sides_empty_yield_single_pair() {
        let a = drug("", "");
        let b = drug("", "");
        let p = SubstancePairing::build(&a, &b);
        assert_eq!(p.labels(), ["Drug 1 + Drug 2"]);
    }

    #[test]
    fn cardinality_matches_substance_counts() {
        let a = drug("A", "s1;s2;s3");
        let b = drug("B", "t1/t2");
        assert_eq!(SubstancePairing::build(&a, &b).len(), 6);
    }
}
