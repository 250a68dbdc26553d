//! Identidad de medicamento tal como la selecciona el usuario.
//!
//! Inmutable una vez seleccionada: un cambio de selección reemplaza la
//! identidad completa, nunca se muta en sitio.

use serde::{Deserialize, Serialize};

/// Identidad de un medicamento seleccionado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugIdentity {
    /// Nombre comercial (TN).
    pub commercial_name: String,
    /// Denominación común internacional (MNN).
    pub mnn_name: String,
    /// Identificador opaco en el almacén externo (columna `lpid` original).
    pub external_id: String,
    /// Campo crudo de principios activos, con delimitadores sin normalizar.
    /// Se reenvía tal cual en el payload del trabajo externo.
    pub raw_substances: String,
}

impl DrugIdentity {
    pub fn new(
        commercial_name: impl Into<String>,
        mnn_name: impl Into<String>,
        external_id: impl Into<String>,
        raw_substances: impl Into<String>,
    ) -> Self {
        Self {
            commercial_name: commercial_name.into(),
            mnn_name: mnn_name.into(),
            external_id: external_id.into(),
            raw_substances: raw_substances.into(),
        }
    }

    /// Principios activos parseados del campo crudo (orden de aparición).
    pub fn substances(&self) -> Vec<String> {
        parse_substances(&self.raw_substances)
    }

    /// Nombre a mostrar: comercial si existe, MNN en su defecto.
    pub fn display_name(&self) -> &str {
        if self.commercial_name.trim().is_empty() {
            &self.mnn_name
        } else {
            &self.commercial_name
        }
    }
}

/// Separa un campo delimitado de principios activos.
///
/// Delimitadores aceptados: `+`, `,`, `;`, `/`. Cada elemento se recorta y
/// los vacíos se descartan.
pub fn parse_substances(raw: &str) -> Vec<String> {
    raw.split(['+', ',', ';', '/'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_delimiter() {
        let parsed = parse_substances("a+b,c;d/e");
        assert_eq!(parsed, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn trims_and_drops_empty_elements() {
        let parsed = parse_substances(" paracetamol + ; , ibuprofen / ");
        assert_eq!(parsed, vec!["paracetamol", "ibuprofen"]);
    }

    #[test]
    fn empty_field_yields_no_substances() {
        assert!(parse_substances("").is_empty());
        assert!(parse_substances("  ;  ").is_empty());
    }

    #[test]
    fn display_name_falls_back_to_mnn() {
        let d = DrugIdentity::new("", "Ibuprofen", "LP-1", "");
        assert_eq!(d.display_name(), "Ibuprofen");
        let d = DrugIdentity::new("Nurofen", "Ibuprofen", "LP-1", "");
        assert_eq!(d.display_name(), "Nurofen");
    }
}
