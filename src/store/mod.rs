//! Colaboradores externos del núcleo: almacén de caché, disparador del
//! trabajo de análisis y búsqueda de medicamentos.
//!
//! El núcleo sólo conoce estos contratos; las implementaciones reales
//! (almacén relacional, webhook HTTP) viven fuera. Las versiones en
//! memoria de `memory` sirven para tests y para la demo.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::model::{CacheRecord, CacheToken, DrugIdentity};

/// Consulta puntual de la caché de veredictos.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// `Ok(None)` significa "todavía no hay resultado", que durante una
    /// sesión activa es el caso normal, no un error.
    async fn get(&self, token: &CacheToken) -> Result<Option<CacheRecord>, StoreError>;
}

/// Un medicamento dentro del payload del webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDrug {
    pub name: String,
    pub external_id: String,
    pub raw_substances: String,
}

impl From<&DrugIdentity> for AnalysisDrug {
    fn from(drug: &DrugIdentity) -> Self {
        Self {
            name: drug.display_name().to_string(),
            external_id: drug.external_id.clone(),
            raw_substances: drug.raw_substances.clone(),
        }
    }
}

/// Payload completo del disparo de análisis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub drug_a: AnalysisDrug,
    pub drug_b: AnalysisDrug,
}

impl AnalysisRequest {
    pub fn new(drug_a: &DrugIdentity, drug_b: &DrugIdentity) -> Self {
        Self {
            drug_a: drug_a.into(),
            drug_b: drug_b.into(),
        }
    }
}

/// Disparador del trabajo externo de análisis.
///
/// No devuelve id de correlación: la única señal de término es que la
/// caché converja bajo el mismo token derivado. El trabajo externo debe
/// aplicar la regla de derivación idéntica a la de `token::derive_token`;
/// es un contrato implícito y no verificable entre cliente y trabajo
/// (riesgo de acoplamiento asumido).
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// `Ok(true)` = aceptado, `Ok(false)` = rechazado por el webhook.
    async fn submit(&self, request: &AnalysisRequest) -> Result<bool, StoreError>;
}

/// Autocompletado de medicamentos por prefijo.
#[async_trait]
pub trait DrugSearch: Send + Sync {
    /// Coincidencia de prefijo, insensible a mayúsculas, contra el nombre
    /// comercial y el MNN.
    async fn search(&self, prefix: &str, limit: usize) -> Result<Vec<DrugIdentity>, StoreError>;
}
