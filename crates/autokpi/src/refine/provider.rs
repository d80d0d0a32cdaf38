//! Refiner trait and types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kpi::KpiDescriptor;

/// Replacement wording for one KPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refinement {
    pub name: String,
    pub description: String,
}

/// Why a refinement could not be produced.
#[derive(Debug, Error)]
pub enum RefineError {
    /// The backing service is not configured or reachable.
    #[error("Refiner unavailable: {0}")]
    Unavailable(String),

    /// The request was sent but failed.
    #[error("Refinement request failed: {0}")]
    Request(String),

    /// The response did not contain a usable name or description.
    #[error("Invalid refinement response: {0}")]
    InvalidResponse(String),
}

/// Trait for services that reword KPI names and descriptions.
///
/// Implementations must be thread-safe (Send + Sync) so one refiner can be
/// shared across analyses.
pub trait KpiRefiner: Send + Sync {
    /// Short identifier for logs, e.g. `mock`.
    fn name(&self) -> &str;

    /// Produce new wording for `kpi`.
    ///
    /// # Arguments
    /// * `kpi` - The generated descriptor
    /// * `context` - Optional free-text description of the dataset
    fn refine(
        &self,
        kpi: &KpiDescriptor,
        context: Option<&str>,
    ) -> std::result::Result<Refinement, RefineError>;
}
