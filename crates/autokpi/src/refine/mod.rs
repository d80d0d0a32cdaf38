//! Optional rewording of KPI names and descriptions.
//!
//! Refinement is skippable: with no refiner the catalogue passes through
//! unchanged. A failed refinement keeps the original wording and never
//! blocks export.
//!
//! # Example
//!
//! ```
//! use autokpi::refine::{refine_kpis, MockRefiner};
//!
//! let refined = refine_kpis(&[], Some(&MockRefiner::new()), None);
//! assert!(refined.is_empty());
//! ```

mod mock;
mod prompts;
mod provider;

pub use mock::MockRefiner;
pub use prompts::{parse_refinement, refine_prompt, SYSTEM_PROMPT};
pub use provider::{KpiRefiner, RefineError, Refinement};

use tracing::{debug, warn};

use crate::kpi::KpiDescriptor;

/// Refine one KPI, returning a copy.
///
/// On success the copy carries the new wording and `refined_by_llm = true`.
/// On failure the copy is unchanged.
pub fn refine_kpi(
    kpi: &KpiDescriptor,
    refiner: &dyn KpiRefiner,
    context: Option<&str>,
) -> KpiDescriptor {
    match refiner.refine(kpi, context) {
        Ok(refinement) => {
            let mut refined = kpi.clone();
            refined.name = refinement.name;
            refined.description = refinement.description;
            refined.refined_by_llm = true;
            refined
        }
        Err(e) => {
            warn!(kpi = %kpi.name, refiner = refiner.name(), error = %e, "KPI refinement failed");
            kpi.clone()
        }
    }
}

/// Refine every KPI. `None` returns the catalogue unchanged.
pub fn refine_kpis(
    kpis: &[KpiDescriptor],
    refiner: Option<&dyn KpiRefiner>,
    context: Option<&str>,
) -> Vec<KpiDescriptor> {
    let Some(refiner) = refiner else {
        return kpis.to_vec();
    };

    let refined: Vec<KpiDescriptor> = kpis
        .iter()
        .map(|kpi| refine_kpi(kpi, refiner, context))
        .collect();
    debug!(
        refiner = refiner.name(),
        total = refined.len(),
        refined = refined.iter().filter(|k| k.refined_by_llm).count(),
        "Refinement finished"
    );
    refined
}
