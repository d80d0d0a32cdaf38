//! Mock refiner for testing.

use crate::kpi::KpiDescriptor;

use super::prompts::parse_refinement;
use super::provider::{KpiRefiner, RefineError, Refinement};

/// Mock refiner that answers with predictable wording.
///
/// Responses go through the same line parser a real backend uses.
pub struct MockRefiner {
    fail: bool,
}

impl MockRefiner {
    /// Create a mock that prefixes names with `Refined`.
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// Create a mock whose every request fails.
    pub fn failing() -> Self {
        Self { fail: true }
    }

    fn respond(&self, kpi: &KpiDescriptor, context: Option<&str>) -> String {
        let suffix = context
            .map(|c| format!(" Context: {}.", c))
            .unwrap_or_default();
        format!(
            "NAME: Refined {}\nDESCRIPTION: {}{}",
            kpi.name, kpi.description, suffix
        )
    }
}

impl Default for MockRefiner {
    fn default() -> Self {
        Self::new()
    }
}

impl KpiRefiner for MockRefiner {
    fn name(&self) -> &str {
        "mock"
    }

    fn refine(
        &self,
        kpi: &KpiDescriptor,
        context: Option<&str>,
    ) -> std::result::Result<Refinement, RefineError> {
        if self.fail {
            return Err(RefineError::Request("mock refiner configured to fail".to_string()));
        }
        parse_refinement(&self.respond(kpi, context), kpi)
    }
}
