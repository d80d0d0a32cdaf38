//! Rule engine that runs every KPI family and merges their output.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::input::DataTable;
use crate::schema::Schema;

use super::creative::creative_kpis;
use super::descriptor::KpiDescriptor;
use super::rules::{
    aggregation_kpis, category_breakdown_kpis, conversion_kpis, statistical_kpis,
    time_series_kpis,
};

/// A rule family: a pure function of schema and table.
type RuleFamily = fn(&Schema, &DataTable) -> Result<Vec<KpiDescriptor>>;

/// Core families in catalogue order.
const CORE_FAMILIES: &[(&str, RuleFamily)] = &[
    ("aggregation", aggregation_kpis),
    ("time_series", time_series_kpis),
    ("category_breakdown", category_breakdown_kpis),
    ("conversion", conversion_kpis),
    ("statistical", statistical_kpis),
];

/// Configuration for KPI generation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Run the pattern-based families after the core ones.
    pub creative: bool,
    /// Table name used by downstream SQL rendering.
    pub table_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            creative: true,
            table_name: "your_table".to_string(),
        }
    }
}

/// Deduplicated KPI list plus any non-fatal problems met on the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KpiCatalogue {
    pub kpis: Vec<KpiDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl KpiCatalogue {
    pub fn len(&self) -> usize {
        self.kpis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty()
    }
}

/// Engine that turns a schema into a KPI catalogue.
pub struct KpiEngine {
    config: EngineConfig,
}

impl KpiEngine {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every family in order and drop later KPIs whose name was
    /// already emitted.
    ///
    /// Errors from the core families propagate. A failure in the creative
    /// families is logged and recorded in [`KpiCatalogue::warnings`]; the
    /// core KPIs are still returned.
    pub fn generate(&self, schema: &Schema, table: &DataTable) -> Result<KpiCatalogue> {
        let mut kpis = Vec::new();
        let mut warnings = Vec::new();

        for (family, rule) in CORE_FAMILIES {
            let emitted = rule(schema, table)?;
            debug!(family = %family, count = emitted.len(), "Rule family finished");
            kpis.extend(emitted);
        }

        if self.config.creative {
            match creative_kpis(schema, table) {
                Ok(emitted) => {
                    debug!(family = "creative", count = emitted.len(), "Rule family finished");
                    kpis.extend(emitted);
                }
                Err(e) => {
                    warn!(error = %e, "Creative KPI generation failed; continuing without it");
                    warnings.push(format!("Creative KPI generation failed: {}", e));
                }
            }
        }

        let generated = kpis.len();
        let kpis = dedup_by_name(kpis);
        debug!(
            generated,
            kept = kpis.len(),
            "Deduplicated KPI catalogue"
        );

        Ok(KpiCatalogue { kpis, warnings })
    }
}

impl Default for KpiEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first KPI for each name, preserving order.
pub fn dedup_by_name(kpis: Vec<KpiDescriptor>) -> Vec<KpiDescriptor> {
    let mut seen = HashSet::new();
    kpis.into_iter()
        .filter(|kpi| seen.insert(kpi.name.clone()))
        .collect()
}

/// Generate the deduplicated KPI list with the default engine.
pub fn generate_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    KpiEngine::new().generate(schema, table).map(|c| c.kpis)
}
