//! Main AutoKpi struct and public API.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::export::{export_dashboard_spec, export_json, export_markdown, ReportSections};
use crate::inference::infer_schema;
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::insights::{generate_insights, generate_statistical_summary, Insight, StatisticalSummary};
use crate::kpi::{EngineConfig, KpiDescriptor, KpiEngine};
use crate::quality::{check_data_quality, QualityReport};
use crate::refine::{refine_kpis, KpiRefiner};
use crate::render::SqlTemplater;
use crate::schema::{summarize_schema, Schema, SchemaSummary};

/// Configuration for AutoKpi analysis.
#[derive(Debug, Clone, Default)]
pub struct AutoKpiConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// KPI engine configuration.
    pub engine: EngineConfig,
    /// Maximum rows to analyze (None = all). Overrides `parser.max_rows`.
    pub max_rows: Option<usize>,
    /// Free-text description of the dataset, passed to the refiner.
    pub context: Option<String>,
}

/// Result of analyzing a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file, when the table came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Inferred column roles.
    pub schema: Schema,
    /// Per-role column summaries.
    pub summary: SchemaSummary,
    /// Deduplicated KPI catalogue.
    pub kpis: Vec<KpiDescriptor>,
    /// Weighted data quality assessment.
    pub quality: QualityReport,
    /// Numeric column statistics and correlations.
    pub statistics: StatisticalSummary,
    /// Findings about the data, highest priority first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<Insight>,
    /// Non-fatal problems met while generating KPIs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Table name used when rendering SQL.
    pub table_name: String,
}

impl AnalysisResult {
    /// Name used for the dataset in reports: the source file stem, or the
    /// table name.
    pub fn dataset_name(&self) -> String {
        self.source
            .as_ref()
            .map(SourceMetadata::stem)
            .unwrap_or_else(|| self.table_name.clone())
    }

    /// `(KPI name, SQL)` pairs in catalogue order.
    pub fn sql_queries(&self) -> Vec<(String, String)> {
        SqlTemplater::with_table(&self.table_name)
            .render_all(&self.kpis)
            .into_iter()
            .collect()
    }

    fn sections(&self) -> ReportSections<'_> {
        ReportSections {
            quality: Some(&self.quality),
            statistics: Some(&self.statistics),
            insights: &self.insights,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        export_json(&self.kpis, &self.schema, &self.table_name, &self.sections())
    }

    pub fn to_markdown(&self) -> String {
        export_markdown(
            &self.kpis,
            &self.table_name,
            &self.dataset_name(),
            &self.sections(),
        )
    }

    pub fn to_dashboard_spec(&self) -> Result<String> {
        export_dashboard_spec(&self.kpis, &self.table_name, &self.sections())
    }
}

/// The main AutoKpi analysis engine.
pub struct AutoKpi {
    config: AutoKpiConfig,
    parser: Parser,
    engine: KpiEngine,
    refiner: Option<Arc<dyn KpiRefiner>>,
}

impl AutoKpi {
    /// Create a new AutoKpi instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(AutoKpiConfig::default())
    }

    /// Create an AutoKpi instance with custom configuration.
    pub fn with_config(config: AutoKpiConfig) -> Self {
        let mut parser_config = config.parser.clone();
        if config.max_rows.is_some() {
            parser_config.max_rows = config.max_rows;
        }
        let parser = Parser::with_config(parser_config);
        let engine = KpiEngine::with_config(config.engine.clone());

        Self {
            config,
            parser,
            engine,
            refiner: None,
        }
    }

    /// Add a refiner that rewords every generated KPI.
    pub fn with_refiner(mut self, refiner: impl KpiRefiner + 'static) -> Self {
        self.refiner = Some(Arc::new(refiner));
        self
    }

    /// Set the dataset description passed to the refiner.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.config.context = Some(context.into());
        self
    }

    /// Parse a delimited file and analyze it.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (table, source) = self.parser.parse_file(path)?;
        let mut result = self.analyze_table(&table)?;
        result.source = Some(source);
        Ok(result)
    }

    /// Analyze an in-memory table.
    pub fn analyze_table(&self, table: &DataTable) -> Result<AnalysisResult> {
        let schema = infer_schema(table);
        let summary = summarize_schema(table, &schema)?;
        let catalogue = self.engine.generate(&schema, table)?;

        let kpis = match self.refiner.as_deref() {
            Some(refiner) => refine_kpis(
                &catalogue.kpis,
                Some(refiner),
                self.config.context.as_deref(),
            ),
            None => catalogue.kpis,
        };

        let quality = check_data_quality(table, &schema)?;
        let statistics = generate_statistical_summary(table, &schema)?;
        let insights = generate_insights(table, &schema, &kpis, Some(&quality), &statistics)?;

        debug!(
            columns = schema.column_count(),
            kpis = kpis.len(),
            warnings = catalogue.warnings.len(),
            quality = quality.overall_score,
            insights = insights.len(),
            "Analysis finished"
        );

        Ok(AnalysisResult {
            source: None,
            schema,
            summary,
            kpis,
            quality,
            statistics,
            insights,
            warnings: catalogue.warnings,
            table_name: self.engine.config().table_name.clone(),
        })
    }
}

impl Default for AutoKpi {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine::MockRefiner;

    fn table() -> DataTable {
        DataTable::from_columns(vec![
            (
                "region",
                vec!["north", "south", "north", "south", "north", "east", "east", "north"],
            ),
            ("amount", vec!["10", "20", "10", "30", "20", "10", "40", "10"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_analyze_table() {
        let result = AutoKpi::new().analyze_table(&table()).unwrap();

        assert_eq!(result.schema.categorical_columns, vec!["region"]);
        assert_eq!(result.schema.numeric_columns, vec!["amount"]);
        assert_eq!(result.summary.total_rows, 8);
        assert!(result.kpis.iter().any(|k| k.name == "Total Amount"));
        assert_eq!(result.table_name, "your_table");
        assert_eq!(result.dataset_name(), "your_table");
    }

    #[test]
    fn test_table_name_flows_into_sql() {
        let config = AutoKpiConfig {
            engine: EngineConfig {
                table_name: "sales".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = AutoKpi::with_config(config).analyze_table(&table()).unwrap();
        let (name, sql) = &result.sql_queries()[0];

        assert_eq!(name, "Total Amount");
        assert!(sql.contains("FROM sales"));
    }

    #[test]
    fn test_quality_and_insights_are_attached() {
        let result = AutoKpi::new().analyze_table(&table()).unwrap();

        // ("north", "10") appears three times.
        assert_eq!(result.quality.uniqueness.duplicate_rows, 2);
        assert_eq!(result.quality.completeness.score, 100.0);
        assert_eq!(result.statistics.numeric[0].column, "amount");
        assert!(result.insights.iter().any(|i| i.title == "KPI Summary"));

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["data_quality"]["overall_score"], result.quality.overall_score);
        assert!(result.to_markdown().contains("## Data Quality"));
    }

    #[test]
    fn test_refiner_is_applied() {
        let result = AutoKpi::new()
            .with_refiner(MockRefiner::new())
            .analyze_table(&table())
            .unwrap();
        assert!(result.kpis.iter().all(|k| k.refined_by_llm));
        assert!(result.to_markdown().contains("Refined by LLM:** Yes"));
    }
}
