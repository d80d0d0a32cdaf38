//! Catalogue exporters: JSON, Markdown and a dashboard specification.
//!
//! Exporters are formatters only. SQL and chart types are derived from
//! each descriptor at export time. Quality and insight sections are
//! included when the caller supplies them through [`ReportSections`].

use chrono::Local;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::insights::{Insight, StatisticalSummary};
use crate::kpi::{Category, Difficulty, KpiDescriptor};
use crate::quality::QualityReport;
use crate::render::{suggest_chart_type, SqlTemplater};
use crate::schema::Schema;

/// High-priority insights listed in the Markdown and dashboard summaries.
const SUMMARY_INSIGHTS: usize = 5;

/// Optional report sections exported alongside the catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportSections<'a> {
    pub quality: Option<&'a QualityReport>,
    pub statistics: Option<&'a StatisticalSummary>,
    pub insights: &'a [Insight],
}

impl ReportSections<'_> {
    fn top_insights(&self) -> impl Iterator<Item = &Insight> {
        self.insights
            .iter()
            .filter(|i| i.is_high_priority())
            .take(SUMMARY_INSIGHTS)
    }
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    metadata: JsonMetadata<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_quality: Option<&'a QualityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<&'a StatisticalSummary>,
    #[serde(skip_serializing_if = "no_insights")]
    insights: &'a [Insight],
    kpis: Vec<KpiRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonMetadata<'a> {
    export_date: String,
    table_name: &'a str,
    total_kpis: usize,
    schema: &'a Schema,
}

fn no_insights(insights: &&[Insight]) -> bool {
    insights.is_empty()
}

/// Flat view of a descriptor with its rendered SQL and chart type.
#[derive(Debug, Serialize)]
struct KpiRecord<'a> {
    name: &'a str,
    description: &'a str,
    category: &'static str,
    subcategory: &'static str,
    difficulty: Difficulty,
    columns_used: &'a [String],
    logic: &'a str,
    sql_query: String,
    chart_type: &'static str,
    refined_by_llm: bool,
}

impl<'a> KpiRecord<'a> {
    fn new(kpi: &'a KpiDescriptor, templater: &SqlTemplater) -> Self {
        Self {
            name: &kpi.name,
            description: &kpi.description,
            category: kpi.category().as_str(),
            subcategory: kpi.subcategory(),
            difficulty: kpi.difficulty,
            columns_used: &kpi.columns_used,
            logic: &kpi.logic,
            sql_query: templater.render(kpi),
            chart_type: suggest_chart_type(kpi).as_str(),
            refined_by_llm: kpi.refined_by_llm,
        }
    }
}

/// Export the catalogue and schema as pretty-printed JSON.
pub fn export_json(
    kpis: &[KpiDescriptor],
    schema: &Schema,
    table_name: &str,
    sections: &ReportSections<'_>,
) -> Result<String> {
    let templater = SqlTemplater::with_table(table_name);
    let export = JsonExport {
        metadata: JsonMetadata {
            export_date: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            table_name,
            total_kpis: kpis.len(),
            schema,
        },
        data_quality: sections.quality,
        statistics: sections.statistics,
        insights: sections.insights,
        kpis: kpis
            .iter()
            .map(|kpi| KpiRecord::new(kpi, &templater))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

// =============================================================================
// MARKDOWN
// =============================================================================

/// Group KPIs by category in first-seen order.
fn by_category(kpis: &[KpiDescriptor]) -> IndexMap<Category, Vec<&KpiDescriptor>> {
    let mut groups: IndexMap<Category, Vec<&KpiDescriptor>> = IndexMap::new();
    for kpi in kpis {
        groups.entry(kpi.category()).or_default().push(kpi);
    }
    groups
}

fn markdown_quality(report: &QualityReport, lines: &mut Vec<String>) {
    lines.push("## Data Quality".to_string());
    lines.push(String::new());
    lines.push(format!(
        "**Overall Score:** {:.1}/100 ({})",
        report.overall_score,
        report.grade()
    ));
    lines.push(String::new());
    lines.push("| Dimension | Score |".to_string());
    lines.push("|-----------|-------|".to_string());
    for (dimension, score) in report.dimension_scores() {
        lines.push(format!("| {} | {:.1} |", dimension, score));
    }
    lines.push(String::new());

    if !report.issues.is_empty() {
        lines.push("**Issues:**".to_string());
        lines.push(String::new());
        for issue in &report.issues {
            lines.push(format!("- [{}] {}", issue.severity.label(), issue.message));
        }
        lines.push(String::new());
    }

    lines.push("**Recommendations:**".to_string());
    lines.push(String::new());
    for recommendation in &report.recommendations {
        lines.push(format!("- {}", recommendation));
    }
    lines.push(String::new());
}

fn markdown_insights(insights: &[Insight], lines: &mut Vec<String>) {
    lines.push("## Key Insights".to_string());
    lines.push(String::new());
    for insight in insights {
        lines.push(format!("- **{}:** {}", insight.title, insight.message));
    }
    lines.push(String::new());
}

/// Export the catalogue as a Markdown document, one section per category.
pub fn export_markdown(
    kpis: &[KpiDescriptor],
    table_name: &str,
    dataset_name: &str,
    sections: &ReportSections<'_>,
) -> String {
    let templater = SqlTemplater::with_table(table_name);
    let mut lines = vec![
        format!("# KPI Catalogue – {}", dataset_name),
        String::new(),
        format!(
            "**Export Date:** {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
        format!("**Table Name:** `{}`", table_name),
        format!("**Total KPIs:** {}", kpis.len()),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    if let Some(report) = sections.quality {
        markdown_quality(report, &mut lines);
    }
    if !sections.insights.is_empty() {
        markdown_insights(sections.insights, &mut lines);
    }
    if sections.quality.is_some() || !sections.insights.is_empty() {
        lines.push("---".to_string());
        lines.push(String::new());
    }

    for (category, group) in by_category(kpis) {
        lines.push(format!("## {} KPIs", category.label()));
        lines.push(String::new());

        for (i, kpi) in group.iter().enumerate() {
            let columns = if kpi.columns_used.is_empty() {
                "N/A".to_string()
            } else {
                kpi.columns_used.join(", ")
            };

            lines.push(format!("### {}. {}", i + 1, kpi.name));
            lines.push(String::new());
            lines.push(format!("- **Description:** {}", kpi.description));
            lines.push(format!("- **Category:** {}", category.label()));
            lines.push(format!("- **Difficulty:** {}", kpi.difficulty.label()));
            lines.push(format!("- **Columns Used:** {}", columns));
            lines.push(format!(
                "- **Chart Type:** {}",
                suggest_chart_type(kpi).label()
            ));
            if kpi.refined_by_llm {
                lines.push("- **Refined by LLM:** Yes".to_string());
            }
            lines.push(String::new());
            lines.push("**SQL Query:**".to_string());
            lines.push("```sql".to_string());
            lines.push(templater.render(kpi));
            lines.push("```".to_string());
            lines.push(String::new());
            lines.push("---".to_string());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

// =============================================================================
// DASHBOARD SPEC
// =============================================================================

#[derive(Debug, Serialize)]
struct DashboardSpec<'a> {
    dashboard_name: String,
    version: &'static str,
    created_at: String,
    data_source: DataSource<'a>,
    widgets: Vec<Widget<'a>>,
}

#[derive(Debug, Serialize)]
struct DataSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Widget<'a> {
    Section {
        id: String,
        #[serde(rename = "type")]
        kind: &'static str,
        title: String,
        content: String,
    },
    Kpi {
        id: String,
        #[serde(rename = "type")]
        kind: &'static str,
        title: &'a str,
        description: &'a str,
        sql_query: String,
        columns: &'a [String],
        category: &'static str,
        difficulty: Difficulty,
    },
}

/// Export the catalogue as a dashboard specification for BI tools.
///
/// Each category gets a text section header followed by one widget per
/// KPI; widget ids are numbered across the whole dashboard. A data
/// overview text section leads when quality or insights are supplied.
pub fn export_dashboard_spec(
    kpis: &[KpiDescriptor],
    table_name: &str,
    sections: &ReportSections<'_>,
) -> Result<String> {
    let templater = SqlTemplater::with_table(table_name);
    let mut widgets = Vec::new();
    let mut next_id = 1;

    let mut overview = Vec::new();
    if let Some(report) = sections.quality {
        overview.push(format!(
            "Data quality score: {:.1}/100 ({}).",
            report.overall_score,
            report.grade()
        ));
    }
    overview.extend(sections.top_insights().map(|i| i.message.clone()));
    if !overview.is_empty() {
        widgets.push(Widget::Section {
            id: "section_overview".to_string(),
            kind: "text",
            title: "Data Overview".to_string(),
            content: overview.join(" "),
        });
    }

    for (category, group) in by_category(kpis) {
        widgets.push(Widget::Section {
            id: format!("section_{}", category.as_str()),
            kind: "text",
            title: format!("{} KPIs", category.label()),
            content: format!(
                "This section contains {} KPIs related to {}.",
                group.len(),
                category.as_str()
            ),
        });

        for kpi in group {
            widgets.push(Widget::Kpi {
                id: format!("widget_{}", next_id),
                kind: suggest_chart_type(kpi).widget_type(),
                title: &kpi.name,
                description: &kpi.description,
                sql_query: templater.render(kpi),
                columns: &kpi.columns_used,
                category: category.as_str(),
                difficulty: kpi.difficulty,
            });
            next_id += 1;
        }
    }

    let spec = DashboardSpec {
        dashboard_name: format!("AutoKPI Dashboard - {}", table_name),
        version: "1.0",
        created_at: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        data_source: DataSource {
            kind: "table",
            name: table_name,
        },
        widgets,
    };
    Ok(serde_json::to_string_pretty(&spec)?)
}
