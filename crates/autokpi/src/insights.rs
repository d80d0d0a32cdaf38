//! Statistical summary, correlations and plain-language insights.
//!
//! The summary describes every numeric column and the pairwise Pearson
//! correlations between them. Insights turn the summary, the quality
//! report and the KPI catalogue into short prioritised findings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::input::DataTable;
use crate::kpi::{Category, KpiDescriptor};
use crate::quality::{column_outliers, ColumnOutliers, QualityReport, Severity};
use crate::schema::Schema;
use crate::stats;

/// |r| above this is a strong correlation.
const STRONG_CORRELATION: f64 = 0.7;
/// |r| above this is a moderate correlation.
const MODERATE_CORRELATION: f64 = 0.5;
/// Coefficient of variation, in percent, that counts as high variability.
const HIGH_VARIATION: f64 = 100.0;
/// |skewness| above this counts as a skewed distribution.
const SKEW_THRESHOLD: f64 = 1.0;
/// Outlier share, in percent, worth an insight.
const OUTLIER_SHARE: f64 = 5.0;
/// Share of rows, in percent, held by the top category of an imbalanced column.
const IMBALANCE_SHARE: f64 = 80.0;
/// Numeric columns examined for distribution shape.
const DISTRIBUTION_COLUMNS: usize = 3;
/// Priority from which an insight is shown first.
const HIGH_PRIORITY: u8 = 7;

const REVENUE_HINTS: &[&str] = &["amount", "revenue", "price", "sales", "income"];
const CUSTOMER_HINTS: &[&str] = &["user", "customer"];

// =============================================================================
// CORRELATIONS
// =============================================================================

/// Symmetric matrix of pairwise Pearson correlations.
///
/// Each pair uses the rows where both columns have a value. Cells are
/// `None` when fewer than two such rows exist or either side is constant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Correlation between two columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }

    /// Defined correlations above the diagonal, row by row.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.columns.iter().enumerate().flat_map(move |(i, a)| {
            self.columns[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, b)| {
                    self.values[i][i + 1 + offset].map(|r| (a.as_str(), b.as_str(), r))
                })
        })
    }
}

/// Pearson correlations between `columns`; empty with fewer than two.
pub fn calculate_correlations(table: &DataTable, columns: &[String]) -> Result<CorrelationMatrix> {
    if columns.len() < 2 {
        return Ok(CorrelationMatrix::default());
    }

    let series = columns
        .iter()
        .map(|c| table.numeric_column(c))
        .collect::<Result<Vec<_>>>()?;

    let mut values = vec![vec![None; columns.len()]; columns.len()];
    for i in 0..columns.len() {
        for j in i..columns.len() {
            let (xs, ys): (Vec<f64>, Vec<f64>) = series[i]
                .iter()
                .zip(&series[j])
                .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                .unzip();
            let r = stats::pearson(&xs, &ys).ok();
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}

// =============================================================================
// STATISTICAL SUMMARY
// =============================================================================

/// Descriptive statistics of one numeric column; `None` when undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub column: String,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub null_count: usize,
    pub null_percentage: f64,
    pub skewness: Option<f64>,
    /// Excess kurtosis.
    pub kurtosis: Option<f64>,
    pub iqr: Option<f64>,
    pub outliers: ColumnOutliers,
}

impl NumericStats {
    fn of(column: &str, values: &[Option<f64>]) -> Self {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let null_count = values.len() - present.len();
        let iqr = match (
            stats::quantile(&present, 0.25),
            stats::quantile(&present, 0.75),
        ) {
            (Ok(q1), Ok(q3)) => Some(q3 - q1),
            _ => None,
        };

        Self {
            column: column.to_string(),
            mean: stats::mean(&present).ok(),
            median: stats::median(&present).ok(),
            std: stats::sample_std(&present).ok(),
            min: present.iter().copied().reduce(f64::min),
            max: present.iter().copied().reduce(f64::max),
            null_count,
            null_percentage: if values.is_empty() {
                0.0
            } else {
                null_count as f64 * 100.0 / values.len() as f64
            },
            skewness: stats::skewness(&present).ok(),
            kurtosis: stats::excess_kurtosis(&present).ok(),
            iqr,
            outliers: column_outliers(column, &present),
        }
    }

    /// Coefficient of variation in percent; zero for a zero mean.
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        let (mean, std) = (self.mean?, self.std?);
        Some(if mean == 0.0 { 0.0 } else { std / mean * 100.0 })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    /// One entry per numeric column, in schema order.
    pub numeric: Vec<NumericStats>,
    pub correlations: CorrelationMatrix,
}

impl StatisticalSummary {
    pub fn column(&self, name: &str) -> Option<&NumericStats> {
        self.numeric.iter().find(|numeric| numeric.column == name)
    }
}

/// Describe every numeric column and correlate them pairwise.
pub fn generate_statistical_summary(table: &DataTable, schema: &Schema) -> Result<StatisticalSummary> {
    let mut numeric = Vec::with_capacity(schema.numeric_columns.len());
    for column in &schema.numeric_columns {
        numeric.push(NumericStats::of(column, &table.numeric_column(column)?));
    }

    Ok(StatisticalSummary {
        total_rows: table.row_count(),
        total_columns: table.column_count(),
        numeric,
        correlations: calculate_correlations(table, &schema.numeric_columns)?,
    })
}

// =============================================================================
// INSIGHTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Quality,
    Statistical,
    DataQuality,
    Kpi,
    Business,
}

/// A short finding about the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// Topic, e.g. `correlation` or `completeness`.
    pub category: String,
    pub title: String,
    pub message: String,
    /// Higher comes first, 1 to 10.
    pub priority: u8,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implication: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl Insight {
    fn new(
        kind: InsightKind,
        category: &str,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: u8,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            category: category.to_string(),
            title: title.into(),
            message: message.into(),
            priority,
            severity,
            metric_value: None,
            implication: None,
            recommendations: Vec::new(),
        }
    }

    fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric_value = Some(metric.into());
        self
    }

    fn with_implication(mut self, implication: impl Into<String>) -> Self {
        self.implication = Some(implication.into());
        self
    }

    fn with_recommendations<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.recommendations = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority >= HIGH_PRIORITY
    }
}

/// Derive insights, highest priority first; ties keep generation order.
pub fn generate_insights(
    table: &DataTable,
    schema: &Schema,
    kpis: &[KpiDescriptor],
    quality: Option<&QualityReport>,
    summary: &StatisticalSummary,
) -> Result<Vec<Insight>> {
    let mut insights = Vec::new();

    if let Some(report) = quality {
        insights.extend(quality_insights(report));
    }
    insights.extend(variability_insights(summary));
    insights.extend(correlation_insights(&summary.correlations));
    insights.extend(distribution_insights(summary));
    insights.extend(outlier_insights(summary));
    insights.extend(categorical_insights(table, schema)?);
    insights.extend(kpi_insights(kpis));
    insights.extend(business_insights(schema));

    insights.sort_by(|a, b| b.priority.cmp(&a.priority));
    debug!(count = insights.len(), "Insights generated");
    Ok(insights)
}

fn quality_insights(report: &QualityReport) -> Vec<Insight> {
    let mut insights = Vec::new();
    let score = report.overall_score;

    if score < 70.0 {
        insights.push(
            Insight::new(
                InsightKind::Quality,
                "data_quality",
                "Data Quality Alert",
                format!(
                    "Overall data quality score is {:.1}/100. Review quality issues before proceeding with analysis.",
                    score
                ),
                9,
                if score < 50.0 {
                    Severity::High
                } else {
                    Severity::Medium
                },
            )
            .with_recommendations(report.recommendations.iter().cloned()),
        );
    }

    let missing = &report.completeness.problematic_columns;
    if !missing.is_empty() {
        let details: Vec<String> = report
            .completeness
            .columns
            .iter()
            .filter(|c| missing.contains(&c.column))
            .take(5)
            .map(|c| format!("{}: {:.1}% missing", c.column, c.percentage))
            .collect();
        insights.push(
            Insight::new(
                InsightKind::Quality,
                "completeness",
                "Missing Values Detected",
                format!(
                    "{} columns have significant missing values (>10%). Consider data imputation strategies.",
                    missing.len()
                ),
                7,
                Severity::Medium,
            )
            .with_metric(details.join(", ")),
        );
    }

    let duplicates = report.uniqueness.duplicate_rows;
    if duplicates > 0 {
        insights.push(Insight::new(
            InsightKind::Quality,
            "uniqueness",
            "Duplicate Rows Found",
            format!(
                "{} duplicate rows detected. Consider removing duplicates to improve data quality.",
                duplicates
            ),
            6,
            Severity::Medium,
        ));
    }

    insights
}

fn variability_insights(summary: &StatisticalSummary) -> Vec<Insight> {
    summary
        .numeric
        .iter()
        .filter_map(|numeric| {
            let cv = numeric.coefficient_of_variation()?;
            (cv > HIGH_VARIATION).then(|| {
                Insight::new(
                    InsightKind::Statistical,
                    "variability",
                    format!("High Variability in {}", numeric.column),
                    format!(
                        "{} shows high variability (CV: {:.1}%), indicating wide spread in values. Consider segmenting analysis.",
                        numeric.column, cv
                    ),
                    5,
                    Severity::Low,
                )
                .with_metric(format!("CV: {:.1}%", cv))
            })
        })
        .collect()
}

fn direction(r: f64) -> &'static str {
    if r > 0.0 { "positive" } else { "negative" }
}

fn correlation_insights(matrix: &CorrelationMatrix) -> Vec<Insight> {
    let mut insights = Vec::new();

    for (a, b, r) in matrix.pairs() {
        if r.abs() > STRONG_CORRELATION {
            insights.push(
                Insight::new(
                    InsightKind::Statistical,
                    "correlation",
                    format!("Strong Correlation: {} ↔ {}", a, b),
                    format!(
                        "Strong {} correlation ({:.2}) between {} and {}. These variables move together.",
                        direction(r),
                        r,
                        a,
                        b
                    ),
                    7,
                    Severity::Medium,
                )
                .with_metric(format!("r = {:.2}", r))
                .with_implication("Consider multivariate analysis or dimension reduction techniques."),
            );
        } else if r.abs() > MODERATE_CORRELATION {
            insights.push(
                Insight::new(
                    InsightKind::Statistical,
                    "correlation",
                    format!("Moderate Correlation: {} ↔ {}", a, b),
                    format!("Moderate {} correlation ({:.2}) detected.", direction(r), r),
                    4,
                    Severity::Low,
                )
                .with_metric(format!("r = {:.2}", r)),
            );
        }
    }

    insights
}

fn distribution_insights(summary: &StatisticalSummary) -> Vec<Insight> {
    summary
        .numeric
        .iter()
        .take(DISTRIBUTION_COLUMNS)
        .filter_map(|numeric| {
            let skew = numeric.skewness?;
            (skew.abs() > SKEW_THRESHOLD).then(|| {
                Insight::new(
                    InsightKind::Statistical,
                    "distribution",
                    format!("{} Distribution Analysis", numeric.column),
                    format!(
                        "{} is {} skewed (skewness: {:.2}), indicating non-normal distribution.",
                        numeric.column,
                        if skew > 0.0 { "positively" } else { "negatively" },
                        skew
                    ),
                    5,
                    Severity::Low,
                )
                .with_metric(format!("Skewness: {:.2}", skew))
                .with_implication("Consider log transformation or non-parametric tests for analysis.")
            })
        })
        .collect()
}

fn outlier_insights(summary: &StatisticalSummary) -> Vec<Insight> {
    summary
        .numeric
        .iter()
        .map(|numeric| &numeric.outliers)
        .filter(|o| o.outlier_percentage > OUTLIER_SHARE)
        .map(|o| {
            Insight::new(
                InsightKind::DataQuality,
                "outliers",
                format!("Outliers Detected in {}", o.column),
                format!(
                    "{} contains {:.1}% outliers ({} values). Review for data entry errors.",
                    o.column, o.outlier_percentage, o.total_outliers
                ),
                6,
                Severity::Medium,
            )
            .with_metric(format!(
                "{} outliers ({:.1}%)",
                o.total_outliers, o.outlier_percentage
            ))
            .with_recommendations([
                "Review outlier values for data entry errors",
                "Consider outlier treatment (removal, winsorization, or separate analysis)",
            ])
        })
        .collect()
}

fn categorical_insights(table: &DataTable, schema: &Schema) -> Result<Vec<Insight>> {
    let mut insights = Vec::new();
    let rows = table.row_count();
    if rows == 0 {
        return Ok(insights);
    }

    for column in &schema.categorical_columns {
        let idx = table.require_column(column)?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in table.non_null_values(idx) {
            *counts.entry(value).or_default() += 1;
        }
        let top = counts.values().copied().max().unwrap_or(0);
        let share = top as f64 * 100.0 / rows as f64;

        if share > IMBALANCE_SHARE {
            insights.push(
                Insight::new(
                    InsightKind::Statistical,
                    "distribution",
                    format!("Imbalanced Categories in {}", column),
                    format!(
                        "{} is highly imbalanced - top category represents {:.1}% of data.",
                        column, share
                    ),
                    4,
                    Severity::Low,
                )
                .with_metric(format!("Top category: {:.1}%", share))
                .with_implication(
                    "Consider stratified sampling or separate analysis for minority categories.",
                ),
            );
        }
    }

    Ok(insights)
}

fn kpi_insights(kpis: &[KpiDescriptor]) -> Vec<Insight> {
    let mut insights = Vec::new();
    let count_of = |category: Category| kpis.iter().filter(|k| k.category() == category).count();

    if count_of(Category::Aggregation) > 0 {
        let mut categories: Vec<Category> = kpis.iter().map(KpiDescriptor::category).collect();
        categories.sort_by_key(|c| c.as_str());
        categories.dedup();
        insights.push(
            Insight::new(
                InsightKind::Kpi,
                "summary",
                "KPI Summary",
                format!(
                    "Generated {} KPIs across {} categories. Review aggregation KPIs for key metrics.",
                    kpis.len(),
                    categories.len()
                ),
                5,
                Severity::Low,
            )
            .with_metric(format!("{} total KPIs", kpis.len())),
        );
    }

    let time_series = count_of(Category::TimeSeries);
    if time_series > 0 {
        insights.push(Insight::new(
            InsightKind::Kpi,
            "time_series",
            "Time Series Analysis Available",
            format!(
                "{} time-series KPIs generated. Analyze trends and patterns over time.",
                time_series
            ),
            7,
            Severity::Medium,
        ));
    }

    insights
}

fn mentions_any(name: &str, hints: &[&str]) -> bool {
    let lowered = name.to_lowercase();
    hints.iter().any(|hint| lowered.contains(hint))
}

fn business_insights(schema: &Schema) -> Vec<Insight> {
    let mut insights = Vec::new();

    let revenue: Vec<&str> = schema
        .numeric_columns
        .iter()
        .filter(|c| mentions_any(c, REVENUE_HINTS))
        .map(String::as_str)
        .collect();
    if !revenue.is_empty() && !schema.datetime_columns.is_empty() {
        insights.push(
            Insight::new(
                InsightKind::Business,
                "revenue",
                "Revenue Analysis Recommended",
                format!(
                    "Revenue-related columns detected: {}. Consider revenue trend analysis and forecasting.",
                    revenue.join(", ")
                ),
                8,
                Severity::High,
            )
            .with_recommendations([
                "Analyze revenue trends over time",
                "Identify peak revenue periods",
                "Forecast future revenue",
                "Segment revenue by categories",
            ]),
        );
    }

    if schema.id_columns.iter().any(|c| mentions_any(c, CUSTOMER_HINTS)) {
        insights.push(
            Insight::new(
                InsightKind::Business,
                "customers",
                "Customer Analysis Opportunity",
                "Customer/user identifiers detected. Consider customer segmentation, retention, and lifetime value analysis.",
                7,
                Severity::Medium,
            )
            .with_recommendations([
                "Customer segmentation analysis",
                "Retention rate calculation",
                "Customer lifetime value (CLV)",
                "Cohort analysis",
            ]),
        );
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_schema;
    use crate::kpi::generate_kpis;
    use crate::quality::check_data_quality;

    fn table(columns: Vec<(&str, Vec<String>)>) -> DataTable {
        DataTable::from_columns(columns).unwrap()
    }

    fn series(values: impl IntoIterator<Item = f64>) -> Vec<String> {
        values.into_iter().map(|v| format!("{:.2}", v)).collect()
    }

    fn titles(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_correlations_use_complete_pairs() {
        let t = table(vec![
            ("price", series([1.5, 2.5, 3.5, 4.5, 5.5])),
            ("revenue", series([3.0, 5.0, 7.0, 9.0, 11.0])),
            (
                "discount",
                vec!["9.5", "", "5.5", "3.5", "1.5"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
        ]);
        let columns: Vec<String> = t.headers.clone();
        let matrix = calculate_correlations(&t, &columns).unwrap();

        assert!((matrix.get("price", "revenue").unwrap() - 1.0).abs() < 1e-9);
        assert!((matrix.get("revenue", "price").unwrap() - 1.0).abs() < 1e-9);
        assert!((matrix.get("price", "discount").unwrap() + 1.0).abs() < 1e-9);
        assert_eq!(matrix.pairs().count(), 3);
    }

    #[test]
    fn test_constant_column_has_no_correlation() {
        let t = table(vec![
            ("price", series([1.5, 2.5, 3.5])),
            ("fee", series([2.0, 2.0, 2.0])),
        ]);
        let matrix = calculate_correlations(&t, &t.headers.clone()).unwrap();

        assert_eq!(matrix.get("price", "fee"), None);
        assert_eq!(matrix.pairs().count(), 0);
        assert!(calculate_correlations(&t, &["price".to_string()])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_statistical_summary() {
        let t = table(vec![(
            "price",
            vec!["1.5", "2.5", "", "4.5"].into_iter().map(String::from).collect(),
        )]);
        let summary = generate_statistical_summary(&t, &infer_schema(&t)).unwrap();
        let price = summary.column("price").unwrap();

        assert_eq!(summary.total_rows, 4);
        assert_eq!(price.null_count, 1);
        assert_eq!(price.null_percentage, 25.0);
        assert!((price.mean.unwrap() - 17.0 / 6.0).abs() < 1e-9);
        assert_eq!(price.median, Some(2.5));
        assert_eq!(price.min, Some(1.5));
        assert_eq!(price.max, Some(4.5));
        assert!(summary.correlations.is_empty());
    }

    #[test]
    fn test_correlation_insights_by_strength() {
        let t = table(vec![
            ("price", series([1.0, 2.0, 3.0, 4.0, 5.0, 6.0])),
            ("revenue", series([2.1, 3.9, 6.2, 7.8, 10.1, 12.0])),
            ("weight", series([1.0, 3.0, 2.0, 5.0, 3.0, 4.0])),
        ]);
        let schema = infer_schema(&t);
        let summary = generate_statistical_summary(&t, &schema).unwrap();
        let insights = generate_insights(&t, &schema, &[], None, &summary).unwrap();
        let titles = titles(&insights);

        assert!(titles.contains(&"Strong Correlation: price ↔ revenue"));
        assert!(titles.contains(&"Moderate Correlation: price ↔ weight"));
        let strong = insights
            .iter()
            .find(|i| i.title.starts_with("Strong"))
            .unwrap();
        assert_eq!(strong.priority, 7);
        assert!(strong.message.starts_with("Strong positive correlation (1.00)"));
    }

    #[test]
    fn test_skew_variability_and_outliers() {
        let mut values = vec![1.0; 19];
        values.push(400.0);
        let t = table(vec![("amount", series(values))]);
        let schema = infer_schema(&t);
        let summary = generate_statistical_summary(&t, &schema).unwrap();
        let insights = generate_insights(&t, &schema, &[], None, &summary).unwrap();
        let titles = titles(&insights);

        assert!(titles.contains(&"High Variability in amount"));
        assert!(titles.contains(&"amount Distribution Analysis"));
        // One outlier in twenty is exactly 5%.
        assert!(!titles.contains(&"Outliers Detected in amount"));
    }

    #[test]
    fn test_imbalanced_category() {
        let mut status = vec!["paid".to_string(); 9];
        status.push("refunded".to_string());
        let t = table(vec![("status", status)]);
        let schema = infer_schema(&t);
        let insights =
            generate_insights(&t, &schema, &[], None, &StatisticalSummary::default()).unwrap();

        assert_eq!(titles(&insights), vec!["Imbalanced Categories in status"]);
        assert_eq!(insights[0].metric_value.as_deref(), Some("Top category: 90.0%"));
    }

    #[test]
    fn test_insights_sorted_by_priority() {
        let dates: Vec<String> = (1..=20).map(|d| format!("2024-03-{:02}", d)).collect();
        let amounts = series((0..20).map(|i| (i % 7) as f64 * 3.5 + 1.0));
        let customers: Vec<String> = (1..=20).map(|i| i.to_string()).collect();
        let t = table(vec![
            ("customer_id", customers),
            ("order_date", dates),
            ("amount", amounts),
        ]);
        let schema = infer_schema(&t);
        let kpis = generate_kpis(&schema, &t).unwrap();
        let quality = check_data_quality(&t, &schema).unwrap();
        let summary = generate_statistical_summary(&t, &schema).unwrap();
        let insights = generate_insights(&t, &schema, &kpis, Some(&quality), &summary).unwrap();

        assert_eq!(insights[0].title, "Revenue Analysis Recommended");
        assert_eq!(insights[0].severity, Severity::High);
        assert!(insights.windows(2).all(|w| w[0].priority >= w[1].priority));
        // Equal priorities keep generation order.
        let sevens: Vec<&str> = insights
            .iter()
            .filter(|i| i.priority == 7)
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(
            sevens,
            vec!["Time Series Analysis Available", "Customer Analysis Opportunity"]
        );
        assert!(insights.iter().any(|i| i.title == "KPI Summary"));
        assert!(insights.iter().all(|i| i.kind != InsightKind::Quality));
    }

    #[test]
    fn test_poor_quality_leads() {
        let blank = vec![String::new(); 4];
        let t = table(vec![
            ("user_id", vec!["1".to_string(); 4]),
            ("note_a", blank.clone()),
            ("note_b", blank.clone()),
            ("note_c", blank.clone()),
            ("note_d", blank),
        ]);
        let schema = infer_schema(&t);
        let quality = check_data_quality(&t, &schema).unwrap();
        let insights = generate_insights(
            &t,
            &schema,
            &[],
            Some(&quality),
            &StatisticalSummary::default(),
        )
        .unwrap();

        assert_eq!(insights[0].title, "Data Quality Alert");
        assert_eq!(insights[0].severity, Severity::Medium);
        assert_eq!(insights[0].recommendations, quality.recommendations);
        assert!(titles(&insights).contains(&"Missing Values Detected"));
        assert!(titles(&insights).contains(&"Duplicate Rows Found"));
    }
}
