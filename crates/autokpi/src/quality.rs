//! Data quality scoring.
//!
//! A [`QualityReport`] rates a table on five dimensions, each scored from
//! 0 to 100, and folds them into a weighted overall score:
//!
//! | Dimension    | Weight | Measures                                   |
//! |--------------|--------|--------------------------------------------|
//! | completeness | 0.25   | share of non-missing cells                 |
//! | uniqueness   | 0.15   | share of rows that are not repeats         |
//! | consistency  | 0.20   | type and format problems, 10 points each   |
//! | validity     | 0.20   | range problems, 15 points each             |
//! | accuracy     | 0.20   | IQR outliers, half a point per percent     |

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::inference::coerce_datetime;
use crate::input::DataTable;
use crate::schema::Schema;
use crate::stats;

const COMPLETENESS_WEIGHT: f64 = 0.25;
const UNIQUENESS_WEIGHT: f64 = 0.15;
const CONSISTENCY_WEIGHT: f64 = 0.20;
const VALIDITY_WEIGHT: f64 = 0.20;
const ACCURACY_WEIGHT: f64 = 0.20;

/// Columns missing more than this percentage are flagged.
const MISSING_THRESHOLD: f64 = 10.0;
/// Columns missing more than this percentage are a high-severity issue.
const MISSING_SEVERE: f64 = 50.0;
const CONSISTENCY_PENALTY: f64 = 10.0;
const VALIDITY_PENALTY: f64 = 15.0;
/// Accuracy points lost per percent of outlying values.
const OUTLIER_PENALTY: f64 = 0.5;
/// Per-column outlier share, in percent, reported as an issue.
const OUTLIER_ISSUE_SHARE: f64 = 5.0;
/// Overall outlier share, in percent, that earns a recommendation.
const OUTLIER_RECOMMEND_SHARE: f64 = 10.0;
/// Overall scores below this earn a cleaning recommendation.
const ACCEPTABLE_SCORE: f64 = 70.0;
const IQR_FENCE: f64 = 1.5;
/// Name fragments of measures that should never be negative.
const NON_NEGATIVE_HINTS: &[&str] = &["count", "quantity", "amount", "price", "revenue"];

/// Round to two decimals for reporting.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// How serious a quality problem or insight is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

/// Full quality assessment of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Weighted mean of the five dimension scores, 0 to 100.
    pub overall_score: f64,
    pub completeness: Completeness,
    pub uniqueness: Uniqueness,
    pub consistency: Consistency,
    pub validity: Validity,
    pub accuracy: Accuracy,
    pub issues: Vec<QualityIssue>,
    pub recommendations: Vec<String>,
}

impl QualityReport {
    /// `(dimension, score)` pairs in reporting order.
    pub fn dimension_scores(&self) -> [(&'static str, f64); 5] {
        [
            ("completeness", self.completeness.score),
            ("uniqueness", self.uniqueness.score),
            ("consistency", self.consistency.score),
            ("validity", self.validity.score),
            ("accuracy", self.accuracy.score),
        ]
    }

    /// Verbal grade of the overall score.
    pub fn grade(&self) -> &'static str {
        match self.overall_score {
            s if s >= 90.0 => "Excellent",
            s if s >= 75.0 => "Good",
            s if s >= 60.0 => "Fair",
            _ => "Needs Attention",
        }
    }
}

/// Missing-value share of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completeness {
    pub score: f64,
    pub total_cells: usize,
    pub missing_cells: usize,
    pub missing_percentage: f64,
    /// Every column, in table order.
    pub columns: Vec<ColumnMissing>,
    /// Columns missing more than 10% of their values.
    pub problematic_columns: Vec<String>,
}

/// Repeated values in an identifier column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateIds {
    pub column: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uniqueness {
    pub score: f64,
    /// Rows identical to an earlier row.
    pub duplicate_rows: usize,
    pub duplicate_percentage: f64,
    pub duplicate_ids: Vec<DuplicateIds>,
    pub unique_rows: usize,
}

/// A problem found in a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProblem {
    pub column: String,
    pub kind: ProblemKind,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Cells of a numeric column that do not parse as numbers.
    NonNumericValues,
    /// Cells of a datetime column that do not parse as timestamps.
    InvalidDatetimeFormat,
    /// Negative values in a measure that should not go below zero.
    NegativeValues,
    /// More than half of the rows are zero.
    ExcessiveZeros,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::NonNumericValues => "non_numeric_values",
            ProblemKind::InvalidDatetimeFormat => "invalid_datetime_format",
            ProblemKind::NegativeValues => "negative_values",
            ProblemKind::ExcessiveZeros => "excessive_zeros",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consistency {
    pub score: f64,
    pub problems: Vec<ColumnProblem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validity {
    pub score: f64,
    pub problems: Vec<ColumnProblem>,
}

/// IQR outliers of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub column: String,
    pub total_outliers: usize,
    /// Share of the column's non-null values.
    pub outlier_percentage: f64,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accuracy {
    pub score: f64,
    pub columns: Vec<ColumnOutliers>,
    pub total_outliers: usize,
    pub outlier_percentage: f64,
}

/// A reportable quality problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingValues,
    DuplicateRows,
    Consistency,
    Outliers,
}

// =============================================================================
// SCORING
// =============================================================================

/// Score a table against its inferred schema.
pub fn check_data_quality(table: &DataTable, schema: &Schema) -> Result<QualityReport> {
    let completeness = check_completeness(table);
    let uniqueness = check_uniqueness(table, schema)?;
    let consistency = check_consistency(table, schema)?;
    let validity = check_validity(table, schema)?;
    let accuracy = check_accuracy(table, schema)?;

    let overall_score = round2(
        completeness.score * COMPLETENESS_WEIGHT
            + uniqueness.score * UNIQUENESS_WEIGHT
            + consistency.score * CONSISTENCY_WEIGHT
            + validity.score * VALIDITY_WEIGHT
            + accuracy.score * ACCURACY_WEIGHT,
    );

    let mut report = QualityReport {
        overall_score,
        completeness,
        uniqueness,
        consistency,
        validity,
        accuracy,
        issues: Vec::new(),
        recommendations: Vec::new(),
    };
    report.issues = identify_issues(&report);
    report.recommendations = recommend(&report);

    debug!(
        score = report.overall_score,
        issues = report.issues.len(),
        "Quality checked"
    );
    Ok(report)
}

fn check_completeness(table: &DataTable) -> Completeness {
    let rows = table.row_count();
    let total_cells = rows * table.column_count();

    let columns: Vec<ColumnMissing> = table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let missing = table.null_count(idx);
            ColumnMissing {
                column: name.clone(),
                missing,
                percentage: percentage(missing, rows),
            }
        })
        .collect();

    let missing_cells = columns.iter().map(|c| c.missing).sum();
    let problematic_columns = columns
        .iter()
        .filter(|c| c.percentage > MISSING_THRESHOLD)
        .map(|c| c.column.clone())
        .collect();

    Completeness {
        score: round2(100.0 - percentage(missing_cells, total_cells)),
        total_cells,
        missing_cells,
        missing_percentage: round2(percentage(missing_cells, total_cells)),
        columns,
        problematic_columns,
    }
}

/// Count values equal to an earlier value; missing cells compare equal.
fn count_repeats<T: Eq + std::hash::Hash>(values: impl Iterator<Item = T>) -> usize {
    let mut seen = HashSet::new();
    let mut repeats = 0;
    for value in values {
        if !seen.insert(value) {
            repeats += 1;
        }
    }
    repeats
}

fn normalized(value: &str) -> Option<&str> {
    (!DataTable::is_null_value(value)).then_some(value)
}

fn check_uniqueness(table: &DataTable, schema: &Schema) -> Result<Uniqueness> {
    let rows = table.row_count();
    let duplicate_rows = count_repeats(table.rows.iter().map(|row| {
        (0..table.column_count())
            .map(|idx| normalized(row.get(idx).map(String::as_str).unwrap_or("")))
            .collect::<Vec<_>>()
    }));

    let mut duplicate_ids = Vec::new();
    for column in &schema.id_columns {
        let idx = table.require_column(column)?;
        let count = count_repeats(table.column_values(idx).map(normalized));
        duplicate_ids.push(DuplicateIds {
            column: column.clone(),
            count,
            percentage: round2(percentage(count, rows)),
        });
    }

    Ok(Uniqueness {
        score: round2(100.0 - percentage(duplicate_rows, rows)),
        duplicate_rows,
        duplicate_percentage: round2(percentage(duplicate_rows, rows)),
        duplicate_ids,
        unique_rows: rows - duplicate_rows,
    })
}

fn check_consistency(table: &DataTable, schema: &Schema) -> Result<Consistency> {
    let mut problems = Vec::new();

    for column in &schema.numeric_columns {
        let idx = table.require_column(column)?;
        let count = table
            .non_null_values(idx)
            .filter(|v| v.trim().parse::<f64>().is_err())
            .count();
        if count > 0 {
            problems.push(ColumnProblem {
                column: column.clone(),
                kind: ProblemKind::NonNumericValues,
                count,
            });
        }
    }

    for column in &schema.datetime_columns {
        let idx = table.require_column(column)?;
        let numeric = table.storage_type(idx).is_numeric();
        let count = table
            .non_null_values(idx)
            .filter(|v| coerce_datetime(v, numeric).is_none())
            .count();
        if count > 0 {
            problems.push(ColumnProblem {
                column: column.clone(),
                kind: ProblemKind::InvalidDatetimeFormat,
                count,
            });
        }
    }

    Ok(Consistency {
        score: (100.0 - problems.len() as f64 * CONSISTENCY_PENALTY).max(0.0),
        problems,
    })
}

fn check_validity(table: &DataTable, schema: &Schema) -> Result<Validity> {
    let rows = table.row_count();
    let mut negatives = Vec::new();
    let mut zeros = Vec::new();

    for column in &schema.numeric_columns {
        let values: Vec<f64> = table.numeric_column(column)?.into_iter().flatten().collect();

        let lowered = column.to_lowercase();
        let negative = values.iter().filter(|v| **v < 0.0).count();
        if negative > 0 && NON_NEGATIVE_HINTS.iter().any(|hint| lowered.contains(hint)) {
            negatives.push(ColumnProblem {
                column: column.clone(),
                kind: ProblemKind::NegativeValues,
                count: negative,
            });
        }

        let zero = values.iter().filter(|v| **v == 0.0).count();
        if zero as f64 > rows as f64 * 0.5 {
            zeros.push(ColumnProblem {
                column: column.clone(),
                kind: ProblemKind::ExcessiveZeros,
                count: zero,
            });
        }
    }

    negatives.extend(zeros);
    Ok(Validity {
        score: (100.0 - negatives.len() as f64 * VALIDITY_PENALTY).max(0.0),
        problems: negatives,
    })
}

/// IQR outliers of a numeric column's non-null values.
pub fn column_outliers(column: &str, values: &[f64]) -> ColumnOutliers {
    let fences = stats::iqr_fences(values, IQR_FENCE).ok();
    let total_outliers = fences.map_or(0, |(lower, upper)| {
        values.iter().filter(|v| **v < lower || **v > upper).count()
    });

    ColumnOutliers {
        column: column.to_string(),
        total_outliers,
        outlier_percentage: percentage(total_outliers, values.len()),
        lower_bound: fences.map(|(lower, _)| lower),
        upper_bound: fences.map(|(_, upper)| upper),
    }
}

fn check_accuracy(table: &DataTable, schema: &Schema) -> Result<Accuracy> {
    let mut columns = Vec::new();
    let mut total_values = 0;

    for column in &schema.numeric_columns {
        let values: Vec<f64> = table.numeric_column(column)?.into_iter().flatten().collect();
        total_values += values.len();
        columns.push(column_outliers(column, &values));
    }

    let total_outliers = columns.iter().map(|c| c.total_outliers).sum();
    let outlier_percentage = percentage(total_outliers, total_values);

    Ok(Accuracy {
        score: round2((100.0 - outlier_percentage * OUTLIER_PENALTY).max(0.0)),
        columns,
        total_outliers,
        outlier_percentage: round2(outlier_percentage),
    })
}

// =============================================================================
// ISSUES AND RECOMMENDATIONS
// =============================================================================

fn identify_issues(report: &QualityReport) -> Vec<QualityIssue> {
    let mut issues = Vec::new();

    for column in &report.completeness.columns {
        if column.percentage > MISSING_THRESHOLD {
            issues.push(QualityIssue {
                severity: if column.percentage > MISSING_SEVERE {
                    Severity::High
                } else {
                    Severity::Medium
                },
                kind: IssueKind::MissingValues,
                column: Some(column.column.clone()),
                message: format!(
                    "{} has {:.1}% missing values",
                    column.column, column.percentage
                ),
            });
        }
    }

    if report.uniqueness.duplicate_rows > 0 {
        issues.push(QualityIssue {
            severity: Severity::Medium,
            kind: IssueKind::DuplicateRows,
            column: None,
            message: format!("{} duplicate rows found", report.uniqueness.duplicate_rows),
        });
    }

    for problem in &report.consistency.problems {
        issues.push(QualityIssue {
            severity: Severity::Medium,
            kind: IssueKind::Consistency,
            column: Some(problem.column.clone()),
            message: format!("{} has {}", problem.column, problem.kind.as_str()),
        });
    }

    for column in &report.accuracy.columns {
        if column.outlier_percentage > OUTLIER_ISSUE_SHARE {
            issues.push(QualityIssue {
                severity: Severity::Low,
                kind: IssueKind::Outliers,
                column: Some(column.column.clone()),
                message: format!(
                    "{} has {:.1}% outliers",
                    column.column, column.outlier_percentage
                ),
            });
        }
    }

    issues
}

fn recommend(report: &QualityReport) -> Vec<String> {
    let mut recommendations = Vec::new();

    if report.overall_score < ACCEPTABLE_SCORE {
        recommendations.push(
            "Data quality is below optimal. Consider data cleaning before analysis.".to_string(),
        );
    }

    let problematic = &report.completeness.problematic_columns;
    if !problematic.is_empty() {
        let shown: Vec<&str> = problematic.iter().take(3).map(String::as_str).collect();
        recommendations.push(format!(
            "Consider imputation or removal of columns with high missing values: {}",
            shown.join(", ")
        ));
    }

    if report.uniqueness.duplicate_rows > 0 {
        recommendations.push(format!(
            "Remove {} duplicate rows to improve data quality",
            report.uniqueness.duplicate_rows
        ));
    }

    if !report.consistency.problems.is_empty() {
        recommendations.push("Fix data type inconsistencies in the identified columns".to_string());
    }

    if report.accuracy.outlier_percentage > OUTLIER_RECOMMEND_SHARE {
        recommendations.push(
            "Review outliers - they may indicate data entry errors or require separate analysis"
                .to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push("Data quality is good! Ready for analysis.".to_string());
    }
    recommendations
}
