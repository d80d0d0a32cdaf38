//! Pattern-based KPI rules: anomalies, seasonality, comparisons,
//! distribution shape and trend breakpoints.
//!
//! Each rule computes a statistic and emits a descriptor only when it
//! crosses its threshold. Degenerate statistics (too few values, zero
//! variance, zero baseline) make the rule decline rather than fail.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};

use crate::error::Result;
use crate::input::DataTable;
use crate::schema::Schema;
use crate::stats;

use super::descriptor::{
    Anomaly, Comparative, Difficulty, Distribution, KpiDescriptor, KpiDetail, Pattern, Trend,
};
use super::naming::humanize;

/// |z| above this counts as an anomaly.
const Z_THRESHOLD: f64 = 3.0;
/// Fence width in interquartile ranges.
const IQR_FENCE: f64 = 1.5;
/// Minimum IQR-outlier share of all rows, in percent.
const OUTLIER_SHARE: f64 = 5.0;
/// Rows with a parseable date needed before looking for seasonality.
const SEASONALITY_MIN_ROWS: usize = 30;
/// Rows with a parseable date needed before looking for a breakpoint.
const TREND_MIN_ROWS: usize = 10;
/// Non-null values needed before describing a distribution.
const DISTRIBUTION_MIN_VALUES: usize = 10;
/// Numeric columns examined by the time-based rules.
const TIME_RULE_COLUMNS: usize = 2;
/// Categorical columns examined by the comparative rule.
const COMPARATIVE_GROUP_COLUMNS: usize = 2;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Run every creative rule in order.
pub fn creative_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = anomaly_kpis(schema, table)?;
    kpis.extend(seasonality_kpis(schema, table)?);
    kpis.extend(comparative_kpis(schema, table)?);
    kpis.extend(distribution_kpis(schema, table)?);
    kpis.extend(trend_kpis(schema, table)?);
    Ok(kpis)
}

/// Render an optional percentage with one decimal, or `n/a`.
fn fmt_pct(pct: Option<f64>) -> String {
    match pct {
        Some(value) => format!("{:.1}%", value),
        None => "n/a".to_string(),
    }
}

fn non_null(table: &DataTable, column: &str) -> Result<Vec<f64>> {
    Ok(table.numeric_column(column)?.into_iter().flatten().collect())
}

/// Index of the first maximum and first minimum.
fn arg_extremes(values: &[f64]) -> Option<(usize, usize)> {
    let first = *values.first()?;
    let (mut best, mut worst) = (0, 0);
    let (mut hi, mut lo) = (first, first);
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > hi {
            hi = v;
            best = i;
        }
        if v < lo {
            lo = v;
            worst = i;
        }
    }
    Some((best, worst))
}

// =============================================================================
// ANOMALY DETECTION
// =============================================================================

/// z-score anomalies and IQR outliers for every numeric column.
pub fn anomaly_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();

    for col in &schema.numeric_columns {
        let values = non_null(table, col)?;
        let title = humanize(col);

        if let Ok(z_scores) = stats::abs_z_scores(&values) {
            let count = z_scores.iter().filter(|z| **z > Z_THRESHOLD).count();
            let pct = count as f64 * 100.0 / values.len() as f64;
            if pct > 0.0 {
                kpis.push(
                    KpiDescriptor::new(
                        format!("Anomaly Rate in {}", title),
                        format!(
                            "{:.1}% of {} values are statistical anomalies (3+ standard deviations from mean). \
                             These outliers may indicate data errors or exceptional events worth investigating.",
                            pct, col
                        ),
                        format!(
                            "COUNT(CASE WHEN ABS(({0} - AVG({0})) / STDDEV({0})) > 3 THEN 1 END) / COUNT(*) * 100",
                            col
                        ),
                        vec![col.clone()],
                        Difficulty::Advanced,
                        KpiDetail::AnomalyDetection(Anomaly::ZscoreAnomalies {
                            column: col.clone(),
                            anomaly_count: count,
                            anomaly_percentage: pct,
                        }),
                    )
                    .with_insight(
                        "High anomaly rates may indicate data quality issues or exceptional business events.",
                    ),
                );
            }
        }

        let Ok((lower, upper)) = stats::iqr_fences(&values, IQR_FENCE) else {
            continue;
        };
        let count = values.iter().filter(|v| **v < lower || **v > upper).count();
        // Share of all rows, missing cells included.
        let pct = count as f64 * 100.0 / table.row_count() as f64;

        if pct > OUTLIER_SHARE {
            kpis.push(
                KpiDescriptor::new(
                    format!("Outlier Detection in {}", title),
                    format!(
                        "{:.1}% of records are outliers based on IQR method. \
                         Outliers can reveal exceptional cases or data quality issues.",
                        pct
                    ),
                    format!("IQR-based outlier detection for {}", col),
                    vec![col.clone()],
                    Difficulty::Advanced,
                    KpiDetail::AnomalyDetection(Anomaly::IqrOutliers {
                        column: col.clone(),
                        outlier_count: count,
                        outlier_percentage: pct,
                    }),
                )
                .with_insight(
                    "Consider investigating outliers - they may represent opportunities or errors.",
                ),
            );
        }
    }

    Ok(kpis)
}

// =============================================================================
// SEASONALITY
// =============================================================================

/// Rows whose value in `column` parses as a date, with that date.
fn dated_rows(table: &DataTable, column: &str) -> Result<Vec<(NaiveDateTime, usize)>> {
    Ok(table
        .datetime_column(column)?
        .into_iter()
        .enumerate()
        .filter_map(|(row, date)| date.map(|d| (d, row)))
        .collect())
}

/// Group means keyed by `key`, in key order, plus their sample variance
/// and mean. `None` when fewer than two groups have values.
fn group_means<F>(
    rows: &[(NaiveDateTime, usize)],
    values: &[Option<f64>],
    key: F,
) -> Option<(Vec<(u32, f64)>, f64, f64)>
where
    F: Fn(&NaiveDateTime) -> u32,
{
    let mut groups: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for (date, row) in rows {
        if let Some(Some(v)) = values.get(*row) {
            let entry = groups.entry(key(date)).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }

    let means: Vec<(u32, f64)> = groups
        .into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect();
    let only_means: Vec<f64> = means.iter().map(|(_, m)| *m).collect();
    let variance = stats::sample_variance(&only_means).ok()?;
    let center = stats::mean(&only_means).ok()?;
    Some((means, variance, center))
}

/// Day-of-week and monthly seasonality of the first two numeric columns.
pub fn seasonality_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();
    let Some(datetime_col) = schema.datetime_columns.first() else {
        return Ok(kpis);
    };
    if schema.numeric_columns.is_empty() {
        return Ok(kpis);
    }

    let rows = dated_rows(table, datetime_col)?;
    if rows.len() < SEASONALITY_MIN_ROWS {
        return Ok(kpis);
    }

    for num_col in schema.numeric_columns.iter().take(TIME_RULE_COLUMNS) {
        let values = table.numeric_column(num_col)?;
        let title = humanize(num_col);

        if let Some((means, variance, center)) =
            group_means(&rows, &values, |d| d.weekday().num_days_from_monday())
        {
            if variance > center * 0.1 {
                let only: Vec<f64> = means.iter().map(|(_, m)| *m).collect();
                if let Some((best, worst)) = arg_extremes(&only) {
                    let (best_day, best_mean) = (DAY_NAMES[means[best].0 as usize], means[best].1);
                    let (worst_day, worst_mean) =
                        (DAY_NAMES[means[worst].0 as usize], means[worst].1);

                    kpis.push(
                        KpiDescriptor::new(
                            format!("Weekly Pattern in {}", title),
                            format!(
                                "{} shows weekly seasonality. Best performing day: {} ({:.2}), \
                                 Lowest: {} ({:.2}). This pattern suggests day-of-week effects.",
                                num_col, best_day, best_mean, worst_day, worst_mean
                            ),
                            format!("AVG({}) GROUP BY DAYOFWEEK({})", num_col, datetime_col),
                            vec![num_col.clone(), datetime_col.clone()],
                            Difficulty::Advanced,
                            KpiDetail::PatternDetection(Pattern::WeeklySeasonality {
                                column: num_col.clone(),
                                group_by: datetime_col.clone(),
                                best_day: best_day.to_string(),
                                worst_day: worst_day.to_string(),
                                variance,
                            }),
                        )
                        .with_insight(format!(
                            "Consider scheduling important activities on {}s when {} is highest.",
                            best_day, num_col
                        )),
                    );
                }
            }
        }

        if let Some((means, variance, center)) = group_means(&rows, &values, |d| d.month()) {
            if variance > center * 0.15 {
                let only: Vec<f64> = means.iter().map(|(_, m)| *m).collect();
                if let Some((best, worst)) = arg_extremes(&only) {
                    let best_month = MONTH_NAMES[(means[best].0 - 1) as usize];
                    let worst_month = MONTH_NAMES[(means[worst].0 - 1) as usize];

                    kpis.push(
                        KpiDescriptor::new(
                            format!("Monthly Seasonality in {}", title),
                            format!(
                                "{} exhibits monthly seasonality. Peak month: {} ({:.2}), Lowest: {} ({:.2}).",
                                num_col, best_month, means[best].1, worst_month, means[worst].1
                            ),
                            format!("AVG({}) GROUP BY MONTH({})", num_col, datetime_col),
                            vec![num_col.clone(), datetime_col.clone()],
                            Difficulty::Advanced,
                            KpiDetail::PatternDetection(Pattern::MonthlySeasonality {
                                column: num_col.clone(),
                                group_by: datetime_col.clone(),
                                best_month: best_month.to_string(),
                                worst_month: worst_month.to_string(),
                                variance,
                            }),
                        )
                        .with_insight(format!(
                            "Plan campaigns or inventory around {} when {} peaks.",
                            best_month, num_col
                        )),
                    );
                }
            }
        }
    }

    Ok(kpis)
}

// =============================================================================
// COMPARATIVE ANALYSIS
// =============================================================================

/// Best and worst group against the overall mean, for the first two
/// categorical columns and every numeric column.
///
/// Groups are visited in sorted key order; ties go to the first group.
/// Pairs with no group holding a numeric value are skipped.
pub fn comparative_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();

    for cat_col in schema
        .categorical_columns
        .iter()
        .take(COMPARATIVE_GROUP_COLUMNS)
    {
        let cat_idx = table.require_column(cat_col)?;

        for num_col in &schema.numeric_columns {
            let values = table.numeric_column(num_col)?;

            let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
            for (key, value) in table.column_values(cat_idx).zip(&values) {
                if let Some(v) = value {
                    if !DataTable::is_null_value(key) {
                        let entry = groups.entry(key).or_insert((0.0, 0));
                        entry.0 += v;
                        entry.1 += 1;
                    }
                }
            }
            let means: Vec<(&str, f64)> = groups
                .into_iter()
                .map(|(k, (sum, n))| (k, sum / n as f64))
                .collect();
            let only: Vec<f64> = means.iter().map(|(_, m)| *m).collect();
            let Some((best, worst)) = arg_extremes(&only) else {
                continue;
            };
            let overall = match stats::mean(&values.iter().flatten().copied().collect::<Vec<_>>()) {
                Ok(m) => m,
                Err(_) => continue,
            };

            let (top, top_value) = means[best];
            let (bottom, bottom_value) = means[worst];
            let top_pct = stats::pct_change(top_value, overall).ok();
            let bottom_pct = stats::pct_change(bottom_value, overall).ok();
            let title = humanize(num_col);
            let used = vec![num_col.clone(), cat_col.clone()];

            kpis.push(
                KpiDescriptor::new(
                    format!("{} Performance: {} vs Average", title, top),
                    format!(
                        "{} outperforms the average by {} ({:.2} vs {:.2}). {} underperforms by {}.",
                        top,
                        fmt_pct(top_pct),
                        top_value,
                        overall,
                        bottom,
                        fmt_pct(bottom_pct.map(f64::abs))
                    ),
                    format!(
                        "AVG({0}) GROUP BY {1} compared to overall AVG({0})",
                        num_col, cat_col
                    ),
                    used.clone(),
                    Difficulty::Medium,
                    KpiDetail::ComparativeAnalysis(Comparative::VsAverage {
                        column: num_col.clone(),
                        group_by: cat_col.clone(),
                        top_performer: top.to_string(),
                        top_performance_pct: top_pct,
                        bottom_performer: bottom.to_string(),
                        bottom_performance_pct: bottom_pct,
                    }),
                )
                .with_insight(format!(
                    "Learn from {}'s success. Investigate why {} underperforms.",
                    top, bottom
                )),
            );

            let gap_pct = stats::pct_change(top_value, bottom_value).ok();
            kpis.push(
                KpiDescriptor::new(
                    format!("{} Performance Gap", title),
                    format!(
                        "The gap between best ({}: {:.2}) and worst ({}: {:.2}) performers is {}. \
                         This represents a significant opportunity for improvement.",
                        top,
                        top_value,
                        bottom,
                        bottom_value,
                        fmt_pct(gap_pct)
                    ),
                    format!("MAX({0}) - MIN({0}) GROUP BY {1}", num_col, cat_col),
                    used,
                    Difficulty::Medium,
                    KpiDetail::ComparativeAnalysis(Comparative::PerformanceGap {
                        column: num_col.clone(),
                        group_by: cat_col.clone(),
                        gap_percentage: gap_pct,
                    }),
                )
                .with_insight(format!(
                    "Closing the gap could improve overall {} by {} if underperformers reach median.",
                    num_col,
                    fmt_pct(gap_pct.map(|g| g / 2.0))
                )),
            );
        }
    }

    Ok(kpis)
}

// =============================================================================
// DISTRIBUTION ANALYSIS
// =============================================================================

/// Skewness, 80/20 concentration and coefficient of variation.
pub fn distribution_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();

    for col in &schema.numeric_columns {
        let values = non_null(table, col)?;
        if values.len() < DISTRIBUTION_MIN_VALUES {
            continue;
        }
        let title = humanize(col);

        if let Ok(skew) = stats::skewness(&values) {
            if skew.abs() > 1.0 {
                let positive = skew > 0.0;
                kpis.push(
                    KpiDescriptor::new(
                        format!("{} Distribution Skewness", title),
                        format!(
                            "{} is {} skewed (skewness: {:.2}). This means most values are clustered \
                             on the {} side, with a long tail on the {}.",
                            col,
                            if positive { "positively" } else { "negatively" },
                            skew,
                            if positive { "left" } else { "right" },
                            if positive { "right" } else { "left" }
                        ),
                        format!("Statistical skewness of {}", col),
                        vec![col.clone()],
                        Difficulty::Advanced,
                        KpiDetail::DistributionAnalysis(Distribution::Skewness {
                            column: col.clone(),
                            skewness_value: skew,
                        }),
                    )
                    .with_insight(
                        "Skewed distributions may require different analytical approaches (e.g., log transformation).",
                    ),
                );
            }
        }

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        let top_count = (sorted.len() as f64 * 0.2) as usize;
        let top_sum: f64 = sorted[..top_count].iter().sum();
        let total: f64 = sorted.iter().sum();
        if total != 0.0 {
            let concentration = top_sum / total * 100.0;
            if concentration > 60.0 {
                kpis.push(
                    KpiDescriptor::new(
                        format!("{} Concentration (80/20 Rule)", title),
                        format!(
                            "{:.1}% of {} comes from the top 20% of records. This suggests a Pareto \
                             distribution where a small number of records contribute disproportionately.",
                            concentration, col
                        ),
                        "SUM of top 20% records / SUM of all records",
                        vec![col.clone()],
                        Difficulty::Advanced,
                        KpiDetail::DistributionAnalysis(Distribution::Pareto {
                            column: col.clone(),
                            concentration_percentage: concentration,
                        }),
                    )
                    .with_insight(
                        "Focus on the top 20% - they drive most of the value. Consider targeted strategies for high-value segments.",
                    ),
                );
            }
        }

        if let (Ok(mean), Ok(std)) = (stats::mean(&values), stats::sample_std(&values)) {
            if mean != 0.0 {
                let cv = std / mean * 100.0;
                if cv > 50.0 {
                    kpis.push(
                        KpiDescriptor::new(
                            format!("{} Variability", title),
                            format!(
                                "{} has high variability (CV: {:.1}%). This means values vary widely, \
                                 suggesting diverse performance or behavior patterns.",
                                col, cv
                            ),
                            format!("(STDDEV({0}) / AVG({0})) * 100", col),
                            vec![col.clone()],
                            Difficulty::Medium,
                            KpiDetail::DistributionAnalysis(Distribution::Variability {
                                column: col.clone(),
                                coefficient_of_variation: cv,
                            }),
                        )
                        .with_insight(
                            "High variability suggests segmentation opportunities. Consider grouping records to understand different patterns.",
                        ),
                    );
                }
            }
        }
    }

    Ok(kpis)
}

// =============================================================================
// TREND BREAKPOINTS
// =============================================================================

/// First-half vs second-half means over time for the first two numeric
/// columns. Rows are stably sorted by the first datetime column.
pub fn trend_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();
    let Some(datetime_col) = schema.datetime_columns.first() else {
        return Ok(kpis);
    };
    if schema.numeric_columns.is_empty() {
        return Ok(kpis);
    }

    let mut rows = dated_rows(table, datetime_col)?;
    if rows.len() < TREND_MIN_ROWS {
        return Ok(kpis);
    }
    rows.sort_by_key(|(date, _)| *date);
    let midpoint = rows.len() / 2;

    for num_col in schema.numeric_columns.iter().take(TIME_RULE_COLUMNS) {
        let values = table.numeric_column(num_col)?;
        let half = |range: &[(NaiveDateTime, usize)]| -> Vec<f64> {
            range.iter().filter_map(|(_, row)| values[*row]).collect()
        };

        let (Ok(first), Ok(second)) = (
            stats::mean(&half(&rows[..midpoint])),
            stats::mean(&half(&rows[midpoint..])),
        ) else {
            continue;
        };
        let Ok(change) = stats::pct_change(second, first) else {
            continue;
        };
        if change.abs() <= 10.0 {
            continue;
        }

        let rising = change > 0.0;
        kpis.push(
            KpiDescriptor::new(
                format!("{} Trend Change", humanize(num_col)),
                format!(
                    "{} {} by {:.1}% from the first half ({:.2}) to the second half ({:.2}) of the period. \
                     This indicates a {} trend shift.",
                    num_col,
                    if rising { "increased" } else { "decreased" },
                    change.abs(),
                    first,
                    second,
                    if rising { "positive" } else { "negative" }
                ),
                format!(
                    "Compare AVG({}) in first half vs second half of time period",
                    num_col
                ),
                vec![num_col.clone(), datetime_col.clone()],
                Difficulty::Advanced,
                KpiDetail::TrendAnalysis(Trend::Breakpoint {
                    column: num_col.clone(),
                    group_by: datetime_col.clone(),
                    change_percentage: change,
                    first_half_avg: first,
                    second_half_avg: second,
                }),
            )
            .with_insight(if rising {
                "Continue the positive momentum."
            } else {
                "Investigate the decline and take corrective action."
            }),
        );
    }

    Ok(kpis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnRole;

    fn schema(columns: &[(&str, ColumnRole)]) -> Schema {
        let mut schema = Schema::new();
        for (name, role) in columns {
            schema.push(*name, *role);
        }
        schema
    }

    fn numeric_table(name: &str, values: Vec<String>) -> (DataTable, Schema) {
        let table = DataTable::from_columns(vec![(name, values)]).unwrap();
        (table, schema(&[(name, ColumnRole::Numeric)]))
    }

    fn repeated(parts: &[(usize, &str)]) -> Vec<String> {
        parts
            .iter()
            .flat_map(|(n, v)| std::iter::repeat(v.to_string()).take(*n))
            .collect()
    }

    fn daily_dates(n: usize) -> Vec<String> {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| (start + chrono::Duration::days(i as i64)).to_string())
            .collect()
    }

    // =========================================================================
    // Anomalies
    // =========================================================================

    #[test]
    fn test_iqr_share_exactly_five_percent_is_silent() {
        let (t, s) = numeric_table("amount", repeated(&[(95, "10"), (5, "100")]));
        let kpis = anomaly_kpis(&s, &t).unwrap();
        assert!(!kpis.iter().any(|k| k.name == "Outlier Detection in Amount"));
    }

    #[test]
    fn test_iqr_share_above_five_percent_emits() {
        let (t, s) = numeric_table("amount", repeated(&[(949, "10"), (51, "100")]));
        let kpis = anomaly_kpis(&s, &t).unwrap();
        let outliers = kpis
            .iter()
            .find(|k| k.name == "Outlier Detection in Amount")
            .unwrap();
        match &outliers.detail {
            KpiDetail::AnomalyDetection(Anomaly::IqrOutliers { outlier_count, .. }) => {
                assert_eq!(*outlier_count, 51)
            }
            other => panic!("unexpected detail {:?}", other),
        }
        assert!(outliers.description.starts_with("5.1% of records"));
    }

    #[test]
    fn test_zscore_anomaly() {
        let mut values = repeated(&[(50, "10"), (49, "11")]);
        values.push("500".to_string());
        let (t, s) = numeric_table("amount", values);

        let kpis = anomaly_kpis(&s, &t).unwrap();
        assert_eq!(kpis[0].name, "Anomaly Rate in Amount");
        assert!(kpis[0].description.starts_with("1.0% of amount values"));
    }

    #[test]
    fn test_constant_column_has_no_anomalies() {
        let (t, s) = numeric_table("amount", repeated(&[(20, "7")]));
        assert!(anomaly_kpis(&s, &t).unwrap().is_empty());
    }

    // =========================================================================
    // Seasonality and trend
    // =========================================================================

    #[test]
    fn test_weekly_pattern() {
        // Weekends are ten times busier than weekdays.
        let dates = daily_dates(35);
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sales: Vec<String> = (0..35)
            .map(|i| {
                let day = (start + chrono::Duration::days(i)).weekday().num_days_from_monday();
                if day >= 5 { "100" } else { "10" }.to_string()
            })
            .collect();
        let t = DataTable::from_columns(vec![("order_date", dates), ("sales", sales)]).unwrap();
        let s = schema(&[
            ("order_date", ColumnRole::Datetime),
            ("sales", ColumnRole::Numeric),
        ]);

        let kpis = seasonality_kpis(&s, &t).unwrap();
        let weekly = kpis
            .iter()
            .find(|k| k.name == "Weekly Pattern in Sales")
            .unwrap();
        match &weekly.detail {
            KpiDetail::PatternDetection(Pattern::WeeklySeasonality {
                best_day,
                worst_day,
                ..
            }) => {
                assert_eq!(best_day, "Saturday");
                assert_eq!(worst_day, "Monday");
            }
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_seasonality_needs_thirty_rows() {
        let t = DataTable::from_columns(vec![
            ("order_date", daily_dates(29)),
            ("sales", (0..29).map(|i| (i * i).to_string()).collect()),
        ])
        .unwrap();
        let s = schema(&[
            ("order_date", ColumnRole::Datetime),
            ("sales", ColumnRole::Numeric),
        ]);
        assert!(seasonality_kpis(&s, &t).unwrap().is_empty());
    }

    #[test]
    fn test_trend_change() {
        // Rows arrive out of order; the sort puts the small values first.
        let mut dates = daily_dates(20);
        dates.reverse();
        let sales: Vec<String> = (0..20)
            .map(|i| if i < 10 { "20" } else { "10" }.to_string())
            .collect();
        let t = DataTable::from_columns(vec![("order_date", dates), ("sales", sales)]).unwrap();
        let s = schema(&[
            ("order_date", ColumnRole::Datetime),
            ("sales", ColumnRole::Numeric),
        ]);

        let kpis = trend_kpis(&s, &t).unwrap();
        assert_eq!(kpis.len(), 1);
        assert_eq!(kpis[0].name, "Sales Trend Change");
        assert!(kpis[0].description.starts_with("sales increased by 100.0%"));
    }

    #[test]
    fn test_trend_zero_baseline_declines() {
        let sales: Vec<String> = (0..20)
            .map(|i| if i < 10 { "0" } else { "10" }.to_string())
            .collect();
        let t = DataTable::from_columns(vec![("order_date", daily_dates(20)), ("sales", sales)])
            .unwrap();
        let s = schema(&[
            ("order_date", ColumnRole::Datetime),
            ("sales", ColumnRole::Numeric),
        ]);
        assert!(trend_kpis(&s, &t).unwrap().is_empty());
    }

    // =========================================================================
    // Comparative
    // =========================================================================

    #[test]
    fn test_comparative_top_and_bottom() {
        let t = DataTable::from_columns(vec![
            ("region", vec!["west", "east", "west", "north", ""]),
            ("amount", vec!["30", "10", "30", "20", "999"]),
        ])
        .unwrap();
        let s = schema(&[
            ("region", ColumnRole::Categorical),
            ("amount", ColumnRole::Numeric),
        ]);

        let kpis = comparative_kpis(&s, &t).unwrap();
        assert_eq!(kpis.len(), 2);
        assert_eq!(kpis[0].name, "Amount Performance: west vs Average");
        assert_eq!(kpis[1].name, "Amount Performance Gap");
        match &kpis[1].detail {
            KpiDetail::ComparativeAnalysis(Comparative::PerformanceGap {
                gap_percentage, ..
            }) => assert_eq!(*gap_percentage, Some(200.0)),
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_comparative_zero_baseline_renders_na() {
        let t = DataTable::from_columns(vec![
            ("region", vec!["a", "b"]),
            ("delta", vec!["5", "-5"]),
        ])
        .unwrap();
        let s = schema(&[
            ("region", ColumnRole::Categorical),
            ("delta", ColumnRole::Numeric),
        ]);

        let kpis = comparative_kpis(&s, &t).unwrap();
        assert!(kpis[0].description.contains("by n/a"));
    }

    #[test]
    fn test_comparative_skips_empty_groups() {
        let t = DataTable::from_columns(vec![
            ("region", vec!["", ""]),
            ("amount", vec!["1", "2"]),
        ])
        .unwrap();
        let s = schema(&[
            ("region", ColumnRole::Categorical),
            ("amount", ColumnRole::Numeric),
        ]);
        assert!(comparative_kpis(&s, &t).unwrap().is_empty());
    }

    // =========================================================================
    // Distribution
    // =========================================================================

    #[test]
    fn test_distribution_needs_ten_values() {
        let (t, s) = numeric_table("amount", repeated(&[(8, "1"), (1, "1000")]));
        assert!(distribution_kpis(&s, &t).unwrap().is_empty());
    }

    #[test]
    fn test_heavy_tail_emits_all_three() {
        let (t, s) = numeric_table("amount", repeated(&[(18, "1"), (2, "1000")]));
        let names: Vec<String> = distribution_kpis(&s, &t)
            .unwrap()
            .into_iter()
            .map(|k| k.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Amount Distribution Skewness",
                "Amount Concentration (80/20 Rule)",
                "Amount Variability"
            ]
        );
    }
}
