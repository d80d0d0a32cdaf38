//! Core KPI rule families.
//!
//! Each family is a pure function of the schema and the table. Column order
//! in the schema is significant: several rules only look at the first
//! datetime, identifier or numeric columns.

use std::collections::HashSet;

use chrono::Datelike;

use crate::error::Result;
use crate::inference::{parse_datetime, DatePrecision, DATE_SAMPLE_SIZE};
use crate::input::DataTable;
use crate::schema::Schema;

use super::descriptor::{
    Aggregation, CategoryBreakdown, Conversion, Difficulty, Granularity, Growth, KpiDescriptor,
    KpiDetail, PeriodAggregate, PeriodMeasure, Ratio, Statistical, TimeSeries,
};
use super::naming::humanize;

/// Substrings that mark a categorical column as a status field.
const STATUS_PATTERNS: &[&str] = &["status", "state", "stage", "phase", "type"];

/// Numeric columns considered by the growth-rate rule.
const GROWTH_COLUMN_LIMIT: usize = 2;

// =============================================================================
// AGGREGATION
// =============================================================================

/// Totals, averages and extremes of every numeric column, distinct counts
/// of every identifier, and a single record count for non-empty tables.
pub fn aggregation_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();

    for col in &schema.numeric_columns {
        let title = humanize(col);
        let used = vec![col.clone()];

        kpis.push(KpiDescriptor::new(
            format!("Total {}", title),
            format!("Sum of {} across all records.", col),
            format!("SUM({})", col),
            used.clone(),
            Difficulty::Easy,
            KpiDetail::Aggregation(Aggregation::Sum { column: col.clone() }),
        ));
        kpis.push(KpiDescriptor::new(
            format!("Average {}", title),
            format!("Average value of {} across all records.", col),
            format!("AVG({})", col),
            used.clone(),
            Difficulty::Easy,
            KpiDetail::Aggregation(Aggregation::Average { column: col.clone() }),
        ));
        kpis.push(KpiDescriptor::new(
            format!("Minimum {}", title),
            format!("Minimum value of {} across all records.", col),
            format!("MIN({})", col),
            used.clone(),
            Difficulty::Easy,
            KpiDetail::Aggregation(Aggregation::Min { column: col.clone() }),
        ));
        kpis.push(KpiDescriptor::new(
            format!("Maximum {}", title),
            format!("Maximum value of {} across all records.", col),
            format!("MAX({})", col),
            used,
            Difficulty::Easy,
            KpiDetail::Aggregation(Aggregation::Max { column: col.clone() }),
        ));
    }

    for col in &schema.id_columns {
        kpis.push(KpiDescriptor::new(
            format!("Total Count of {}", humanize(col)),
            format!("Total count of unique {}.", col),
            format!("COUNT(DISTINCT {})", col),
            vec![col.clone()],
            Difficulty::Easy,
            KpiDetail::Aggregation(Aggregation::CountDistinct { column: col.clone() }),
        ));
    }

    if !table.is_empty() {
        kpis.push(KpiDescriptor::new(
            "Total Records",
            "Total number of records in the dataset.",
            "COUNT(*)",
            Vec::new(),
            Difficulty::Easy,
            KpiDetail::Aggregation(Aggregation::Count),
        ));
    }

    Ok(kpis)
}

// =============================================================================
// TIME SERIES
// =============================================================================

/// Infer the time bucket for a datetime column.
///
/// A name containing `year`, or a sample made only of bare years, hints at
/// yearly data. Otherwise the first [`DATE_SAMPLE_SIZE`] non-null values are
/// parsed (unparseable ones dropped): at most two distinct years and days
/// means yearly, fewer distinct days than 10% of the sample means monthly,
/// anything else daily. With nothing parseable only the name hint applies.
pub fn infer_granularity(table: &DataTable, column: &str) -> Result<Granularity> {
    let idx = table.require_column(column)?;
    let numeric = table.storage_type(idx).is_numeric();
    let name_hint = column.to_lowercase().contains("year");

    let sample: Vec<_> = table
        .non_null_values(idx)
        .take(DATE_SAMPLE_SIZE)
        .filter_map(|v| parse_datetime(v, numeric))
        .collect();

    if sample.is_empty() {
        return Ok(if name_hint {
            Granularity::Year
        } else {
            Granularity::Day
        });
    }

    let year_literals = sample.iter().all(|p| p.precision == DatePrecision::Year);
    let unique_years = sample
        .iter()
        .map(|p| p.value.year())
        .collect::<HashSet<_>>()
        .len();
    let unique_days = sample
        .iter()
        .map(|p| p.value.date())
        .collect::<HashSet<_>>()
        .len();

    let granularity = if name_hint || year_literals || (unique_years <= 2 && unique_days <= 2) {
        Granularity::Year
    } else if (unique_days as f64) < sample.len() as f64 * 0.1 {
        Granularity::Month
    } else {
        Granularity::Day
    };
    Ok(granularity)
}

fn period_kpi(
    measure_col: &str,
    datetime_col: &str,
    period: Granularity,
    name: String,
    description: String,
    measure: PeriodMeasure,
) -> KpiDescriptor {
    let func = match measure {
        PeriodMeasure::Sum => format!("SUM({})", measure_col),
        PeriodMeasure::CountDistinct => format!("COUNT(DISTINCT {})", measure_col),
    };
    let bucket = match period {
        Granularity::Day => format!("DATE({})", datetime_col),
        Granularity::Month => format!("YEAR({0}), MONTH({0})", datetime_col),
        Granularity::Year => format!("YEAR({})", datetime_col),
    };

    KpiDescriptor::new(
        name,
        description,
        format!("{} GROUP BY {}", func, bucket),
        vec![measure_col.to_string(), datetime_col.to_string()],
        Difficulty::Medium,
        KpiDetail::TimeSeries(TimeSeries::new(
            period,
            PeriodAggregate {
                column: measure_col.to_string(),
                group_by: datetime_col.to_string(),
                measure,
            },
        )),
    )
}

/// Per-period totals keyed to the first datetime column.
pub fn time_series_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();
    let Some(datetime_col) = schema.datetime_columns.first() else {
        return Ok(kpis);
    };

    let granularity = infer_granularity(table, datetime_col)?;
    let periods = match granularity {
        Granularity::Year => [Granularity::Year, Granularity::Month],
        Granularity::Month => [Granularity::Month, Granularity::Year],
        Granularity::Day => [Granularity::Day, Granularity::Month],
    };

    for num_col in &schema.numeric_columns {
        for period in periods {
            kpis.push(period_kpi(
                num_col,
                datetime_col,
                period,
                format!("{} per {}", humanize(num_col), period.label()),
                format!("Total {} aggregated by {}.", num_col, period.noun()),
                PeriodMeasure::Sum,
            ));
        }
    }

    if let Some(id_col) = schema.id_columns.first() {
        kpis.push(period_kpi(
            id_col,
            datetime_col,
            granularity,
            format!("New {} per {}", humanize(id_col), granularity.label()),
            format!("Count of new {} per {}.", id_col, granularity.noun()),
            PeriodMeasure::CountDistinct,
        ));
    }

    Ok(kpis)
}

// =============================================================================
// CATEGORY BREAKDOWN
// =============================================================================

/// Sums and averages of every numeric column per categorical column, plus
/// a row count per categorical column.
pub fn category_breakdown_kpis(schema: &Schema, _table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();

    for cat_col in &schema.categorical_columns {
        let cat_title = humanize(cat_col);

        for num_col in &schema.numeric_columns {
            let num_title = humanize(num_col);
            let used = vec![num_col.clone(), cat_col.clone()];

            kpis.push(KpiDescriptor::new(
                format!("{} by {}", num_title, cat_title),
                format!("Total {} broken down by {}.", num_col, cat_col),
                format!("SUM({}) GROUP BY {}", num_col, cat_col),
                used.clone(),
                Difficulty::Medium,
                KpiDetail::CategoryBreakdown(CategoryBreakdown::SumByCategory {
                    column: num_col.clone(),
                    group_by: cat_col.clone(),
                }),
            ));
            kpis.push(KpiDescriptor::new(
                format!("Average {} by {}", num_title, cat_title),
                format!("Average {} broken down by {}.", num_col, cat_col),
                format!("AVG({}) GROUP BY {}", num_col, cat_col),
                used,
                Difficulty::Medium,
                KpiDetail::CategoryBreakdown(CategoryBreakdown::AvgByCategory {
                    column: num_col.clone(),
                    group_by: cat_col.clone(),
                }),
            ));
        }

        kpis.push(KpiDescriptor::new(
            format!("Count by {}", cat_title),
            format!("Number of records broken down by {}.", cat_col),
            format!("COUNT(*) GROUP BY {}", cat_col),
            vec![cat_col.clone()],
            Difficulty::Easy,
            KpiDetail::CategoryBreakdown(CategoryBreakdown::CountByCategory {
                group_by: cat_col.clone(),
            }),
        ));
    }

    Ok(kpis)
}

// =============================================================================
// CONVERSION / STATUS
// =============================================================================

fn is_status_column(name: &str) -> bool {
    let lower = name.to_lowercase();
    STATUS_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Distributions of status-like categorical columns, plus a rate for
/// binary ones.
///
/// The rate counts the first status value in row order.
pub fn conversion_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();

    for status_col in schema
        .categorical_columns
        .iter()
        .filter(|c| is_status_column(c))
    {
        let title = humanize(status_col);

        kpis.push(KpiDescriptor::new(
            format!("{} Distribution", title),
            format!("Distribution of records by {}.", status_col),
            format!("COUNT(*) GROUP BY {}", status_col),
            vec![status_col.clone()],
            Difficulty::Easy,
            KpiDetail::Conversion(Conversion::Distribution {
                group_by: status_col.clone(),
            }),
        ));

        let idx = table.require_column(status_col)?;
        let values = table.unique_values(idx);
        if let [first, _] = values.as_slice() {
            kpis.push(KpiDescriptor::new(
                format!("{} Rate", title),
                format!("Percentage of records with {} = {}.", status_col, first),
                format!(
                    "COUNT(CASE WHEN {} = \"{}\" THEN 1 END) / COUNT(*) * 100",
                    status_col, first
                ),
                vec![status_col.clone()],
                Difficulty::Medium,
                KpiDetail::Conversion(Conversion::Rate {
                    column: status_col.clone(),
                    status_values: values.iter().map(|v| v.to_string()).collect(),
                }),
            ));
        }
    }

    Ok(kpis)
}

// =============================================================================
// STATISTICAL / RATIO / GROWTH
// =============================================================================

fn column_sum(table: &DataTable, column: &str) -> Result<f64> {
    Ok(table.numeric_column(column)?.into_iter().flatten().sum())
}

/// Percentiles of every numeric column, pairwise ratios and growth rates.
pub fn statistical_kpis(schema: &Schema, table: &DataTable) -> Result<Vec<KpiDescriptor>> {
    let mut kpis = Vec::new();
    let numeric = &schema.numeric_columns;

    for col in numeric {
        let title = humanize(col);

        kpis.push(KpiDescriptor::new(
            format!("Median {}", title),
            format!("Median (50th percentile) value of {}.", col),
            format!("PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY {})", col),
            vec![col.clone()],
            Difficulty::Medium,
            KpiDetail::Statistical(Statistical::Percentile {
                column: col.clone(),
                percentile: 50,
            }),
        ));

        for percentile in [25u8, 75] {
            kpis.push(KpiDescriptor::new(
                format!("{}th Percentile of {}", percentile, title),
                format!("{}th percentile value of {}.", percentile, col),
                format!(
                    "PERCENTILE_CONT({}) WITHIN GROUP (ORDER BY {})",
                    f64::from(percentile) / 100.0,
                    col
                ),
                vec![col.clone()],
                Difficulty::Medium,
                KpiDetail::Statistical(Statistical::Percentile {
                    column: col.clone(),
                    percentile,
                }),
            ));
        }
    }

    for (i, denominator) in numeric.iter().enumerate() {
        if column_sum(table, denominator)? == 0.0 {
            continue;
        }
        for numerator in &numeric[i + 1..] {
            kpis.push(KpiDescriptor::new(
                format!("{} to {} Ratio", humanize(numerator), humanize(denominator)),
                format!("Ratio of {} to {}.", numerator, denominator),
                format!("SUM({}) / SUM({})", numerator, denominator),
                vec![denominator.clone(), numerator.clone()],
                Difficulty::Medium,
                KpiDetail::Ratio(Ratio::NumericRatio {
                    column: numerator.clone(),
                    denominator: denominator.clone(),
                }),
            ));
        }
    }

    if let Some(datetime_col) = schema.datetime_columns.first() {
        for col in numeric.iter().take(GROWTH_COLUMN_LIMIT) {
            kpis.push(KpiDescriptor::new(
                format!("{} Growth Rate", humanize(col)),
                format!("Period-over-period growth rate of {}.", col),
                format!(
                    "(SUM({0}) - LAG(SUM({0}))) / LAG(SUM({0})) * 100",
                    col
                ),
                vec![col.clone(), datetime_col.clone()],
                Difficulty::Advanced,
                KpiDetail::Growth(Growth::PctChange {
                    column: col.clone(),
                    group_by: datetime_col.clone(),
                }),
            ));
        }
    }

    Ok(kpis)
}
