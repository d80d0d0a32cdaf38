//! SQL query templates for KPI descriptors.
//!
//! Queries are generic, human-readable templates rather than a specific
//! dialect. Clauses are joined with newlines and terminated with `;`.

use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use crate::kpi::{
    Aggregation, Anomaly, CategoryBreakdown, Comparative, Conversion, Distribution, Granularity,
    Growth, KpiDescriptor, KpiDetail, Pattern, PeriodMeasure, Ratio, Statistical, Trend,
};

/// Query used when a descriptor lacks what its template needs.
const FALLBACK_SELECT: &str = "SELECT COUNT(*) AS count";

/// Make a column name safe to embed in SQL.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, leading and trailing
/// underscores are trimmed, and a name not starting with a letter gets a
/// `_` prefix. A name with nothing left becomes `col_` plus the first eight
/// hex digits of its SHA-256.
pub fn sanitize_column_name(column: &str) -> String {
    let replaced: String = column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let trimmed = replaced.trim_matches('_');

    match trimmed.chars().next() {
        None => {
            let digest = format!("{:x}", Sha256::digest(column.as_bytes()));
            format!("col_{}", &digest[..8])
        }
        Some(first) if first.is_ascii_alphabetic() => trimmed.to_string(),
        Some(_) => format!("_{}", trimmed),
    }
}

fn quoted(column: &str) -> String {
    format!("\"{}\"", sanitize_column_name(column))
}

/// Quote a value as a SQL string literal.
fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Clauses of one query before joining.
struct Query {
    select: String,
    from: String,
    group_by: Option<String>,
    order_by: Option<String>,
}

impl Query {
    fn new(select: String, from: String) -> Self {
        Self {
            select,
            from,
            group_by: None,
            order_by: None,
        }
    }

    fn group_by(mut self, clause: String) -> Self {
        self.group_by = Some(clause);
        self
    }

    fn order_by(mut self, clause: impl Into<String>) -> Self {
        self.order_by = Some(clause.into());
        self
    }

    fn finish(self) -> String {
        let mut parts = vec![self.select, self.from];
        parts.extend(self.group_by.map(|g| format!("GROUP BY {}", g)));
        parts.extend(self.order_by.map(|o| format!("ORDER BY {}", o)));
        parts.join("\n") + ";"
    }
}

/// Renders descriptors as SQL against a named table.
#[derive(Debug, Clone)]
pub struct SqlTemplater {
    table_name: String,
}

impl SqlTemplater {
    /// Templater for the placeholder table `your_table`.
    pub fn new() -> Self {
        Self::with_table("your_table")
    }

    pub fn with_table(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// SQL for every descriptor, keyed by KPI name in catalogue order.
    pub fn render_all(&self, kpis: &[KpiDescriptor]) -> IndexMap<String, String> {
        kpis.iter()
            .map(|kpi| (kpi.name.clone(), self.render(kpi)))
            .collect()
    }

    /// SQL for one descriptor.
    pub fn render(&self, kpi: &KpiDescriptor) -> String {
        let from = format!("FROM {}", self.table_name);
        let table = &self.table_name;

        let query = match &kpi.detail {
            KpiDetail::Aggregation(agg) => Query::new(aggregation_select(agg), from),

            KpiDetail::TimeSeries(ts) => {
                let agg = ts.aggregate();
                let (g, c) = (quoted(&agg.group_by), quoted(&agg.column));
                let measure = match agg.measure {
                    PeriodMeasure::Sum => format!("SUM({})", c),
                    PeriodMeasure::CountDistinct => format!("COUNT(DISTINCT {})", c),
                };
                let alias = format!("total_{}", sanitize_column_name(&agg.column));

                match ts.period() {
                    Granularity::Day => Query::new(
                        format!("SELECT DATE({}) AS day, {} AS {}", g, measure, alias),
                        from,
                    )
                    .group_by(format!("DATE({})", g))
                    .order_by("day"),
                    Granularity::Month => Query::new(
                        format!(
                            "SELECT YEAR({0}) AS year, MONTH({0}) AS month, {1} AS {2}",
                            g, measure, alias
                        ),
                        from,
                    )
                    .group_by(format!("YEAR({0}), MONTH({0})", g))
                    .order_by("year, month"),
                    Granularity::Year => Query::new(
                        format!("SELECT YEAR({}) AS year, {} AS {}", g, measure, alias),
                        from,
                    )
                    .group_by(format!("YEAR({})", g))
                    .order_by("year"),
                }
            }

            KpiDetail::CategoryBreakdown(cb) => match cb {
                CategoryBreakdown::CountByCategory { group_by } => {
                    let g = quoted(group_by);
                    Query::new(format!("SELECT {}, COUNT(*) AS count", g), from)
                        .group_by(g)
                        .order_by("count DESC")
                }
                CategoryBreakdown::SumByCategory { column, group_by }
                | CategoryBreakdown::AvgByCategory { column, group_by } => {
                    let func = if matches!(cb, CategoryBreakdown::SumByCategory { .. }) {
                        "SUM"
                    } else {
                        "AVG"
                    };
                    let g = quoted(group_by);
                    let name = sanitize_column_name(column);
                    Query::new(
                        format!("SELECT {}, {}(\"{}\") AS total_{}", g, func, name, name),
                        from,
                    )
                    .group_by(g)
                    .order_by(format!("total_{} DESC", name))
                }
            },

            KpiDetail::Conversion(conv) => match conv {
                Conversion::Distribution { group_by } => {
                    let g = quoted(group_by);
                    Query::new(format!("SELECT {}, COUNT(*) AS count", g), from)
                        .group_by(g)
                        .order_by("count DESC")
                }
                Conversion::Rate {
                    column,
                    status_values,
                } => match status_values.first() {
                    Some(value) => Query::new(
                        format!(
                            "SELECT (COUNT(CASE WHEN {} = {} THEN 1 END) * 100.0 / COUNT(*)) AS conversion_rate",
                            quoted(column),
                            literal(value)
                        ),
                        from,
                    ),
                    None => Query::new(FALLBACK_SELECT.to_string(), from),
                },
            },

            KpiDetail::Statistical(Statistical::Percentile { column, percentile }) => {
                let name = sanitize_column_name(column);
                let alias = if *percentile == 50 {
                    format!("median_{}", name)
                } else {
                    format!("p{}_{}", percentile, name)
                };
                Query::new(
                    format!(
                        "SELECT PERCENTILE_CONT({}) WITHIN GROUP (ORDER BY \"{}\") AS {}",
                        f64::from(*percentile) / 100.0,
                        name,
                        alias
                    ),
                    from,
                )
            }

            KpiDetail::Ratio(Ratio::NumericRatio {
                column,
                denominator,
            }) => {
                let (c, d) = (sanitize_column_name(column), sanitize_column_name(denominator));
                Query::new(
                    format!(
                        "SELECT SUM(\"{0}\") / SUM(\"{1}\") AS {0}_to_{1}_ratio",
                        c, d
                    ),
                    from,
                )
            }

            KpiDetail::Growth(Growth::PctChange { column, group_by }) => {
                let (c, g) = (quoted(column), quoted(group_by));
                let lag = format!("LAG(SUM({})) OVER (ORDER BY DATE({}))", c, g);
                Query::new(
                    format!(
                        "SELECT DATE({g}) AS period, SUM({c}) AS value, ((SUM({c}) - {lag}) / {lag} * 100) AS growth_rate"
                    ),
                    from,
                )
                .group_by(format!("DATE({})", g))
                .order_by("period")
            }

            KpiDetail::AnomalyDetection(anomaly) => match anomaly {
                Anomaly::ZscoreAnomalies { column, .. } => {
                    let c = sanitize_column_name(column);
                    Query::new(
                        format!(
                            "SELECT (COUNT(CASE WHEN ABS(({0} - AVG({0})) / STDDEV({0})) > 3 THEN 1 END) * 100.0 / COUNT(*)) AS anomaly_rate",
                            c
                        ),
                        from,
                    )
                }
                Anomaly::IqrOutliers { column, .. } => {
                    let c = sanitize_column_name(column);
                    Query::new(
                        format!(
                            "SELECT COUNT(CASE WHEN {0} < (Q1 - 1.5 * IQR) OR {0} > (Q3 + 1.5 * IQR) THEN 1 END) AS outlier_count, COUNT(*) AS total_count",
                            c
                        ),
                        from,
                    )
                }
            },

            KpiDetail::PatternDetection(pattern) => match pattern {
                Pattern::WeeklySeasonality {
                    column, group_by, ..
                } => {
                    let g = quoted(group_by);
                    Query::new(
                        format!(
                            "SELECT DAYOFWEEK({}) AS day_of_week, AVG({}) AS avg_value",
                            g,
                            quoted(column)
                        ),
                        from,
                    )
                    .group_by(format!("DAYOFWEEK({})", g))
                    .order_by("day_of_week")
                }
                Pattern::MonthlySeasonality {
                    column, group_by, ..
                } => {
                    let g = quoted(group_by);
                    Query::new(
                        format!("SELECT MONTH({}) AS month, AVG({}) AS avg_value", g, quoted(column)),
                        from,
                    )
                    .group_by(format!("MONTH({})", g))
                    .order_by("month")
                }
            },

            KpiDetail::ComparativeAnalysis(comparative) => match comparative {
                Comparative::VsAverage {
                    column, group_by, ..
                } => {
                    let (c, g) = (quoted(column), quoted(group_by));
                    let overall = format!("(SELECT AVG({}) FROM {})", c, table);
                    Query::new(
                        format!(
                            "SELECT {g}, AVG({c}) AS avg_value, (AVG({c}) - {overall}) * 100.0 / {overall} AS pct_diff_from_avg"
                        ),
                        from,
                    )
                    .group_by(g)
                    .order_by("pct_diff_from_avg DESC")
                }
                Comparative::PerformanceGap {
                    column, group_by, ..
                } => {
                    let (c, g) = (quoted(column), quoted(group_by));
                    Query::new(
                        "SELECT MAX(avg_value) - MIN(avg_value) AS performance_gap".to_string(),
                        format!(
                            "FROM (SELECT {g}, AVG({c}) AS avg_value FROM {table} GROUP BY {g}) grouped"
                        ),
                    )
                }
            },

            KpiDetail::DistributionAnalysis(distribution) => match distribution {
                Distribution::Skewness { column, .. } => {
                    let c = quoted(column);
                    Query::new(
                        format!(
                            "SELECT (3 * (AVG({c}) - PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY {c}))) / STDDEV({c}) AS skewness"
                        ),
                        from,
                    )
                }
                Distribution::Pareto { column, .. } => {
                    let c = quoted(column);
                    Query::new(
                        format!(
                            "SELECT (SUM(CASE WHEN rn <= CEIL(total * 0.2) THEN {c} ELSE 0 END) * 100.0 / SUM({c})) AS concentration_pct"
                        ),
                        format!(
                            "FROM (SELECT {c}, ROW_NUMBER() OVER (ORDER BY {c} DESC) AS rn, COUNT(*) OVER () AS total FROM {table}) ranked"
                        ),
                    )
                }
                Distribution::Variability { column, .. } => {
                    let c = quoted(column);
                    Query::new(
                        format!(
                            "SELECT (STDDEV({c}) / AVG({c}) * 100) AS coefficient_of_variation"
                        ),
                        from,
                    )
                }
            },

            KpiDetail::TrendAnalysis(Trend::Breakpoint {
                column, group_by, ..
            }) => {
                let (c, g) = (quoted(column), quoted(group_by));
                let midpoint = format!(
                    "(SELECT DATE({g}) FROM {table} ORDER BY DATE({g}) LIMIT 1 OFFSET (SELECT COUNT(*) / 2 FROM {table}))"
                );
                Query::new(
                    format!(
                        "SELECT AVG(CASE WHEN DATE({g}) <= {midpoint} THEN {c} END) AS first_half_avg, \
                         AVG(CASE WHEN DATE({g}) > {midpoint} THEN {c} END) AS second_half_avg"
                    ),
                    from,
                )
            }
        };

        query.finish()
    }
}

impl Default for SqlTemplater {
    fn default() -> Self {
        Self::new()
    }
}

fn aggregation_select(agg: &Aggregation) -> String {
    let (func, column) = match agg {
        Aggregation::Count => return "SELECT COUNT(*) AS total_records".to_string(),
        Aggregation::CountDistinct { column } => {
            let name = sanitize_column_name(column);
            return format!(
                "SELECT COUNT(DISTINCT \"{0}\") AS count_distinct_{0}",
                name
            );
        }
        Aggregation::Sum { column } => ("SUM", column),
        Aggregation::Average { column } => ("AVG", column),
        Aggregation::Min { column } => ("MIN", column),
        Aggregation::Max { column } => ("MAX", column),
    };
    let name = sanitize_column_name(column);
    format!(
        "SELECT {}(\"{}\") AS {}_{}",
        func,
        name,
        func.to_lowercase(),
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::{Difficulty, PeriodAggregate, TimeSeries};

    fn kpi(detail: KpiDetail) -> KpiDescriptor {
        KpiDescriptor::new("k", "", "", vec![], Difficulty::Easy, detail)
    }

    #[test]
    fn test_sanitize_column_name() {
        assert_eq!(sanitize_column_name("unit price"), "unit_price");
        assert_eq!(sanitize_column_name("__amount__"), "amount");
        assert_eq!(sanitize_column_name("2020 sales"), "_2020_sales");
        assert_eq!(sanitize_column_name("revenue($)"), "revenue");
        let hashed = sanitize_column_name("%%%");
        assert!(hashed.starts_with("col_"));
        assert_eq!(hashed.len(), 12);
        assert_eq!(hashed, sanitize_column_name("%%%"));
    }

    #[test]
    fn test_record_count() {
        let sql = SqlTemplater::new().render(&kpi(KpiDetail::Aggregation(Aggregation::Count)));
        assert_eq!(sql, "SELECT COUNT(*) AS total_records\nFROM your_table;");
    }

    #[test]
    fn test_average_uses_sanitized_column() {
        let sql = SqlTemplater::with_table("orders").render(&kpi(KpiDetail::Aggregation(
            Aggregation::Average {
                column: "unit price".into(),
            },
        )));
        assert_eq!(sql, "SELECT AVG(\"unit_price\") AS avg_unit_price\nFROM orders;");
    }

    #[test]
    fn test_monthly_time_series() {
        let sql = SqlTemplater::new().render(&kpi(KpiDetail::TimeSeries(TimeSeries::new(
            Granularity::Month,
            PeriodAggregate {
                column: "amount".into(),
                group_by: "order_date".into(),
                measure: PeriodMeasure::Sum,
            },
        ))));
        assert_eq!(
            sql,
            "SELECT YEAR(\"order_date\") AS year, MONTH(\"order_date\") AS month, SUM(\"amount\") AS total_amount\n\
             FROM your_table\n\
             GROUP BY YEAR(\"order_date\"), MONTH(\"order_date\")\n\
             ORDER BY year, month;"
        );
    }

    #[test]
    fn test_count_by_category() {
        let sql = SqlTemplater::new().render(&kpi(KpiDetail::CategoryBreakdown(
            CategoryBreakdown::CountByCategory {
                group_by: "region".into(),
            },
        )));
        assert_eq!(
            sql,
            "SELECT \"region\", COUNT(*) AS count\nFROM your_table\nGROUP BY \"region\"\nORDER BY count DESC;"
        );
    }

    #[test]
    fn test_conversion_rate() {
        let rate = kpi(KpiDetail::Conversion(Conversion::Rate {
            column: "status".into(),
            status_values: vec!["won".into(), "lost".into()],
        }));
        assert_eq!(
            SqlTemplater::new().render(&rate),
            "SELECT (COUNT(CASE WHEN \"status\" = 'won' THEN 1 END) * 100.0 / COUNT(*)) AS conversion_rate\nFROM your_table;"
        );
    }

    #[test]
    fn test_rate_without_values_falls_back() {
        let rate = kpi(KpiDetail::Conversion(Conversion::Rate {
            column: "status".into(),
            status_values: vec![],
        }));
        assert_eq!(
            SqlTemplater::new().render(&rate),
            "SELECT COUNT(*) AS count\nFROM your_table;"
        );
    }

    #[test]
    fn test_percentiles() {
        let templater = SqlTemplater::new();
        let median = templater.render(&kpi(KpiDetail::Statistical(Statistical::Percentile {
            column: "amount".into(),
            percentile: 50,
        })));
        assert!(median.starts_with(
            "SELECT PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY \"amount\") AS median_amount"
        ));
        let p75 = templater.render(&kpi(KpiDetail::Statistical(Statistical::Percentile {
            column: "amount".into(),
            percentile: 75,
        })));
        assert!(p75.contains("PERCENTILE_CONT(0.75)"));
        assert!(p75.contains("AS p75_amount"));
    }

    #[test]
    fn test_growth_orders_by_period() {
        let sql = SqlTemplater::new().render(&kpi(KpiDetail::Growth(Growth::PctChange {
            column: "amount".into(),
            group_by: "order_date".into(),
        })));
        assert!(sql.contains("GROUP BY DATE(\"order_date\")"));
        assert!(sql.ends_with("ORDER BY period;"));
    }

    #[test]
    fn test_render_all_keeps_order() {
        let mut a = kpi(KpiDetail::Aggregation(Aggregation::Count));
        a.name = "b".into();
        let mut b = kpi(KpiDetail::Aggregation(Aggregation::Count));
        b.name = "a".into();
        let queries = SqlTemplater::new().render_all(&[a, b]);
        let names: Vec<&String> = queries.keys().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
