//! KPI descriptor types.
//!
//! A [`KpiDescriptor`] is a common header plus a [`KpiDetail`] tagged union
//! with one variant per category. Everything downstream (SQL, charts,
//! exports) reads the category, subcategory, SQL function, measure and
//! dimension through the descriptor's accessors, which match exhaustively
//! on the detail.

use serde::{Deserialize, Serialize};

// =============================================================================
// ENUMERATIONS
// =============================================================================

/// How hard a KPI is to compute or interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Advanced,
}

impl Difficulty {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Advanced => "Advanced",
        }
    }
}

/// KPI category. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Aggregation,
    TimeSeries,
    CategoryBreakdown,
    Conversion,
    Statistical,
    Ratio,
    Growth,
    AnomalyDetection,
    PatternDetection,
    ComparativeAnalysis,
    DistributionAnalysis,
    TrendAnalysis,
}

impl Category {
    /// Wire name, e.g. `time_series`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Aggregation => "aggregation",
            Category::TimeSeries => "time_series",
            Category::CategoryBreakdown => "category_breakdown",
            Category::Conversion => "conversion",
            Category::Statistical => "statistical",
            Category::Ratio => "ratio",
            Category::Growth => "growth",
            Category::AnomalyDetection => "anomaly_detection",
            Category::PatternDetection => "pattern_detection",
            Category::ComparativeAnalysis => "comparative_analysis",
            Category::DistributionAnalysis => "distribution_analysis",
            Category::TrendAnalysis => "trend_analysis",
        }
    }

    /// Get a human-readable label, e.g. `Time Series`.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Aggregation => "Aggregation",
            Category::TimeSeries => "Time Series",
            Category::CategoryBreakdown => "Category Breakdown",
            Category::Conversion => "Conversion",
            Category::Statistical => "Statistical",
            Category::Ratio => "Ratio",
            Category::Growth => "Growth",
            Category::AnomalyDetection => "Anomaly Detection",
            Category::PatternDetection => "Pattern Detection",
            Category::ComparativeAnalysis => "Comparative Analysis",
            Category::DistributionAnalysis => "Distribution Analysis",
            Category::TrendAnalysis => "Trend Analysis",
        }
    }

    /// Whether the category comes from a core (non-creative) family.
    pub fn is_core(&self) -> bool {
        matches!(
            self,
            Category::Aggregation
                | Category::TimeSeries
                | Category::CategoryBreakdown
                | Category::Conversion
                | Category::Statistical
                | Category::Ratio
                | Category::Growth
        )
    }
}

/// SQL template selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlFunction {
    Sum,
    Avg,
    Min,
    Max,
    Count,
    CountDistinct,
    Rate,
    Median,
    Percentile,
    Ratio,
    GrowthRate,
    AnomalyRate,
    OutlierDetection,
    WeeklyPattern,
    MonthlyPattern,
    Comparative,
    PerformanceGap,
    Skewness,
    Concentration,
    Variability,
    TrendChange,
}

impl SqlFunction {
    /// Wire name, e.g. `COUNT_DISTINCT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlFunction::Sum => "SUM",
            SqlFunction::Avg => "AVG",
            SqlFunction::Min => "MIN",
            SqlFunction::Max => "MAX",
            SqlFunction::Count => "COUNT",
            SqlFunction::CountDistinct => "COUNT_DISTINCT",
            SqlFunction::Rate => "RATE",
            SqlFunction::Median => "MEDIAN",
            SqlFunction::Percentile => "PERCENTILE",
            SqlFunction::Ratio => "RATIO",
            SqlFunction::GrowthRate => "GROWTH_RATE",
            SqlFunction::AnomalyRate => "ANOMALY_RATE",
            SqlFunction::OutlierDetection => "OUTLIER_DETECTION",
            SqlFunction::WeeklyPattern => "WEEKLY_PATTERN",
            SqlFunction::MonthlyPattern => "MONTHLY_PATTERN",
            SqlFunction::Comparative => "COMPARATIVE",
            SqlFunction::PerformanceGap => "PERFORMANCE_GAP",
            SqlFunction::Skewness => "SKEWNESS",
            SqlFunction::Concentration => "CONCENTRATION",
            SqlFunction::Variability => "VARIABILITY",
            SqlFunction::TrendChange => "TREND_CHANGE",
        }
    }
}

/// Time bucket used by time-series KPIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    /// Period word used in KPI names ("per Day").
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Day => "Day",
            Granularity::Month => "Month",
            Granularity::Year => "Year",
        }
    }

    /// Lowercase period word used in descriptions.
    pub fn noun(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

// =============================================================================
// CATEGORY PAYLOADS
// =============================================================================

/// Whole-table aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Aggregation {
    Sum { column: String },
    Average { column: String },
    Min { column: String },
    Max { column: String },
    CountDistinct { column: String },
    Count,
}

/// Aggregate applied within each time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMeasure {
    Sum,
    CountDistinct,
}

/// Measure bucketed by the first datetime column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    pub column: String,
    pub group_by: String,
    pub measure: PeriodMeasure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum TimeSeries {
    Daily(PeriodAggregate),
    Monthly(PeriodAggregate),
    Yearly(PeriodAggregate),
}

impl TimeSeries {
    /// Wrap an aggregate in the variant for `period`.
    pub fn new(period: Granularity, aggregate: PeriodAggregate) -> Self {
        match period {
            Granularity::Day => TimeSeries::Daily(aggregate),
            Granularity::Month => TimeSeries::Monthly(aggregate),
            Granularity::Year => TimeSeries::Yearly(aggregate),
        }
    }

    pub fn period(&self) -> Granularity {
        match self {
            TimeSeries::Daily(_) => Granularity::Day,
            TimeSeries::Monthly(_) => Granularity::Month,
            TimeSeries::Yearly(_) => Granularity::Year,
        }
    }

    pub fn aggregate(&self) -> &PeriodAggregate {
        match self {
            TimeSeries::Daily(a) | TimeSeries::Monthly(a) | TimeSeries::Yearly(a) => a,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum CategoryBreakdown {
    SumByCategory { column: String, group_by: String },
    AvgByCategory { column: String, group_by: String },
    CountByCategory { group_by: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Conversion {
    Distribution {
        group_by: String,
    },
    /// Share of rows whose status equals `status_values[0]`.
    Rate {
        column: String,
        status_values: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Statistical {
    /// `percentile` is 25, 50 or 75; 50 renders as a median.
    Percentile { column: String, percentile: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Ratio {
    NumericRatio { column: String, denominator: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Growth {
    PctChange { column: String, group_by: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Anomaly {
    ZscoreAnomalies {
        column: String,
        anomaly_count: usize,
        anomaly_percentage: f64,
    },
    IqrOutliers {
        column: String,
        outlier_count: usize,
        outlier_percentage: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Pattern {
    WeeklySeasonality {
        column: String,
        group_by: String,
        best_day: String,
        worst_day: String,
        variance: f64,
    },
    MonthlySeasonality {
        column: String,
        group_by: String,
        best_month: String,
        worst_month: String,
        variance: f64,
    },
}

/// Group-vs-overall comparisons. Percentages are `None` when the baseline
/// is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Comparative {
    VsAverage {
        column: String,
        group_by: String,
        top_performer: String,
        top_performance_pct: Option<f64>,
        bottom_performer: String,
        bottom_performance_pct: Option<f64>,
    },
    PerformanceGap {
        column: String,
        group_by: String,
        gap_percentage: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Distribution {
    Skewness {
        column: String,
        skewness_value: f64,
    },
    Pareto {
        column: String,
        concentration_percentage: f64,
    },
    Variability {
        column: String,
        coefficient_of_variation: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum Trend {
    Breakpoint {
        column: String,
        group_by: String,
        change_percentage: f64,
        first_half_avg: f64,
        second_half_avg: f64,
    },
}

/// Category-specific part of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum KpiDetail {
    Aggregation(Aggregation),
    TimeSeries(TimeSeries),
    CategoryBreakdown(CategoryBreakdown),
    Conversion(Conversion),
    Statistical(Statistical),
    Ratio(Ratio),
    Growth(Growth),
    AnomalyDetection(Anomaly),
    PatternDetection(Pattern),
    ComparativeAnalysis(Comparative),
    DistributionAnalysis(Distribution),
    TrendAnalysis(Trend),
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// One generated KPI definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiDescriptor {
    /// Display name; unique within a catalogue.
    pub name: String,
    /// Human-readable sentence, possibly embedding computed values.
    pub description: String,
    /// Pseudo-SQL formula.
    pub logic: String,
    /// Source columns, at most two.
    pub columns_used: Vec<String>,
    pub difficulty: Difficulty,
    /// Precomputed tip for the reader.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub insight: Option<String>,
    /// Set on copies whose name/description came from a refiner.
    #[serde(default)]
    pub refined_by_llm: bool,
    #[serde(flatten)]
    pub detail: KpiDetail,
}

impl KpiDescriptor {
    /// Create a descriptor with no insight.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        logic: impl Into<String>,
        columns_used: Vec<String>,
        difficulty: Difficulty,
        detail: KpiDetail,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            logic: logic.into(),
            columns_used,
            difficulty,
            insight: None,
            refined_by_llm: false,
            detail,
        }
    }

    /// Attach an insight.
    pub fn with_insight(mut self, insight: impl Into<String>) -> Self {
        self.insight = Some(insight.into());
        self
    }

    pub fn category(&self) -> Category {
        match &self.detail {
            KpiDetail::Aggregation(_) => Category::Aggregation,
            KpiDetail::TimeSeries(_) => Category::TimeSeries,
            KpiDetail::CategoryBreakdown(_) => Category::CategoryBreakdown,
            KpiDetail::Conversion(_) => Category::Conversion,
            KpiDetail::Statistical(_) => Category::Statistical,
            KpiDetail::Ratio(_) => Category::Ratio,
            KpiDetail::Growth(_) => Category::Growth,
            KpiDetail::AnomalyDetection(_) => Category::AnomalyDetection,
            KpiDetail::PatternDetection(_) => Category::PatternDetection,
            KpiDetail::ComparativeAnalysis(_) => Category::ComparativeAnalysis,
            KpiDetail::DistributionAnalysis(_) => Category::DistributionAnalysis,
            KpiDetail::TrendAnalysis(_) => Category::TrendAnalysis,
        }
    }

    /// Wire name of the subcategory, e.g. `sum_by_category`.
    pub fn subcategory(&self) -> &'static str {
        match &self.detail {
            KpiDetail::Aggregation(a) => match a {
                Aggregation::Sum { .. } => "sum",
                Aggregation::Average { .. } => "average",
                Aggregation::Min { .. } => "min",
                Aggregation::Max { .. } => "max",
                Aggregation::CountDistinct { .. } => "count_distinct",
                Aggregation::Count => "count",
            },
            KpiDetail::TimeSeries(t) => match t {
                TimeSeries::Daily(_) => "daily",
                TimeSeries::Monthly(_) => "monthly",
                TimeSeries::Yearly(_) => "yearly",
            },
            KpiDetail::CategoryBreakdown(c) => match c {
                CategoryBreakdown::SumByCategory { .. } => "sum_by_category",
                CategoryBreakdown::AvgByCategory { .. } => "avg_by_category",
                CategoryBreakdown::CountByCategory { .. } => "count_by_category",
            },
            KpiDetail::Conversion(c) => match c {
                Conversion::Distribution { .. } => "distribution",
                Conversion::Rate { .. } => "rate",
            },
            KpiDetail::Statistical(Statistical::Percentile { .. }) => "percentile",
            KpiDetail::Ratio(Ratio::NumericRatio { .. }) => "numeric_ratio",
            KpiDetail::Growth(Growth::PctChange { .. }) => "pct_change",
            KpiDetail::AnomalyDetection(a) => match a {
                Anomaly::ZscoreAnomalies { .. } => "zscore_anomalies",
                Anomaly::IqrOutliers { .. } => "iqr_outliers",
            },
            KpiDetail::PatternDetection(p) => match p {
                Pattern::WeeklySeasonality { .. } => "weekly_seasonality",
                Pattern::MonthlySeasonality { .. } => "monthly_seasonality",
            },
            KpiDetail::ComparativeAnalysis(c) => match c {
                Comparative::VsAverage { .. } => "vs_average",
                Comparative::PerformanceGap { .. } => "performance_gap",
            },
            KpiDetail::DistributionAnalysis(d) => match d {
                Distribution::Skewness { .. } => "skewness",
                Distribution::Pareto { .. } => "pareto",
                Distribution::Variability { .. } => "variability",
            },
            KpiDetail::TrendAnalysis(Trend::Breakpoint { .. }) => "breakpoint",
        }
    }

    pub fn sql_function(&self) -> SqlFunction {
        match &self.detail {
            KpiDetail::Aggregation(a) => match a {
                Aggregation::Sum { .. } => SqlFunction::Sum,
                Aggregation::Average { .. } => SqlFunction::Avg,
                Aggregation::Min { .. } => SqlFunction::Min,
                Aggregation::Max { .. } => SqlFunction::Max,
                Aggregation::CountDistinct { .. } => SqlFunction::CountDistinct,
                Aggregation::Count => SqlFunction::Count,
            },
            KpiDetail::TimeSeries(t) => match t.aggregate().measure {
                PeriodMeasure::Sum => SqlFunction::Sum,
                PeriodMeasure::CountDistinct => SqlFunction::CountDistinct,
            },
            KpiDetail::CategoryBreakdown(c) => match c {
                CategoryBreakdown::SumByCategory { .. } => SqlFunction::Sum,
                CategoryBreakdown::AvgByCategory { .. } => SqlFunction::Avg,
                CategoryBreakdown::CountByCategory { .. } => SqlFunction::Count,
            },
            KpiDetail::Conversion(c) => match c {
                Conversion::Distribution { .. } => SqlFunction::Count,
                Conversion::Rate { .. } => SqlFunction::Rate,
            },
            KpiDetail::Statistical(Statistical::Percentile { percentile, .. }) => {
                if *percentile == 50 {
                    SqlFunction::Median
                } else {
                    SqlFunction::Percentile
                }
            }
            KpiDetail::Ratio(_) => SqlFunction::Ratio,
            KpiDetail::Growth(_) => SqlFunction::GrowthRate,
            KpiDetail::AnomalyDetection(a) => match a {
                Anomaly::ZscoreAnomalies { .. } => SqlFunction::AnomalyRate,
                Anomaly::IqrOutliers { .. } => SqlFunction::OutlierDetection,
            },
            KpiDetail::PatternDetection(p) => match p {
                Pattern::WeeklySeasonality { .. } => SqlFunction::WeeklyPattern,
                Pattern::MonthlySeasonality { .. } => SqlFunction::MonthlyPattern,
            },
            KpiDetail::ComparativeAnalysis(c) => match c {
                Comparative::VsAverage { .. } => SqlFunction::Comparative,
                Comparative::PerformanceGap { .. } => SqlFunction::PerformanceGap,
            },
            KpiDetail::DistributionAnalysis(d) => match d {
                Distribution::Skewness { .. } => SqlFunction::Skewness,
                Distribution::Pareto { .. } => SqlFunction::Concentration,
                Distribution::Variability { .. } => SqlFunction::Variability,
            },
            KpiDetail::TrendAnalysis(_) => SqlFunction::TrendChange,
        }
    }

    /// The measured column, if any.
    pub fn column(&self) -> Option<&str> {
        let column = match &self.detail {
            KpiDetail::Aggregation(a) => match a {
                Aggregation::Sum { column }
                | Aggregation::Average { column }
                | Aggregation::Min { column }
                | Aggregation::Max { column }
                | Aggregation::CountDistinct { column } => column,
                Aggregation::Count => return None,
            },
            KpiDetail::TimeSeries(t) => &t.aggregate().column,
            KpiDetail::CategoryBreakdown(c) => match c {
                CategoryBreakdown::SumByCategory { column, .. }
                | CategoryBreakdown::AvgByCategory { column, .. } => column,
                CategoryBreakdown::CountByCategory { .. } => return None,
            },
            KpiDetail::Conversion(c) => match c {
                Conversion::Distribution { .. } => return None,
                Conversion::Rate { column, .. } => column,
            },
            KpiDetail::Statistical(Statistical::Percentile { column, .. }) => column,
            KpiDetail::Ratio(Ratio::NumericRatio { column, .. }) => column,
            KpiDetail::Growth(Growth::PctChange { column, .. }) => column,
            KpiDetail::AnomalyDetection(a) => match a {
                Anomaly::ZscoreAnomalies { column, .. } | Anomaly::IqrOutliers { column, .. } => {
                    column
                }
            },
            KpiDetail::PatternDetection(p) => match p {
                Pattern::WeeklySeasonality { column, .. }
                | Pattern::MonthlySeasonality { column, .. } => column,
            },
            KpiDetail::ComparativeAnalysis(c) => match c {
                Comparative::VsAverage { column, .. }
                | Comparative::PerformanceGap { column, .. } => column,
            },
            KpiDetail::DistributionAnalysis(d) => match d {
                Distribution::Skewness { column, .. }
                | Distribution::Pareto { column, .. }
                | Distribution::Variability { column, .. } => column,
            },
            KpiDetail::TrendAnalysis(Trend::Breakpoint { column, .. }) => column,
        };
        Some(column.as_str())
    }

    /// The grouping column, if any.
    pub fn group_by(&self) -> Option<&str> {
        let group_by = match &self.detail {
            KpiDetail::TimeSeries(t) => &t.aggregate().group_by,
            KpiDetail::CategoryBreakdown(c) => match c {
                CategoryBreakdown::SumByCategory { group_by, .. }
                | CategoryBreakdown::AvgByCategory { group_by, .. }
                | CategoryBreakdown::CountByCategory { group_by } => group_by,
            },
            KpiDetail::Conversion(Conversion::Distribution { group_by }) => group_by,
            KpiDetail::Growth(Growth::PctChange { group_by, .. }) => group_by,
            KpiDetail::PatternDetection(p) => match p {
                Pattern::WeeklySeasonality { group_by, .. }
                | Pattern::MonthlySeasonality { group_by, .. } => group_by,
            },
            KpiDetail::ComparativeAnalysis(c) => match c {
                Comparative::VsAverage { group_by, .. }
                | Comparative::PerformanceGap { group_by, .. } => group_by,
            },
            KpiDetail::TrendAnalysis(Trend::Breakpoint { group_by, .. }) => group_by,
            KpiDetail::Aggregation(_)
            | KpiDetail::Conversion(Conversion::Rate { .. })
            | KpiDetail::Statistical(_)
            | KpiDetail::Ratio(_)
            | KpiDetail::AnomalyDetection(_)
            | KpiDetail::DistributionAnalysis(_) => return None,
        };
        Some(group_by.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_by_region() -> KpiDescriptor {
        KpiDescriptor::new(
            "Amount by Region",
            "Total amount broken down by region.",
            "SUM(amount) GROUP BY region",
            vec!["amount".into(), "region".into()],
            Difficulty::Medium,
            KpiDetail::CategoryBreakdown(CategoryBreakdown::SumByCategory {
                column: "amount".into(),
                group_by: "region".into(),
            }),
        )
    }

    #[test]
    fn test_derived_fields() {
        let kpi = sum_by_region();
        assert_eq!(kpi.category(), Category::CategoryBreakdown);
        assert_eq!(kpi.subcategory(), "sum_by_category");
        assert_eq!(kpi.sql_function(), SqlFunction::Sum);
        assert_eq!(kpi.column(), Some("amount"));
        assert_eq!(kpi.group_by(), Some("region"));
    }

    #[test]
    fn test_median_is_a_percentile() {
        let kpi = KpiDescriptor::new(
            "Median Amount",
            "",
            "",
            vec!["amount".into()],
            Difficulty::Medium,
            KpiDetail::Statistical(Statistical::Percentile {
                column: "amount".into(),
                percentile: 50,
            }),
        );
        assert_eq!(kpi.sql_function(), SqlFunction::Median);
        assert_eq!(kpi.group_by(), None);
    }

    #[test]
    fn test_serializes_flat_tags() {
        let value = serde_json::to_value(sum_by_region()).unwrap();
        assert_eq!(value["category"], "category_breakdown");
        assert_eq!(value["subcategory"], "sum_by_category");
        assert_eq!(value["column"], "amount");
        assert_eq!(value["group_by"], "region");
        assert_eq!(value["difficulty"], "medium");
        assert!(value.get("insight").is_none());
    }

    #[test]
    fn test_time_series_period() {
        let series = TimeSeries::new(
            Granularity::Month,
            PeriodAggregate {
                column: "amount".into(),
                group_by: "order_date".into(),
                measure: PeriodMeasure::Sum,
            },
        );
        assert_eq!(series.period(), Granularity::Month);
        assert!(matches!(series, TimeSeries::Monthly(_)));
    }

    #[test]
    fn test_sql_function_wire_name() {
        assert_eq!(
            serde_json::to_string(&SqlFunction::CountDistinct).unwrap(),
            "\"COUNT_DISTINCT\""
        );
        assert_eq!(SqlFunction::CountDistinct.as_str(), "COUNT_DISTINCT");
    }
}
