//! Chart-type suggestions for KPIs.

use serde::{Deserialize, Serialize};

use crate::kpi::{Aggregation, Conversion, Distribution, KpiDescriptor, KpiDetail};

/// Chart vocabulary understood by dashboard consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Metric,
    Line,
    Bar,
    Pie,
    Histogram,
    Box,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Metric => "metric",
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Histogram => "histogram",
            ChartType::Box => "box",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Metric => "Metric",
            ChartType::Line => "Line",
            ChartType::Bar => "Bar",
            ChartType::Pie => "Pie",
            ChartType::Histogram => "Histogram",
            ChartType::Box => "Box",
        }
    }

    /// Dashboard widget type for this chart.
    pub fn widget_type(&self) -> &'static str {
        match self {
            ChartType::Metric => "kpi_card",
            ChartType::Line => "line_chart",
            ChartType::Pie => "pie_chart",
            ChartType::Bar | ChartType::Histogram | ChartType::Box => "bar_chart",
        }
    }
}

/// Pick a chart type from the KPI's category and subcategory.
pub fn suggest_chart_type(kpi: &KpiDescriptor) -> ChartType {
    match &kpi.detail {
        // Averages are single figures and render as a card like the other
        // aggregations, not as a bar.
        KpiDetail::Aggregation(Aggregation::Average { .. }) => ChartType::Metric,
        KpiDetail::Aggregation(_) | KpiDetail::Ratio(_) => ChartType::Metric,
        KpiDetail::TimeSeries(_) | KpiDetail::Growth(_) | KpiDetail::TrendAnalysis(_) => {
            ChartType::Line
        }
        KpiDetail::CategoryBreakdown(_)
        | KpiDetail::PatternDetection(_)
        | KpiDetail::ComparativeAnalysis(_) => ChartType::Bar,
        KpiDetail::Conversion(Conversion::Distribution { .. }) => ChartType::Pie,
        KpiDetail::Conversion(Conversion::Rate { .. }) => ChartType::Metric,
        KpiDetail::Statistical(_) => ChartType::Histogram,
        KpiDetail::AnomalyDetection(_) => ChartType::Box,
        KpiDetail::DistributionAnalysis(d) => match d {
            Distribution::Skewness { .. } | Distribution::Pareto { .. } => ChartType::Histogram,
            Distribution::Variability { .. } => ChartType::Box,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::{Anomaly, Difficulty, Growth, Statistical};

    fn kpi(detail: KpiDetail) -> KpiDescriptor {
        KpiDescriptor::new("k", "", "", vec![], Difficulty::Easy, detail)
    }

    #[test]
    fn test_chart_mapping() {
        let cases = [
            (
                KpiDetail::Aggregation(Aggregation::Average {
                    column: "a".into(),
                }),
                ChartType::Metric,
            ),
            (
                KpiDetail::Conversion(Conversion::Distribution {
                    group_by: "status".into(),
                }),
                ChartType::Pie,
            ),
            (
                KpiDetail::Conversion(Conversion::Rate {
                    column: "status".into(),
                    status_values: vec!["won".into(), "lost".into()],
                }),
                ChartType::Metric,
            ),
            (
                KpiDetail::Statistical(Statistical::Percentile {
                    column: "a".into(),
                    percentile: 25,
                }),
                ChartType::Histogram,
            ),
            (
                KpiDetail::Growth(Growth::PctChange {
                    column: "a".into(),
                    group_by: "d".into(),
                }),
                ChartType::Line,
            ),
            (
                KpiDetail::AnomalyDetection(Anomaly::IqrOutliers {
                    column: "a".into(),
                    outlier_count: 3,
                    outlier_percentage: 6.0,
                }),
                ChartType::Box,
            ),
            (
                KpiDetail::DistributionAnalysis(Distribution::Pareto {
                    column: "a".into(),
                    concentration_percentage: 80.0,
                }),
                ChartType::Histogram,
            ),
            (
                KpiDetail::DistributionAnalysis(Distribution::Variability {
                    column: "a".into(),
                    coefficient_of_variation: 80.0,
                }),
                ChartType::Box,
            ),
        ];

        for (detail, expected) in cases {
            assert_eq!(suggest_chart_type(&kpi(detail)), expected);
        }
    }

    #[test]
    fn test_every_aggregation_is_a_card() {
        let column = || "amount".to_string();
        for aggregation in [
            Aggregation::Sum { column: column() },
            Aggregation::Average { column: column() },
            Aggregation::Min { column: column() },
            Aggregation::Max { column: column() },
            Aggregation::CountDistinct { column: column() },
            Aggregation::Count,
        ] {
            let chart = suggest_chart_type(&kpi(KpiDetail::Aggregation(aggregation)));
            assert_eq!(chart, ChartType::Metric);
            assert_eq!(chart.widget_type(), "kpi_card");
        }
    }

    #[test]
    fn test_widget_types() {
        assert_eq!(ChartType::Metric.widget_type(), "kpi_card");
        assert_eq!(ChartType::Histogram.widget_type(), "bar_chart");
        assert_eq!(ChartType::Pie.widget_type(), "pie_chart");
    }
}
