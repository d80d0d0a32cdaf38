//! KPI generation.
//!
//! Rule families turn a [`Schema`](crate::schema::Schema) and its table
//! into [`KpiDescriptor`]s. The core families (aggregation, time series,
//! category breakdown, conversion, statistical) always run; the creative
//! families (anomalies, seasonality, comparisons, distribution, trend)
//! emit only when a statistic crosses its threshold.

mod creative;
mod descriptor;
mod engine;
mod naming;
mod rules;

pub use creative::{
    anomaly_kpis, comparative_kpis, creative_kpis, distribution_kpis, seasonality_kpis,
    trend_kpis,
};
pub use descriptor::{
    Aggregation, Anomaly, Category, CategoryBreakdown, Comparative, Conversion, Difficulty,
    Distribution, Granularity, Growth, KpiDescriptor, KpiDetail, Pattern, PeriodAggregate,
    PeriodMeasure, Ratio, SqlFunction, Statistical, TimeSeries, Trend,
};
pub use engine::{dedup_by_name, generate_kpis, EngineConfig, KpiCatalogue, KpiEngine};
pub use naming::humanize;
pub use rules::{
    aggregation_kpis, category_breakdown_kpis, conversion_kpis, infer_granularity,
    statistical_kpis, time_series_kpis,
};
