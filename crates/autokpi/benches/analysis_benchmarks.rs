//! Full analysis pipeline performance benchmarks.
//!
//! Measures end-to-end analysis performance including parsing, schema
//! inference, KPI generation and rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use autokpi::input::Parser;
use autokpi::{
    check_data_quality, generate_kpis, generate_statistical_summary, infer_schema, AutoKpi,
    SqlTemplater,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate realistic order data CSV.
fn generate_orders_data(rows: usize) -> String {
    let mut data = String::new();

    // Header
    data.push_str("order_id,order_date,region,status,quantity,amount,discount,notes\n");

    let regions = ["north", "south", "east", "west"];
    let statuses = ["completed", "pending", "cancelled"];
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    for row in 0..rows {
        // order_id
        data.push_str(&format!("{},", row + 1));
        // order_date (spread over two years)
        data.push_str(&format!("{},", start + chrono::Duration::days((row % 730) as i64)));
        // region
        data.push_str(regions[row % regions.len()]);
        data.push(',');
        // status
        data.push_str(statuses[row % statuses.len()]);
        data.push(',');
        // quantity
        data.push_str(&format!("{},", 1 + row % 9));
        // amount (with some outliers)
        let amount = if row % 97 == 0 { 5000.0 } else { 20.0 + (row % 180) as f64 * 0.75 };
        data.push_str(&format!("{:.2},", amount));
        // discount
        data.push_str(&format!("{:.2},", (row % 5) as f64 * 2.5));
        // notes
        data.push_str(&format!("Order {} shipped via carrier {}\n", row + 1, row % 13));
    }

    data
}

/// Generate minimal data for baseline measurements.
fn generate_minimal_data(rows: usize) -> String {
    let mut data = String::new();
    data.push_str("id,value\n");
    for row in 0..rows {
        data.push_str(&format!("{},{}\n", row, (row % 10) * 2));
    }
    data
}

fn temp_csv(data: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
    temp.write_all(data.as_bytes()).unwrap();
    temp
}

/// Benchmark full analysis pipeline with order data.
fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_orders_data(*rows);
        let bytes = data.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::new("orders_rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || temp_csv(data),
                |temp| black_box(AutoKpi::new().analyze(temp.path()).unwrap()),
            )
        });
    }

    group.finish();
}

/// Benchmark analysis with minimal data to measure baseline overhead.
fn bench_analysis_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis_baseline");

    for rows in [10, 100, 1000].iter() {
        let data = generate_minimal_data(*rows);

        group.bench_with_input(BenchmarkId::new("minimal_rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || temp_csv(data),
                |temp| black_box(AutoKpi::new().analyze(temp.path()).unwrap()),
            )
        });
    }

    group.finish();
}

/// Benchmark individual pipeline stages on an in-memory table.
fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");

    let data = generate_orders_data(10_000);
    let table = Parser::new().parse_bytes(data.as_bytes(), b',').unwrap();
    let schema = infer_schema(&table);
    let kpis = generate_kpis(&schema, &table).unwrap();

    group.throughput(Throughput::Elements(table.row_count() as u64));
    group.bench_function("parse_10k_rows", |b| {
        b.iter(|| black_box(Parser::new().parse_bytes(data.as_bytes(), b',').unwrap()))
    });

    group.bench_function("infer_schema_10k_rows", |b| {
        b.iter(|| black_box(infer_schema(&table)))
    });

    group.bench_function("generate_kpis_10k_rows", |b| {
        b.iter(|| black_box(generate_kpis(&schema, &table).unwrap()))
    });

    group.bench_function("render_sql", |b| {
        let templater = SqlTemplater::new();
        b.iter(|| black_box(templater.render_all(&kpis)))
    });

    group.bench_function("quality_10k_rows", |b| {
        b.iter(|| black_box(check_data_quality(&table, &schema).unwrap()))
    });

    group.bench_function("statistical_summary_10k_rows", |b| {
        b.iter(|| black_box(generate_statistical_summary(&table, &schema).unwrap()))
    });

    group.finish();
}

/// Benchmark exporting an analysis result.
fn bench_result_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("result_processing");

    // Pre-generate analysis result
    let temp = temp_csv(&generate_orders_data(1_000));
    let result = AutoKpi::new().analyze(temp.path()).unwrap();

    group.bench_function("export_json", |b| {
        b.iter(|| black_box(result.to_json().unwrap()))
    });

    group.bench_function("export_markdown", |b| {
        b.iter(|| black_box(result.to_markdown()))
    });

    group.bench_function("export_dashboard", |b| {
        b.iter(|| black_box(result.to_dashboard_spec().unwrap()))
    });

    group.finish();
}

/// Benchmark analysis with large files.
fn bench_large_file_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_file_analysis");

    for rows in [100_000].iter() {
        let data = generate_orders_data(*rows);
        let bytes = data.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::new("orders_rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || temp_csv(data),
                |temp| black_box(AutoKpi::new().analyze(temp.path()).unwrap()),
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_full_analysis,
    bench_analysis_baseline,
    bench_components,
    bench_result_processing,
);

// Large file benchmarks run separately due to longer execution time
criterion_group!(
    name = large_file_benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(30));
    targets = bench_large_file_analysis
);

criterion_main!(benches, large_file_benches);
