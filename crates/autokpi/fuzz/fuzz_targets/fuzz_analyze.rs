//! Fuzz target for schema inference and KPI generation.
//!
//! This fuzzer tests that the pipeline:
//! 1. Never panics on any cell values
//! 2. Handles malformed dates and numbers
//! 3. Always renders SQL for whatever it generates

#![no_main]

use autokpi::{AutoKpi, DataTable, SqlTemplater};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Each line becomes a row; the same cell fills every column
    let cells: Vec<&str> = content.lines().collect();
    let columns = ["order_id", "created_at", "region", "amount"]
        .into_iter()
        .map(|name| (name, cells.clone()))
        .collect();

    if let Ok(table) = DataTable::from_columns(columns) {
        if let Ok(result) = AutoKpi::new().analyze_table(&table) {
            let _ = SqlTemplater::new().render_all(&result.kpis);
            let _ = result.to_dashboard_spec();
        }
    }
});
