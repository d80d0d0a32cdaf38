//! Property-based tests for AutoKPI inference and KPI generation.
//!
//! These tests use proptest to generate random tables and verify that the
//! pipeline maintains its invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: Inference and rules never crash on any table
//! 2. **Determinism**: Same table always produces same schema and catalogue
//! 3. **Partition**: Every column lands in exactly one role
//! 4. **Uniqueness**: KPI names never repeat
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p autokpi --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p autokpi --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use autokpi::render::sanitize_column_name;
use autokpi::stats::{quantile, skewness};
use autokpi::{generate_kpis, infer_schema, AutoKpi, DataTable, SqlTemplater};

/// Column names that trigger the name heuristics.
const COLUMN_NAMES: &[&str] = &[
    "order_id",
    "created_at",
    "region",
    "amount",
    "notes",
    "status",
    "unit_price",
    "year",
];

// =============================================================================
// Test Strategies
// =============================================================================

/// Generate a single cell of any shape.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..1000).prop_map(|v| v.to_string()),
        (-1000.0f64..1000.0).prop_map(|v| format!("{:.2}", v)),
        (2000i32..2030, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d)),
        prop::sample::select(vec!["north", "south", "paid", "pending", "alpha", "beta"])
            .prop_map(str::to_string),
        Just(String::new()),
        Just("N/A".to_string()),
    ]
}

/// Generate a column of `rows` cells, either homogeneous or mixed.
fn column(rows: usize) -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        prop::collection::vec((0i64..50).prop_map(|v| v.to_string()), rows),
        prop::collection::vec((0.0f64..500.0).prop_map(|v| format!("{:.1}", v)), rows),
        prop::collection::vec(
            (0i64..120).prop_map(|d| {
                let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
                (base + chrono::Duration::days(d)).to_string()
            }),
            rows
        ),
        prop::collection::vec(
            prop::sample::select(vec!["north", "south", "east"]).prop_map(str::to_string),
            rows
        ),
        prop::collection::vec(cell(), rows),
    ]
}

/// Generate a table of 1 to 8 columns and 1 to 60 rows.
fn table() -> impl Strategy<Value = DataTable> {
    (1usize..=60, 1usize..=COLUMN_NAMES.len())
        .prop_flat_map(|(rows, cols)| prop::collection::vec(column(rows), cols))
        .prop_map(|columns| {
            let named: Vec<(&str, Vec<String>)> =
                COLUMN_NAMES.iter().copied().zip(columns).collect();
            DataTable::from_columns(named).unwrap()
        })
}

/// Generate arbitrary column names, including punctuation and unicode.
fn column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_ \\-\\.\\$\\(\\)%]{0,30}",
        "\\PC{0,20}",
    ]
}

// =============================================================================
// Schema Inference Properties
// =============================================================================

mod schema_tests {
    use super::*;

    proptest! {
        /// Every column is assigned exactly one role.
        #[test]
        fn roles_partition_columns(table in table()) {
            let schema = infer_schema(&table);

            prop_assert_eq!(schema.column_count(), table.column_count());
            prop_assert!(schema.is_partition());

            let mut assigned: Vec<&String> = schema
                .id_columns
                .iter()
                .chain(&schema.datetime_columns)
                .chain(&schema.categorical_columns)
                .chain(&schema.numeric_columns)
                .chain(&schema.text_columns)
                .collect();
            assigned.sort();
            let mut headers: Vec<&String> = table.headers.iter().collect();
            headers.sort();
            prop_assert_eq!(assigned, headers);
        }

        /// Inference is deterministic.
        #[test]
        fn inference_is_deterministic(table in table()) {
            prop_assert_eq!(infer_schema(&table), infer_schema(&table));
        }

        /// Role lists keep source column order.
        #[test]
        fn role_lists_keep_source_order(table in table()) {
            let schema = infer_schema(&table);
            let position = |name: &String| table.headers.iter().position(|h| h == name);

            for list in [
                &schema.id_columns,
                &schema.datetime_columns,
                &schema.categorical_columns,
                &schema.numeric_columns,
                &schema.text_columns,
            ] {
                let positions: Vec<_> = list.iter().map(position).collect();
                let mut sorted = positions.clone();
                sorted.sort();
                prop_assert_eq!(positions, sorted);
            }
        }
    }
}

// =============================================================================
// KPI Generation Properties
// =============================================================================

mod kpi_tests {
    use super::*;

    proptest! {
        /// Generation never fails on an inferred schema.
        #[test]
        fn generation_never_fails(table in table()) {
            let schema = infer_schema(&table);
            prop_assert!(generate_kpis(&schema, &table).is_ok());
        }

        /// KPI names are unique.
        #[test]
        fn kpi_names_are_unique(table in table()) {
            let schema = infer_schema(&table);
            let kpis = generate_kpis(&schema, &table).unwrap();

            let mut seen = HashSet::new();
            for kpi in &kpis {
                prop_assert!(seen.insert(kpi.name.clone()), "duplicate KPI '{}'", kpi.name);
            }
        }

        /// Generation is deterministic.
        #[test]
        fn generation_is_deterministic(table in table()) {
            let schema = infer_schema(&table);
            let first = generate_kpis(&schema, &table).unwrap();
            let second = generate_kpis(&schema, &table).unwrap();
            prop_assert_eq!(first, second);
        }

        /// A record count is always present.
        #[test]
        fn record_count_is_always_present(table in table()) {
            let schema = infer_schema(&table);
            let kpis = generate_kpis(&schema, &table).unwrap();
            prop_assert!(kpis.iter().any(|k| k.name == "Total Records"));
        }

        /// Every KPI renders to one terminated statement.
        #[test]
        fn every_kpi_renders_sql(table in table()) {
            let schema = infer_schema(&table);
            let kpis = generate_kpis(&schema, &table).unwrap();
            let rendered = SqlTemplater::new().render_all(&kpis);

            prop_assert_eq!(rendered.len(), kpis.len());
            for sql in rendered.values() {
                prop_assert!(sql.starts_with("SELECT "));
                prop_assert!(sql.ends_with(';'));
            }
        }

        /// Exports always succeed and are valid JSON.
        #[test]
        fn exports_are_valid_json(table in table()) {
            let result = AutoKpi::new().analyze_table(&table).unwrap();

            let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
            prop_assert_eq!(json["kpis"].as_array().unwrap().len(), result.kpis.len());

            let dashboard = result.to_dashboard_spec().unwrap();
            prop_assert!(serde_json::from_str::<serde_json::Value>(&dashboard).is_ok());
        }
    }
}

// =============================================================================
// Rendering and Statistics Properties
// =============================================================================

mod helper_tests {
    use super::*;

    proptest! {
        /// Sanitized names are always valid bare identifiers.
        #[test]
        fn sanitized_names_are_identifiers(name in column_name()) {
            let sanitized = sanitize_column_name(&name);
            let mut chars = sanitized.chars();

            let first = chars.next();
            prop_assert!(matches!(first, Some(c) if c.is_ascii_alphabetic() || c == '_'));
            prop_assert!(chars.all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }

        /// Sanitizing is deterministic.
        #[test]
        fn sanitizing_is_deterministic(name in column_name()) {
            prop_assert_eq!(sanitize_column_name(&name), sanitize_column_name(&name));
        }

        /// Quantiles stay within the observed range.
        #[test]
        fn quantile_within_bounds(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..200),
            q in 0.0f64..=1.0,
        ) {
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let value = quantile(&values, q).unwrap();

            prop_assert!(value >= min - 1e-6 && value <= max + 1e-6);
        }

        /// Skewness is finite whenever it is defined.
        #[test]
        fn skewness_is_finite(values in prop::collection::vec(-1.0e3f64..1.0e3, 0..100)) {
            if let Ok(skew) = skewness(&values) {
                prop_assert!(skew.is_finite());
            }
        }
    }
}
