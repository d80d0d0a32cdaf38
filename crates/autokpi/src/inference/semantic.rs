//! Column-name analysis.
//!
//! Names are lowercased and searched (not anchored) against each pattern
//! list; any single match counts.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\bid\b",
        r"^id$",
        r"_id$",
        r"id_",
        r"key$",
        r"pk$",
        r"primary_key",
        r"uuid",
        r"serial",
        r"index",
    ])
});

static DATETIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"date",
        r"time",
        r"timestamp",
        r"created",
        r"updated",
        r"modified",
        r"when",
        r"dt$",
        r"_at$",
        r"day",
        r"month",
        r"year",
    ])
});

static CATEGORICAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"category",
        r"type",
        r"status",
        r"state",
        r"country",
        r"region",
        r"city",
        r"segment",
        r"group",
        r"class",
        r"kind",
        r"label",
        r"tag",
        r"flag",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid name pattern"))
        .collect()
}

fn matches_any(patterns: &[Regex], name: &str) -> bool {
    let lower = name.to_lowercase();
    patterns.iter().any(|p| p.is_match(&lower))
}

/// What a column's name alone suggests about its role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameAnalysis {
    /// Name looks like a key (`order_id`, `uuid`, ...).
    pub identifier: bool,
    /// Name looks temporal (`created_at`, `order_date`, ...).
    pub datetime: bool,
    /// Name looks like a grouping variable (`region`, `status`, ...).
    pub categorical: bool,
}

/// Analyze a column name against the identifier, datetime and categorical
/// pattern lists.
pub fn analyze_name(name: &str) -> NameAnalysis {
    NameAnalysis {
        identifier: matches_any(&ID_PATTERNS, name),
        datetime: matches_any(&DATETIME_PATTERNS, name),
        categorical: matches_any(&CATEGORICAL_PATTERNS, name),
    }
}
