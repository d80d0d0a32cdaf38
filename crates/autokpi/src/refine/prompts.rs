//! Prompt template and response parsing for KPI refinement.

use crate::kpi::KpiDescriptor;

use super::provider::{RefineError, Refinement};

/// System message sent alongside [`refine_prompt`].
pub const SYSTEM_PROMPT: &str =
    "You are a data analytics expert specializing in KPI definitions and business intelligence.";

/// Build a prompt asking for a concise name and a business-friendly
/// description in a `NAME:` / `DESCRIPTION:` line format.
pub fn refine_prompt(kpi: &KpiDescriptor, context: Option<&str>) -> String {
    let context_line = context
        .map(|c| format!("Context: {}", c))
        .unwrap_or_default();

    format!(
        r#"You are a data analytics expert. Refine the following KPI definition to make it more professional, clear, and business-ready.

Original KPI Name: {}
Original Description: {}
Category: {}
Columns Used: {}

{}

Please provide:
1. A refined, professional KPI name (keep it concise, under 50 characters)
2. A clear, business-friendly description (1-2 sentences)

Respond in this format:
NAME: [refined name]
DESCRIPTION: [refined description]
"#,
        kpi.name,
        kpi.description,
        kpi.category().as_str(),
        kpi.columns_used.join(", "),
        context_line
    )
}

/// Parse a `NAME:` / `DESCRIPTION:` response.
///
/// A missing line keeps the original wording; a response with neither line
/// is rejected.
pub fn parse_refinement(
    response: &str,
    kpi: &KpiDescriptor,
) -> std::result::Result<Refinement, RefineError> {
    let mut name = None;
    let mut description = None;

    for line in response.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("NAME:") {
            name = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("DESCRIPTION:") {
            description = Some(rest.trim().to_string());
        }
    }

    if name.is_none() && description.is_none() {
        return Err(RefineError::InvalidResponse(
            "no NAME: or DESCRIPTION: line".to_string(),
        ));
    }

    Ok(Refinement {
        name: name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| kpi.name.clone()),
        description: description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| kpi.description.clone()),
    })
}
