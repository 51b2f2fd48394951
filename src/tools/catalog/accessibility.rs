use serde_json::{json, Map, Value};
use strum::VariantNames;

use super::options::{AuditLevel, FocusArea};
use super::{bullet_list, fenced, source_metrics, with_generation_options};
use crate::error::UiForgeError;
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::GenerativeTool;
use crate::tools::types::ToolParameters;

/// Audits component source for accessibility problems.
#[derive(Debug, Clone)]
pub struct AuditAccessibility {
    parameters: ToolParameters,
}

impl AuditAccessibility {
    pub const NAME: &'static str = "audit_accessibility";

    pub fn new() -> Self {
        let builder = ToolParameters::object()
            .string("sourceCode", "Component or page source to audit", true)
            .string_enum("auditLevel", "Audit depth", AuditLevel::VARIANTS, false)
            .default_value("auditLevel", json!(AuditLevel::Comprehensive.to_string()))
            .enum_list(
                "focusAreas",
                "Areas to concentrate on; empty means all",
                FocusArea::VARIANTS,
                false,
            )
            .default_value("focusAreas", json!([]))
            .boolean("includeFixes", "Include corrected code for each issue", false)
            .default_value("includeFixes", json!(true));

        Self {
            parameters: with_generation_options(builder).build(),
        }
    }
}

impl Default for AuditAccessibility {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerativeTool for AuditAccessibility {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Audit UI source for accessibility issues and suggest fixes"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    fn max_output_tokens(&self) -> u32 {
        4000
    }

    fn render(&self, args: &ToolArguments) -> Result<String, UiForgeError> {
        let source = args.get_str("sourceCode")?;
        let level: AuditLevel = args.get_enum("auditLevel")?;
        let focus: Vec<FocusArea> = args.get_enum_list("focusAreas")?;

        let focus_section = if focus.is_empty() {
            "all areas".to_string()
        } else {
            format!("\n{}", bullet_list(&focus.iter().map(ToString::to_string).collect::<Vec<_>>()))
        };
        let fixes = if args.get_bool_or("includeFixes", true) {
            "For each issue include a corrected code snippet."
        } else {
            "Describe each issue without rewriting the code."
        };

        Ok(format!(
            "You are an accessibility specialist auditing UI code ({level} audit).\n\
             {level_guidance}\n\n\
             Focus: {focus_section}\n\n\
             Source:\n{source}\n\n\
             Report issues as a list with severity (critical, serious, moderate, minor), \
             the affected element, and the impact on users. {fixes}",
            level_guidance = level.guidance(),
            source = fenced(source),
        ))
    }

    fn input_metrics(&self, args: &ToolArguments) -> Map<String, Value> {
        source_metrics(args.get_str_opt("sourceCode").unwrap_or_default())
    }
}
