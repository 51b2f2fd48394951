use serde_json::{json, Map, Value};
use strum::VariantNames;

use super::options::{Framework, RefactorGoal};
use super::{bullet_list, fenced, source_metrics, with_generation_options};
use crate::error::UiForgeError;
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::GenerativeTool;
use crate::tools::types::ToolParameters;

/// Rewrites existing component source toward a set of goals.
#[derive(Debug, Clone)]
pub struct RefactorComponent {
    parameters: ToolParameters,
}

impl RefactorComponent {
    pub const NAME: &'static str = "refactor_component";

    pub fn new() -> Self {
        let default_goals: Vec<String> =
            RefactorGoal::DEFAULTS.iter().map(ToString::to_string).collect();
        let builder = ToolParameters::object()
            .string("sourceCode", "Component source to refactor", true)
            .enum_list(
                "refactorGoals",
                "What the refactor should improve",
                RefactorGoal::VARIANTS,
                false,
            )
            .default_value("refactorGoals", json!(default_goals))
            .string_enum(
                "targetFramework",
                "Framework of the refactored output",
                Framework::VARIANTS,
                false,
            )
            .default_value("targetFramework", json!(Framework::React.to_string()))
            .boolean(
                "preserveFunctionality",
                "Keep observable behaviour unchanged",
                false,
            )
            .default_value("preserveFunctionality", json!(true));

        Self {
            parameters: with_generation_options(builder).build(),
        }
    }
}

impl Default for RefactorComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerativeTool for RefactorComponent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Refactor an existing component for performance, maintainability, and modern patterns"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    fn max_output_tokens(&self) -> u32 {
        5000
    }

    fn render(&self, args: &ToolArguments) -> Result<String, UiForgeError> {
        let source = args.get_str("sourceCode")?;
        let goals: Vec<RefactorGoal> = args.get_enum_list("refactorGoals")?;
        let framework: Framework = args.get_enum("targetFramework")?;
        let behaviour = if args.get_bool_or("preserveFunctionality", true) {
            "Preserve all observable behaviour and the public props API."
        } else {
            "Behaviour and the props API may change when it serves the goals; list every change."
        };

        let goal_lines: Vec<String> = goals
            .iter()
            .map(|goal| format!("{goal}: {}", goal.guidance()))
            .collect();
        let goals_section = if goal_lines.is_empty() {
            "- general clean-up".to_string()
        } else {
            bullet_list(&goal_lines)
        };

        Ok(format!(
            "You are refactoring a UI component. Target framework: {framework}.\n\n\
             Goals:\n{goals_section}\n\n\
             {behaviour}\n\n\
             Source:\n{source}\n\n\
             Return the refactored component in one fenced code block, \
             followed by a bullet list summarising each change.",
            framework = framework.label(),
            source = fenced(source),
        ))
    }

    fn input_metrics(&self, args: &ToolArguments) -> Map<String, Value> {
        let mut metrics = source_metrics(args.get_str_opt("sourceCode").unwrap_or_default());
        metrics.insert(
            "refactorGoalsCount".into(),
            json!(args.get_string_list("refactorGoals").map_or(0, |g| g.len())),
        );
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_goals_are_applied() {
        let tool = RefactorComponent::new();
        let args = tool.validate(&json!({"sourceCode": "const A = () => null"})).unwrap();

        assert_eq!(
            args.get_string_list("refactorGoals").unwrap(),
            vec!["performance", "maintainability", "modern-patterns"]
        );
    }

    #[test]
    fn unknown_goal_is_rejected() {
        let tool = RefactorComponent::new();
        let err = tool
            .validate(&json!({"sourceCode": "x", "refactorGoals": ["speed"]}))
            .unwrap_err();

        assert!(err.to_string().contains("refactorGoals[0]"));
    }

    #[test]
    fn render_embeds_source_and_goals() {
        let tool = RefactorComponent::new();
        let args = tool
            .validate(&json!({
                "sourceCode": "function Old() { return <div/> }",
                "refactorGoals": ["type-safety"],
                "preserveFunctionality": false,
            }))
            .unwrap();

        let prompt = tool.render(&args).unwrap();

        assert!(prompt.contains("```\nfunction Old() { return <div/> }\n```"));
        assert!(prompt.contains("type-safety: tighten types"));
        assert!(prompt.contains("may change"));
        assert_eq!(tool.input_metrics(&args)["sourceCodeLines"], 1);
    }
}
