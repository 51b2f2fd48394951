use serde_json::{json, Map, Value};
use strum::VariantNames;

use super::options::{Framework, StylingSystem};
use super::{bullet_list, with_generation_options};
use crate::error::UiForgeError;
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::GenerativeTool;
use crate::tools::types::ToolParameters;

/// Generates a new UI component from a name and a design description.
#[derive(Debug, Clone)]
pub struct GenerateComponent {
    parameters: ToolParameters,
}

impl GenerateComponent {
    pub const NAME: &'static str = "generate_component";

    pub fn new() -> Self {
        let builder = ToolParameters::object()
            .string("componentName", "Name of the component, e.g. PricingCard", true)
            .string(
                "themeDescription",
                "Visual direction for the component (palette, mood, density)",
                true,
            )
            .string_list("props", "Props the component should accept", false)
            .default_value("props", json!([]))
            .string_enum(
                "stylingSystem",
                "Styling approach",
                StylingSystem::VARIANTS,
                false,
            )
            .default_value("stylingSystem", json!(StylingSystem::Tailwind.to_string()))
            .string_enum("framework", "Target framework", Framework::VARIANTS, false)
            .default_value("framework", json!(Framework::React.to_string()))
            .boolean("typescript", "Emit TypeScript", false)
            .default_value("typescript", json!(true));

        Self {
            parameters: with_generation_options(builder).build(),
        }
    }
}

impl Default for GenerateComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerativeTool for GenerateComponent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Generate a production-ready UI component from a name, props, and a design description"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    fn max_output_tokens(&self) -> u32 {
        4000
    }

    fn render(&self, args: &ToolArguments) -> Result<String, UiForgeError> {
        let name = args.get_str("componentName")?;
        let theme = args.get_str("themeDescription")?;
        let props = args.get_string_list("props")?;
        let styling: StylingSystem = args.get_enum("stylingSystem")?;
        let framework: Framework = args.get_enum("framework")?;
        let language = if args.get_bool_or("typescript", true) {
            "TypeScript, with an exported props type"
        } else {
            "JavaScript"
        };

        let props_section = if props.is_empty() {
            "Choose a small, sensible props API.".to_string()
        } else {
            bullet_list(&props)
        };

        Ok(format!(
            "You are a senior front-end engineer writing {framework} code.\n\n\
             Create a component named `{name}`.\n\n\
             Design direction:\n{theme}\n\n\
             Props:\n{props_section}\n\n\
             Requirements:\n\
             - Language: {language}\n\
             - Styling: {styling_guidance}\n\
             - Accessible by default: semantic markup, labelled controls, visible focus\n\
             - No placeholder comments; the component must be complete\n\n\
             Return the component source in one fenced code block, then a short usage example.",
            framework = framework.label(),
            styling_guidance = styling.guidance(),
        ))
    }

    fn input_metrics(&self, args: &ToolArguments) -> Map<String, Value> {
        let mut metrics = Map::new();
        metrics.insert(
            "themeDescriptionLength".into(),
            json!(args.get_str_opt("themeDescription").map_or(0, |s| s.chars().count())),
        );
        metrics.insert(
            "propsCount".into(),
            json!(args.get_string_list("props").map_or(0, |p| p.len())),
        );
        metrics
    }
}
