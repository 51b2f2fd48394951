use serde_json::{json, Map, Value};
use strum::VariantNames;

use super::options::{Framework, LayoutType, StylingSystem};
use super::{bullet_list, with_generation_options};
use crate::error::UiForgeError;
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::GenerativeTool;
use crate::tools::types::ToolParameters;

/// Builds a page layout from an archetype and an ordered list of sections.
#[derive(Debug, Clone)]
pub struct GenerateLayout {
    parameters: ToolParameters,
}

impl GenerateLayout {
    pub const NAME: &'static str = "generate_layout";

    pub fn new() -> Self {
        let builder = ToolParameters::object()
            .string_enum("layoutType", "Page archetype", LayoutType::VARIANTS, true)
            .string_list("sections", "Sections in page order, e.g. hero, pricing", true)
            .boolean("responsive", "Adapt the layout to mobile and tablet", false)
            .default_value("responsive", json!(true))
            .string_enum(
                "stylingSystem",
                "Styling approach",
                StylingSystem::VARIANTS,
                false,
            )
            .default_value("stylingSystem", json!(StylingSystem::Tailwind.to_string()))
            .string_enum("framework", "Target framework", Framework::VARIANTS, false)
            .default_value("framework", json!(Framework::React.to_string()));

        Self {
            parameters: with_generation_options(builder).build(),
        }
    }
}

impl Default for GenerateLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerativeTool for GenerateLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Generate a complete page layout with the requested sections"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    fn max_output_tokens(&self) -> u32 {
        3500
    }

    fn render(&self, args: &ToolArguments) -> Result<String, UiForgeError> {
        let layout: LayoutType = args.get_enum("layoutType")?;
        let sections = args.get_string_list("sections")?;
        let styling: StylingSystem = args.get_enum("stylingSystem")?;
        let framework: Framework = args.get_enum("framework")?;
        let responsive = if args.get_bool_or("responsive", true) {
            "Mobile first; collapse multi-column regions below 768px."
        } else {
            "Desktop only; no breakpoints needed."
        };

        Ok(format!(
            "You are building a {layout} page layout in {framework}.\n\n\
             Sections, in order:\n{sections}\n\n\
             - Styling: {styling_guidance}\n\
             - {responsive}\n\
             - Use landmark elements (header, nav, main, footer) and one h1.\n\
             - Split each section into its own component in the same file.\n\n\
             Return the layout in one fenced code block.",
            framework = framework.label(),
            sections = bullet_list(&sections),
            styling_guidance = styling.guidance(),
        ))
    }

    fn input_metrics(&self, args: &ToolArguments) -> Map<String, Value> {
        let mut metrics = Map::new();
        metrics.insert(
            "sectionCount".into(),
            json!(args.get_string_list("sections").map_or(0, |s| s.len())),
        );
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_required_and_non_empty() {
        let tool = GenerateLayout::new();

        assert!(tool.validate(&json!({"layoutType": "blog"})).is_err());
        assert!(tool
            .validate(&json!({"layoutType": "blog", "sections": []}))
            .is_err());
    }

    #[test]
    fn render_keeps_section_order() {
        let tool = GenerateLayout::new();
        let args = tool
            .validate(&json!({"layoutType": "landing", "sections": ["hero", "pricing", "faq"]}))
            .unwrap();

        let prompt = tool.render(&args).unwrap();

        assert!(prompt.contains("landing page layout"));
        assert!(prompt.contains("- hero\n- pricing\n- faq"));
        assert_eq!(tool.input_metrics(&args)["sectionCount"], 3);
    }
}
