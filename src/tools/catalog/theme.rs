use serde_json::{json, Map, Value};
use strum::VariantNames;

use super::options::ThemeFormat;
use super::with_generation_options;
use crate::error::UiForgeError;
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::GenerativeTool;
use crate::tools::types::ToolParameters;

const DEFAULT_MOOD: &str = "modern";

/// Produces a colour, type and spacing theme for a brand.
#[derive(Debug, Clone)]
pub struct GenerateTheme {
    parameters: ToolParameters,
}

impl GenerateTheme {
    pub const NAME: &'static str = "generate_theme";

    pub fn new() -> Self {
        let builder = ToolParameters::object()
            .string("brandName", "Brand or product name", true)
            .string("primaryColor", "Primary brand colour (hex, rgb or name)", true)
            .string("mood", "Overall feel of the theme", false)
            .default_value("mood", json!(DEFAULT_MOOD))
            .string_enum("format", "Output format", ThemeFormat::VARIANTS, false)
            .default_value("format", json!(ThemeFormat::CssVariables.to_string()))
            .boolean("includeDarkMode", "Also emit a dark colour scheme", false)
            .default_value("includeDarkMode", json!(true));

        Self {
            parameters: with_generation_options(builder).build(),
        }
    }
}

impl Default for GenerateTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerativeTool for GenerateTheme {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Generate a design theme (colours, typography, spacing) for a brand"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    fn max_output_tokens(&self) -> u32 {
        2500
    }

    fn render(&self, args: &ToolArguments) -> Result<String, UiForgeError> {
        let brand = args.get_str("brandName")?;
        let primary = args.get_str("primaryColor")?;
        let mood = args.get_str_opt("mood").unwrap_or(DEFAULT_MOOD);
        let format: ThemeFormat = args.get_enum("format")?;
        let dark_mode = if args.get_bool_or("includeDarkMode", true) {
            "Provide light and dark schemes with matching token names."
        } else {
            "Provide a light scheme only."
        };

        Ok(format!(
            "You are a design systems engineer creating a theme for {brand}.\n\n\
             Primary colour: {primary}\n\
             Mood: {mood}\n\n\
             Include a full colour scale (50-900) for primary, neutral and semantic colours \
             (success, warning, danger, info), a type scale, spacing, radii and shadows. \
             Every text/background pair must meet WCAG AA contrast. {dark_mode}\n\n\
             Output {format_guidance} in one fenced code block.",
            format_guidance = format.guidance(),
        ))
    }

    fn input_metrics(&self, args: &ToolArguments) -> Map<String, Value> {
        let mut metrics = Map::new();
        metrics.insert(
            "brandNameLength".into(),
            json!(args.get_str_opt("brandName").map_or(0, |s| s.chars().count())),
        );
        metrics
    }
}
