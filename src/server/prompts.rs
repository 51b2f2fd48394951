//! Reusable prompt templates. Rendered for the client, never executed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::UiForgeError;

/// One declared template argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptArgumentSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// A named template with `{{argument}}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgumentSpec>,
    #[serde(skip)]
    template: &'static str,
}

/// Output of [`PromptTemplate::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub description: String,
    pub text: String,
}

const fn arg(name: &'static str, description: &'static str, required: bool) -> PromptArgumentSpec {
    PromptArgumentSpec {
        name,
        description,
        required,
    }
}

impl PromptTemplate {
    /// Substitute arguments into the template.
    ///
    /// Missing optional arguments render as an empty string.
    pub fn render(&self, values: &BTreeMap<String, String>) -> Result<RenderedPrompt, UiForgeError> {
        let mut text = self.template.to_string();
        for spec in &self.arguments {
            let value = match values.get(spec.name).map(|v| v.trim()) {
                Some(v) if !v.is_empty() => v,
                _ if spec.required => {
                    return Err(UiForgeError::validation(
                        self.name,
                        format!("missing required argument '{}'", spec.name),
                    ))
                }
                _ => "",
            };
            text = text.replace(&format!("{{{{{}}}}}", spec.name), value);
        }
        Ok(RenderedPrompt {
            description: self.description.to_string(),
            text,
        })
    }
}

/// The built-in templates.
pub fn builtin_prompts() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "component-review",
            description: "Review a UI component for quality, accessibility and design consistency",
            arguments: vec![
                arg("componentCode", "Source of the component to review", true),
                arg("framework", "Framework the component is written in", false),
            ],
            template: "Review the following {{framework}} component.\n\n\
                       ```\n{{componentCode}}\n```\n\n\
                       Cover correctness, accessibility, performance and consistency with the \
                       surrounding design system. Suggest concrete changes, most important first.",
        },
        PromptTemplate {
            name: "design-system-kickoff",
            description: "Plan the foundations of a new design system",
            arguments: vec![
                arg("brandName", "Brand or product name", true),
                arg("audience", "Who the product is for", false),
                arg("platforms", "Target platforms, e.g. web, iOS", false),
            ],
            template: "We are starting a design system for {{brandName}}.\n\
                       Audience: {{audience}}\n\
                       Platforms: {{platforms}}\n\n\
                       Propose the token structure (colour, type, spacing, motion), the first \
                       ten components to build and the documentation each needs. Use the \
                       generate_theme tool for the initial palette.",
        },
        PromptTemplate {
            name: "accessibility-remediation",
            description: "Turn accessibility audit findings into a fix plan",
            arguments: vec![
                arg("auditFindings", "Findings from an accessibility audit", true),
                arg("targetLevel", "Conformance target, e.g. WCAG 2.1 AA", false),
            ],
            template: "Here are accessibility audit findings:\n\n{{auditFindings}}\n\n\
                       Target conformance: {{targetLevel}}\n\n\
                       Group the findings by component, order them by user impact and give a \
                       code-level fix for each. Flag anything that needs design input.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(name: &str) -> PromptTemplate {
        builtin_prompts()
            .into_iter()
            .find(|p| p.name == name)
            .unwrap()
    }

    #[test]
    fn renders_required_and_optional_arguments() {
        let prompt = find("component-review");
        let mut values = BTreeMap::new();
        values.insert("componentCode".to_string(), "<Button/>".to_string());
        values.insert("framework".to_string(), "React".to_string());

        let rendered = prompt.render(&values).unwrap();

        assert!(rendered.text.contains("Review the following React component."));
        assert!(rendered.text.contains("<Button/>"));
        assert!(!rendered.text.contains("{{"));
    }

    #[test]
    fn missing_optional_argument_renders_empty() {
        let prompt = find("design-system-kickoff");
        let mut values = BTreeMap::new();
        values.insert("brandName".to_string(), "Acme".to_string());

        let rendered = prompt.render(&values).unwrap();

        assert!(rendered.text.contains("Audience: \n"));
    }

    #[test]
    fn missing_required_argument_fails() {
        let err = find("accessibility-remediation")
            .render(&BTreeMap::new())
            .unwrap_err();

        assert!(err.to_string().contains("auditFindings"));
    }
}
