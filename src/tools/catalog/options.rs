//! Enumerated tool options and the guidance each one adds to a prompt.

use strum::{Display, EnumString, VariantNames};

/// How generated components are styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum StylingSystem {
    Tailwind,
    CssModules,
    StyledComponents,
    Emotion,
}

impl StylingSystem {
    pub fn guidance(self) -> &'static str {
        match self {
            Self::Tailwind => "Style with Tailwind CSS utility classes; avoid inline styles.",
            Self::CssModules => {
                "Style with a co-located CSS Module and import class names from it."
            }
            Self::StyledComponents => "Style with styled-components; keep styled definitions below the component.",
            Self::Emotion => "Style with Emotion's css prop or styled API.",
        }
    }
}

/// Target UI framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum Framework {
    React,
    Vue,
    Svelte,
    Angular,
}

impl Framework {
    pub fn label(self) -> &'static str {
        match self {
            Self::React => "React (function components with hooks)",
            Self::Vue => "Vue 3 (single-file component, Composition API)",
            Self::Svelte => "Svelte",
            Self::Angular => "Angular (standalone component)",
        }
    }
}

/// What a refactor should improve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum RefactorGoal {
    Performance,
    Maintainability,
    ModernPatterns,
    Accessibility,
    TypeSafety,
    Testability,
}

impl RefactorGoal {
    pub const DEFAULTS: [Self; 3] = [Self::Performance, Self::Maintainability, Self::ModernPatterns];

    pub fn guidance(self) -> &'static str {
        match self {
            Self::Performance => "remove unnecessary re-renders and expensive work in render paths",
            Self::Maintainability => "split large units, name things clearly, remove duplication",
            Self::ModernPatterns => "replace legacy idioms with current framework patterns",
            Self::Accessibility => "use semantic elements, labels and keyboard support",
            Self::TypeSafety => "tighten types and remove implicit any",
            Self::Testability => "isolate side effects and expose seams for tests",
        }
    }
}

/// Depth of an accessibility audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum AuditLevel {
    Basic,
    Comprehensive,
    WcagAa,
    WcagAaa,
}

impl AuditLevel {
    pub fn guidance(self) -> &'static str {
        match self {
            Self::Basic => "Report only blocking issues that prevent use with assistive technology.",
            Self::Comprehensive => "Report every issue you find, ordered by severity.",
            Self::WcagAa => "Evaluate against WCAG 2.1 level AA and cite the success criterion for each issue.",
            Self::WcagAaa => "Evaluate against WCAG 2.1 level AAA and cite the success criterion for each issue.",
        }
    }
}

/// Area an accessibility audit should concentrate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum FocusArea {
    Keyboard,
    ScreenReader,
    ColorContrast,
    FocusManagement,
    Semantics,
    Aria,
}

/// Output format of a generated theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum ThemeFormat {
    CssVariables,
    TailwindConfig,
    DesignTokens,
}

impl ThemeFormat {
    pub fn guidance(self) -> &'static str {
        match self {
            Self::CssVariables => "a :root block of CSS custom properties",
            Self::TailwindConfig => "a tailwind.config.js theme.extend object",
            Self::DesignTokens => "a W3C design tokens JSON document",
        }
    }
}

/// Page-level layout archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum LayoutType {
    Dashboard,
    Landing,
    Blog,
    Ecommerce,
    Admin,
    Portfolio,
}
