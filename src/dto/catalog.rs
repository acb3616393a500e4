use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{Category, ExampleStep, PatternExample};

/// Compact example listing entry. Never includes the pattern names, so the
/// catalogue can be browsed without spoiling answers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExampleSummary {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category the example belongs to.
    pub category: Category,
    /// Difficulty tier (number of demonstrated patterns).
    pub pattern_count: u8,
}

/// What the teams see while a round is running: the code, but not the answer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExamplePrompt {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category the example belongs to.
    pub category: Category,
    /// Difficulty tier (number of demonstrated patterns).
    pub pattern_count: u8,
    /// Source code on screen.
    pub code: String,
}

/// One walkthrough step of a revealed solution.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExampleStepView {
    /// Short step title.
    pub title: String,
    /// What the step does.
    pub description: String,
    /// Code fragment illustrating the step.
    pub code: String,
}

/// The answer material shown once the solution is revealed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExampleSolution {
    /// Names of the demonstrated patterns.
    pub patterns: Vec<String>,
    /// Why the code demonstrates them.
    pub explanation: String,
    /// Ordered walkthrough.
    pub steps: Vec<ExampleStepView>,
    /// Why applying the pattern(s) pays off.
    pub advantages: Vec<String>,
}

/// Full example as served by the library browser, prompt and solution
/// together.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExampleDetail {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category the example belongs to.
    pub category: Category,
    /// Difficulty tier.
    pub pattern_count: u8,
    /// Source code.
    pub code: String,
    /// The solution material.
    pub solution: ExampleSolution,
}

/// Response listing catalogue examples.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExampleListResponse {
    /// Matching examples in catalogue order.
    pub examples: Vec<ExampleSummary>,
}

/// Response listing the available categories.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    /// Every category, in display order.
    pub categories: Vec<Category>,
}

impl From<&PatternExample> for ExampleSummary {
    fn from(example: &PatternExample) -> Self {
        Self {
            id: example.id.clone(),
            title: example.title.clone(),
            category: example.category,
            pattern_count: example.pattern_count(),
        }
    }
}

impl From<&PatternExample> for ExamplePrompt {
    fn from(example: &PatternExample) -> Self {
        Self {
            id: example.id.clone(),
            title: example.title.clone(),
            category: example.category,
            pattern_count: example.pattern_count(),
            code: example.code.clone(),
        }
    }
}

impl From<&ExampleStep> for ExampleStepView {
    fn from(step: &ExampleStep) -> Self {
        Self {
            title: step.title.clone(),
            description: step.description.clone(),
            code: step.code.clone(),
        }
    }
}

impl From<&PatternExample> for ExampleSolution {
    fn from(example: &PatternExample) -> Self {
        Self {
            patterns: example.patterns.clone(),
            explanation: example.explanation.clone(),
            steps: example.steps.iter().map(Into::into).collect(),
            advantages: example.advantages.clone(),
        }
    }
}

impl From<&PatternExample> for ExampleDetail {
    fn from(example: &PatternExample) -> Self {
        Self {
            id: example.id.clone(),
            title: example.title.clone(),
            category: example.category,
            pattern_count: example.pattern_count(),
            code: example.code.clone(),
            solution: example.into(),
        }
    }
}
