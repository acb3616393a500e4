//! Static catalogue of design-pattern examples played during quiz rounds.

mod builtin;
pub mod selector;

use std::{fs, io::ErrorKind, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

pub use self::selector::select_random_example;

/// Highest number of patterns a single example may demonstrate.
const MAX_PATTERNS_PER_EXAMPLE: usize = 3;

/// Fixed set of categories examples are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Patterns concerned with object creation.
    Creational,
    /// Patterns concerned with object composition.
    Structural,
    /// Patterns concerned with object interaction and responsibility.
    Behavioral,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [
        Category::Creational,
        Category::Structural,
        Category::Behavioral,
    ];
}

/// Category constraint applied when drawing the next round example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Accept examples from every category.
    All,
    /// Only creational examples.
    Creational,
    /// Only structural examples.
    Structural,
    /// Only behavioral examples.
    Behavioral,
}

impl CategoryFilter {
    /// The concrete category this filter narrows to, if it narrows at all.
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Creational => Some(Category::Creational),
            CategoryFilter::Structural => Some(Category::Structural),
            CategoryFilter::Behavioral => Some(Category::Behavioral),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        match value {
            Category::Creational => CategoryFilter::Creational,
            Category::Structural => CategoryFilter::Structural,
            Category::Behavioral => CategoryFilter::Behavioral,
        }
    }
}

/// One walkthrough step of an example solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleStep {
    /// Short step title.
    pub title: String,
    /// What the step does and why it matters for the pattern.
    pub description: String,
    /// Code fragment illustrating the step.
    pub code: String,
}

/// A quiz example demonstrating one or more design patterns.
///
/// Examples are immutable at runtime; sessions only ever reference them by id
/// and copy them into round state and history records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternExample {
    /// Stable identifier, unique across the catalogue.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category the example belongs to.
    pub category: Category,
    /// Source code shown to the teams while they guess.
    pub code: String,
    /// Names of the demonstrated patterns. The length is the difficulty tier.
    pub patterns: Vec<String>,
    /// Explanation revealed once the round is resolved.
    pub explanation: String,
    /// Ordered walkthrough revealed with the solution.
    #[serde(default)]
    pub steps: Vec<ExampleStep>,
    /// Why applying the pattern(s) here pays off.
    #[serde(default)]
    pub advantages: Vec<String>,
}

impl PatternExample {
    /// Difficulty tier derived from the number of demonstrated patterns.
    pub fn pattern_count(&self) -> u8 {
        self.patterns.len() as u8
    }
}

/// Read-only collection of every example available to the game.
#[derive(Debug, Clone)]
pub struct ExampleCatalog {
    examples: Vec<PatternExample>,
}

impl ExampleCatalog {
    /// Load the catalogue from a JSON file, falling back to the built-in set
    /// when no path is configured or the file is missing or unparsable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("no catalogue path configured; using built-in examples");
            return Self::builtin();
        };

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawCatalog>(&contents) {
                Ok(raw) => {
                    let catalog = Self::from_examples(raw.examples);
                    info!(
                        path = %path.display(),
                        count = catalog.len(),
                        "loaded example catalogue"
                    );
                    catalog
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse catalogue; falling back to built-in examples"
                    );
                    Self::builtin()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "catalogue file not found; using built-in examples"
                );
                Self::builtin()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read catalogue; falling back to built-in examples"
                );
                Self::builtin()
            }
        }
    }

    /// The example set shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_examples(builtin::examples())
    }

    /// Build a catalogue from raw examples, dropping entries that carry no
    /// pattern names, too many of them, or a duplicate id.
    pub fn from_examples(examples: Vec<PatternExample>) -> Self {
        let mut seen = Vec::new();
        let mut kept = Vec::with_capacity(examples.len());

        for example in examples {
            let count = example.patterns.len();
            if count == 0 || count > MAX_PATTERNS_PER_EXAMPLE {
                warn!(id = %example.id, count, "skipping example with unusable pattern count");
                continue;
            }
            if seen.contains(&example.id) {
                warn!(id = %example.id, "skipping example with duplicate id");
                continue;
            }
            seen.push(example.id.clone());
            kept.push(example);
        }

        Self { examples: kept }
    }

    /// All examples in catalogue order.
    pub fn examples(&self) -> &[PatternExample] {
        &self.examples
    }

    /// Look an example up by id.
    pub fn get(&self, id: &str) -> Option<&PatternExample> {
        self.examples.iter().find(|example| example.id == id)
    }

    /// Number of usable examples.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether the catalogue contains no usable example.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of a catalogue file.
struct RawCatalog {
    examples: Vec<PatternExample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(id: &str, patterns: &[&str]) -> PatternExample {
        PatternExample {
            id: id.into(),
            title: id.to_uppercase(),
            category: Category::Creational,
            code: "struct S;".into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            explanation: String::new(),
            steps: Vec::new(),
            advantages: Vec::new(),
        }
    }

    #[test]
    fn builtin_catalogue_is_usable() {
        let catalog = ExampleCatalog::builtin();
        assert!(!catalog.is_empty());
        for example in catalog.examples() {
            assert!((1..=3).contains(&example.patterns.len()));
        }
    }

    #[test]
    fn from_examples_drops_invalid_entries() {
        let catalog = ExampleCatalog::from_examples(vec![
            example("ok", &["singleton"]),
            example("empty", &[]),
            example("overloaded", &["a", "b", "c", "d"]),
            example("ok", &["builder"]),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("ok").unwrap().patterns, vec!["singleton"]);
        assert!(catalog.get("empty").is_none());
    }

    #[test]
    fn category_filter_narrows_or_not() {
        assert_eq!(CategoryFilter::All.category(), None);
        assert_eq!(
            CategoryFilter::Structural.category(),
            Some(Category::Structural)
        );
        assert_eq!(
            CategoryFilter::from(Category::Behavioral),
            CategoryFilter::Behavioral
        );
    }
}
