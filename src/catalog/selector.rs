//! Round example selection.

use rand::seq::IndexedRandom;

use super::{Category, ExampleCatalog, PatternExample};

/// Pick an unused example matching the requested difficulty tier and category.
///
/// The choice is uniform over the remaining candidates. Returns `None` when no
/// candidate is left, which callers surface as an informational notice rather
/// than an error. Usage is recorded by the session transition, never here.
pub fn select_random_example<'a>(
    catalog: &'a ExampleCatalog,
    pattern_count: u8,
    category: Option<Category>,
    used_ids: &[String],
) -> Option<&'a PatternExample> {
    let candidates: Vec<&PatternExample> = catalog
        .examples()
        .iter()
        .filter(|example| example.pattern_count() == pattern_count)
        .filter(|example| category.is_none_or(|wanted| example.category == wanted))
        .filter(|example| !used_ids.iter().any(|id| *id == example.id))
        .collect();

    candidates.choose(&mut rand::rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(id: &str, category: Category, patterns: usize) -> PatternExample {
        PatternExample {
            id: id.into(),
            title: id.into(),
            category,
            code: String::new(),
            patterns: (0..patterns).map(|i| format!("pattern-{i}")).collect(),
            explanation: String::new(),
            steps: Vec::new(),
            advantages: Vec::new(),
        }
    }

    fn fixture() -> ExampleCatalog {
        ExampleCatalog::from_examples(vec![
            example("c1", Category::Creational, 1),
            example("c2", Category::Creational, 2),
            example("s1", Category::Structural, 1),
            example("b3", Category::Behavioral, 3),
        ])
    }

    #[test]
    fn respects_pattern_count_and_category() {
        let catalog = fixture();

        for _ in 0..20 {
            let picked =
                select_random_example(&catalog, 1, Some(Category::Creational), &[]).unwrap();
            assert_eq!(picked.id, "c1");
        }

        let picked = select_random_example(&catalog, 3, None, &[]).unwrap();
        assert_eq!(picked.id, "b3");
    }

    #[test]
    fn never_returns_a_used_example() {
        let catalog = fixture();
        let used = vec!["c1".to_string(), "s1".to_string()];

        for _ in 0..20 {
            if let Some(picked) = select_random_example(&catalog, 1, None, &used) {
                panic!("selected used example {}", picked.id);
            }
        }
    }

    #[test]
    fn empty_candidate_set_yields_none() {
        let catalog = fixture();
        assert!(select_random_example(&catalog, 2, Some(Category::Behavioral), &[]).is_none());
    }

    #[test]
    fn exhausting_the_pool_yields_none() {
        let examples = (0..50)
            .map(|i| example(&format!("st-{i}"), Category::Structural, 2))
            .collect();
        let catalog = ExampleCatalog::from_examples(examples);

        let mut used: Vec<String> = Vec::new();
        for draw in 0..50 {
            let picked = select_random_example(&catalog, 2, Some(Category::Structural), &used)
                .unwrap_or_else(|| panic!("pool exhausted early at draw {draw}"));
            assert!(!used.contains(&picked.id));
            used.push(picked.id.clone());
        }

        assert!(select_random_example(&catalog, 2, Some(Category::Structural), &used).is_none());
    }

    #[test]
    fn selection_does_not_mutate_used_ids() {
        let catalog = fixture();
        let used = vec!["c2".to_string()];
        let before = used.clone();
        let _ = select_random_example(&catalog, 1, None, &used);
        assert_eq!(used, before);
    }
}
