//! Weighted classification engine
//!
//! Every rule of a rule-set scores its own category in [0, 100]. All rules run, the highest
//! score wins, and ties go to the category enumerated first.

use std::fmt::Debug;

use tracing::debug;

use crate::config::ClassifierConfig;
use crate::constants::classification::MAX_RULE_SCORE;
use crate::types::{
    ClassificationContext, ClassificationResult, FileChangeRecord, LensError, Result,
};

/// Closed category enumeration of one rule-set
pub trait Category: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every category in canonical order; the order decides ties.
    fn all() -> &'static [Self];
    fn code(&self) -> &'static str;
    fn display_name(&self) -> &'static str;
    fn description(&self) -> &'static str;
}

/// What a rule sees of one change
pub struct RuleInput<'a> {
    pub record: &'a FileChangeRecord,
    pub context: &'a ClassificationContext,
    /// Added and removed lines; the full content when the diff carries none
    pub text: String,
}

impl<'a> RuleInput<'a> {
    pub fn new(record: &'a FileChangeRecord, context: &'a ClassificationContext) -> Self {
        let changed = record.changed_text();
        let text = if changed.trim().is_empty() {
            record.content().to_string()
        } else {
            changed
        };
        Self {
            record,
            context,
            text,
        }
    }

    pub fn path(&self) -> &str {
        &self.record.relative_path
    }
}

/// One independent scoring rule per category
pub trait RuleSet: Send + Sync {
    type Category: Category;

    fn name(&self) -> &'static str;

    /// Score `category` for this change, appending the indicators that fired.
    fn evaluate(
        &self,
        category: Self::Category,
        input: &RuleInput<'_>,
        indicators: &mut Vec<String>,
    ) -> u32;
}

/// Highest-scoring entry; the first one wins a tie.
pub fn select_best<C: Copy>(scores: impl IntoIterator<Item = (C, u32)>) -> Option<(C, u32)> {
    let mut best: Option<(C, u32)> = None;
    for (category, score) in scores {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((category, score)),
        }
    }
    best
}

/// Score in [0, 100] as a bounded confidence in [0, 1].
pub fn confidence(score: u32) -> f64 {
    f64::from(score.min(MAX_RULE_SCORE)) / f64::from(MAX_RULE_SCORE)
}

/// Reason string naming the category and its first `limit` indicators.
pub fn format_reason(category_name: &str, indicators: &[String], limit: usize) -> String {
    if indicators.is_empty() {
        return format!(
            "No distinctive patterns detected; defaulted to {}",
            category_name
        );
    }
    let quoted: Vec<&str> = indicators.iter().take(limit).map(String::as_str).collect();
    format!("{}: {}", category_name, quoted.join(", "))
}

/// Build a result for `category` from its score and indicators.
pub fn build_result<C: Category>(
    file_path: &str,
    category: C,
    score: u32,
    indicators: Vec<String>,
    changed_methods: Vec<String>,
    reason_limit: usize,
) -> ClassificationResult {
    ClassificationResult {
        file_path: file_path.to_string(),
        category: category.code().to_string(),
        category_name: category.display_name().to_string(),
        description: category.description().to_string(),
        reason: format_reason(category.display_name(), &indicators, reason_limit),
        confidence: confidence(score),
        indicators,
        changed_methods,
    }
}

pub struct ClassificationEngine<R: RuleSet> {
    rules: R,
    reason_limit: usize,
}

impl<R: RuleSet> ClassificationEngine<R> {
    pub fn new(rules: R) -> Self {
        Self::with_config(rules, &ClassifierConfig::default())
    }

    pub fn with_config(rules: R, config: &ClassifierConfig) -> Self {
        Self {
            rules,
            reason_limit: config.max_reason_indicators,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Classify one change. A malformed record is rejected.
    pub fn classify(
        &self,
        record: &FileChangeRecord,
        context: &ClassificationContext,
    ) -> Result<ClassificationResult> {
        record.validate()?;
        let input = RuleInput::new(record, context);

        let scored: Vec<(R::Category, u32, Vec<String>)> = R::Category::all()
            .iter()
            .map(|&category| {
                let mut indicators = Vec::new();
                let score = self
                    .rules
                    .evaluate(category, &input, &mut indicators)
                    .min(MAX_RULE_SCORE);
                (category, score, indicators)
            })
            .collect();

        let (best, score) = select_best(scored.iter().map(|(c, s, _)| (*c, *s)))
            .ok_or_else(|| {
                LensError::Config(format!(
                    "rule-set '{}' has no categories",
                    self.rules.name()
                ))
            })?;

        debug!(
            "{} [{}]: {:?}",
            record.relative_path,
            self.rules.name(),
            scored.iter().map(|(c, s, _)| (c.code(), *s)).collect::<Vec<_>>()
        );

        let indicators = scored
            .into_iter()
            .find(|(c, _, _)| *c == best)
            .map(|(_, _, indicators)| indicators)
            .unwrap_or_default();

        Ok(build_result(
            &record.relative_path,
            best,
            score,
            indicators,
            context.changed_methods.clone(),
            self.reason_limit,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Toy {
        First,
        Second,
    }

    impl Category for Toy {
        fn all() -> &'static [Self] {
            &[Toy::First, Toy::Second]
        }
        fn code(&self) -> &'static str {
            match self {
                Toy::First => "T1",
                Toy::Second => "T2",
            }
        }
        fn display_name(&self) -> &'static str {
            match self {
                Toy::First => "First",
                Toy::Second => "Second",
            }
        }
        fn description(&self) -> &'static str {
            "toy"
        }
    }

    struct FixedRules(u32, u32);

    impl RuleSet for FixedRules {
        type Category = Toy;

        fn name(&self) -> &'static str {
            "fixed"
        }

        fn evaluate(&self, category: Toy, _: &RuleInput<'_>, indicators: &mut Vec<String>) -> u32 {
            let score = match category {
                Toy::First => self.0,
                Toy::Second => self.1,
            };
            if score > 0 {
                indicators.extend(["a", "b", "c", "d"].map(|s| format!("{}{}", category.code(), s)));
            }
            score
        }
    }

    fn record() -> FileChangeRecord {
        FileChangeRecord::new("src/a.ts", "+const a = 1;")
    }

    #[test]
    fn test_select_best_first_wins_ties() {
        assert_eq!(select_best([("a", 5), ("b", 5), ("c", 1)]), Some(("a", 5)));
        assert_eq!(select_best([("a", 1), ("b", 7)]), Some(("b", 7)));
        assert_eq!(select_best(Vec::<(&str, u32)>::new()), None);
    }

    #[test]
    fn test_highest_score_wins_and_is_capped() {
        let engine = ClassificationEngine::new(FixedRules(30, 250));
        let result = engine.classify(&record(), &ClassificationContext::default()).unwrap();
        assert_eq!(result.category, "T2");
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.indicators.len(), 4);
        assert_eq!(result.reason, "Second: T2a, T2b, T2c");
    }

    #[test]
    fn test_tie_goes_to_first_category() {
        let engine = ClassificationEngine::new(FixedRules(40, 40));
        let result = engine.classify(&record(), &ClassificationContext::default()).unwrap();
        assert_eq!(result.category, "T1");
        assert!((result.confidence - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_indicators_uses_generic_reason() {
        let engine = ClassificationEngine::new(FixedRules(0, 0));
        let result = engine.classify(&record(), &ClassificationContext::default()).unwrap();
        assert_eq!(result.category, "T1");
        assert_eq!(result.confidence, 0.0);
        assert!(result.reason.starts_with("No distinctive patterns detected"));
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let engine = ClassificationEngine::new(FixedRules(1, 1));
        let bad = FileChangeRecord::new("", "+x");
        assert!(engine.classify(&bad, &ClassificationContext::default()).is_err());
    }

    #[test]
    fn test_changed_methods_come_from_context() {
        let engine = ClassificationEngine::new(FixedRules(1, 0));
        let ctx = ClassificationContext::default().with_changed_methods(vec!["load".into()]);
        let result = engine.classify(&record(), &ctx).unwrap();
        assert_eq!(result.changed_methods, vec!["load"]);
    }
}
