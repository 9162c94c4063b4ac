//! Line-level change analysis
//!
//! Used when no per-method change data is available. Each added or removed line goes
//! through a fixed-priority detector sequence and takes the label of the first detector
//! that matches it. Only when no line matches anything are the detectors run once more
//! over the whole changed text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::{Category, build_result, select_best};
use super::frontend::FrontendCategory;
use crate::config::ClassifierConfig;
use crate::constants::classification::{GRANULAR_FILE_WEIGHT, GRANULAR_LINE_WEIGHT, MAX_RULE_SCORE};
use crate::types::{
    ClassificationContext, ClassificationResult, DiffLineKind, FileChangeRecord, Result,
};

/// `useEffect(() => {...}, [a, b])` on one line
static HOOK_DEPENDENCY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(use[A-Z]\w*)\s*\(.*,\s*\[([^\]]*)\]\s*\)").expect("valid hook dependency regex")
});

/// Closing line of a multi-line hook: `}, [a, b])`
static DEPENDENCY_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\}\s*,\s*\[([^\]]*)\]\s*\)\s*;?\s*$").expect("valid dependency tail regex")
});

/// Hook call spanning several lines of the joined text
static HOOK_DEPENDENCY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\b(use[A-Z]\w*)\s*\(.*?,\s*\[([^\]]*)\]\s*\)")
        .expect("valid hook dependency block regex")
});

static HOOK_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(use[A-Z]\w*)\s*\(").expect("valid hook call regex"));

static JSX_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w])</?([A-Za-z][\w.]*)[\s/>]").expect("valid jsx element regex")
});

static EVENT_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(on[A-Z][A-Za-z]+)\s*=|(?:@|v-on:)([A-Za-z][\w.:-]*)\s*=|\.(addEventListener)\(")
        .expect("valid event binding regex")
});

static PROPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bprops\.(\w+)|\b(defineProps|propTypes|defaultProps)\b|\b(props)\s*:")
        .expect("valid props regex")
});

static STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(setState|dispatch|createSlice|createStore|defineStore|reactive|commit)\b")
        .expect("valid state regex")
});

static API_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(fetch|axios|XMLHttpRequest)\b|\.(get|post|put|patch|delete)\s*\(")
        .expect("valid api regex")
});

static FUNCTION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bfunction\s*\*?\s*([A-Za-z_$][\w$]*)|\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s*)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*=>",
    )
    .expect("valid function declaration regex")
});

/// What a changed line was recognised as, in detector priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GranularChangeKind {
    /// Dependency array of a hook; `hook` is `None` for a bare closing `}, [deps])` line
    HookDependency {
        hook: Option<String>,
        dependencies: Vec<String>,
    },
    HookCall { hook: String },
    JsxElement { tag: String },
    EventBinding { event: String },
    Props { name: String },
    State { keyword: String },
    ApiCall { keyword: String },
}

impl GranularChangeKind {
    pub fn category(&self) -> FrontendCategory {
        match self {
            GranularChangeKind::HookDependency { .. }
            | GranularChangeKind::HookCall { .. }
            | GranularChangeKind::State { .. } => FrontendCategory::LogicState,
            GranularChangeKind::JsxElement { .. } | GranularChangeKind::Props { .. } => {
                FrontendCategory::UiStructure
            }
            GranularChangeKind::EventBinding { .. } => FrontendCategory::Interaction,
            GranularChangeKind::ApiCall { .. } => FrontendCategory::DataConfiguration,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            GranularChangeKind::HookDependency { hook, dependencies } => format!(
                "{} dependencies [{}]",
                hook.as_deref().unwrap_or("hook"),
                dependencies.join(", ")
            ),
            GranularChangeKind::HookCall { hook } => format!("hook {}", hook),
            GranularChangeKind::JsxElement { tag } => format!("element <{}>", tag),
            GranularChangeKind::EventBinding { event } => format!("event {}", event),
            GranularChangeKind::Props { name } => format!("props {}", name),
            GranularChangeKind::State { keyword } => format!("state {}", keyword),
            GranularChangeKind::ApiCall { keyword } => format!("api {}", keyword),
        }
    }
}

type Detector = fn(&str) -> Option<GranularChangeKind>;

/// Detectors in priority order; the first match labels the line.
const DETECTORS: &[Detector] = &[
    detect_hook_dependency,
    detect_hook_call,
    detect_jsx_element,
    detect_event_binding,
    detect_props,
    detect_state,
    detect_api_call,
];

fn detect_hook_dependency(text: &str) -> Option<GranularChangeKind> {
    if let Some(c) = HOOK_DEPENDENCY_LINE.captures(text) {
        return Some(GranularChangeKind::HookDependency {
            hook: Some(c[1].to_string()),
            dependencies: split_dependencies(&c[2]),
        });
    }
    DEPENDENCY_TAIL
        .captures(text)
        .map(|c| GranularChangeKind::HookDependency {
            hook: None,
            dependencies: split_dependencies(&c[1]),
        })
}

fn detect_hook_dependency_block(text: &str) -> Option<GranularChangeKind> {
    HOOK_DEPENDENCY_BLOCK
        .captures(text)
        .map(|c| GranularChangeKind::HookDependency {
            hook: Some(c[1].to_string()),
            dependencies: split_dependencies(&c[2]),
        })
}

fn detect_hook_call(text: &str) -> Option<GranularChangeKind> {
    HOOK_CALL.captures(text).map(|c| GranularChangeKind::HookCall {
        hook: c[1].to_string(),
    })
}

fn detect_jsx_element(text: &str) -> Option<GranularChangeKind> {
    JSX_ELEMENT.captures(text).map(|c| GranularChangeKind::JsxElement {
        tag: c[1].to_string(),
    })
}

fn detect_event_binding(text: &str) -> Option<GranularChangeKind> {
    EVENT_BINDING
        .captures(text)
        .and_then(|c| first_group(&c))
        .map(|event| GranularChangeKind::EventBinding { event })
}

fn detect_props(text: &str) -> Option<GranularChangeKind> {
    PROPS
        .captures(text)
        .and_then(|c| first_group(&c))
        .map(|name| GranularChangeKind::Props { name })
}

fn detect_state(text: &str) -> Option<GranularChangeKind> {
    STATE.captures(text).map(|c| GranularChangeKind::State {
        keyword: c[1].to_string(),
    })
}

fn detect_api_call(text: &str) -> Option<GranularChangeKind> {
    API_CALL
        .captures(text)
        .and_then(|c| first_group(&c))
        .map(|keyword| GranularChangeKind::ApiCall { keyword })
}

fn first_group(captures: &regex::Captures<'_>) -> Option<String> {
    captures
        .iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().to_string())
}

fn split_dependencies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect()
}

/// Where the changes were detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisScope {
    Line,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranularChange {
    /// 1-based diff line; `None` for file-level matches
    pub line_number: Option<usize>,
    /// Added or removed; `None` for file-level matches
    pub direction: Option<DiffLineKind>,
    #[serde(flatten)]
    pub kind: GranularChangeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranularAnalysis {
    pub changes: Vec<GranularChange>,
    pub scope: AnalysisScope,
}

pub struct GranularAnalyzer {
    reason_limit: usize,
}

impl GranularAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&ClassifierConfig::default())
    }

    pub fn with_config(config: &ClassifierConfig) -> Self {
        Self {
            reason_limit: config.max_reason_indicators,
        }
    }

    /// Label every changed line, falling back to one file-level pass when no line matches.
    pub fn analyze(&self, record: &FileChangeRecord) -> Result<GranularAnalysis> {
        record.validate()?;
        let changed = record.changed_lines();

        let changes: Vec<GranularChange> = changed
            .iter()
            .filter_map(|line| {
                DETECTORS
                    .iter()
                    .find_map(|detect| detect(line.content))
                    .map(|kind| GranularChange {
                        line_number: Some(line.line_number),
                        direction: Some(line.kind),
                        kind,
                    })
            })
            .collect();

        if !changes.is_empty() {
            return Ok(GranularAnalysis {
                changes,
                scope: AnalysisScope::Line,
            });
        }

        let text = record.changed_text();
        let file_detectors = std::iter::once(detect_hook_dependency_block as Detector)
            .chain(DETECTORS.iter().skip(1).copied());
        let changes = file_detectors
            .filter_map(|detect| detect(&text))
            .map(|kind| GranularChange {
                line_number: None,
                direction: None,
                kind,
            })
            .collect::<Vec<_>>();

        debug!(
            "{}: no line-level match, file-level pass found {}",
            record.relative_path,
            changes.len()
        );
        Ok(GranularAnalysis {
            changes,
            scope: AnalysisScope::File,
        })
    }

    /// Classify a change from its granular analysis onto the frontend categories.
    pub fn classify(
        &self,
        record: &FileChangeRecord,
        context: &ClassificationContext,
    ) -> Result<ClassificationResult> {
        let analysis = self.analyze(record)?;
        let weight = match analysis.scope {
            AnalysisScope::Line => GRANULAR_LINE_WEIGHT,
            AnalysisScope::File => GRANULAR_FILE_WEIGHT,
        };

        let categories = FrontendCategory::all();
        let mut scores = vec![0u32; categories.len()];
        let mut indicators: Vec<Vec<String>> = vec![Vec::new(); categories.len()];
        for change in &analysis.changes {
            let category = change.kind.category();
            if let Some(idx) = categories.iter().position(|c| *c == category) {
                scores[idx] = (scores[idx] + weight).min(MAX_RULE_SCORE);
                indicators[idx].push(change.kind.describe());
            }
        }

        let (best, score) = select_best(categories.iter().copied().zip(scores.iter().copied()))
            .unwrap_or((FrontendCategory::LogicState, 0));
        let best_idx = categories.iter().position(|c| *c == best).unwrap_or(0);

        let changed_methods = if context.changed_methods.is_empty() {
            touched_functions(record)
        } else {
            context.changed_methods.clone()
        };

        Ok(build_result(
            &record.relative_path,
            best,
            score,
            std::mem::take(&mut indicators[best_idx]),
            changed_methods,
            self.reason_limit,
        ))
    }
}

impl Default for GranularAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Function names declared on changed lines, first occurrence order
fn touched_functions(record: &FileChangeRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in record.changed_lines() {
        for c in FUNCTION_DECL.captures_iter(line.content) {
            if let Some(name) = c.get(1).or_else(|| c.get(2)) {
                let name = name.as_str().to_string();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(lines: &[&str]) -> FileChangeRecord {
        FileChangeRecord::new("src/components/List.tsx", lines.join("\n"))
    }

    #[test]
    fn test_hook_dependency_short_circuits_other_detectors() {
        let analysis = GranularAnalyzer::new()
            .analyze(&record(&["+  useEffect(() => {...}, [a, b])"]))
            .unwrap();
        assert_eq!(analysis.scope, AnalysisScope::Line);
        assert_eq!(analysis.changes.len(), 1);
        assert_eq!(
            analysis.changes[0].kind,
            GranularChangeKind::HookDependency {
                hook: Some("useEffect".into()),
                dependencies: vec!["a".into(), "b".into()],
            }
        );
        assert_eq!(analysis.changes[0].direction, Some(DiffLineKind::Added));
        assert_eq!(analysis.changes[0].line_number, Some(1));
    }

    #[test]
    fn test_one_label_per_line_in_priority_order() {
        let analysis = GranularAnalyzer::new()
            .analyze(&record(&[
                "--- a/src/components/List.tsx",
                "+++ b/src/components/List.tsx",
                "@@ -1,4 +1,4 @@",
                " const x = 1;",
                "+  const [items, setItems] = useState([]);",
                "-  <li onClick={select}>{item}</li>",
                "+  <button onClick={select} />",
                "+  props.onSelect(item)",
                "+  dispatch(update())",
                "+  const res = await fetch('/api/items')",
                "+  const y = 2;",
            ]))
            .unwrap();
        let kinds: Vec<&GranularChangeKind> = analysis.changes.iter().map(|c| &c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &GranularChangeKind::HookCall { hook: "useState".into() },
                &GranularChangeKind::JsxElement { tag: "li".into() },
                &GranularChangeKind::JsxElement { tag: "button".into() },
                &GranularChangeKind::Props { name: "onSelect".into() },
                &GranularChangeKind::State { keyword: "dispatch".into() },
                &GranularChangeKind::ApiCall { keyword: "fetch".into() },
            ]
        );
        assert_eq!(analysis.changes[1].direction, Some(DiffLineKind::Removed));
    }

    #[test]
    fn test_dependency_tail_line() {
        let analysis = GranularAnalyzer::new()
            .analyze(&record(&["+  }, [userId]);"]))
            .unwrap();
        assert_eq!(
            analysis.changes[0].kind,
            GranularChangeKind::HookDependency {
                hook: None,
                dependencies: vec!["userId".into()],
            }
        );
    }

    #[test]
    fn test_file_level_fallback_only_when_no_line_matches() {
        let analysis = GranularAnalyzer::new()
            .analyze(&record(&["+  const a = 1;", "+  let b = 2;"]))
            .unwrap();
        assert_eq!(analysis.scope, AnalysisScope::File);
        assert!(analysis.changes.is_empty());

        let analysis = GranularAnalyzer::new()
            .analyze(&record(&["+  useLayoutEffect", "+  (() => {}", "+  , [size])"]))
            .unwrap();
        assert_eq!(analysis.scope, AnalysisScope::File);
        assert_eq!(
            analysis.changes[0].kind,
            GranularChangeKind::HookDependency {
                hook: Some("useLayoutEffect".into()),
                dependencies: vec!["size".into()],
            }
        );
        assert!(analysis.changes.iter().all(|c| c.line_number.is_none()));
    }

    #[test]
    fn test_classify_maps_changes_to_categories() {
        let result = GranularAnalyzer::new()
            .classify(
                &record(&[
                    "+  useEffect(() => {...}, [a, b])",
                    "+  const [open, setOpen] = useState(false)",
                    "+  <Modal />",
                ]),
                &ClassificationContext::default(),
            )
            .unwrap();
        assert_eq!(result.category, "F1");
        assert!((result.confidence - 0.4).abs() < 1e-9);
        assert_eq!(
            result.indicators,
            vec!["useEffect dependencies [a, b]", "hook useState"]
        );
    }

    #[test]
    fn test_classify_tie_goes_to_first_category() {
        let result = GranularAnalyzer::new()
            .classify(
                &record(&["+  <Modal />", "+  useMemo(() => x)"]),
                &ClassificationContext::default(),
            )
            .unwrap();
        assert_eq!(result.category, "F1");
    }

    #[test]
    fn test_changed_methods_from_diff_when_context_is_empty() {
        let result = GranularAnalyzer::new()
            .classify(
                &record(&[
                    "+function loadItems() {",
                    "+const onSave = async (e) => {",
                    "-function loadItems() {",
                ]),
                &ClassificationContext::default(),
            )
            .unwrap();
        assert_eq!(result.changed_methods, vec!["loadItems", "onSave"]);

        let ctx = ClassificationContext::default().with_changed_methods(vec!["render".into()]);
        let result = GranularAnalyzer::new()
            .classify(&record(&["+function loadItems() {"]), &ctx)
            .unwrap();
        assert_eq!(result.changed_methods, vec!["render"]);
    }

    proptest! {
        #[test]
        fn prop_result_is_bounded_and_enumerated(
            lines in proptest::collection::vec(("[-+ ]", "[ -~]{0,40}"), 0..10),
        ) {
            let diff: Vec<String> = lines.iter().map(|(p, l)| format!("{}{}", p, l)).collect();
            let record = FileChangeRecord::new("src/components/List.tsx", diff.join("\n"));
            let result = GranularAnalyzer::new()
                .classify(&record, &ClassificationContext::default())
                .unwrap();
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert!(FrontendCategory::all().iter().any(|c| c.code() == result.category));
        }
    }
}
