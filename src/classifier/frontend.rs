//! Frontend rule-set (F1 to F5)
//!
//! Signals come from the changed text (hooks, markup, styling, events, imports) and from
//! the file path (style sheets, config, routes, stores, locales).

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::engine::{Category, ClassificationEngine, RuleInput, RuleSet};
use super::patterns::{CompiledPatterns, PathPattern, WeightedPattern, score_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrontendCategory {
    #[serde(rename = "F1")]
    LogicState,
    #[serde(rename = "F2")]
    UiStructure,
    #[serde(rename = "F3")]
    Styling,
    #[serde(rename = "F4")]
    Interaction,
    #[serde(rename = "F5")]
    DataConfiguration,
}

impl Category for FrontendCategory {
    fn all() -> &'static [Self] {
        &[
            FrontendCategory::LogicState,
            FrontendCategory::UiStructure,
            FrontendCategory::Styling,
            FrontendCategory::Interaction,
            FrontendCategory::DataConfiguration,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            FrontendCategory::LogicState => "F1",
            FrontendCategory::UiStructure => "F2",
            FrontendCategory::Styling => "F3",
            FrontendCategory::Interaction => "F4",
            FrontendCategory::DataConfiguration => "F5",
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            FrontendCategory::LogicState => "Logic & State",
            FrontendCategory::UiStructure => "UI Structure",
            FrontendCategory::Styling => "Styling",
            FrontendCategory::Interaction => "Interaction",
            FrontendCategory::DataConfiguration => "Data & Configuration",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            FrontendCategory::LogicState => {
                "Component logic, hooks and state management changes"
            }
            FrontendCategory::UiStructure => "Markup, component tree and props changes",
            FrontendCategory::Styling => "Style sheets, class names and inline style changes",
            FrontendCategory::Interaction => "Event handling and user interaction changes",
            FrontendCategory::DataConfiguration => {
                "Configuration, routing, stores, i18n and data access changes"
            }
        }
    }
}

// =============================================================================
// Pattern Tables
// =============================================================================

static LOGIC_STATE_TEXT: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "hook usage",
        pattern: r"\buse[A-Z]\w*\s*\(",
        weight: 15,
        max_hits: 4,
    },
    WeightedPattern {
        indicator: "state management",
        pattern: r"\b(?:setState|useReducer|createSlice|createStore|defineStore|dispatch)\b|\b(?:ref|reactive|computed)\s*\(",
        weight: 15,
        max_hits: 3,
    },
    WeightedPattern {
        indicator: "async logic",
        pattern: r"\b(?:async|await|Promise)\b",
        weight: 10,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "control flow",
        pattern: r"\b(?:if|else|switch|for|while|return)\b",
        weight: 5,
        max_hits: 4,
    },
];

static LOGIC_STATE_PATHS: &[PathPattern] = &[PathPattern {
    indicator: "hooks directory",
    fragments: &["/hooks/", "/composables/"],
    weight: 20,
}];

static UI_STRUCTURE_TEXT: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "JSX/template elements",
        pattern: r"</?[A-Za-z][\w.-]*[\s/>]",
        weight: 8,
        max_hits: 6,
    },
    WeightedPattern {
        indicator: "template directives",
        pattern: r"\bv-(?:if|else-if|else|for|show|model|slot)\b",
        weight: 10,
        max_hits: 3,
    },
    WeightedPattern {
        indicator: "conditional rendering",
        pattern: r"(?:&&|\?)\s*\(?\s*<[A-Za-z]",
        weight: 10,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "props usage",
        pattern: r"\bprops\b|\bdefineProps\b",
        weight: 5,
        max_hits: 2,
    },
];

static UI_STRUCTURE_PATHS: &[PathPattern] = &[
    PathPattern {
        indicator: "component directory",
        fragments: &["/components/", "/pages/", "/views/", "/layouts/"],
        weight: 15,
    },
    PathPattern {
        indicator: "component file",
        fragments: &[".tsx", ".jsx", ".vue", ".svelte"],
        weight: 5,
    },
];

static STYLING_TEXT: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "className usage",
        pattern: r"\bclassName\s*=",
        weight: 12,
        max_hits: 4,
    },
    WeightedPattern {
        indicator: "class attribute",
        pattern: r"(?:^|[\s:])class\s*=",
        weight: 8,
        max_hits: 4,
    },
    WeightedPattern {
        indicator: "inline style",
        pattern: r"\bstyle\s*=",
        weight: 12,
        max_hits: 3,
    },
    WeightedPattern {
        indicator: "CSS-in-JS",
        pattern: r"\bstyled\.\w+|\bstyled\(|\bcss`|\bmakeStyles\b",
        weight: 15,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "CSS declarations",
        pattern: r"\b(?:color|background|margin|padding|font-size|display|flex|width|height|border)\s*:",
        weight: 8,
        max_hits: 5,
    },
];

static STYLING_PATHS: &[PathPattern] = &[
    PathPattern {
        indicator: "style sheet",
        fragments: &[".css", ".scss", ".sass", ".less", ".styl"],
        weight: 40,
    },
    PathPattern {
        indicator: "style directory",
        fragments: &["/styles/", "/theme/", "/themes/"],
        weight: 20,
    },
];

static INTERACTION_TEXT: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "event handler props",
        pattern: r"\bon[A-Z][A-Za-z]+\s*=",
        weight: 15,
        max_hits: 4,
    },
    WeightedPattern {
        indicator: "template event bindings",
        pattern: r"(?:@|v-on:)[A-Za-z][\w.:-]*\s*=",
        weight: 15,
        max_hits: 4,
    },
    WeightedPattern {
        indicator: "addEventListener",
        pattern: r"\.(?:add|remove)EventListener\(",
        weight: 15,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "event control",
        pattern: r"\b(?:preventDefault|stopPropagation)\b",
        weight: 10,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "handler functions",
        pattern: r"\bhandle[A-Z]\w*",
        weight: 8,
        max_hits: 3,
    },
];

static INTERACTION_PATHS: &[PathPattern] = &[PathPattern {
    indicator: "events directory",
    fragments: &["/events/", "/handlers/"],
    weight: 10,
}];

static DATA_CONFIG_TEXT: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "imports",
        pattern: r"(?m)^\s*import\s",
        weight: 5,
        max_hits: 6,
    },
    WeightedPattern {
        indicator: "environment variables",
        pattern: r"process\.env\.|import\.meta\.env",
        weight: 15,
        max_hits: 3,
    },
    WeightedPattern {
        indicator: "data fetching",
        pattern: r"\b(?:fetch|axios|useQuery|useSWR)\b",
        weight: 10,
        max_hits: 3,
    },
];

static DATA_CONFIG_PATHS: &[PathPattern] = &[
    PathPattern {
        indicator: "config file",
        fragments: &["/config/", "config.", ".config.", ".env"],
        weight: 30,
    },
    PathPattern {
        indicator: "routing",
        fragments: &["/routes/", "/router/", "router.", "routes."],
        weight: 25,
    },
    PathPattern {
        indicator: "store",
        fragments: &["/store/", "/stores/", "/redux/", "/pinia/"],
        weight: 25,
    },
    PathPattern {
        indicator: "i18n",
        fragments: &["/i18n/", "/locales/", "/lang/"],
        weight: 25,
    },
    PathPattern {
        indicator: "data file",
        fragments: &[".json"],
        weight: 20,
    },
];

static LOGIC_STATE: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(LOGIC_STATE_TEXT));
static UI_STRUCTURE: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(UI_STRUCTURE_TEXT));
static STYLING: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(STYLING_TEXT));
static INTERACTION: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(INTERACTION_TEXT));
static DATA_CONFIG: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(DATA_CONFIG_TEXT));

// =============================================================================
// Rules
// =============================================================================

pub struct FrontendRuleSet;

impl FrontendRuleSet {
    fn tables(category: FrontendCategory) -> (&'static CompiledPatterns, &'static [PathPattern]) {
        match category {
            FrontendCategory::LogicState => (&LOGIC_STATE, LOGIC_STATE_PATHS),
            FrontendCategory::UiStructure => (&UI_STRUCTURE, UI_STRUCTURE_PATHS),
            FrontendCategory::Styling => (&STYLING, STYLING_PATHS),
            FrontendCategory::Interaction => (&INTERACTION, INTERACTION_PATHS),
            FrontendCategory::DataConfiguration => (&DATA_CONFIG, DATA_CONFIG_PATHS),
        }
    }
}

impl RuleSet for FrontendRuleSet {
    type Category = FrontendCategory;

    fn name(&self) -> &'static str {
        "frontend"
    }

    fn evaluate(
        &self,
        category: FrontendCategory,
        input: &RuleInput<'_>,
        indicators: &mut Vec<String>,
    ) -> u32 {
        let (text, paths) = Self::tables(category);
        score_path(paths, input.path(), indicators) + text.score(&input.text, indicators)
    }
}

pub type FrontendClassifier = ClassificationEngine<FrontendRuleSet>;

impl FrontendClassifier {
    pub fn frontend() -> Self {
        ClassificationEngine::new(FrontendRuleSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassificationContext, FileChangeRecord};
    use proptest::prelude::*;

    fn classify(path: &str, diff: &[&str]) -> crate::types::ClassificationResult {
        let record = FileChangeRecord::new(path, diff.join("\n"));
        FrontendClassifier::frontend()
            .classify(&record, &ClassificationContext::default())
            .unwrap()
    }

    #[test]
    fn test_hook_changes_are_logic_and_state() {
        let result = classify(
            "src/components/Counter.tsx",
            &[
                "+  const [count, setCount] = useState(0);",
                "+  const total = useMemo(() => count * 2, [count]);",
                "+  useEffect(() => { dispatch(load()) }, []);",
            ],
        );
        assert_eq!(result.category, "F1");
        assert_eq!(result.category_name, "Logic & State");
        assert!(result.indicators.iter().any(|i| i.starts_with("hook usage")));
        assert!(result.confidence > 0.0 && result.confidence <= 1.0);
    }

    #[test]
    fn test_stylesheet_is_styling() {
        let result = classify(
            "src/styles/button.scss",
            &["-  color: red;", "+  color: blue;", "+  padding: 4px;"],
        );
        assert_eq!(result.category, "F3");
        assert!(result.reason.starts_with("Styling: "));
    }

    #[test]
    fn test_event_bindings_are_interaction() {
        let result = classify(
            "src/App.vue",
            &[
                "+    <button @click=\"save\" @keyup.enter=\"save\">",
                "+  function handleSave(e) { e.preventDefault() }",
            ],
        );
        assert_eq!(result.category, "F4");
    }

    #[test]
    fn test_router_file_is_data_and_configuration() {
        let result = classify(
            "src/router/index.ts",
            &["+import Home from './Home'", "+  { path: '/', component: Home },"],
        );
        assert_eq!(result.category, "F5");
        assert!(result.indicators.iter().any(|i| i.starts_with("routing")));
    }

    #[test]
    fn test_markup_is_ui_structure() {
        let result = classify(
            "src/components/Card.jsx",
            &[
                "+      <section>",
                "+        <Header title={props.title} />",
                "+        <List items={items} />",
                "+      </section>",
            ],
        );
        assert_eq!(result.category, "F2");
    }

    #[test]
    fn test_category_table_is_complete() {
        let codes: Vec<&str> = FrontendCategory::all().iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["F1", "F2", "F3", "F4", "F5"]);
    }

    proptest! {
        #[test]
        fn prop_result_is_bounded_and_enumerated(lines in proptest::collection::vec("[ -~]{0,40}", 0..8)) {
            let diff: Vec<String> = lines.iter().map(|l| format!("+{}", l)).collect();
            let record = FileChangeRecord::new("src/a.tsx", diff.join("\n"));
            let result = FrontendClassifier::frontend()
                .classify(&record, &ClassificationContext::default())
                .unwrap();
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert!(FrontendCategory::all().iter().any(|c| c.code() == result.category));
        }
    }
}
