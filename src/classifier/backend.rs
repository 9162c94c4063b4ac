//! Backend rule-set (A1 to A5)
//!
//! Keyed on directory naming convention and the names of the file's exported functions,
//! as reported by the external language analyzers.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::engine::{Category, ClassificationEngine, RuleInput, RuleSet};
use super::patterns::{CompiledPatterns, PathPattern, WeightedPattern, score_path};
use crate::constants::classification::EXPORTED_FUNCTION_BONUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendCategory {
    #[serde(rename = "A1")]
    ApiInterface,
    #[serde(rename = "A2")]
    BusinessLogic,
    #[serde(rename = "A3")]
    DataModel,
    #[serde(rename = "A4")]
    Configuration,
    #[serde(rename = "A5")]
    UtilityInfrastructure,
}

impl Category for BackendCategory {
    fn all() -> &'static [Self] {
        &[
            BackendCategory::ApiInterface,
            BackendCategory::BusinessLogic,
            BackendCategory::DataModel,
            BackendCategory::Configuration,
            BackendCategory::UtilityInfrastructure,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            BackendCategory::ApiInterface => "A1",
            BackendCategory::BusinessLogic => "A2",
            BackendCategory::DataModel => "A3",
            BackendCategory::Configuration => "A4",
            BackendCategory::UtilityInfrastructure => "A5",
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            BackendCategory::ApiInterface => "API Interface",
            BackendCategory::BusinessLogic => "Business Logic",
            BackendCategory::DataModel => "Data Model",
            BackendCategory::Configuration => "Configuration",
            BackendCategory::UtilityInfrastructure => "Utility & Infrastructure",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            BackendCategory::ApiInterface => "Endpoints, handlers and controllers",
            BackendCategory::BusinessLogic => "Services, use cases and domain rules",
            BackendCategory::DataModel => "Entities, DTOs, schemas and repositories",
            BackendCategory::Configuration => "Application settings and wiring",
            BackendCategory::UtilityInfrastructure => {
                "Shared helpers, middleware and infrastructure code"
            }
        }
    }
}

// =============================================================================
// Pattern Tables
// =============================================================================

static API_PATHS: &[PathPattern] = &[
    PathPattern {
        indicator: "api directory",
        fragments: &["/api/", "/rest/", "/grpc/", "/graphql/"],
        weight: 40,
    },
    PathPattern {
        indicator: "handler directory",
        fragments: &["/handler/", "/handlers/", "/controller/", "/controllers/", "/routes/"],
        weight: 35,
    },
];

static API_NAMES: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "handler function",
        pattern: r"Handler$|^(?:Handle|Serve)[A-Z]",
        weight: 20,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "endpoint naming",
        pattern: r"Controller|Endpoint|Resource$",
        weight: 15,
        max_hits: 2,
    },
];

static BUSINESS_PATHS: &[PathPattern] = &[PathPattern {
    indicator: "service directory",
    fragments: &["/service/", "/services/", "/usecase/", "/usecases/", "/domain/", "/logic/"],
    weight: 40,
}];

static BUSINESS_NAMES: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "process function",
        pattern: r"^(?:Process|Calculate|Validate|Execute|Apply|Compute)[A-Z]?",
        weight: 20,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "service naming",
        pattern: r"Service$|UseCase$",
        weight: 15,
        max_hits: 2,
    },
];

static MODEL_PATHS: &[PathPattern] = &[
    PathPattern {
        indicator: "model directory",
        fragments: &["/model/", "/models/", "/entity/", "/entities/", "/dto/", "/schema/"],
        weight: 40,
    },
    PathPattern {
        indicator: "persistence directory",
        fragments: &["/repository/", "/repositories/", "/dao/", "/mapper/"],
        weight: 30,
    },
];

static MODEL_NAMES: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "constructor function",
        pattern: r"^New[A-Z]",
        weight: 20,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "model naming",
        pattern: r"Repository|Entity|Model|Dto|DTO|Schema",
        weight: 15,
        max_hits: 2,
    },
];

static CONFIG_PATHS: &[PathPattern] = &[
    PathPattern {
        indicator: "config directory",
        fragments: &["/config/", "/conf/", "/configuration/", "/settings/"],
        weight: 40,
    },
    PathPattern {
        indicator: "config file",
        fragments: &[".yaml", ".yml", ".properties", ".toml", ".ini"],
        weight: 30,
    },
];

static CONFIG_NAMES: &[WeightedPattern] = &[WeightedPattern {
    indicator: "config function",
    pattern: r"^(?:Load|Init|Setup|Configure)|Config$",
    weight: 20,
    max_hits: 2,
}];

static UTILITY_PATHS: &[PathPattern] = &[
    PathPattern {
        indicator: "util directory",
        fragments: &["/util/", "/utils/", "/helper/", "/helpers/", "/common/"],
        weight: 40,
    },
    PathPattern {
        indicator: "infrastructure directory",
        fragments: &["/infra/", "/infrastructure/", "/middleware/", "/pkg/"],
        weight: 30,
    },
];

static UTILITY_NAMES: &[WeightedPattern] = &[
    WeightedPattern {
        indicator: "conversion function",
        pattern: r"^(?:Must|Parse|Format|Convert|To)[A-Z]",
        weight: 15,
        max_hits: 2,
    },
    WeightedPattern {
        indicator: "helper naming",
        pattern: r"Util|Helper",
        weight: 15,
        max_hits: 2,
    },
];

static API: LazyLock<CompiledPatterns> = LazyLock::new(|| CompiledPatterns::compile(API_NAMES));
static BUSINESS: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(BUSINESS_NAMES));
static MODEL: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(MODEL_NAMES));
static CONFIG: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(CONFIG_NAMES));
static UTILITY: LazyLock<CompiledPatterns> =
    LazyLock::new(|| CompiledPatterns::compile(UTILITY_NAMES));

// =============================================================================
// Rules
// =============================================================================

pub struct BackendRuleSet;

impl BackendRuleSet {
    fn tables(category: BackendCategory) -> (&'static CompiledPatterns, &'static [PathPattern]) {
        match category {
            BackendCategory::ApiInterface => (&API, API_PATHS),
            BackendCategory::BusinessLogic => (&BUSINESS, BUSINESS_PATHS),
            BackendCategory::DataModel => (&MODEL, MODEL_PATHS),
            BackendCategory::Configuration => (&CONFIG, CONFIG_PATHS),
            BackendCategory::UtilityInfrastructure => (&UTILITY, UTILITY_PATHS),
        }
    }
}

impl RuleSet for BackendRuleSet {
    type Category = BackendCategory;

    fn name(&self) -> &'static str {
        "backend"
    }

    fn evaluate(
        &self,
        category: BackendCategory,
        input: &RuleInput<'_>,
        indicators: &mut Vec<String>,
    ) -> u32 {
        let (names, paths) = Self::tables(category);
        let exported = &input.context.exported_functions;

        let mut score = score_path(paths, input.path(), indicators);
        score += names.score_names(exported, indicators);

        if category == BackendCategory::ApiInterface && !exported.is_empty() {
            score += EXPORTED_FUNCTION_BONUS;
            indicators.push(format!("{} exported functions", exported.len()));
        }
        score
    }
}

pub type BackendClassifier = ClassificationEngine<BackendRuleSet>;

impl BackendClassifier {
    pub fn backend() -> Self {
        ClassificationEngine::new(BackendRuleSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassificationContext, ClassificationResult, FileChangeRecord};
    use proptest::prelude::*;

    fn classify(path: &str, exported: &[&str]) -> ClassificationResult {
        let record = FileChangeRecord::new(path, "+func x() {}");
        let ctx = ClassificationContext::default()
            .with_exported_functions(exported.iter().map(|s| s.to_string()).collect());
        BackendClassifier::backend().classify(&record, &ctx).unwrap()
    }

    #[test]
    fn test_api_directory_with_handlers() {
        let result = classify("internal/api/user.go", &["UserHandler", "ServeHTTP"]);
        assert_eq!(result.category, "A1");
        assert_eq!(result.category_name, "API Interface");
        assert!(result.indicators.iter().any(|i| i == "2 exported functions"));
    }

    #[test]
    fn test_service_directory() {
        let result = classify(
            "src/main/java/com/acme/service/OrderService.java",
            &["ProcessOrder"],
        );
        assert_eq!(result.category, "A2");
    }

    #[test]
    fn test_model_constructor() {
        let result = classify("pkg/model/user.go", &["NewUser"]);
        assert_eq!(result.category, "A3");
        assert!(result.reason.contains("constructor function: NewUser"));
    }

    #[test]
    fn test_config_file() {
        let result = classify("config/app.yaml", &[]);
        assert_eq!(result.category, "A4");
        assert!((result.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_utility_directory() {
        let result = classify("internal/util/strings.go", &["ParseName"]);
        assert_eq!(result.category, "A5");
    }

    #[test]
    fn test_unmatched_file_defaults_to_first_category() {
        let result = classify("main.go", &[]);
        assert_eq!(result.category, "A1");
        assert_eq!(result.confidence, 0.0);
        assert!(result.indicators.is_empty());
    }

    proptest! {
        #[test]
        fn prop_result_is_bounded_and_enumerated(
            path in "[a-z]{1,8}(/[a-z]{1,8}){0,4}\\.(go|java|ts|yaml)",
            exported in proptest::collection::vec("[A-Za-z]{1,12}", 0..6),
            lines in proptest::collection::vec("[ -~]{0,40}", 0..6),
        ) {
            let diff: Vec<String> = lines.iter().map(|l| format!("+{}", l)).collect();
            let record = FileChangeRecord::new(path, diff.join("\n"));
            let ctx = ClassificationContext::default().with_exported_functions(exported);
            let result = BackendClassifier::backend().classify(&record, &ctx).unwrap();
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert!(BackendCategory::all().iter().any(|c| c.code() == result.category));
        }
    }
}
