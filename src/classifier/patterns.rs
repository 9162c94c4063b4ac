//! Pattern tables and scoring primitives shared by the rule-sets
//!
//! Each rule owns one static table. Text patterns are compiled once into a
//! `CompiledPatterns` held in a `LazyLock`; path patterns are plain substring tests.

use regex::Regex;

/// Regex scored by number of matches in the change text
#[derive(Debug, Clone, Copy)]
pub struct WeightedPattern {
    /// Indicator recorded when the pattern fires
    pub indicator: &'static str,
    pub pattern: &'static str,
    /// Score per match
    pub weight: u32,
    /// Matches beyond this count add nothing
    pub max_hits: u32,
}

/// Path fragment test against the lowercase, `/`-prefixed file path
#[derive(Debug, Clone, Copy)]
pub struct PathPattern {
    pub indicator: &'static str,
    /// Any fragment matching fires the pattern
    pub fragments: &'static [&'static str],
    pub weight: u32,
}

pub struct CompiledPatterns {
    entries: Vec<(WeightedPattern, Regex)>,
}

impl CompiledPatterns {
    /// Compile a static table. Tables are literals, so an invalid entry is a programming
    /// error and panics on first use.
    pub fn compile(table: &'static [WeightedPattern]) -> Self {
        let entries = table
            .iter()
            .map(|p| {
                let regex = Regex::new(p.pattern)
                    .unwrap_or_else(|e| panic!("invalid pattern for '{}': {}", p.indicator, e));
                (*p, regex)
            })
            .collect();
        Self { entries }
    }

    /// Score `text`, appending an indicator for every pattern that matched.
    pub fn score(&self, text: &str, indicators: &mut Vec<String>) -> u32 {
        let mut total = 0;
        for (pattern, regex) in &self.entries {
            let hits = regex.find_iter(text).count() as u32;
            if hits == 0 {
                continue;
            }
            total += pattern.weight * hits.min(pattern.max_hits);
            indicators.push(format_indicator(pattern.indicator, hits));
        }
        total
    }

    /// Score each name separately; a pattern fires at most once per name.
    pub fn score_names(&self, names: &[String], indicators: &mut Vec<String>) -> u32 {
        let mut total = 0;
        for (pattern, regex) in &self.entries {
            let matched: Vec<&str> = names
                .iter()
                .filter(|n| regex.is_match(n))
                .map(String::as_str)
                .collect();
            if matched.is_empty() {
                continue;
            }
            total += pattern.weight * (matched.len() as u32).min(pattern.max_hits);
            indicators.push(format!("{}: {}", pattern.indicator, matched.join(", ")));
        }
        total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Score a path against a path table.
pub fn score_path(table: &[PathPattern], path: &str, indicators: &mut Vec<String>) -> u32 {
    let normalized = normalize_path(path);
    let mut total = 0;
    for pattern in table {
        if let Some(fragment) = pattern.fragments.iter().find(|f| normalized.contains(*f)) {
            total += pattern.weight;
            indicators.push(format!("{} ({})", pattern.indicator, fragment));
        }
    }
    total
}

/// Lowercase, `/`-prefixed form so directory fragments like `/api/` match top-level dirs.
pub fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/').to_lowercase())
}

fn format_indicator(indicator: &str, hits: u32) -> String {
    if hits > 1 {
        format!("{} (x{})", indicator, hits)
    } else {
        indicator.to_string()
    }
}
