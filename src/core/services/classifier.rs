use regex::{Regex, RegexBuilder};

use crate::config::{contains_keyword, CategoryConfig, KeywordRule};
use crate::domain::{CanonicalCategory, FlowSide};
use crate::errors::{FlowError, Result};

/// Maps free-text category strings onto canonical names.
///
/// Priority: blank -> overflow bucket, exact canonical name, then side-specific
/// rules. Income only checks its keyword list and otherwise passes the raw
/// string through; expenses go through aliases, the keyword table and the broad
/// fallback before passing through.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    income_keywords: Vec<String>,
    aliases: Vec<(Regex, String)>,
    keywords: Vec<KeywordRule>,
    broad_fallback: Vec<KeywordRule>,
}

impl CategoryClassifier {
    pub fn new(config: &CategoryConfig) -> Result<Self> {
        let aliases = config
            .aliases
            .iter()
            .map(|alias| {
                RegexBuilder::new(&format!("^(?:{})$", alias.pattern))
                    .case_insensitive(true)
                    .build()
                    .map(|regex| (regex, alias.category.clone()))
                    .map_err(|source| FlowError::InvalidPattern {
                        pattern: alias.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            income_keywords: config
                .income_keywords
                .iter()
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
            aliases,
            keywords: config.keywords.iter().map(KeywordRule::normalized).collect(),
            broad_fallback: config
                .broad_fallback
                .iter()
                .map(KeywordRule::normalized)
                .collect(),
        })
    }

    pub fn classify(&self, raw: Option<&str>, side: FlowSide) -> String {
        let raw = match raw {
            Some(value) if !value.trim().is_empty() => value,
            _ => return side.overflow_name().to_string(),
        };

        if let Some(canonical) = CanonicalCategory::from_display_name(raw) {
            return canonical.display_name().to_string();
        }

        match side {
            FlowSide::Income => self.classify_income(raw),
            FlowSide::Expense => self.classify_expense(raw),
        }
    }

    fn classify_income(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        if self
            .income_keywords
            .iter()
            .any(|keyword| contains_keyword(&lowered, keyword))
        {
            return CanonicalCategory::Income.display_name().to_string();
        }
        raw.to_string()
    }

    fn classify_expense(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if let Some((_, category)) = self.aliases.iter().find(|(regex, _)| regex.is_match(trimmed)) {
            return category.clone();
        }

        let lowered = trimmed.to_lowercase();
        if let Some(category) = first_containing(&self.keywords, &lowered) {
            return category.to_string();
        }
        if let Some(category) = first_containing(&self.broad_fallback, &lowered) {
            return category.to_string();
        }
        raw.to_string()
    }
}

fn first_containing<'a>(rules: &'a [KeywordRule], haystack: &str) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| rule.matches(haystack))
        .map(|rule| rule.category.as_str())
}
