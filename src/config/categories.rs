//! Category keyword, alias and color tables injected into the classifier and
//! graph builder.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::{CanonicalCategory, FlowSide};

/// Whole-string pattern mapping a short name onto a canonical category.
///
/// The pattern is always matched against the entire trimmed category string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasRule {
    pub pattern: String,
    pub category: String,
}

/// Keywords whose presence as a word or phrase in a category string selects
/// `category`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    /// Trimmed, lowercased copy with blank keywords removed.
    pub fn normalized(&self) -> Self {
        Self {
            category: self.category.clone(),
            keywords: self
                .keywords
                .iter()
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    /// `haystack` and the rule's keywords must already be lowercase.
    pub fn matches(&self, haystack: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| contains_keyword(haystack, keyword))
    }
}

/// True when `keyword` occurs in `haystack` as a whole word or phrase,
/// optionally followed by a plural `s`/`es`. Both sides must be lowercase.
pub fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    haystack.match_indices(keyword).any(|(start, _)| {
        let starts_word = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |ch| !ch.is_alphanumeric());
        let rest = &haystack[start + keyword.len()..];
        starts_word
            && ["", "s", "es"]
                .iter()
                .any(|suffix| rest.strip_prefix(*suffix).is_some_and(at_word_end))
    })
}

fn at_word_end(rest: &str) -> bool {
    rest.chars().next().map_or(true, |ch| !ch.is_alphanumeric())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryConfig {
    /// Node name -> CSS color.
    pub palette: BTreeMap<String, String>,
    pub hub_color: String,
    /// Colors handed out to names with no palette or keyword match.
    pub fallback_colors: Vec<String>,
    pub income_keywords: Vec<String>,
    /// Tried in order; first full match wins.
    pub aliases: Vec<AliasRule>,
    /// Tried in order; also drives legend coloring.
    pub keywords: Vec<KeywordRule>,
    pub broad_fallback: Vec<KeywordRule>,
}

static BUILTIN: Lazy<CategoryConfig> = Lazy::new(CategoryConfig::builtin);

impl Default for CategoryConfig {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl CategoryConfig {
    /// Color for a node name: palette entry, then keyword-table category, then
    /// a stable pick from the fallback colors. Keyword rules are expected to be
    /// normalized (see [`CategoryConfig::normalize_keywords`]).
    pub fn color_for(&self, name: &str) -> String {
        if let Some(color) = self.palette_entry(name) {
            return color.to_string();
        }
        let lowered = name.to_lowercase();
        if let Some(color) = self
            .keywords
            .iter()
            .find(|rule| rule.matches(&lowered))
            .and_then(|rule| self.palette_entry(&rule.category))
        {
            return color.to_string();
        }
        if self.fallback_colors.is_empty() {
            return self.hub_color.clone();
        }
        let slot = stable_hash(name) as usize % self.fallback_colors.len();
        self.fallback_colors[slot].clone()
    }

    /// Lowercases every keyword table in place so lookups need no per-call
    /// case folding.
    pub fn normalize_keywords(&mut self) {
        self.income_keywords = self
            .income_keywords
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        for rule in self.keywords.iter_mut().chain(self.broad_fallback.iter_mut()) {
            *rule = rule.normalized();
        }
    }

    fn palette_entry(&self, name: &str) -> Option<&str> {
        self.palette.get(name).map(String::as_str).or_else(|| {
            self.palette
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, color)| color.as_str())
        })
    }

    fn builtin() -> Self {
        use CanonicalCategory::*;

        let palette = [
            (Income.display_name(), "#10b981"),
            (Housing.display_name(), "#3b82f6"),
            (Food.display_name(), "#f59e0b"),
            (Transportation.display_name(), "#8b5cf6"),
            (Shopping.display_name(), "#ec4899"),
            (Entertainment.display_name(), "#f97316"),
            (Healthcare.display_name(), "#ef4444"),
            (Travel.display_name(), "#06b6d4"),
            (Utilities.display_name(), "#6366f1"),
            (Education.display_name(), "#14b8a6"),
            (Taxes.display_name(), "#64748b"),
            (Gifts.display_name(), "#d946ef"),
            (Savings.display_name(), "#22c55e"),
            (Other.display_name(), "#9ca3af"),
            (FlowSide::Income.overflow_name(), "#6ee7b7"),
            (FlowSide::Expense.overflow_name(), "#9ca3af"),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color.to_string()))
        .collect();

        let aliases = [
            ("^(food|dining|groceries|grocery|restaurants?)$", Food),
            ("^(rent|mortgage|home)$", Housing),
            ("^(transport|transit|commute|car|auto|gas|fuel)$", Transportation),
            ("^(shop|clothes|clothing)$", Shopping),
            ("^(fun|movies?|games?|hobbies)$", Entertainment),
            ("^(health|medical|doctor|pharmacy)$", Healthcare),
            ("^(trips?|vacation|flights?|hotels?)$", Travel),
            ("^(bills?|utility|electric|water|internet|phone)$", Utilities),
            ("^(school|tuition|books)$", Education),
            ("^(tax|irs)$", Taxes),
            ("^(gift|donations?|charity)$", Gifts),
            ("^(saving|investments?|retirement)$", Savings),
        ]
        .into_iter()
        .map(|(pattern, category)| AliasRule {
            pattern: pattern.to_string(),
            category: category.display_name().to_string(),
        })
        .collect();

        let keywords = vec![
            rule(
                Housing,
                &[
                    "rent", "rental", "mortgage", "apartment", "landlord", "hoa fee", "housing",
                ],
            ),
            rule(
                Food,
                &[
                    "grocery", "groceries", "restaurant", "dining", "coffee", "cafe", "takeout", "meal",
                    "lunch", "dinner", "breakfast",
                ],
            ),
            rule(
                Transportation,
                &[
                    "uber", "lyft", "taxi", "bus", "train", "transit", "septa", "parking",
                    "toll", "fuel", "car payment", "subway",
                ],
            ),
            rule(
                Shopping,
                &["amazon", "walmart", "target", "clothing", "clothes", "shoes", "electronics"],
            ),
            rule(
                Entertainment,
                &["netflix", "spotify", "hulu", "cinema", "concert", "streaming", "theater"],
            ),
            rule(
                Healthcare,
                &["doctor", "dentist", "pharmacy", "hospital", "medical", "clinic", "health"],
            ),
            rule(Travel, &["flight", "airline", "hotel", "airbnb", "vacation", "travel"]),
            rule(
                Utilities,
                &[
                    "electric", "electricity", "water bill", "internet", "phone", "cable",
                    "utility", "utilities",
                ],
            ),
            rule(
                Education,
                &["tuition", "school", "course", "textbook", "university", "college"],
            ),
            rule(Taxes, &["tax", "irs"]),
            rule(Gifts, &["gift", "donation", "charity"]),
            rule(
                Savings,
                &["savings", "investment", "401k", "roth ira", "brokerage", "emergency fund"],
            ),
        ];

        let broad_fallback = vec![
            rule(Food, &["food", "eats", "pizza", "burger", "snack"]),
            rule(Transportation, &["car", "vehicle", "gas"]),
            rule(Shopping, &["shop", "store", "mall"]),
            rule(Entertainment, &["fun", "movie", "music", "game"]),
        ];

        Self {
            palette,
            hub_color: "#6b7280".into(),
            fallback_colors: [
                "#0ea5e9", "#a855f7", "#84cc16", "#eab308", "#f43f5e", "#2dd4bf", "#fb923c",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            income_keywords: [
                "salary",
                "wage",
                "paycheck",
                "payroll",
                "bonus",
                "dividend",
                "interest",
                "refund",
                "commission",
                "freelance",
                "pension",
                "stipend",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            aliases,
            keywords,
            broad_fallback,
        }
    }
}

fn rule(category: CanonicalCategory, keywords: &[&str]) -> KeywordRule {
    KeywordRule {
        category: category.display_name().to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
    }
}

/// FNV-1a; `std`'s hasher is not stable across releases.
fn stable_hash(value: &str) -> u64 {
    value.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_every_canonical_category() {
        let config = CategoryConfig::default();
        for category in CanonicalCategory::ALL {
            assert!(
                config.palette.contains_key(category.display_name()),
                "missing color for {category}"
            );
        }
    }

    #[test]
    fn keyword_match_supplies_color_for_custom_names() {
        let config = CategoryConfig::default();
        assert_eq!(config.color_for("Weekend Netflix"), config.color_for("Entertainment"));
    }

    #[test]
    fn unknown_names_get_a_stable_fallback_color() {
        let config = CategoryConfig::default();
        let first = config.color_for("Llama Grooming");
        assert_eq!(first, config.color_for("Llama Grooming"));
        assert!(config.fallback_colors.contains(&first));
    }

    #[test]
    fn keywords_match_whole_words_and_plurals_only() {
        assert!(contains_keyword("city bus pass", "bus"));
        assert!(contains_keyword("school buses", "bus"));
        assert!(contains_keyword("gifts for mom", "gift"));
        assert!(contains_keyword("monthly water bill", "water bill"));
        assert!(!contains_keyword("business", "bus"));
        assert!(!contains_keyword("parenting", "rent"));
        assert!(!contains_keyword("pirate museum", "ira"));
        assert!(!contains_keyword("anything", ""));
    }

    #[test]
    fn normalized_rules_match_mixed_case_keywords() {
        let rule = KeywordRule {
            category: "Pets".into(),
            keywords: vec!["  VET ".into(), " ".into()],
        }
        .normalized();
        assert_eq!(rule.keywords, vec!["vet".to_string()]);
        assert!(rule.matches("vet visit"));
    }

    #[test]
    fn empty_fallback_palette_uses_hub_color() {
        let config = CategoryConfig {
            fallback_colors: Vec::new(),
            ..CategoryConfig::default()
        };
        assert_eq!(config.color_for("Zzz"), config.hub_color);
    }
}
