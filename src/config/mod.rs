pub mod categories;

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

pub use categories::{contains_keyword, AliasRule, CategoryConfig, KeywordRule};

use crate::currency::LocaleConfig;
use crate::errors::{FlowError, Result};

const DEFAULT_DIR_NAME: &str = ".moneyflow";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

pub const DEFAULT_MAX_CATEGORIES: usize = 5;
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Coarse device class used to pick layout defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    #[default]
    Desktop,
    Narrow,
}

/// Knobs for node positioning and ribbon geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Bezier control-point interpolation factor, strictly between 0 and 1.
    pub curvature: f64,
    /// Minimum hub height as a fraction of the available height; 0 disables.
    pub min_hub_fraction: f64,
    pub node_width: f64,
    pub node_padding: f64,
}

impl LayoutOptions {
    pub fn for_viewport(viewport: ViewportClass) -> Self {
        match viewport {
            ViewportClass::Desktop => Self {
                curvature: 0.5,
                min_hub_fraction: 0.6,
                node_width: 15.0,
                node_padding: 10.0,
            },
            ViewportClass::Narrow => Self {
                curvature: 0.2,
                min_hub_fraction: 0.0,
                node_width: 10.0,
                node_padding: 6.0,
            },
        }
    }

    /// Applies the viewport's curvature and hub fraction, keeping the
    /// configured node width and padding.
    pub fn with_viewport(self, viewport: ViewportClass) -> Self {
        let preset = Self::for_viewport(viewport);
        Self {
            curvature: preset.curvature,
            min_hub_fraction: preset.min_hub_fraction,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.curvature > 0.0 && self.curvature < 1.0) {
            return Err(FlowError::InvalidConfig(format!(
                "curvature must lie strictly between 0 and 1, got {}",
                self.curvature
            )));
        }
        if !(0.0..=1.0).contains(&self.min_hub_fraction) {
            return Err(FlowError::InvalidConfig(format!(
                "min_hub_fraction must lie within [0, 1], got {}",
                self.min_hub_fraction
            )));
        }
        if !(self.node_width.is_finite() && self.node_width >= 0.0)
            || !(self.node_padding.is_finite() && self.node_padding >= 0.0)
        {
            return Err(FlowError::InvalidConfig(
                "node width and padding must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::for_viewport(ViewportClass::Desktop)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowConfig {
    pub categories: CategoryConfig,
    pub max_income_categories: usize,
    pub max_expense_categories: usize,
    pub tolerance: f64,
    pub locale: LocaleConfig,
    pub layout: LayoutOptions,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            categories: CategoryConfig::default(),
            max_income_categories: DEFAULT_MAX_CATEGORIES,
            max_expense_categories: DEFAULT_MAX_CATEGORIES,
            tolerance: DEFAULT_TOLERANCE,
            locale: LocaleConfig::default(),
            layout: LayoutOptions::default(),
        }
    }
}

impl FlowConfig {
    pub fn for_viewport(viewport: ViewportClass) -> Self {
        Self {
            layout: LayoutOptions::for_viewport(viewport),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(FlowError::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        self.layout.validate()
    }
}

/// Loads and stores the JSON configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `$MONEYFLOW_HOME`, falling back to `~/.moneyflow`.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<FlowConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(FlowConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: FlowConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &FlowConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("MONEYFLOW_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_defaults_differ_in_curvature() {
        assert_eq!(LayoutOptions::for_viewport(ViewportClass::Desktop).curvature, 0.5);
        assert_eq!(LayoutOptions::for_viewport(ViewportClass::Narrow).curvature, 0.2);
    }

    #[test]
    fn viewport_override_keeps_configured_node_sizes() {
        let custom = LayoutOptions {
            node_width: 40.0,
            node_padding: 2.0,
            ..LayoutOptions::default()
        };
        let narrow = custom.with_viewport(ViewportClass::Narrow);
        assert_eq!(narrow.curvature, 0.2);
        assert_eq!(narrow.min_hub_fraction, 0.0);
        assert_eq!(narrow.node_width, 40.0);
        assert_eq!(narrow.node_padding, 2.0);
    }

    #[test]
    fn serializes_keys_in_camel_case() {
        let json = serde_json::to_string(&FlowConfig::default()).expect("serialize");
        for key in ["maxIncomeCategories", "minHubFraction", "hubColor", "decimalSeparator"] {
            assert!(json.contains(key), "missing {key}");
        }
        assert!(!json.contains("max_income_categories"));
    }

    #[test]
    fn rejects_degenerate_curvature() {
        for curvature in [0.0, 1.0, -0.3, f64::NAN] {
            let options = LayoutOptions {
                curvature,
                ..LayoutOptions::default()
            };
            assert!(options.validate().is_err(), "curvature {curvature} accepted");
        }
    }

    #[test]
    fn rejects_negative_tolerance() {
        let config = FlowConfig {
            tolerance: -1.0,
            ..FlowConfig::default()
        };
        let err = config.validate().expect_err("negative tolerance");
        assert!(err.to_string().contains("tolerance"));
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: FlowConfig =
            serde_json::from_str(r#"{"maxExpenseCategories": 3, "layout": {"curvature": 0.3, "nodePadding": 4}}"#)
                .expect("partial config");
        assert_eq!(config.max_expense_categories, 3);
        assert_eq!(config.max_income_categories, DEFAULT_MAX_CATEGORIES);
        assert_eq!(config.layout.curvature, 0.3);
        assert_eq!(config.layout.node_padding, 4.0);
        assert_eq!(config.layout.node_width, 15.0);
        assert!(!config.categories.keywords.is_empty());
    }

    #[test]
    fn negative_category_cap_is_a_parse_error() {
        let parsed = serde_json::from_str::<FlowConfig>(r#"{"maxIncomeCategories": -1}"#);
        assert!(parsed.is_err());
    }
}
