use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Top-level form configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FormConfig {
    /// Thresholds applied by the validator
    #[serde(default)]
    pub limits: ValidationLimits,
}

/// Bounds checked by the recipe validator.
///
/// Lengths are counted in characters after trimming; numeric bounds are inclusive.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ValidationLimits {
    pub title_min_len: usize,
    pub title_max_len: usize,
    pub description_min_len: usize,
    pub description_max_len: usize,
    pub servings_min: f64,
    pub servings_max: f64,
    pub ingredient_name_min_len: usize,
    pub ingredient_name_max_len: usize,
    pub quantity_min: f64,
    pub quantity_max: f64,
    pub instruction_min_len: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            title_min_len: 3,
            title_max_len: 50,
            description_min_len: 10,
            description_max_len: 500,
            servings_min: 1.0,
            servings_max: 20.0,
            ingredient_name_min_len: 2,
            ingredient_name_max_len: 50,
            quantity_min: 0.1,
            quantity_max: 1000.0,
            instruction_min_len: 3,
        }
    }
}

impl FormConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FORM__ prefix
    /// 2. recipe_form.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FORM__LIMITS__TITLE_MAX_LEN
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Parse configuration from a TOML string, ignoring files and environment
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

/// Load configuration from file and environment variables
///
/// See [`FormConfig::load`] for the source priority.
pub fn load_config() -> Result<FormConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_form").required(false))
        // Use double underscore for nested: RECIPE_FORM__LIMITS__SERVINGS_MAX
        .add_source(
            Environment::with_prefix("RECIPE_FORM")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
