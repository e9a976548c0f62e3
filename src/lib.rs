//! Recipe submission form core: draft state, live and whole-form validation,
//! repeatable ingredient and instruction rows, and the accepted-record summary.
//!
//! ```
//! use recipe_form::{Field, IngredientField, RecipeForm};
//!
//! let mut form = RecipeForm::new();
//! form.edit_field(Field::Title, "Hi").unwrap();
//! assert_eq!(
//!     form.errors().get(Field::Title),
//!     Some("Title must be at least 3 characters.")
//! );
//!
//! form.edit_ingredient(0, IngredientField::Name, "Salt").unwrap();
//! assert!(!form.submit().is_accepted());
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod summary;
pub mod uniffi_bindings;
pub mod validation;

pub use config::{FormConfig, ValidationLimits};
pub use error::FormError;
pub use form::{RecipeForm, SubmitOutcome};
pub use model::{
    Category, Choice, Cuisine, Difficulty, Field, Ingredient, IngredientField, Recipe,
    RecipeDraft, RecipeIngredient, Unit,
};
pub use summary::render_summary;
pub use validation::{
    parse_number, validate_field, validate_recipe_form, CollectionErrors, ErrorMap,
    IngredientErrors, NumberInput, RecipeValidator,
};

use log::debug;

/// Validate a JSON-encoded draft without keeping any form state
pub fn validate_json(json: &str) -> Result<ErrorMap, FormError> {
    let draft: RecipeDraft = serde_json::from_str(json)?;
    debug!("{:#?}", draft);
    Ok(validate_recipe_form(&draft))
}

/// Load a JSON-encoded draft into a fresh form and submit it
pub fn submit_json(json: &str, config: &FormConfig) -> Result<RecipeForm, FormError> {
    let draft: RecipeDraft = serde_json::from_str(json)?;
    let mut form = RecipeForm::with_config(config);
    form.load_draft(draft);
    form.submit();
    Ok(form)
}
