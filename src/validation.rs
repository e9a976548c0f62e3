//! Pure validation of recipe drafts.
//!
//! Nothing in here keeps state: the same draft always produces the same
//! [`ErrorMap`]. Within a single value the checks run in a fixed order
//! (required, lower bound, upper bound) and the first failure is reported.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ValidationLimits;
use crate::error::FormError;
use crate::model::{
    Category, Choice, Cuisine, Difficulty, Field, Ingredient, Recipe, RecipeDraft,
    RecipeIngredient,
};

const REQUIRED_OPTION: &str = "This field is required.";
const INVALID_OPTION: &str = "Please select a valid option.";
const IMAGE_URL_SCHEME: &str = "Image URL must start with http:// or https://";
const NO_INGREDIENTS: &str = "At least one ingredient is required.";
const NO_INSTRUCTIONS: &str = "At least one instruction step is required.";

/// Result of reading a numeric input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberInput {
    /// Nothing but whitespace
    Empty,
    /// Text that does not read as a number
    NotANumber,
    Value(f64),
}

/// Parse a user-entered number the way a browser number input reads it.
///
/// Accepts decimal and exponent notation, unsigned `0x`/`0o`/`0b` integer
/// literals and a signed `Infinity`, all with surrounding whitespace.
/// Infinity parses to a value so it fails the range check, not the number check.
pub fn parse_number(raw: &str) -> NumberInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NumberInput::Empty;
    }
    if let Some(value) = parse_radix_literal(trimmed) {
        return NumberInput::Value(value);
    }

    let unsigned = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return NumberInput::Value(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    // rules out `inf` and `nan`, which only Rust's float syntax accepts
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return NumberInput::NotANumber;
    }

    match trimmed.parse::<f64>() {
        Ok(value) => NumberInput::Value(value),
        Err(_) => NumberInput::NotANumber,
    }
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let (digits, radix) = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|(prefix, radix)| s.strip_prefix(prefix).map(|digits| (digits, *radix)))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}

/// Errors for one ingredient row; a column is `None` when it is valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngredientErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl IngredientErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.unit.is_none()
    }
}

/// Errors attached to a repeatable list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CollectionErrors<T> {
    /// The list has no rows at all
    Missing(String),
    /// One entry per row, aligned by index
    Entries(Vec<T>),
}

/// Validation messages keyed by field.
///
/// Only failing fields are present. Collections appear either as a single
/// message (no rows) or as a row-aligned list once any row fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorMap {
    #[serde(flatten)]
    fields: BTreeMap<Field, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ingredients: Option<CollectionErrors<IngredientErrors>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<CollectionErrors<Option<String>>>,
}

impl ErrorMap {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.ingredients.is_none() && self.instructions.is_none()
    }

    /// Fields that currently carry an error, in form order
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self.fields.keys().copied().collect();
        if self.ingredients.is_some() {
            fields.push(Field::Ingredients);
        }
        if self.instructions.is_some() {
            fields.push(Field::Instructions);
        }
        fields
    }

    pub fn contains(&self, field: Field) -> bool {
        match field {
            Field::Ingredients => self.ingredients.is_some(),
            Field::Instructions => self.instructions.is_some(),
            _ => self.fields.contains_key(&field),
        }
    }

    /// Message for a scalar field, or the whole-list message of an empty collection
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Ingredients => match &self.ingredients {
                Some(CollectionErrors::Missing(message)) => Some(message),
                _ => None,
            },
            Field::Instructions => match &self.instructions {
                Some(CollectionErrors::Missing(message)) => Some(message),
                _ => None,
            },
            _ => self.fields.get(&field).map(String::as_str),
        }
    }

    /// Store or clear the message of a scalar field
    pub fn set(&mut self, field: Field, message: Option<String>) {
        match message {
            Some(message) if !message.is_empty() => {
                self.fields.insert(field, message);
            }
            _ => {
                self.fields.remove(&field);
            }
        }
    }

    pub fn ingredients(&self) -> Option<&CollectionErrors<IngredientErrors>> {
        self.ingredients.as_ref()
    }

    pub fn instructions(&self) -> Option<&CollectionErrors<Option<String>>> {
        self.instructions.as_ref()
    }

    pub fn set_ingredients(&mut self, errors: Option<CollectionErrors<IngredientErrors>>) {
        self.ingredients = errors;
    }

    pub fn set_instructions(&mut self, errors: Option<CollectionErrors<Option<String>>>) {
        self.instructions = errors;
    }

    /// Errors of one ingredient row, `None` if the row is valid
    pub fn ingredient(&self, index: usize) -> Option<&IngredientErrors> {
        match &self.ingredients {
            Some(CollectionErrors::Entries(rows)) => rows.get(index).filter(|e| !e.is_empty()),
            _ => None,
        }
    }

    /// Error of one instruction step, `None` if the step is valid
    pub fn instruction(&self, index: usize) -> Option<&str> {
        match &self.instructions {
            Some(CollectionErrors::Entries(rows)) => rows.get(index)?.as_deref(),
            _ => None,
        }
    }

    /// Total number of messages, counting each failing row column separately
    pub fn error_count(&self) -> usize {
        let ingredient_count = match &self.ingredients {
            Some(CollectionErrors::Missing(_)) => 1,
            Some(CollectionErrors::Entries(rows)) => rows
                .iter()
                .map(|row| {
                    [&row.name, &row.quantity, &row.unit]
                        .iter()
                        .filter(|m| m.is_some())
                        .count()
                })
                .sum(),
            None => 0,
        };
        let instruction_count = match &self.instructions {
            Some(CollectionErrors::Missing(_)) => 1,
            Some(CollectionErrors::Entries(rows)) => rows.iter().filter(|m| m.is_some()).count(),
            None => 0,
        };
        self.fields.len() + ingredient_count + instruction_count
    }
}

/// Validator for recipe drafts with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct RecipeValidator {
    limits: ValidationLimits,
}

impl RecipeValidator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate one field in isolation.
    ///
    /// Collection fields have no single-value rule and always pass here;
    /// they are checked by [`RecipeValidator::validate_recipe_form`].
    pub fn validate_field(&self, field: Field, raw: &str) -> Option<String> {
        let limits = &self.limits;
        match field {
            Field::Title => check_text(
                raw,
                "Title",
                "Title is required.",
                limits.title_min_len,
                limits.title_max_len,
            ),
            Field::Description => check_text(
                raw,
                "Description",
                "Description is required.",
                limits.description_min_len,
                limits.description_max_len,
            ),
            Field::Servings => check_number(
                raw,
                "Servings",
                "Servings is required.",
                limits.servings_min,
                limits.servings_max,
            ),
            Field::Difficulty => check_choice::<Difficulty>(raw, REQUIRED_OPTION, INVALID_OPTION),
            Field::Category => check_choice::<Category>(raw, REQUIRED_OPTION, INVALID_OPTION),
            Field::Cuisine => check_choice::<Cuisine>(raw, REQUIRED_OPTION, INVALID_OPTION),
            Field::ImageUrl => check_image_url(raw),
            Field::Ingredients | Field::Instructions => None,
        }
    }

    pub fn validate_ingredient(&self, ingredient: &Ingredient) -> IngredientErrors {
        let limits = &self.limits;
        IngredientErrors {
            name: check_text(
                &ingredient.name,
                "Name",
                "Ingredient name is required.",
                limits.ingredient_name_min_len,
                limits.ingredient_name_max_len,
            ),
            quantity: check_number(
                &ingredient.quantity,
                "Quantity",
                "Quantity is required.",
                limits.quantity_min,
                limits.quantity_max,
            ),
            unit: check_required(&ingredient.unit, "Unit is required."),
        }
    }

    pub fn validate_instruction(&self, step: &str) -> Option<String> {
        let len = step.trim().chars().count();
        if len == 0 {
            Some("Step cannot be empty.".to_string())
        } else if len < self.limits.instruction_min_len {
            Some(format!(
                "Step must be at least {} characters.",
                self.limits.instruction_min_len
            ))
        } else {
            None
        }
    }

    /// Row-aligned ingredient errors, `None` when every row passes
    pub fn validate_ingredients(
        &self,
        ingredients: &[Ingredient],
    ) -> Option<CollectionErrors<IngredientErrors>> {
        if ingredients.is_empty() {
            return Some(CollectionErrors::Missing(NO_INGREDIENTS.to_string()));
        }
        let rows: Vec<IngredientErrors> = ingredients
            .iter()
            .map(|ingredient| self.validate_ingredient(ingredient))
            .collect();
        if rows.iter().all(IngredientErrors::is_empty) {
            None
        } else {
            Some(CollectionErrors::Entries(rows))
        }
    }

    /// Row-aligned instruction errors, `None` when every step passes
    pub fn validate_instructions(
        &self,
        instructions: &[String],
    ) -> Option<CollectionErrors<Option<String>>> {
        if instructions.is_empty() {
            return Some(CollectionErrors::Missing(NO_INSTRUCTIONS.to_string()));
        }
        let rows: Vec<Option<String>> = instructions
            .iter()
            .map(|step| self.validate_instruction(step))
            .collect();
        if rows.iter().all(Option::is_none) {
            None
        } else {
            Some(CollectionErrors::Entries(rows))
        }
    }

    /// Validate the whole draft
    pub fn validate_recipe_form(&self, draft: &RecipeDraft) -> ErrorMap {
        let mut errors = ErrorMap::default();
        for field in Field::REQUIRED.into_iter().chain([Field::ImageUrl]) {
            let raw = draft.scalar(field).unwrap_or_default();
            errors.set(field, self.validate_field(field, raw));
        }
        errors.set_ingredients(self.validate_ingredients(&draft.ingredients));
        errors.set_instructions(self.validate_instructions(&draft.instructions));
        errors
    }

    /// Validate a draft and convert it into a typed [`Recipe`]
    pub fn parse_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, FormError> {
        let errors = self.validate_recipe_form(draft);
        if !errors.is_empty() {
            let fields: Vec<&str> = errors.fields().iter().map(Field::as_str).collect();
            return Err(FormError::InvalidDraft(format!(
                "{} problem(s) in {}",
                errors.error_count(),
                fields.join(", ")
            )));
        }

        let ingredients = draft
            .ingredients
            .iter()
            .map(|ingredient| {
                Ok(RecipeIngredient {
                    name: ingredient.name.trim().to_string(),
                    quantity: parsed_number(&ingredient.quantity, Field::Ingredients)?,
                    unit: ingredient.unit.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        let image_url = draft.image_url.trim();

        Ok(Recipe {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            servings: parsed_number(&draft.servings, Field::Servings)?,
            difficulty: parsed_choice(&draft.difficulty, Field::Difficulty)?,
            category: parsed_choice(&draft.category, Field::Category)?,
            cuisine: parsed_choice(&draft.cuisine, Field::Cuisine)?,
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
            ingredients,
            instructions: draft
                .instructions
                .iter()
                .map(|step| step.trim().to_string())
                .collect(),
        })
    }
}

/// Validate one field with the default thresholds
pub fn validate_field(field: Field, raw: &str) -> Option<String> {
    RecipeValidator::default().validate_field(field, raw)
}

/// Validate a whole draft with the default thresholds
pub fn validate_recipe_form(draft: &RecipeDraft) -> ErrorMap {
    RecipeValidator::default().validate_recipe_form(draft)
}

fn check_text(raw: &str, label: &str, required: &str, min: usize, max: usize) -> Option<String> {
    let len = raw.trim().chars().count();
    if len == 0 {
        return Some(required.to_string());
    }
    if len < min {
        return Some(format!("{} must be at least {} characters.", label, min));
    }
    if len > max {
        return Some(format!("{} must be {} characters or less.", label, max));
    }
    None
}

fn check_number(raw: &str, label: &str, required: &str, min: f64, max: f64) -> Option<String> {
    match parse_number(raw) {
        NumberInput::Empty => Some(required.to_string()),
        NumberInput::NotANumber => Some(format!("{} must be a number.", label)),
        NumberInput::Value(value) if value < min || value > max => Some(format!(
            "{} must be between {} and {}.",
            label, min, max
        )),
        NumberInput::Value(_) => None,
    }
}

fn check_choice<C: Choice>(raw: &str, required: &str, invalid: &str) -> Option<String> {
    if raw.trim().is_empty() {
        Some(required.to_string())
    } else if C::from_label(raw).is_none() {
        Some(invalid.to_string())
    } else {
        None
    }
}

fn check_required(raw: &str, required: &str) -> Option<String> {
    if raw.trim().is_empty() {
        Some(required.to_string())
    } else {
        None
    }
}

fn check_image_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        None
    } else {
        Some(IMAGE_URL_SCHEME.to_string())
    }
}

fn parsed_number(raw: &str, field: Field) -> Result<f64, FormError> {
    match parse_number(raw) {
        NumberInput::Value(value) => Ok(value),
        _ => Err(FormError::InvalidDraft(format!("{} is not a number", field))),
    }
}

fn parsed_choice<C: Choice>(raw: &str, field: Field) -> Result<C, FormError> {
    C::from_label(raw)
        .ok_or_else(|| FormError::InvalidDraft(format!("{} has no valid option", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Unit;

    fn soup() -> RecipeDraft {
        RecipeDraft {
            title: "Soup".to_string(),
            description: "A warm broth soup".to_string(),
            servings: "4".to_string(),
            difficulty: "Easy".to_string(),
            category: "Main Course".to_string(),
            cuisine: "American".to_string(),
            image_url: String::new(),
            ingredients: vec![Ingredient::new("Salt", "1", "teaspoons")],
            instructions: vec!["Boil water.".to_string()],
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(""), NumberInput::Empty);
        assert_eq!(parse_number("   "), NumberInput::Empty);
        assert_eq!(parse_number("abc"), NumberInput::NotANumber);
        assert_eq!(parse_number("NaN"), NumberInput::NotANumber);
        assert_eq!(parse_number("inf"), NumberInput::NotANumber);
        assert_eq!(parse_number("infinity"), NumberInput::NotANumber);
        assert_eq!(parse_number(" 4 "), NumberInput::Value(4.0));
        assert_eq!(parse_number("2.5"), NumberInput::Value(2.5));
        assert_eq!(parse_number("1e2"), NumberInput::Value(100.0));
        assert_eq!(parse_number("-3"), NumberInput::Value(-3.0));
    }

    #[test]
    fn test_parse_number_radix_and_infinity() {
        assert_eq!(parse_number("0x10"), NumberInput::Value(16.0));
        assert_eq!(parse_number(" 0b101 "), NumberInput::Value(5.0));
        assert_eq!(parse_number("0o17"), NumberInput::Value(15.0));
        assert_eq!(parse_number("0x"), NumberInput::NotANumber);
        assert_eq!(parse_number("0xZZ"), NumberInput::NotANumber);
        assert_eq!(parse_number("-0x10"), NumberInput::NotANumber);
        assert_eq!(parse_number("Infinity"), NumberInput::Value(f64::INFINITY));
        assert_eq!(parse_number("-Infinity"), NumberInput::Value(f64::NEG_INFINITY));

        assert_eq!(validate_field(Field::Servings, "0x10"), None);
        assert_eq!(
            validate_field(Field::Servings, "Infinity").as_deref(),
            Some("Servings must be between 1 and 20.")
        );
    }

    #[test]
    fn test_title_rules() {
        assert_eq!(
            validate_field(Field::Title, "").as_deref(),
            Some("Title is required.")
        );
        assert_eq!(
            validate_field(Field::Title, "   ").as_deref(),
            Some("Title is required.")
        );
        assert_eq!(
            validate_field(Field::Title, "Hi").as_deref(),
            Some("Title must be at least 3 characters.")
        );
        assert_eq!(
            validate_field(Field::Title, &"a".repeat(51)).as_deref(),
            Some("Title must be 50 characters or less.")
        );
        assert_eq!(validate_field(Field::Title, "  Pie  "), None);
        assert_eq!(validate_field(Field::Title, &"a".repeat(50)), None);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // three characters, six bytes
        assert_eq!(validate_field(Field::Title, "äöü"), None);
    }

    #[test]
    fn test_description_rules() {
        assert_eq!(
            validate_field(Field::Description, "").as_deref(),
            Some("Description is required.")
        );
        assert_eq!(
            validate_field(Field::Description, "Too short").as_deref(),
            Some("Description must be at least 10 characters.")
        );
        assert_eq!(
            validate_field(Field::Description, &"x".repeat(501)).as_deref(),
            Some("Description must be 500 characters or less.")
        );
        assert_eq!(validate_field(Field::Description, "Ten chars!"), None);
    }

    #[test]
    fn test_servings_rules() {
        assert_eq!(
            validate_field(Field::Servings, "").as_deref(),
            Some("Servings is required.")
        );
        assert_eq!(
            validate_field(Field::Servings, "four").as_deref(),
            Some("Servings must be a number.")
        );
        assert_eq!(
            validate_field(Field::Servings, "0").as_deref(),
            Some("Servings must be between 1 and 20.")
        );
        assert_eq!(
            validate_field(Field::Servings, "21").as_deref(),
            Some("Servings must be between 1 and 20.")
        );
        assert_eq!(validate_field(Field::Servings, "1"), None);
        assert_eq!(validate_field(Field::Servings, "20"), None);
        assert_eq!(validate_field(Field::Servings, "2.5"), None);
    }

    #[test]
    fn test_dropdown_rules() {
        for field in [Field::Difficulty, Field::Category, Field::Cuisine] {
            assert_eq!(
                validate_field(field, "").as_deref(),
                Some("This field is required.")
            );
            assert_eq!(
                validate_field(field, "Spicy").as_deref(),
                Some("Please select a valid option.")
            );
        }
        assert_eq!(
            validate_field(Field::Difficulty, "easy").as_deref(),
            Some("Please select a valid option.")
        );
        assert_eq!(validate_field(Field::Difficulty, "Hard"), None);
        assert_eq!(validate_field(Field::Category, "Side Dish"), None);
        assert_eq!(validate_field(Field::Cuisine, "Mediterranean"), None);
    }

    #[test]
    fn test_image_url_rules() {
        assert_eq!(validate_field(Field::ImageUrl, ""), None);
        assert_eq!(validate_field(Field::ImageUrl, "   "), None);
        assert_eq!(validate_field(Field::ImageUrl, "https://x.com/a.jpg"), None);
        assert_eq!(validate_field(Field::ImageUrl, "http://x.com/a.jpg"), None);
        assert_eq!(
            validate_field(Field::ImageUrl, "ftp://x.com/a.jpg").as_deref(),
            Some("Image URL must start with http:// or https://")
        );
    }

    #[test]
    fn test_collection_fields_have_no_scalar_rule() {
        assert_eq!(validate_field(Field::Ingredients, ""), None);
        assert_eq!(validate_field(Field::Instructions, ""), None);
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        let errors = validate_recipe_form(&soup());
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        assert_eq!(errors.error_count(), 0);
    }

    #[test]
    fn test_default_draft_reports_every_required_field() {
        let errors = validate_recipe_form(&RecipeDraft::default());
        for field in Field::REQUIRED {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        assert!(!errors.contains(Field::ImageUrl));
        assert!(errors.contains(Field::Ingredients));
        assert!(errors.contains(Field::Instructions));
        assert_eq!(
            errors.instruction(0),
            Some("Step cannot be empty.")
        );
        let row = errors.ingredient(0).unwrap();
        assert_eq!(row.name.as_deref(), Some("Ingredient name is required."));
        assert_eq!(row.quantity.as_deref(), Some("Quantity is required."));
        assert_eq!(row.unit.as_deref(), Some("Unit is required."));
    }

    #[test]
    fn test_ingredient_name_priority() {
        let validator = RecipeValidator::default();
        let short = validator.validate_ingredient(&Ingredient::new("S", "1", "cups"));
        assert_eq!(
            short.name.as_deref(),
            Some("Name must be at least 2 characters.")
        );
        let long = validator.validate_ingredient(&Ingredient::new("n".repeat(51), "1", "cups"));
        assert_eq!(
            long.name.as_deref(),
            Some("Name must be 50 characters or less.")
        );
    }

    #[test]
    fn test_ingredient_quantity_rules() {
        let validator = RecipeValidator::default();
        let quantity = |q: &str| {
            validator
                .validate_ingredient(&Ingredient::new("Salt", q, "grams"))
                .quantity
        };
        assert_eq!(quantity("").as_deref(), Some("Quantity is required."));
        assert_eq!(quantity("  ").as_deref(), Some("Quantity is required."));
        assert_eq!(quantity("a pinch").as_deref(), Some("Quantity must be a number."));
        assert_eq!(
            quantity("0").as_deref(),
            Some("Quantity must be between 0.1 and 1000.")
        );
        assert_eq!(
            quantity("1000.5").as_deref(),
            Some("Quantity must be between 0.1 and 1000.")
        );
        assert_eq!(quantity("0.1"), None);
        assert_eq!(quantity("1000"), None);
    }

    #[test]
    fn test_ingredient_unit_rules() {
        let validator = RecipeValidator::default();
        let unit = |u: &str| {
            validator
                .validate_ingredient(&Ingredient::new("Salt", "1", u))
                .unit
        };
        assert_eq!(unit("").as_deref(), Some("Unit is required."));
        assert_eq!(unit("   ").as_deref(), Some("Unit is required."));
        for free_form in ["pieces", "ml", "liters", "tsp", "pinch", "Cups"] {
            assert_eq!(unit(free_form), None, "unit {:?} should be accepted", free_form);
        }
    }

    #[test]
    fn test_only_failing_rows_carry_errors() {
        let mut draft = soup();
        draft.ingredients.push(Ingredient::new("Pepper", "0", "teaspoons"));

        let errors = validate_recipe_form(&draft);
        assert!(errors.ingredient(0).is_none());
        let second = errors.ingredient(1).unwrap();
        assert!(second
            .quantity
            .as_deref()
            .unwrap()
            .contains("between 0.1 and 1000"));
        assert!(second.name.is_none());
        assert_eq!(errors.error_count(), 1);
    }

    #[test]
    fn test_instruction_rules() {
        let validator = RecipeValidator::default();
        assert_eq!(
            validator.validate_instruction("  ").as_deref(),
            Some("Step cannot be empty.")
        );
        assert_eq!(
            validator.validate_instruction("Go").as_deref(),
            Some("Step must be at least 3 characters.")
        );
        assert_eq!(validator.validate_instruction("Stir"), None);
    }

    #[test]
    fn test_empty_collections() {
        let mut draft = soup();
        draft.ingredients.clear();
        draft.instructions.clear();

        let errors = validate_recipe_form(&draft);
        assert_eq!(
            errors.get(Field::Ingredients),
            Some("At least one ingredient is required.")
        );
        assert_eq!(
            errors.get(Field::Instructions),
            Some("At least one instruction step is required.")
        );
    }

    #[test]
    fn test_error_map_set_clears_empty_messages() {
        let mut errors = ErrorMap::default();
        errors.set(Field::Title, Some("Title is required.".to_string()));
        assert!(errors.contains(Field::Title));
        errors.set(Field::Title, Some(String::new()));
        assert!(!errors.contains(Field::Title));
        errors.set(Field::Title, Some("Title is required.".to_string()));
        errors.set(Field::Title, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_error_map_serializes_by_field_name() {
        let mut draft = soup();
        draft.image_url = "ftp://x.com/a.jpg".to_string();
        draft.instructions.push("Go".to_string());

        let json = serde_json::to_value(validate_recipe_form(&draft)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "imageUrl": "Image URL must start with http:// or https://",
                "instructions": [null, "Step must be at least 3 characters."]
            })
        );
    }

    #[test]
    fn test_custom_limits() {
        let validator = RecipeValidator::new(ValidationLimits {
            servings_max: 8.0,
            ..ValidationLimits::default()
        });
        assert_eq!(
            validator.validate_field(Field::Servings, "10").as_deref(),
            Some("Servings must be between 1 and 8.")
        );
    }

    #[test]
    fn test_parse_recipe() {
        let mut draft = soup();
        draft.title = "  Soup ".to_string();
        draft.image_url = " https://example.com/soup.jpg ".to_string();

        let recipe = Recipe::try_from(&draft).unwrap();
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.servings, 4.0);
        assert_eq!(recipe.category, Category::MainCourse);
        assert_eq!(recipe.ingredients[0].unit, "teaspoons");
        assert_eq!(recipe.ingredients[0].known_unit(), Some(Unit::Teaspoons));
        assert_eq!(
            recipe.image_url.as_deref(),
            Some("https://example.com/soup.jpg")
        );
    }

    #[test]
    fn test_parse_recipe_refuses_invalid_draft() {
        let result = Recipe::try_from(&RecipeDraft::default());
        match result {
            Err(FormError::InvalidDraft(message)) => assert!(message.contains("title")),
            other => panic!("expected InvalidDraft, got {:?}", other),
        }
    }
}
