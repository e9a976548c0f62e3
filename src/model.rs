use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FormError;

/// Field of the recipe form, named the way the presentation layer names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Description,
    Servings,
    Difficulty,
    Category,
    Cuisine,
    ImageUrl,
    Ingredients,
    Instructions,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Field; 9] = [
        Field::Title,
        Field::Description,
        Field::Servings,
        Field::Difficulty,
        Field::Category,
        Field::Cuisine,
        Field::ImageUrl,
        Field::Ingredients,
        Field::Instructions,
    ];

    /// Scalar fields that must be filled in
    pub const REQUIRED: [Field; 6] = [
        Field::Title,
        Field::Description,
        Field::Servings,
        Field::Difficulty,
        Field::Category,
        Field::Cuisine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Servings => "servings",
            Field::Difficulty => "difficulty",
            Field::Category => "category",
            Field::Cuisine => "cuisine",
            Field::ImageUrl => "imageUrl",
            Field::Ingredients => "ingredients",
            Field::Instructions => "instructions",
        }
    }

    /// Whether the field holds a single string rather than a list of rows
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Field::Ingredients | Field::Instructions)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Column of an ingredient row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngredientField {
    Name,
    Quantity,
    Unit,
}

impl IngredientField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientField::Name => "name",
            IngredientField::Quantity => "quantity",
            IngredientField::Unit => "unit",
        }
    }
}

impl FromStr for IngredientField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(IngredientField::Name),
            "quantity" => Ok(IngredientField::Quantity),
            "unit" => Ok(IngredientField::Unit),
            other => Err(FormError::UnknownField(format!("ingredients.{}", other))),
        }
    }
}

/// A fixed list of options offered by a dropdown
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Label shown to the user and stored in the draft
    fn label(&self) -> &'static str;

    /// Look up an option by its label, ignoring surrounding whitespace
    fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.iter().copied().find(|c| c.label() == value)
    }

    /// Like [`Choice::from_label`] but ignoring ASCII case
    fn from_label_ignore_case(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Choice for Difficulty {
    const ALL: &'static [Self] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Appetizer,
    MainCourse,
    Dessert,
    SideDish,
    Beverage,
}

impl Choice for Category {
    const ALL: &'static [Self] = &[
        Category::Appetizer,
        Category::MainCourse,
        Category::Dessert,
        Category::SideDish,
        Category::Beverage,
    ];

    fn label(&self) -> &'static str {
        match self {
            Category::Appetizer => "Appetizer",
            Category::MainCourse => "Main Course",
            Category::Dessert => "Dessert",
            Category::SideDish => "Side Dish",
            Category::Beverage => "Beverage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cuisine {
    American,
    Italian,
    Mexican,
    Asian,
    Mediterranean,
    Other,
}

impl Choice for Cuisine {
    const ALL: &'static [Self] = &[
        Cuisine::American,
        Cuisine::Italian,
        Cuisine::Mexican,
        Cuisine::Asian,
        Cuisine::Mediterranean,
        Cuisine::Other,
    ];

    fn label(&self) -> &'static str {
        match self {
            Cuisine::American => "American",
            Cuisine::Italian => "Italian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Asian => "Asian",
            Cuisine::Mediterranean => "Mediterranean",
            Cuisine::Other => "Other",
        }
    }
}

/// Common measurement units offered by the unit dropdown.
///
/// Any non-empty unit is accepted by validation; this list is only the typed
/// view of the ones a presentation layer usually offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Cups,
    Tablespoons,
    Teaspoons,
    Grams,
    Ounces,
    Pounds,
    Pieces,
}

impl Choice for Unit {
    const ALL: &'static [Self] = &[
        Unit::Cups,
        Unit::Tablespoons,
        Unit::Teaspoons,
        Unit::Grams,
        Unit::Ounces,
        Unit::Pounds,
        Unit::Pieces,
    ];

    fn label(&self) -> &'static str {
        match self {
            Unit::Cups => "cups",
            Unit::Tablespoons => "tablespoons",
            Unit::Teaspoons => "teaspoons",
            Unit::Grams => "grams",
            Unit::Ounces => "ounces",
            Unit::Pounds => "pounds",
            Unit::Pieces => "pieces",
        }
    }
}

/// One ingredient row as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub quantity: String,
    #[serde(deserialize_with = "lenient_string")]
    pub unit: String,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }

    pub fn get(&self, field: IngredientField) -> &str {
        match field {
            IngredientField::Name => &self.name,
            IngredientField::Quantity => &self.quantity,
            IngredientField::Unit => &self.unit,
        }
    }

    pub fn set(&mut self, field: IngredientField, value: String) {
        match field {
            IngredientField::Name => self.name = value,
            IngredientField::Quantity => self.quantity = value,
            IngredientField::Unit => self.unit = value,
        }
    }
}

/// The editable recipe record.
///
/// Every value is kept exactly as entered; parsing happens during validation.
/// The default draft has empty strings and a single blank row in each list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub servings: String,
    #[serde(deserialize_with = "lenient_string")]
    pub difficulty: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cuisine: String,
    #[serde(deserialize_with = "lenient_string")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient_ingredients")]
    pub ingredients: Vec<Ingredient>,
    #[serde(deserialize_with = "lenient_strings")]
    pub instructions: Vec<String>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            servings: String::new(),
            difficulty: String::new(),
            category: String::new(),
            cuisine: String::new(),
            image_url: String::new(),
            ingredients: vec![Ingredient::default()],
            instructions: vec![String::new()],
        }
    }
}

impl RecipeDraft {
    /// Value of a scalar field, `None` for the two collections
    pub fn scalar(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(&self.title),
            Field::Description => Some(&self.description),
            Field::Servings => Some(&self.servings),
            Field::Difficulty => Some(&self.difficulty),
            Field::Category => Some(&self.category),
            Field::Cuisine => Some(&self.cuisine),
            Field::ImageUrl => Some(&self.image_url),
            Field::Ingredients | Field::Instructions => None,
        }
    }

    /// Mutable slot of a scalar field, `None` for the two collections
    pub fn scalar_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::Servings => Some(&mut self.servings),
            Field::Difficulty => Some(&mut self.difficulty),
            Field::Category => Some(&mut self.category),
            Field::Cuisine => Some(&mut self.cuisine),
            Field::ImageUrl => Some(&mut self.image_url),
            Field::Ingredients | Field::Instructions => None,
        }
    }

    /// Pad empty collections with a blank row so the draft can be edited
    pub(crate) fn ensure_rows(&mut self) {
        if self.ingredients.is_empty() {
            self.ingredients.push(Ingredient::default());
        }
        if self.instructions.is_empty() {
            self.instructions.push(String::new());
        }
    }
}

/// Ingredient with parsed quantity and trimmed unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl RecipeIngredient {
    /// The unit as one of the common [`Unit`]s, if it is one
    pub fn known_unit(&self) -> Option<Unit> {
        Unit::from_label_ignore_case(&self.unit)
    }
}

/// Typed view of a draft that passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub servings: f64,
    pub difficulty: Difficulty,
    pub category: Category,
    pub cuisine: Cuisine,
    pub image_url: Option<String>,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
}

impl TryFrom<&RecipeDraft> for Recipe {
    type Error = FormError;

    fn try_from(draft: &RecipeDraft) -> Result<Self, Self::Error> {
        crate::validation::RecipeValidator::default().parse_recipe(draft)
    }
}

/// Accept any JSON scalar where a string is expected.
///
/// Numbers and booleans keep their textual form; `null`, arrays and objects
/// collapse to an empty string so they fail validation as missing values.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(value))
}

/// Accept anything where the ingredient list is expected.
///
/// `null` and non-array values become an empty list; entries that are not
/// objects become blank rows.
fn lenient_ingredients<'de, D>(deserializer: D) -> Result<Vec<Ingredient>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Object(_) => {
                    serde_json::from_value(item).unwrap_or_default()
                }
                _ => Ingredient::default(),
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items.into_iter().map(value_to_string).collect(),
        serde_json::Value::Null => Vec::new(),
        other => vec![value_to_string(other)],
    })
}

fn value_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            String::new()
        }
    }
}
