//! UniFFI bindings for recipe-form
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! The stateful form is exposed as an object guarded by a mutex, so the host
//! UI can call it from any thread while the form still sees a single writer.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::validation::CollectionErrors;
use crate::{ErrorMap, Field, FormError, Ingredient, IngredientField, RecipeDraft, RecipeForm};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible ingredient row
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

/// FFI-compatible recipe draft
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeDraft {
    pub title: String,
    pub description: String,
    pub servings: String,
    pub difficulty: String,
    pub category: String,
    pub cuisine: String,
    /// Empty string if no image
    pub image_url: String,
    pub ingredients: Vec<FfiIngredient>,
    pub instructions: Vec<String>,
}

impl From<RecipeDraft> for FfiRecipeDraft {
    fn from(draft: RecipeDraft) -> Self {
        FfiRecipeDraft {
            title: draft.title,
            description: draft.description,
            servings: draft.servings,
            difficulty: draft.difficulty,
            category: draft.category,
            cuisine: draft.cuisine,
            image_url: draft.image_url,
            ingredients: draft
                .ingredients
                .into_iter()
                .map(|i| FfiIngredient {
                    name: i.name,
                    quantity: i.quantity,
                    unit: i.unit,
                })
                .collect(),
            instructions: draft.instructions,
        }
    }
}

impl From<FfiRecipeDraft> for RecipeDraft {
    fn from(ffi: FfiRecipeDraft) -> Self {
        RecipeDraft {
            title: ffi.title,
            description: ffi.description,
            servings: ffi.servings,
            difficulty: ffi.difficulty,
            category: ffi.category,
            cuisine: ffi.cuisine,
            image_url: ffi.image_url,
            ingredients: ffi
                .ingredients
                .into_iter()
                .map(|i| Ingredient::new(i.name, i.quantity, i.unit))
                .collect(),
            instructions: ffi.instructions,
        }
    }
}

/// FFI-compatible field identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiField {
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

impl From<FfiField> for Field {
    fn from(field: FfiField) -> Self {
        match field {
            FfiField::Title => Field::Title,
            FfiField::Description => Field::Description,
            FfiField::Servings => Field::Servings,
            FfiField::Difficulty => Field::Difficulty,
            FfiField::Category => Field::Category,
            FfiField::Cuisine => Field::Cuisine,
            FfiField::ImageUrl => Field::ImageUrl,
            FfiField::Ingredients => Field::Ingredients,
            FfiField::Instructions => Field::Instructions,
        }
    }
}

impl From<Field> for FfiField {
    fn from(field: Field) -> Self {
        match field {
            Field::Title => FfiField::Title,
            Field::Description => FfiField::Description,
            Field::Servings => FfiField::Servings,
            Field::Difficulty => FfiField::Difficulty,
            Field::Category => FfiField::Category,
            Field::Cuisine => FfiField::Cuisine,
            Field::ImageUrl => FfiField::ImageUrl,
            Field::Ingredients => FfiField::Ingredients,
            Field::Instructions => FfiField::Instructions,
        }
    }
}

/// FFI-compatible ingredient column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiIngredientField {
    Name,
    Quantity,
    Unit,
}

impl From<FfiIngredientField> for IngredientField {
    fn from(field: FfiIngredientField) -> Self {
        match field {
            FfiIngredientField::Name => IngredientField::Name,
            FfiIngredientField::Quantity => IngredientField::Quantity,
            FfiIngredientField::Unit => IngredientField::Unit,
        }
    }
}

/// One validation message.
///
/// `index` is set for messages about a single row; `column` additionally names
/// the ingredient column ("name", "quantity" or "unit").
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFieldError {
    pub field: FfiField,
    pub index: Option<u32>,
    pub column: Option<String>,
    pub message: String,
}

/// FFI-compatible submit result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiSubmitOutcome {
    Accepted,
    Rejected { error_count: u32 },
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiFormError {
    /// Operation on a field or row that is not allowed
    InvalidOperation { message: String },
    /// Draft failed validation
    InvalidDraft { message: String },
    /// Form lock was poisoned by a panic on another thread
    LockError { message: String },
}

impl fmt::Display for FfiFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiFormError::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
            FfiFormError::InvalidDraft { message } => write!(f, "Invalid draft: {}", message),
            FfiFormError::LockError { message } => write!(f, "Lock error: {}", message),
        }
    }
}

impl std::error::Error for FfiFormError {}

impl From<FormError> for FfiFormError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::InvalidDraft(message) => FfiFormError::InvalidDraft { message },
            other => FfiFormError::InvalidOperation {
                message: other.to_string(),
            },
        }
    }
}

fn to_index(index: u32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

/// Saturating conversion for counts and indices handed to the host
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Flatten an error map into a list of messages in form order
pub fn flatten_errors(errors: &ErrorMap) -> Vec<FfiFieldError> {
    let mut out = Vec::new();
    for field in errors.fields() {
        match field {
            Field::Ingredients => match errors.ingredients() {
                Some(CollectionErrors::Missing(message)) => out.push(FfiFieldError {
                    field: field.into(),
                    index: None,
                    column: None,
                    message: message.clone(),
                }),
                Some(CollectionErrors::Entries(rows)) => {
                    for (i, row) in rows.iter().enumerate() {
                        let columns = [
                            (IngredientField::Name, &row.name),
                            (IngredientField::Quantity, &row.quantity),
                            (IngredientField::Unit, &row.unit),
                        ];
                        for (column, message) in columns {
                            if let Some(message) = message {
                                out.push(FfiFieldError {
                                    field: field.into(),
                                    index: Some(to_u32(i)),
                                    column: Some(column.as_str().to_string()),
                                    message: message.clone(),
                                });
                            }
                        }
                    }
                }
                None => {}
            },
            Field::Instructions => match errors.instructions() {
                Some(CollectionErrors::Missing(message)) => out.push(FfiFieldError {
                    field: field.into(),
                    index: None,
                    column: None,
                    message: message.clone(),
                }),
                Some(CollectionErrors::Entries(rows)) => {
                    for (i, message) in rows.iter().enumerate() {
                        if let Some(message) = message {
                            out.push(FfiFieldError {
                                field: field.into(),
                                index: Some(to_u32(i)),
                                column: None,
                                message: message.clone(),
                            });
                        }
                    }
                }
                None => {}
            },
            _ => {
                if let Some(message) = errors.get(field) {
                    out.push(FfiFieldError {
                        field: field.into(),
                        index: None,
                        column: None,
                        message: message.to_string(),
                    });
                }
            }
        }
    }
    out
}

/// Thread-safe recipe form handle
#[derive(Debug, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct FfiRecipeForm {
    inner: Mutex<RecipeForm>,
}

impl FfiRecipeForm {
    fn lock(&self) -> Result<MutexGuard<'_, RecipeForm>, FfiFormError> {
        self.inner.lock().map_err(|e| FfiFormError::LockError {
            message: e.to_string(),
        })
    }
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
impl FfiRecipeForm {
    /// Current draft
    pub fn draft(&self) -> Result<FfiRecipeDraft, FfiFormError> {
        Ok(self.lock()?.draft().clone().into())
    }

    /// All current validation messages
    pub fn errors(&self) -> Result<Vec<FfiFieldError>, FfiFormError> {
        Ok(flatten_errors(self.lock()?.errors()))
    }

    /// Message to display for a field, present only once it is touched
    pub fn visible_error(&self, field: FfiField) -> Result<Option<String>, FfiFormError> {
        Ok(self.lock()?.visible_error(field.into()).map(str::to_string))
    }

    pub fn is_touched(&self, field: FfiField) -> Result<bool, FfiFormError> {
        Ok(self.lock()?.is_touched(field.into()))
    }

    /// Last accepted submission
    pub fn submitted(&self) -> Result<Option<FfiRecipeDraft>, FfiFormError> {
        Ok(self.lock()?.submitted().cloned().map(Into::into))
    }

    pub fn edit_field(&self, field: FfiField, value: String) -> Result<(), FfiFormError> {
        Ok(self.lock()?.edit_field(field.into(), value)?)
    }

    pub fn mark_touched(&self, field: FfiField) -> Result<(), FfiFormError> {
        self.lock()?.mark_touched(field.into());
        Ok(())
    }

    pub fn edit_ingredient(
        &self,
        index: u32,
        column: FfiIngredientField,
        value: String,
    ) -> Result<(), FfiFormError> {
        Ok(self
            .lock()?
            .edit_ingredient(to_index(index), column.into(), value)?)
    }

    pub fn add_ingredient(&self) -> Result<(), FfiFormError> {
        self.lock()?.add_ingredient();
        Ok(())
    }

    pub fn remove_ingredient(&self, index: u32) -> Result<(), FfiFormError> {
        Ok(self.lock()?.remove_ingredient(to_index(index))?)
    }

    pub fn edit_instruction(&self, index: u32, value: String) -> Result<(), FfiFormError> {
        Ok(self.lock()?.edit_instruction(to_index(index), value)?)
    }

    pub fn add_instruction(&self) -> Result<(), FfiFormError> {
        self.lock()?.add_instruction();
        Ok(())
    }

    pub fn remove_instruction(&self, index: u32) -> Result<(), FfiFormError> {
        Ok(self.lock()?.remove_instruction(to_index(index))?)
    }

    pub fn submit(&self) -> Result<FfiSubmitOutcome, FfiFormError> {
        Ok(match self.lock()?.submit() {
            crate::SubmitOutcome::Accepted => FfiSubmitOutcome::Accepted,
            crate::SubmitOutcome::Rejected { error_count } => FfiSubmitOutcome::Rejected {
                error_count: to_u32(error_count),
            },
        })
    }

    pub fn reset(&self) -> Result<(), FfiFormError> {
        self.lock()?.reset();
        Ok(())
    }
}

/// Create a new, empty recipe form with default thresholds
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn new_recipe_form() -> Arc<FfiRecipeForm> {
    Arc::new(FfiRecipeForm::default())
}

/// Validate one field in isolation
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn validate_field(field: FfiField, value: String) -> Option<String> {
    crate::validate_field(field.into(), &value)
}

/// Validate a whole draft
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn validate_recipe_form(draft: FfiRecipeDraft) -> Vec<FfiFieldError> {
    flatten_errors(&crate::validate_recipe_form(&draft.into()))
}

/// Render the confirmation text for an accepted draft
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn render_summary(draft: FfiRecipeDraft) -> String {
    crate::render_summary(&draft.into())
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
