use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::config::FormConfig;
use crate::error::FormError;
use crate::model::{Field, Ingredient, IngredientField, RecipeDraft};
use crate::validation::{ErrorMap, RecipeValidator};

/// Outcome of [`RecipeForm::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The draft passed validation and is now the submitted record
    Accepted,
    /// The draft failed validation and was left unchanged
    Rejected { error_count: usize },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// State owner of one recipe form.
///
/// Holds the live draft, the current error map, the set of touched fields and
/// the most recently accepted submission. Every operation is synchronous and
/// takes `&mut self`, so one form has exactly one writer at a time; wrap it in
/// a lock to share it between threads.
#[derive(Debug, Clone, Default)]
pub struct RecipeForm {
    validator: RecipeValidator,
    draft: RecipeDraft,
    errors: ErrorMap,
    touched: BTreeSet<Field>,
    submitted: Option<RecipeDraft>,
}

impl RecipeForm {
    /// New form with default thresholds and an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// New form validating with the thresholds from `config`
    pub fn with_config(config: &FormConfig) -> Self {
        Self {
            validator: RecipeValidator::new(config.limits.clone()),
            ..Self::default()
        }
    }

    /// Replace the draft, e.g. with one restored by the presentation layer.
    ///
    /// Empty collections get a blank row. Errors and touched fields are cleared.
    pub fn load_draft(&mut self, mut draft: RecipeDraft) {
        draft.ensure_rows();
        self.draft = draft;
        self.errors = ErrorMap::default();
        self.touched.clear();
    }

    pub fn draft(&self) -> &RecipeDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn touched(&self) -> &BTreeSet<Field> {
        &self.touched
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// The last accepted submission, if any
    pub fn submitted(&self) -> Option<&RecipeDraft> {
        self.submitted.as_ref()
    }

    pub fn validator(&self) -> &RecipeValidator {
        &self.validator
    }

    /// Message to display for a field: only shown once the field is touched
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Set a scalar field and revalidate it
    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        let slot = self
            .draft
            .scalar_mut(field)
            .ok_or(FormError::NotScalar(field))?;
        let message = self.validator.validate_field(field, &value);
        debug!("edit {} -> {:?} ({:?})", field, value, message);
        *slot = value;
        self.errors.set(field, message);
        Ok(())
    }

    /// Record that the user has left a field. Idempotent.
    pub fn mark_touched(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn edit_ingredient(
        &mut self,
        index: usize,
        column: IngredientField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let len = self.draft.ingredients.len();
        let row = self
            .draft
            .ingredients
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange {
                field: Field::Ingredients,
                index,
                len,
            })?;
        row.set(column, value.into());
        self.refresh_ingredients();
        Ok(())
    }

    pub fn add_ingredient(&mut self) {
        self.draft.ingredients.push(Ingredient::default());
        self.refresh_ingredients();
    }

    /// Remove an ingredient row; the last remaining row cannot be removed
    pub fn remove_ingredient(&mut self, index: usize) -> Result<(), FormError> {
        check_removal(Field::Ingredients, index, self.draft.ingredients.len())?;
        self.draft.ingredients.remove(index);
        self.refresh_ingredients();
        Ok(())
    }

    pub fn edit_instruction(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let len = self.draft.instructions.len();
        let step = self
            .draft
            .instructions
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange {
                field: Field::Instructions,
                index,
                len,
            })?;
        *step = value.into();
        self.refresh_instructions();
        Ok(())
    }

    pub fn add_instruction(&mut self) {
        self.draft.instructions.push(String::new());
        self.refresh_instructions();
    }

    /// Remove an instruction step; the last remaining step cannot be removed
    pub fn remove_instruction(&mut self, index: usize) -> Result<(), FormError> {
        check_removal(Field::Instructions, index, self.draft.instructions.len())?;
        self.draft.instructions.remove(index);
        self.refresh_instructions();
        Ok(())
    }

    /// Validate the whole draft and, if it is clean, accept it.
    ///
    /// Every field is marked touched so all messages become visible. On
    /// rejection the draft is left as it was; on acceptance it becomes the
    /// submitted record and the form starts over with a fresh draft.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.errors = self.validator.validate_recipe_form(&self.draft);
        self.touched.extend(Field::ALL);

        if !self.errors.is_empty() {
            let error_count = self.errors.error_count();
            warn!(
                "Recipe submission rejected: {} error(s) in {:?}",
                error_count,
                self.errors.fields()
            );
            return SubmitOutcome::Rejected { error_count };
        }

        info!("Recipe '{}' submitted", self.draft.title.trim());
        self.submitted = Some(std::mem::take(&mut self.draft));
        self.errors = ErrorMap::default();
        self.touched.clear();
        SubmitOutcome::Accepted
    }

    /// Discard the draft, errors and touched fields; the submitted record stays
    pub fn reset(&mut self) {
        self.draft = RecipeDraft::default();
        self.errors = ErrorMap::default();
        self.touched.clear();
    }

    // Collection errors only exist after a submit attempt; keep them aligned with the rows.
    fn refresh_ingredients(&mut self) {
        if self.is_touched(Field::Ingredients) {
            let errors = self.validator.validate_ingredients(&self.draft.ingredients);
            self.errors.set_ingredients(errors);
        }
    }

    fn refresh_instructions(&mut self) {
        if self.is_touched(Field::Instructions) {
            let errors = self
                .validator
                .validate_instructions(&self.draft.instructions);
            self.errors.set_instructions(errors);
        }
    }
}

fn check_removal(field: Field, index: usize, len: usize) -> Result<(), FormError> {
    if index >= len {
        warn!("Refusing to remove {}[{}]: only {} row(s)", field, index, len);
        return Err(FormError::IndexOutOfRange { field, index, len });
    }
    if len <= 1 {
        warn!("Refusing to remove the last row of {}", field);
        return Err(FormError::LastRow(field));
    }
    Ok(())
}
