use crate::model::RecipeDraft;

/// Render the confirmation shown after a recipe has been accepted.
///
/// Values are trimmed; the image line is left out when no URL was given.
pub fn render_summary(record: &RecipeDraft) -> String {
    let mut lines = vec![
        format!("# {}", record.title.trim()),
        String::new(),
        record.description.trim().to_string(),
        String::new(),
    ];

    let mut metadata = vec![
        ("servings", record.servings.trim()),
        ("difficulty", record.difficulty.trim()),
        ("category", record.category.trim()),
        ("cuisine", record.cuisine.trim()),
    ];
    let image_url = record.image_url.trim();
    if !image_url.is_empty() {
        metadata.push(("image", image_url));
    }
    lines.extend(metadata.iter().map(|(k, v)| format!("{}: {}", k, v)));

    lines.push(String::new());
    lines.push("## Ingredients".to_string());
    lines.extend(record.ingredients.iter().map(|ingredient| {
        format!(
            "- {} {} {}",
            ingredient.quantity.trim(),
            ingredient.unit.trim(),
            ingredient.name.trim()
        )
    }));

    lines.push(String::new());
    lines.push("## Instructions".to_string());
    lines.extend(
        record
            .instructions
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step.trim())),
    );

    lines.join("\n")
}
