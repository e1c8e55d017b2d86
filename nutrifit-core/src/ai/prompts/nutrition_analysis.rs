//! Nutrition analysis prompt for the recipes produced by the creation step.

/// Prompt name used for logging.
pub const NUTRITION_ANALYSIS_PROMPT_NAME: &str = "nutrition_analysis";

/// What the nutrition persona is expected to hand back.
pub const NUTRITION_ANALYSIS_EXPECTED_OUTPUT: &str =
    "A detailed nutritional analysis in the specified format";

/// Render the nutrition analysis task.
///
/// The task refers to "the recipes above", so it only makes sense in a
/// conversation that already contains the creation step's output.
pub fn render_nutrition_analysis_prompt(max_calories: u32) -> String {
    format!(
        r#"Analyze the nutritional content of each of the recipes above.
Maximum allowed calories: {max_calories} per serving

Provide the analysis in this format:
## Nutritional Information (per serving)

- Calories: [X] kcal
- Protein: [X]g
- Carbohydrates: [X]g
- Fat: [X]g
- Fiber: [X]g
- Sodium: [X]mg

## Additional Notes
[Any relevant nutritional notes or warnings based on dietary restrictions]

NOTE - The nutrition analysis for each recipe will be displayed with the recipe itself.
"#,
        max_calories = max_calories
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt = render_nutrition_analysis_prompt(750);

        assert!(prompt.contains("Maximum allowed calories: 750 per serving"));
        assert!(prompt.contains("recipes above"));
        for field in ["Calories", "Protein", "Carbohydrates", "Fat", "Fiber", "Sodium"] {
            assert!(prompt.contains(&format!("- {}:", field)), "{}", field);
        }
        assert!(prompt.contains("## Additional Notes"));
    }
}
