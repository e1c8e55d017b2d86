//! Recipe creation prompt: asks for two recipe variants that fit the request.

use crate::types::RecipeRequest;

/// Prompt name used for logging.
pub const RECIPE_CREATION_PROMPT_NAME: &str = "recipe_creation";

/// What the creator persona is expected to hand back.
pub const RECIPE_CREATION_EXPECTED_OUTPUT: &str = "A detailed recipe in the specified format";

/// Marker used when the request carries no dietary restrictions.
pub const NO_RESTRICTIONS: &str = "None";

/// Render the recipe creation task for the given request.
///
/// Ingredient strings are interpolated as given.
pub fn render_recipe_creation_prompt(request: &RecipeRequest) -> String {
    let ingredients = request.ingredients.join(", ");

    let restrictions = if request.dietary_restrictions.is_empty() {
        NO_RESTRICTIONS.to_string()
    } else {
        request
            .dietary_restrictions
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        r#"Create 2 different detailed low calorie and high protein recipe options with these requirements:
Ingredients available: {ingredients}
Maximum calories: {calories}
Dietary restrictions: {restrictions}
Maximum cooking time: {cooking_time} minutes
Skill level: {skill_level}

NOTE - The maximum calorie limit ({calories}) and maximum cooking time ({cooking_time}) apply to each recipe option.
The two recipes combined can exceed the calorie and time limit.

You don't have to use every ingredient and can use one or two extra ingredients if necessary, as long as they are simple and accessible.

Provide each recipe in this format:
# [Recipe Name]

## Description
[Brief description of the dish]

## Ingredients with quantity for one serving
- [Ingredient with quantity]
- [Ingredient with quantity]
[etc.]

## Instructions
1. [Step]
2. [Step]
[etc.]

## Cooking Time
- Preparation: [X] minutes
- Cooking: [Y] minutes
- Total Time: [Z] minutes
"#,
        ingredients = ingredients,
        calories = request.max_calories,
        restrictions = restrictions,
        cooking_time = request.max_cooking_time_minutes,
        skill_level = request.skill_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DietaryRestriction, SkillLevel};

    fn request() -> RecipeRequest {
        RecipeRequest::new(vec![
            "tomatoes".to_string(),
            "chicken".to_string(),
            "rice".to_string(),
        ])
        .with_max_calories(650)
        .with_max_cooking_time(45)
        .with_skill_level(SkillLevel::Advanced)
    }

    #[test]
    fn test_render_prompt() {
        let prompt = render_recipe_creation_prompt(&request());

        assert!(prompt.contains("Ingredients available: tomatoes, chicken, rice"));
        assert!(prompt.contains("Maximum calories: 650"));
        assert!(prompt.contains("Maximum cooking time: 45 minutes"));
        assert!(prompt.contains("Skill level: Advanced"));
        assert!(prompt.contains("## Cooking Time"));
    }

    #[test]
    fn test_values_appear_once_per_template_slot() {
        let prompt = render_recipe_creation_prompt(&request());

        // Calories and cooking time each fill two slots, the rest one.
        assert_eq!(prompt.matches("650").count(), 2);
        assert_eq!(prompt.matches("45").count(), 2);
        assert_eq!(prompt.matches("Advanced").count(), 1);
        for ingredient in ["tomatoes", "chicken", "rice"] {
            assert_eq!(prompt.matches(ingredient).count(), 1, "{}", ingredient);
        }
    }

    #[test]
    fn test_empty_restrictions_render_none() {
        let prompt = render_recipe_creation_prompt(&request());
        assert!(prompt.contains("Dietary restrictions: None\n"));
    }

    #[test]
    fn test_restrictions_joined() {
        let request = request().with_dietary_restrictions([
            DietaryRestriction::GlutenFree,
            DietaryRestriction::DairyFree,
        ]);
        let prompt = render_recipe_creation_prompt(&request);
        assert!(prompt.contains("Dietary restrictions: Gluten-Free, Dairy-Free\n"));
        assert!(!prompt.contains("Dietary restrictions: None"));
    }

    #[test]
    fn test_ingredients_not_escaped() {
        let request = RecipeRequest::new(vec!["eggs {\"raw\"}".to_string()]);
        let prompt = render_recipe_creation_prompt(&request);
        assert!(prompt.contains("Ingredients available: eggs {\"raw\"}"));
    }
}
