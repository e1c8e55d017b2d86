use anyhow::{Context, Result};
use nutrifit_core::ai::prompts::render_persona_system_prompt;
use nutrifit_core::pipeline::recipe_steps;
use nutrifit_core::RecipeRequest;

/// Print each step's system message and task as the model receives them.
pub fn print_prompts(request: &RecipeRequest) -> Result<()> {
    print!("{}", render_prompts(request)?);
    Ok(())
}

fn render_prompts(request: &RecipeRequest) -> Result<String> {
    request.validate().context("Invalid recipe request")?;

    let mut out = String::new();
    for (index, step) in recipe_steps(request).iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("=== {} ({}) ===\n", step.name, step.persona.role));
        out.push_str("--- system ---\n");
        out.push_str(&render_persona_system_prompt(
            &step.persona,
            step.expected_output,
        ));
        out.push_str("\n--- user ---\n");
        out.push_str(&step.description);
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_include_system_messages() {
        let request = RecipeRequest::new(vec!["tomatoes".to_string(), "rice".to_string()]);

        let out = render_prompts(&request).unwrap();

        assert!(out.contains("=== recipe_creation (Recipe Creator) ==="));
        assert!(out.contains("You are Recipe Creator."));
        assert!(out.contains("=== nutrition_analysis (Nutrition Expert) ==="));
        assert!(out.contains("You are Nutrition Expert."));
        assert!(out.contains("tomatoes, rice"));
        assert_eq!(out.matches("--- system ---").count(), 2);
        assert_eq!(out.matches("--- user ---").count(), 2);
    }

    #[test]
    fn test_invalid_request_prints_nothing() {
        let err = render_prompts(&RecipeRequest::new(vec![])).unwrap_err();
        assert!(err.to_string().contains("Invalid recipe request"));
    }
}
