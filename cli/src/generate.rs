use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nutrifit_core::{GenerationSettings, RecipePipeline, RecipeRequest, RecipeResult};

/// Run the pipeline with the client selected by the environment.
pub async fn generate(
    request: &RecipeRequest,
    settings: GenerationSettings,
    output_path: Option<&Path>,
) -> Result<()> {
    let pipeline = RecipePipeline::from_env()
        .context("Failed to configure AI client")?
        .with_settings(settings);

    eprintln!("Creating your recipe... This may take a few minutes.");

    let result = pipeline
        .generate(request)
        .await
        .context("Error generating recipe")?;

    println!("## Generated Recipe\n");
    println!("{}\n", result.recipe);
    println!("## Nutritional Information\n");
    println!("{}", result.nutrition);

    if let Some(path) = output_path {
        let bytes = write_bundle(&result, path)?;
        eprintln!("Saved recipe to: {} ({} bytes)", path.display(), bytes);
    }

    Ok(())
}

/// Write `result` as a recipe.json bundle. Returns the number of bytes written.
fn write_bundle(result: &RecipeResult, path: &Path) -> Result<usize> {
    let body = result
        .to_bundle_json()
        .context("Failed to serialize recipe bundle")?;

    fs::write(path, &body)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_bundle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipe.json");
        let result = RecipeResult {
            recipe: "# Rice Bowl".to_string(),
            nutrition: "- Calories: 400 kcal".to_string(),
        };

        let written = write_bundle(&result, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(written, contents.len());
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["recipe"], "# Rice Bowl");
        assert_eq!(parsed["nutrition"], "- Calories: 400 kcal");
    }

    #[test]
    fn test_write_bundle_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("recipe.json");
        let result = RecipeResult {
            recipe: String::new(),
            nutrition: String::new(),
        };

        let err = write_bundle(&result, &path).unwrap_err();
        assert!(err.to_string().contains("Failed to write to file"));
    }
}
